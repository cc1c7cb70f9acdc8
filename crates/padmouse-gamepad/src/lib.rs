mod axis;
mod channels;
mod decoder;
mod error;
mod evdev_backend;
mod event;
mod hat;
mod rumble;
mod session;
mod types;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use evdev::{AbsoluteAxisCode, KeyCode};

pub use crate::axis::{normalize, AXIS_MAX, AXIS_MIN, AXIS_ROUND};
pub use crate::channels::{axis_role, button_for_key, AxisRole, CONTROLLER_AXES, KEY_BUTTONS};
pub use crate::decoder::EventDecoder;
pub use crate::error::{Error, Result};
pub use crate::evdev_backend::EvdevController;
pub use crate::event::{EventSource, RawEvent, ReadMode, ReadStatus};
pub use crate::hat::{HatAxis, HatState};
pub use crate::rumble::{RumbleChannel, RumbleState, RumbleTimer, RUMBLE_DURATION};
pub use crate::session::{Device, Session};
pub use crate::types::{ButtonPhase, ButtonTransition, ControllerInfo, LogicalButton, StickAxis};
