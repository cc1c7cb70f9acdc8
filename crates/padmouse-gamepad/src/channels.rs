use evdev::{AbsoluteAxisCode, KeyCode};

use crate::hat::HatAxis;
use crate::types::LogicalButton;

/// Key codes reported by the controller and the button each one drives.
pub const KEY_BUTTONS: [(KeyCode, LogicalButton); 11] = [
    (KeyCode::BTN_EAST, LogicalButton::A),
    (KeyCode::BTN_SOUTH, LogicalButton::B),
    (KeyCode::BTN_WEST, LogicalButton::X),
    (KeyCode::BTN_NORTH, LogicalButton::Y),
    (KeyCode::BTN_TL, LogicalButton::LeftShoulder),
    (KeyCode::BTN_TR, LogicalButton::RightShoulder),
    (KeyCode::BTN_SELECT, LogicalButton::Select),
    (KeyCode::BTN_START, LogicalButton::Start),
    (KeyCode::BTN_MODE, LogicalButton::Home),
    (KeyCode::BTN_THUMBL, LogicalButton::LeftStick),
    (KeyCode::BTN_THUMBR, LogicalButton::RightStick),
];

/// Absolute channels a device must expose to be driven as a controller.
pub const CONTROLLER_AXES: [AbsoluteAxisCode; 8] = [
    AbsoluteAxisCode::ABS_X,
    AbsoluteAxisCode::ABS_Y,
    AbsoluteAxisCode::ABS_Z,
    AbsoluteAxisCode::ABS_RX,
    AbsoluteAxisCode::ABS_RY,
    AbsoluteAxisCode::ABS_RZ,
    AbsoluteAxisCode::ABS_HAT0X,
    AbsoluteAxisCode::ABS_HAT0Y,
];

/// How an absolute channel is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisRole {
    /// Analog trigger binarized into a button.
    Trigger(LogicalButton),
    /// One axis of the directional pad.
    Hat(HatAxis),
    /// Stick channel, read on demand.
    Stick,
}

pub fn button_for_key(code: KeyCode) -> Option<LogicalButton> {
    KEY_BUTTONS
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, button)| *button)
}

pub fn axis_role(axis: AbsoluteAxisCode) -> Option<AxisRole> {
    match axis {
        AbsoluteAxisCode::ABS_Z => Some(AxisRole::Trigger(LogicalButton::LeftTrigger)),
        AbsoluteAxisCode::ABS_RZ => Some(AxisRole::Trigger(LogicalButton::RightTrigger)),
        AbsoluteAxisCode::ABS_HAT0X => Some(AxisRole::Hat(HatAxis::X)),
        AbsoluteAxisCode::ABS_HAT0Y => Some(AxisRole::Hat(HatAxis::Y)),
        AbsoluteAxisCode::ABS_X
        | AbsoluteAxisCode::ABS_Y
        | AbsoluteAxisCode::ABS_RX
        | AbsoluteAxisCode::ABS_RY => Some(AxisRole::Stick),
        _ => None,
    }
}
