use std::time::Instant;

use evdev::AbsoluteAxisCode;

use crate::axis::normalize;
use crate::decoder::EventDecoder;
use crate::error::Result;
use crate::event::EventSource;
use crate::rumble::{RumbleChannel, RumbleTimer};
use crate::types::{ButtonTransition, ControllerInfo, StickAxis};

/// An opened controller: event stream, rumble output, grab and axis state.
pub trait Device: EventSource + RumbleChannel {
    fn info(&self) -> &ControllerInfo;

    /// Take or release exclusive access to the device.
    fn set_grab(&mut self, grab: bool) -> Result<()>;

    /// Last known raw value of an absolute channel.
    fn axis_value(&self, axis: AbsoluteAxisCode) -> i32;
}

/// A live controller session.
///
/// The device is grabbed for the whole lifetime of the session unless the
/// owner releases it with [`Session::toggle_grab`]. Rumble is stopped and the
/// grab released when the session is dropped.
pub struct Session<D: Device> {
    device: D,
    decoder: EventDecoder,
    rumble: RumbleTimer,
    grabbed: bool,
}

impl<D: Device> Session<D> {
    /// Grab the device and start a session on it.
    pub fn new(mut device: D) -> Result<Self> {
        device.set_grab(true)?;
        log::debug!("grabbed {}", device.info().name);
        Ok(Self {
            device,
            decoder: EventDecoder::new(),
            rumble: RumbleTimer::default(),
            grabbed: true,
        })
    }

    pub fn info(&self) -> &ControllerInfo {
        self.device.info()
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn grabbed(&self) -> bool {
        self.grabbed
    }

    pub fn rumble_timer(&self) -> &RumbleTimer {
        &self.rumble
    }

    /// Advance the rumble deadline and decode every pending event.
    pub fn update(&mut self, now: Instant, out: &mut Vec<ButtonTransition>) -> Result<()> {
        self.rumble.tick(&mut self.device, now)?;
        self.decoder.drain(&mut self.device, out)
    }

    /// Normalized `(x, y)` position of a stick.
    pub fn stick(&self, stick: StickAxis) -> (f32, f32) {
        let (x, y) = stick.channels();
        (
            normalize(self.device.axis_value(x)),
            normalize(self.device.axis_value(y)),
        )
    }

    /// Play the acknowledgment pulse, superseding one in flight.
    pub fn rumble(&mut self, now: Instant) -> Result<()> {
        self.rumble.start(&mut self.device, now)
    }

    /// Flip the grab and return the new state.
    pub fn toggle_grab(&mut self) -> Result<bool> {
        let grab = !self.grabbed;
        self.device.set_grab(grab)?;
        self.grabbed = grab;
        log::debug!("{} {}", if grab { "grabbed" } else { "released" }, self.info().name);
        Ok(grab)
    }
}

impl<D: Device> Drop for Session<D> {
    fn drop(&mut self) {
        if let Err(e) = self.rumble.stop(&mut self.device) {
            log::debug!("failed to stop rumble on close: {e}");
        }
        if self.grabbed {
            if let Err(e) = self.device.set_grab(false) {
                log::debug!("failed to release device on close: {e}");
            }
        }
    }
}
