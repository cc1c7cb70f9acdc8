use crate::channels::{axis_role, button_for_key, AxisRole};
use crate::error::Result;
use crate::event::{EventSource, RawEvent, ReadMode, ReadStatus};
use crate::hat::HatState;
use crate::types::{ButtonTransition, LogicalButton};

/// Turns raw events into logical button transitions.
///
/// Keeps the pad and trigger state needed to produce clean edges, and
/// drives the replay protocol when the source reports lost events.
#[derive(Debug, Default)]
pub struct EventDecoder {
    hat: HatState,
    left_trigger: bool,
    right_trigger: bool,
}

impl EventDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a single event. Events that carry no button edge are skipped.
    pub fn decode(&mut self, event: &RawEvent, out: &mut Vec<ButtonTransition>) {
        match *event {
            RawEvent::Key { code, value } => match button_for_key(code) {
                Some(button) => out.push(edge(button, value != 0)),
                None => log::trace!("skipping unmapped key {code:?}"),
            },
            RawEvent::Absolute { axis, value } => match axis_role(axis) {
                Some(AxisRole::Trigger(button)) => self.trigger(button, value != 0, out),
                Some(AxisRole::Hat(hat_axis)) => self.hat.update(hat_axis, value, out),
                Some(AxisRole::Stick) => {}
                None => log::trace!("skipping unmapped axis {axis:?}"),
            },
            RawEvent::SyncReport => {}
            RawEvent::SyncDropped => log::debug!("drop marker reached the decoder"),
            RawEvent::Other { kind, code, value } => {
                log::trace!("skipping event type={kind:?} code={code} value={value}");
            }
        }
    }

    /// Read and decode everything the source has available right now.
    pub fn drain<S: EventSource + ?Sized>(
        &mut self,
        source: &mut S,
        out: &mut Vec<ButtonTransition>,
    ) -> Result<()> {
        loop {
            match source.next_event(ReadMode::Normal)? {
                ReadStatus::Event(event) | ReadStatus::Replay(event) => self.decode(&event, out),
                ReadStatus::Dropped => self.resync(source, out)?,
                ReadStatus::Empty => return Ok(()),
            }
        }
    }

    /// Whether the given button is held according to decoded axis state.
    /// Only meaningful for triggers and pad directions.
    pub fn is_held(&self, button: LogicalButton) -> bool {
        match button {
            LogicalButton::LeftTrigger => self.left_trigger,
            LogicalButton::RightTrigger => self.right_trigger,
            other => self.hat.is_held(other),
        }
    }

    fn resync<S: EventSource + ?Sized>(
        &mut self,
        source: &mut S,
        out: &mut Vec<ButtonTransition>,
    ) -> Result<()> {
        log::debug!("events dropped, replaying device state");
        loop {
            match source.next_event(ReadMode::Sync)? {
                ReadStatus::Replay(event) | ReadStatus::Event(event) => self.decode(&event, out),
                ReadStatus::Dropped => {}
                ReadStatus::Empty => return Ok(()),
            }
        }
    }

    fn trigger(&mut self, button: LogicalButton, down: bool, out: &mut Vec<ButtonTransition>) {
        let held = match button {
            LogicalButton::LeftTrigger => &mut self.left_trigger,
            LogicalButton::RightTrigger => &mut self.right_trigger,
            _ => return,
        };
        if *held != down {
            *held = down;
            out.push(edge(button, down));
        }
    }
}

const fn edge(button: LogicalButton, down: bool) -> ButtonTransition {
    if down {
        ButtonTransition::pressed(button)
    } else {
        ButtonTransition::released(button)
    }
}
