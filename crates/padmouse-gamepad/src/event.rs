use evdev::{AbsoluteAxisCode, EventType, InputEvent, KeyCode, SynchronizationCode};

use crate::error::Result;

/// A raw event read from the device, tagged by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawEvent {
    Key { code: KeyCode, value: i32 },
    Absolute { axis: AbsoluteAxisCode, value: i32 },
    /// End of a hardware report.
    SyncReport,
    /// The kernel buffer overflowed and events were lost.
    SyncDropped,
    Other { kind: EventType, code: u16, value: i32 },
}

impl From<InputEvent> for RawEvent {
    fn from(event: InputEvent) -> Self {
        let code = event.code();
        let value = event.value();
        match event.event_type() {
            EventType::KEY => RawEvent::Key {
                code: KeyCode(code),
                value,
            },
            EventType::ABSOLUTE => RawEvent::Absolute {
                axis: AbsoluteAxisCode(code),
                value,
            },
            EventType::SYNCHRONIZATION if code == SynchronizationCode::SYN_REPORT.0 => {
                RawEvent::SyncReport
            }
            EventType::SYNCHRONIZATION if code == SynchronizationCode::SYN_DROPPED.0 => {
                RawEvent::SyncDropped
            }
            kind => RawEvent::Other { kind, code, value },
        }
    }
}

/// How the next event should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Regular live reads.
    Normal,
    /// Reads from the state replay that follows a drop.
    Sync,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus {
    /// A live event (normal mode).
    Event(RawEvent),
    /// Events were lost; the caller should switch to [`ReadMode::Sync`].
    Dropped,
    /// A reconstructed event (sync mode).
    Replay(RawEvent),
    /// Nothing available right now, or the replay is complete.
    Empty,
}

/// Non-blocking stream of raw controller events.
pub trait EventSource {
    fn next_event(&mut self, mode: ReadMode) -> Result<ReadStatus>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_input_events() {
        let key = InputEvent::new(EventType::KEY.0, KeyCode::BTN_EAST.0, 1);
        assert_eq!(
            RawEvent::from(key),
            RawEvent::Key {
                code: KeyCode::BTN_EAST,
                value: 1
            }
        );

        let abs = InputEvent::new(EventType::ABSOLUTE.0, AbsoluteAxisCode::ABS_HAT0Y.0, -1);
        assert_eq!(
            RawEvent::from(abs),
            RawEvent::Absolute {
                axis: AbsoluteAxisCode::ABS_HAT0Y,
                value: -1
            }
        );
    }

    #[test]
    fn classifies_sync_markers() {
        let report = InputEvent::new(
            EventType::SYNCHRONIZATION.0,
            SynchronizationCode::SYN_REPORT.0,
            0,
        );
        assert_eq!(RawEvent::from(report), RawEvent::SyncReport);

        let dropped = InputEvent::new(
            EventType::SYNCHRONIZATION.0,
            SynchronizationCode::SYN_DROPPED.0,
            0,
        );
        assert_eq!(RawEvent::from(dropped), RawEvent::SyncDropped);
    }

    #[test]
    fn unknown_types_are_kept_as_other() {
        let misc = InputEvent::new(EventType::MISC.0, 4, 123);
        assert_eq!(
            RawEvent::from(misc),
            RawEvent::Other {
                kind: EventType::MISC,
                code: 4,
                value: 123
            }
        );
    }
}
