//! Scripted in-memory device for driving a [`Session`](crate::Session)
//! without hardware.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use evdev::{AbsoluteAxisCode, KeyCode};

use crate::error::{Error, Result};
use crate::event::{EventSource, RawEvent, ReadMode, ReadStatus};
use crate::rumble::RumbleChannel;
use crate::session::Device;
use crate::types::ControllerInfo;

/// Side effect requested from a [`MockDevice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockCall {
    Grab(bool),
    RumblePlay,
    RumbleStop,
}

#[derive(Debug)]
enum Scripted {
    Event(RawEvent),
    Drop(Vec<RawEvent>),
    Fail,
}

/// Device that plays back queued events and records every side effect.
#[derive(Debug)]
pub struct MockDevice {
    info: ControllerInfo,
    script: VecDeque<Scripted>,
    replay: VecDeque<RawEvent>,
    axes: HashMap<AbsoluteAxisCode, i32>,
    calls: Rc<RefCell<Vec<MockCall>>>,
    fail_grab: bool,
    fail_rumble: bool,
}

impl Default for MockDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDevice {
    pub fn new() -> Self {
        Self {
            info: ControllerInfo {
                path: PathBuf::from("/dev/input/mock"),
                name: "Mock Controller".to_string(),
                vendor_id: 0,
                product_id: 0,
            },
            script: VecDeque::new(),
            replay: VecDeque::new(),
            axes: HashMap::new(),
            calls: Rc::new(RefCell::new(Vec::new())),
            fail_grab: false,
            fail_rumble: false,
        }
    }

    /// Queue a live event.
    pub fn push_event(&mut self, event: RawEvent) {
        self.script.push_back(Scripted::Event(event));
    }

    pub fn push_key(&mut self, code: KeyCode, value: i32) {
        self.push_event(RawEvent::Key { code, value });
    }

    /// Queue an absolute event. The axis value changes when it is read.
    pub fn push_abs(&mut self, axis: AbsoluteAxisCode, value: i32) {
        self.push_event(RawEvent::Absolute { axis, value });
    }

    /// Queue a drop marker followed by the given replay.
    pub fn push_drop(&mut self, replay: impl IntoIterator<Item = RawEvent>) {
        self.script
            .push_back(Scripted::Drop(replay.into_iter().collect()));
    }

    /// Make the read at this point in the script fail.
    pub fn push_read_error(&mut self) {
        self.script.push_back(Scripted::Fail);
    }

    /// Set an axis value immediately.
    pub fn set_axis(&mut self, axis: AbsoluteAxisCode, value: i32) {
        self.axes.insert(axis, value);
    }

    pub fn fail_grab(&mut self, fail: bool) {
        self.fail_grab = fail;
    }

    pub fn fail_rumble(&mut self, fail: bool) {
        self.fail_rumble = fail;
    }

    /// Recorded side effects so far.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.borrow().clone()
    }

    /// Shared handle to the call log that outlives the device.
    pub fn call_log(&self) -> Rc<RefCell<Vec<MockCall>>> {
        Rc::clone(&self.calls)
    }

    fn record(&self, call: MockCall) {
        self.calls.borrow_mut().push(call);
    }

    fn observe(&mut self, event: RawEvent) -> RawEvent {
        if let RawEvent::Absolute { axis, value } = event {
            self.axes.insert(axis, value);
        }
        event
    }
}

impl EventSource for MockDevice {
    fn next_event(&mut self, mode: ReadMode) -> Result<ReadStatus> {
        if mode == ReadMode::Sync {
            return Ok(match self.replay.pop_front() {
                Some(event) => ReadStatus::Replay(self.observe(event)),
                None => ReadStatus::Empty,
            });
        }
        match self.script.pop_front() {
            Some(Scripted::Event(event)) => Ok(ReadStatus::Event(self.observe(event))),
            Some(Scripted::Drop(replay)) => {
                self.replay = replay.into();
                Ok(ReadStatus::Dropped)
            }
            Some(Scripted::Fail) => Err(Error::Read(io::Error::other("scripted read failure"))),
            None => Ok(ReadStatus::Empty),
        }
    }
}

impl RumbleChannel for MockDevice {
    fn play(&mut self) -> Result<()> {
        if self.fail_rumble {
            return Err(Error::Rumble(io::Error::other("scripted rumble failure")));
        }
        self.record(MockCall::RumblePlay);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        if self.fail_rumble {
            return Err(Error::Rumble(io::Error::other("scripted rumble failure")));
        }
        self.record(MockCall::RumbleStop);
        Ok(())
    }
}

impl Device for MockDevice {
    fn info(&self) -> &ControllerInfo {
        &self.info
    }

    fn set_grab(&mut self, grab: bool) -> Result<()> {
        if self.fail_grab {
            return Err(Error::Grab(io::Error::other("scripted grab failure")));
        }
        self.record(MockCall::Grab(grab));
        Ok(())
    }

    fn axis_value(&self, axis: AbsoluteAxisCode) -> i32 {
        self.axes.get(&axis).copied().unwrap_or(0)
    }
}
