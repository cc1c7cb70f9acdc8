//! Linux evdev backend.

use std::collections::VecDeque;
use std::io;
use std::os::fd::AsRawFd;
use std::path::{Path, PathBuf};

use evdev::raw_stream::RawDevice;
use evdev::{
    AbsoluteAxisCode, FFEffect, FFEffectCode, FFEffectData, FFEffectKind, FFReplay, FFTrigger,
    KeyCode,
};
use nix::fcntl::{FcntlArg, OFlag};

use crate::channels::{CONTROLLER_AXES, KEY_BUTTONS};
use crate::error::{Error, Result};
use crate::event::{EventSource, RawEvent, ReadMode, ReadStatus};
use crate::rumble::{RumbleChannel, RUMBLE_DURATION};
use crate::session::Device;
use crate::types::ControllerInfo;

const INPUT_DIR: &str = "/dev/input";

/// Last known value of every channel the controller is decoded from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct StateCache {
    keys: [bool; KEY_BUTTONS.len()],
    axes: [i32; CONTROLLER_AXES.len()],
}

impl StateCache {
    /// Read the current state from the kernel.
    fn query(device: &RawDevice) -> io::Result<Self> {
        let mut state = Self::default();
        let pressed = device.get_key_state()?;
        for (slot, (code, _)) in state.keys.iter_mut().zip(KEY_BUTTONS) {
            *slot = pressed.contains(code);
        }
        for (axis, info) in device.get_absinfo()? {
            if let Some(i) = axis_index(axis) {
                state.axes[i] = info.value();
            }
        }
        Ok(state)
    }

    fn apply(&mut self, event: &RawEvent) {
        match *event {
            RawEvent::Key { code, value } => {
                if let Some(i) = key_index(code) {
                    self.keys[i] = value != 0;
                }
            }
            RawEvent::Absolute { axis, value } => {
                if let Some(i) = axis_index(axis) {
                    self.axes[i] = value;
                }
            }
            _ => {}
        }
    }

    fn axis(&self, axis: AbsoluteAxisCode) -> i32 {
        axis_index(axis).map_or(0, |i| self.axes[i])
    }

    /// Queue one event per channel that differs from `current`, then adopt it.
    fn replay_towards(&mut self, current: &StateCache, out: &mut VecDeque<RawEvent>) {
        for (i, (code, _)) in KEY_BUTTONS.iter().enumerate() {
            if self.keys[i] != current.keys[i] {
                out.push_back(RawEvent::Key {
                    code: *code,
                    value: i32::from(current.keys[i]),
                });
            }
        }
        for (i, axis) in CONTROLLER_AXES.iter().enumerate() {
            if self.axes[i] != current.axes[i] {
                out.push_back(RawEvent::Absolute {
                    axis: *axis,
                    value: current.axes[i],
                });
            }
        }
        self.clone_from(current);
    }
}

fn key_index(code: KeyCode) -> Option<usize> {
    KEY_BUTTONS.iter().position(|(key, _)| *key == code)
}

fn axis_index(axis: AbsoluteAxisCode) -> Option<usize> {
    CONTROLLER_AXES.iter().position(|a| *a == axis)
}

/// Kernel side of the backend: queued events and the current state.
trait RawSource {
    /// Append whatever events are queued right now. Appends nothing when the
    /// queue is empty.
    fn fetch_into(&mut self, out: &mut VecDeque<RawEvent>) -> io::Result<()>;

    fn current_state(&self) -> io::Result<StateCache>;
}

impl RawSource for RawDevice {
    fn fetch_into(&mut self, out: &mut VecDeque<RawEvent>) -> io::Result<()> {
        match self.fetch_events() {
            Ok(events) => {
                out.extend(events.map(RawEvent::from));
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn current_state(&self) -> io::Result<StateCache> {
        StateCache::query(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Live,
    Dropped,
    Replaying,
}

/// Live reading, drop detection and replay reconstruction over a
/// [`RawSource`].
#[derive(Debug)]
struct EventStream {
    cache: StateCache,
    pending: VecDeque<RawEvent>,
    replay: VecDeque<RawEvent>,
    phase: Phase,
    discarding: bool,
}

impl EventStream {
    fn new(cache: StateCache) -> Self {
        Self {
            cache,
            pending: VecDeque::new(),
            replay: VecDeque::new(),
            phase: Phase::Live,
            discarding: false,
        }
    }

    fn next_event<S: RawSource>(&mut self, source: &mut S, mode: ReadMode) -> Result<ReadStatus> {
        match mode {
            ReadMode::Normal => self.read_live(source),
            ReadMode::Sync => self.read_replay(source),
        }
    }

    fn axis(&self, axis: AbsoluteAxisCode) -> i32 {
        self.cache.axis(axis)
    }

    /// Next raw event from the source, or `None` if nothing is queued.
    fn next_raw<S: RawSource>(&mut self, source: &mut S) -> Result<Option<RawEvent>> {
        if self.pending.is_empty() {
            source.fetch_into(&mut self.pending).map_err(Error::Read)?;
        }
        Ok(self.pending.pop_front())
    }

    /// Skip the rest of the packet the drop marker interrupted.
    fn discard_dropped<S: RawSource>(&mut self, source: &mut S) -> Result<()> {
        while self.discarding {
            match self.next_raw(source)? {
                Some(RawEvent::SyncReport) => self.discarding = false,
                Some(_) => {}
                None => break,
            }
        }
        Ok(())
    }

    fn read_live<S: RawSource>(&mut self, source: &mut S) -> Result<ReadStatus> {
        while let Some(event) = self.next_raw(source)? {
            if self.discarding {
                if event == RawEvent::SyncReport {
                    self.discarding = false;
                }
                continue;
            }
            if event == RawEvent::SyncDropped {
                self.phase = Phase::Dropped;
                self.discarding = true;
                return Ok(ReadStatus::Dropped);
            }
            self.cache.apply(&event);
            return Ok(ReadStatus::Event(event));
        }
        Ok(ReadStatus::Empty)
    }

    fn read_replay<S: RawSource>(&mut self, source: &mut S) -> Result<ReadStatus> {
        if self.phase == Phase::Dropped {
            self.discard_dropped(source)?;
            let current = source.current_state().map_err(Error::Read)?;
            self.cache.replay_towards(&current, &mut self.replay);
            log::debug!("replaying {} changed channels", self.replay.len());
            self.phase = Phase::Replaying;
        }
        match self.replay.pop_front() {
            Some(event) => Ok(ReadStatus::Replay(event)),
            None => {
                self.phase = Phase::Live;
                Ok(ReadStatus::Empty)
            }
        }
    }
}

/// A controller opened through evdev.
pub struct EvdevController {
    device: RawDevice,
    info: ControllerInfo,
    effect: FFEffect,
    stream: EventStream,
}

impl EvdevController {
    /// Open the controller at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let device = RawDevice::open(&path).map_err(|source| Error::Open {
            path: path.clone(),
            source,
        })?;
        if !is_controller(&device) {
            return Err(Error::NotController(path));
        }
        Self::connect(path, device)
    }

    /// Open the first controller among the input event nodes.
    ///
    /// Nodes that cannot be accessed are skipped.
    pub fn open_first() -> Result<Self> {
        for index in 0u32.. {
            let path = event_node(index);
            let device = match RawDevice::open(&path) {
                Ok(device) => device,
                Err(e) if e.kind() == io::ErrorKind::NotFound => break,
                Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                    log::debug!("skipping {}: {e}", path.display());
                    continue;
                }
                Err(source) => return Err(Error::Open { path, source }),
            };
            if is_controller(&device) {
                return Self::connect(path, device);
            }
        }
        Err(Error::NoController)
    }

    /// Describe every accessible controller.
    pub fn list() -> Result<Vec<ControllerInfo>> {
        let mut found = Vec::new();
        for index in 0u32.. {
            let path = event_node(index);
            let device = match RawDevice::open(&path) {
                Ok(device) => device,
                Err(e) if e.kind() == io::ErrorKind::NotFound => break,
                Err(e) if e.kind() == io::ErrorKind::PermissionDenied => continue,
                Err(e) => return Err(Error::Enumerate(e)),
            };
            if is_controller(&device) {
                found.push(describe(path, &device));
            }
        }
        Ok(found)
    }

    fn connect(path: PathBuf, mut device: RawDevice) -> Result<Self> {
        nix::fcntl::fcntl(device.as_raw_fd(), FcntlArg::F_SETFL(OFlag::O_NONBLOCK)).map_err(
            |errno| Error::Open {
                path: path.clone(),
                source: io::Error::from(errno),
            },
        )?;

        let effect = device
            .upload_ff_effect(rumble_effect())
            .map_err(Error::EffectUpload)?;
        log::debug!("uploaded rumble effect");

        let cache = StateCache::query(&device).map_err(Error::Read)?;
        let info = describe(path, &device);
        log::debug!(
            "connected to {} at {} ({:04x}:{:04x})",
            info.name,
            info.path.display(),
            info.vendor_id,
            info.product_id
        );

        Ok(Self {
            device,
            info,
            effect,
            stream: EventStream::new(cache),
        })
    }
}

impl EventSource for EvdevController {
    fn next_event(&mut self, mode: ReadMode) -> Result<ReadStatus> {
        self.stream.next_event(&mut self.device, mode)
    }
}

impl RumbleChannel for EvdevController {
    fn play(&mut self) -> Result<()> {
        self.effect.play(1).map_err(Error::Rumble)
    }

    fn stop(&mut self) -> Result<()> {
        self.effect.stop().map_err(Error::Rumble)
    }
}

impl Device for EvdevController {
    fn info(&self) -> &ControllerInfo {
        &self.info
    }

    fn set_grab(&mut self, grab: bool) -> Result<()> {
        if grab {
            self.device.grab().map_err(Error::Grab)
        } else {
            self.device.ungrab().map_err(Error::Grab)
        }
    }

    fn axis_value(&self, axis: AbsoluteAxisCode) -> i32 {
        self.stream.axis(axis)
    }
}

fn event_node(index: u32) -> PathBuf {
    PathBuf::from(format!("{INPUT_DIR}/event{index}"))
}

fn describe(path: PathBuf, device: &RawDevice) -> ControllerInfo {
    let id = device.input_id();
    ControllerInfo {
        path,
        name: device.name().unwrap_or("Unknown").to_string(),
        vendor_id: id.vendor(),
        product_id: id.product(),
    }
}

/// Whether the device exposes every axis, key and the rumble effect we need.
fn is_controller(device: &RawDevice) -> bool {
    let has_axes = device
        .supported_absolute_axes()
        .is_some_and(|axes| CONTROLLER_AXES.iter().all(|axis| axes.contains(*axis)));
    let has_keys = device
        .supported_keys()
        .is_some_and(|keys| KEY_BUTTONS.iter().all(|(code, _)| keys.contains(*code)));
    let has_rumble = device
        .supported_ff()
        .is_some_and(|ff| ff.contains(FFEffectCode::FF_RUMBLE));
    has_axes && has_keys && has_rumble
}

fn rumble_effect() -> FFEffectData {
    FFEffectData {
        direction: 0,
        trigger: FFTrigger {
            button: 0,
            interval: 0,
        },
        replay: FFReplay {
            length: RUMBLE_DURATION.as_millis() as u16,
            delay: 0,
        },
        kind: FFEffectKind::Rumble {
            strong_magnitude: 0xffff,
            weak_magnitude: 0xffff,
        },
    }
}
