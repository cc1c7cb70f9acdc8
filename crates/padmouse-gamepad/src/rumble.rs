use std::time::{Duration, Instant};

use crate::error::Result;

/// How long a single rumble pulse plays before it is stopped.
pub const RUMBLE_DURATION: Duration = Duration::from_millis(500);

/// Force-feedback output of a device.
pub trait RumbleChannel {
    /// Start playing the uploaded rumble effect.
    fn play(&mut self) -> Result<()>;
    /// Stop the rumble effect.
    fn stop(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RumbleState {
    #[default]
    Idle,
    Playing {
        since: Instant,
    },
}

/// Single timed rumble pulse with a fixed auto-stop deadline.
#[derive(Debug, Clone)]
pub struct RumbleTimer {
    state: RumbleState,
    duration: Duration,
}

impl Default for RumbleTimer {
    fn default() -> Self {
        Self::new(RUMBLE_DURATION)
    }
}

impl RumbleTimer {
    pub fn new(duration: Duration) -> Self {
        Self {
            state: RumbleState::Idle,
            duration,
        }
    }

    pub fn state(&self) -> RumbleState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, RumbleState::Playing { .. })
    }

    /// Start a new pulse, stopping the one in flight first.
    pub fn start<C: RumbleChannel + ?Sized>(&mut self, channel: &mut C, now: Instant) -> Result<()> {
        if self.is_playing() {
            channel.stop()?;
            self.state = RumbleState::Idle;
        }
        channel.play()?;
        self.state = RumbleState::Playing { since: now };
        Ok(())
    }

    /// Stop the pulse if its deadline has passed.
    pub fn tick<C: RumbleChannel + ?Sized>(&mut self, channel: &mut C, now: Instant) -> Result<()> {
        if let RumbleState::Playing { since } = self.state {
            if now.saturating_duration_since(since) >= self.duration {
                channel.stop()?;
                self.state = RumbleState::Idle;
            }
        }
        Ok(())
    }

    /// Stop the pulse unconditionally.
    pub fn stop<C: RumbleChannel + ?Sized>(&mut self, channel: &mut C) -> Result<()> {
        if self.is_playing() {
            self.state = RumbleState::Idle;
            channel.stop()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Call {
        Play,
        Stop,
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl RumbleChannel for Recorder {
        fn play(&mut self) -> Result<()> {
            self.calls.push(Call::Play);
            Ok(())
        }

        fn stop(&mut self) -> Result<()> {
            self.calls.push(Call::Stop);
            Ok(())
        }
    }

    #[test]
    fn stops_exactly_at_deadline() {
        let mut timer = RumbleTimer::default();
        let mut channel = Recorder::default();
        let now = Instant::now();

        timer.start(&mut channel, now).unwrap();
        timer
            .tick(&mut channel, now + RUMBLE_DURATION - Duration::from_millis(1))
            .unwrap();
        assert!(timer.is_playing());
        assert_eq!(channel.calls, vec![Call::Play]);

        timer.tick(&mut channel, now + RUMBLE_DURATION).unwrap();
        assert!(!timer.is_playing());
        timer
            .tick(&mut channel, now + RUMBLE_DURATION * 2)
            .unwrap();
        assert_eq!(channel.calls, vec![Call::Play, Call::Stop]);
    }

    #[test]
    fn restart_stops_then_plays() {
        let mut timer = RumbleTimer::default();
        let mut channel = Recorder::default();
        let now = Instant::now();

        timer.start(&mut channel, now).unwrap();
        let later = now + Duration::from_millis(100);
        timer.start(&mut channel, later).unwrap();
        assert_eq!(channel.calls, vec![Call::Play, Call::Stop, Call::Play]);
        assert_eq!(timer.state(), RumbleState::Playing { since: later });

        // The deadline follows the newest pulse.
        timer.tick(&mut channel, now + RUMBLE_DURATION).unwrap();
        assert!(timer.is_playing());
    }

    #[test]
    fn idle_tick_and_stop_are_noops() {
        let mut timer = RumbleTimer::default();
        let mut channel = Recorder::default();
        timer.tick(&mut channel, Instant::now()).unwrap();
        timer.stop(&mut channel).unwrap();
        assert!(channel.calls.is_empty());
    }

    #[test]
    fn explicit_stop() {
        let mut timer = RumbleTimer::default();
        let mut channel = Recorder::default();
        timer.start(&mut channel, Instant::now()).unwrap();
        timer.stop(&mut channel).unwrap();
        assert_eq!(timer.state(), RumbleState::Idle);
        assert_eq!(channel.calls, vec![Call::Play, Call::Stop]);
    }
}
