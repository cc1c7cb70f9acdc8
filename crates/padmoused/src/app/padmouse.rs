use std::time::Instant;

use smallvec::SmallVec;

use padmouse_control::{KeySequence, MouseButton, WheelDirection};
use padmouse_gamepad::{ButtonPhase, ButtonTransition, Device, LogicalButton, Session, StickAxis};

use crate::config::{Binding, Config};
use crate::{print_debug, print_info, Error};

use super::scroll::{direction_index, direction_value, scroll_interval};

/// Desktop input produced by the control loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    PointerDown(MouseButton),
    PointerUp(MouseButton),
    MovePointer { dx: i32, dy: i32 },
    KeyDown(KeySequence),
    KeyUp(KeySequence),
    Wheel(WheelDirection),
}

/// Control loop state: turns decoded controller input into [`Action`]s.
pub struct Padmouse {
    config: Config,
    speed: f32,
    pointer: (f32, f32),
    last_scroll: [Option<Instant>; 4],
    last_tick: Option<Instant>,
    held: SmallVec<[LogicalButton; 8]>,
    transitions: Vec<ButtonTransition>,
}

impl Padmouse {
    pub fn new(config: Config) -> Self {
        Self {
            speed: config.default_speed,
            config,
            pointer: (0.0, 0.0),
            last_scroll: [None; 4],
            last_tick: None,
            held: SmallVec::new(),
            transitions: Vec::with_capacity(16),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current pointer speed multiplier.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Buttons whose down action was forwarded and not yet released.
    pub fn held(&self) -> &[LogicalButton] {
        &self.held
    }

    /// Run one iteration of the control loop.
    ///
    /// Every action is handed to `sink`; the first error it returns ends the
    /// tick and is propagated.
    pub fn tick<D, F>(&mut self, session: &mut Session<D>, now: Instant, mut sink: F) -> Result<(), Error>
    where
        D: Device,
        F: FnMut(Action) -> Result<(), Error>,
    {
        let elapsed_ms = self
            .last_tick
            .map(|last| now.saturating_duration_since(last).as_micros() as f32 / 1000.0)
            .unwrap_or(0.0);
        self.last_tick = Some(now);

        let mut transitions = std::mem::take(&mut self.transitions);
        transitions.clear();
        let updated = session.update(now, &mut transitions);
        let handled = updated.map_err(Error::from).and_then(|_| {
            transitions
                .iter()
                .try_for_each(|transition| self.on_transition(session, now, *transition, &mut sink))
        });
        self.transitions = transitions;
        handled?;

        if session.grabbed() {
            self.move_pointer(session, elapsed_ms, &mut sink)?;
            self.scroll(session, now, &mut sink)?;
        }
        Ok(())
    }

    /// Release every forwarded-but-unreleased action and reset the pointer
    /// state.
    pub fn release_all<F>(&mut self, mut sink: F) -> Result<(), Error>
    where
        F: FnMut(Action) -> Result<(), Error>,
    {
        self.speed = self.config.default_speed;
        self.pointer = (0.0, 0.0);
        self.last_scroll = [None; 4];
        while let Some(button) = self.held.pop() {
            if let Some(action) = self.up_action(button) {
                sink(action)?;
            }
        }
        Ok(())
    }

    fn on_transition<D, F>(
        &mut self,
        session: &mut Session<D>,
        now: Instant,
        transition: ButtonTransition,
        sink: &mut F,
    ) -> Result<(), Error>
    where
        D: Device,
        F: FnMut(Action) -> Result<(), Error>,
    {
        let ButtonTransition { button, phase } = transition;

        if button == self.config.grab_toggle {
            if phase == ButtonPhase::Pressed {
                let grabbed = session.toggle_grab()?;
                session.rumble(now)?;
                if grabbed {
                    print_info!("controller grabbed");
                } else {
                    print_info!("controller released");
                    self.release_all(&mut *sink)?;
                }
            }
            return Ok(());
        }

        if !session.grabbed() {
            return Ok(());
        }

        if button == self.config.speed_modifier {
            self.speed = match phase {
                ButtonPhase::Pressed => self.config.precision_speed,
                ButtonPhase::Released => self.config.default_speed,
            };
            print_debug!("set pointer speed to {}", self.speed);
            return Ok(());
        }

        match phase {
            ButtonPhase::Pressed => {
                if self.held.contains(&button) {
                    return Ok(());
                }
                let action = match self.config.bindings.get(&button) {
                    Some(Binding::Mouse(mouse)) => Action::PointerDown(*mouse),
                    Some(Binding::Keys(keys)) => Action::KeyDown(keys.clone()),
                    None => return Ok(()),
                };
                self.held.push(button);
                sink(action)
            }
            ButtonPhase::Released => {
                let Some(index) = self.held.iter().position(|held| *held == button) else {
                    return Ok(());
                };
                self.held.remove(index);
                match self.up_action(button) {
                    Some(action) => sink(action),
                    None => Ok(()),
                }
            }
        }
    }

    fn up_action(&self, button: LogicalButton) -> Option<Action> {
        match self.config.bindings.get(&button)? {
            Binding::Mouse(mouse) => Some(Action::PointerUp(*mouse)),
            Binding::Keys(keys) => Some(Action::KeyUp(keys.clone())),
        }
    }

    fn move_pointer<D, F>(&mut self, session: &Session<D>, elapsed_ms: f32, sink: &mut F) -> Result<(), Error>
    where
        D: Device,
        F: FnMut(Action) -> Result<(), Error>,
    {
        let (x, y) = session.stick(StickAxis::Left);
        self.pointer.0 += x * self.speed * elapsed_ms;
        self.pointer.1 += y * self.speed * elapsed_ms;

        let dx = self.pointer.0 as i32;
        let dy = self.pointer.1 as i32;
        if dx == 0 && dy == 0 {
            return Ok(());
        }
        self.pointer.0 -= dx as f32;
        self.pointer.1 -= dy as f32;
        sink(Action::MovePointer { dx, dy })
    }

    fn scroll<D, F>(&mut self, session: &Session<D>, now: Instant, sink: &mut F) -> Result<(), Error>
    where
        D: Device,
        F: FnMut(Action) -> Result<(), Error>,
    {
        let (x, y) = session.stick(StickAxis::Right);
        for direction in WheelDirection::ALL {
            let Some(v) = direction_value(direction, x, y) else {
                continue;
            };
            let slot = &mut self.last_scroll[direction_index(direction)];
            if let Some(last) = *slot {
                let since_ms = now.saturating_duration_since(last).as_micros() as f32 / 1000.0;
                let interval = scroll_interval(
                    v,
                    self.config.scroll_min_speed_ms,
                    self.config.scroll_max_speed_ms,
                );
                if since_ms < interval {
                    continue;
                }
            }
            *slot = Some(now);
            sink(Action::Wheel(direction))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use padmouse_gamepad::mock::{MockCall, MockDevice};
    use padmouse_gamepad::{AbsoluteAxisCode, KeyCode, RawEvent, AXIS_MAX, AXIS_MIN};

    use super::*;

    fn start(device: MockDevice) -> (Padmouse, Session<MockDevice>) {
        let session = Session::new(device).unwrap();
        (Padmouse::new(Config::default()), session)
    }

    fn tick(app: &mut Padmouse, session: &mut Session<MockDevice>, now: Instant) -> Vec<Action> {
        let mut actions = Vec::new();
        app.tick(session, now, |action| {
            actions.push(action);
            Ok(())
        })
        .unwrap();
        actions
    }

    #[test]
    fn grab_toggle_while_released_grabs_and_rumbles() {
        let (mut app, mut session) = start(MockDevice::new());
        let t0 = Instant::now();

        session.device_mut().push_key(KeyCode::BTN_MODE, 1);
        session.device_mut().push_key(KeyCode::BTN_MODE, 0);
        assert!(tick(&mut app, &mut session, t0).is_empty());
        assert!(!session.grabbed());

        session.device_mut().push_key(KeyCode::BTN_MODE, 1);
        assert!(tick(&mut app, &mut session, t0 + Duration::from_secs(1)).is_empty());
        assert!(session.grabbed());

        let calls = session.device().calls();
        assert_eq!(
            calls,
            vec![
                MockCall::Grab(true),
                MockCall::Grab(false),
                MockCall::RumblePlay,
                MockCall::RumbleStop,
                MockCall::Grab(true),
                MockCall::RumblePlay,
            ]
        );
    }

    #[test]
    fn precision_speed_is_restored_exactly() {
        let (mut app, mut session) = start(MockDevice::new());
        let t0 = Instant::now();

        session.device_mut().push_key(KeyCode::BTN_TL, 1);
        assert!(tick(&mut app, &mut session, t0).is_empty());
        assert_eq!(app.speed(), 0.3);

        session.device_mut().push_key(KeyCode::BTN_TL, 0);
        assert!(tick(&mut app, &mut session, t0).is_empty());
        assert_eq!(app.speed(), 1.7);
    }

    #[test]
    fn left_stick_full_tilt_for_one_second() {
        let mut device = MockDevice::new();
        device.set_axis(AbsoluteAxisCode::ABS_X, AXIS_MAX);
        let (mut app, mut session) = start(device);
        let t0 = Instant::now();

        let mut total = (0, 0);
        for step in 0..=200 {
            let now = t0 + Duration::from_millis(5 * step);
            for action in tick(&mut app, &mut session, now) {
                if let Action::MovePointer { dx, dy } = action {
                    total.0 += dx;
                    total.1 += dy;
                }
            }
        }
        assert_eq!(total, (1700, 0));
    }

    #[test]
    fn first_tick_does_not_move() {
        let mut device = MockDevice::new();
        device.set_axis(AbsoluteAxisCode::ABS_X, AXIS_MAX);
        let (mut app, mut session) = start(device);
        assert!(tick(&mut app, &mut session, Instant::now()).is_empty());
    }

    #[test]
    fn buttons_forward_bound_actions() {
        let (mut app, mut session) = start(MockDevice::new());
        let t0 = Instant::now();

        session.device_mut().push_key(KeyCode::BTN_EAST, 1);
        session.device_mut().push_key(KeyCode::BTN_SOUTH, 1);
        session.device_mut().push_key(KeyCode::BTN_SOUTH, 0);
        session.device_mut().push_key(KeyCode::BTN_EAST, 0);
        let escape: KeySequence = "Escape".parse().unwrap();
        assert_eq!(
            tick(&mut app, &mut session, t0),
            vec![
                Action::PointerDown(MouseButton::Left),
                Action::KeyDown(escape.clone()),
                Action::KeyUp(escape),
                Action::PointerUp(MouseButton::Left),
            ]
        );
        assert!(app.held().is_empty());
    }

    #[test]
    fn unbound_buttons_are_ignored() {
        let (mut app, mut session) = start(MockDevice::new());
        session.device_mut().push_abs(AbsoluteAxisCode::ABS_HAT0Y, 1);
        session.device_mut().push_abs(AbsoluteAxisCode::ABS_HAT0Y, 0);
        assert!(tick(&mut app, &mut session, Instant::now()).is_empty());
    }

    #[test]
    fn ungrab_releases_held_actions() {
        let (mut app, mut session) = start(MockDevice::new());
        let t0 = Instant::now();

        session.device_mut().push_key(KeyCode::BTN_EAST, 1);
        session.device_mut().push_key(KeyCode::BTN_TR, 1);
        session.device_mut().push_key(KeyCode::BTN_TL, 1);
        tick(&mut app, &mut session, t0);
        assert_eq!(app.held().len(), 2);
        assert_eq!(app.speed(), 0.3);

        session.device_mut().push_key(KeyCode::BTN_MODE, 1);
        let super_q: KeySequence = "Super+q".parse().unwrap();
        assert_eq!(
            tick(&mut app, &mut session, t0),
            vec![
                Action::KeyUp(super_q),
                Action::PointerUp(MouseButton::Left),
            ]
        );
        assert!(app.held().is_empty());
        assert_eq!(app.speed(), 1.7);

        session.device_mut().push_key(KeyCode::BTN_EAST, 0);
        session.device_mut().push_key(KeyCode::BTN_TR, 0);
        session.device_mut().push_key(KeyCode::BTN_WEST, 1);
        assert!(tick(&mut app, &mut session, t0).is_empty());
    }

    #[test]
    fn release_without_forwarded_press_is_dropped() {
        let (mut app, mut session) = start(MockDevice::new());
        session.device_mut().push_key(KeyCode::BTN_EAST, 0);
        assert!(tick(&mut app, &mut session, Instant::now()).is_empty());
    }

    #[test]
    fn ungrabbed_sticks_do_nothing() {
        let mut device = MockDevice::new();
        device.set_axis(AbsoluteAxisCode::ABS_X, AXIS_MAX);
        device.set_axis(AbsoluteAxisCode::ABS_RY, AXIS_MIN);
        device.push_key(KeyCode::BTN_MODE, 1);
        let (mut app, mut session) = start(device);
        let t0 = Instant::now();

        for step in 0..10 {
            let now = t0 + Duration::from_millis(5 * step);
            assert!(tick(&mut app, &mut session, now).is_empty());
        }
    }

    #[test]
    fn scroll_cadence_follows_deflection() {
        let mut device = MockDevice::new();
        device.set_axis(AbsoluteAxisCode::ABS_RY, AXIS_MIN);
        let (mut app, mut session) = start(device);
        let t0 = Instant::now();

        let mut clicks = Vec::new();
        for step in 0..=12 {
            let now = t0 + Duration::from_millis(5 * step);
            if tick(&mut app, &mut session, now).contains(&Action::Wheel(WheelDirection::Up)) {
                clicks.push(step * 5);
            }
        }
        assert_eq!(clicks, vec![0, 30, 60]);
    }

    #[test]
    fn centered_right_stick_does_not_scroll() {
        let (mut app, mut session) = start(MockDevice::new());
        let t0 = Instant::now();
        for step in 0..100 {
            let now = t0 + Duration::from_millis(5 * step);
            assert!(tick(&mut app, &mut session, now).is_empty());
        }
    }

    #[test]
    fn sink_errors_end_the_tick() {
        let (mut app, mut session) = start(MockDevice::new());
        session.device_mut().push_key(KeyCode::BTN_EAST, 1);
        let result = app.tick(&mut session, Instant::now(), |_| {
            Err(Error::Actuation(enigo::InputError::Simulate("scripted")))
        });
        assert!(matches!(result, Err(Error::Actuation(_))));
    }

    #[test]
    fn device_errors_are_fatal() {
        let (mut app, mut session) = start(MockDevice::new());
        session.device_mut().push_read_error();
        let result = app.tick(&mut session, Instant::now(), |_| Ok(()));
        assert!(matches!(result, Err(Error::Device(_))));
    }

    #[test]
    fn grab_failure_on_toggle_is_fatal() {
        let (mut app, mut session) = start(MockDevice::new());
        session.device_mut().fail_grab(true);
        session.device_mut().push_key(KeyCode::BTN_MODE, 1);
        let result = app.tick(&mut session, Instant::now(), |_| Ok(()));
        assert!(matches!(
            result,
            Err(Error::Device(padmouse_gamepad::Error::Grab(_)))
        ));
        assert!(session.grabbed());
    }

    #[test]
    fn rumble_failure_on_toggle_is_fatal() {
        let (mut app, mut session) = start(MockDevice::new());
        session.device_mut().fail_rumble(true);
        session.device_mut().push_key(KeyCode::BTN_MODE, 1);
        let result = app.tick(&mut session, Instant::now(), |_| Ok(()));
        assert!(matches!(
            result,
            Err(Error::Device(padmouse_gamepad::Error::Rumble(_)))
        ));
    }

    #[test]
    fn replay_after_drop_forwards_missed_transitions() {
        let (mut app, mut session) = start(MockDevice::new());
        let t0 = Instant::now();

        session.device_mut().push_key(KeyCode::BTN_EAST, 1);
        assert_eq!(
            tick(&mut app, &mut session, t0),
            vec![Action::PointerDown(MouseButton::Left)]
        );

        session.device_mut().push_drop([
            RawEvent::Key {
                code: KeyCode::BTN_EAST,
                value: 0,
            },
            RawEvent::Key {
                code: KeyCode::BTN_SOUTH,
                value: 1,
            },
        ]);
        let escape: KeySequence = "Escape".parse().unwrap();
        assert_eq!(
            tick(&mut app, &mut session, t0),
            vec![
                Action::PointerUp(MouseButton::Left),
                Action::KeyDown(escape.clone()),
            ]
        );
        assert_eq!(app.held().len(), 1);

        session.device_mut().push_key(KeyCode::BTN_SOUTH, 0);
        assert_eq!(
            tick(&mut app, &mut session, t0),
            vec![Action::KeyUp(escape)]
        );
        assert!(app.held().is_empty());
    }
}
