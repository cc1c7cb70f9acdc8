use std::time::{Duration, Instant};

use codspeed_criterion_compat::{black_box, criterion_group, criterion_main, Criterion};
use padmouse_gamepad::mock::MockDevice;
use padmouse_gamepad::{AbsoluteAxisCode, KeyCode, Session, AXIS_MAX, AXIS_MIN};
use padmoused::app::{Action, Padmouse};
use padmoused::config::Config;

pub fn bench_tick_sticks(c: &mut Criterion) {
    let mut device = MockDevice::new();
    device.set_axis(AbsoluteAxisCode::ABS_X, AXIS_MAX / 2);
    device.set_axis(AbsoluteAxisCode::ABS_Y, AXIS_MIN / 3);
    device.set_axis(AbsoluteAxisCode::ABS_RY, AXIS_MAX);
    let mut session = Session::new(device).unwrap();
    let mut app = Padmouse::new(Config::default());
    let mut now = Instant::now();

    c.bench_function("tick_sticks", |b| {
        b.iter(|| {
            now += Duration::from_millis(5);
            let mut moves = 0usize;
            app.tick(&mut session, now, |action| {
                if let Action::MovePointer { .. } | Action::Wheel(_) = action {
                    moves += 1;
                }
                black_box(action);
                Ok(())
            })
            .unwrap();
            black_box(moves)
        })
    });
}

pub fn bench_tick_buttons(c: &mut Criterion) {
    let mut session = Session::new(MockDevice::new()).unwrap();
    let mut app = Padmouse::new(Config::default());
    let now = Instant::now();

    c.bench_function("tick_buttons_press_release", |b| {
        b.iter(|| {
            let device = session.device_mut();
            device.push_key(KeyCode::BTN_EAST, 1);
            device.push_key(KeyCode::BTN_TR, 1);
            device.push_key(KeyCode::BTN_TR, 0);
            device.push_key(KeyCode::BTN_EAST, 0);
            let mut sink_count = 0usize;
            app.tick(&mut session, now, |action| {
                black_box(action);
                sink_count += 1;
                Ok(())
            })
            .unwrap();
            black_box(sink_count)
        })
    });
}

criterion_group!(benches, bench_tick_sticks, bench_tick_buttons);
criterion_main!(benches);
