use padmouse_control::WheelDirection;

/// Milliseconds between wheel clicks for a stick deflection `v` in `[-1, 1]`.
///
/// Full tilt gives `max_ms`; the interval grows quadratically towards
/// `min_ms + max_ms` as the stick returns to center.
#[inline]
pub fn scroll_interval(v: f32, min_ms: f32, max_ms: f32) -> f32 {
    let d = v.abs() - 1.0;
    min_ms * d * d + max_ms
}

/// Stick component driving a wheel direction, if the sign matches.
#[inline]
pub(crate) fn direction_value(direction: WheelDirection, x: f32, y: f32) -> Option<f32> {
    let (v, active) = match direction {
        WheelDirection::Up => (y, y < 0.0),
        WheelDirection::Down => (y, y > 0.0),
        WheelDirection::Left => (x, x < 0.0),
        WheelDirection::Right => (x, x > 0.0),
    };
    active.then_some(v)
}

#[inline]
pub(crate) const fn direction_index(direction: WheelDirection) -> usize {
    match direction {
        WheelDirection::Up => 0,
        WheelDirection::Down => 1,
        WheelDirection::Left => 2,
        WheelDirection::Right => 3,
    }
}
