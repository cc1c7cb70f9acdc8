/// Lowest raw value reported by a stick channel.
pub const AXIS_MIN: i32 = -32768;
/// Highest raw value reported by a stick channel.
pub const AXIS_MAX: i32 = 32767;
/// Band around center and around both endpoints that snaps to an exact value.
pub const AXIS_ROUND: f32 = 0.01;

/// Map a raw stick sample onto `[-1.0, 1.0]`.
///
/// Values within [`AXIS_ROUND`] of center come back as exactly `0.0` and
/// values within [`AXIS_ROUND`] of either end come back as exactly `±1.0`,
/// so callers can compare against those constants directly.
pub fn normalize(raw: i32) -> f32 {
    let raw = raw.clamp(AXIS_MIN, AXIS_MAX);
    let span = (AXIS_MAX - AXIS_MIN) as f32;
    let value = 2.0 * (raw - AXIS_MIN) as f32 / span - 1.0;

    if value.abs() < AXIS_ROUND {
        0.0
    } else if value > 1.0 - AXIS_ROUND {
        1.0
    } else if value < -1.0 + AXIS_ROUND {
        -1.0
    } else {
        value
    }
}
