use std::f32::consts::TAU;

/// Clamp into [0, 1]. NaN maps to 0.
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Fractional position of `value` between `start` and `end`, clamped to [0, 1].
/// A degenerate range is a step at `start`.
pub fn inverse_lerp(start: f32, end: f32, value: f32) -> f32 {
    let span = end - start;
    if span.abs() <= f32::EPSILON {
        return if value >= start { 1.0 } else { 0.0 };
    }
    clamp_unit((value - start) / span)
}

/// Wrap an angle into [0, 2π)
pub fn wrap_angle(angle: f32) -> f32 {
    angle.rem_euclid(TAU)
}
