use bevy_math::Vec3;

// Interpolation factors are clamped into [0, 1], so a large `elapsed * rate`
// snaps to the target instead of overshooting it.
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t.clamp(0.0, 1.0)
}

pub fn lerp_vec3(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    from + (to - from) * t.clamp(0.0, 1.0)
}

/// Clamp that tolerates `min > max`: below `min` gives `min`, otherwise the
/// value is capped at `max`.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
