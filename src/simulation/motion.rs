//! Velocity and angular velocity from two consecutive transform samples.

use bevy_math::{Quat, Vec3};

/// Below this the relative rotation is treated as no rotation at all; closer
/// to 1 the `sin(angle)` division blows up.
pub const IDENTITY_THRESHOLD: f32 = 1023.5 / 1024.0;

/// Velocity of a container between two samples.
///
/// Points from the current position back toward the previous one, i.e.
/// opposite the displacement: the liquid lags behind the container.
pub fn linear_velocity(last_position: Vec3, position: Vec3, elapsed: f32) -> Vec3 {
    let velocity = (last_position - position) / elapsed;
    if velocity.is_finite() {
        velocity
    } else {
        Vec3::ZERO
    }
}

/// Angular velocity (axis scaled by radians per second) of the rotation taking
/// `previous` to `current` over `elapsed` seconds.
///
/// Returns zero for near-identity rotations and whenever the result would not
/// be finite.
pub fn angular_velocity(previous: Quat, current: Quat, elapsed: f32) -> Vec3 {
    let q = current * previous.conjugate();
    if q.w.abs() > IDENTITY_THRESHOLD {
        return Vec3::ZERO;
    }

    // shorter path: negative w flips the sign of the gain instead of the quaternion
    let gain = if q.w < 0.0 {
        let angle = (-q.w).acos();
        -2.0 * angle / (angle.sin() * elapsed)
    } else {
        let angle = q.w.acos();
        2.0 * angle / (angle.sin() * elapsed)
    };

    let angular = Vec3::new(q.x * gain, q.y * gain, q.z * gain);
    if angular.is_finite() {
        angular
    } else {
        Vec3::ZERO
    }
}
