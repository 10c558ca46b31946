//! Decaying, sine-driven wobble on the X and Z surface axes.

use std::f32::consts::PI;

use bevy_math::Vec3;

use crate::core::liquid_config::WobbleConfig;
use crate::core::math::{clamp, lerp};

/// Hard cap on the rate at which the phase signal follows the raw sine.
pub const MAX_PHASE_TRACKING_RATE: f32 = 10.0;

/// Share of vertical velocity that feeds both wobble axes.
pub const VERTICAL_DRIVE_FACTOR: f32 = 0.2;

/// Phase offset of the simulated clock at activation.
pub const INITIAL_SIMULATED_TIME: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    /// Output amplitudes sent to the shader
    pub amplitude_x: f32,
    pub amplitude_z: f32,
    /// Driving amplitudes; decay toward zero and stay within `[-max_wobble, max_wobble]`
    pub amplitude_to_add_x: f32,
    pub amplitude_to_add_z: f32,
    /// Smoothed sine in [-1, 1]
    pub phase_signal: f32,
    pub simulated_time: f32,
}

impl Default for Oscillator {
    fn default() -> Self {
        Oscillator {
            amplitude_x: 0.0,
            amplitude_z: 0.0,
            amplitude_to_add_x: 0.0,
            amplitude_to_add_z: 0.0,
            phase_signal: 0.0,
            simulated_time: INITIAL_SIMULATED_TIME,
        }
    }
}

impl Oscillator {
    /// Decays the drive, advances the phase and recomputes the output
    /// amplitudes. `motion` is the velocity magnitude plus the angular velocity
    /// magnitude the phase signal tracks with.
    ///
    /// Must only be called with `elapsed > 0`; a paused tick leaves the
    /// oscillator untouched.
    pub fn advance(&mut self, config: &WobbleConfig, elapsed: f32, motion: f32) {
        self.amplitude_to_add_x = lerp(self.amplitude_to_add_x, 0.0, elapsed * config.recovery_rate);
        self.amplitude_to_add_z = lerp(self.amplitude_to_add_z, 0.0, elapsed * config.recovery_rate);

        self.simulated_time += elapsed;
        let angular_frequency = 2.0 * PI * config.wobble_speed;
        let tracking_rate = clamp(motion, config.thickness_floor, MAX_PHASE_TRACKING_RATE);
        self.phase_signal = lerp(
            self.phase_signal,
            (angular_frequency * self.simulated_time).sin(),
            elapsed * tracking_rate,
        );

        self.amplitude_x = self.amplitude_to_add_x * self.phase_signal;
        self.amplitude_z = self.amplitude_to_add_z * self.phase_signal;
    }

    /// Feeds this tick's motion into the driving amplitudes.
    pub fn drive(&mut self, config: &WobbleConfig, velocity: Vec3, angular_velocity: Vec3) {
        let max = config.max_wobble;
        let push_x = velocity.x + velocity.y * VERTICAL_DRIVE_FACTOR + angular_velocity.z + angular_velocity.y;
        let push_z = velocity.z + velocity.y * VERTICAL_DRIVE_FACTOR + angular_velocity.x + angular_velocity.y;

        self.amplitude_to_add_x = clamp(self.amplitude_to_add_x + push_x * max, -max, max);
        self.amplitude_to_add_z = clamp(self.amplitude_to_add_z + push_z * max, -max, max);
    }
}
