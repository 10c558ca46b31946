use bevy::prelude::Reflect;
use serde::{Deserialize, Serialize};

use crate::core::liquid_error::InitError;

/// Which clock feeds the per-frame elapsed time.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub enum UpdateMode {
    /// Scaled game time; pausing the virtual clock pauses the wobble
    #[default]
    Normal,
    /// Wall-clock time, unaffected by time scaling or pausing
    UnscaledTime,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Reflect)]
#[serde(default)]
pub struct WobbleConfig {
    pub update_mode: UpdateMode,
    pub max_wobble: f32,          // clamp bound for the per-tick drive and the driving amplitude
    pub wobble_speed: f32,        // oscillation frequency in Hz
    pub fill_amount: f32,         // fill level below the bound center, in local units
    pub recovery_rate: f32,       // decay rate of the driving amplitude toward zero
    pub thickness_floor: f32,     // minimum rate at which the phase signal tracks the sine
    pub compensate_shape_amount: f32, // 0 = plain fill plane, 1 = fully compensated for tilt
}

impl Default for WobbleConfig {
    fn default() -> Self {
        WobbleConfig {
            update_mode: UpdateMode::Normal,
            max_wobble: 0.03,
            wobble_speed: 1.0,
            fill_amount: 0.5,
            recovery_rate: 1.0,
            thickness_floor: 1.0,
            compensate_shape_amount: 0.0,
        }
    }
}

impl WobbleConfig {
    pub fn validate(&self) -> Result<(), InitError> {
        let fields = [
            ("max_wobble", self.max_wobble),
            ("wobble_speed", self.wobble_speed),
            ("fill_amount", self.fill_amount),
            ("recovery_rate", self.recovery_rate),
            ("thickness_floor", self.thickness_floor),
            ("compensate_shape_amount", self.compensate_shape_amount),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(InitError::InvalidConfig(format!("{} must be finite, got {}", name, value)));
        }
        if self.max_wobble < 0.0 {
            return Err(InitError::InvalidConfig(format!(
                "max_wobble must not be negative, got {}",
                self.max_wobble
            )));
        }
        if !(0.0..=1.0).contains(&self.compensate_shape_amount) {
            return Err(InitError::InvalidConfig(format!(
                "compensate_shape_amount must be within [0, 1], got {}",
                self.compensate_shape_amount
            )));
        }
        Ok(())
    }

    pub fn compensates_shape(&self) -> bool {
        self.compensate_shape_amount > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WobbleConfig::default();
        assert_eq!(config.update_mode, UpdateMode::Normal);
        assert_eq!(config.max_wobble, 0.03);
        assert_eq!(config.wobble_speed, 1.0);
        assert_eq!(config.fill_amount, 0.5);
        assert_eq!(config.recovery_rate, 1.0);
        assert_eq!(config.thickness_floor, 1.0);
        assert_eq!(config.compensate_shape_amount, 0.0);
        assert!(config.validate().is_ok());
        assert!(!config.compensates_shape());
    }

    #[test]
    fn test_rejects_out_of_range_compensation() {
        let config = WobbleConfig {
            compensate_shape_amount: 1.5,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(InitError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_negative_max_wobble_and_nan() {
        let negative = WobbleConfig {
            max_wobble: -0.1,
            ..Default::default()
        };
        assert!(negative.validate().is_err());

        let nan = WobbleConfig {
            wobble_speed: f32::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let config: WobbleConfig = ron::from_str("(max_wobble: 0.05, update_mode: UnscaledTime)").unwrap();
        assert_eq!(config.max_wobble, 0.05);
        assert_eq!(config.update_mode, UpdateMode::UnscaledTime);
        assert_eq!(config.fill_amount, 0.5);
    }
}
