use std::collections::BTreeMap;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::core::liquid_config::WobbleConfig;
use crate::core::liquid_error::ConfigError;

// Named wobble configurations, stored as a RON map of name -> config.
// Fields left out of an entry take their defaults.
#[derive(Serialize, Deserialize, Resource, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct LiquidPresets {
    presets: BTreeMap<String, WobbleConfig>,
}

impl LiquidPresets {
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let presets: LiquidPresets = ron::from_str(text)?;
        for (name, config) in presets.presets.iter() {
            config
                .validate()
                .map_err(|error| ConfigError::Invalid(name.clone(), error))?;
        }
        Ok(presets)
    }

    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    pub fn get(&self, name: &str) -> Result<WobbleConfig, ConfigError> {
        self.presets
            .get(name)
            .copied()
            .ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))
    }

    pub fn insert(&mut self, name: impl Into<String>, config: WobbleConfig) {
        self.presets.insert(name.into(), config);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }
}
