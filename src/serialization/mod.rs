pub mod liquid_presets;
