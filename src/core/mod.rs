pub mod components;
pub mod liquid_config;
pub mod liquid_error;
pub mod liquid_mesh;
pub mod liquid_plugin;
pub mod math;
