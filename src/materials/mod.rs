pub mod liquid;
pub mod parameter_sink;
