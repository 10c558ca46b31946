pub mod liquid;
