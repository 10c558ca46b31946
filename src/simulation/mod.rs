pub mod fill;
pub mod motion;
pub mod oscillator;
pub mod simulator;
