//! Liquid wobble: a per-frame "liquid in a container" effect for Bevy.
//!
//! Each tick the container's transform history is turned into a decaying
//! wobble on two surface axes plus a fill-plane offset, and the three values
//! are written into the container's material.
//!
//! The simulation itself lives in [`simulation`] and only needs a transform,
//! the elapsed time and the mesh's vertices; [`core::liquid_plugin::LiquidPlugin`]
//! drives it from the ECS.

pub mod core;
pub mod materials;
pub mod serialization;
pub mod simulation;
pub mod systems;

pub use crate::core::components::{LiquidBehavior, LiquidInitFailed, LiquidMeshPending, LiquidSimulation};
pub use crate::core::liquid_config::{UpdateMode, WobbleConfig};
pub use crate::core::liquid_error::{ConfigError, InitError};
pub use crate::core::liquid_mesh::LiquidMesh;
pub use crate::core::liquid_plugin::{LiquidPlugin, LiquidSimulationPlugin, LiquidSystems};
pub use crate::materials::liquid::{make_liquid_material, LiquidExt, LiquidMaterial, LiquidParams};
pub use crate::materials::parameter_sink::ParameterSink;
pub use crate::serialization::liquid_presets::LiquidPresets;
pub use crate::simulation::simulator::{tick, SimulatorState, TickInput, TickOutput, WobbleSimulator};
