use bevy::prelude::*;

use crate::core::liquid_config::WobbleConfig;
use crate::core::liquid_error::InitError;
use crate::simulation::simulator::WobbleSimulator;

// Marks an entity as a liquid container. The entity also needs a
// `Handle<LiquidMaterial>` and either its own `Handle<Mesh>` or `mesh` set here.
#[derive(Component, Clone, Debug, Default, Reflect)]
#[reflect(Component)]
pub struct LiquidBehavior {
    pub config: WobbleConfig,
    // Overrides the entity's own mesh when set
    pub mesh: Option<Handle<Mesh>>,
}

impl LiquidBehavior {
    pub fn new(config: WobbleConfig) -> Self {
        LiquidBehavior { config, mesh: None }
    }

    pub fn with_mesh(mut self, mesh: Handle<Mesh>) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn resolve_mesh<'a>(&'a self, own: Option<&'a Handle<Mesh>>) -> Option<&'a Handle<Mesh>> {
        self.mesh.as_ref().or(own)
    }
}

// Present once the liquid has all its dependencies and is ticking.
#[derive(Component, Debug, Clone)]
pub struct LiquidSimulation(pub WobbleSimulator);

// Last initialization failure, kept so it is only reported once.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct LiquidInitFailed(pub InitError);

// A mesh edit pointed at an asset that has not loaded yet; the previous mesh
// stays cached until it arrives.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct LiquidMeshPending(pub Handle<Mesh>);
