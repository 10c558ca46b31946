use bevy::app::{App, Plugin};
use bevy::prelude::*;
use bevy::transform::TransformSystem;

use crate::core::components::LiquidBehavior;
use crate::core::liquid_config::{UpdateMode, WobbleConfig};
use crate::materials::liquid::LiquidMaterialPlugin;
use crate::systems::liquid::{initialize_liquids, reconfigure_liquids, tick_liquids};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct LiquidSystems;

// Everything but rendering: type registration and the per-frame systems.
// Needs `Assets<Mesh>`, `Assets<LiquidMaterial>`, `Time<Virtual>` and `Time<Real>`.
pub struct LiquidSimulationPlugin;

impl Plugin for LiquidSimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            .register_type::<LiquidBehavior>()
            .register_type::<WobbleConfig>()
            .register_type::<UpdateMode>()
            // After propagation so the tick sees this frame's transforms
            .add_systems(PostUpdate, (
                initialize_liquids,
                reconfigure_liquids,
                tick_liquids,
            ).chain().in_set(LiquidSystems).after(TransformSystem::TransformPropagate));
    }
}

pub struct LiquidPlugin;

impl Plugin for LiquidPlugin {
    fn build(&self, app: &mut App) {
        app
            .add_plugins(LiquidMaterialPlugin)
            .add_plugins(LiquidSimulationPlugin);
    }
}
