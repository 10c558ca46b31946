use bevy::prelude::*;

use crate::core::components::{LiquidBehavior, LiquidInitFailed, LiquidMeshPending, LiquidSimulation};
use crate::core::liquid_config::UpdateMode;
use crate::core::liquid_error::InitError;
use crate::core::liquid_mesh::LiquidMesh;
use crate::materials::liquid::LiquidMaterial;
use crate::simulation::simulator::{TickInput, WobbleSimulator};

// Uninitialized -> Running. Entities keep retrying every frame, so adding the
// missing mesh or material later brings them up without further action.
pub fn initialize_liquids(
    mut commands: Commands,
    meshes: Res<Assets<Mesh>>,
    materials: Res<Assets<LiquidMaterial>>,
    pending: Query<
        (
            Entity,
            &LiquidBehavior,
            Option<&Handle<Mesh>>,
            Option<&Handle<LiquidMaterial>>,
            Option<&LiquidInitFailed>,
        ),
        Without<LiquidSimulation>,
    >,
) {
    for (entity, behavior, own_mesh, material, failed) in pending.iter() {
        let result = match resolve(behavior, own_mesh, material, &meshes, &materials) {
            // assets still loading
            Ok(None) => continue,
            Ok(Some(mesh)) => WobbleSimulator::initialize(behavior.config, Some(mesh)),
            Err(error) => Err(error),
        };

        match result {
            Ok(simulator) => {
                debug!("[Liquid] {:?} initialized with {} vertices", entity, simulator.mesh().vertices.len());
                let mut entity_commands = commands.entity(entity);
                entity_commands.insert(LiquidSimulation(simulator));
                if failed.is_some() {
                    entity_commands.remove::<LiquidInitFailed>();
                }
            }
            Err(error) => {
                if failed.map(|f| &f.0) != Some(&error) {
                    warn!("[Liquid] {:?} cannot start: {}", entity, error);
                    commands.entity(entity).insert(LiquidInitFailed(error));
                }
            }
        }
    }
}

fn resolve(
    behavior: &LiquidBehavior,
    own_mesh: Option<&Handle<Mesh>>,
    material: Option<&Handle<LiquidMaterial>>,
    meshes: &Assets<Mesh>,
    materials: &Assets<LiquidMaterial>,
) -> Result<Option<LiquidMesh>, InitError> {
    let mesh_handle = behavior.resolve_mesh(own_mesh).ok_or(InitError::MissingMesh)?;
    let material_handle = material.ok_or(InitError::MissingMaterial)?;
    behavior.config.validate()?;

    if !materials.contains(material_handle) {
        return Ok(None);
    }
    match meshes.get(mesh_handle) {
        Some(mesh) => LiquidMesh::from_mesh(mesh).map(Some),
        None => Ok(None),
    }
}

// Picks up edits to the behavior or a swapped mesh without resetting the wobble.
// A swapped mesh that is still loading is retried every frame until it arrives.
pub fn reconfigure_liquids(
    mut commands: Commands,
    meshes: Res<Assets<Mesh>>,
    mut edited: Query<
        (
            Entity,
            Ref<LiquidBehavior>,
            Option<&Handle<Mesh>>,
            Option<&LiquidMeshPending>,
            &mut LiquidSimulation,
        ),
        Or<(Changed<LiquidBehavior>, Changed<Handle<Mesh>>, With<LiquidMeshPending>)>,
    >,
) {
    for (entity, behavior, own_mesh, pending, mut simulation) in edited.iter_mut() {
        if behavior.is_changed() {
            if let Err(error) = simulation.0.reconfigure(behavior.config) {
                warn!("[Liquid] {:?} keeps its previous configuration: {}", entity, error);
            }
        }

        let Some(handle) = behavior.resolve_mesh(own_mesh) else {
            if pending.is_some() {
                commands.entity(entity).remove::<LiquidMeshPending>();
            }
            continue;
        };
        let Some(mesh) = meshes.get(handle) else {
            if pending.map(|p| &p.0) != Some(handle) {
                debug!("[Liquid] {:?} waiting for its new mesh to load", entity);
                commands.entity(entity).insert(LiquidMeshPending(handle.clone()));
            }
            continue;
        };
        if pending.is_some() {
            commands.entity(entity).remove::<LiquidMeshPending>();
        }
        match LiquidMesh::from_mesh(mesh) {
            Ok(mesh) => {
                if &mesh != simulation.0.mesh() {
                    simulation.0.set_mesh(mesh);
                }
            }
            Err(error) => warn!("[Liquid] {:?} keeps its previous mesh: {}", entity, error),
        }
    }
}

pub fn tick_liquids(
    mut commands: Commands,
    virtual_time: Res<Time<Virtual>>,
    real_time: Res<Time<Real>>,
    mut materials: ResMut<Assets<LiquidMaterial>>,
    mut liquids: Query<(Entity, &GlobalTransform, Option<&Handle<LiquidMaterial>>, &mut LiquidSimulation)>,
) {
    for (entity, global_transform, material, mut simulation) in liquids.iter_mut() {
        let material = match material {
            Some(handle) => materials.get_mut(handle),
            None => None,
        };
        let Some(material) = material else {
            error!("[Liquid] {:?} lost its material; waiting for a new one", entity);
            commands.entity(entity).remove::<LiquidSimulation>();
            continue;
        };

        let elapsed = match simulation.0.config().update_mode {
            UpdateMode::Normal => virtual_time.delta_seconds(),
            UpdateMode::UnscaledTime => real_time.delta_seconds(),
        };
        let transform = global_transform.compute_transform();
        simulation.0.tick_into(TickInput::new(elapsed, transform), material);
        material.extension.set_origin(transform.translation);
    }
}
