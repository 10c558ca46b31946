//! Fill plane placement, optionally compensated for container tilt.

use bevy::transform::components::Transform;
use bevy_math::Vec3;

use crate::core::liquid_config::WobbleConfig;
use crate::core::liquid_mesh::LiquidMesh;
use crate::core::math::lerp_vec3;

/// Fixed rate at which the shape compensation follows the tilted container.
pub const SHAPE_COMPENSATION_RATE: f32 = 10.0;

/// Lowest world-space Y among `vertices` under `transform`.
///
/// Scans in the mesh's native order; the first vertex reaching the minimum
/// wins. An empty vertex list reports `0.0`.
pub fn lowest_point(transform: &Transform, vertices: &[Vec3]) -> f32 {
    let mut lowest_y = f32::MAX;
    let mut lowest_vertex = Vec3::ZERO;
    for vertex in vertices {
        let position = transform.transform_point(*vertex);
        if position.y < lowest_y {
            lowest_y = position.y;
            lowest_vertex = position;
        }
    }
    lowest_vertex.y
}

/// Offset of the liquid surface from the container origin.
///
/// With shape compensation enabled, `shape_compensation` is eased toward the
/// distance between the world bound center and the lowest vertex, or set to it
/// outright on a paused tick (`elapsed == 0`).
pub fn fill_offset(
    config: &WobbleConfig,
    transform: &Transform,
    mesh: &LiquidMesh,
    elapsed: f32,
    shape_compensation: &mut Vec3,
) -> Vec3 {
    let world_center = transform.transform_point(mesh.bounds_center);
    let position = transform.translation;

    if !config.compensates_shape() {
        return world_center - position - Vec3::new(0.0, config.fill_amount, 0.0);
    }

    let raw = world_center - Vec3::new(0.0, lowest_point(transform, &mesh.vertices), 0.0);
    *shape_compensation = if elapsed != 0.0 {
        lerp_vec3(*shape_compensation, raw, elapsed * SHAPE_COMPENSATION_RATE)
    } else {
        raw
    };

    world_center
        - position
        - Vec3::new(
            0.0,
            config.fill_amount - shape_compensation.y * config.compensate_shape_amount,
            0.0,
        )
}
