use std::sync::Arc;

use bevy::render::mesh::Mesh;
use bevy_math::Vec3;

use crate::core::liquid_error::InitError;

/// Mesh data the simulation reads every tick: the local-space bound center and
/// the vertex positions in the mesh's native order.
///
/// Vertices are shared, so cloning a `LiquidMesh` (or re-caching it after an
/// edit) never copies the vertex buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct LiquidMesh {
    pub bounds_center: Vec3,
    pub vertices: Arc<[Vec3]>,
}

impl LiquidMesh {
    pub fn new(bounds_center: Vec3, vertices: impl Into<Arc<[Vec3]>>) -> Self {
        LiquidMesh {
            bounds_center,
            vertices: vertices.into(),
        }
    }

    /// Builds the bound center from the axis-aligned box enclosing `vertices`.
    pub fn from_vertices(vertices: Vec<Vec3>) -> Self {
        let bounds_center = bounds_center(&vertices);
        LiquidMesh::new(bounds_center, vertices)
    }

    /// Reads positions out of a Bevy mesh. The mesh must still be available in
    /// the main world (its `RenderAssetUsages` must include `MAIN_WORLD`).
    pub fn from_mesh(mesh: &Mesh) -> Result<Self, InitError> {
        let positions = mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|values| values.as_float3())
            .ok_or(InitError::MeshHasNoPositions)?;
        let vertices = positions.iter().map(|p| Vec3::from_array(*p)).collect();
        Ok(LiquidMesh::from_vertices(vertices))
    }
}

fn bounds_center(vertices: &[Vec3]) -> Vec3 {
    if vertices.is_empty() {
        return Vec3::ZERO;
    }
    let (min, max) = vertices.iter().fold(
        (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
        |(min, max), v| (min.min(*v), max.max(*v)),
    );
    (min + max) * 0.5
}
