use bevy::prelude::*;
use bevy_pbr::{ExtendedMaterial, MaterialExtension, StandardMaterial};
use bevy::reflect::TypePath;
use bevy::render::render_resource::{AsBindGroup, ShaderRef, ShaderType, Shader};
use bevy::asset::load_internal_asset;

use crate::materials::parameter_sink::{ParameterSink, FILL_AMOUNT, WOBBLE_X, WOBBLE_Z};

// Uniform consumed by the liquid fragment shader.
#[derive(Clone, Copy, Debug, Default, PartialEq, ShaderType)]
pub struct LiquidParams {
    // Surface tilt along world X and Z, from the wobble simulation
    pub wobble_x: f32,
    pub wobble_z: f32,
    // Fill plane offset from the container origin (world axes)
    pub fill_amount: Vec3,
    // Container origin in world space; anchors fill_amount for the shader
    pub origin: Vec3,
    // Tint for back faces, seen as the liquid's top surface
    pub surface_color: Vec4,
}

#[derive(Asset, AsBindGroup, TypePath, Clone, Debug, Default)]
pub struct LiquidExt {
    #[uniform(100)]
    pub params: LiquidParams,
}

impl LiquidExt {
    pub fn with_surface_color(color: Color) -> Self {
        LiquidExt {
            params: LiquidParams {
                surface_color: Vec4::from_array(color.as_linear_rgba_f32()),
                ..default()
            },
        }
    }

    pub fn set_origin(&mut self, origin: Vec3) {
        self.params.origin = origin;
    }
}

impl ParameterSink for LiquidExt {
    fn set_float(&mut self, name: &str, value: f32) {
        match name {
            WOBBLE_X => self.params.wobble_x = value,
            WOBBLE_Z => self.params.wobble_z = value,
            _ => warn!("Liquid material has no float parameter {}", name),
        }
    }

    fn set_vector(&mut self, name: &str, value: Vec3) {
        match name {
            FILL_AMOUNT => self.params.fill_amount = value,
            _ => warn!("Liquid material has no vector parameter {}", name),
        }
    }
}

impl MaterialExtension for LiquidExt {
    fn fragment_shader() -> ShaderRef {
        ShaderRef::Handle(LIQUID_SHADER_HANDLE)
    }
}

pub type LiquidMaterial = ExtendedMaterial<StandardMaterial, LiquidExt>;

// The sink the simulation writes to is the extension half of the material.
impl ParameterSink for LiquidMaterial {
    fn set_float(&mut self, name: &str, value: f32) {
        self.extension.set_float(name, value);
    }

    fn set_vector(&mut self, name: &str, value: Vec3) {
        self.extension.set_vector(name, value);
    }
}

// Helper to build a LiquidMaterial handle from a base material and a surface tint
pub fn make_liquid_material(
    materials: &mut Assets<LiquidMaterial>,
    base: StandardMaterial,
    surface_color: Color,
) -> Handle<LiquidMaterial> {
    materials.add(LiquidMaterial { base, extension: LiquidExt::with_surface_color(surface_color) })
}

pub struct LiquidMaterialPlugin;

impl Plugin for LiquidMaterialPlugin {
    fn build(&self, app: &mut App) {
        // Register internal WGSL so it works regardless of external asset dirs
        load_internal_asset!(
            app,
            LIQUID_SHADER_HANDLE,
            "../../assets/shaders/liquid_ext.wgsl",
            Shader::from_wgsl
        );
        app.add_plugins(bevy_pbr::MaterialPlugin::<LiquidMaterial>::default());
    }
}

// Static handle used to refer to the embedded WGSL shader
pub const LIQUID_SHADER_HANDLE: Handle<Shader> = Handle::weak_from_u128(0x3B7E_91C4_0D52_A6F8);
