use bevy::prelude::*;
use liquid_wobble::{make_liquid_material, LiquidBehavior, LiquidMaterial, LiquidPresets};

use crate::input_manager::{InputStates, MouseButtonState};

const PRESETS: &str = include_str!("../../assets/liquid_presets.ron");
const SPACING: f32 = 1.5;
const DRAG_SPEED: f32 = 0.01;
const TWIST_SPEED: f32 = 0.01;

#[derive(Component)]
pub(crate) struct Bottle {
    home: Vec3,
}

#[derive(Resource, Default)]
pub(crate) struct Selected(usize);

pub(crate) fn spawn_bottles(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<LiquidMaterial>>,
) {
    let presets = match LiquidPresets::from_ron(PRESETS) {
        Ok(presets) => presets,
        Err(error) => {
            error!("[Demo] Bundled presets are broken: {}", error);
            return;
        }
    };

    let mesh = meshes.add(Mesh::from(Cylinder::new(0.4, 2.0)));
    let names: Vec<String> = presets.names().map(str::to_string).collect();
    let offset = (names.len() as f32 - 1.0) * SPACING * 0.5;

    for (index, name) in names.iter().enumerate() {
        let Ok(config) = presets.get(name) else { continue };
        let home = Vec3::new(index as f32 * SPACING - offset, 1.0, 0.0);
        let hue = index as f32 * 360.0 / names.len() as f32;
        let material = make_liquid_material(
            &mut materials,
            StandardMaterial {
                base_color: Color::hsla(hue, 0.7, 0.5, 0.85),
                alpha_mode: AlphaMode::Blend,
                cull_mode: None,
                ..default()
            },
            Color::hsl(hue, 0.8, 0.7),
        );

        commands.spawn((
            MaterialMeshBundle {
                mesh: mesh.clone(),
                material,
                transform: Transform::from_translation(home),
                ..default()
            },
            LiquidBehavior::new(config),
            Bottle { home },
            Name::new(name.clone()),
        ));
    }
    commands.insert_resource(presets);
}

// Tab cycles the bottle under control, R puts every bottle back
pub(crate) fn select_bottle(
    keys: Res<ButtonInput<KeyCode>>,
    mut selected: ResMut<Selected>,
    mut bottles: Query<(&Bottle, &mut Transform)>,
) {
    let count = bottles.iter().count();
    if keys.just_pressed(KeyCode::Tab) && count > 0 {
        selected.0 = (selected.0 + 1) % count;
    }
    if keys.just_pressed(KeyCode::KeyR) {
        for (bottle, mut transform) in bottles.iter_mut() {
            *transform = Transform::from_translation(bottle.home);
        }
    }
}

pub(crate) fn shake_bottle(
    input: Res<InputStates>,
    selected: Res<Selected>,
    mut bottles: Query<&mut Transform, With<Bottle>>,
) {
    let Some(mut transform) = bottles.iter_mut().nth(selected.0) else {
        return;
    };
    if input.left == MouseButtonState::Held {
        transform.translation += Vec3::new(input.drag.x, -input.drag.y, 0.0) * DRAG_SPEED;
    }
    if input.right == MouseButtonState::Held {
        transform.rotate_z(-input.drag.x * TWIST_SPEED);
        transform.rotate_x(input.drag.y * TWIST_SPEED);
    }
}

// Space pauses virtual time; the UnscaledTime bottle keeps sloshing
pub(crate) fn toggle_pause(keys: Res<ButtonInput<KeyCode>>, mut time: ResMut<Time<Virtual>>) {
    if !keys.just_pressed(KeyCode::Space) {
        return;
    }
    if time.is_paused() {
        time.unpause();
    } else {
        time.pause();
    }
}
