use bevy::prelude::*;
use liquid_wobble::LiquidPlugin;

mod input_manager;
mod shelf;

fn main() {
    let mut app = App::new();

    // Setup default plugins
    app.add_plugins(
        DefaultPlugins
            .set(bevy::log::LogPlugin {
                filter: "warn,liquid_wobble=debug".to_string(),
                level: bevy::log::Level::WARN,
                ..default()
            })
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Liquid Wobble".into(),
                    resolution: (1024.0, 768.0).into(),
                    ..default()
                }),
                ..default()
            }),
    );

    app.insert_resource(AmbientLight {
        color: Color::rgb(154.0 / 255.0, 166.0 / 255.0, 254.0 / 255.0),
        brightness: 200.0,
    });

    // Setup liquid simulation and material
    app.add_plugins(LiquidPlugin);

    // Setup input system
    app.add_plugins(crate::input_manager::InputPlugin);

    app.init_resource::<shelf::Selected>()
        .add_systems(Startup, (scene_setup, shelf::spawn_bottles))
        .add_systems(Update, (shelf::select_bottle, shelf::shake_bottle, shelf::toggle_pause));

    app.run();
}

fn scene_setup(mut commands: Commands) {
    commands.spawn(Camera3dBundle {
        transform: Transform::from_xyz(0.0, 2.5, 8.0).looking_at(Vec3::new(0.0, 1.0, 0.0), Vec3::Y),
        ..default()
    });

    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            shadows_enabled: true,
            illuminance: 10000.0,
            color: Color::rgb(171.0 / 255.0, 183.0 / 255.0, 1.0),
            ..default()
        },
        transform: Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.8, 0.4, 0.0)),
        ..default()
    });
}
