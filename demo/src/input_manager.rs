use bevy::app::Plugin;
use bevy::input::ButtonState;
use bevy::input::mouse::{MouseButtonInput, MouseMotion};
use bevy::prelude::*;

pub(crate) struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<InputStates>()
            .add_systems(PreUpdate, input_management_system);
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum MouseButtonState {
    #[default]
    Unheld,
    Held,
}

#[derive(Default, Resource)]
pub(crate) struct InputStates {
    pub left: MouseButtonState,
    pub right: MouseButtonState,
    // Accumulated mouse motion this frame
    pub drag: Vec2,
}

fn input_management_system(
    mut mouse_motion_events: EventReader<MouseMotion>,
    mut mouse_button_input_events: EventReader<MouseButtonInput>,
    mut input: ResMut<InputStates>,
) {
    input.drag = mouse_motion_events.read().map(|event| event.delta).sum();

    for event in mouse_button_input_events.read() {
        let state = match event.state {
            ButtonState::Pressed => MouseButtonState::Held,
            ButtonState::Released => MouseButtonState::Unheld,
        };
        match event.button {
            MouseButton::Left => input.left = state,
            MouseButton::Right => input.right = state,
            _ => {}
        }
    }
}
