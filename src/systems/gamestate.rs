use crate::events::gamestate::GameStateChangedEvent;
use crate::resources::gamestate::{GameState, GameStates, NextGameState, NextGameStates};
use crate::resources::input::InputState;
use bevy_ecs::prelude::*;

pub fn check_pending_state(mut commands: Commands, next_state: Res<NextGameState>) {
    if let NextGameStates::Pending(_new_state) = next_state.get() {
        commands.trigger(GameStateChangedEvent {});
    }
}

pub fn state_is_intro(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::Intro)
}

pub fn state_is_garden(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::Garden)
}

/// Pressing blow during the intro starts the game.
pub fn intro_input_system(input: Res<InputState>, mut next_state: ResMut<NextGameState>) {
    if input.blow.just_pressed {
        next_state.set(GameStates::Garden);
    }
}
