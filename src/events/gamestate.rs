//! Game state transition event and observer.
//!
//! Systems request a scene change by updating [`NextGameState`]. Emitting a
//! [`GameStateChangedEvent`] then triggers the observer in this module, which
//! applies the transition to [`GameState`] and queues the scene rebuild.
//!
//! The rebuild needs exclusive world access, so it runs as a queued command
//! after the observer returns.
use crate::game;
use crate::resources::gamestate::NextGameStates::{Pending, Unchanged};
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

/// Event used to indicate that a pending game state transition should be
/// applied.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStateChangedEvent {}

/// Observer that applies a pending game state transition.
///
/// Contract
/// - Reads the intention from [`NextGameState`].
/// - If pending, copies the new value into [`GameState`], resets
///   [`NextGameState`] to [`Unchanged`] and queues
///   [`game::enter_state`], which clears the old scene and builds the new one.
pub fn observe_gamestate_change_event(
    _trigger: On<GameStateChangedEvent>,
    mut commands: Commands,
    mut next_game_state: ResMut<NextGameState>,
    mut game_state: ResMut<GameState>,
) {
    debug!("GameStateChangedEvent triggered");
    match next_game_state.get() {
        Pending(new_state) => {
            info!(
                "Transitioning from {:?} to {:?}",
                game_state.get(),
                new_state
            );
            game_state.set(new_state);
            next_game_state.reset();
            on_state_enter(new_state, &mut commands);
        }
        Unchanged => {
            debug!("No state change pending.");
        }
    }
}

/// Internal: queue the scene build for the given state.
fn on_state_enter(state: GameStates, commands: &mut Commands) {
    match state {
        GameStates::None => debug!("Entered None state"),
        GameStates::Quitting => info!("Quitting"),
        GameStates::Intro | GameStates::Garden => {
            commands.queue(move |world: &mut World| game::enter_state(world, state));
        }
    }
}
