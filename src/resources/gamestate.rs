//! Scene state resources.
//!
//! [`GameState`] says which scene is running. Systems never switch scenes
//! directly: they put a request in [`NextGameState`], `check_pending_state`
//! notices it at the start of the next frame and the observer in
//! `crate::events::gamestate` swaps the scene.

use bevy_ecs::prelude::Resource;

/// Scenes the game can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStates {
    /// Nothing built yet.
    #[default]
    None,
    /// Title sequence driven by the intro timeline.
    Intro,
    /// The playable garden.
    Garden,
    /// A timeline faulted or the host asked to stop.
    Quitting,
}

/// A scene change request, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NextGameStates {
    #[default]
    Unchanged,
    Pending(GameStates),
}

/// The running scene.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameState {
    current: GameStates,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> GameStates {
        self.current
    }

    /// Overwrite the running scene without rebuilding it. Only the state
    /// observer should call this.
    pub fn set(&mut self, state: GameStates) {
        self.current = state;
    }
}

/// Pending scene change, applied at the start of the next frame.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NextGameState {
    next: NextGameStates,
}

impl NextGameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> NextGameStates {
        self.next
    }

    /// Request `next`. A later request in the same frame wins.
    pub fn set(&mut self, next: GameStates) {
        self.next = NextGameStates::Pending(next);
    }

    pub fn reset(&mut self) {
        self.next = NextGameStates::Unchanged;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_and_reset() {
        let mut next = NextGameState::new();
        assert_eq!(next.get(), NextGameStates::Unchanged);
        next.set(GameStates::Intro);
        next.set(GameStates::Quitting);
        assert_eq!(next.get(), NextGameStates::Pending(GameStates::Quitting));
        next.reset();
        assert_eq!(next.get(), NextGameStates::Unchanged);
        assert_eq!(GameState::new().get(), GameStates::None);
    }
}
