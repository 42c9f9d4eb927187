//! Player marker and movement tuning.

use bevy_ecs::prelude::Component;

pub const DEFAULT_PLAYER_SPEED: f32 = 100.0;
/// Radians turned per tick while a turn key is held.
pub const DEFAULT_TURN_RATE: f32 = 0.05;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Player {
    pub speed: f32,
    pub turn_rate: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            speed: DEFAULT_PLAYER_SPEED,
            turn_rate: DEFAULT_TURN_RATE,
        }
    }
}
