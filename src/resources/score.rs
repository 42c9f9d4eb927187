//! Score and HUD state.

use bevy_ecs::prelude::Resource;
use glam::Vec2;

/// Running tally of the garden scene.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct Score {
    /// Leaves collected by the sweeper. Only ever increases.
    pub collected: u32,
    /// Where to show the "watch out" banner, while it is raised.
    pub banner: Option<Vec2>,
}

impl Score {
    pub fn record_collect(&mut self) {
        self.collected += 1;
    }
}
