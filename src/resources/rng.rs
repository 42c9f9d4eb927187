//! Seedable random source shared by all systems.

use bevy_ecs::prelude::Resource;
use glam::Vec2;

use crate::components::interaction::{ImpulseRng, random_f32_range};

#[derive(Resource, Debug, Clone)]
pub struct GameRng(pub fastrand::Rng);

impl Default for GameRng {
    fn default() -> Self {
        Self(fastrand::Rng::new())
    }
}

impl GameRng {
    pub fn with_seed(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }

    /// Uniform f32 in `[min, max)`.
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        random_f32_range(&mut self.0, min, max)
    }

    /// Uniform point in `[0, size.x) x [0, size.y)`.
    pub fn point_in(&mut self, size: Vec2) -> Vec2 {
        Vec2::new(self.range(0.0, size.x), self.range(0.0, size.y))
    }
}

impl ImpulseRng for GameRng {
    fn unit(&mut self) -> f32 {
        self.0.f32()
    }
}
