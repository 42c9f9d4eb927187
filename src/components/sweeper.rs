//! Road sweeper: proximity collector and the sweeper component.
//!
//! A [`ProximityCollector`] reports the targets strictly within its pickup
//! radius that have not been collected yet. [`ProximityCollector::sweep`]
//! also marks them, so a target is reported at most once for the lifetime of
//! the target set.

use bevy_ecs::prelude::Component;
use glam::Vec2;

use super::interaction::{InteractionError, Target, TargetIndex};

pub const DEFAULT_PICKUP_RADIUS: f32 = 40.0;
pub const DEFAULT_SWEEPER_SPEED: f32 = 130.0;
pub const DEFAULT_WRAP_Y: f32 = 1050.0;
/// How far the player is shoved when the sweeper runs into them.
pub const PLAYER_PUSH: f32 = 40.0;
/// Seconds the "watch out" banner stays up after a hit.
pub const BANNER_SECONDS: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityCollector {
    pickup_radius: f32,
}

impl Default for ProximityCollector {
    fn default() -> Self {
        Self {
            pickup_radius: DEFAULT_PICKUP_RADIUS,
        }
    }
}

impl ProximityCollector {
    pub fn new(pickup_radius: f32) -> Result<Self, InteractionError> {
        if !pickup_radius.is_finite() || pickup_radius <= 0.0 {
            return Err(InteractionError::InvalidPickupRadius(pickup_radius));
        }
        Ok(Self { pickup_radius })
    }

    pub fn pickup_radius(&self) -> f32 {
        self.pickup_radius
    }

    /// Whether `point` is strictly within the pickup radius.
    pub fn reaches(&self, position: Vec2, point: Vec2) -> bool {
        position.distance(point) < self.pickup_radius
    }

    /// Indices of uncollected targets within reach, in target order.
    pub fn collect(&self, position: Vec2, targets: &[Target]) -> Vec<TargetIndex> {
        targets
            .iter()
            .enumerate()
            .filter(|(_, target)| !target.collected && self.reaches(position, target.position))
            .map(|(index, _)| index)
            .collect()
    }

    /// Like [`collect`](Self::collect), then marks the reported targets.
    pub fn sweep(&self, position: Vec2, targets: &mut [Target]) -> Vec<TargetIndex> {
        let collected = self.collect(position, targets);
        for &index in &collected {
            targets[index].collected = true;
        }
        collected
    }
}

/// A collector driving down the playfield at constant speed and wrapping
/// back to the top.
#[derive(Component, Debug, Clone)]
pub struct Sweeper {
    pub collector: ProximityCollector,
    /// Downward speed in units per second.
    pub speed: f32,
    /// Once `y` exceeds this the sweeper restarts at `reset_y`.
    pub wrap_y: f32,
    pub reset_y: f32,
}

impl Default for Sweeper {
    fn default() -> Self {
        Self {
            collector: ProximityCollector::default(),
            speed: DEFAULT_SWEEPER_SPEED,
            wrap_y: DEFAULT_WRAP_Y,
            reset_y: 0.0,
        }
    }
}

impl Sweeper {
    pub fn new(collector: ProximityCollector, speed: f32) -> Self {
        Self {
            collector,
            speed,
            ..Self::default()
        }
    }

    /// Velocity of the sweeper in world space.
    pub fn velocity(&self) -> Vec2 {
        Vec2::new(0.0, self.speed)
    }

    /// Whether the sweeper has left the playfield at `y` and must wrap.
    pub fn should_wrap(&self, y: f32) -> bool {
        y > self.wrap_y
    }

    /// Engine loop volume heard at `distance`: `min(100 / distance, 1)`.
    pub fn engine_volume(distance: f32) -> f32 {
        if distance <= 0.0 {
            return 1.0;
        }
        (100.0 / distance).min(1.0)
    }
}
