//! Kinematic body component.
//!
//! The [`RigidBody`] component stores the velocity of an entity together with
//! a linear drag and an optional speed cap. Impulses from the leaf blower are
//! added straight to the velocity; the movement system integrates position and
//! bleeds speed off through drag.
//!
//! Drag is linear, not proportional: every second each velocity component
//! moves `drag` units closer to zero and stops there. Leaves in the garden use
//! a drag of 100, so a leaf blown at 400 units/s glides for four seconds.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Kinematic body storing velocity, drag and a speed cap.
///
/// # Fields
/// - `velocity` - Current velocity in world units per second
/// - `drag` - Linear deceleration in world units per second squared, per axis
/// - `max_speed` - Optional maximum speed clamp
/// - `frozen` - When true, the movement system skips this entity
#[derive(Component, Clone, Debug)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vec2,
    /// Linear per-axis deceleration applied while moving.
    pub drag: f32,
    /// Optional maximum speed. If set, velocity magnitude is clamped to this value.
    pub max_speed: Option<f32>,
    /// When true, movement system skips all physics calculations for this entity.
    pub frozen: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a RigidBody with zero velocity and no drag.
    pub fn new() -> Self {
        Self {
            velocity: Vec2::ZERO,
            drag: 0.0,
            max_speed: None,
            frozen: false,
        }
    }

    /// Create a RigidBody with physics parameters configured.
    pub fn with_physics(drag: f32, max_speed: Option<f32>) -> Self {
        Self {
            drag,
            max_speed,
            ..Self::new()
        }
    }

    /// Add an instantaneous velocity change.
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        self.velocity += impulse;
    }

    /// Set the velocity of the RigidBody.
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Slow the body down by `drag * dt` per axis, never flipping direction,
    /// then apply the speed cap.
    pub fn apply_drag(&mut self, dt: f32) {
        let step = self.drag * dt;
        if step > 0.0 {
            self.velocity.x = approach_zero(self.velocity.x, step);
            self.velocity.y = approach_zero(self.velocity.y, step);
        }
        if let Some(max) = self.max_speed {
            self.velocity = self.velocity.clamp_length_max(max);
        }
    }

    /// Take the body out of the simulation for good, e.g. a leaf the
    /// sweeper swallowed.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }
}

fn approach_zero(value: f32, step: f32) -> f32 {
    if value > 0.0 {
        (value - step).max(0.0)
    } else {
        (value + step).min(0.0)
    }
}
