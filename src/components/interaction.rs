//! Shared vocabulary of the leaf interactions.
//!
//! The blower cone and the sweeper never touch ECS entities directly. The
//! systems take a snapshot of the leaves as a slice of [`Target`]s, hand it to
//! [`ConeForceField`](super::blower::ConeForceField) or
//! [`ProximityCollector`](super::sweeper::ProximityCollector), and map the
//! returned indices back to entities.

use glam::Vec2;
use std::f32::consts::{PI, TAU};
use thiserror::Error;

/// Index into the target slice handed to an interaction.
pub type TargetIndex = usize;

/// Rejected interaction parameters.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum InteractionError {
    #[error("cone half-angle must be finite and > 0, got {0}")]
    InvalidConeAngle(f32),
    #[error("pickup radius must be finite and > 0, got {0}")]
    InvalidPickupRadius(f32),
    #[error("blower strength must be finite and >= 0, got {0}")]
    InvalidStrength(f32),
    #[error("falloff distance must be finite and > 0, got {0}")]
    InvalidFalloffDistance(f32),
    #[error("impulse clamp must be finite and > 0, got {0}")]
    InvalidClamp(f32),
    #[error("range must satisfy 0 <= min <= max, got [{0}, {1}]")]
    InvalidRange(f32, f32),
}

/// The entity pushing or collecting: the player holding the blower.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Agent {
    pub position: Vec2,
    /// Facing angle in radians.
    pub facing: f32,
    /// True while the blower trigger is held.
    pub emitting: bool,
}

impl Agent {
    pub fn new(position: Vec2, facing: f32) -> Self {
        Self {
            position,
            facing,
            emitting: false,
        }
    }

    /// Unit vector pointing along `facing`.
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.facing)
    }
}

/// A leaf as seen by the interactions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub position: Vec2,
    pub collected: bool,
}

impl Target {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            collected: false,
        }
    }
}

/// Uniform source of draws in `[0, 1)`.
pub trait ImpulseRng {
    fn unit(&mut self) -> f32;
}

impl ImpulseRng for fastrand::Rng {
    fn unit(&mut self) -> f32 {
        self.f32()
    }
}

/// Wrap an angle into `[-PI, PI]`. Values already in range are returned
/// untouched so boundary comparisons stay exact.
pub fn wrap_angle(angle: f32) -> f32 {
    if (-PI..=PI).contains(&angle) || !angle.is_finite() {
        angle
    } else {
        (angle + PI).rem_euclid(TAU) - PI
    }
}

/// Sample a random f32 in the range [min, max).
/// If the range is smaller than EPSILON, returns min directly.
#[inline]
pub fn random_f32_range(rng: &mut impl ImpulseRng, min: f32, max: f32) -> f32 {
    let range = max - min;
    if range < f32::EPSILON {
        return min;
    }
    min + rng.unit() * range
}
