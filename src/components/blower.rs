//! Leaf blower: cone force field and the blower component carried by the player.
//!
//! [`ConeForceField`] decides which leaves are inside the blower's angular
//! cone and the impulse each of them receives:
//!
//! ```text
//! diff      = wrap(facing - atan2(target - agent))      in [-PI, PI]
//! in cone   = -half_angle < diff < half_angle
//! distance  = max(|target - agent|, min_distance)
//! falloff   = (distance / falloff_distance + 1)^2
//! magnitude = r * strength / falloff                     r ~ U[0, 1)
//! impulse   = magnitude * normalize(target - agent)
//! ```
//!
//! which is `r / (falloff * distance) * strength * (target - agent)` for any
//! target farther than `min_distance`. Closer targets all get the impulse of
//! a target at `min_distance`, and a target on top of the agent gets none.
//!
//! [`LeafBlower`] is the ECS component wrapping the field together with the
//! blower's energy tank, its motor volume ramp and the settings of the
//! particle jet reported through [`EmissionDirective`].

use bevy_ecs::prelude::Component;
use glam::Vec2;

use super::interaction::{
    Agent, ImpulseRng, InteractionError, Target, TargetIndex, wrap_angle,
};

pub const DEFAULT_HALF_ANGLE: f32 = 0.2;
pub const DEFAULT_STRENGTH: f32 = 2000.0;
pub const DEFAULT_FALLOFF_DISTANCE: f32 = 50.0;
/// Distances below this are clamped before computing the falloff.
pub const MIN_DISTANCE: f32 = 1.0;

pub const DEFAULT_MUZZLE_DISTANCE: f32 = 50.0;
pub const DEFAULT_PARTICLE_SPEED: (f32, f32) = (100.0, 500.0);
pub const DEFAULT_ENERGY: u32 = 3000;

pub const VOLUME_MAX: f32 = 100.0;
pub const VOLUME_RISE: f32 = 10.0;
pub const VOLUME_FALL: f32 = 3.0;
pub const MIN_PLAYBACK_RATE: f32 = 0.1;

/// Angular cone in front of an agent that pushes targets away.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeForceField {
    half_angle: f32,
    strength: f32,
    falloff_distance: f32,
    min_distance: f32,
    clamp: Option<f32>,
}

impl Default for ConeForceField {
    fn default() -> Self {
        Self {
            half_angle: DEFAULT_HALF_ANGLE,
            strength: DEFAULT_STRENGTH,
            falloff_distance: DEFAULT_FALLOFF_DISTANCE,
            min_distance: MIN_DISTANCE,
            clamp: None,
        }
    }
}

impl ConeForceField {
    /// Create a field with the given half-angle (radians) and default
    /// strength and falloff.
    pub fn new(half_angle: f32) -> Result<Self, InteractionError> {
        if !half_angle.is_finite() || half_angle <= 0.0 {
            return Err(InteractionError::InvalidConeAngle(half_angle));
        }
        Ok(Self {
            half_angle,
            ..Self::default()
        })
    }

    pub fn with_strength(mut self, strength: f32) -> Result<Self, InteractionError> {
        if !strength.is_finite() || strength < 0.0 {
            return Err(InteractionError::InvalidStrength(strength));
        }
        self.strength = strength;
        Ok(self)
    }

    /// Distance at which the falloff reaches 4, i.e. a quarter strength.
    pub fn with_falloff_distance(mut self, falloff_distance: f32) -> Result<Self, InteractionError> {
        if !falloff_distance.is_finite() || falloff_distance <= 0.0 {
            return Err(InteractionError::InvalidFalloffDistance(falloff_distance));
        }
        self.falloff_distance = falloff_distance;
        Ok(self)
    }

    /// Limit every impulse component to `[-clamp, clamp]`.
    pub fn with_clamp(mut self, clamp: f32) -> Result<Self, InteractionError> {
        if !clamp.is_finite() || clamp <= 0.0 {
            return Err(InteractionError::InvalidClamp(clamp));
        }
        self.clamp = Some(clamp);
        Ok(self)
    }

    pub fn half_angle(&self) -> f32 {
        self.half_angle
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    pub fn clamp(&self) -> Option<f32> {
        self.clamp
    }

    /// Whether a point seen at `bearing` lies strictly inside the cone of an
    /// agent facing `facing`.
    pub fn contains_bearing(&self, facing: f32, bearing: f32) -> bool {
        let diff = wrap_angle(facing - bearing);
        -self.half_angle < diff && diff < self.half_angle
    }

    /// Whether `point` lies strictly inside the agent's cone.
    pub fn contains(&self, agent: &Agent, point: Vec2) -> bool {
        let offset = point - agent.position;
        self.contains_bearing(agent.facing, offset.y.atan2(offset.x))
    }

    /// Impulse for a point given the random draw `draw` in `[0, 1)`.
    /// Does not check the cone.
    pub fn impulse(&self, agent: &Agent, point: Vec2, draw: f32) -> Vec2 {
        let offset = point - agent.position;
        let distance = offset.length().max(self.min_distance);
        let falloff = (distance / self.falloff_distance + 1.0).powi(2);
        let magnitude = draw * self.strength / falloff;
        let impulse = offset.normalize_or_zero() * magnitude;
        match self.clamp {
            Some(clamp) => impulse.clamp(Vec2::splat(-clamp), Vec2::splat(clamp)),
            None => impulse,
        }
    }

    /// Impulses for every uncollected target inside the cone, in target order.
    ///
    /// One draw is taken from `rng` per affected target, so a seeded source
    /// reproduces the same impulses.
    pub fn apply_to(
        &self,
        agent: &Agent,
        targets: &[Target],
        rng: &mut impl ImpulseRng,
    ) -> Vec<(TargetIndex, Vec2)> {
        targets
            .iter()
            .enumerate()
            .filter(|(_, target)| !target.collected && self.contains(agent, target.position))
            .map(|(index, target)| {
                let draw = rng.unit();
                (index, self.impulse(agent, target.position, draw))
            })
            .collect()
    }
}

/// Particle scale as a function of normalized age `t` in `[0, 1]`:
/// `max((1 - t) * gain, floor)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleCurve {
    pub gain: f32,
    pub floor: f32,
}

impl Default for ScaleCurve {
    fn default() -> Self {
        Self {
            gain: 1.0,
            floor: 0.5,
        }
    }
}

impl ScaleCurve {
    pub fn scale_at(&self, age: f32) -> f32 {
        ((1.0 - age.clamp(0.0, 1.0)) * self.gain).max(self.floor)
    }
}

/// What the renderer should emit this tick for the blower jet.
///
/// Angles follow the facing convention of [`Rotation`](super::rotation::Rotation)
/// but are expressed in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionDirective {
    pub origin: Vec2,
    pub angle_degrees: (f32, f32),
    pub speed: (f32, f32),
    pub scale: ScaleCurve,
}

/// Leaf blower carried by an agent.
#[derive(Component, Debug, Clone)]
pub struct LeafBlower {
    pub field: ConeForceField,
    /// Distance from the agent to the nozzle along its facing.
    pub muzzle_distance: f32,
    pub particle_speed: (f32, f32),
    pub particle_scale: ScaleCurve,
    /// Set by the player control system while the trigger is held and
    /// energy is left.
    pub blowing: bool,
    /// Remaining blowing ticks.
    pub energy: u32,
    /// Motor loop volume in `[0, 100]`.
    pub volume: f32,
}

impl Default for LeafBlower {
    fn default() -> Self {
        Self::new(ConeForceField::default())
    }
}

impl LeafBlower {
    pub fn new(field: ConeForceField) -> Self {
        Self {
            field,
            muzzle_distance: DEFAULT_MUZZLE_DISTANCE,
            particle_speed: DEFAULT_PARTICLE_SPEED,
            particle_scale: ScaleCurve::default(),
            blowing: false,
            energy: DEFAULT_ENERGY,
            volume: 0.0,
        }
    }

    pub fn with_energy(mut self, energy: u32) -> Self {
        self.energy = energy;
        self
    }

    pub fn with_muzzle_distance(mut self, muzzle_distance: f32) -> Self {
        self.muzzle_distance = muzzle_distance;
        self
    }

    pub fn with_particle_speed(mut self, min: f32, max: f32) -> Result<Self, InteractionError> {
        if !(0.0 <= min && min <= max) {
            return Err(InteractionError::InvalidRange(min, max));
        }
        self.particle_speed = (min, max);
        Ok(self)
    }

    /// Update the blowing state from the trigger. Each blowing tick burns one
    /// unit of energy; an empty tank stops the blower.
    pub fn trigger(&mut self, held: bool) -> bool {
        self.blowing = held && self.energy > 0;
        if self.blowing {
            self.energy -= 1;
        }
        self.blowing
    }

    /// Move the motor volume one tick toward full (blowing) or silence.
    pub fn ramp_volume(&mut self) -> f32 {
        self.volume = if self.blowing {
            (self.volume + VOLUME_RISE).min(VOLUME_MAX)
        } else {
            (self.volume - VOLUME_FALL).max(0.0)
        };
        self.volume
    }

    /// Motor loop playback rate for the current volume.
    pub fn playback_rate(&self) -> f32 {
        (self.volume / VOLUME_MAX).max(MIN_PLAYBACK_RATE)
    }

    /// Particle jet for an emitting agent, `None` otherwise.
    pub fn emission(&self, agent: &Agent) -> Option<EmissionDirective> {
        if !agent.emitting {
            return None;
        }
        let facing = agent.facing.to_degrees();
        let half = self.field.half_angle().to_degrees();
        Some(EmissionDirective {
            origin: agent.position + agent.direction() * self.muzzle_distance,
            angle_degrees: (facing - half, facing + half),
            speed: self.particle_speed,
            scale: self.particle_scale,
        })
    }
}
