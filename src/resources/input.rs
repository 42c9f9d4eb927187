//! Per-frame input resource.
//!
//! Captures the actions the game cares about and exposes them to systems via
//! the [`InputState`] resource. The host (keyboard poller or the headless
//! autopilot) feeds raw "is down" samples through [`InputState::apply`]; the
//! edge flags are derived from the previous sample.
use bevy_ecs::prelude::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Boolean action state with edge detection.
pub struct BoolState {
    /// Whether the action is currently held this frame.
    pub active: bool,
    /// Whether the action was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the action was just released this frame.
    pub just_released: bool,
}

impl BoolState {
    /// Record this frame's sample and derive the edges.
    pub fn update(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

/// Raw "is down" samples for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSample {
    pub turn_left: bool,
    pub turn_right: bool,
    pub forward: bool,
    pub backward: bool,
    pub strafe: bool,
    pub blow: bool,
}

/// Resource capturing the per-frame action state relevant to gameplay.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    pub turn_left: BoolState,
    pub turn_right: BoolState,
    pub forward: BoolState,
    pub backward: BoolState,
    /// While held, left/right strafe instead of turning.
    pub strafe: BoolState,
    pub blow: BoolState,
}

impl InputState {
    pub fn apply(&mut self, sample: InputSample) {
        self.turn_left.update(sample.turn_left);
        self.turn_right.update(sample.turn_right);
        self.forward.update(sample.forward);
        self.backward.update(sample.backward);
        self.strafe.update(sample.strafe);
        self.blow.update(sample.blow);
    }
}
