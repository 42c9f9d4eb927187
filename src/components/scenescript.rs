//! Scripted scene driven by a [`Timeline`].
//!
//! Phase callbacks cannot borrow the world, so they queue [`ScriptCmd`]s in a
//! [`ScriptContext`] and the scene script system applies them right after the
//! step, with access to the leaves, the RNG and the message writers.

use bevy_ecs::prelude::Component;
use glam::Vec2;

use super::timeline::{Millis, PhaseChange, Timeline, TimelineError};

/// Command queued by a phase callback.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCmd {
    /// Spawn one leaf at a random playfield position with a random scale in
    /// `[0, max_scale)` and the given linear drag.
    SpawnLeaf { max_scale: f32, drag: f32 },
    /// Give every leaf a random velocity in `[-max_speed, max_speed)` per axis.
    ScatterLeaves { max_speed: f32 },
    /// Stop the leaf with this spawn order; if it left the playfield, re-seat
    /// it at a random position with a fresh scale.
    ResetLeaf { order: usize, max_scale: f32 },
    /// Ask the renderer to shake the camera.
    ShakeCamera { millis: u64 },
}

/// What phase callbacks can see and do during one step.
#[derive(Debug, Clone, Default)]
pub struct ScriptContext {
    /// Leaves currently in the scene.
    pub leaf_count: usize,
    /// Playfield size in world units.
    pub playfield: Vec2,
    commands: Vec<ScriptCmd>,
}

impl ScriptContext {
    pub fn new(leaf_count: usize, playfield: Vec2) -> Self {
        Self {
            leaf_count,
            playfield,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, cmd: ScriptCmd) {
        self.commands.push(cmd);
    }

    pub fn commands(&self) -> &[ScriptCmd] {
        &self.commands
    }

    pub fn drain_commands(&mut self) -> Vec<ScriptCmd> {
        std::mem::take(&mut self.commands)
    }
}

/// Component owning the timeline of a scripted scene.
#[derive(Component, Debug)]
pub struct SceneScript {
    pub name: String,
    timeline: Timeline<ScriptContext>,
}

impl SceneScript {
    pub fn new(name: impl Into<String>, timeline: Timeline<ScriptContext>) -> Self {
        Self {
            name: name.into(),
            timeline,
        }
    }

    pub fn active_phase(&self) -> Option<&str> {
        self.timeline.active_phase()
    }

    pub fn timeline(&self) -> &Timeline<ScriptContext> {
        &self.timeline
    }

    pub fn step(
        &mut self,
        now: Millis,
        ctx: &mut ScriptContext,
    ) -> Result<Option<PhaseChange>, TimelineError> {
        self.timeline.step(now, ctx)
    }
}
