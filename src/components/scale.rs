//! Per-axis draw scale.
//!
//! Intro leaves spawn oversized and shrink back toward 1 every tick, which
//! reads as leaves falling onto the lawn.

use bevy_ecs::prelude::Component;
use glam::Vec2;

#[derive(Component, Clone, Debug, Copy, PartialEq)]
pub struct Scale {
    pub scale: Vec2,
}

impl Scale {
    pub fn new(sx: f32, sy: f32) -> Self {
        Self {
            scale: Vec2::new(sx, sy),
        }
    }

    pub fn uniform(s: f32) -> Self {
        Self::new(s, s)
    }

    /// Keep `factor` of the excess above 1 on each axis. Axes at or below 1
    /// are left alone.
    pub fn settle(&mut self, factor: f32) {
        for axis in [&mut self.scale.x, &mut self.scale.y] {
            if *axis > 1.0 {
                *axis = (*axis - 1.0) * factor + 1.0;
            }
        }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}
