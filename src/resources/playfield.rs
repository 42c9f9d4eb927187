//! Playfield size resource.
//!
//! Bounds of the area leaves are spawned on, in world units. Scripted phases
//! use it to decide whether a leaf was blown off the field.

use bevy_ecs::prelude::Resource;
use glam::Vec2;

#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct Playfield {
    pub w: f32,
    pub h: f32,
}

impl Playfield {
    pub fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    /// Whether `point` lies on the playfield, edges included.
    pub fn contains(&self, point: Vec2) -> bool {
        (0.0..=self.w).contains(&point.x) && (0.0..=self.h).contains(&point.y)
    }
}
