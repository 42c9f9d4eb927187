use bevy_ecs::message::Message;
use bevy_ecs::prelude::Entity;
use glam::Vec2;

/// A leaf was picked up by a sweeper. Sent once per leaf.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct LeafCollected {
    pub leaf: Entity,
    pub collector: Entity,
    pub position: Vec2,
}
