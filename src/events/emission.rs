use bevy_ecs::message::Message;
use bevy_ecs::prelude::Entity;

use crate::components::blower::EmissionDirective;

/// Particle jet a renderer should emit this frame for a blowing agent.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct BlowerEmission {
    pub agent: Entity,
    pub directive: EmissionDirective,
}
