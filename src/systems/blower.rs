//! Leaf blower system.
//!
//! For every agent carrying a [`LeafBlower`]:
//!
//! - ramps the motor loop volume and reports it as [`AudioCmd::LoopVolume`]
//! - while blowing, applies the cone force field to a snapshot of the leaves
//!   and adds the impulses to their rigid bodies
//! - while blowing, reports the particle jet as a [`BlowerEmission`]
//!
//! # Ordering
//!
//! Runs after `player_control_system` (which sets `blowing`) and before
//! `movement_system` so leaves move on the tick they were hit.
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::blower::{LeafBlower, VOLUME_MAX};
use crate::components::interaction::{Agent, Target};
use crate::components::leaf::Leaf;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::Rotation;
use crate::events::audio::{AudioCmd, LOOP_BLOWER};
use crate::events::emission::BlowerEmission;
use crate::resources::rng::GameRng;

pub fn blower_system(
    mut blowers: Query<(Entity, &MapPosition, &Rotation, &mut LeafBlower)>,
    mut leaves: Query<(Entity, &Leaf, &MapPosition, &mut RigidBody)>,
    mut rng: ResMut<GameRng>,
    mut audio: MessageWriter<AudioCmd>,
    mut emissions: MessageWriter<BlowerEmission>,
) {
    let (entities, targets): (Vec<Entity>, Vec<Target>) = leaves
        .iter()
        .map(|(entity, leaf, position, _)| {
            (
                entity,
                Target {
                    position: position.pos,
                    collected: leaf.collected,
                },
            )
        })
        .unzip();

    for (agent_entity, position, rotation, mut blower) in blowers.iter_mut() {
        let previous = blower.volume;
        let volume = blower.ramp_volume();
        if volume != previous {
            audio.write(AudioCmd::loop_volume(
                LOOP_BLOWER,
                volume / VOLUME_MAX,
                blower.playback_rate(),
            ));
        }
        if !blower.blowing {
            continue;
        }

        let agent = Agent {
            position: position.pos,
            facing: rotation.radians,
            emitting: true,
        };
        let hits = blower.field.apply_to(&agent, &targets, &mut *rng);
        debug!(
            "Blower {:?} hit {} of {} leaves (energy {})",
            agent_entity,
            hits.len(),
            targets.len(),
            blower.energy
        );
        for (index, impulse) in hits {
            if let Ok((_, _, _, mut body)) = leaves.get_mut(entities[index]) {
                body.apply_impulse(impulse);
            }
        }
        if let Some(directive) = blower.emission(&agent) {
            emissions.write(BlowerEmission {
                agent: agent_entity,
                directive,
            });
        }
    }
}
