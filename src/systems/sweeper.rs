//! Road sweeper systems.
//!
//! - [`sweeper_motion_system`] wraps sweepers back to the top of the field and
//!   sets the engine loop volume from the distance to the player
//! - [`sweeper_collect_system`] collects leaves within pickup radius, exactly
//!   once each, counts them in [`Score`] and freezes their bodies
//! - [`sweeper_hit_player_system`] shoves a player that gets run over and
//!   raises the warning banner for a few seconds
//!
//! The sweeper itself is moved by `movement_system` through its rigid body.
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, info};

use crate::components::interaction::Target;
use crate::components::leaf::Leaf;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::rigidbody::RigidBody;
use crate::components::sweeper::{BANNER_SECONDS, PLAYER_PUSH, Sweeper};
use crate::components::timer::Timer;
use crate::events::audio::{AudioCmd, FX_PLAYER_AH, FX_SLURP, LOOP_SWEEPER};
use crate::events::collect::LeafCollected;
use crate::events::timer::HIDE_BANNER_SIGNAL;
use crate::resources::score::Score;

pub fn sweeper_motion_system(
    mut sweepers: Query<(Entity, &mut MapPosition, &Sweeper), Without<Player>>,
    players: Query<&MapPosition, (With<Player>, Without<Sweeper>)>,
    mut audio: MessageWriter<AudioCmd>,
) {
    for (entity, mut position, sweeper) in sweepers.iter_mut() {
        if sweeper.should_wrap(position.pos.y) {
            debug!("Sweeper {:?} wraps to y={}", entity, sweeper.reset_y);
            position.pos.y = sweeper.reset_y;
            audio.write(AudioCmd::play_loop(LOOP_SWEEPER));
        }
        let nearest = players
            .iter()
            .map(|player| player.pos.distance(position.pos))
            .reduce(f32::min);
        if let Some(distance) = nearest {
            audio.write(AudioCmd::loop_volume(
                LOOP_SWEEPER,
                Sweeper::engine_volume(distance),
                1.0,
            ));
        }
    }
}

pub fn sweeper_collect_system(
    sweepers: Query<(Entity, &MapPosition, &Sweeper)>,
    mut leaves: Query<(Entity, &mut Leaf, &MapPosition, Option<&mut RigidBody>)>,
    mut score: ResMut<Score>,
    mut collected: MessageWriter<LeafCollected>,
    mut audio: MessageWriter<AudioCmd>,
) {
    if sweepers.is_empty() {
        return;
    }
    let (entities, mut targets): (Vec<Entity>, Vec<Target>) = leaves
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

    for (sweeper_entity, sweeper_position, sweeper) in sweepers.iter() {
        for index in sweeper.collector.sweep(sweeper_position.pos, &mut targets) {
            let Ok((leaf_entity, mut leaf, _, body)) = leaves.get_mut(entities[index]) else {
                continue;
            };
            leaf.collected = true;
            // inside the sweeper now: stays put until the scene is rebuilt
            if let Some(mut body) = body {
                body.set_velocity(Vec2::ZERO);
                body.freeze();
            }
            score.record_collect();
            collected.write(LeafCollected {
                leaf: leaf_entity,
                collector: sweeper_entity,
                position: targets[index].position,
            });
            audio.write(AudioCmd::fx(FX_SLURP));
        }
    }
}

pub fn sweeper_hit_player_system(
    mut commands: Commands,
    sweepers: Query<(&MapPosition, &Sweeper), Without<Player>>,
    mut players: Query<(Entity, &mut MapPosition), (With<Player>, Without<Sweeper>)>,
    mut score: ResMut<Score>,
    mut audio: MessageWriter<AudioCmd>,
) {
    for (sweeper_position, sweeper) in sweepers.iter() {
        for (player, mut player_position) in players.iter_mut() {
            if !sweeper
                .collector
                .reaches(sweeper_position.pos, player_position.pos)
            {
                continue;
            }
            info!("Sweeper ran over player {:?}", player);
            player_position.pos.x += PLAYER_PUSH;
            audio.write(AudioCmd::fx(FX_PLAYER_AH));
            score.banner = Some(sweeper_position.pos);
            commands
                .entity(player)
                .insert(Timer::new(BANNER_SECONDS, HIDE_BANNER_SIGNAL));
        }
    }
}
