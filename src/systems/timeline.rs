//! Scene script system.
//!
//! Steps every [`SceneScript`] once per frame on the world clock, forwards
//! phase changes and faults as observer events, then applies the commands the
//! phase callbacks queued.
//!
//! # System Flow
//!
//! 1. Build a [`ScriptContext`] with the current leaf count and playfield size
//! 2. `step(now_ms)` the timeline; callbacks push [`ScriptCmd`]s
//! 3. Trigger [`PhaseChangeEvent`] or, on error, [`TimelineFaultEvent`]
//! 4. Apply the queued commands to the leaves (spawn, scatter, reset) and
//!    forward camera shakes
//!
//! An aborted timeline is skipped from then on; the fault event fires once.
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;
use std::f32::consts::PI;

use crate::components::leaf::Leaf;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::Rotation;
use crate::components::scale::Scale;
use crate::components::scenescript::{SceneScript, ScriptCmd, ScriptContext};
use crate::events::camera::CameraShake;
use crate::events::phase::{PhaseChangeEvent, TimelineFaultEvent};
use crate::resources::playfield::Playfield;
use crate::resources::rng::GameRng;
use crate::resources::worldtime::WorldTime;

type LeafBody = (
    &'static Leaf,
    &'static mut MapPosition,
    &'static mut RigidBody,
    &'static mut Scale,
);

pub fn scene_script_system(
    mut commands: Commands,
    time: Res<WorldTime>,
    playfield: Res<Playfield>,
    mut rng: ResMut<GameRng>,
    mut scripts: Query<(Entity, &mut SceneScript)>,
    mut leaves: Query<LeafBody>,
    mut shakes: MessageWriter<CameraShake>,
) {
    for (entity, mut script) in scripts.iter_mut() {
        if script.timeline().fault().is_some() {
            continue;
        }
        let mut ctx = ScriptContext::new(leaves.iter().count(), playfield.size());
        match script.step(time.now_ms, &mut ctx) {
            Ok(Some(change)) => {
                commands.trigger(PhaseChangeEvent {
                    entity,
                    from: change.from,
                    to: change.to,
                    cause: change.cause,
                });
            }
            Ok(None) => {}
            Err(err) => {
                commands.trigger(TimelineFaultEvent {
                    entity,
                    script: script.name.clone(),
                    message: err.to_string(),
                });
                continue;
            }
        }

        let mut next_order = ctx.leaf_count;
        for cmd in ctx.drain_commands() {
            match cmd {
                ScriptCmd::SpawnLeaf { max_scale, drag } => {
                    spawn_leaf(&mut commands, &mut rng, &playfield, next_order, max_scale, drag);
                    next_order += 1;
                }
                ScriptCmd::ScatterLeaves { max_speed } => {
                    debug!("Scattering {} leaves", ctx.leaf_count);
                    for (_, _, mut body, _) in leaves.iter_mut() {
                        body.velocity = Vec2::new(
                            rng.range(-max_speed, max_speed),
                            rng.range(-max_speed, max_speed),
                        );
                    }
                }
                ScriptCmd::ResetLeaf { order, max_scale } => {
                    let Some((_, mut position, mut body, mut scale)) =
                        leaves.iter_mut().find(|(leaf, ..)| leaf.order == order)
                    else {
                        continue;
                    };
                    body.velocity = Vec2::ZERO;
                    if !playfield.contains(position.pos) {
                        position.pos = rng.point_in(playfield.size());
                        *scale = Scale::uniform(rng.range(0.0, max_scale));
                    }
                }
                ScriptCmd::ShakeCamera { millis } => {
                    shakes.write(CameraShake { millis });
                }
            }
        }
    }
}

fn spawn_leaf(
    commands: &mut Commands,
    rng: &mut GameRng,
    playfield: &Playfield,
    order: usize,
    max_scale: f32,
    drag: f32,
) {
    let position = rng.point_in(playfield.size());
    commands.spawn((
        Leaf::new(order),
        MapPosition { pos: position },
        RigidBody::with_physics(drag, None),
        Rotation::new(rng.range(0.0, PI)),
        Scale::uniform(rng.range(0.0, max_scale)),
    ));
}
