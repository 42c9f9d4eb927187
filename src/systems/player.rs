//! Player control.
//!
//! Translates [`InputState`] into facing, velocity and the blower trigger.
//! Left/right turn the player by `turn_rate` per tick, or strafe sideways
//! while strafe is held. Forward/backward move along the facing.
use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::blower::LeafBlower;
use crate::components::interaction::wrap_angle;
use crate::components::player::Player;
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::Rotation;
use crate::resources::input::InputState;

pub fn player_control_system(
    input: Res<InputState>,
    mut query: Query<(
        &Player,
        &mut RigidBody,
        &mut Rotation,
        Option<&mut LeafBlower>,
    )>,
) {
    for (player, mut body, mut rotation, blower) in query.iter_mut() {
        // x along facing, y to the right of it
        let mut local = Vec2::ZERO;
        if input.strafe.active {
            if input.turn_left.active {
                local.y -= player.speed;
            }
            if input.turn_right.active {
                local.y += player.speed;
            }
        } else {
            if input.turn_left.active {
                rotation.radians -= player.turn_rate;
            }
            if input.turn_right.active {
                rotation.radians += player.turn_rate;
            }
            rotation.radians = wrap_angle(rotation.radians);
        }
        if input.forward.active {
            local.x += player.speed;
        }
        if input.backward.active {
            local.x -= player.speed;
        }
        body.velocity = Vec2::from_angle(rotation.radians).rotate(local);

        if let Some(mut blower) = blower {
            blower.trigger(input.blow.active);
        }
    }
}
