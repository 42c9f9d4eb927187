use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::resources::worldtime::WorldTime;

/// Integrate positions from velocities, then bleed speed off through drag.
pub fn movement_system(
    mut query: Query<(&mut MapPosition, &mut RigidBody)>,
    time: Res<WorldTime>,
) {
    let dt = time.delta;
    for (mut position, mut rigidbody) in query.iter_mut() {
        if rigidbody.frozen {
            continue;
        }
        position.pos += rigidbody.velocity * dt;
        rigidbody.apply_drag(dt);
    }
}
