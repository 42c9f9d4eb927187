use bevy_ecs::prelude::*;

use crate::components::leaf::Leaf;
use crate::components::scale::Scale;

/// Per-tick fraction of the excess scale that is kept.
pub const SCALE_DECAY: f32 = 0.99;

/// Shrink oversized leaves back toward their natural size:
/// `scale = (scale - 1) * 0.99 + 1` while `scale > 1`.
pub fn leaf_scale_decay_system(mut query: Query<&mut Scale, With<Leaf>>) {
    for mut scale in query.iter_mut() {
        scale.settle(SCALE_DECAY);
    }
}
