//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame, applying `time_scale` to the provided delta.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Advance the `WorldTime` resource by one frame.
///
/// `dt` is the unscaled frame delta in seconds. The scaled delta is added to
/// `elapsed` and to the integer millisecond clock `now_ms`, which never goes
/// backwards.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = (dt * wt.time_scale).max(0.0);
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
    wt.frame_count += 1;
    wt.carry_ms += scaled_dt as f64 * 1000.0;
    let whole = wt.carry_ms.floor();
    wt.now_ms += whole as u64;
    wt.carry_ms -= whole;
}
