use bevy_ecs::prelude::Resource;

use crate::components::timeline::Millis;

/// Simulation clock, advanced once per frame by
/// [`update_world_time`](crate::systems::time::update_world_time).
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Seconds since start, scaled.
    pub elapsed: f32,
    /// Scaled seconds of the current frame.
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
    /// Milliseconds since start, accumulated without float drift. Timelines
    /// step on this value.
    pub now_ms: Millis,
    /// Sub-millisecond remainder carried to the next frame.
    pub carry_ms: f64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
            now_ms: 0,
            carry_ms: 0.0,
        }
    }
}
