//! Timer system.
//!
//! Advances [`Timer`] components and triggers a [`TimerEvent`] when they
//! expire. Timers are one-shot: the component is removed once it fires.
use bevy_ecs::prelude::*;

use crate::components::timer::Timer;
use crate::events::timer::TimerEvent;
use crate::resources::worldtime::WorldTime;

pub fn update_timers(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Timer)>,
    mut commands: Commands,
) {
    for (entity, mut timer) in query.iter_mut() {
        if timer.advance(world_time.delta) {
            commands.trigger(TimerEvent {
                entity,
                signal: timer.signal.clone(),
            });
            commands.entity(entity).remove::<Timer>();
        }
    }
}
