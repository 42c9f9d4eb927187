//! Timer expiration events.
//!
//! When a [`Timer`](crate::components::timer::Timer) component reaches its
//! duration, a [`TimerEvent`] is triggered. [`observe_timer_event`] reacts to
//! the signals the game uses.
//!
//! # Related
//!
//! - [`crate::components::timer::Timer`] – the timer component
//! - [`crate::systems::timer::update_timers`] – the system that emits these events

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::resources::score::Score;

/// Signal that lowers the sweeper's "watch out" banner.
pub const HIDE_BANNER_SIGNAL: &str = "hide_banner";

/// Event emitted when a timer expires.
///
/// The `entity` field identifies the entity with the timer, and `signal`
/// contains the user-defined signal name from the timer component.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct TimerEvent {
    /// The entity whose timer expired.
    pub entity: Entity,
    /// The signal name configured on the timer.
    pub signal: String,
}

pub fn observe_timer_event(trigger: On<TimerEvent>, mut score: ResMut<Score>) {
    let event = trigger.event();
    match event.signal.as_str() {
        HIDE_BANNER_SIGNAL => {
            debug!("Hiding sweeper banner");
            score.banner = None;
        }
        other => debug!("Unhandled timer signal '{}'", other),
    }
}
