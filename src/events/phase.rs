//! Timeline phase events.
//!
//! [`PhaseChangeEvent`] is triggered whenever a
//! [`SceneScript`](crate::components::scenescript::SceneScript) enters a new
//! phase, [`TimelineFaultEvent`] when its timeline aborts on a configuration
//! error.
//!
//! # Usage
//!
//! ```ignore
//! fn on_phase_change(trigger: On<PhaseChangeEvent>) {
//!     println!("now in {}", trigger.event().to);
//! }
//!
//! world.add_observer(on_phase_change);
//! ```

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{error, info};

use crate::components::timeline::ChangeCause;
use crate::resources::faults::TimelineFaults;
use crate::resources::gamestate::{GameStates, NextGameState};

/// Event emitted when a scene script changes phase.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct PhaseChangeEvent {
    /// Entity owning the scene script.
    pub entity: Entity,
    /// Previous phase, `None` on the first step.
    pub from: Option<String>,
    pub to: String,
    pub cause: ChangeCause,
}

/// Event emitted once when a scene script's timeline aborts.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct TimelineFaultEvent {
    pub entity: Entity,
    pub script: String,
    pub message: String,
}

/// Log phase changes.
pub fn observe_phase_change(trigger: On<PhaseChangeEvent>) {
    let event = trigger.event();
    info!(
        "Phase {:?} -> '{}' ({:?})",
        event.from.as_deref(),
        event.to,
        event.cause
    );
}

/// Record the fault and request the game to quit.
pub fn observe_timeline_fault(
    trigger: On<TimelineFaultEvent>,
    mut faults: ResMut<TimelineFaults>,
    mut next_state: ResMut<NextGameState>,
) {
    let event = trigger.event();
    error!("Timeline '{}' aborted: {}", event.script, event.message);
    faults.messages.push(event.message.clone());
    next_state.set(GameStates::Quitting);
}
