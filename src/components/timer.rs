//! One-shot countdown.
//!
//! Used for the "watch out" banner raised when the sweeper runs over the
//! player: the timer fires its signal once and is removed.
use bevy_ecs::prelude::Component;

/// When `elapsed` reaches `duration` the timer system triggers a
/// [`TimerEvent`](crate::events::timer::TimerEvent) carrying `signal` and
/// removes the component.
#[derive(Component, Debug, Clone)]
pub struct Timer {
    /// Seconds until the timer fires.
    pub duration: f32,
    pub elapsed: f32,
    pub signal: String,
}

impl Timer {
    pub fn new(duration: f32, signal: impl Into<String>) -> Self {
        Timer {
            duration,
            elapsed: 0.0,
            signal: signal.into(),
        }
    }

    /// Advance by `dt` seconds and report whether the timer is done.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
