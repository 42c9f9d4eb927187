//! Scripted timeline ("flow") of named, timed phases.
//!
//! A [`Timeline`] is an ordered registry of phases plus a cursor pointing at
//! the active one. Each phase has a duration (or is indefinite), a static
//! `next` phase used when the duration runs out, and optional callbacks:
//!
//! - `on_start` – called once when the phase is entered
//! - `on_tick` – called on every [`Timeline::step`] while the phase is active;
//!   may return [`Transition::To`] to request a dynamic transition
//! - `on_end` – called once when the phase is left
//!
//! Callbacks receive a mutable context `C` chosen by the owner of the
//! timeline. The ECS layer uses [`ScriptContext`] to queue commands that a
//! system applies afterwards; tests use plain recorders.
//!
//! # Step semantics
//!
//! Each call to [`Timeline::step`] makes exactly one decision:
//!
//! 1. Before the first step no phase is active: the first registered phase
//!    is entered.
//! 2. A dynamic transition requested on the previous tick is applied.
//! 3. Otherwise, when the active phase has a finite duration and
//!    `now - start > duration`, the static `next` phase is entered.
//! 4. `on_tick(elapsed, repeat)` runs for the active phase. A returned
//!    [`Transition::To`] is validated and kept for the next step.
//! 5. The repeat index is incremented once.
//!
//! Entering a phase resets its start time to `now` and its repeat index to 0,
//! so the first `on_tick` of every phase sees `repeat == 0`.
//!
//! Transition targets that do not exist are configuration errors. The
//! timeline aborts and every later step returns the same error.
//!
//! # Example
//!
//! ```
//! use leafblower::components::timeline::{PhaseDuration, Timeline, Transition};
//!
//! let mut timeline: Timeline<Vec<String>> = Timeline::new();
//! timeline
//!     .register_phase("idle", PhaseDuration::Finite(1000), "run")
//!     .unwrap()
//!     .on_start(|log: &mut Vec<String>| log.push("idle".into()));
//! timeline
//!     .register_phase("run", PhaseDuration::Indefinite, "idle")
//!     .unwrap()
//!     .on_tick(|_log: &mut Vec<String>, _elapsed, repeat| {
//!         if repeat == 2 { Transition::to("idle") } else { Transition::Stay }
//!     });
//!
//! let mut log = Vec::new();
//! timeline.step(0, &mut log).unwrap();
//! assert_eq!(timeline.active_phase(), Some("idle"));
//! ```
//!
//! [`ScriptContext`]: crate::components::scenescript::ScriptContext

use log::debug;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Timestamps and durations in milliseconds.
pub type Millis = u64;

/// Duration value that marks a phase as indefinite in data files.
pub const INDEFINITE_SENTINEL: i64 = -1;

/// Errors raised by a misconfigured timeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimelineError {
    #[error("phase `{0}` is registered more than once")]
    DuplicatePhase(String),
    #[error("phase `{from}` transitions to unknown phase `{to}`")]
    UnknownPhase { from: String, to: String },
    #[error("timeline has no phases")]
    Empty,
    #[error("invalid phase duration {0} ms (only -1 means indefinite)")]
    InvalidDuration(i64),
    #[error("clock went backwards: now={now} ms is before the previous step at {previous} ms")]
    ClockWentBackwards { now: Millis, previous: Millis },
}

/// How long a phase lasts before its static transition fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseDuration {
    /// Expires once more than this many milliseconds have elapsed.
    Finite(Millis),
    /// Never expires; only a dynamic transition leaves the phase.
    Indefinite,
}

impl PhaseDuration {
    /// Parse a raw millisecond value where [`INDEFINITE_SENTINEL`] means
    /// indefinite. Any other negative value is rejected.
    pub fn from_millis(ms: i64) -> Result<Self, TimelineError> {
        match ms {
            INDEFINITE_SENTINEL => Ok(PhaseDuration::Indefinite),
            ms if ms >= 0 => Ok(PhaseDuration::Finite(ms as Millis)),
            ms => Err(TimelineError::InvalidDuration(ms)),
        }
    }

    fn has_expired(&self, elapsed: Millis) -> bool {
        match self {
            PhaseDuration::Finite(duration) => elapsed > *duration,
            PhaseDuration::Indefinite => false,
        }
    }
}

/// Result of an `on_tick` callback.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Transition {
    /// Remain in the current phase.
    #[default]
    Stay,
    /// Leave the current phase for the named one on the next step.
    To(String),
}

impl Transition {
    /// Shorthand for `Transition::To(name.into())`.
    pub fn to(name: impl Into<String>) -> Self {
        Transition::To(name.into())
    }
}

/// Why the active phase changed during a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    /// First step of the timeline.
    Started,
    /// The outgoing phase ran out of time.
    Expired,
    /// The outgoing phase requested the transition from `on_tick`.
    Requested,
}

/// Description of a phase change performed by [`Timeline::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseChange {
    pub from: Option<String>,
    pub to: String,
    pub cause: ChangeCause,
}

/// Callback run on phase entry or exit.
pub type HookCallback<C> = Box<dyn FnMut(&mut C) + Send + Sync>;

/// Callback run on every tick: `(context, elapsed_ms_in_phase, repeat_index)`.
pub type TickCallback<C> = Box<dyn FnMut(&mut C, Millis, usize) -> Transition + Send + Sync>;

struct PhaseDef<C> {
    name: String,
    duration: PhaseDuration,
    next: String,
    on_start: Option<HookCallback<C>>,
    on_tick: Option<TickCallback<C>>,
    on_end: Option<HookCallback<C>>,
}

/// Builder handle returned by [`Timeline::register_phase`] to attach callbacks.
pub struct PhaseHandle<'t, C> {
    phase: &'t mut PhaseDef<C>,
}

impl<C> PhaseHandle<'_, C> {
    /// Set the callback invoked once when the phase is entered.
    pub fn on_start(self, callback: impl FnMut(&mut C) + Send + Sync + 'static) -> Self {
        self.phase.on_start = Some(Box::new(callback));
        self
    }

    /// Set the callback invoked on every step while the phase is active.
    pub fn on_tick(
        self,
        callback: impl FnMut(&mut C, Millis, usize) -> Transition + Send + Sync + 'static,
    ) -> Self {
        self.phase.on_tick = Some(Box::new(callback));
        self
    }

    /// Set the callback invoked once when the phase is left.
    pub fn on_end(self, callback: impl FnMut(&mut C) + Send + Sync + 'static) -> Self {
        self.phase.on_end = Some(Box::new(callback));
        self
    }

    /// Name of the phase being configured.
    pub fn name(&self) -> &str {
        &self.phase.name
    }
}

#[derive(Debug, Clone, Copy)]
struct Cursor {
    index: usize,
    start: Millis,
    repeat: usize,
}

/// Sequencer over named, timed phases.
pub struct Timeline<C> {
    phases: Vec<PhaseDef<C>>,
    by_name: FxHashMap<String, usize>,
    cursor: Option<Cursor>,
    pending: Option<usize>,
    fault: Option<TimelineError>,
    /// `now` of the last accepted step.
    last_now: Option<Millis>,
}

impl<C> Default for Timeline<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Timeline<C> {
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self {
            phases: Vec::new(),
            by_name: FxHashMap::default(),
            cursor: None,
            pending: None,
            fault: None,
            last_now: None,
        }
    }

    /// Build a timeline from a data layout. Phases have no callbacks yet;
    /// attach them with [`Timeline::phase_mut`].
    pub fn from_layout(layout: &TimelineLayout) -> Result<Self, TimelineError> {
        let mut timeline = Self::new();
        for phase in &layout.phases {
            let duration = PhaseDuration::from_millis(phase.duration)?;
            timeline.register_phase(phase.name.clone(), duration, phase.next.clone())?;
        }
        Ok(timeline)
    }

    /// Register a phase. The first registered phase is the entry point.
    ///
    /// `next` is checked when the timeline first steps, so phases may be
    /// registered in any order.
    pub fn register_phase(
        &mut self,
        name: impl Into<String>,
        duration: PhaseDuration,
        next: impl Into<String>,
    ) -> Result<PhaseHandle<'_, C>, TimelineError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TimelineError::DuplicatePhase(name));
        }
        let index = self.phases.len();
        self.by_name.insert(name.clone(), index);
        self.phases.push(PhaseDef {
            name,
            duration,
            next: next.into(),
            on_start: None,
            on_tick: None,
            on_end: None,
        });
        Ok(PhaseHandle {
            phase: &mut self.phases[index],
        })
    }

    /// Handle to an already registered phase, to attach callbacks.
    pub fn phase_mut(&mut self, name: &str) -> Option<PhaseHandle<'_, C>> {
        let index = *self.by_name.get(name)?;
        Some(PhaseHandle {
            phase: &mut self.phases[index],
        })
    }

    /// Name of the active phase, `None` before the first step.
    pub fn active_phase(&self) -> Option<&str> {
        self.cursor
            .map(|cursor| self.phases[cursor.index].name.as_str())
    }

    /// Ticks already spent in the active phase.
    pub fn repeat_index(&self) -> usize {
        self.cursor.map(|cursor| cursor.repeat).unwrap_or(0)
    }

    /// Timestamp at which the active phase was entered.
    pub fn phase_start(&self) -> Option<Millis> {
        self.cursor.map(|cursor| cursor.start)
    }

    /// Phase requested by the last `on_tick`, applied on the next step.
    pub fn pending_transition(&self) -> Option<&str> {
        self.pending.map(|index| self.phases[index].name.as_str())
    }

    /// The error that aborted this timeline, if any.
    pub fn fault(&self) -> Option<&TimelineError> {
        self.fault.as_ref()
    }

    /// Number of registered phases.
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// True when no phase is registered.
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Check that the timeline has phases and every static `next` exists.
    pub fn validate(&self) -> Result<(), TimelineError> {
        if self.phases.is_empty() {
            return Err(TimelineError::Empty);
        }
        for phase in &self.phases {
            if !self.by_name.contains_key(&phase.next) {
                return Err(TimelineError::UnknownPhase {
                    from: phase.name.clone(),
                    to: phase.next.clone(),
                });
            }
        }
        Ok(())
    }

    /// Advance the timeline by one tick at time `now`.
    ///
    /// Returns the phase change performed by this step, if any. `now` must
    /// never decrease between calls.
    pub fn step(&mut self, now: Millis, ctx: &mut C) -> Result<Option<PhaseChange>, TimelineError> {
        if let Some(fault) = &self.fault {
            return Err(fault.clone());
        }
        if let Some(previous) = self.last_now.filter(|&previous| now < previous) {
            return Err(self.abort(TimelineError::ClockWentBackwards { now, previous }));
        }
        self.last_now = Some(now);

        let change = match self.cursor {
            None => {
                if let Err(err) = self.validate() {
                    return Err(self.abort(err));
                }
                self.enter(0, now, ctx);
                Some(PhaseChange {
                    from: None,
                    to: self.phases[0].name.clone(),
                    cause: ChangeCause::Started,
                })
            }
            Some(cursor) => {
                if let Some(target) = self.pending.take() {
                    Some(self.switch(cursor.index, target, now, ChangeCause::Requested, ctx))
                } else if self.phases[cursor.index]
                    .duration
                    .has_expired(now - cursor.start)
                {
                    let target = match self.lookup(cursor.index, &self.phases[cursor.index].next) {
                        Ok(target) => target,
                        Err(err) => return Err(self.abort(err)),
                    };
                    Some(self.switch(cursor.index, target, now, ChangeCause::Expired, ctx))
                } else {
                    None
                }
            }
        };

        let Some(cursor) = self.cursor else {
            // enter() always sets the cursor
            return Ok(change);
        };
        let elapsed = now - cursor.start;
        let transition = match self.phases[cursor.index].on_tick.as_mut() {
            Some(callback) => callback(ctx, elapsed, cursor.repeat),
            None => Transition::Stay,
        };
        if let Transition::To(name) = transition {
            match self.lookup(cursor.index, &name) {
                Ok(target) => {
                    debug!(
                        "Phase '{}' requested transition to '{}'",
                        self.phases[cursor.index].name, name
                    );
                    self.pending = Some(target);
                }
                Err(err) => return Err(self.abort(err)),
            }
        }

        if let Some(cursor) = self.cursor.as_mut() {
            cursor.repeat += 1;
        }
        Ok(change)
    }

    fn lookup(&self, from: usize, name: &str) -> Result<usize, TimelineError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| TimelineError::UnknownPhase {
                from: self.phases[from].name.clone(),
                to: name.to_string(),
            })
    }

    fn switch(
        &mut self,
        from: usize,
        to: usize,
        now: Millis,
        cause: ChangeCause,
        ctx: &mut C,
    ) -> PhaseChange {
        if let Some(callback) = self.phases[from].on_end.as_mut() {
            callback(ctx);
        }
        self.enter(to, now, ctx);
        PhaseChange {
            from: Some(self.phases[from].name.clone()),
            to: self.phases[to].name.clone(),
            cause,
        }
    }

    fn enter(&mut self, index: usize, now: Millis, ctx: &mut C) {
        self.cursor = Some(Cursor {
            index,
            start: now,
            repeat: 0,
        });
        debug!("Entering phase '{}' at {} ms", self.phases[index].name, now);
        if let Some(callback) = self.phases[index].on_start.as_mut() {
            callback(ctx);
        }
    }

    fn abort(&mut self, err: TimelineError) -> TimelineError {
        self.fault = Some(err.clone());
        err
    }
}

impl<C> fmt::Debug for Timeline<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field(
                "phases",
                &self.phases.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            )
            .field("active", &self.active_phase())
            .field("start", &self.phase_start())
            .field("repeat", &self.repeat_index())
            .field("pending", &self.pending_transition())
            .field("fault", &self.fault)
            .finish()
    }
}

/// One phase as described in a timeline data file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PhaseLayout {
    pub name: String,
    /// Milliseconds, or [`INDEFINITE_SENTINEL`].
    pub duration: i64,
    pub next: String,
}

/// Phase list of a scripted scene, loaded from JSON.
///
/// ```json
/// { "phases": [ { "name": "create", "duration": 10000, "next": "move" } ] }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TimelineLayout {
    pub phases: Vec<PhaseLayout>,
}

impl TimelineLayout {
    /// Parse a layout from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a layout from a JSON file at the specified path.
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let file_content = std::fs::read_to_string(path)?;
        let layout: TimelineLayout = serde_json::from_str(&file_content)?;
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Log = Vec<String>;

    fn recorder(timeline: &mut Timeline<Log>, name: &str, duration: PhaseDuration, next: &str) {
        let start = format!("start:{name}");
        let end = format!("end:{name}");
        let tick = format!("tick:{name}");
        timeline
            .register_phase(name, duration, next)
            .unwrap()
            .on_start(move |log: &mut Log| log.push(start.clone()))
            .on_tick(move |log: &mut Log, _, repeat| {
                log.push(format!("{tick}#{repeat}"));
                Transition::Stay
            })
            .on_end(move |log: &mut Log| log.push(end.clone()));
    }

    fn active_after(timeline: &mut Timeline<Log>, times: &[Millis]) -> Vec<String> {
        let mut log = Log::new();
        times
            .iter()
            .map(|&t| {
                timeline.step(t, &mut log).unwrap();
                timeline.active_phase().unwrap().to_string()
            })
            .collect()
    }

    #[test]
    fn test_duration_from_millis() {
        assert_eq!(PhaseDuration::from_millis(0), Ok(PhaseDuration::Finite(0)));
        assert_eq!(
            PhaseDuration::from_millis(2500),
            Ok(PhaseDuration::Finite(2500))
        );
        assert_eq!(
            PhaseDuration::from_millis(-1),
            Ok(PhaseDuration::Indefinite)
        );
        assert_eq!(
            PhaseDuration::from_millis(-5),
            Err(TimelineError::InvalidDuration(-5))
        );
    }

    #[test]
    fn test_no_active_phase_before_first_step() {
        let mut timeline: Timeline<Log> = Timeline::new();
        recorder(&mut timeline, "a", PhaseDuration::Finite(10), "a");
        assert_eq!(timeline.active_phase(), None);
        assert_eq!(timeline.phase_start(), None);
    }

    #[test]
    fn test_phase_expiry_sequence() {
        let mut timeline: Timeline<Log> = Timeline::new();
        recorder(&mut timeline, "A", PhaseDuration::Finite(1000), "B");
        recorder(&mut timeline, "B", PhaseDuration::Finite(1000), "A");
        let phases = active_after(&mut timeline, &[0, 500, 1100, 1600, 2200]);
        assert_eq!(phases, vec!["A", "A", "B", "B", "A"]);
    }

    #[test]
    fn test_expiry_is_strictly_greater_than_duration() {
        let mut timeline: Timeline<Log> = Timeline::new();
        recorder(&mut timeline, "A", PhaseDuration::Finite(1000), "B");
        recorder(&mut timeline, "B", PhaseDuration::Finite(1000), "A");
        let phases = active_after(&mut timeline, &[0, 1000, 1001]);
        assert_eq!(phases, vec!["A", "A", "B"]);
    }

    #[test]
    fn test_callback_order_on_expiry() {
        let mut timeline: Timeline<Log> = Timeline::new();
        recorder(&mut timeline, "A", PhaseDuration::Finite(100), "B");
        recorder(&mut timeline, "B", PhaseDuration::Finite(100), "A");
        let mut log = Log::new();
        for t in [0, 50, 150] {
            timeline.step(t, &mut log).unwrap();
        }
        assert_eq!(
            log,
            vec![
                "start:A", "tick:A#0", "tick:A#1", "end:A", "start:B", "tick:B#0"
            ]
        );
    }

    #[test]
    fn test_step_reports_phase_changes() {
        let mut timeline: Timeline<Log> = Timeline::new();
        recorder(&mut timeline, "A", PhaseDuration::Finite(100), "B");
        recorder(&mut timeline, "B", PhaseDuration::Indefinite, "A");
        let mut log = Log::new();
        let first = timeline.step(0, &mut log).unwrap().unwrap();
        assert_eq!(first.from, None);
        assert_eq!(first.to, "A");
        assert_eq!(first.cause, ChangeCause::Started);
        assert_eq!(timeline.step(50, &mut log).unwrap(), None);
        let expired = timeline.step(101, &mut log).unwrap().unwrap();
        assert_eq!(expired.from.as_deref(), Some("A"));
        assert_eq!(expired.to, "B");
        assert_eq!(expired.cause, ChangeCause::Expired);
    }

    #[test]
    fn test_elapsed_and_repeat_passed_to_tick() {
        let mut timeline: Timeline<Vec<(Millis, usize)>> = Timeline::new();
        timeline
            .register_phase("only", PhaseDuration::Indefinite, "only")
            .unwrap()
            .on_tick(|seen: &mut Vec<(Millis, usize)>, elapsed, repeat| {
                seen.push((elapsed, repeat));
                Transition::Stay
            });
        let mut seen = Vec::new();
        for t in [100, 116, 133, 150] {
            timeline.step(t, &mut seen).unwrap();
        }
        assert_eq!(seen, vec![(0, 0), (16, 1), (33, 2), (50, 3)]);
        assert_eq!(timeline.repeat_index(), 4);
    }

    #[test]
    fn test_dynamic_transition_overrides_static_next() {
        let mut timeline: Timeline<Log> = Timeline::new();
        timeline
            .register_phase("start", PhaseDuration::Finite(10_000), "X")
            .unwrap()
            .on_tick(|_: &mut Log, _, repeat| {
                if repeat == 3 {
                    Transition::to("Y")
                } else {
                    Transition::Stay
                }
            });
        recorder(&mut timeline, "X", PhaseDuration::Indefinite, "X");
        recorder(&mut timeline, "Y", PhaseDuration::Indefinite, "Y");

        let mut log = Log::new();
        for t in [0, 10, 20] {
            timeline.step(t, &mut log).unwrap();
            assert_eq!(timeline.active_phase(), Some("start"));
        }
        // 4th tick requests Y; the tick still belongs to "start"
        timeline.step(30, &mut log).unwrap();
        assert_eq!(timeline.active_phase(), Some("start"));
        assert_eq!(timeline.pending_transition(), Some("Y"));

        let change = timeline.step(40, &mut log).unwrap().unwrap();
        assert_eq!(change.to, "Y");
        assert_eq!(change.cause, ChangeCause::Requested);
        assert_eq!(timeline.active_phase(), Some("Y"));
        assert_eq!(log, vec!["start:Y", "tick:Y#0"]);
    }

    #[test]
    fn test_pending_transition_wins_over_expiry() {
        let mut timeline: Timeline<Log> = Timeline::new();
        timeline
            .register_phase("A", PhaseDuration::Finite(100), "X")
            .unwrap()
            .on_tick(|_: &mut Log, _, _| Transition::to("Y"));
        recorder(&mut timeline, "X", PhaseDuration::Indefinite, "X");
        recorder(&mut timeline, "Y", PhaseDuration::Indefinite, "Y");
        let phases = active_after(&mut timeline, &[0, 5000]);
        assert_eq!(phases, vec!["A", "Y"]);
    }

    #[test]
    fn test_on_end_runs_on_outgoing_phase_for_dynamic_transition() {
        let mut timeline: Timeline<Log> = Timeline::new();
        timeline
            .register_phase("A", PhaseDuration::Indefinite, "A")
            .unwrap()
            .on_tick(|_: &mut Log, _, _| Transition::to("B"))
            .on_end(|log: &mut Log| log.push("end:A".into()));
        recorder(&mut timeline, "B", PhaseDuration::Indefinite, "B");
        let mut log = Log::new();
        timeline.step(0, &mut log).unwrap();
        timeline.step(1, &mut log).unwrap();
        assert_eq!(log, vec!["end:A", "start:B", "tick:B#0"]);
    }

    #[test]
    fn test_indefinite_phase_never_expires() {
        let mut timeline: Timeline<Log> = Timeline::new();
        recorder(&mut timeline, "forever", PhaseDuration::Indefinite, "other");
        recorder(&mut timeline, "other", PhaseDuration::Finite(1), "forever");
        let phases = active_after(&mut timeline, &[0, 1_000, 1_000_000]);
        assert_eq!(phases, vec!["forever", "forever", "forever"]);
    }

    #[test]
    fn test_self_transition_restarts_phase() {
        let mut timeline: Timeline<Log> = Timeline::new();
        recorder(&mut timeline, "loop", PhaseDuration::Finite(100), "loop");
        let mut log = Log::new();
        timeline.step(0, &mut log).unwrap();
        timeline.step(50, &mut log).unwrap();
        timeline.step(200, &mut log).unwrap();
        assert_eq!(timeline.phase_start(), Some(200));
        assert_eq!(log.last().map(String::as_str), Some("tick:loop#0"));
    }

    #[test]
    fn test_end_to_end_intro_shape() {
        let mut timeline: Timeline<Log> = Timeline::new();
        recorder(&mut timeline, "create", PhaseDuration::Finite(3000), "move");
        timeline
            .register_phase("move", PhaseDuration::Indefinite, "wait")
            .unwrap()
            .on_tick(|_: &mut Log, _, repeat| {
                if repeat >= 1 {
                    Transition::to("wait")
                } else {
                    Transition::Stay
                }
            });
        recorder(&mut timeline, "wait", PhaseDuration::Finite(2000), "return");
        recorder(&mut timeline, "return", PhaseDuration::Finite(3000), "move");

        let phases = active_after(&mut timeline, &[0, 1000, 2000, 3500, 4000, 6500, 7000]);
        assert_eq!(
            phases,
            vec!["create", "create", "create", "move", "move", "wait", "wait"]
        );
    }

    #[test]
    fn test_determinism() {
        let build = || {
            let mut timeline: Timeline<Log> = Timeline::new();
            recorder(&mut timeline, "A", PhaseDuration::Finite(70), "B");
            recorder(&mut timeline, "B", PhaseDuration::Finite(30), "A");
            timeline
        };
        let times: Vec<Millis> = (0..50).map(|i| i * 16).collect();
        let run = |mut timeline: Timeline<Log>| {
            let mut log = Log::new();
            for &t in &times {
                timeline.step(t, &mut log).unwrap();
            }
            log
        };
        assert_eq!(run(build()), run(build()));
    }

    #[test]
    fn test_duplicate_phase_rejected() {
        let mut timeline: Timeline<Log> = Timeline::new();
        recorder(&mut timeline, "A", PhaseDuration::Finite(1), "A");
        let err = timeline
            .register_phase("A", PhaseDuration::Finite(1), "A")
            .err();
        assert_eq!(err, Some(TimelineError::DuplicatePhase("A".into())));
    }

    #[test]
    fn test_empty_timeline_fails_on_step() {
        let mut timeline: Timeline<Log> = Timeline::new();
        assert_eq!(timeline.step(0, &mut Log::new()), Err(TimelineError::Empty));
    }

    #[test]
    fn test_dangling_static_next_fails_on_first_step_and_aborts() {
        let mut timeline: Timeline<Log> = Timeline::new();
        recorder(&mut timeline, "A", PhaseDuration::Finite(10), "missing");
        let mut log = Log::new();
        let expected = TimelineError::UnknownPhase {
            from: "A".into(),
            to: "missing".into(),
        };
        assert_eq!(timeline.step(0, &mut log), Err(expected.clone()));
        assert_eq!(timeline.fault(), Some(&expected));
        // aborted timelines keep failing and never run callbacks
        assert_eq!(timeline.step(100, &mut log), Err(expected));
        assert!(log.is_empty());
        assert_eq!(timeline.active_phase(), None);
    }

    #[test]
    fn test_dangling_dynamic_target_aborts() {
        let mut timeline: Timeline<Log> = Timeline::new();
        timeline
            .register_phase("A", PhaseDuration::Indefinite, "A")
            .unwrap()
            .on_tick(|_: &mut Log, _, _| Transition::to("nowhere"));
        let err = timeline.step(0, &mut Log::new()).unwrap_err();
        assert_eq!(
            err,
            TimelineError::UnknownPhase {
                from: "A".into(),
                to: "nowhere".into()
            }
        );
        assert!(timeline.step(1, &mut Log::new()).is_err());
    }

    #[test]
    fn test_empty_phase_name_is_a_valid_target() {
        let mut timeline: Timeline<Log> = Timeline::new();
        timeline
            .register_phase("A", PhaseDuration::Indefinite, "A")
            .unwrap()
            .on_tick(|_: &mut Log, _, _| Transition::to(""));
        recorder(&mut timeline, "", PhaseDuration::Indefinite, "");
        let phases = active_after(&mut timeline, &[0, 1]);
        assert_eq!(phases, vec!["A", ""]);
    }

    #[test]
    fn test_clock_going_backwards_aborts() {
        let mut timeline: Timeline<Log> = Timeline::new();
        recorder(&mut timeline, "A", PhaseDuration::Finite(10), "A");
        let mut log = Log::new();
        timeline.step(100, &mut log).unwrap();
        assert_eq!(
            timeline.step(50, &mut log),
            Err(TimelineError::ClockWentBackwards {
                now: 50,
                previous: 100
            })
        );
    }

    #[test]
    fn test_clock_going_backwards_within_a_phase_aborts() {
        let mut timeline: Timeline<Log> = Timeline::new();
        recorder(&mut timeline, "A", PhaseDuration::Finite(1000), "A");
        let mut log = Log::new();
        timeline.step(100, &mut log).unwrap();
        timeline.step(200, &mut log).unwrap();
        let ticks_before = log.len();
        let err = TimelineError::ClockWentBackwards {
            now: 150,
            previous: 200,
        };
        assert_eq!(timeline.step(150, &mut log), Err(err.clone()));
        // no callback saw the earlier time, and the timeline stays aborted
        assert_eq!(log.len(), ticks_before);
        assert_eq!(timeline.fault(), Some(&err));
        assert_eq!(timeline.step(300, &mut log), Err(err));
    }

    #[test]
    fn test_repeated_now_is_accepted() {
        let mut timeline: Timeline<Log> = Timeline::new();
        recorder(&mut timeline, "A", PhaseDuration::Finite(1000), "A");
        let mut log = Log::new();
        timeline.step(100, &mut log).unwrap();
        assert!(timeline.step(100, &mut log).is_ok());
        assert_eq!(timeline.repeat_index(), 2);
    }

    #[test]
    fn test_layout_from_json() {
        let json = r#"{ "phases": [
            { "name": "create", "duration": 3000, "next": "move" },
            { "name": "move", "duration": -1, "next": "create" }
        ] }"#;
        let layout = TimelineLayout::from_json_str(json).unwrap();
        let mut timeline: Timeline<Log> = Timeline::from_layout(&layout).unwrap();
        assert_eq!(timeline.len(), 2);
        assert!(timeline.phase_mut("move").is_some());
        assert!(timeline.phase_mut("wait").is_none());
        assert!(timeline.validate().is_ok());
    }

    #[test]
    fn test_layout_with_bad_duration_rejected() {
        let layout = TimelineLayout {
            phases: vec![PhaseLayout {
                name: "a".into(),
                duration: -20,
                next: "a".into(),
            }],
        };
        let result: Result<Timeline<Log>, _> = Timeline::from_layout(&layout);
        assert_eq!(result.err(), Some(TimelineError::InvalidDuration(-20)));
    }
}
