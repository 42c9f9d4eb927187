//! Game systems.
//!
//! Submodules overview
//! - [`blower`] – apply the blower cone to leaves, ramp its sound, report the jet
//! - [`gamestate`] – check for pending state transitions, intro input
//! - [`messages`] – advance buffered message queues once per frame
//! - [`movement`] – integrate positions from rigid body velocities and drag
//! - [`player`] – translate input into facing, velocity and blower trigger
//! - [`scale`] – shrink oversized intro leaves
//! - [`sweeper`] – move, collect and run over the player
//! - [`time`] – update simulation time
//! - [`timeline`] – step scene scripts and apply their commands
//! - [`timer`] – advance timers and fire their events

pub mod blower;
pub mod gamestate;
pub mod messages;
pub mod movement;
pub mod player;
pub mod scale;
pub mod sweeper;
pub mod time;
pub mod timeline;
pub mod timer;
