//! ECS resources made available to systems.
//!
//! Overview
//! - `faults` – timeline faults seen so far
//! - `gameconfig` – gameplay tuning loaded from `config.ini`
//! - `gamestate` – authoritative and pending high-level game state
//! - `input` – per-frame action state fed by the host
//! - `playfield` – playfield bounds in world units
//! - `rng` – seedable random source
//! - `score` – collected leaves and banner state
//! - `worldtime` – simulation time, delta and the millisecond clock
pub mod faults;
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod playfield;
pub mod rng;
pub mod score;
pub mod worldtime;
