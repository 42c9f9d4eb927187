//! Leaf blower simulation library.
//!
//! The simulation core of a small arcade game: a scripted phase timeline for
//! the intro, a cone-shaped force field that blows leaves around and a road
//! sweeper that collects them. Everything runs on `bevy_ecs`; rendering,
//! audio playback and input polling are left to a host, which receives
//! decisions as buffered messages.
//!
//! This module exposes the ECS components, resources, systems, and events
//! for use in integration tests and as a reusable library.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
