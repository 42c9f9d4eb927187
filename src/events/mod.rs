//! Event types and observers.
//!
//! Observer events (`Event`, triggered) carry state changes that need an
//! immediate reaction; buffered messages (`Message`) carry per-frame output
//! for the host.
//!
//! Submodules:
//! - [`audio`] – sound cues for the audio backend
//! - [`camera`] – camera shake requests
//! - [`collect`] – leaves picked up by the sweeper
//! - [`emission`] – particle jet of a blowing agent
//! - [`gamestate`] – state transition notifications for the high-level game flow
//! - [`phase`] – timeline phase changes and faults
//! - [`timer`] – timer expirations
pub mod audio;
pub mod camera;
pub mod collect;
pub mod emission;
pub mod gamestate;
pub mod phase;
pub mod timer;
