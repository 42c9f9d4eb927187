//! Sound cues for the audio backend.
//!
//! The simulation only decides *what* should sound; a host forwards these
//! messages to whatever plays audio. The headless runner just logs them.

use bevy_ecs::message::Message;

/// Blower motor loop.
pub const LOOP_BLOWER: &str = "cleaner";
/// Sweeper engine loop.
pub const LOOP_SWEEPER: &str = "sweeper-engine";
/// Leaf sucked up by the sweeper.
pub const FX_SLURP: &str = "slurp";
/// Player run over by the sweeper.
pub const FX_PLAYER_AH: &str = "player-ah";

#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioCmd {
    PlayFx { id: String },
    /// (Re)start a looping sound from the beginning.
    PlayLoop { id: String },
    StopLoop { id: String },
    /// Volume in `[0, 1]`, playback rate as a multiplier.
    LoopVolume { id: String, volume: f32, rate: f32 },
}

impl AudioCmd {
    pub fn fx(id: &str) -> Self {
        AudioCmd::PlayFx { id: id.to_string() }
    }

    pub fn play_loop(id: &str) -> Self {
        AudioCmd::PlayLoop { id: id.to_string() }
    }

    pub fn stop_loop(id: &str) -> Self {
        AudioCmd::StopLoop { id: id.to_string() }
    }

    pub fn loop_volume(id: &str, volume: f32, rate: f32) -> Self {
        AudioCmd::LoopVolume {
            id: id.to_string(),
            volume,
            rate,
        }
    }
}
