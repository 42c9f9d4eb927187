//! Buffered message maintenance.
//!
//! `Messages<T>` double-buffers its contents; calling `update` once per frame
//! drops messages older than two frames so readers that run every frame see
//! each message exactly once.
use bevy_ecs::prelude::*;

use crate::events::audio::AudioCmd;
use crate::events::camera::CameraShake;
use crate::events::collect::LeafCollected;
use crate::events::emission::BlowerEmission;

pub fn update_game_messages(
    mut audio: ResMut<Messages<AudioCmd>>,
    mut emissions: ResMut<Messages<BlowerEmission>>,
    mut collected: ResMut<Messages<LeafCollected>>,
    mut shakes: ResMut<Messages<CameraShake>>,
) {
    audio.update();
    emissions.update();
    collected.update();
    shakes.update();
}
