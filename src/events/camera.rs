use bevy_ecs::message::Message;

/// Request for the renderer to shake the camera.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraShake {
    pub millis: u64,
}
