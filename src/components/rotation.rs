use bevy_ecs::prelude::Component;

/// Facing angle in radians. 0 points along +x, growing counterclockwise in
/// math convention (clockwise on a y-down screen).
#[derive(Component, Clone, Debug, Copy, Default, PartialEq)]
pub struct Rotation {
    pub radians: f32,
}

impl Rotation {
    pub fn new(radians: f32) -> Self {
        Self { radians }
    }
}
