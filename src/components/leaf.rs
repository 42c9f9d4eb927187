use bevy_ecs::prelude::Component;

/// A leaf on the playfield.
///
/// `order` is the spawn index inside its scene; scripted phases address
/// leaves by it. A collected leaf is hidden and ignored by the blower and
/// the sweeper.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Leaf {
    pub order: usize,
    pub collected: bool,
}

impl Leaf {
    pub fn new(order: usize) -> Self {
        Self {
            order,
            collected: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.collected
    }
}
