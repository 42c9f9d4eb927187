//! Record of aborted scene timelines.

use bevy_ecs::prelude::Resource;

/// Messages of every timeline fault seen so far. The headless runner exits
/// with a failure status when this is not empty.
#[derive(Resource, Debug, Clone, Default)]
pub struct TimelineFaults {
    pub messages: Vec<String>,
}

impl TimelineFaults {
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
