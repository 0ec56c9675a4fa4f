use bevy_ecs::prelude::Component;

/// Local rotation in radians, applied after the entity's translation.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Direction {
    pub radians: f32,
}
