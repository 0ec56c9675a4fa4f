use bevy_ecs::prelude::Component;

/// Declared size of an entity. Not used for collision.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Dimension {
    pub width: f32,
    pub height: f32,
}

impl Dimension {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
