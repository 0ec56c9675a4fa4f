//! Local position of an entity.
//!
//! When the entity has a [`ChildOf`](bevy_ecs::hierarchy::ChildOf) parent the
//! position is relative to that parent. Use
//! [`global_position`](crate::systems::scenegraph::global_position) to resolve
//! it in root coordinates.

use bevy_ecs::prelude::Component;
use glam::Vec2;

#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct MapPosition {
    pub pos: Vec2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }

    /// Overwrite both coordinates.
    pub fn set(&mut self, x: f32, y: f32) {
        self.pos = Vec2::new(x, y);
    }
}
