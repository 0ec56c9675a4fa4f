use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Straight-flying projectile.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Bullet {
    /// Displacement per frame.
    pub velocity: Vec2,
    /// Remove the bullet once its local position leaves the canvas.
    pub destroy_out_of_canvas: bool,
}

impl Bullet {
    pub fn new(velocity: Vec2) -> Self {
        Self {
            velocity,
            destroy_out_of_canvas: true,
        }
    }
}
