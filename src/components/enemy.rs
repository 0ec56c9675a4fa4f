use bevy_ecs::prelude::Component;
use glam::Vec2;

pub const MIN_ENEMY_SPEED: f32 = 0.1;
pub const MAX_ENEMY_SPEED: f32 = 0.9;
pub const DEFAULT_ENEMY_RADIUS: f32 = 10.0;

/// Chaser that walks toward the player.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Enemy {
    /// Distance covered per frame.
    pub speed: f32,
    /// Half the side of the square hit region.
    pub radius: f32,
}

impl Enemy {
    /// Build an enemy from a raw speed sample, clamped to
    /// `[MIN_ENEMY_SPEED, MAX_ENEMY_SPEED]`.
    pub fn with_sampled_speed(sample: f32) -> Self {
        Self {
            speed: sample.clamp(MIN_ENEMY_SPEED, MAX_ENEMY_SPEED),
            radius: DEFAULT_ENEMY_RADIUS,
        }
    }

    /// Strict axis-aligned containment of `point` in the square of side
    /// `2 * radius` centred on `center`.
    pub fn hit_by(&self, center: Vec2, point: Vec2) -> bool {
        point.x > center.x - self.radius
            && point.x < center.x + self.radius
            && point.y > center.y - self.radius
            && point.y < center.y + self.radius
    }
}
