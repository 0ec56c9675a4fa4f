use bevy_ecs::prelude::Component;

/// Weapon and score state of the player entity.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Player {
    pub score: u32,
    /// Frames between two shots.
    pub weapon_cooldown: u32,
    /// Frames left before the next shot is allowed.
    pub weapon_remaining_cooldown: u32,
    pub bullet_speed: f32,
}

impl Player {
    pub fn new(weapon_cooldown: u32, bullet_speed: f32) -> Self {
        Self {
            score: 0,
            weapon_cooldown,
            weapon_remaining_cooldown: 0,
            bullet_speed,
        }
    }

    pub fn can_fire(&self) -> bool {
        self.weapon_remaining_cooldown == 0
    }

    /// Count down one frame of cooldown.
    pub fn tick_cooldown(&mut self) {
        self.weapon_remaining_cooldown = self.weapon_remaining_cooldown.saturating_sub(1);
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(10, 5.0)
    }
}
