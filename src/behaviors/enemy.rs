//! Enemy behavior: chase the player.
//!
//! The chase target is the player's *local* position. Enemies nested under a
//! moved parent will aim at the wrong spot.

use std::f32::consts::TAU;

use glam::Vec2;

use crate::canvas::Rgba;
use crate::components::behavior::EntityHooks;
use crate::components::enemy::Enemy;
use crate::components::mapposition::MapPosition;
use crate::resources::player::PlayerHandle;
use crate::systems::frame::FrameContext;

/// Position after one step of `speed` from `from` toward `target`.
pub fn chase_step(from: Vec2, target: Vec2, speed: f32) -> Vec2 {
    let d = target - from;
    from + Vec2::from_angle(d.y.atan2(d.x)) * speed
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EnemyHooks;

impl EntityHooks for EnemyHooks {
    fn before_render(&mut self, ctx: &mut FrameContext<'_>) {
        let Some(enemy) = ctx.component::<Enemy>().copied() else {
            return;
        };
        let Some(target) = ctx
            .world
            .get_resource::<PlayerHandle>()
            .and_then(|handle| ctx.world.get::<MapPosition>(handle.0))
            .map(|p| p.pos)
        else {
            return;
        };
        let pos = chase_step(ctx.position(), target, enemy.speed);
        ctx.set_position(pos);
    }

    fn render(&mut self, ctx: &mut FrameContext<'_>) {
        let radius = ctx.component::<Enemy>().map(|e| e.radius).unwrap_or_default();
        let canvas = &mut *ctx.canvas;
        canvas.set_stroke_style(Rgba::BLACK);
        canvas.set_fill_style(Rgba::RED);
        canvas.begin_path();
        canvas.arc(0.0, 0.0, radius, 0.0, TAU);
        canvas.close_path();
        canvas.fill();
        canvas.stroke();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_steps_straight_toward_target() {
        let next = chase_step(Vec2::new(10.0, 0.0), Vec2::ZERO, 0.5);
        assert!(approx(next, Vec2::new(9.5, 0.0)));
    }

    #[test]
    fn test_diagonal_step_has_length_speed() {
        let from = Vec2::new(0.0, 0.0);
        let next = chase_step(from, Vec2::new(3.0, 4.0), 0.5);
        assert!(((next - from).length() - 0.5).abs() < 1e-5);
        assert!(approx(next, Vec2::new(0.3, 0.4)));
    }
}
