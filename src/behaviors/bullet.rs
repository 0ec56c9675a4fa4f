//! Bullet behavior: fly, hit enemies, leave the canvas.

use bevy_ecs::prelude::*;
use log::debug;

use crate::canvas::Rgba;
use crate::components::behavior::EntityHooks;
use crate::components::bullet::Bullet;
use crate::components::enemy::Enemy;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::game::spawn_enemy;
use crate::resources::player::PlayerHandle;
use crate::systems::frame::FrameContext;
use crate::systems::scenegraph;

pub const TRAIL_COLOR: Rgba = Rgba::rgba(255, 0, 0, 0.5);

/// Number of enemies spawned for a kill at `score`.
pub fn respawn_count(score: u32) -> u32 {
    (score as f32 * 0.001 + 1.0).floor() as u32
}

/// Speed bonus given to enemies spawned at `score`.
pub fn speed_boost(score: u32) -> f32 {
    score as f32 * 0.01
}

/// Add one point to the player's score and return the new score.
fn award_point(world: &mut World) -> u32 {
    let Some(handle) = world.get_resource::<PlayerHandle>().copied() else {
        return 0;
    };
    match world.get_mut::<Player>(handle.0) {
        Some(mut player) => {
            player.score += 1;
            player.score
        }
        None => 0,
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BulletHooks;

impl EntityHooks for BulletHooks {
    fn before_render(&mut self, ctx: &mut FrameContext<'_>) {
        let Some(bullet) = ctx.component::<Bullet>().copied() else {
            return;
        };
        let pos = ctx.position() + bullet.velocity;
        ctx.set_position(pos);

        // Only entities sharing the bullet's parent are candidates.
        for other in scenegraph::siblings_of(ctx.world, ctx.entity) {
            if scenegraph::is_detached(ctx.world, other) {
                continue;
            }
            let Some(enemy) = ctx.world.get::<Enemy>(other).copied() else {
                continue;
            };
            let Some(center) = ctx.world.get::<MapPosition>(other).map(|p| p.pos) else {
                continue;
            };
            if !enemy.hit_by(center, pos) {
                continue;
            }
            let score = award_point(ctx.world);
            scenegraph::detach(ctx.world, other);
            debug!("bullet {:?} hit {:?}, score {}", ctx.entity, other, score);
            for _ in 0..respawn_count(score) {
                spawn_enemy(ctx.world, speed_boost(score));
            }
        }
    }

    fn render(&mut self, ctx: &mut FrameContext<'_>) {
        let Some(bullet) = ctx.component::<Bullet>().copied() else {
            return;
        };
        let canvas = &mut *ctx.canvas;
        canvas.set_stroke_style(TRAIL_COLOR);
        canvas.begin_path();
        canvas.move_to(-bullet.velocity.x, -bullet.velocity.y);
        canvas.line_to(0.0, 0.0);
        canvas.close_path();
        canvas.stroke();
    }

    fn after_render(&mut self, ctx: &mut FrameContext<'_>) {
        let Some(bullet) = ctx.component::<Bullet>().copied() else {
            return;
        };
        if !bullet.destroy_out_of_canvas {
            return;
        }
        let pos = ctx.position();
        if !ctx.canvas_size().contains(pos.x, pos.y) {
            ctx.remove_self();
        }
    }
}
