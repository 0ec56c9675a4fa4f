//! Player behavior: aim, walk, shoot.

use std::f32::consts::TAU;

use glam::Vec2;
use log::trace;

use crate::components::behavior::EntityHooks;
use crate::components::player::Player;
use crate::game::{FIRING_CUE, spawn_bullet};
use crate::resources::input::{InputState, PRIMARY_BUTTON};
use crate::systems::audio::play_cue_next_track;
use crate::systems::frame::FrameContext;

pub const PLAYER_RADIUS: f32 = 10.0;
pub const AIM_LINE_LENGTH: f32 = 15.0;

/// Unit step per held movement key.
fn movement(input: &InputState) -> Vec2 {
    let mut step = Vec2::ZERO;
    for key in &input.keyboard.held {
        match key.as_str() {
            "w" => step.y -= 1.0,
            "s" => step.y += 1.0,
            "a" => step.x -= 1.0,
            "d" => step.x += 1.0,
            _ => {}
        }
    }
    step
}

fn trigger_held(input: &InputState) -> bool {
    input.mouse.is_button_held(PRIMARY_BUTTON) || input.touch.is_active()
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PlayerHooks;

impl EntityHooks for PlayerHooks {
    fn before_render(&mut self, ctx: &mut FrameContext<'_>) {
        let Some(mut player) = ctx.component::<Player>().copied() else {
            return;
        };
        let input = ctx.input();

        player.tick_cooldown();

        if let Some(target) = input.aim_target() {
            let aim = target - ctx.global_position();
            ctx.set_direction(aim.y.atan2(aim.x));
        }

        let pos = ctx.position() + movement(&input);
        ctx.set_position(pos);

        if trigger_held(&input) && player.can_fire() {
            player.weapon_remaining_cooldown = player.weapon_cooldown;
            play_cue_next_track(ctx.world, FIRING_CUE);
            let velocity = Vec2::from_angle(ctx.direction()) * player.bullet_speed;
            let bullet = spawn_bullet(ctx.world, pos, velocity);
            trace!("player fired {:?} with velocity {:?}", bullet, velocity);
        }

        if let Some(mut stored) = ctx.component_mut::<Player>() {
            *stored = player;
        }
    }

    fn render(&mut self, ctx: &mut FrameContext<'_>) {
        let canvas = &mut *ctx.canvas;
        canvas.begin_path();
        canvas.arc(0.0, 0.0, PLAYER_RADIUS, 0.0, TAU);
        canvas.close_path();
        canvas.stroke();
        canvas.begin_path();
        canvas.move_to(0.0, 0.0);
        canvas.line_to(AIM_LINE_LENGTH, 0.0);
        canvas.close_path();
        canvas.stroke();
    }
}
