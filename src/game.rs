//! Game setup and entity factories.
//!
//! [`init_world`] inserts every engine resource, [`setup`] additionally builds
//! the demo scene (debug overlay, first enemy, player) and requests the firing
//! cue. [`build_schedule`] returns the per-frame plumbing schedule that folds
//! input and audio messages into their resources before
//! [`run_frame`](crate::systems::frame::run_frame) walks the tree.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{info, warn};

use crate::behaviors::{BulletHooks, DebugOverlayHooks, EnemyHooks, PlayerHooks};
use crate::components::behavior::Behavior;
use crate::components::bullet::Bullet;
use crate::components::dimension::Dimension;
use crate::components::direction::Direction;
use crate::components::enemy::Enemy;
use crate::components::entityname::EntityName;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::events::audio::{AudioCmd, AudioMessage};
use crate::events::input::InputEvent;
use crate::resources::audio::AudioBridge;
use crate::resources::canvassize::CanvasSize;
use crate::resources::cueplayer::CuePlayer;
use crate::resources::enginestate::{EngineState, EngineStates};
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::player::PlayerHandle;
use crate::resources::rng::GameRng;
use crate::resources::scene::{PendingRemovals, SceneRoots};
use crate::resources::worldtime::WorldTime;
use crate::systems::audio::{
    apply_audio_messages, forward_audio_cmds, load_cue, poll_audio_messages,
    update_bevy_audio_cmds, update_bevy_audio_messages,
};
use crate::systems::input::{apply_input_messages, update_bevy_input_messages};
use crate::systems::scenegraph::spawn_root;

/// Cue played on every player shot.
pub const FIRING_CUE: &str = "ak47_firing";
/// Manifest of [`FIRING_CUE`], relative to the sounds directory.
pub const FIRING_MANIFEST: &str = "ak47_firing.json";

pub const DEBUG_OVERLAY_POSITION: Vec2 = Vec2::new(100.0, 100.0);
pub const PLAYER_START: Vec2 = Vec2::new(50.0, 100.0);

/// Insert every resource the engine and the gameplay hooks read.
pub fn init_world(world: &mut World, config: &GameConfig, initial: EngineStates) {
    world.insert_resource(SceneRoots::default());
    world.insert_resource(PendingRemovals::default());
    world.insert_resource(WorldTime::default());
    world.insert_resource(EngineState::new(initial));
    world.insert_resource(config.canvas_size());
    world.insert_resource(InputState::watching_all());
    world.insert_resource(match config.seed {
        Some(seed) => GameRng::seeded(seed),
        None => GameRng::default(),
    });
    world.insert_resource(CuePlayer::new(config.sounds_dir.clone(), config.gain));
    world.init_resource::<Messages<InputEvent>>();
    world.init_resource::<Messages<AudioCmd>>();
    world.init_resource::<Messages<AudioMessage>>();
    world.insert_resource(config.clone());
}

/// Build the demo scene.
///
/// Root order is debug overlay, first enemy, player. The firing cue is
/// requested last; a broken manifest only costs the sound.
pub fn setup(world: &mut World, config: &GameConfig, initial: EngineStates) {
    init_world(world, config, initial);

    spawn_debug_overlay(world, DEBUG_OVERLAY_POSITION);
    spawn_enemy(world, 0.0);
    spawn_player(world, PLAYER_START, config.weapon_cooldown, config.bullet_speed);

    match load_cue(world, FIRING_CUE, FIRING_MANIFEST) {
        Ok(()) => info!("requested cue '{}'", FIRING_CUE),
        Err(e) => warn!("error occurred while loading sound '{}': {}", FIRING_CUE, e),
    }
}

/// Per-frame message plumbing. Run it before the frame walk.
pub fn build_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems((apply_input_messages, update_bevy_input_messages).chain());
    update.add_systems(
        // audio systems must be together
        (
            update_bevy_audio_cmds,
            forward_audio_cmds,
            poll_audio_messages,
            update_bevy_audio_messages,
            apply_audio_messages,
        )
            .chain()
            .run_if(resource_exists::<AudioBridge>),
    );
    update
}

pub fn spawn_debug_overlay(world: &mut World, pos: Vec2) -> Entity {
    spawn_root(
        world,
        (
            EntityName::new("entity"),
            MapPosition { pos },
            Direction::default(),
            Dimension::default(),
            Behavior::new(DebugOverlayHooks),
        ),
    )
}

/// Spawn the player as a root entity and publish its [`PlayerHandle`].
pub fn spawn_player(world: &mut World, pos: Vec2, weapon_cooldown: u32, bullet_speed: f32) -> Entity {
    let player = spawn_root(
        world,
        (
            EntityName::new("player"),
            MapPosition { pos },
            Direction::default(),
            Dimension::default(),
            Player::new(weapon_cooldown, bullet_speed),
            Behavior::new(PlayerHooks),
        ),
    );
    world.insert_resource(PlayerHandle(player));
    player
}

pub fn spawn_bullet(world: &mut World, pos: Vec2, velocity: Vec2) -> Entity {
    spawn_root(
        world,
        (
            EntityName::new("bullet"),
            MapPosition { pos },
            Direction::default(),
            Dimension::default(),
            Bullet::new(velocity),
            Behavior::new(BulletHooks),
        ),
    )
}

/// Spawn an enemy in the band on the right of the canvas.
///
/// Its base speed is drawn once and clamped; `speed_boost` is added on top.
pub fn spawn_enemy(world: &mut World, speed_boost: f32) -> Entity {
    let size = world
        .get_resource::<CanvasSize>()
        .copied()
        .unwrap_or_default();
    let (speed_sample, rx, ry) = {
        let mut rng = world.get_resource_or_init::<GameRng>();
        (rng.unit(), rng.unit(), rng.unit())
    };
    let mut enemy = Enemy::with_sampled_speed(speed_sample);
    enemy.speed += speed_boost;
    let pos = Vec2::new(size.w - 100.0 + rx * 50.0, 50.0 + ry * (size.h - 100.0));
    spawn_root(
        world,
        (
            EntityName::new("enemy"),
            MapPosition { pos },
            Direction::default(),
            Dimension::default(),
            enemy,
            Behavior::new(EnemyHooks),
        ),
    )
}
