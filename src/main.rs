//! arcadeengine main entry point.
//!
//! A small scene-graph arcade demo written in Rust using:
//! - **raylib** for windowing, drawing, input polling, and audio
//! - **bevy_ecs** as the entity arena and per-frame message plumbing
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (defaults when missing) and apply CLI overrides
//! 2. Open the window, start the audio thread, build the scene
//! 3. Every frame:
//!    - advance the world clock
//!    - poll raylib input into `InputEvent` messages
//!    - run the message schedule (input snapshot, audio bridge)
//!    - walk the entity tree with `run_frame`
//! 4. Stop the audio thread on exit
//!
//! `P` toggles pause, `Escape` stops the engine.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --seed 42
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;

use arcadeengine::backend::audio::audio_thread;
use arcadeengine::backend::canvas::RaylibCanvas;
use arcadeengine::backend::input::RaylibInputPoller;
use arcadeengine::events::input::InputEvent;
use arcadeengine::game;
use arcadeengine::resources::audio::{setup_audio, shutdown_audio};
use arcadeengine::resources::canvassize::CanvasSize;
use arcadeengine::resources::enginestate::{EngineState, EngineStates};
use arcadeengine::resources::gameconfig::GameConfig;
use arcadeengine::systems::frame::run_frame;
use arcadeengine::systems::input::push_input_events;
use arcadeengine::systems::time::update_world_time;
use bevy_ecs::prelude::*;
use clap::Parser;
use raylib::prelude::*;

/// Scene-graph arcade demo
#[derive(Parser)]
#[command(version, about = "Shoot the red circles before they reach you.")]
struct Cli {
    /// Configuration file (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Canvas width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Seed for enemy speed and placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Start with the simulation paused.
    #[arg(long)]
    paused: bool,

    /// Write the effective configuration back to the config file and exit.
    #[arg(long)]
    write_config: bool,
}

/// Engine hotkeys carried by this frame's events.
fn apply_hotkeys(world: &mut World, events: &[InputEvent]) {
    for event in events {
        if let InputEvent::KeyPress { key } = event {
            match key.as_str() {
                "p" => world.resource_mut::<EngineState>().toggle_pause(),
                "Escape" => world.resource_mut::<EngineState>().stop(),
                _ => {}
            }
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        log::warn!("{}, using defaults", e);
    }
    if let Some(width) = cli.width {
        config.canvas_width = width;
    }
    if let Some(height) = cli.height {
        config.canvas_height = height;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    if cli.write_config {
        match config.save_to_file() {
            Ok(()) => println!("config written to {}", config.config_path.display()),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    log::info!("Hello, world! This is arcadeengine!");

    // --------------- Raylib window ---------------
    let (mut rl, thread) = raylib::init()
        .size(config.canvas_width as i32, config.canvas_height as i32)
        .title(&config.title)
        .build();
    rl.set_target_fps(config.target_fps);
    // Escape is handled as an engine hotkey
    rl.set_exit_key(None);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    // audio must be up before setup requests the firing cue
    setup_audio(&mut world, audio_thread);
    let initial = if cli.paused {
        EngineStates::Paused
    } else {
        EngineStates::Running
    };
    game::setup(&mut world, &config, initial);

    let mut update = game::build_schedule();
    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    let mut poller = RaylibInputPoller::new();

    // --------------- Main loop ---------------
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        update_world_time(&mut world, dt);

        let canvas_size = *world.resource::<CanvasSize>();
        let events = poller.poll(&rl, canvas_size);
        apply_hotkeys(&mut world, &events);
        push_input_events(&mut world, events);

        update.run(&mut world);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::WHITE);
        let mut canvas = RaylibCanvas::new(&mut d);
        if !run_frame(&mut world, &mut canvas) {
            break;
        }
    }
    shutdown_audio(&mut world);
}
