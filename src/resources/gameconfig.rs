//! Game configuration resource.
//!
//! Settings loaded from an INI configuration file. Every value has a default
//! so a missing or partial file still starts the game.
//!
//! # Configuration File Format
//!
//! ```ini
//! [canvas]
//! width = 400
//! height = 400
//!
//! [window]
//! title = arcadeengine
//! target_fps = 60
//!
//! [audio]
//! sounds_dir = ./assets/sounds
//! gain = 0.2
//!
//! [gameplay]
//! weapon_cooldown = 10
//! bullet_speed = 5
//! seed = 42
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::resources::canvassize::CanvasSize;
use crate::resources::cueplayer::DEFAULT_GAIN;

const DEFAULT_CANVAS_WIDTH: u32 = 400;
const DEFAULT_CANVAS_HEIGHT: u32 = 400;
const DEFAULT_TITLE: &str = "arcadeengine";
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_SOUNDS_DIR: &str = "./assets/sounds";
const DEFAULT_WEAPON_COOLDOWN: u32 = 10;
const DEFAULT_BULLET_SPEED: f32 = 5.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Logical canvas width in pixels.
    pub canvas_width: u32,
    /// Logical canvas height in pixels.
    pub canvas_height: u32,
    pub title: String,
    pub target_fps: u32,
    /// Directory cue manifests and audio files are read from.
    pub sounds_dir: PathBuf,
    pub gain: f32,
    /// Frames between two player shots.
    pub weapon_cooldown: u32,
    pub bullet_speed: f32,
    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            title: DEFAULT_TITLE.to_string(),
            target_fps: DEFAULT_TARGET_FPS,
            sounds_dir: PathBuf::from(DEFAULT_SOUNDS_DIR),
            gain: DEFAULT_GAIN,
            weapon_cooldown: DEFAULT_WEAPON_COOLDOWN,
            bullet_speed: DEFAULT_BULLET_SPEED,
            seed: None,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [canvas] section
        if let Some(width) = config.getuint("canvas", "width").ok().flatten() {
            self.canvas_width = width as u32;
        }
        if let Some(height) = config.getuint("canvas", "height").ok().flatten() {
            self.canvas_height = height as u32;
        }

        // [window] section
        if let Some(title) = config.get("window", "title") {
            self.title = title;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }

        // [audio] section
        if let Some(dir) = config.get("audio", "sounds_dir") {
            self.sounds_dir = PathBuf::from(dir);
        }
        if let Some(gain) = config.getfloat("audio", "gain").ok().flatten() {
            self.gain = gain as f32;
        }

        // [gameplay] section
        if let Some(cooldown) = config.getuint("gameplay", "weapon_cooldown").ok().flatten() {
            self.weapon_cooldown = cooldown as u32;
        }
        if let Some(speed) = config.getfloat("gameplay", "bullet_speed").ok().flatten() {
            self.bullet_speed = speed as f32;
        }
        if let Some(seed) = config.getuint("gameplay", "seed").ok().flatten() {
            self.seed = Some(seed);
        }

        info!(
            "Loaded config: {}x{} canvas, fps={}, sounds={:?}, gain={}, cooldown={}, bullet_speed={}",
            self.canvas_width,
            self.canvas_height,
            self.target_fps,
            self.sounds_dir,
            self.gain,
            self.weapon_cooldown,
            self.bullet_speed
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("canvas", "width", Some(self.canvas_width.to_string()));
        config.set("canvas", "height", Some(self.canvas_height.to_string()));

        config.set("window", "title", Some(self.title.clone()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));

        config.set(
            "audio",
            "sounds_dir",
            Some(self.sounds_dir.to_string_lossy().into_owned()),
        );
        config.set("audio", "gain", Some(self.gain.to_string()));

        config.set(
            "gameplay",
            "weapon_cooldown",
            Some(self.weapon_cooldown.to_string()),
        );
        config.set("gameplay", "bullet_speed", Some(self.bullet_speed.to_string()));
        if let Some(seed) = self.seed {
            config.set("gameplay", "seed", Some(seed.to_string()));
        }

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    pub fn set_canvas_size(&mut self, width: u32, height: u32) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    pub fn canvas_size(&self) -> CanvasSize {
        CanvasSize {
            w: self.canvas_width as f32,
            h: self.canvas_height as f32,
        }
    }
}
