//! ECS resources made available to systems and entity hooks.
//!
//! Overview
//! - `audio` – bridge and channels for the background audio thread
//! - `canvassize` – fixed logical canvas size
//! - `cueplayer` – named sound cues and their round-robin sub-tracks
//! - `enginestate` – running, paused or stopped
//! - `gameconfig` – INI-backed settings
//! - `input` – per-frame mouse, keyboard and touch snapshot
//! - `player` – handle to the player entity
//! - `rng` – seeded random source for gameplay
//! - `scene` – ordered root list and pending removals
//! - `worldtime` – elapsed time, delta and frame count
pub mod audio;
pub mod canvassize;
pub mod cueplayer;
pub mod enginestate;
pub mod gameconfig;
pub mod input;
pub mod player;
pub mod rng;
pub mod scene;
pub mod worldtime;
