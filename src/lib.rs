//! arcadeengine library.
//!
//! A scene-graph engine for a small arcade demo. Entities live in a
//! `bevy_ecs` world and form a tree; every frame
//! [`systems::frame::run_frame`] walks that tree and runs each entity's
//! hooks. The raylib host backend is behind the default `raylib` feature.

#[cfg(feature = "raylib")]
pub mod backend;
pub mod behaviors;
pub mod canvas;
pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
