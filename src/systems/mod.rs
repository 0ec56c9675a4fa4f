//! Engine systems.
//!
//! Submodules overview
//! - [`audio`] – bridge with the audio thread and cue playback helpers
//! - [`frame`] – the per-frame entity walk and the context hooks receive
//! - [`input`] – fold raw input messages into [`crate::resources::input::InputState`]
//! - [`scenegraph`] – attach, detach and query the entity tree
//! - [`time`] – advance the world clock

pub mod audio;
pub mod frame;
pub mod input;
pub mod scenegraph;
pub mod time;
