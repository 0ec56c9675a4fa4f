//! raylib host backend.
//!
//! Implements the engine seams on top of raylib:
//! - [`canvas::RaylibCanvas`] draws [`Canvas2D`](crate::canvas::Canvas2D) calls
//! - [`input::RaylibInputPoller`] turns raylib polling state into
//!   [`InputEvent`](crate::events::input::InputEvent)s
//! - [`audio::audio_thread`] owns the audio device and every cue voice

pub mod audio;
pub mod canvas;
pub mod input;
