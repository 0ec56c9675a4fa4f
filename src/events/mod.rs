//! Message types exchanged between the host, the world and the audio thread.
//!
//! Submodules:
//! - [`audio`] – commands and results for the background audio thread
//! - [`input`] – raw mouse, keyboard and touch events from the host
pub mod audio;
pub mod input;
