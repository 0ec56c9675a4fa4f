//! Messages exchanged with the audio thread.
//!
//! [`AudioCmd`] flows from the ECS world to the audio thread, [`AudioMessage`]
//! flows back. Both travel through `Messages<_>` inside the world and through
//! crossbeam channels across the thread boundary; see
//! [`crate::systems::audio`].

use std::path::PathBuf;

use bevy_ecs::message::Message;

use crate::resources::cueplayer::TrackRange;

/// Commands sent *to* the audio thread.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioCmd {
    /// Decode `path` and keep it as the buffer of cue `name`.
    LoadCue { name: String, path: PathBuf },
    /// Start an independent playback of `name`, restricted to `range` when
    /// given, else the whole buffer.
    PlayCue {
        name: String,
        range: Option<TrackRange>,
    },
    /// Global gain applied to every voice.
    SetGain { gain: f32 },
    UnloadCue { name: String },
    UnloadAll,
    Shutdown,
}

/// Messages sent *back* from the audio thread.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioMessage {
    CueLoaded { name: String },
    CueLoadFailed { name: String, error: String },
    CueUnloaded { name: String },
    UnloadedAll,
}
