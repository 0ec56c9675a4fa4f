//! Named sound cues with round-robin sub-track playback.
//!
//! A cue is one audio file plus an ordered list of sub-track time ranges,
//! described by a JSON manifest:
//!
//! ```json
//! { "tracks": [[0.0, 0.4], [0.4, 0.8]], "files": ["ak47_firing.ogg"] }
//! ```
//!
//! [`CuePlayer`] only keeps the bookkeeping (tracks, round-robin index, buffer
//! state). Decoding and playback happen on the audio thread; the methods here
//! return the [`AudioCmd`] to forward to it, or `None` when there is nothing
//! to do. Missing or not-yet-decoded cues log a warning and are skipped.

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::*;
use log::{info, warn};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::events::audio::{AudioCmd, AudioMessage};

/// Default gain applied to every playback.
pub const DEFAULT_GAIN: f32 = 0.2;

/// Half-open `[start, end)` range in seconds inside a cue's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "[f32; 2]")]
pub struct TrackRange {
    pub start: f32,
    pub end: f32,
}

impl TrackRange {
    pub fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> f32 {
        (self.end - self.start).max(0.0)
    }
}

impl From<[f32; 2]> for TrackRange {
    fn from([start, end]: [f32; 2]) -> Self {
        Self { start, end }
    }
}

/// Parsed cue manifest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CueManifest {
    #[serde(default)]
    pub tracks: Vec<TrackRange>,
    pub files: Vec<String>,
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to read cue manifest {}: {source}", path.display())]
    ManifestIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid cue manifest {}: {source}", path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cue manifest {} lists no audio file", path.display())]
    NoAudioFile { path: PathBuf },
}

impl CueManifest {
    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self, AudioError> {
        let text = std::fs::read_to_string(path).map_err(|source| AudioError::ManifestIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| AudioError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Decode state of a cue's sample buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BufferState {
    #[default]
    Pending,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct Cue {
    pub tracks: Vec<TrackRange>,
    /// Index of the sub-track the next round-robin play uses.
    pub current_track: usize,
    pub buffer: BufferState,
}

/// Resource tracking every known cue.
#[derive(Resource, Debug, Clone)]
pub struct CuePlayer {
    base_dir: PathBuf,
    gain: f32,
    cues: FxHashMap<String, Cue>,
}

impl Default for CuePlayer {
    fn default() -> Self {
        Self::new("./assets/sounds/", DEFAULT_GAIN)
    }
}

impl CuePlayer {
    /// `base_dir` is the directory manifests and audio files are resolved in.
    pub fn new(base_dir: impl Into<PathBuf>, gain: f32) -> Self {
        Self {
            base_dir: base_dir.into(),
            gain,
            cues: FxHashMap::default(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn cue(&self, name: &str) -> Option<&Cue> {
        self.cues.get(name)
    }

    /// Whether `name` can be played right now.
    pub fn is_ready(&self, name: &str) -> bool {
        self.cues
            .get(name)
            .is_some_and(|cue| cue.buffer == BufferState::Ready)
    }

    /// Read the manifest at `base_dir/manifest` and register cue `name`.
    pub fn load_cue(&mut self, name: &str, manifest: &str) -> Result<Option<AudioCmd>, AudioError> {
        let path = self.base_dir.join(manifest);
        let parsed = CueManifest::load(&path)?;
        if parsed.files.is_empty() {
            return Err(AudioError::NoAudioFile { path });
        }
        Ok(self.register_cue(name, parsed))
    }

    /// Register cue `name` from an already parsed manifest.
    ///
    /// Tracks are replaced and the round-robin index reset. The first file is
    /// decoded unless the cue already has a ready buffer, which is kept.
    pub fn register_cue(&mut self, name: &str, manifest: CueManifest) -> Option<AudioCmd> {
        let cue = self.cues.entry(name.to_string()).or_default();
        cue.tracks = manifest.tracks;
        cue.current_track = 0;
        if cue.buffer == BufferState::Ready {
            return None;
        }
        let file = manifest.files.into_iter().next()?;
        cue.buffer = BufferState::Pending;
        Some(AudioCmd::LoadCue {
            name: name.to_string(),
            path: self.base_dir.join(file),
        })
    }

    /// Play the next sub-track of `name` and advance the round-robin index.
    pub fn play_cue_next_track(&mut self, name: &str) -> Option<AudioCmd> {
        let Some(cue) = self.cues.get_mut(name) else {
            warn!("cue '{}' not found", name);
            return None;
        };
        if cue.buffer != BufferState::Ready {
            warn!("cue '{}' is not loaded yet", name);
            return None;
        }
        let range = cue.tracks.get(cue.current_track).copied();
        if !cue.tracks.is_empty() {
            cue.current_track = (cue.current_track + 1) % cue.tracks.len();
        }
        Some(AudioCmd::PlayCue {
            name: name.to_string(),
            range,
        })
    }

    /// Play `range` of `name`, or the whole buffer.
    pub fn play_cue(&self, name: &str, range: Option<TrackRange>) -> Option<AudioCmd> {
        if !self.is_ready(name) {
            warn!("cue '{}' not found or not loaded", name);
            return None;
        }
        Some(AudioCmd::PlayCue {
            name: name.to_string(),
            range,
        })
    }

    pub fn set_gain(&mut self, gain: f32) -> AudioCmd {
        self.gain = gain;
        AudioCmd::SetGain { gain }
    }

    pub fn unload_cue(&mut self, name: &str) -> Option<AudioCmd> {
        self.cues.remove(name).map(|_| AudioCmd::UnloadCue {
            name: name.to_string(),
        })
    }

    /// Apply a result reported by the audio thread.
    pub fn apply_message(&mut self, message: &AudioMessage) {
        match message {
            AudioMessage::CueLoaded { name } => {
                if let Some(cue) = self.cues.get_mut(name) {
                    info!("cue '{}' ready ({} tracks)", name, cue.tracks.len());
                    cue.buffer = BufferState::Ready;
                }
            }
            AudioMessage::CueLoadFailed { name, error } => {
                warn!("error occurred while loading cue '{}': {}", name, error);
                if let Some(cue) = self.cues.get_mut(name) {
                    cue.buffer = BufferState::Failed;
                }
            }
            AudioMessage::CueUnloaded { .. } | AudioMessage::UnloadedAll => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn manifest(tracks: &[[f32; 2]]) -> CueManifest {
        CueManifest {
            tracks: tracks.iter().copied().map(TrackRange::from).collect(),
            files: vec!["shot.ogg".to_string()],
        }
    }

    fn ready_player(tracks: &[[f32; 2]]) -> CuePlayer {
        let mut player = CuePlayer::new("sounds", DEFAULT_GAIN);
        player.register_cue("shot", manifest(tracks));
        player.apply_message(&AudioMessage::CueLoaded {
            name: "shot".to_string(),
        });
        player
    }

    #[test]
    fn test_manifest_parses_track_pairs() {
        let parsed: CueManifest =
            serde_json::from_str(r#"{"tracks": [[0.0, 0.5], [0.5, 1.25]], "files": ["a.ogg"]}"#)
                .unwrap();
        assert_eq!(parsed.tracks, vec![TrackRange::new(0.0, 0.5), TrackRange::new(0.5, 1.25)]);
        assert_eq!(parsed.files, vec!["a.ogg".to_string()]);
        assert_eq!(parsed.tracks[1].duration(), 0.75);
    }

    #[test]
    fn test_register_requests_decode_of_first_file() {
        let mut player = CuePlayer::new("sounds", DEFAULT_GAIN);
        let cmd = player.register_cue("shot", manifest(&[[0.0, 1.0]]));
        assert_eq!(
            cmd,
            Some(AudioCmd::LoadCue {
                name: "shot".to_string(),
                path: PathBuf::from("sounds").join("shot.ogg"),
            })
        );
        assert_eq!(player.cue("shot").unwrap().buffer, BufferState::Pending);
    }

    #[test]
    fn test_reregistering_ready_cue_keeps_buffer() {
        let mut player = ready_player(&[[0.0, 1.0]]);
        let cmd = player.register_cue("shot", manifest(&[[0.0, 0.5], [0.5, 1.0]]));
        assert!(cmd.is_none());
        assert!(player.is_ready("shot"));
        assert_eq!(player.cue("shot").unwrap().tracks.len(), 2);
    }

    #[test]
    fn test_round_robin_advances_and_wraps() {
        let mut player = ready_player(&[[0.0, 0.1], [0.1, 0.2], [0.2, 0.3]]);
        let mut ranges = Vec::new();
        for _ in 0..4 {
            match player.play_cue_next_track("shot") {
                Some(AudioCmd::PlayCue { range, .. }) => ranges.push(range.unwrap().start),
                other => panic!("unexpected {:?}", other),
            }
        }
        assert_eq!(ranges, vec![0.0, 0.1, 0.2, 0.0]);
        assert_eq!(player.cue("shot").unwrap().current_track, 1);
    }

    #[test]
    fn test_playing_unknown_or_pending_cue_is_skipped() {
        let mut player = CuePlayer::new("sounds", DEFAULT_GAIN);
        assert!(player.play_cue_next_track("missing").is_none());
        player.register_cue("shot", manifest(&[[0.0, 1.0]]));
        assert!(player.play_cue_next_track("shot").is_none());
        assert!(player.play_cue("shot", None).is_none());
        assert_eq!(player.cue("shot").unwrap().current_track, 0);
    }

    #[test]
    fn test_cue_without_tracks_plays_whole_buffer() {
        let mut player = ready_player(&[]);
        assert_eq!(
            player.play_cue_next_track("shot"),
            Some(AudioCmd::PlayCue {
                name: "shot".to_string(),
                range: None,
            })
        );
    }

    #[test]
    fn test_failed_decode_marks_cue_failed() {
        let mut player = CuePlayer::new("sounds", DEFAULT_GAIN);
        player.register_cue("shot", manifest(&[[0.0, 1.0]]));
        player.apply_message(&AudioMessage::CueLoadFailed {
            name: "shot".to_string(),
            error: "bad header".to_string(),
        });
        assert_eq!(player.cue("shot").unwrap().buffer, BufferState::Failed);
        assert!(player.play_cue_next_track("shot").is_none());
    }

    #[test]
    fn test_load_cue_reads_manifest_from_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("shot.json")).unwrap();
        write!(file, r#"{{"tracks": [[0.0, 0.3]], "files": ["shot.ogg"]}}"#).unwrap();

        let mut player = CuePlayer::new(dir.path(), DEFAULT_GAIN);
        let cmd = player.load_cue("shot", "shot.json").unwrap();
        assert!(matches!(cmd, Some(AudioCmd::LoadCue { .. })));
        assert_eq!(player.cue("shot").unwrap().tracks, vec![TrackRange::new(0.0, 0.3)]);
    }

    #[test]
    fn test_load_cue_reports_missing_and_malformed_manifests() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        std::fs::write(dir.path().join("empty.json"), r#"{"tracks": [], "files": []}"#).unwrap();

        let mut player = CuePlayer::new(dir.path(), DEFAULT_GAIN);
        assert!(matches!(
            player.load_cue("a", "nope.json"),
            Err(AudioError::ManifestIo { .. })
        ));
        assert!(matches!(
            player.load_cue("b", "broken.json"),
            Err(AudioError::ManifestParse { .. })
        ));
        assert!(matches!(
            player.load_cue("c", "empty.json"),
            Err(AudioError::NoAudioFile { .. })
        ));
        assert!(player.cue("a").is_none());
    }

    #[test]
    fn test_unload_forgets_cue() {
        let mut player = ready_player(&[[0.0, 1.0]]);
        assert!(player.unload_cue("shot").is_some());
        assert!(player.unload_cue("shot").is_none());
        assert!(!player.is_ready("shot"));
    }
}
