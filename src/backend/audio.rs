//! Audio thread backed by raylib.
//!
//! The thread owns the raylib audio device and every decoded cue. A cue keeps
//! a pool of [`Music`] voices opened on the same file so overlapping plays of
//! one cue do not cut each other off. Each play takes an idle voice, or opens
//! one more when every voice is busy, seeks to the start of its range and is
//! stopped once the end of the range is reached.
//!
//! Commands arrive as [`AudioCmd`]s over a crossbeam channel; load results go
//! back as [`AudioMessage`]s. See [`crate::resources::audio::setup_audio`].

use crossbeam_channel::{Receiver, Sender};
use log::{debug, error, info, warn};
use raylib::core::audio::{Music, RaylibAudio};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::cueplayer::{DEFAULT_GAIN, TrackRange};

/// Voices opened when a cue is loaded.
const INITIAL_VOICES: usize = 4;
/// Slack when comparing stream time against a range end.
const END_EPSILON: f32 = 0.01;

/// Voices of one cue, all opened on `path`.
struct VoicePool<'a> {
    path: String,
    voices: SmallVec<[Voice<'a>; INITIAL_VOICES]>,
}

impl<'a> VoicePool<'a> {
    fn open(audio: &'a RaylibAudio, path: String) -> Result<Self, String> {
        let voices = (0..INITIAL_VOICES)
            .map(|_| Voice::open(audio, &path))
            .collect::<Result<_, _>>()?;
        Ok(Self { path, voices })
    }

    /// Index of a voice free to start, opening a new one when all are busy.
    fn free_voice(&mut self, audio: &'a RaylibAudio) -> Result<usize, String> {
        if let Some(index) = idle_slot(self.voices.iter().map(Voice::is_idle)) {
            return Ok(index);
        }
        self.voices.push(Voice::open(audio, &self.path)?);
        Ok(self.voices.len() - 1)
    }
}

/// First idle slot, or `None` when every slot is busy.
fn idle_slot(idle: impl IntoIterator<Item = bool>) -> Option<usize> {
    idle.into_iter().position(|is_idle| is_idle)
}

struct Voice<'a> {
    music: Music<'a>,
    /// Stream time at which this voice stops. `None` while idle.
    stop_at: Option<f32>,
}

impl<'a> Voice<'a> {
    fn open(audio: &'a RaylibAudio, path: &str) -> Result<Self, String> {
        audio
            .new_music(path)
            .map(|music| Voice {
                music,
                stop_at: None,
            })
            .map_err(|e| e.to_string())
    }

    fn is_idle(&self) -> bool {
        self.stop_at.is_none()
    }

    fn start(&mut self, range: Option<TrackRange>, gain: f32) {
        let (start, end) = match range {
            Some(r) => (r.start, r.end),
            None => (0.0, self.music.get_time_length()),
        };
        self.music.stop_stream();
        self.music.set_volume(gain);
        self.music.play_stream();
        self.music.seek_stream(start);
        self.stop_at = Some(end);
    }

    fn stop(&mut self) {
        self.music.stop_stream();
        self.stop_at = None;
    }

    /// Feed the stream and stop at the end of the range.
    fn pump(&mut self) {
        let Some(end) = self.stop_at else {
            return;
        };
        if !self.music.is_stream_playing() || self.music.get_time_played() >= end - END_EPSILON {
            self.stop();
            return;
        }
        self.music.update_stream();
    }
}

/// Entry point of the dedicated audio thread.
///
/// Blocks until it receives [`AudioCmd::Shutdown`] or the command channel
/// closes.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_msg: Sender<AudioMessage>) {
    let audio = match RaylibAudio::init_audio_device() {
        Ok(device) => device,
        Err(e) => {
            error!("[audio] failed to initialize audio device: {}", e);
            // Keep answering so the game still runs, silently.
            for cmd in rx_cmd.iter() {
                match cmd {
                    AudioCmd::LoadCue { name, .. } => {
                        let _ = tx_msg.send(AudioMessage::CueLoadFailed {
                            name,
                            error: "no audio device".to_string(),
                        });
                    }
                    AudioCmd::Shutdown => break,
                    _ => {}
                }
            }
            return;
        }
    };

    info!("[audio] thread starting (id={:?})", std::thread::current().id());

    let mut cues: FxHashMap<String, VoicePool> = FxHashMap::default();
    let mut gain = DEFAULT_GAIN;

    'run: loop {
        for cmd in rx_cmd.try_iter() {
            match cmd {
                AudioCmd::LoadCue { name, path } => {
                    let path_str = path.to_string_lossy().into_owned();
                    match VoicePool::open(&audio, path_str.clone()) {
                        Ok(pool) => {
                            info!("[audio] loaded cue='{}' path='{}'", name, path_str);
                            cues.insert(name.clone(), pool);
                            let _ = tx_msg.send(AudioMessage::CueLoaded { name });
                        }
                        Err(error) => {
                            warn!(
                                "[audio] load failed cue='{}' path='{}' error='{}'",
                                name, path_str, error
                            );
                            let _ = tx_msg.send(AudioMessage::CueLoadFailed { name, error });
                        }
                    }
                }
                AudioCmd::PlayCue { name, range } => {
                    let Some(pool) = cues.get_mut(&name) else {
                        warn!("[audio] play failed cue='{}' reason='not loaded'", name);
                        continue;
                    };
                    match pool.free_voice(&audio) {
                        Ok(index) => {
                            debug!(
                                "[audio] play cue='{}' voice={}/{} range={:?}",
                                name,
                                index,
                                pool.voices.len(),
                                range
                            );
                            pool.voices[index].start(range, gain);
                        }
                        Err(error) => {
                            warn!("[audio] play failed cue='{}' error='{}'", name, error);
                        }
                    }
                }
                AudioCmd::SetGain { gain: new_gain } => {
                    gain = new_gain;
                    for voice in cues.values_mut().flat_map(|pool| pool.voices.iter_mut()) {
                        voice.music.set_volume(gain);
                    }
                }
                AudioCmd::UnloadCue { name } => {
                    if cues.remove(&name).is_some() {
                        info!("[audio] unloaded cue='{}'", name);
                        let _ = tx_msg.send(AudioMessage::CueUnloaded { name });
                    }
                }
                AudioCmd::UnloadAll => {
                    cues.clear();
                    let _ = tx_msg.send(AudioMessage::UnloadedAll);
                }
                AudioCmd::Shutdown => {
                    info!("[audio] shutdown requested");
                    cues.clear();
                    let _ = tx_msg.send(AudioMessage::UnloadedAll);
                    break 'run;
                }
            }
        }

        for voice in cues.values_mut().flat_map(|pool| pool.voices.iter_mut()) {
            voice.pump();
        }
        std::thread::sleep(std::time::Duration::from_millis(5));
    }

    info!("[audio] thread exiting (id={:?})", std::thread::current().id());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_slot_prefers_first_idle_voice() {
        assert_eq!(idle_slot([false, true, true]), Some(1));
        assert_eq!(idle_slot([true]), Some(0));
    }

    #[test]
    fn test_idle_slot_is_none_when_all_busy() {
        assert_eq!(idle_slot([false; INITIAL_VOICES]), None);
        assert_eq!(idle_slot(std::iter::empty()), None);
    }
}
