//! Integration tests for cue loading and playback through the audio bridge.
//!
//! A fake audio thread stands in for raylib: it acknowledges loads of files
//! that exist and forwards every other command to the test.
//!
//! # Usage
//!
//! ```sh
//! cargo test --test audio_integration
//! ```

use std::path::Path;
use std::time::{Duration, Instant};

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use glam::Vec2;

use arcadeengine::canvas::RecordingCanvas;
use arcadeengine::events::audio::{AudioCmd, AudioMessage};
use arcadeengine::events::input::InputEvent;
use arcadeengine::game::{FIRING_CUE, build_schedule, init_world, spawn_player};
use arcadeengine::resources::audio::{setup_audio, shutdown_audio};
use arcadeengine::resources::cueplayer::{AudioError, BufferState, CuePlayer, TrackRange};
use arcadeengine::resources::enginestate::EngineStates;
use arcadeengine::resources::gameconfig::GameConfig;
use arcadeengine::systems::audio::{load_cue, play_cue, play_cue_next_track, set_cue_gain, unload_cue};
use arcadeengine::systems::frame::run_frame;
use arcadeengine::systems::input::push_input_events;

const TIMEOUT: Duration = Duration::from_secs(2);

fn fake_audio(
    forwarded: Sender<AudioCmd>,
) -> impl FnOnce(Receiver<AudioCmd>, Sender<AudioMessage>) + Send + 'static {
    move |rx, tx| {
        for cmd in rx.iter() {
            match cmd {
                AudioCmd::LoadCue { name, path } => {
                    let reply = if path.exists() {
                        AudioMessage::CueLoaded { name }
                    } else {
                        AudioMessage::CueLoadFailed {
                            name,
                            error: "file not found".to_string(),
                        }
                    };
                    let _ = tx.send(reply);
                }
                AudioCmd::Shutdown => break,
                other => {
                    let _ = forwarded.send(other);
                }
            }
        }
    }
}

fn write_cue(dir: &Path, manifest: &str, body: &str, audio_file: Option<&str>) {
    std::fs::write(dir.join(manifest), body).unwrap();
    if let Some(file) = audio_file {
        std::fs::write(dir.join(file), b"not really audio").unwrap();
    }
}

fn audio_world(dir: &Path) -> (World, Receiver<AudioCmd>) {
    let mut config = GameConfig::new();
    config.sounds_dir = dir.to_path_buf();
    config.seed = Some(5);
    let mut world = World::new();
    let (tx, rx) = unbounded();
    setup_audio(&mut world, fake_audio(tx));
    init_world(&mut world, &config, EngineStates::Running);
    (world, rx)
}

/// Run the plumbing schedule until the cue leaves `Pending`.
fn wait_for_cue(world: &mut World, schedule: &mut Schedule, name: &str) -> BufferState {
    let start = Instant::now();
    loop {
        schedule.run(world);
        let state = world
            .resource::<CuePlayer>()
            .cue(name)
            .map(|c| c.buffer)
            .unwrap_or_default();
        if state != BufferState::Pending || start.elapsed() > TIMEOUT {
            return state;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
}

fn drain_plays(rx: &Receiver<AudioCmd>, expected: usize) -> Vec<AudioCmd> {
    (0..expected)
        .filter_map(|_| rx.recv_timeout(TIMEOUT).ok())
        .collect()
}

#[test]
fn round_robin_wraps_over_sub_tracks() {
    let dir = tempfile::tempdir().unwrap();
    write_cue(
        dir.path(),
        "shot.json",
        r#"{ "tracks": [[0.0, 0.5], [0.5, 1.0]], "files": ["shot.ogg"] }"#,
        Some("shot.ogg"),
    );
    let (mut world, played) = audio_world(dir.path());
    let mut schedule = build_schedule();

    load_cue(&mut world, "shot", "shot.json").unwrap();
    assert_eq!(wait_for_cue(&mut world, &mut schedule, "shot"), BufferState::Ready);

    for _ in 0..3 {
        play_cue_next_track(&mut world, "shot");
    }
    schedule.run(&mut world);

    let ranges: Vec<Option<TrackRange>> = drain_plays(&played, 3)
        .into_iter()
        .map(|cmd| match cmd {
            AudioCmd::PlayCue { range, .. } => range,
            other => panic!("unexpected command {:?}", other),
        })
        .collect();
    assert_eq!(
        ranges,
        vec![
            Some(TrackRange::new(0.0, 0.5)),
            Some(TrackRange::new(0.5, 1.0)),
            Some(TrackRange::new(0.0, 0.5)),
        ]
    );
    shutdown_audio(&mut world);
}

#[test]
fn failed_decode_marks_cue_and_skips_playback() {
    let dir = tempfile::tempdir().unwrap();
    write_cue(
        dir.path(),
        "broken.json",
        r#"{ "tracks": [[0.0, 0.5]], "files": ["missing.ogg"] }"#,
        None,
    );
    let (mut world, played) = audio_world(dir.path());
    let mut schedule = build_schedule();

    load_cue(&mut world, "broken", "broken.json").unwrap();
    assert_eq!(wait_for_cue(&mut world, &mut schedule, "broken"), BufferState::Failed);

    play_cue_next_track(&mut world, "broken");
    schedule.run(&mut world);
    assert!(played.recv_timeout(Duration::from_millis(100)).is_err());
    shutdown_audio(&mut world);
}

#[test]
fn bad_manifests_are_reported_to_the_caller() {
    let dir = tempfile::tempdir().unwrap();
    write_cue(dir.path(), "garbage.json", "{ not json", None);
    write_cue(dir.path(), "empty.json", r#"{ "tracks": [], "files": [] }"#, None);
    let (mut world, _played) = audio_world(dir.path());

    assert!(matches!(
        load_cue(&mut world, "a", "absent.json"),
        Err(AudioError::ManifestIo { .. })
    ));
    assert!(matches!(
        load_cue(&mut world, "b", "garbage.json"),
        Err(AudioError::ManifestParse { .. })
    ));
    assert!(matches!(
        load_cue(&mut world, "c", "empty.json"),
        Err(AudioError::NoAudioFile { .. })
    ));
    shutdown_audio(&mut world);
}

#[test]
fn player_shot_plays_the_firing_cue() {
    let dir = tempfile::tempdir().unwrap();
    write_cue(
        dir.path(),
        "ak47_firing.json",
        r#"{ "tracks": [[0.0, 0.3], [0.3, 0.6], [0.6, 0.9]], "files": ["ak47_firing.ogg"] }"#,
        Some("ak47_firing.ogg"),
    );
    let (mut world, played) = audio_world(dir.path());
    let mut schedule = build_schedule();

    load_cue(&mut world, FIRING_CUE, "ak47_firing.json").unwrap();
    assert_eq!(wait_for_cue(&mut world, &mut schedule, FIRING_CUE), BufferState::Ready);

    spawn_player(&mut world, Vec2::new(50.0, 100.0), 10, 5.0);
    push_input_events(
        &mut world,
        vec![
            InputEvent::MouseEnter {
                pos: Vec2::new(200.0, 100.0),
            },
            InputEvent::MouseDown {
                pos: Vec2::new(200.0, 100.0),
                button: 0,
                buttons: 1,
            },
        ],
    );
    schedule.run(&mut world);
    let mut canvas = RecordingCanvas::new();
    run_frame(&mut world, &mut canvas);
    schedule.run(&mut world);

    assert_eq!(
        drain_plays(&played, 1),
        vec![AudioCmd::PlayCue {
            name: FIRING_CUE.to_string(),
            range: Some(TrackRange::new(0.0, 0.3)),
        }]
    );
    assert_eq!(world.resource::<CuePlayer>().cue(FIRING_CUE).unwrap().current_track, 1);
    shutdown_audio(&mut world);
}

#[test]
fn whole_buffer_play_gain_and_unload_reach_the_audio_thread() {
    let dir = tempfile::tempdir().unwrap();
    write_cue(
        dir.path(),
        "hit.json",
        r#"{ "tracks": [[0.0, 0.2]], "files": ["hit.ogg"] }"#,
        Some("hit.ogg"),
    );
    let (mut world, played) = audio_world(dir.path());
    let mut schedule = build_schedule();

    load_cue(&mut world, "hit", "hit.json").unwrap();
    assert_eq!(wait_for_cue(&mut world, &mut schedule, "hit"), BufferState::Ready);

    play_cue(&mut world, "hit", None);
    set_cue_gain(&mut world, 0.5);
    unload_cue(&mut world, "hit");
    // gone from the table: a second unload and a play are both dropped
    unload_cue(&mut world, "hit");
    play_cue(&mut world, "hit", None);
    schedule.run(&mut world);

    assert_eq!(
        drain_plays(&played, 3),
        vec![
            AudioCmd::PlayCue {
                name: "hit".to_string(),
                range: None,
            },
            AudioCmd::SetGain { gain: 0.5 },
            AudioCmd::UnloadCue {
                name: "hit".to_string(),
            },
        ]
    );
    assert!(played.recv_timeout(Duration::from_millis(100)).is_err());
    assert_eq!(world.resource::<CuePlayer>().gain(), 0.5);
    assert!(world.resource::<CuePlayer>().cue("hit").is_none());
    shutdown_audio(&mut world);
}
