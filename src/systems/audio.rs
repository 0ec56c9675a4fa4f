//! Systems and helpers bridging gameplay with the audio thread.
//!
//! Per frame, in this order:
//! - [`update_bevy_audio_cmds`] and [`forward_audio_cmds`] push the
//!   [`AudioCmd`]s written last frame to the audio thread
//! - [`poll_audio_messages`] and [`update_bevy_audio_messages`] pull results
//!   back into `Messages<AudioMessage>`
//! - [`apply_audio_messages`] marks cues ready or failed in the
//!   [`CuePlayer`]
//!
//! [`load_cue`], [`play_cue_next_track`] and [`play_cue`] are the world-level
//! entry points used by game setup and entity hooks.

use bevy_ecs::prelude::*;
use log::warn;

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::AudioBridge;
use crate::resources::cueplayer::{AudioError, CuePlayer, TrackRange};

/// Drain any pending messages from the audio thread into the ECS mailbox.
pub fn poll_audio_messages(bridge: Res<AudioBridge>, mut writer: MessageWriter<AudioMessage>) {
    writer.write_batch(bridge.rx_msg.try_iter());
}

/// Advance the ECS message queue for [`AudioMessage`].
pub fn update_bevy_audio_messages(mut msgs: ResMut<Messages<AudioMessage>>) {
    msgs.update();
}

/// Forward ECS AudioCmd messages to the audio thread via the AudioBridge sender.
pub fn forward_audio_cmds(bridge: Res<AudioBridge>, mut reader: MessageReader<AudioCmd>) {
    for cmd in reader.read() {
        // ignore send errors during shutdown
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Advance the ECS message queue for AudioCmd so same-frame readers can observe writes.
pub fn update_bevy_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

/// Fold load results from the audio thread into the cue table.
pub fn apply_audio_messages(mut reader: MessageReader<AudioMessage>, mut cues: ResMut<CuePlayer>) {
    for message in reader.read() {
        cues.apply_message(message);
    }
}

/// Queue a command for the audio thread. Dropped with a warning when the
/// world has no audio mailbox.
pub fn send_audio_cmd(world: &mut World, cmd: AudioCmd) {
    match world.get_resource_mut::<Messages<AudioCmd>>() {
        Some(mut msgs) => {
            msgs.write(cmd);
        }
        None => warn!("audio is not set up, dropping {:?}", cmd),
    }
}

/// Register cue `name` from its manifest and request its decode.
pub fn load_cue(world: &mut World, name: &str, manifest: &str) -> Result<(), AudioError> {
    let cmd = world.resource_mut::<CuePlayer>().load_cue(name, manifest)?;
    if let Some(cmd) = cmd {
        send_audio_cmd(world, cmd);
    }
    Ok(())
}

/// Run `f` against the [`CuePlayer`] and send the command it returns.
fn with_cue_player(world: &mut World, f: impl FnOnce(&mut CuePlayer) -> Option<AudioCmd>) {
    let cmd = match world.get_resource_mut::<CuePlayer>() {
        Some(mut cues) => f(&mut *cues),
        None => {
            warn!("no cue player, dropping audio request");
            None
        }
    };
    if let Some(cmd) = cmd {
        send_audio_cmd(world, cmd);
    }
}

/// Play the next round-robin sub-track of `name`.
pub fn play_cue_next_track(world: &mut World, name: &str) {
    with_cue_player(world, |cues| cues.play_cue_next_track(name));
}

/// Play `range` of `name`, or the whole buffer when `range` is `None`.
pub fn play_cue(world: &mut World, name: &str, range: Option<TrackRange>) {
    with_cue_player(world, |cues| cues.play_cue(name, range));
}

/// Set the gain applied to every voice.
pub fn set_cue_gain(world: &mut World, gain: f32) {
    with_cue_player(world, |cues| Some(cues.set_gain(gain)));
}

pub fn unload_cue(world: &mut World, name: &str) {
    with_cue_player(world, |cues| cues.unload_cue(name));
}
