//! Input systems.
//!
//! The host writes raw [`InputEvent`] messages (see
//! [`crate::backend::input`] for the raylib poller); these systems fold them
//! into the [`InputState`] snapshot before the entity walk reads it.
use bevy_ecs::prelude::*;
use log::trace;

use crate::events::input::InputEvent;
use crate::resources::input::InputState;

/// Apply every input message written since this system last ran.
pub fn apply_input_messages(mut reader: MessageReader<InputEvent>, mut input: ResMut<InputState>) {
    for event in reader.read() {
        if !input.handle(event) {
            trace!("input: ignored {:?} (device not watched)", event);
        }
    }
}

/// Advance the ECS message queue for [`InputEvent`].
pub fn update_bevy_input_messages(mut msgs: ResMut<Messages<InputEvent>>) {
    msgs.update();
}

/// Queue raw host events for the next schedule run.
pub fn push_input_events(world: &mut World, events: impl IntoIterator<Item = InputEvent>) {
    let mut msgs = world.get_resource_or_init::<Messages<InputEvent>>();
    for event in events {
        msgs.write(event);
    }
}
