//! Raw host input events.
//!
//! The host backend turns whatever it polls (raylib, a browser, a test) into
//! [`InputEvent`] messages. [`crate::systems::input::apply_input_messages`]
//! folds them into the [`InputState`](crate::resources::input::InputState)
//! snapshot once per frame, before the entity walk runs.

use bevy_ecs::message::Message;
use glam::Vec2;

use crate::resources::input::{MouseButtonCode, TouchPoint};

/// Input device an event belongs to. Each device can be watched separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputDevice {
    Mouse,
    Keyboard,
    Touch,
}

/// A raw pointer, keyboard or touch event.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer entered the canvas.
    MouseEnter { pos: Vec2 },
    /// Pointer left the canvas.
    MouseLeave,
    MouseMove { pos: Vec2 },
    /// `button` is the code of the button that changed, `buttons` the bitmask
    /// of every button held after the change.
    MouseDown {
        pos: Vec2,
        button: MouseButtonCode,
        buttons: u16,
    },
    MouseUp {
        pos: Vec2,
        button: MouseButtonCode,
        buttons: u16,
    },
    /// `repeat` is set for auto-repeat key-downs while a key stays held.
    KeyDown { key: String, repeat: bool },
    /// A key producing a character was pressed.
    KeyPress { key: String },
    KeyUp { key: String },
    /// Every touch currently on the surface.
    TouchStart { touches: Vec<TouchPoint> },
    /// Touches that moved.
    TouchMove { changed: Vec<TouchPoint> },
    /// Touches that were lifted.
    TouchEnd { changed: Vec<TouchPoint> },
}

impl InputEvent {
    pub fn device(&self) -> InputDevice {
        match self {
            InputEvent::MouseEnter { .. }
            | InputEvent::MouseLeave
            | InputEvent::MouseMove { .. }
            | InputEvent::MouseDown { .. }
            | InputEvent::MouseUp { .. } => InputDevice::Mouse,
            InputEvent::KeyDown { .. } | InputEvent::KeyPress { .. } | InputEvent::KeyUp { .. } => {
                InputDevice::Keyboard
            }
            InputEvent::TouchStart { .. }
            | InputEvent::TouchMove { .. }
            | InputEvent::TouchEnd { .. } => InputDevice::Touch,
        }
    }
}
