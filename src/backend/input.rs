//! Polls raylib input state and turns changes into [`InputEvent`]s.
//!
//! raylib exposes polling state, not DOM-style events, so the poller keeps the
//! previous frame's view and emits an event for every difference. Mouse button
//! codes and the `buttons` bitmask follow the DOM convention (0 primary,
//! 1 middle, 2 secondary; bits 1, 4, 2).

use glam::Vec2;
use raylib::ffi;
use raylib::prelude::*;

use crate::events::input::InputEvent;
use crate::resources::canvassize::CanvasSize;
use crate::resources::input::{MouseButtonCode, TouchPoint};

const BUTTONS: [(MouseButton, MouseButtonCode, u16); 3] = [
    (MouseButton::MOUSE_BUTTON_LEFT, 0, 1),
    (MouseButton::MOUSE_BUTTON_MIDDLE, 1, 4),
    (MouseButton::MOUSE_BUTTON_RIGHT, 2, 2),
];

const KEYS: &[(KeyboardKey, &str)] = &[
    (KeyboardKey::KEY_A, "a"),
    (KeyboardKey::KEY_B, "b"),
    (KeyboardKey::KEY_C, "c"),
    (KeyboardKey::KEY_D, "d"),
    (KeyboardKey::KEY_E, "e"),
    (KeyboardKey::KEY_F, "f"),
    (KeyboardKey::KEY_G, "g"),
    (KeyboardKey::KEY_H, "h"),
    (KeyboardKey::KEY_I, "i"),
    (KeyboardKey::KEY_J, "j"),
    (KeyboardKey::KEY_K, "k"),
    (KeyboardKey::KEY_L, "l"),
    (KeyboardKey::KEY_M, "m"),
    (KeyboardKey::KEY_N, "n"),
    (KeyboardKey::KEY_O, "o"),
    (KeyboardKey::KEY_P, "p"),
    (KeyboardKey::KEY_Q, "q"),
    (KeyboardKey::KEY_R, "r"),
    (KeyboardKey::KEY_S, "s"),
    (KeyboardKey::KEY_T, "t"),
    (KeyboardKey::KEY_U, "u"),
    (KeyboardKey::KEY_V, "v"),
    (KeyboardKey::KEY_W, "w"),
    (KeyboardKey::KEY_X, "x"),
    (KeyboardKey::KEY_Y, "y"),
    (KeyboardKey::KEY_Z, "z"),
    (KeyboardKey::KEY_SPACE, " "),
    (KeyboardKey::KEY_ENTER, "Enter"),
    (KeyboardKey::KEY_ESCAPE, "Escape"),
    (KeyboardKey::KEY_UP, "ArrowUp"),
    (KeyboardKey::KEY_DOWN, "ArrowDown"),
    (KeyboardKey::KEY_LEFT, "ArrowLeft"),
    (KeyboardKey::KEY_RIGHT, "ArrowRight"),
];

/// Frame-to-frame diff of raylib input state.
#[derive(Debug, Default)]
pub struct RaylibInputPoller {
    mouse: Option<Vec2>,
    buttons: u16,
    touches: Vec<TouchPoint>,
}

impl RaylibInputPoller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events for everything that changed since the previous call.
    pub fn poll(&mut self, rl: &RaylibHandle, canvas: CanvasSize) -> Vec<InputEvent> {
        let mut events = Vec::new();
        self.poll_mouse(rl, canvas, &mut events);
        Self::poll_keys(rl, &mut events);
        self.poll_touch(&mut events);
        events
    }

    fn poll_mouse(&mut self, rl: &RaylibHandle, canvas: CanvasSize, events: &mut Vec<InputEvent>) {
        let raw = rl.get_mouse_position();
        let pos = Vec2::new(raw.x, raw.y);
        let inside = canvas.contains(pos.x, pos.y);

        match (self.mouse, inside) {
            (None, true) => events.push(InputEvent::MouseEnter { pos }),
            (Some(_), false) => events.push(InputEvent::MouseLeave),
            (Some(prev), true) if prev != pos => events.push(InputEvent::MouseMove { pos }),
            _ => {}
        }
        self.mouse = inside.then_some(pos);

        for (button, code, bit) in BUTTONS {
            if rl.is_mouse_button_pressed(button) {
                self.buttons |= bit;
                events.push(InputEvent::MouseDown {
                    pos,
                    button: code,
                    buttons: self.buttons,
                });
            }
            if rl.is_mouse_button_released(button) {
                self.buttons &= !bit;
                events.push(InputEvent::MouseUp {
                    pos,
                    button: code,
                    buttons: self.buttons,
                });
            }
        }
    }

    fn poll_keys(rl: &RaylibHandle, events: &mut Vec<InputEvent>) {
        for &(key, name) in KEYS {
            if rl.is_key_pressed(key) {
                events.push(InputEvent::KeyDown {
                    key: name.to_string(),
                    repeat: false,
                });
                events.push(InputEvent::KeyPress {
                    key: name.to_string(),
                });
            } else if unsafe { ffi::IsKeyPressedRepeat(key as i32) } {
                events.push(InputEvent::KeyDown {
                    key: name.to_string(),
                    repeat: true,
                });
            }
            if rl.is_key_released(key) {
                events.push(InputEvent::KeyUp {
                    key: name.to_string(),
                });
            }
        }
    }

    fn poll_touch(&mut self, events: &mut Vec<InputEvent>) {
        let count = unsafe { ffi::GetTouchPointCount() }.max(0);
        let current: Vec<TouchPoint> = (0..count)
            .map(|i| {
                let (id, raw) = unsafe { (ffi::GetTouchPointId(i), ffi::GetTouchPosition(i)) };
                TouchPoint::new(id as i64, raw.x, raw.y)
            })
            .collect();

        let started: Vec<TouchPoint> = current
            .iter()
            .filter(|t| !self.touches.iter().any(|old| old.id == t.id))
            .copied()
            .collect();
        let moved: Vec<TouchPoint> = current
            .iter()
            .filter(|t| self.touches.iter().any(|old| old.id == t.id && old.pos != t.pos))
            .copied()
            .collect();
        let ended: Vec<TouchPoint> = self
            .touches
            .iter()
            .filter(|old| !current.iter().any(|t| t.id == old.id))
            .copied()
            .collect();

        if !started.is_empty() {
            events.push(InputEvent::TouchStart { touches: started });
        }
        if !moved.is_empty() {
            events.push(InputEvent::TouchMove { changed: moved });
        }
        if !ended.is_empty() {
            events.push(InputEvent::TouchEnd { changed: ended });
        }
        self.touches = current;
    }
}
