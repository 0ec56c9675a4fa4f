//! Per-frame input snapshot resource.
//!
//! [`InputState`] accumulates raw [`InputEvent`]s into a stable view of the
//! mouse, keyboard and touch surface. Gameplay hooks only read it; it is
//! mutated by [`InputState::handle`] while applying the frame's input messages.
//!
//! Each device has to be watched before its events are taken into account.
//! `watch_*` / `unwatch_*` are idempotent.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;
use smallvec::SmallVec;

use crate::events::input::{InputDevice, InputEvent};

/// Mouse button code (0 primary, 1 auxiliary, 2 secondary).
pub type MouseButtonCode = u8;

/// Code of the primary (usually left) mouse button.
pub const PRIMARY_BUTTON: MouseButtonCode = 0;

/// Current and previous pointer positions. `None` while outside the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerPosition {
    pub current: Option<Vec2>,
    pub previous: Option<Vec2>,
}

impl PointerPosition {
    fn advance(&mut self, pos: Vec2) {
        self.previous = self.current;
        self.current = Some(pos);
    }
}

#[derive(Debug, Clone, Default)]
pub struct MouseState {
    /// Last button that went down or up.
    pub button: Option<MouseButtonCode>,
    /// Bitmask of the buttons held, as reported by the host.
    pub buttons: u16,
    /// Held buttons in press order, without duplicates.
    pub held: SmallVec<[MouseButtonCode; 4]>,
    pub position: PointerPosition,
}

impl MouseState {
    pub fn is_button_held(&self, button: MouseButtonCode) -> bool {
        self.held.contains(&button)
    }
}

#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    /// Last character key pressed, cleared on any key-up.
    pub key: Option<String>,
    /// Held keys in press order, without duplicates.
    pub held: SmallVec<[String; 8]>,
}

impl KeyboardState {
    pub fn is_key_held(&self, key: &str) -> bool {
        self.held.iter().any(|k| k == key)
    }
}

/// One active contact on a touch surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Stable identifier for the lifetime of the contact.
    pub id: i64,
    pub pos: Vec2,
    /// Contact ellipse radii.
    pub radius: Vec2,
    pub angle: f32,
    pub force: f32,
}

impl TouchPoint {
    /// Touch point with the defaults used when the host omits contact data.
    pub fn new(id: i64, x: f32, y: f32) -> Self {
        Self {
            id,
            pos: Vec2::new(x, y),
            radius: Vec2::ONE,
            angle: 0.0,
            force: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TouchState {
    /// Active contacts in the order they were first seen.
    pub points: Vec<TouchPoint>,
}

impl TouchState {
    pub fn is_active(&self) -> bool {
        !self.points.is_empty()
    }

    pub fn primary(&self) -> Option<&TouchPoint> {
        self.points.first()
    }

    /// Replace the entry with the same id, or append a new one.
    fn upsert(&mut self, point: TouchPoint) {
        match self.points.iter_mut().find(|p| p.id == point.id) {
            Some(existing) => *existing = point,
            None => self.points.push(point),
        }
    }

    fn remove(&mut self, id: i64) {
        self.points.retain(|p| p.id != id);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct WatchFlags {
    mouse: bool,
    keyboard: bool,
    touch: bool,
}

/// Resource holding the input snapshot.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    pub mouse: MouseState,
    pub keyboard: KeyboardState,
    pub touch: TouchState,
    watching: WatchFlags,
}

impl InputState {
    /// Snapshot that already watches every device.
    pub fn watching_all() -> Self {
        let mut input = Self::default();
        input.watch_mouse();
        input.watch_keyboard();
        input.watch_touch();
        input
    }

    pub fn watch_mouse(&mut self) -> bool {
        Self::toggle(&mut self.watching.mouse, true, "mouse")
    }

    pub fn unwatch_mouse(&mut self) -> bool {
        Self::toggle(&mut self.watching.mouse, false, "mouse")
    }

    pub fn watch_keyboard(&mut self) -> bool {
        Self::toggle(&mut self.watching.keyboard, true, "keyboard")
    }

    pub fn unwatch_keyboard(&mut self) -> bool {
        Self::toggle(&mut self.watching.keyboard, false, "keyboard")
    }

    pub fn watch_touch(&mut self) -> bool {
        Self::toggle(&mut self.watching.touch, true, "touch")
    }

    pub fn unwatch_touch(&mut self) -> bool {
        Self::toggle(&mut self.watching.touch, false, "touch")
    }

    /// Returns whether the flag actually changed.
    fn toggle(flag: &mut bool, on: bool, device: &str) -> bool {
        if *flag == on {
            return false;
        }
        *flag = on;
        debug!("input: {} {}", if on { "watching" } else { "unwatched" }, device);
        true
    }

    pub fn is_watching(&self, device: InputDevice) -> bool {
        match device {
            InputDevice::Mouse => self.watching.mouse,
            InputDevice::Keyboard => self.watching.keyboard,
            InputDevice::Touch => self.watching.touch,
        }
    }

    /// Point the player aims at: the first touch when any touch is active,
    /// else the mouse position.
    pub fn aim_target(&self) -> Option<Vec2> {
        match self.touch.primary() {
            Some(touch) => Some(touch.pos),
            None => self.mouse.position.current,
        }
    }

    /// Fold one raw event into the snapshot. Returns `false` when the event's
    /// device is not watched and the event was dropped.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        if !self.is_watching(event.device()) {
            return false;
        }
        match event {
            InputEvent::MouseEnter { pos } => {
                self.mouse.position.current = Some(*pos);
                self.mouse.position.previous = None;
            }
            InputEvent::MouseLeave => {
                self.mouse.position.previous = self.mouse.position.current;
                self.mouse.position.current = None;
            }
            InputEvent::MouseMove { pos } => self.mouse.position.advance(*pos),
            InputEvent::MouseDown {
                pos,
                button,
                buttons,
            } => {
                self.mouse.position.advance(*pos);
                self.mouse.button = Some(*button);
                self.mouse.buttons = *buttons;
                if !self.mouse.held.contains(button) {
                    self.mouse.held.push(*button);
                }
            }
            InputEvent::MouseUp {
                pos,
                button,
                buttons,
            } => {
                self.mouse.position.advance(*pos);
                self.mouse.button = Some(*button);
                self.mouse.buttons = *buttons;
                self.mouse.held.retain(|b| b != button);
            }
            InputEvent::KeyDown { key, .. } => {
                if !self.keyboard.is_key_held(key) {
                    self.keyboard.held.push(key.clone());
                }
            }
            InputEvent::KeyPress { key } => self.keyboard.key = Some(key.clone()),
            InputEvent::KeyUp { key } => {
                self.keyboard.key = None;
                self.keyboard.held.retain(|k| k != key);
            }
            InputEvent::TouchStart { touches: points } | InputEvent::TouchMove { changed: points } => {
                for point in points {
                    self.touch.upsert(*point);
                }
            }
            InputEvent::TouchEnd { changed } => {
                for point in changed {
                    self.touch.remove(point.id);
                }
            }
        }
        true
    }
}
