//! Logical canvas size resource.
//!
//! Fixed when the engine is set up. The frame walk clears this area each
//! frame and bullets use it as their play-field bounds.

use bevy_ecs::prelude::Resource;

/// Canvas size in logical pixels.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    /// Width in pixels.
    pub w: f32,
    /// Height in pixels.
    pub h: f32,
}

impl CanvasSize {
    /// Whether a point lies inside `[0, w] x [0, h]`.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && x <= self.w && y >= 0.0 && y <= self.h
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self { w: 400.0, h: 400.0 }
    }
}
