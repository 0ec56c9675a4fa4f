//! 2D immediate-mode drawing surface.
//!
//! Entity hooks draw through the [`Canvas2D`] trait using local coordinates;
//! the frame walk applies each entity's translation and rotation before its
//! `render` hook runs. The semantics follow the HTML canvas model: `save` and
//! `restore` push and pop the transform and both styles, and path points are
//! transformed at the moment they are added.
//!
//! Two implementations live in the crate:
//! - [`RecordingCanvas`] – records every call, used by tests and headless runs
//! - `RaylibCanvas` (behind the `raylib` feature) – draws into a raylib frame
//!
//! Backends that rasterize paths embed a [`CanvasState`], which owns the
//! transform/style stack and tessellates paths into screen-space polylines.

use glam::{Affine2, Vec2};

/// Segments used to tessellate a full circle.
const ARC_SEGMENTS: f32 = 32.0;

/// Colour with 8-bit channels and a 0..1 alpha, as in CSS `rgba()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const RED: Rgba = Rgba::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// The drawing primitives the engine core needs from its host.
pub trait Canvas2D {
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn rotate(&mut self, radians: f32);
    fn set_stroke_style(&mut self, color: Rgba);
    fn set_fill_style(&mut self, color: Rgba);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    /// Circular arc around `(x, y)` from `start` to `end` radians.
    fn arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32);
    fn close_path(&mut self);
    fn stroke(&mut self);
    fn fill(&mut self);
    fn stroke_text(&mut self, text: &str, x: f32, y: f32);
}

#[derive(Debug, Clone, Copy)]
struct DrawState {
    transform: Affine2,
    stroke: Rgba,
    fill: Rgba,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine2::IDENTITY,
            stroke: Rgba::BLACK,
            fill: Rgba::BLACK,
        }
    }
}

/// One open or closed polyline of the current path, in screen space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubPath {
    pub points: Vec<Vec2>,
    pub closed: bool,
}

/// Transform/style stack plus the current path.
#[derive(Debug, Clone, Default)]
pub struct CanvasState {
    current: DrawState,
    saved: Vec<DrawState>,
    path: Vec<SubPath>,
}

impl CanvasState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Pop the last saved state. An unbalanced restore is ignored.
    pub fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.current = state;
        }
    }

    /// Number of states currently saved.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn translate(&mut self, x: f32, y: f32) {
        self.current.transform = self.current.transform * Affine2::from_translation(Vec2::new(x, y));
    }

    pub fn rotate(&mut self, radians: f32) {
        self.current.transform = self.current.transform * Affine2::from_angle(radians);
    }

    pub fn transform(&self) -> Affine2 {
        self.current.transform
    }

    /// Map a local point through the current transform.
    pub fn to_screen(&self, x: f32, y: f32) -> Vec2 {
        self.current.transform.transform_point2(Vec2::new(x, y))
    }

    pub fn set_stroke_style(&mut self, color: Rgba) {
        self.current.stroke = color;
    }

    pub fn set_fill_style(&mut self, color: Rgba) {
        self.current.fill = color;
    }

    pub fn stroke_style(&self) -> Rgba {
        self.current.stroke
    }

    pub fn fill_style(&self) -> Rgba {
        self.current.fill
    }

    pub fn begin_path(&mut self) {
        self.path.clear();
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        let point = self.to_screen(x, y);
        self.path.push(SubPath {
            points: vec![point],
            closed: false,
        });
    }

    /// Extend the current sub-path. Without one this behaves like `move_to`.
    pub fn line_to(&mut self, x: f32, y: f32) {
        let point = self.to_screen(x, y);
        match self.path.last_mut() {
            Some(sub) if !sub.closed => sub.points.push(point),
            _ => self.path.push(SubPath {
                points: vec![point],
                closed: false,
            }),
        }
    }

    pub fn arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32) {
        let sweep = end - start;
        let segments = ((sweep.abs() / std::f32::consts::TAU) * ARC_SEGMENTS)
            .ceil()
            .max(1.0) as usize;
        for i in 0..=segments {
            let angle = start + sweep * (i as f32 / segments as f32);
            let (sin, cos) = angle.sin_cos();
            self.line_to(x + radius * cos, y + radius * sin);
        }
    }

    pub fn close_path(&mut self) {
        if let Some(sub) = self.path.last_mut() {
            sub.closed = true;
        }
    }

    pub fn subpaths(&self) -> &[SubPath] {
        &self.path
    }
}

/// A single recorded canvas call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    ClearRect { x: f32, y: f32, width: f32, height: f32 },
    Save,
    Restore,
    Translate(Vec2),
    Rotate(f32),
    StrokeStyle(Rgba),
    FillStyle(Rgba),
    BeginPath,
    MoveTo(Vec2),
    LineTo(Vec2),
    Arc { center: Vec2, radius: f32, start: f32, end: f32 },
    ClosePath,
    Stroke,
    Fill,
    StrokeText { text: String, at: Vec2 },
}

/// Canvas that records calls instead of drawing them.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCmd>,
    state: CanvasState,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCmd> {
        std::mem::take(&mut self.commands)
    }

    pub fn state(&self) -> &CanvasState {
        &self.state
    }

    /// Text of every `stroke_text` call, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::StrokeText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas2D for RecordingCanvas {
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCmd::ClearRect {
            x,
            y,
            width,
            height,
        });
    }

    fn save(&mut self) {
        self.state.save();
        self.commands.push(DrawCmd::Save);
    }

    fn restore(&mut self) {
        self.state.restore();
        self.commands.push(DrawCmd::Restore);
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.state.translate(x, y);
        self.commands.push(DrawCmd::Translate(Vec2::new(x, y)));
    }

    fn rotate(&mut self, radians: f32) {
        self.state.rotate(radians);
        self.commands.push(DrawCmd::Rotate(radians));
    }

    fn set_stroke_style(&mut self, color: Rgba) {
        self.state.set_stroke_style(color);
        self.commands.push(DrawCmd::StrokeStyle(color));
    }

    fn set_fill_style(&mut self, color: Rgba) {
        self.state.set_fill_style(color);
        self.commands.push(DrawCmd::FillStyle(color));
    }

    fn begin_path(&mut self) {
        self.state.begin_path();
        self.commands.push(DrawCmd::BeginPath);
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.state.move_to(x, y);
        self.commands.push(DrawCmd::MoveTo(Vec2::new(x, y)));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.state.line_to(x, y);
        self.commands.push(DrawCmd::LineTo(Vec2::new(x, y)));
    }

    fn arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32) {
        self.state.arc(x, y, radius, start, end);
        self.commands.push(DrawCmd::Arc {
            center: Vec2::new(x, y),
            radius,
            start,
            end,
        });
    }

    fn close_path(&mut self) {
        self.state.close_path();
        self.commands.push(DrawCmd::ClosePath);
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCmd::Stroke);
    }

    fn fill(&mut self) {
        self.commands.push(DrawCmd::Fill);
    }

    fn stroke_text(&mut self, text: &str, x: f32, y: f32) {
        self.commands.push(DrawCmd::StrokeText {
            text: text.to_string(),
            at: Vec2::new(x, y),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn test_translate_then_rotate_composes_like_html_canvas() {
        let mut state = CanvasState::new();
        state.translate(100.0, 50.0);
        state.rotate(std::f32::consts::FRAC_PI_2);
        // Local +x points down the screen after a quarter turn.
        assert!(approx(state.to_screen(10.0, 0.0), Vec2::new(100.0, 60.0)));
    }

    #[test]
    fn test_restore_brings_back_transform_and_styles() {
        let mut state = CanvasState::new();
        state.save();
        state.translate(5.0, 5.0);
        state.set_stroke_style(Rgba::RED);
        state.restore();
        assert!(approx(state.to_screen(1.0, 1.0), Vec2::new(1.0, 1.0)));
        assert_eq!(state.stroke_style(), Rgba::BLACK);
        assert_eq!(state.depth(), 0);
    }

    #[test]
    fn test_unbalanced_restore_is_ignored() {
        let mut state = CanvasState::new();
        state.translate(3.0, 0.0);
        state.restore();
        assert!(approx(state.to_screen(0.0, 0.0), Vec2::new(3.0, 0.0)));
    }

    #[test]
    fn test_full_arc_is_closed_ring_of_points_at_radius() {
        let mut state = CanvasState::new();
        state.translate(20.0, 20.0);
        state.begin_path();
        state.arc(0.0, 0.0, 10.0, 0.0, std::f32::consts::TAU);
        state.close_path();

        let subpaths = state.subpaths();
        assert_eq!(subpaths.len(), 1);
        assert!(subpaths[0].closed);
        assert_eq!(subpaths[0].points.len(), ARC_SEGMENTS as usize + 1);
        for p in &subpaths[0].points {
            assert!(((*p - Vec2::new(20.0, 20.0)).length() - 10.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_line_to_without_subpath_starts_one() {
        let mut state = CanvasState::new();
        state.begin_path();
        state.line_to(1.0, 2.0);
        state.line_to(3.0, 4.0);
        assert_eq!(state.subpaths().len(), 1);
        assert_eq!(state.subpaths()[0].points.len(), 2);
    }

    #[test]
    fn test_recording_canvas_keeps_call_order() {
        let mut canvas = RecordingCanvas::new();
        canvas.save();
        canvas.translate(1.0, 2.0);
        canvas.stroke_text("hello", 0.0, 0.0);
        canvas.restore();
        assert_eq!(
            canvas.commands(),
            &[
                DrawCmd::Save,
                DrawCmd::Translate(Vec2::new(1.0, 2.0)),
                DrawCmd::StrokeText {
                    text: "hello".to_string(),
                    at: Vec2::ZERO,
                },
                DrawCmd::Restore,
            ]
        );
        assert_eq!(canvas.texts(), vec!["hello"]);
        assert_eq!(canvas.state().depth(), 0);
    }
}
