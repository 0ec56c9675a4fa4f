//! [`Canvas2D`] implementation drawing into a raylib frame.

use glam::Vec2;
use raylib::prelude::*;

use crate::canvas::{Canvas2D, CanvasState, Rgba};

const FONT_SIZE: i32 = 10;
const CLEAR_COLOR: Color = Color::WHITE;

fn to_vector(p: Vec2) -> Vector2 {
    Vector2::new(p.x, p.y)
}

fn to_color(c: Rgba) -> Color {
    Color::new(c.r, c.g, c.b, (c.a.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Canvas drawing through any raylib draw handle.
pub struct RaylibCanvas<'a, D: RaylibDraw> {
    d: &'a mut D,
    state: CanvasState,
}

impl<'a, D: RaylibDraw> RaylibCanvas<'a, D> {
    pub fn new(d: &'a mut D) -> Self {
        Self {
            d,
            state: CanvasState::new(),
        }
    }
}

impl<D: RaylibDraw> Canvas2D for RaylibCanvas<'_, D> {
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let origin = self.state.to_screen(x, y);
        self.d.draw_rectangle_v(
            to_vector(origin),
            Vector2::new(width, height),
            CLEAR_COLOR,
        );
    }

    fn save(&mut self) {
        self.state.save();
    }

    fn restore(&mut self) {
        self.state.restore();
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.state.translate(x, y);
    }

    fn rotate(&mut self, radians: f32) {
        self.state.rotate(radians);
    }

    fn set_stroke_style(&mut self, color: Rgba) {
        self.state.set_stroke_style(color);
    }

    fn set_fill_style(&mut self, color: Rgba) {
        self.state.set_fill_style(color);
    }

    fn begin_path(&mut self) {
        self.state.begin_path();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.state.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.state.line_to(x, y);
    }

    fn arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32) {
        self.state.arc(x, y, radius, start, end);
    }

    fn close_path(&mut self) {
        self.state.close_path();
    }

    fn stroke(&mut self) {
        let color = to_color(self.state.stroke_style());
        for sub in self.state.subpaths() {
            for pair in sub.points.windows(2) {
                self.d
                    .draw_line_v(to_vector(pair[0]), to_vector(pair[1]), color);
            }
            if sub.closed && sub.points.len() > 2 {
                if let (Some(first), Some(last)) = (sub.points.first(), sub.points.last()) {
                    self.d.draw_line_v(to_vector(*last), to_vector(*first), color);
                }
            }
        }
    }

    fn fill(&mut self) {
        let color = to_color(self.state.fill_style());
        for sub in self.state.subpaths() {
            let Some(&anchor) = sub.points.first() else {
                continue;
            };
            // fan triangulation, fine for the convex shapes the game draws
            for pair in sub.points[1..].windows(2) {
                let (mut b, mut c) = (pair[0], pair[1]);
                // raylib wants counter-clockwise on screen (y down)
                if (b - anchor).perp_dot(c - anchor) > 0.0 {
                    std::mem::swap(&mut b, &mut c);
                }
                self.d
                    .draw_triangle(to_vector(anchor), to_vector(b), to_vector(c), color);
            }
        }
    }

    fn stroke_text(&mut self, text: &str, x: f32, y: f32) {
        let at = self.state.to_screen(x, y);
        let color = to_color(self.state.stroke_style());
        self.d
            .draw_text(text, at.x.round() as i32, at.y.round() as i32, FONT_SIZE, color);
    }
}
