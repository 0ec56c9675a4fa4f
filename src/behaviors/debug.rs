//! On-canvas debug readout of the input snapshot.

use crate::components::behavior::EntityHooks;
use crate::resources::input::InputState;
use crate::resources::scene::SceneRoots;
use crate::systems::frame::FrameContext;

const LINE_HEIGHT: f32 = 20.0;

fn coord(value: Option<f32>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.0}"))
}

fn optional<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Text lines shown by [`DebugOverlayHooks`].
pub fn overlay_lines(input: &InputState, aim_origin: glam::Vec2, root_count: usize) -> Vec<String> {
    let current = input.mouse.position.current;
    let held: Vec<String> = input.mouse.held.iter().map(|b| b.to_string()).collect();
    let angle = current.map(|p| {
        let d = p - aim_origin;
        d.y.atan2(d.x)
    });
    let touch = match input.touch.primary() {
        Some(t) => format!(
            "touch: id {} x {:.0} y {:.0} r {:.0}x{:.0} angle {:.0} force {:.0}",
            t.id, t.pos.x, t.pos.y, t.radius.x, t.radius.y, t.angle, t.force
        ),
        None => "touch: -".to_string(),
    };
    vec![
        format!(
            "mouseX: {} mouseY: {} button: {} buttons: {} held: [{}]",
            coord(current.map(|p| p.x)),
            coord(current.map(|p| p.y)),
            optional(input.mouse.button),
            input.mouse.buttons,
            held.join(",")
        ),
        format!("angle: {}", optional(angle.map(|a| format!("{a:.3}")))),
        format!(
            "kb: key {} keys [{}]",
            optional(input.keyboard.key.as_deref()),
            input.keyboard.held.join(",")
        ),
        touch,
        format!("1 level entities: {}", root_count),
    ]
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DebugOverlayHooks;

impl EntityHooks for DebugOverlayHooks {
    fn render(&mut self, ctx: &mut FrameContext<'_>) {
        let input = ctx.input();
        let size = ctx.canvas_size();
        let center = glam::Vec2::new(size.w * 0.5, size.h * 0.5);
        let roots = ctx
            .world
            .get_resource::<SceneRoots>()
            .map_or(0, |roots| roots.len());
        for (i, line) in overlay_lines(&input, center, roots).iter().enumerate() {
            ctx.canvas.stroke_text(line, 0.0, i as f32 * LINE_HEIGHT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::input::InputEvent;
    use glam::Vec2;

    #[test]
    fn test_lines_show_dashes_without_pointer() {
        let input = InputState::watching_all();
        let lines = overlay_lines(&input, Vec2::ZERO, 3);
        assert_eq!(lines[0], "mouseX: - mouseY: - button: - buttons: 0 held: []");
        assert_eq!(lines[1], "angle: -");
        assert_eq!(lines[3], "touch: -");
        assert_eq!(lines[4], "1 level entities: 3");
    }

    #[test]
    fn test_lines_reflect_pointer_and_keys() {
        let mut input = InputState::watching_all();
        input.handle(&InputEvent::MouseMove {
            pos: Vec2::new(210.0, 200.0),
        });
        input.handle(&InputEvent::KeyDown {
            key: "w".into(),
            repeat: false,
        });
        input.handle(&InputEvent::KeyPress { key: "w".into() });
        let lines = overlay_lines(&input, Vec2::new(200.0, 200.0), 1);
        assert!(lines[0].starts_with("mouseX: 210 mouseY: 200"));
        assert_eq!(lines[1], "angle: 0.000");
        assert_eq!(lines[2], "kb: key w keys [w]");
    }
}
