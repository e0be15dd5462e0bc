//! Snapshot rendering helpers.
//!
//! Functions for converting a frame's draw commands into plain-text strings
//! suitable for snapshot testing and assertions.

use std::fmt::Write as _;

use crate::render::{Compositor, DrawCmd};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Rasterize `cmds` onto a `width` x `height` cell grid and return it as text.
///
/// Each row becomes one line with trailing spaces trimmed. Lines are
/// separated by `'\n'`; the final line has no trailing newline.
///
/// # Examples
///
/// ```
/// use framekit::{Color, DrawCmd, Rect};
/// use framekit::testing::render_to_string;
///
/// let screen = Rect::new(0.0, 0.0, 10.0, 1.0);
/// let cmds = [DrawCmd::Text { rect: screen, text: "Hello".into(), color: Color::WHITE, clip: screen }];
/// assert_eq!(render_to_string(&cmds, 10, 1), "Hello");
/// ```
pub fn render_to_string(cmds: &[DrawCmd], width: u16, height: u16) -> String {
    let mut compositor = Compositor::new(width, height);
    compositor.render(cmds);
    compositor.to_text()
}

/// Describe a draw list, one command per line, back to front.
///
/// Colors are left out; geometry and text are kept. Useful for checking draw
/// order across subwindows.
pub fn describe_commands(cmds: &[DrawCmd]) -> String {
    let mut out = String::new();
    for cmd in cmds {
        let r = cmd.rect();
        let _ = match cmd {
            DrawCmd::Fill { .. } => writeln!(out, "fill {} {} {}x{}", r.x, r.y, r.w, r.h),
            DrawCmd::Border { .. } => writeln!(out, "border {} {} {}x{}", r.x, r.y, r.w, r.h),
            DrawCmd::Text { text, .. } => writeln!(out, "text {} {} {text:?}", r.x, r.y),
        };
    }
    out.truncate(out.trim_end().len());
    out
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Rect, Spacing};
    use crate::theme::Color;

    const CLIP: Rect = Rect::new(0.0, 0.0, 8.0, 3.0);

    #[test]
    fn render_text_and_border() {
        let cmds = [
            DrawCmd::Border { rect: Rect::new(0.0, 0.0, 6.0, 3.0), width: Spacing::all(1.0), color: Color::WHITE, clip: CLIP },
            DrawCmd::Text { rect: Rect::new(1.0, 1.0, 4.0, 1.0), text: "abcd".into(), color: Color::WHITE, clip: CLIP },
        ];
        insta::assert_snapshot!(render_to_string(&cmds, 8, 3), @r"
        ┌────┐
        │abcd│
        └────┘
        ");
    }

    #[test]
    fn empty_grid_renders_blank_lines() {
        assert_eq!(render_to_string(&[], 3, 2), "\n");
        assert_eq!(render_to_string(&[], 0, 0), "");
    }

    #[test]
    fn describe_lists_commands_in_order() {
        let cmds = [
            DrawCmd::Fill { rect: Rect::new(0.0, 0.0, 2.0, 1.0), color: Color::BLACK, clip: CLIP },
            DrawCmd::Text { rect: Rect::new(1.0, 0.0, 1.0, 1.0), text: "x".into(), color: Color::WHITE, clip: CLIP },
        ];
        assert_eq!(describe_commands(&cmds), "fill 0 0 2x1\ntext 1 0 \"x\"");
    }
}
