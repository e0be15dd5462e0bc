//! Draw commands: what a frame asks the backend to paint.
//!
//! Widgets append commands to the current subwindow's list while they
//! install; the lists are concatenated in z-order at the end of the frame.
//! Coordinates are screen space. Every command carries the clip rect that
//! was active when it was recorded.

use crate::geometry::{Rect, Spacing};
use crate::theme::Color;

/// One paint operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Solid rectangle.
    Fill { rect: Rect, color: Color, clip: Rect },
    /// Rectangle outline with per-side widths.
    Border { rect: Rect, width: Spacing, color: Color, clip: Rect },
    /// A run of text whose first glyph sits at `rect`'s top-left corner.
    Text { rect: Rect, text: String, color: Color, clip: Rect },
}

impl DrawCmd {
    /// The clip rect recorded with the command.
    pub fn clip(&self) -> Rect {
        match self {
            DrawCmd::Fill { clip, .. } | DrawCmd::Border { clip, .. } | DrawCmd::Text { clip, .. } => *clip,
        }
    }

    /// The area the command paints, before clipping.
    pub fn rect(&self) -> Rect {
        match self {
            DrawCmd::Fill { rect, .. } | DrawCmd::Border { rect, .. } | DrawCmd::Text { rect, .. } => *rect,
        }
    }

    /// Whether clipping removes the whole command.
    pub fn is_clipped_out(&self) -> bool {
        self.rect().intersect(self.clip()).is_empty()
    }
}
