//! Cell grid rasterization and diffing.
//!
//! The `Compositor` maintains a 2D grid of [`Cell`]s representing the full
//! terminal screen. A frame's [`DrawCmd`]s are rasterized into the grid in
//! order, so later commands paint over earlier ones. The `diff` method
//! compares two frames and produces only the `CellUpdate`s needed to
//! transition between them.
//!
//! One cell is one screen unit. A cell is covered by a rect when its center
//! lies inside both the rect and the command's clip.

use crate::geometry::{Point, Rect};
use crate::theme::Color;

use super::draw::DrawCmd;

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A single terminal cell: one character with its colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    /// A blank (space) cell with transparent colors.
    pub const fn blank() -> Self {
        Self { ch: ' ', fg: Color::TRANSPARENT, bg: Color::TRANSPARENT }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}

// ---------------------------------------------------------------------------
// CellUpdate
// ---------------------------------------------------------------------------

/// A single cell that changed between frames.
///
/// Used by the driver to emit minimal terminal escape sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellUpdate {
    pub x: u16,
    pub y: u16,
    pub cell: Cell,
}

// ---------------------------------------------------------------------------
// Compositor
// ---------------------------------------------------------------------------

/// A screen buffer that draw commands are rasterized into.
#[derive(Debug, Clone)]
pub struct Compositor {
    /// `screen[y][x]` is the cell at column x, row y.
    screen: Vec<Vec<Cell>>,
    pub width: u16,
    pub height: u16,
}

impl Compositor {
    /// Create a new compositor with a blank screen of the given dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        Self { screen: Self::blank_screen(width, height), width, height }
    }

    /// Resize the screen buffer. All cells are reset to blank.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.screen = Self::blank_screen(width, height);
    }

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        for row in &mut self.screen {
            row.fill(Cell::blank());
        }
    }

    /// Clear, then rasterize `cmds` in order.
    pub fn render(&mut self, cmds: &[DrawCmd]) {
        self.clear();
        for cmd in cmds {
            self.apply(cmd);
        }
    }

    /// Rasterize one command on top of the current contents.
    pub fn apply(&mut self, cmd: &DrawCmd) {
        match cmd {
            DrawCmd::Fill { rect, color, clip } => {
                if color.a == 0 {
                    return;
                }
                let area = rect.intersect(*clip);
                for (x, y) in self.covered(area) {
                    self.with_cell(x, y, |c| c.bg = *color);
                }
            }
            DrawCmd::Border { rect, width, color, clip } => {
                let (l, r, t, b) = (width.left > 0.0, width.right > 0.0, width.top > 0.0, width.bottom > 0.0);
                for (x, y) in self.covered(*rect) {
                    let p = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                    if !clip.contains(p) {
                        continue;
                    }
                    let on_left = l && p.x < rect.x + width.left;
                    let on_right = r && p.x >= rect.right() - width.right;
                    let on_top = t && p.y < rect.y + width.top;
                    let on_bottom = b && p.y >= rect.bottom() - width.bottom;
                    let ch = match (on_left, on_right, on_top, on_bottom) {
                        (true, _, true, _) => '┌',
                        (_, true, true, _) => '┐',
                        (true, _, _, true) => '└',
                        (_, true, _, true) => '┘',
                        (true, _, _, _) | (_, true, _, _) => '│',
                        (_, _, true, _) | (_, _, _, true) => '─',
                        _ => continue,
                    };
                    self.with_cell(x, y, |c| {
                        c.ch = ch;
                        c.fg = *color;
                    });
                }
            }
            DrawCmd::Text { rect, text, color, clip } => {
                let row = rect.y.floor();
                let col0 = rect.x.floor();
                for (i, ch) in text.chars().enumerate() {
                    let x = col0 + i as f32;
                    if !clip.contains(Point::new(x + 0.5, row + 0.5)) || x < 0.0 || row < 0.0 {
                        continue;
                    }
                    self.with_cell(x as u16, row as u16, |c| {
                        c.ch = ch;
                        c.fg = *color;
                    });
                }
            }
        }
    }

    /// Compare this frame against a previous frame and return only the changed cells.
    pub fn diff(&self, previous: &Compositor) -> Vec<CellUpdate> {
        let mut updates = Vec::new();
        for (y, row) in self.screen.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let old = previous.screen.get(y).and_then(|r| r.get(x));
                if old != Some(cell) {
                    updates.push(CellUpdate { x: x as u16, y: y as u16, cell: *cell });
                }
            }
        }
        updates
    }

    /// Get the cell at (x, y). Returns `None` if out of bounds.
    pub fn get_cell(&self, x: u16, y: u16) -> Option<&Cell> {
        self.screen.get(y as usize).and_then(|row| row.get(x as usize))
    }

    /// The characters of row `y`, trailing spaces removed.
    pub fn row_text(&self, y: u16) -> String {
        self.screen
            .get(y as usize)
            .map(|row| row.iter().map(|c| c.ch).collect::<String>().trim_end().to_owned())
            .unwrap_or_default()
    }

    /// The whole screen as text, one line per row.
    pub fn to_text(&self) -> String {
        (0..self.height).map(|y| self.row_text(y)).collect::<Vec<_>>().join("\n")
    }

    /// Cells whose centers lie inside `area`, clamped to the screen.
    fn covered(&self, area: Rect) -> impl Iterator<Item = (u16, u16)> {
        let x0 = (area.x - 0.5).ceil().max(0.0) as u16;
        let y0 = (area.y - 0.5).ceil().max(0.0) as u16;
        let x1 = ((area.right() - 0.5).ceil().max(0.0) as u16).min(self.width);
        let y1 = ((area.bottom() - 0.5).ceil().max(0.0) as u16).min(self.height);
        (y0..y1).flat_map(move |y| (x0..x1).map(move |x| (x, y)))
    }

    fn with_cell(&mut self, x: u16, y: u16, f: impl FnOnce(&mut Cell)) {
        if let Some(cell) = self.screen.get_mut(y as usize).and_then(|row| row.get_mut(x as usize)) {
            f(cell);
        }
    }

    fn blank_screen(width: u16, height: u16) -> Vec<Vec<Cell>> {
        (0..height as usize).map(|_| vec![Cell::blank(); width as usize]).collect()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Spacing;

    const FULL: Rect = Rect::new(0.0, 0.0, 100.0, 100.0);

    fn text(x: f32, y: f32, s: &str, clip: Rect) -> DrawCmd {
        DrawCmd::Text { rect: Rect::new(x, y, s.len() as f32, 1.0), text: s.into(), color: Color::WHITE, clip }
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    #[test]
    fn new_compositor_blank_cells() {
        let c = Compositor::new(10, 5);
        for y in 0..5u16 {
            for x in 0..10u16 {
                assert_eq!(c.get_cell(x, y), Some(&Cell::blank()));
            }
        }
    }

    #[test]
    fn get_cell_out_of_bounds() {
        let c = Compositor::new(10, 5);
        assert!(c.get_cell(10, 0).is_none());
        assert!(c.get_cell(0, 5).is_none());
    }

    // -----------------------------------------------------------------------
    // Rasterization
    // -----------------------------------------------------------------------

    #[test]
    fn fill_covers_cells_by_center() {
        let mut c = Compositor::new(6, 3);
        let red = Color::rgb(255, 0, 0);
        c.apply(&DrawCmd::Fill { rect: Rect::new(1.0, 0.0, 2.0, 1.0), color: red, clip: FULL });
        assert_eq!(c.get_cell(0, 0).map(|c| c.bg), Some(Color::TRANSPARENT));
        assert_eq!(c.get_cell(1, 0).map(|c| c.bg), Some(red));
        assert_eq!(c.get_cell(2, 0).map(|c| c.bg), Some(red));
        assert_eq!(c.get_cell(3, 0).map(|c| c.bg), Some(Color::TRANSPARENT));
    }

    #[test]
    fn text_is_clipped() {
        let mut c = Compositor::new(10, 1);
        c.apply(&text(0.0, 0.0, "abcdef", Rect::new(0.0, 0.0, 3.0, 1.0)));
        assert_eq!(c.row_text(0), "abc");
    }

    #[test]
    fn text_off_screen_is_ignored() {
        let mut c = Compositor::new(4, 1);
        c.apply(&text(2.0, 0.0, "abcdef", FULL));
        c.apply(&text(0.0, 3.0, "zz", FULL));
        assert_eq!(c.to_text(), "  ab");
    }

    #[test]
    fn later_commands_paint_over_earlier() {
        let mut c = Compositor::new(5, 1);
        c.render(&[text(0.0, 0.0, "aaaaa", FULL), text(1.0, 0.0, "bb", FULL)]);
        assert_eq!(c.row_text(0), "abbaa");
    }

    #[test]
    fn border_draws_box() {
        let mut c = Compositor::new(4, 3);
        c.apply(&DrawCmd::Border {
            rect: Rect::new(0.0, 0.0, 4.0, 3.0),
            width: Spacing::all(1.0),
            color: Color::WHITE,
            clip: FULL,
        });
        assert_eq!(c.to_text(), "┌──┐\n│  │\n└──┘");
    }

    // -----------------------------------------------------------------------
    // Diff
    // -----------------------------------------------------------------------

    #[test]
    fn diff_identical_is_empty() {
        let a = Compositor::new(4, 2);
        let b = Compositor::new(4, 2);
        assert!(a.diff(&b).is_empty());
    }

    #[test]
    fn diff_reports_changed_cells() {
        let prev = Compositor::new(4, 1);
        let mut next = Compositor::new(4, 1);
        next.apply(&text(1.0, 0.0, "x", FULL));
        let updates = next.diff(&prev);
        assert_eq!(updates.len(), 1);
        assert_eq!((updates[0].x, updates[0].y, updates[0].cell.ch), (1, 0, 'x'));
    }

    #[test]
    fn diff_against_smaller_frame_includes_new_area() {
        let prev = Compositor::new(2, 1);
        let next = Compositor::new(3, 2);
        assert_eq!(next.diff(&prev).len(), 4);
    }
}
