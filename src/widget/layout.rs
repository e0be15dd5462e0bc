//! Placement helpers used by `rect_for` implementations.
//!
//! Layout is two-pass across frames: a parent hands out rects from the min
//! sizes its children reported on the previous frame, and box containers
//! share free space using last frame's totals.

use crate::geometry::{Rect, Size};
use crate::options::{Expand, Gravity};

/// Place a child of `min` size inside `avail`.
///
/// Expanded axes take the whole of `avail`. Other axes take `min` (capped by
/// `avail`) and are positioned by gravity.
pub fn place_in(avail: Rect, min: Size, expand: Expand, gravity: Gravity) -> Rect {
    let w = if expand.horizontal() { avail.w } else { min.w.min(avail.w) };
    let h = if expand.vertical() { avail.h } else { min.h.min(avail.h) };
    Rect {
        x: avail.x + (avail.w - w) * gravity.x.clamp(0.0, 1.0),
        y: avail.y + (avail.h - h) * gravity.y.clamp(0.0, 1.0),
        w,
        h,
    }
}

// ---------------------------------------------------------------------------
// Box layout
// ---------------------------------------------------------------------------

/// Main axis of a box container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Horizontal,
    Vertical,
}

/// Totals a box records for the next frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoxSummary {
    /// Sum of the children's min sizes along the main axis.
    pub total_min: f32,
    /// Children that expand along the main axis.
    pub expanders: u32,
}

/// Sequential allocator along a box's main axis.
#[derive(Debug, Clone)]
pub struct BoxLayout {
    dir: Direction,
    prev: BoxSummary,
    cur: BoxSummary,
    used: f32,
}

impl BoxLayout {
    /// Start a frame's allocation from last frame's totals.
    pub fn new(dir: Direction, prev: BoxSummary) -> Self {
        Self { dir, prev, cur: BoxSummary::default(), used: 0.0 }
    }

    pub fn direction(&self) -> Direction {
        self.dir
    }

    /// Allocate the next child's slot inside `avail` (content-relative).
    pub fn next_rect(&mut self, avail: Rect, min: Size, expand: Expand, gravity: Gravity) -> Rect {
        let (main_avail, main_min, expands) = match self.dir {
            Direction::Vertical => (avail.h, min.h, expand.vertical()),
            Direction::Horizontal => (avail.w, min.w, expand.horizontal()),
        };

        let share = if expands && self.prev.expanders > 0 {
            (main_avail - self.prev.total_min).max(0.0) / self.prev.expanders as f32
        } else {
            0.0
        };
        let len = (main_min + share).min((main_avail - self.used).max(0.0));
        if expands {
            self.cur.expanders += 1;
        }

        let slot = match self.dir {
            Direction::Vertical => Rect::new(avail.x, avail.y + self.used, avail.w, len),
            Direction::Horizontal => Rect::new(avail.x + self.used, avail.y, len, avail.h),
        };
        self.used += len;
        place_in(slot, min, expand, gravity)
    }

    /// Fold a child's report: sum along the main axis, max across it.
    pub fn fold(&mut self, acc: Size, child: Size) -> Size {
        match self.dir {
            Direction::Vertical => {
                self.cur.total_min += child.h;
                Size::new(acc.w.max(child.w), acc.h + child.h)
            }
            Direction::Horizontal => {
                self.cur.total_min += child.w;
                Size::new(acc.w + child.w, acc.h.max(child.h))
            }
        }
    }

    /// This frame's totals, to be replayed next frame.
    pub fn summary(&self) -> BoxSummary {
        self.cur
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // place_in
    // -----------------------------------------------------------------------

    #[test]
    fn place_in_gravity() {
        let avail = Rect::new(0.0, 0.0, 10.0, 10.0);
        let min = Size::new(4.0, 2.0);
        assert_eq!(place_in(avail, min, Expand::None, Gravity::TOP_LEFT), Rect::new(0.0, 0.0, 4.0, 2.0));
        assert_eq!(place_in(avail, min, Expand::None, Gravity::CENTER), Rect::new(3.0, 4.0, 4.0, 2.0));
        assert_eq!(place_in(avail, min, Expand::None, Gravity::new(1.0, 1.0)), Rect::new(6.0, 8.0, 4.0, 2.0));
    }

    #[test]
    fn place_in_expand_one_axis() {
        let avail = Rect::new(1.0, 1.0, 10.0, 10.0);
        let r = place_in(avail, Size::new(4.0, 2.0), Expand::Horizontal, Gravity::CENTER);
        assert_eq!(r, Rect::new(1.0, 5.0, 10.0, 2.0));
    }

    #[test]
    fn place_in_caps_oversized_child() {
        let r = place_in(Rect::new(0.0, 0.0, 3.0, 3.0), Size::new(8.0, 1.0), Expand::None, Gravity::CENTER);
        assert_eq!(r, Rect::new(0.0, 1.0, 3.0, 1.0));
    }

    #[test]
    fn place_in_is_deterministic() {
        let avail = Rect::new(0.0, 0.0, 17.0, 9.0);
        let a = place_in(avail, Size::new(5.0, 3.0), Expand::Vertical, Gravity::new(0.3, 0.7));
        let b = place_in(avail, Size::new(5.0, 3.0), Expand::Vertical, Gravity::new(0.3, 0.7));
        assert_eq!(a, b);
    }

    // -----------------------------------------------------------------------
    // BoxLayout
    // -----------------------------------------------------------------------

    #[test]
    fn vertical_box_stacks_min_sizes() {
        let avail = Rect::new(0.0, 0.0, 10.0, 20.0);
        let mut layout = BoxLayout::new(Direction::Vertical, BoxSummary::default());
        let a = layout.next_rect(avail, Size::new(4.0, 1.0), Expand::None, Gravity::TOP_LEFT);
        let b = layout.next_rect(avail, Size::new(6.0, 2.0), Expand::Horizontal, Gravity::TOP_LEFT);
        assert_eq!(a, Rect::new(0.0, 0.0, 4.0, 1.0));
        assert_eq!(b, Rect::new(0.0, 1.0, 10.0, 2.0));
    }

    #[test]
    fn expanders_share_free_space_from_last_frame() {
        let avail = Rect::new(0.0, 0.0, 10.0, 10.0);
        let prev = BoxSummary { total_min: 4.0, expanders: 2 };
        let mut layout = BoxLayout::new(Direction::Vertical, prev);
        let fixed = layout.next_rect(avail, Size::new(1.0, 2.0), Expand::None, Gravity::TOP_LEFT);
        let e1 = layout.next_rect(avail, Size::new(1.0, 1.0), Expand::Vertical, Gravity::TOP_LEFT);
        let e2 = layout.next_rect(avail, Size::new(1.0, 1.0), Expand::Vertical, Gravity::TOP_LEFT);
        assert_eq!(fixed.h, 2.0);
        assert_eq!(e1, Rect::new(0.0, 2.0, 1.0, 4.0));
        assert_eq!(e2, Rect::new(0.0, 6.0, 1.0, 4.0));
        assert_eq!(layout.summary().expanders, 2);
    }

    #[test]
    fn first_frame_expander_gets_min_only() {
        let avail = Rect::new(0.0, 0.0, 10.0, 10.0);
        let mut layout = BoxLayout::new(Direction::Horizontal, BoxSummary::default());
        let r = layout.next_rect(avail, Size::new(3.0, 1.0), Expand::Horizontal, Gravity::TOP_LEFT);
        assert_eq!(r.w, 3.0);
    }

    #[test]
    fn fold_sums_main_axis() {
        let mut layout = BoxLayout::new(Direction::Horizontal, BoxSummary::default());
        let acc = layout.fold(Size::ZERO, Size::new(3.0, 1.0));
        let acc = layout.fold(acc, Size::new(2.0, 4.0));
        assert_eq!(acc, Size::new(5.0, 4.0));
        assert_eq!(layout.summary().total_min, 5.0);
    }

    #[test]
    fn slots_are_clamped_to_remaining_space() {
        let avail = Rect::new(0.0, 0.0, 10.0, 3.0);
        let mut layout = BoxLayout::new(Direction::Vertical, BoxSummary::default());
        layout.next_rect(avail, Size::new(1.0, 2.0), Expand::None, Gravity::TOP_LEFT);
        let r = layout.next_rect(avail, Size::new(1.0, 2.0), Expand::None, Gravity::TOP_LEFT);
        assert_eq!(r, Rect::new(0.0, 2.0, 1.0, 1.0));
    }
}
