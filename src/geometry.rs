//! Core geometry types: Point, Size, Rect, Spacing, RectScale.
//!
//! Widget rectangles are parent-relative and expressed in logical units. A
//! [`RectScale`] pairs a screen-space rectangle with the scale that maps
//! logical units onto it, which is what draw commands are built from.

use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D position or displacement.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Multiply both coordinates by `s`.
    #[inline]
    pub fn scale(self, s: f32) -> Point {
        Point { x: self.x * s, y: self.y * s }
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A 2D size (width x height).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size {
    pub w: f32,
    pub h: f32,
}

impl Size {
    /// A zero-sized size.
    pub const ZERO: Size = Size { w: 0.0, h: 0.0 };

    /// Create a new size.
    #[inline]
    pub const fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Size) -> Size {
        Size { w: self.w.max(other.w), h: self.h.max(other.h) }
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Size) -> Size {
        Size { w: self.w.min(other.w), h: self.h.min(other.h) }
    }

    /// Grow by the extent of `pad` on each axis.
    #[inline]
    pub fn pad(self, pad: Spacing) -> Size {
        Size { w: self.w + pad.width(), h: self.h + pad.height() }
    }

    /// Convert to a [`Rect`] positioned at the origin.
    #[inline]
    pub const fn to_rect(self) -> Rect {
        Rect { x: 0.0, y: 0.0, w: self.w, h: self.h }
    }
}

impl Add for Size {
    type Output = Size;
    #[inline]
    fn add(self, rhs: Size) -> Size {
        Size { w: self.w + rhs.w, h: self.h + rhs.h }
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// A rectangle defined by its top-left corner and size.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// An empty rect at the origin.
    pub const EMPTY: Rect = Rect { x: 0.0, y: 0.0, w: 0.0, h: 0.0 };

    /// Create a new rect.
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build a rect from a position and a size.
    #[inline]
    pub const fn from_point_size(p: Point, s: Size) -> Self {
        Self { x: p.x, y: p.y, w: s.w, h: s.h }
    }

    /// The right edge (exclusive).
    #[inline]
    pub fn right(self) -> f32 {
        self.x + self.w
    }

    /// The bottom edge (exclusive).
    #[inline]
    pub fn bottom(self) -> f32 {
        self.y + self.h
    }

    /// The top-left corner.
    #[inline]
    pub const fn top_left(self) -> Point {
        Point { x: self.x, y: self.y }
    }

    /// The dimensions.
    #[inline]
    pub const fn size(self) -> Size {
        Size { w: self.w, h: self.h }
    }

    /// The same size, moved to the origin.
    #[inline]
    pub const fn just_size(self) -> Rect {
        Rect { x: 0.0, y: 0.0, w: self.w, h: self.h }
    }

    /// Whether the rect has no area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Whether `p` lies inside (right and bottom edges exclusive).
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Intersection of two rects. Returns [`Rect::EMPTY`]-sized rect when disjoint.
    pub fn intersect(self, other: Rect) -> Rect {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        if x2 <= x1 || y2 <= y1 {
            Rect { x: x1, y: y1, w: 0.0, h: 0.0 }
        } else {
            Rect { x: x1, y: y1, w: x2 - x1, h: y2 - y1 }
        }
    }

    /// Smallest rect containing both.
    pub fn union(self, other: Rect) -> Rect {
        let x1 = self.x.min(other.x);
        let y1 = self.y.min(other.y);
        let x2 = self.right().max(other.right());
        let y2 = self.bottom().max(other.bottom());
        Rect { x: x1, y: y1, w: x2 - x1, h: y2 - y1 }
    }

    /// Translate by `offset`.
    #[inline]
    pub fn offset(self, offset: Point) -> Rect {
        Rect { x: self.x + offset.x, y: self.y + offset.y, w: self.w, h: self.h }
    }

    /// Contract inward by `s`. Width and height are clamped to zero.
    #[inline]
    pub fn inset(self, s: Spacing) -> Rect {
        Rect {
            x: self.x + s.left,
            y: self.y + s.top,
            w: (self.w - s.width()).max(0.0),
            h: (self.h - s.height()).max(0.0),
        }
    }

    /// Expand outward by `s`.
    #[inline]
    pub fn outset(self, s: Spacing) -> Rect {
        Rect {
            x: self.x - s.left,
            y: self.y - s.top,
            w: self.w + s.width(),
            h: self.h + s.height(),
        }
    }

    /// Multiply position and size by `s`.
    #[inline]
    pub fn scale(self, s: f32) -> Rect {
        Rect { x: self.x * s, y: self.y * s, w: self.w * s, h: self.h * s }
    }
}

// ---------------------------------------------------------------------------
// Spacing
// ---------------------------------------------------------------------------

/// Spacing around the four sides of a rectangle: margin, border, padding.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Spacing {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Spacing {
    /// Zero spacing on all sides.
    pub const ZERO: Spacing = Spacing { top: 0.0, right: 0.0, bottom: 0.0, left: 0.0 };

    /// Create spacing with explicit values for each side.
    #[inline]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }

    /// All four sides set to the same value.
    #[inline]
    pub const fn all(v: f32) -> Self {
        Self { top: v, right: v, bottom: v, left: v }
    }

    /// `vertical` for top/bottom, `horizontal` for left/right.
    #[inline]
    pub const fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self { top: vertical, right: horizontal, bottom: vertical, left: horizontal }
    }

    /// `left + right`.
    #[inline]
    pub fn width(self) -> f32 {
        self.left + self.right
    }

    /// `top + bottom`.
    #[inline]
    pub fn height(self) -> f32 {
        self.top + self.bottom
    }

    /// Whether any side is non-zero.
    #[inline]
    pub fn is_nonzero(self) -> bool {
        self.top != 0.0 || self.right != 0.0 || self.bottom != 0.0 || self.left != 0.0
    }
}

impl Add for Spacing {
    type Output = Spacing;
    #[inline]
    fn add(self, rhs: Spacing) -> Spacing {
        Spacing {
            top: self.top + rhs.top,
            right: self.right + rhs.right,
            bottom: self.bottom + rhs.bottom,
            left: self.left + rhs.left,
        }
    }
}

// ---------------------------------------------------------------------------
// RectScale
// ---------------------------------------------------------------------------

/// A screen-space rectangle plus the scale from logical units to screen units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RectScale {
    /// Screen-space rectangle.
    pub r: Rect,
    /// Screen units per logical unit.
    pub s: f32,
}

impl Default for RectScale {
    fn default() -> Self {
        Self { r: Rect::EMPTY, s: 1.0 }
    }
}

impl RectScale {
    /// Create a new rect/scale pair.
    #[inline]
    pub const fn new(r: Rect, s: f32) -> Self {
        Self { r, s }
    }

    /// Map a rect local to this one into screen space.
    #[inline]
    pub fn rect_to_rect_scale(self, local: Rect) -> RectScale {
        RectScale { r: local.scale(self.s).offset(self.r.top_left()), s: self.s }
    }

    /// Map a local point into screen space.
    #[inline]
    pub fn point_to_screen(self, p: Point) -> Point {
        p.scale(self.s) + self.r.top_left()
    }

    /// Map a screen point into this rect's local space.
    #[inline]
    pub fn point_from_screen(self, p: Point) -> Point {
        (p - self.r.top_left()).scale(1.0 / self.s)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
