//! Presentation options with class-default / call-site override resolution.
//!
//! Every widget kind has a set of default [`Options`]; the caller passes its
//! own, and the widget's resolved options are `defaults.override_with(&call_site)`.
//! Unset fields fall through to the default, then to the accessor's fallback.

use crate::geometry::{Rect, Size, Spacing};
use crate::theme::{ColorRef, ThemeColor, ThemeFont};

// ---------------------------------------------------------------------------
// Expand / Gravity
// ---------------------------------------------------------------------------

/// Whether a widget takes all the space its parent offers on an axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Expand {
    #[default]
    None,
    Horizontal,
    Vertical,
    Both,
}

impl Expand {
    #[inline]
    pub fn horizontal(self) -> bool {
        matches!(self, Expand::Horizontal | Expand::Both)
    }

    #[inline]
    pub fn vertical(self) -> bool {
        matches!(self, Expand::Vertical | Expand::Both)
    }
}

/// Where a non-expanded widget sits inside the space offered to it.
///
/// `0.0` = start, `0.5` = center, `1.0` = end, per axis.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Gravity {
    pub x: f32,
    pub y: f32,
}

impl Gravity {
    pub const TOP_LEFT: Gravity = Gravity { x: 0.0, y: 0.0 };
    pub const CENTER: Gravity = Gravity { x: 0.5, y: 0.5 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Presentation attributes of a widget. `None` means "not specified here".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Options {
    /// Discriminator for widgets installed from the same call site (loops).
    pub id_extra: Option<usize>,
    /// Debug name shown in logs.
    pub name: Option<&'static str>,
    /// Explicit parent-relative rect; bypasses the parent's `rect_for`.
    pub rect: Option<Rect>,
    pub expand: Option<Expand>,
    pub gravity_x: Option<f32>,
    pub gravity_y: Option<f32>,
    /// Minimum content size regardless of children.
    pub min_size_content: Option<Size>,
    pub margin: Option<Spacing>,
    pub border: Option<Spacing>,
    pub padding: Option<Spacing>,
    pub background: Option<bool>,
    pub color_fill: Option<ColorRef>,
    pub color_text: Option<ColorRef>,
    pub color_border: Option<ColorRef>,
    pub font: Option<ThemeFont>,
    /// Tab order; focusable widgets without one keep installation order.
    pub tab_index: Option<u16>,
}

impl Options {
    /// Empty options (everything unspecified).
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of `self` with every field set in `other` replacing ours.
    pub fn override_with(&self, other: &Options) -> Options {
        Options {
            id_extra: other.id_extra.or(self.id_extra),
            name: other.name.or(self.name),
            rect: other.rect.or(self.rect),
            expand: other.expand.or(self.expand),
            gravity_x: other.gravity_x.or(self.gravity_x),
            gravity_y: other.gravity_y.or(self.gravity_y),
            min_size_content: other.min_size_content.or(self.min_size_content),
            margin: other.margin.or(self.margin),
            border: other.border.or(self.border),
            padding: other.padding.or(self.padding),
            background: other.background.or(self.background),
            color_fill: other.color_fill.or(self.color_fill),
            color_text: other.color_text.or(self.color_text),
            color_border: other.color_border.or(self.color_border),
            font: other.font.or(self.font),
            tab_index: other.tab_index.or(self.tab_index),
        }
    }

    // ── Builders ─────────────────────────────────────────────────────

    pub fn with_id_extra(mut self, extra: usize) -> Self {
        self.id_extra = Some(extra);
        self
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }

    pub fn with_expand(mut self, expand: Expand) -> Self {
        self.expand = Some(expand);
        self
    }

    pub fn with_gravity(mut self, gravity: Gravity) -> Self {
        self.gravity_x = Some(gravity.x);
        self.gravity_y = Some(gravity.y);
        self
    }

    pub fn with_min_size_content(mut self, size: Size) -> Self {
        self.min_size_content = Some(size);
        self
    }

    pub fn with_margin(mut self, margin: Spacing) -> Self {
        self.margin = Some(margin);
        self
    }

    pub fn with_border(mut self, border: Spacing) -> Self {
        self.border = Some(border);
        self
    }

    pub fn with_padding(mut self, padding: Spacing) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn with_background(mut self, background: bool) -> Self {
        self.background = Some(background);
        self
    }

    pub fn with_color_fill(mut self, color: impl Into<ColorRef>) -> Self {
        self.color_fill = Some(color.into());
        self
    }

    pub fn with_color_text(mut self, color: impl Into<ColorRef>) -> Self {
        self.color_text = Some(color.into());
        self
    }

    pub fn with_color_border(mut self, color: impl Into<ColorRef>) -> Self {
        self.color_border = Some(color.into());
        self
    }

    pub fn with_font(mut self, font: ThemeFont) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_tab_index(mut self, tab_index: u16) -> Self {
        self.tab_index = Some(tab_index);
        self
    }

    // ── Resolved accessors ───────────────────────────────────────────

    pub fn expand(&self) -> Expand {
        self.expand.unwrap_or_default()
    }

    pub fn gravity(&self) -> Gravity {
        Gravity::new(self.gravity_x.unwrap_or(0.0), self.gravity_y.unwrap_or(0.0))
    }

    pub fn margin(&self) -> Spacing {
        self.margin.unwrap_or_default()
    }

    pub fn border(&self) -> Spacing {
        self.border.unwrap_or_default()
    }

    pub fn padding(&self) -> Spacing {
        self.padding.unwrap_or_default()
    }

    pub fn background(&self) -> bool {
        self.background.unwrap_or(false)
    }

    pub fn min_size_content(&self) -> Size {
        self.min_size_content.unwrap_or_default()
    }

    pub fn color_fill(&self) -> ColorRef {
        self.color_fill.unwrap_or(ColorRef::Theme(ThemeColor::Fill))
    }

    pub fn color_text(&self) -> ColorRef {
        self.color_text.unwrap_or(ColorRef::Theme(ThemeColor::Text))
    }

    pub fn color_border(&self) -> ColorRef {
        self.color_border.unwrap_or(ColorRef::Theme(ThemeColor::Border))
    }

    pub fn font(&self) -> ThemeFont {
        self.font.unwrap_or(ThemeFont::Body)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
