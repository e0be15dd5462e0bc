//! Per-frame widget record.

use std::panic::Location;

use crate::geometry::{Rect, RectScale, Size, Spacing};
use crate::id::WidgetId;
use crate::options::Options;

use super::WidgetKey;

/// Identity, geometry and size negotiation of one widget for one frame.
///
/// Nothing refers to a `WidgetData` after its widget is deinitialized; what
/// must survive (the reported min size) goes into id-keyed caches instead.
#[derive(Debug, Clone)]
pub struct WidgetData {
    pub id: WidgetId,
    /// Enclosing widget. A lookup handle into the frame arena, never owning.
    pub parent: Option<WidgetKey>,
    /// Margin box, relative to the parent's content rect.
    pub rect: Rect,
    /// `rect` in screen space.
    pub rect_scale: RectScale,
    /// Size this widget reported on the previous frame.
    pub min_size: Size,
    /// Resolved options (class defaults overridden by the call site).
    pub options: Options,
    /// Where the widget was installed from.
    pub location: &'static Location<'static>,
    /// Children's reports folded together this frame.
    pub min_size_children: Size,
    pub(crate) saved_clip: Option<Rect>,
    pub(crate) saved_subwindow: Option<WidgetId>,
}

impl WidgetData {
    /// Data for the root widget spanning `screen` at scale `s`.
    pub fn root(screen: Rect, s: f32, location: &'static Location<'static>) -> Self {
        Self {
            id: WidgetId::ROOT,
            parent: None,
            rect: Rect::new(0.0, 0.0, screen.w / s, screen.h / s),
            rect_scale: RectScale::new(screen, s),
            min_size: Size::ZERO,
            options: Options::new(),
            location,
            min_size_children: Size::ZERO,
            saved_clip: None,
            saved_subwindow: None,
        }
    }

    fn chrome(&self) -> (Spacing, Spacing, Spacing) {
        (self.options.margin(), self.options.border(), self.options.padding())
    }

    /// Border box, parent-relative.
    pub fn border_rect(&self) -> Rect {
        self.rect.inset(self.options.margin())
    }

    /// Background box (inside the border), parent-relative.
    pub fn background_rect(&self) -> Rect {
        let (m, b, _) = self.chrome();
        self.rect.inset(m + b)
    }

    /// Content box, parent-relative.
    pub fn content_rect(&self) -> Rect {
        let (m, b, p) = self.chrome();
        self.rect.inset(m + b + p)
    }

    /// Border box in screen space.
    pub fn border_rect_scale(&self) -> RectScale {
        self.rect_scale.rect_to_rect_scale(self.rect.just_size().inset(self.options.margin()))
    }

    /// Background box in screen space.
    pub fn background_rect_scale(&self) -> RectScale {
        let (m, b, _) = self.chrome();
        self.rect_scale.rect_to_rect_scale(self.rect.just_size().inset(m + b))
    }

    /// Content box in screen space; children are laid out relative to it.
    pub fn content_rect_scale(&self) -> RectScale {
        let (m, b, p) = self.chrome();
        self.rect_scale.rect_to_rect_scale(self.rect.just_size().inset(m + b + p))
    }

    /// The size this widget reports for this frame.
    ///
    /// Largest of its children's folded reports and its own minimum content
    /// size, plus padding, border and margin.
    pub fn finalized_min_size(&self) -> Size {
        let (m, b, p) = self.chrome();
        self.min_size_children
            .max(self.options.min_size_content())
            .pad(p + b + m)
    }

    /// Debug label: the option name if any, otherwise the call site.
    pub fn label(&self) -> String {
        match self.options.name {
            Some(name) => format!("{name}#{}", self.id),
            None => format!("{}:{}#{}", self.location.file(), self.location.line(), self.id),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn data(options: Options) -> WidgetData {
        let mut wd = WidgetData::root(Rect::new(0.0, 0.0, 20.0, 10.0), 1.0, Location::caller());
        wd.options = options;
        wd
    }

    #[test]
    fn root_spans_screen() {
        let wd = WidgetData::root(Rect::new(0.0, 0.0, 80.0, 24.0), 2.0, Location::caller());
        assert_eq!(wd.rect, Rect::new(0.0, 0.0, 40.0, 12.0));
        assert_eq!(wd.rect_scale.r, Rect::new(0.0, 0.0, 80.0, 24.0));
        assert_eq!(wd.id, WidgetId::ROOT);
    }

    #[test]
    fn nested_boxes() {
        let wd = data(
            Options::new()
                .with_margin(Spacing::all(1.0))
                .with_border(Spacing::all(1.0))
                .with_padding(Spacing::all(1.0)),
        );
        assert_eq!(wd.border_rect(), Rect::new(1.0, 1.0, 18.0, 8.0));
        assert_eq!(wd.background_rect(), Rect::new(2.0, 2.0, 16.0, 6.0));
        assert_eq!(wd.content_rect(), Rect::new(3.0, 3.0, 14.0, 4.0));
        assert_eq!(wd.content_rect_scale().r, Rect::new(3.0, 3.0, 14.0, 4.0));
    }

    #[test]
    fn finalized_min_size_adds_chrome() {
        let mut wd = data(Options::new().with_padding(Spacing::all(1.0)).with_margin(Spacing::symmetric(0.0, 2.0)));
        wd.min_size_children = Size::new(5.0, 1.0);
        assert_eq!(wd.finalized_min_size(), Size::new(11.0, 3.0));
    }

    #[test]
    fn min_size_content_is_a_floor() {
        let mut wd = data(Options::new().with_min_size_content(Size::new(10.0, 2.0)));
        wd.min_size_children = Size::new(4.0, 5.0);
        assert_eq!(wd.finalized_min_size(), Size::new(10.0, 5.0));
    }

    #[test]
    fn label_prefers_name() {
        let wd = data(Options::new().with_name("sidebar"));
        assert!(wd.label().starts_with("sidebar#"));
    }
}
