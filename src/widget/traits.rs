//! Widget trait: the capability every container and leaf implements.
//!
//! The five operations the lifecycle engine relies on are `data`, `rect_for`,
//! `screen_rect_scale`, `min_size_for_child` and `process_event`. Defaults
//! describe an in-flow overlay container: children stack on top of each other
//! inside the content rect, sizes fold by maximum, unhandled events bubble.

use std::any::Any;

use crate::event::Event;
use crate::geometry::{Rect, RectScale, Size};
use crate::id::WidgetId;
use crate::options::{Expand, Gravity};
use crate::ui::UiState;

use super::data::WidgetData;
use super::layout::place_in;

// ---------------------------------------------------------------------------
// EventFlow
// ---------------------------------------------------------------------------

/// What should happen to an event this widget did not consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFlow {
    /// Offer it to the parent next.
    Bubble,
    /// Stop here.
    Stop,
}

// ---------------------------------------------------------------------------
// Widget trait
// ---------------------------------------------------------------------------

/// Core trait implemented by all widgets.
///
/// Widget is object-safe: installed widgets live in the frame arena as
/// `Box<dyn Widget>`.
pub trait Widget: Any {
    /// Type name used in logs (e.g. "Button", "Box").
    fn widget_type(&self) -> &str;

    /// This frame's record.
    fn data(&self) -> &WidgetData;

    fn data_mut(&mut self) -> &mut WidgetData;

    /// Rect to assign a child, relative to this widget's content rect.
    fn rect_for(&mut self, _child: WidgetId, min_size: Size, expand: Expand, gravity: Gravity) -> Rect {
        place_in(self.data().content_rect().just_size(), min_size, expand, gravity)
    }

    /// Convert a rect local to the content rect into screen space.
    fn screen_rect_scale(&self, rect: Rect) -> RectScale {
        self.data().content_rect_scale().rect_to_rect_scale(rect)
    }

    /// Fold a child's min-size report into this widget's own.
    fn min_size_for_child(&mut self, size: Size) {
        let wd = self.data_mut();
        wd.min_size_children = wd.min_size_children.max(size);
    }

    /// Whether widgets installed while this one is open become its children.
    ///
    /// Leaves return `false`: they are still installed and deinitialized in
    /// order, but the current parent stays their own parent.
    fn is_container(&self) -> bool {
        true
    }

    /// Offer an event. `bubbling` is true when it comes from a descendant.
    fn process_event(&mut self, _event: &mut Event, _bubbling: bool, _ui: &mut UiState) -> EventFlow {
        EventFlow::Bubble
    }

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for mutable runtime type inspection.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ---------------------------------------------------------------------------
// Plain
// ---------------------------------------------------------------------------

/// A widget with only the default behavior.
///
/// Used for the per-frame root and for simple wrappers that need an id and a
/// rect but no layout or event logic of their own.
#[derive(Debug)]
pub struct Plain {
    wd: WidgetData,
    kind: &'static str,
    container: bool,
}

impl Plain {
    /// A container: widgets installed while it is open are placed inside it.
    pub fn new(wd: WidgetData, kind: &'static str) -> Self {
        Self { wd, kind, container: true }
    }

    /// A leaf: never becomes the current parent.
    pub fn leaf(wd: WidgetData, kind: &'static str) -> Self {
        Self { wd, kind, container: false }
    }
}

impl Widget for Plain {
    fn widget_type(&self) -> &str {
        self.kind
    }

    fn data(&self) -> &WidgetData {
        &self.wd
    }

    fn data_mut(&mut self) -> &mut WidgetData {
        &mut self.wd
    }

    fn is_container(&self) -> bool {
        self.container
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::panic::Location;

    use super::*;
    use crate::geometry::Spacing;
    use crate::options::Options;

    fn plain(w: f32, h: f32, options: Options) -> Plain {
        let mut wd = WidgetData::root(Rect::new(0.0, 0.0, w, h), 1.0, Location::caller());
        wd.options = options;
        Plain::new(wd, "Plain")
    }

    #[test]
    fn default_rect_for_places_in_content_rect() {
        let mut p = plain(20.0, 10.0, Options::new().with_padding(Spacing::all(1.0)));
        let r = p.rect_for(WidgetId(1), Size::new(4.0, 2.0), Expand::None, Gravity::CENTER);
        assert_eq!(r, Rect::new(7.0, 3.0, 4.0, 2.0));
        let r = p.rect_for(WidgetId(2), Size::new(4.0, 2.0), Expand::Both, Gravity::CENTER);
        assert_eq!(r, Rect::new(0.0, 0.0, 18.0, 8.0));
    }

    #[test]
    fn default_screen_rect_scale_offsets_by_content() {
        let p = plain(20.0, 10.0, Options::new().with_border(Spacing::all(1.0)));
        let rs = p.screen_rect_scale(Rect::new(2.0, 2.0, 3.0, 3.0));
        assert_eq!(rs.r, Rect::new(3.0, 3.0, 3.0, 3.0));
    }

    #[test]
    fn default_min_size_folds_by_max() {
        let mut p = plain(20.0, 10.0, Options::new());
        p.min_size_for_child(Size::new(3.0, 8.0));
        p.min_size_for_child(Size::new(6.0, 1.0));
        assert_eq!(p.data().min_size_children, Size::new(6.0, 8.0));
    }

    #[test]
    fn widget_is_object_safe_and_downcasts() {
        let w: Box<dyn Widget> = Box::new(plain(1.0, 1.0, Options::new()));
        assert_eq!(w.widget_type(), "Plain");
        assert!(w.as_any().downcast_ref::<Plain>().is_some());
    }
}
