//! Floating windows.
//!
//! A window is a subwindow: it draws into its own list, is hit-tested by the
//! registry and stacks above the root. It offers events to its children
//! first, then handles what is left: a press starts a drag, motion while
//! dragging moves it. Nothing bubbles out of a window.

use std::any::Any;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::event::{Event, EventKind, MouseAction, MouseBtn};
use crate::geometry::{Point, Rect, Spacing};
use crate::options::Options;
use crate::subwindow::Floating;
use crate::theme::ThemeColor;
use crate::ui::UiState;
use crate::widget::{EventFlow, Widget, WidgetData};

/// Last pointer position of an ongoing drag, kept between frames.
#[derive(Debug, Clone, Copy)]
struct DragAnchor(Point);

#[derive(Debug)]
pub struct FloatingWindow {
    wd: WidgetData,
    /// Movement this frame, logical units.
    moved: Point,
}

impl Widget for FloatingWindow {
    fn widget_type(&self) -> &str {
        "FloatingWindow"
    }

    fn data(&self) -> &WidgetData {
        &self.wd
    }

    fn data_mut(&mut self) -> &mut WidgetData {
        &mut self.wd
    }

    fn process_event(&mut self, event: &mut Event, _bubbling: bool, ui: &mut UiState) -> EventFlow {
        let id = self.wd.id;
        match &event.kind {
            EventKind::Mouse(m) => match m.action {
                MouseAction::Press(MouseBtn::Left) => {
                    let p = m.p;
                    event.handle();
                    ui.capture_mouse(Some(id));
                    ui.data_set(id, DragAnchor(p));
                }
                MouseAction::Motion if ui.captured(id) => {
                    let p = m.p;
                    event.handle();
                    if let Some(DragAnchor(from)) = ui.data_get::<DragAnchor>(id) {
                        let s = self.wd.rect_scale.s;
                        self.moved.x += (p.x - from.x) / s;
                        self.moved.y += (p.y - from.y) / s;
                    }
                    ui.data_set(id, DragAnchor(p));
                }
                MouseAction::Release(MouseBtn::Left) if ui.captured(id) => {
                    event.handle();
                    ui.capture_mouse(None);
                    ui.data_remove::<DragAnchor>(id);
                }
                _ => {}
            },
            EventKind::ClosePopup => event.handle(),
            _ => {}
        }
        EventFlow::Stop
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A movable window at `rect` (logical units, screen-relative).
///
/// An empty `rect` sizes the window from its content; the size it settles on
/// is written back. Drags move `rect`.
#[track_caller]
pub fn floating_window<R>(
    ctx: &mut Context,
    rect: &mut Rect,
    opts: &Options,
    body: impl FnOnce(&mut Context) -> Result<R>,
) -> Result<R> {
    window(ctx, rect, Floating::WINDOW, opts, body)
}

/// A window that takes every mouse event while it is installed.
#[track_caller]
pub fn modal_window<R>(
    ctx: &mut Context,
    rect: &mut Rect,
    opts: &Options,
    body: impl FnOnce(&mut Context) -> Result<R>,
) -> Result<R> {
    window(ctx, rect, Floating::MODAL, opts, body)
}

#[track_caller]
fn window<R>(
    ctx: &mut Context,
    rect: &mut Rect,
    floating: Floating,
    opts: &Options,
    body: impl FnOnce(&mut Context) -> Result<R>,
) -> Result<R> {
    let defaults = Options::new()
        .with_name("FloatingWindow")
        .with_border(Spacing::all(1.0))
        .with_background(true)
        .with_color_fill(ThemeColor::Window);
    let opts = if rect.is_empty() { opts.clone() } else { opts.clone().with_rect(*rect) };
    let (value, placed) = ctx.subwindow_scope(
        &defaults,
        &opts,
        floating,
        |wd, _| FloatingWindow { wd, moved: Point::ZERO },
        |ctx, key| {
            ctx.draw_chrome(key, None)?;
            let value = body(ctx)?;
            ctx.process_events(key)?;
            let w = ctx.widget::<FloatingWindow>(key).ok_or(Error::StaleWidget)?;
            Ok((value, w.wd.rect.offset(w.moved)))
        },
    )?;
    *rect = placed;
    Ok(value)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::geometry::Size;
    use crate::id::WidgetId;
    use crate::widgets::button;

    const SCREEN: Size = Size::new(40.0, 20.0);

    // -----------------------------------------------------------------------
    // Placement
    // -----------------------------------------------------------------------

    #[test]
    fn empty_rect_settles_on_content_size() {
        let mut ctx = Context::default();
        let mut rect = Rect::EMPTY;
        for frame in 0..2 {
            ctx.begin_frame(frame, SCREEN).unwrap();
            floating_window(&mut ctx, &mut rect, &Options::new(), |ctx| {
                button(ctx, "Go", &Options::new())?;
                Ok(())
            })
            .unwrap();
            ctx.end_frame().unwrap();
        }
        // "Go" + 1 padding each side + 1 border each side.
        assert_eq!(rect, Rect::new(0.0, 0.0, 6.0, 3.0));
    }

    #[test]
    fn window_is_registered_above_root() {
        let mut ctx = Context::default();
        let mut rect = Rect::new(5.0, 5.0, 10.0, 4.0);
        ctx.begin_frame(0, SCREEN).unwrap();
        floating_window(&mut ctx, &mut rect, &Options::new(), |_| Ok(())).unwrap();
        ctx.end_frame().unwrap();
        let order = ctx.subwindow_order();
        assert_eq!(order.len(), 2);
        assert_eq!(order[0], WidgetId::ROOT);
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    #[test]
    fn drag_moves_the_window() {
        let mut ctx = Context::default();
        let mut rect = Rect::new(5.0, 5.0, 10.0, 4.0);
        let frame = |ctx: &mut Context, now: u64, rect: &mut Rect| {
            ctx.begin_frame(now, SCREEN).unwrap();
            floating_window(ctx, rect, &Options::new(), |_| Ok(())).unwrap();
            ctx.end_frame().unwrap();
        };
        frame(&mut ctx, 0, &mut rect);

        ctx.add_mouse_button(MouseBtn::Left, true, Point::new(6.5, 5.5));
        ctx.add_mouse_motion(Point::new(9.5, 7.5));
        frame(&mut ctx, 1, &mut rect);
        assert_eq!(rect, Rect::new(8.0, 7.0, 10.0, 4.0));

        ctx.add_mouse_button(MouseBtn::Left, false, Point::new(9.5, 7.5));
        ctx.add_mouse_motion(Point::new(1.5, 1.5));
        frame(&mut ctx, 2, &mut rect);
        assert_eq!(rect, Rect::new(8.0, 7.0, 10.0, 4.0));
        assert_eq!(ctx.ui().capture_owner(), None);
    }

    #[test]
    fn children_see_events_before_the_window() {
        let mut ctx = Context::default();
        let mut rect = Rect::new(0.0, 0.0, 10.0, 5.0);
        let mut clicked = false;
        for frame in 0..3 {
            if frame == 2 {
                ctx.add_mouse_button(MouseBtn::Left, true, Point::new(1.5, 1.5));
                ctx.add_mouse_button(MouseBtn::Left, false, Point::new(1.5, 1.5));
            }
            ctx.begin_frame(frame, SCREEN).unwrap();
            clicked = floating_window(&mut ctx, &mut rect, &Options::new(), |ctx| {
                button(ctx, "Go", &Options::new())
            })
            .unwrap();
            ctx.end_frame().unwrap();
        }
        assert!(clicked);
        assert_eq!(rect, Rect::new(0.0, 0.0, 10.0, 5.0));
    }
}
