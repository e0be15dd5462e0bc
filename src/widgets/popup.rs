//! Popups: overlays that stay above the window that opened them.
//!
//! A popup closes when something inside it sends `ClosePopup` (a chosen
//! menu item), on Escape, or when the mouse is pressed in a window that is
//! not the popup or one of its own nested popups. Only `ClosePopup` travels
//! past a popup to its parent, so a whole chain of nested popups closes
//! together.

use std::any::Any;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::event::{Event, EventKind, Key, MouseAction};
use crate::geometry::{Point, Rect, Spacing};
use crate::id::WidgetId;
use crate::options::Options;
use crate::subwindow::Floating;
use crate::theme::ThemeColor;
use crate::ui::UiState;
use crate::widget::{EventFlow, Widget, WidgetData};

/// Marks a popup that was already shown on a previous frame.
#[derive(Debug, Clone, Copy)]
struct Shown;

/// What a popup's frame produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupResponse<R> {
    /// The body's return value.
    pub inner: R,
    /// The popup asked to be closed this frame.
    pub closed: bool,
}

#[derive(Debug)]
pub struct Popup {
    wd: WidgetData,
    closed: bool,
    /// First frame on screen.
    opened: bool,
}

impl Widget for Popup {
    fn widget_type(&self) -> &str {
        "Popup"
    }

    fn data(&self) -> &WidgetData {
        &self.wd
    }

    fn data_mut(&mut self) -> &mut WidgetData {
        &mut self.wd
    }

    fn process_event(&mut self, event: &mut Event, _bubbling: bool, _ui: &mut UiState) -> EventFlow {
        match &event.kind {
            EventKind::ClosePopup => {
                self.closed = true;
                EventFlow::Bubble
            }
            EventKind::Key(k) if k.is_down(Key::Escape) => {
                event.handle();
                self.closed = true;
                EventFlow::Stop
            }
            _ => EventFlow::Stop,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Show a popup with its top-left at `anchor` (logical units,
/// screen-relative), moved inward if it would leave the screen.
#[track_caller]
pub fn popup<R>(
    ctx: &mut Context,
    anchor: Point,
    opts: &Options,
    body: impl FnOnce(&mut Context) -> Result<R>,
) -> Result<PopupResponse<R>> {
    let size = ctx.min_size(ctx.widget_id(opts)?);
    let (screen, s) = (ctx.ui().screen_rect(), ctx.ui().scale());
    let origin = Point::new(
        anchor.x.min((screen.w / s - size.w).max(0.0)),
        anchor.y.min((screen.h / s - size.h).max(0.0)),
    );
    let defaults = Options::new()
        .with_name("Popup")
        .with_border(Spacing::all(1.0))
        .with_background(true)
        .with_color_fill(ThemeColor::Window);
    let opts = opts.clone().with_rect(Rect::from_point_size(origin, size));

    ctx.subwindow_scope(
        &defaults,
        &opts,
        Floating::POPUP,
        |wd, ui| {
            let opened = ui.data_get::<Shown>(wd.id).is_none();
            ui.data_set(wd.id, Shown);
            if opened {
                // Keys go to the popup itself until something inside takes focus.
                ui.focus_subwindow(wd.id, None);
                ui.focus_widget(Some(wd.id), Some(wd.id), None);
            }
            Popup { wd, closed: false, opened }
        },
        |ctx, key| {
            ctx.draw_chrome(key, None)?;
            let inner = body(ctx)?;
            ctx.process_events(key)?;
            let (id, mut closed, opened) = {
                let p = ctx.widget::<Popup>(key).ok_or(Error::StaleWidget)?;
                (p.wd.id, p.closed, p.opened)
            };
            if !opened && pressed_elsewhere(ctx.ui(), id) {
                closed = true;
            }
            if closed {
                ctx.ui_mut().data_remove::<Shown>(id);
            }
            Ok(PopupResponse { inner, closed })
        },
    )
}

/// Whether this frame has a mouse press outside `popup` and its nested popups.
fn pressed_elsewhere(ui: &UiState, popup: WidgetId) -> bool {
    ui.events.iter().any(|e| match (e.as_mouse(), e.floating_win) {
        (Some(m), Some(win)) if matches!(m.action, MouseAction::Press(_)) => !within(ui, win, popup),
        _ => false,
    })
}

/// Whether subwindow `win` is `ancestor` or was opened from it.
fn within(ui: &UiState, win: WidgetId, ancestor: WidgetId) -> bool {
    let mut cur = win;
    for _ in 0..=ui.subwindows.len() {
        if cur == ancestor {
            return true;
        }
        match ui.subwindows.get(cur) {
            Some(sw) if sw.parent != cur => cur = sw.parent,
            _ => return false,
        }
    }
    false
}

// ===========================================================================
// Tests
// ===========================================================================
