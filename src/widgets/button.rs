//! Button widget: an interactive, focusable button.
//!
//! A left press captures the mouse and focuses the button; the matching
//! release inside the button is a click. Enter or Space click a focused
//! button. Press and release arriving in the same frame make one click.

use std::any::Any;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::event::{Event, EventKind, Key, MouseAction, MouseBtn};
use crate::geometry::Spacing;
use crate::options::Options;
use crate::theme::{ColorRef, ThemeColor};
use crate::ui::UiState;
use crate::widget::{EventFlow, Widget, WidgetData};

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Button {
    wd: WidgetData,
    clicked: bool,
}

impl Button {
    fn new(wd: WidgetData) -> Self {
        Self { wd, clicked: false }
    }

    /// Whether a click landed this frame.
    pub fn clicked(&self) -> bool {
        self.clicked
    }
}

impl Widget for Button {
    fn widget_type(&self) -> &str {
        "Button"
    }

    fn data(&self) -> &WidgetData {
        &self.wd
    }

    fn data_mut(&mut self) -> &mut WidgetData {
        &mut self.wd
    }

    fn is_container(&self) -> bool {
        false
    }

    fn process_event(&mut self, event: &mut Event, _bubbling: bool, ui: &mut UiState) -> EventFlow {
        let id = self.wd.id;
        match &event.kind {
            EventKind::Mouse(m) => match m.action {
                MouseAction::Press(MouseBtn::Left) => {
                    event.handle();
                    ui.capture_mouse(Some(id));
                    ui.focus_widget(Some(id), None, Some(event.num));
                }
                MouseAction::Release(MouseBtn::Left) if ui.captured(id) => {
                    let inside = self.wd.border_rect_scale().r.contains(m.p);
                    event.handle();
                    ui.capture_mouse(None);
                    if inside {
                        self.clicked = true;
                    }
                }
                MouseAction::Motion if ui.captured(id) => event.handle(),
                _ => {}
            },
            EventKind::Key(k) if k.is_down(Key::Enter) || k.is_down(Key::Char(' ')) => {
                event.handle();
                self.clicked = true;
            }
            _ => {}
        }
        EventFlow::Bubble
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ---------------------------------------------------------------------------
// Immediate-mode entry points
// ---------------------------------------------------------------------------

/// A push button. Returns `true` on the frame it is clicked.
#[track_caller]
pub fn button(ctx: &mut Context, text: &str, opts: &Options) -> Result<bool> {
    let defaults = Options::new()
        .with_name("Button")
        .with_padding(Spacing::symmetric(0.0, 1.0))
        .with_background(true);
    clickable(ctx, &defaults, text, opts, |_, _| Ok(()))
}

/// Shared body of clickable text widgets.
///
/// `on_click` runs while the widget is still installed, so it may bubble
/// events from it.
#[track_caller]
pub(crate) fn clickable(
    ctx: &mut Context,
    defaults: &Options,
    text: &str,
    opts: &Options,
    on_click: impl FnOnce(&mut Context, crate::widget::WidgetKey) -> Result<()>,
) -> Result<bool> {
    let size = ctx.theme().font(opts.font()).text_size(text);
    let defaults = defaults.clone().with_min_size_content(size);
    ctx.scope(
        &defaults,
        opts,
        |wd, ui| {
            ui.tab_index_set(wd.id, wd.options.tab_index);
            Button::new(wd)
        },
        |ctx, key| {
            ctx.process_events(key)?;
            let (id, clicked, content, fill, color) = {
                let b = ctx.widget::<Button>(key).ok_or(Error::StaleWidget)?;
                let o = &b.wd.options;
                (b.wd.id, b.clicked, b.wd.content_rect_scale().r, o.color_fill(), o.color_text())
            };
            let fill = if ctx.ui().captured(id) {
                ColorRef::Theme(ThemeColor::FillPress)
            } else if ctx.ui().is_focused(id) {
                ColorRef::Theme(ThemeColor::FillHover)
            } else {
                fill
            };
            ctx.draw_chrome(key, Some(fill))?;
            ctx.draw_text(content, text, color);
            if clicked {
                on_click(ctx, key)?;
            }
            Ok(clicked)
        },
    )
}

// ===========================================================================
// Tests
// ===========================================================================
