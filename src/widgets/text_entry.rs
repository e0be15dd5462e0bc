//! Single-line text entry.

use std::any::Any;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::event::{Event, EventKind, Key, KeyAction, Modifiers, MouseAction, MouseBtn};
use crate::geometry::{Rect, Size, Spacing};
use crate::options::Options;
use crate::theme::{ColorRef, ThemeColor};
use crate::ui::UiState;
use crate::widget::{EventFlow, Widget, WidgetData};

/// Minimum visible characters.
const MIN_CHARS: f32 = 8.0;

#[derive(Debug)]
pub struct TextEntry {
    wd: WidgetData,
    text: String,
    changed: bool,
}

impl TextEntry {
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Widget for TextEntry {
    fn widget_type(&self) -> &str {
        "TextEntry"
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

    /// Text goes in; Tab moves focus on, taking the rest of this frame's
    /// typing with it.
    fn process_event(&mut self, event: &mut Event, _bubbling: bool, ui: &mut UiState) -> EventFlow {
        let id = self.wd.id;
        match &event.kind {
            EventKind::Mouse(m) if m.action == MouseAction::Press(MouseBtn::Left) => {
                event.handle();
                ui.focus_widget(Some(id), None, Some(event.num));
            }
            EventKind::Text(t) => {
                self.text.push_str(t);
                self.changed = true;
                event.handle();
            }
            EventKind::Key(k) if k.action != KeyAction::Up => match k.code {
                Key::Backspace => {
                    self.changed |= self.text.pop().is_some();
                    event.handle();
                }
                Key::Tab if k.modifiers.contains(Modifiers::SHIFT) => {
                    event.handle();
                    ui.focus_prev(Some(event.num));
                }
                Key::Tab => {
                    event.handle();
                    ui.focus_next(Some(event.num));
                }
                Key::BackTab => {
                    event.handle();
                    ui.focus_prev(Some(event.num));
                }
                // Printable keys also arrive as text.
                Key::Char(_) if !k.modifiers.contains(Modifiers::CTRL) => event.handle(),
                _ => {}
            },
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

/// Edit `text` in place. Returns `true` on frames where it changed.
#[track_caller]
pub fn text_entry(ctx: &mut Context, text: &mut String, opts: &Options) -> Result<bool> {
    let glyph = ctx.theme().font(opts.font()).size;
    let defaults = Options::new()
        .with_name("TextEntry")
        .with_border(Spacing::all(1.0))
        .with_background(true)
        .with_color_fill(ThemeColor::Window)
        .with_min_size_content(Size::new(glyph * MIN_CHARS, glyph));
    let initial = text.clone();
    let (value, changed) = ctx.scope(
        &defaults,
        opts,
        |wd, ui| {
            ui.tab_index_set(wd.id, wd.options.tab_index);
            TextEntry { wd, text: initial, changed: false }
        },
        |ctx, key| {
            ctx.process_events(key)?;
            let (id, value, changed, content, color) = {
                let e = ctx.widget::<TextEntry>(key).ok_or(Error::StaleWidget)?;
                (e.wd.id, e.text.clone(), e.changed, e.wd.content_rect_scale(), e.wd.options.color_text())
            };
            let focused = ctx.ui().is_focused(id);
            let border = focused.then_some(ColorRef::Theme(ThemeColor::Accent));
            if let Some(color) = border {
                let options = &mut ctx.widget_mut::<TextEntry>(key).ok_or(Error::StaleWidget)?.wd.options;
                options.color_border = Some(color);
            }
            ctx.draw_chrome(key, None)?;
            ctx.draw_text(content.r, &value, color);
            if focused {
                let g = glyph * content.s;
                let x = content.r.x + value.chars().count() as f32 * g;
                ctx.draw_text(Rect::new(x, content.r.y, g, g), "_", ColorRef::Theme(ThemeColor::Accent));
            }
            Ok((value, changed))
        },
    )?;
    if changed {
        *text = value;
    }
    Ok(changed)
}

// ===========================================================================
// Tests
// ===========================================================================
