//! Pilot: programmatic interaction with a headless session.
//!
//! The `Pilot` owns a [`Context`], a scripted clock and a screen size. It
//! queues input the way a backend would, runs frames with a UI closure and
//! renders the last frame to text for snapshot testing.

use crate::config::Config;
use crate::context::{Context, FrameOutput};
use crate::error::Result;
use crate::event::{Key, KeyEvent, Modifiers, MouseBtn};
use crate::geometry::{Point, Size};

use super::snapshot::render_to_string;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// Drives a [`Context`] without a terminal.
///
/// # Examples
///
/// ```
/// use framekit::Options;
/// use framekit::testing::Pilot;
/// use framekit::widgets;
///
/// let mut pilot = Pilot::new(20, 3);
/// pilot.settle(|ctx| widgets::label(ctx, "Ready", &Options::new())).unwrap();
/// assert_eq!(pilot.screen_text().lines().next(), Some("Ready"));
/// ```
#[derive(Debug)]
pub struct Pilot {
    ctx: Context,
    now: u64,
    width: u16,
    height: u16,
    last: Option<FrameOutput>,
}

/// Frames `settle` runs at most before giving up on a quiet frame.
const SETTLE_LIMIT: usize = 8;

impl Pilot {
    /// Create a pilot with a `width` x `height` screen and default config.
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_config(Config::default(), width, height)
    }

    /// Create a pilot with a custom config.
    pub fn with_config(config: Config, width: u16, height: u16) -> Self {
        Self { ctx: Context::new(config), now: 0, width, height, last: None }
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Queue a key press.
    pub fn press_key(&mut self, key: Key) {
        self.press_key_with(key, Modifiers::NONE);
    }

    /// Queue a key press with modifiers.
    pub fn press_key_with(&mut self, key: Key, modifiers: Modifiers) {
        self.ctx.add_key(KeyEvent::new(key, modifiers));
    }

    /// Queue typed text.
    pub fn type_text(&mut self, text: &str) {
        self.ctx.add_text(text);
    }

    /// Queue a left press and release on cell (x, y).
    pub fn click(&mut self, x: u16, y: u16) {
        self.mouse_down(x, y);
        self.mouse_up(x, y);
    }

    pub fn mouse_down(&mut self, x: u16, y: u16) {
        self.ctx.add_mouse_button(MouseBtn::Left, true, cell_center(x, y));
    }

    pub fn mouse_up(&mut self, x: u16, y: u16) {
        self.ctx.add_mouse_button(MouseBtn::Left, false, cell_center(x, y));
    }

    pub fn mouse_move(&mut self, x: u16, y: u16) {
        self.ctx.add_mouse_motion(cell_center(x, y));
    }

    /// Resize the simulated terminal; takes effect on the next frame.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.ctx.refresh();
    }

    // ── Processing ───────────────────────────────────────────────────

    /// Run one frame with `ui`.
    ///
    /// An error from `ui` is returned and the frame left open; the next
    /// frame discards it.
    pub fn frame<R>(&mut self, ui: impl FnOnce(&mut Context) -> Result<R>) -> Result<R> {
        let size = Size::new(f32::from(self.width), f32::from(self.height));
        self.ctx.begin_frame(self.now, size)?;
        let value = ui(&mut self.ctx)?;
        self.last = Some(self.ctx.end_frame()?);
        Ok(value)
    }

    /// Run frames with `ui` until one does not ask for another.
    ///
    /// Returns the last frame's value.
    pub fn settle<R>(&mut self, mut ui: impl FnMut(&mut Context) -> Result<R>) -> Result<R> {
        let mut value = self.frame(&mut ui)?;
        for _ in 1..SETTLE_LIMIT {
            if !self.needs_frame() {
                break;
            }
            value = self.frame(&mut ui)?;
        }
        Ok(value)
    }

    /// Advance the scripted clock.
    pub fn advance(&mut self, micros: u64) {
        self.now = self.now.saturating_add(micros);
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.ctx
    }

    /// Current scripted time, micros.
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn last_output(&self) -> Option<&FrameOutput> {
        self.last.as_ref()
    }

    /// Whether the last frame asked for another one right away.
    pub fn needs_frame(&self) -> bool {
        self.last
            .as_ref()
            .and_then(|o| o.next_deadline)
            .is_some_and(|d| d <= self.now)
    }

    // ── Render helpers ───────────────────────────────────────────────

    /// The last frame rasterized to text, rows trimmed.
    pub fn screen_text(&self) -> String {
        let cmds = self.last.as_ref().map(|o| o.commands.as_slice()).unwrap_or_default();
        render_to_string(cmds, self.width, self.height)
    }
}

fn cell_center(x: u16, y: u16) -> Point {
    Point::new(f32::from(x) + 0.5, f32::from(y) + 0.5)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::widgets;

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn new_pilot_has_no_output() {
        let pilot = Pilot::new(10, 2);
        assert!(pilot.last_output().is_none());
        assert_eq!(pilot.screen_text(), "\n");
        assert!(!pilot.needs_frame());
    }

    // ── Processing ───────────────────────────────────────────────────

    #[test]
    fn settle_runs_until_layout_is_stable() {
        let mut pilot = Pilot::new(10, 2);
        pilot.settle(|ctx| widgets::label(ctx, "hi", &Options::new())).unwrap();
        assert_eq!(pilot.context().frame_count(), 2);
        assert_eq!(pilot.screen_text(), "hi\n");
    }

    #[test]
    fn timer_deadline_is_not_due_until_clock_reaches_it() {
        let mut pilot = Pilot::new(10, 2);
        pilot
            .frame(|ctx| {
                ctx.ui_mut().timer(crate::id::WidgetId::ROOT, 500);
                Ok(())
            })
            .unwrap();
        assert!(!pilot.needs_frame());
        pilot.advance(500);
        assert!(pilot.needs_frame());
    }

    // ── Input ────────────────────────────────────────────────────────

    #[test]
    fn click_reaches_button() {
        let mut pilot = Pilot::new(10, 2);
        let ui = |ctx: &mut Context| widgets::button(ctx, "Go", &Options::new());
        pilot.settle(ui).unwrap();
        pilot.click(1, 0);
        assert!(pilot.frame(ui).unwrap());
    }

    #[test]
    fn typed_text_reaches_focused_entry() {
        let mut pilot = Pilot::new(20, 4);
        fn entry(ctx: &mut Context, text: &mut String) -> Result<bool> {
            widgets::text_entry(ctx, text, &Options::new())
        }
        let mut text = String::new();
        pilot.settle(|ctx| entry(ctx, &mut text)).unwrap();
        pilot.click(2, 1);
        pilot.type_text("abc");
        pilot.frame(|ctx| entry(ctx, &mut text)).unwrap();
        assert_eq!(text, "abc");
    }
}
