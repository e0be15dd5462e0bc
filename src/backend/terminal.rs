//! Crossterm terminal backend.
//!
//! Raw mode and the alternate screen for the lifetime of the value. Frames
//! are rasterized into a cell grid and only changed cells are written.

use std::time::{Duration, Instant};

use crossterm::event as ct;
use tracing::{debug, warn};

use crate::context::Context;
use crate::error::Result;
use crate::event::{InputEvent, Key, KeyAction, Modifiers};
use crate::geometry::Size;
use crate::render::{Compositor, DrawCmd, Driver};

use super::Backend;

/// Longest single sleep when waiting for input without a deadline.
const IDLE_POLL: Duration = Duration::from_secs(3600);

pub struct TerminalBackend {
    driver: Driver,
    current: Compositor,
    previous: Compositor,
    start: Instant,
}

impl TerminalBackend {
    /// Take over the terminal.
    pub fn new() -> Result<Self> {
        let (width, height) = Driver::terminal_size()?;
        let mut driver = Driver::new()?;
        driver.enter_alt_screen()?;
        driver.hide_cursor()?;
        debug!(width, height, "terminal backend started");
        Ok(Self {
            driver,
            current: Compositor::new(width, height),
            previous: Compositor::new(width, height),
            start: Instant::now(),
        })
    }
}

impl Drop for TerminalBackend {
    fn drop(&mut self) {
        if let Err(e) = self.driver.show_cursor().and_then(|()| self.driver.leave_alt_screen()) {
            warn!(error = %e, "failed to restore terminal");
        }
    }
}

impl Backend for TerminalBackend {
    fn now_micros(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_micros()).unwrap_or(u64::MAX)
    }

    fn screen_size(&self) -> Result<Size> {
        let (w, h) = Driver::terminal_size()?;
        Ok(Size::new(f32::from(w), f32::from(h)))
    }

    /// Printable key presses are queued twice: as a key and as text.
    /// Ctrl+C asks to quit.
    fn poll_events(&mut self, ctx: &mut Context) -> Result<bool> {
        let mut quit = false;
        while ct::poll(Duration::ZERO)? {
            let input = InputEvent::from(ct::read()?);
            if let InputEvent::Key(k) = &input {
                if k.code == Key::Char('c') && k.modifiers.contains(Modifiers::CTRL) {
                    quit = true;
                    continue;
                }
            }
            let text = match &input {
                InputEvent::Key(k)
                    if k.action != KeyAction::Up
                        && !k.modifiers.contains(Modifiers::CTRL)
                        && !k.modifiers.contains(Modifiers::ALT) =>
                {
                    match k.code {
                        Key::Char(c) => Some(c.to_string()),
                        _ => None,
                    }
                }
                _ => None,
            };
            ctx.add_input(input);
            if let Some(text) = text {
                ctx.add_text(&text);
            }
        }
        Ok(quit)
    }

    fn wait_event(&mut self, timeout: Option<Duration>) -> Result<bool> {
        Ok(ct::poll(timeout.unwrap_or(IDLE_POLL))?)
    }

    fn present(&mut self, cmds: &[DrawCmd]) -> Result<()> {
        let (w, h) = Driver::terminal_size()?;
        if (w, h) != (self.current.width, self.current.height) {
            self.current.resize(w, h);
            self.previous.resize(w, h);
            // Blank `previous` no longer matches the terminal; repaint all.
            self.previous.clear();
        }
        self.current.render(cmds);
        let updates = self.current.diff(&self.previous);
        self.driver.apply_updates(&updates)?;
        self.driver.flush()?;
        std::mem::swap(&mut self.current, &mut self.previous);
        Ok(())
    }
}
