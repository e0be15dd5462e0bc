//! Scripted backend for tests: a manual clock, queued input, recorded frames.

use std::collections::VecDeque;
use std::time::Duration;

use crate::context::Context;
use crate::error::Result;
use crate::event::InputEvent;
use crate::geometry::Size;
use crate::render::DrawCmd;

use super::Backend;

#[derive(Debug, Default)]
pub struct HeadlessBackend {
    now: u64,
    size: Size,
    pending: VecDeque<InputEvent>,
    frames: Vec<Vec<DrawCmd>>,
    quit: bool,
}

impl HeadlessBackend {
    pub fn new(width: f32, height: f32) -> Self {
        Self { size: Size::new(width, height), ..Self::default() }
    }

    /// Queue input for the next `poll_events`.
    pub fn push_event(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    /// Make the next `poll_events` report a quit request.
    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    pub fn advance(&mut self, micros: u64) {
        self.now = self.now.saturating_add(micros);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Size::new(width, height);
    }

    /// Every presented frame, oldest first.
    pub fn frames(&self) -> &[Vec<DrawCmd>] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&[DrawCmd]> {
        self.frames.last().map(Vec::as_slice)
    }
}

impl Backend for HeadlessBackend {
    fn now_micros(&self) -> u64 {
        self.now
    }

    fn screen_size(&self) -> Result<Size> {
        Ok(self.size)
    }

    fn poll_events(&mut self, ctx: &mut Context) -> Result<bool> {
        while let Some(event) = self.pending.pop_front() {
            if let InputEvent::Resize { width, height } = event {
                self.size = Size::new(f32::from(width), f32::from(height));
            }
            ctx.add_input(event);
        }
        Ok(std::mem::take(&mut self.quit))
    }

    /// Never blocks: pending input returns at once, otherwise the clock
    /// jumps forward by `timeout`.
    fn wait_event(&mut self, timeout: Option<Duration>) -> Result<bool> {
        if !self.pending.is_empty() {
            return Ok(true);
        }
        if let Some(t) = timeout {
            self.advance(u64::try_from(t.as_micros()).unwrap_or(u64::MAX));
        }
        Ok(false)
    }

    fn present(&mut self, cmds: &[DrawCmd]) -> Result<()> {
        self.frames.push(cmds.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Key, KeyEvent, Modifiers};

    #[test]
    fn wait_advances_clock_when_idle() {
        let mut b = HeadlessBackend::new(10.0, 5.0);
        assert!(!b.wait_event(Some(Duration::from_millis(3))).unwrap());
        assert_eq!(b.now_micros(), 3_000);
        b.push_event(InputEvent::Text("x".into()));
        assert!(b.wait_event(Some(Duration::from_millis(3))).unwrap());
        assert_eq!(b.now_micros(), 3_000);
    }

    #[test]
    fn poll_moves_input_into_context() {
        let mut b = HeadlessBackend::new(10.0, 5.0);
        let mut ctx = Context::default();
        b.push_event(InputEvent::Key(KeyEvent::new(Key::Enter, Modifiers::NONE)));
        b.push_event(InputEvent::Resize { width: 20, height: 8 });
        assert!(!b.poll_events(&mut ctx).unwrap());
        assert_eq!(b.screen_size().unwrap(), Size::new(20.0, 8.0));

        b.request_quit();
        assert!(b.poll_events(&mut ctx).unwrap());
        assert!(!b.poll_events(&mut ctx).unwrap());
    }
}
