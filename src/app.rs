//! App struct: the frame pump.
//!
//! [`App`] ties a [`Context`] to a [`Backend`]: each iteration polls input,
//! runs the UI function inside a frame, presents the result and then sleeps
//! until input arrives or the frame's deadline comes due.

use std::time::Duration;

use tracing::{debug, trace};

use crate::backend::{Backend, FramePacer};
use crate::config::Config;
use crate::context::Context;
use crate::error::Result;

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// The main application struct.
///
/// Owns the session context, the backend and the frame pacer.
pub struct App<B: Backend> {
    ctx: Context,
    backend: B,
    pacer: FramePacer,
    running: bool,
}

impl<B: Backend> App<B> {
    pub fn new(config: Config, backend: B) -> Self {
        let pacer = FramePacer::new(config.max_fps);
        Self { ctx: Context::new(config), backend, pacer, running: true }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.ctx
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Whether the app should stop running.
    pub fn should_quit(&self) -> bool {
        !self.running
    }

    /// Request a graceful shutdown.
    pub fn request_quit(&mut self) {
        self.running = false;
    }

    /// Run one iteration: poll input, build a frame with `ui`, present it.
    ///
    /// `ui` returns `false` to quit. Returns how long to sleep before the
    /// next frame in micros, `None` meaning until input arrives.
    ///
    /// An error from `ui` leaves the frame open; the next frame discards it.
    pub fn run_frame(&mut self, mut ui: impl FnMut(&mut Context) -> Result<bool>) -> Result<Option<u64>> {
        let start = self.backend.now_micros();
        if self.backend.poll_events(&mut self.ctx)? {
            debug!("quit requested by backend");
            self.running = false;
            return Ok(None);
        }
        self.pacer.frame_started(start);

        let screen = self.backend.screen_size()?;
        self.ctx.begin_frame(start, screen)?;
        if !ui(&mut self.ctx)? {
            self.running = false;
        }
        let out = self.ctx.end_frame()?;
        self.backend.present(&out.commands)?;

        let now = self.backend.now_micros();
        self.pacer.record_overhead(now.saturating_sub(start));
        let wait = self.pacer.wait_time(now, out.next_deadline);
        trace!(commands = out.commands.len(), ?wait, "frame presented");
        Ok(wait)
    }

    /// Run frames until `ui` or the backend asks to quit.
    pub fn run(&mut self, mut ui: impl FnMut(&mut Context) -> Result<bool>) -> Result<()> {
        while self.running {
            let wait = self.run_frame(&mut ui)?;
            if !self.running {
                break;
            }
            self.backend.wait_event(wait.map(Duration::from_micros))?;
        }
        debug!(frames = self.ctx.frame_count(), "app stopped");
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;
    use crate::error::Error;
    use crate::event::{InputEvent, MouseAction, MouseBtn, MouseEvent, Modifiers};
    use crate::geometry::Point;
    use crate::options::Options;
    use crate::widgets;

    fn headless_app() -> App<HeadlessBackend> {
        App::new(Config::new().with_max_fps(50), HeadlessBackend::new(20.0, 5.0))
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn new_app_is_running() {
        let app = headless_app();
        assert!(!app.should_quit());
        assert_eq!(app.context().frame_count(), 0);
    }

    #[test]
    fn request_quit_sets_flag() {
        let mut app = headless_app();
        app.request_quit();
        assert!(app.should_quit());
    }

    // ── run_frame ────────────────────────────────────────────────────

    #[test]
    fn run_frame_presents_commands() {
        let mut app = headless_app();
        let wait = app
            .run_frame(|ctx| {
                widgets::label(ctx, "hi", &Options::new())?;
                Ok(true)
            })
            .unwrap();
        // The label's size is new, so another frame is due one period later.
        assert_eq!(wait, Some(20_000));
        assert_eq!(app.backend().frames().len(), 1);

        let wait = app.run_frame(|ctx| {
            widgets::label(ctx, "hi", &Options::new())?;
            Ok(true)
        });
        assert_eq!(wait.unwrap(), None);
        assert_eq!(app.context().frame_count(), 2);
    }

    #[test]
    fn refresh_is_paced_by_max_fps() {
        let mut app = headless_app();
        let wait = app
            .run_frame(|ctx| {
                ctx.refresh();
                Ok(true)
            })
            .unwrap();
        // 50 fps is a 20ms period; the headless clock did not move.
        assert_eq!(wait, Some(20_000));
    }

    #[test]
    fn ui_error_is_returned_and_next_frame_recovers() {
        let mut app = headless_app();
        let err = app.run_frame(|_| Err(Error::StaleWidget)).unwrap_err();
        assert!(matches!(err, Error::StaleWidget));
        assert!(app.run_frame(|_| Ok(true)).is_ok());
        assert_eq!(app.context().frame_count(), 1);
    }

    // ── run ──────────────────────────────────────────────────────────

    #[test]
    fn run_stops_when_ui_returns_false() {
        let mut app = headless_app();
        let mut frames = 0;
        app.run(|ctx| {
            frames += 1;
            ctx.refresh();
            Ok(frames < 3)
        })
        .unwrap();
        assert_eq!(frames, 3);
        assert!(app.should_quit());
        // Each refresh slept one frame period on the scripted clock.
        assert_eq!(app.backend().now_micros(), 40_000);
    }

    #[test]
    fn run_stops_on_backend_quit() {
        let mut app = headless_app();
        app.backend_mut().request_quit();
        let mut frames = 0;
        app.run(|_| {
            frames += 1;
            Ok(true)
        })
        .unwrap();
        assert_eq!(frames, 0);
    }

    #[test]
    fn input_reaches_widgets() {
        let mut app = headless_app();
        let mut clicks = 0;
        let mut ui = |ctx: &mut Context| -> Result<bool> {
            if widgets::button(ctx, "OK", &Options::new())? {
                clicks += 1;
            }
            Ok(true)
        };
        app.run_frame(&mut ui).unwrap();
        for action in [MouseAction::Press(MouseBtn::Left), MouseAction::Release(MouseBtn::Left)] {
            let p = Point::new(1.5, 0.5);
            app.backend_mut().push_event(InputEvent::Mouse(MouseEvent { action, p, modifiers: Modifiers::NONE }));
        }
        app.run_frame(&mut ui).unwrap();
        assert_eq!(clicks, 1);
    }
}
