//! Backends: where input comes from, where frames go, and when to wake.
//!
//! A [`Backend`] is the window-system seam. The crate ships a crossterm
//! [`TerminalBackend`] and a scripted [`HeadlessBackend`]. [`FramePacer`]
//! turns a frame's `next_deadline` into a sleep duration.

pub mod headless;
pub mod terminal;

pub use headless::HeadlessBackend;
pub use terminal::TerminalBackend;

use std::time::Duration;

use crate::context::Context;
use crate::error::Result;
use crate::geometry::Size;
use crate::render::DrawCmd;

// ---------------------------------------------------------------------------
// Backend trait
// ---------------------------------------------------------------------------

pub trait Backend {
    /// Monotonic clock in microseconds.
    fn now_micros(&self) -> u64;

    /// Current screen size in screen units.
    fn screen_size(&self) -> Result<Size>;

    /// Move pending input into `ctx`'s queue. Returns `true` when the user
    /// asked to quit.
    fn poll_events(&mut self, ctx: &mut Context) -> Result<bool>;

    /// Sleep until input arrives or `timeout` passes (`None`: no timeout).
    /// Returns whether input arrived.
    fn wait_event(&mut self, timeout: Option<Duration>) -> Result<bool>;

    /// Show a finished frame.
    fn present(&mut self, cmds: &[DrawCmd]) -> Result<()>;
}

// ---------------------------------------------------------------------------
// FramePacer
// ---------------------------------------------------------------------------

/// Weight of the newest overhead sample in the moving average.
const OVERHEAD_ALPHA: f64 = 0.1;

/// Computes how long to sleep between frames.
#[derive(Debug, Clone)]
pub struct FramePacer {
    max_fps: Option<u32>,
    /// Moving average of non-waiting loop time, micros.
    overhead: f64,
    samples: u64,
    last_frame_start: Option<u64>,
}

impl FramePacer {
    pub fn new(max_fps: Option<u32>) -> Self {
        Self { max_fps, overhead: 0.0, samples: 0, last_frame_start: None }
    }

    /// Shortest allowed frame period in micros.
    pub fn min_period(&self) -> Option<u64> {
        self.max_fps.filter(|&f| f > 0).map(|f| 1_000_000 / u64::from(f))
    }

    /// Record the start of a frame.
    pub fn frame_started(&mut self, now: u64) {
        self.last_frame_start = Some(now);
    }

    /// Record time spent awake (polling, building, presenting).
    pub fn record_overhead(&mut self, micros: u64) {
        let sample = micros as f64;
        self.overhead = if self.samples == 0 {
            sample
        } else {
            self.overhead + OVERHEAD_ALPHA * (sample - self.overhead)
        };
        self.samples += 1;
    }

    /// Current overhead estimate, micros.
    pub fn overhead(&self) -> u64 {
        self.overhead.round() as u64
    }

    /// How long to sleep at `now` for a frame due at `deadline`.
    ///
    /// `None` means sleep until input. Otherwise the wait covers the
    /// remainder of the minimum frame period, minus the estimated overhead
    /// of the next frame.
    pub fn wait_time(&self, now: u64, deadline: Option<u64>) -> Option<u64> {
        let deadline = deadline?;
        let earliest = match (self.last_frame_start, self.min_period()) {
            (Some(start), Some(period)) => start.saturating_add(period),
            _ => 0,
        };
        let wake = deadline.max(earliest);
        Some(wake.saturating_sub(now).saturating_sub(self.overhead()))
    }
}

// ===========================================================================
// Tests
// ===========================================================================
