//! Crossterm terminal output.
//!
//! The `Driver` wraps a buffered writer (stdout by default) and provides
//! methods for entering/leaving the alternate screen, applying cell updates
//! from the compositor, and controlling the cursor.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::theme::Color;

use super::compositor::{Cell, CellUpdate};

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Terminal output using crossterm.
///
/// The driver does NOT automatically enter alternate screen on creation;
/// call `enter_alt_screen` explicitly.
pub struct Driver<W: Write = BufWriter<Stdout>> {
    writer: W,
}

impl Driver {
    /// Create a new driver wrapping stdout.
    pub fn new() -> io::Result<Self> {
        Ok(Self { writer: BufWriter::new(io::stdout()) })
    }

    /// Get the terminal size (columns, rows) via crossterm.
    pub fn terminal_size() -> io::Result<(u16, u16)> {
        terminal::size()
    }
}

impl<W: Write> Driver<W> {
    /// Wrap an arbitrary writer.
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Enter alternate screen, enable raw mode and mouse reporting.
    pub fn enter_alt_screen(&mut self) -> io::Result<()> {
        execute!(self.writer, EnterAlternateScreen, EnableMouseCapture)?;
        terminal::enable_raw_mode()?;
        Ok(())
    }

    /// Undo [`enter_alt_screen`](Self::enter_alt_screen).
    pub fn leave_alt_screen(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.writer, DisableMouseCapture, LeaveAlternateScreen)?;
        Ok(())
    }

    /// Queue a batch of cell updates.
    ///
    /// Uses `queue!` for batching; call `flush()` afterward to send to the
    /// terminal.
    pub fn apply_updates(&mut self, updates: &[CellUpdate]) -> io::Result<()> {
        for update in updates {
            queue!(self.writer, cursor::MoveTo(update.x, update.y))?;
            self.apply_cell_colors(&update.cell)?;
            queue!(self.writer, Print(update.cell.ch), ResetColor)?;
        }
        Ok(())
    }

    /// Flush the internal write buffer to the terminal.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn hide_cursor(&mut self) -> io::Result<()> {
        execute!(self.writer, cursor::Hide)
    }

    pub fn show_cursor(&mut self) -> io::Result<()> {
        execute!(self.writer, cursor::Show)
    }

    /// Consume the driver, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn apply_cell_colors(&mut self, cell: &Cell) -> io::Result<()> {
        if let Some(fg) = to_crossterm(cell.fg) {
            queue!(self.writer, SetForegroundColor(fg))?;
        }
        if let Some(bg) = to_crossterm(cell.bg) {
            queue!(self.writer, SetBackgroundColor(bg))?;
        }
        Ok(())
    }
}

/// Map a color to a crossterm truecolor. Fully transparent maps to `None`
/// (keep the terminal default).
pub fn to_crossterm(color: Color) -> Option<style::Color> {
    (color.a != 0).then_some(style::Color::Rgb { r: color.r, g: color.g, b: color.b })
}

// ===========================================================================
// Tests
// ===========================================================================
