//! Error type for frame construction and backends.

use std::panic::Location;

use crate::id::WidgetId;

/// Errors raised while building or presenting a frame.
///
/// Every variant except [`Error::Io`] aborts the current frame. The next call
/// to [`Context::begin_frame`](crate::context::Context::begin_frame) starts
/// from a clean stack, so a failed frame never leaks into the following one.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Two widgets produced the same id in one frame.
    #[error("duplicate widget id {id} (first installed at {first}, again at {second}); pass a distinct id_extra")]
    DuplicateId {
        id: WidgetId,
        first: &'static Location<'static>,
        second: &'static Location<'static>,
    },

    /// A widget was deinitialized while another widget was still on top of the stack.
    #[error("unbalanced deinit: expected {expected:?} on top of the parent stack, got {found}")]
    UnbalancedDeinit {
        expected: Option<WidgetId>,
        found: WidgetId,
    },

    /// The frame ended with widgets that were installed but never deinitialized.
    #[error("frame ended with {open} widget(s) still installed")]
    UnclosedWidgets { open: usize },

    /// A widget operation was attempted outside of `begin_frame`/`end_frame`.
    #[error("no frame in progress")]
    NoFrame,

    /// A widget handle that does not belong to the current frame.
    #[error("widget handle is not installed in the current frame")]
    StaleWidget,

    /// The per-frame widget arena is full.
    #[error("widget arena exhausted ({capacity} widgets per frame)")]
    ArenaExhausted { capacity: usize },

    /// Backend I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unclosed_widgets_message() {
        let err = Error::UnclosedWidgets { open: 3 };
        assert_eq!(err.to_string(), "frame ended with 3 widget(s) still installed");
    }

    #[test]
    fn arena_message_names_capacity() {
        let err = Error::ArenaExhausted { capacity: 16 };
        assert!(err.to_string().contains("16"));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "boom");
    }
}
