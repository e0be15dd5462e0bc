//! Headless testing framework: Pilot, snapshot helpers.
//!
//! Use the [`Pilot`] to drive a [`Context`](crate::context::Context) frame by
//! frame without a terminal. Use [`render_to_string`] and
//! [`describe_commands`] to capture a frame's draw list as plain text for
//! snapshot-style assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{describe_commands, render_to_string};
