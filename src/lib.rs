//! # framekit
//!
//! An immediate-mode UI core. The application describes its whole UI every
//! frame by calling widget functions; the framework keeps what must survive
//! between frames (ids, cached sizes, focus, subwindow order) and throws the
//! rest away.
//!
//! ## Core Systems
//!
//! - **[`context`]**: the per-session [`Context`]: frame bracketing, widget
//!   install/deinit, event delivery, subwindow scopes
//! - **[`widget`]**: [`Widget`] trait, [`WidgetData`], parent stack, box layout
//! - **[`widgets`]**: built-in widgets: label, button, text entry, boxes,
//!   floating windows, popups and menu items
//! - **[`subwindow`]**: z-ordered subwindow registry with deferred draw lists
//! - **[`event`]**: input events, the per-frame event queue, focus targets
//! - **[`ui`]**: focus, capture, tab order, timers, refresh requests
//! - **[`cache`]**: min-size cache, widget data store, animations
//! - **[`render`]**: draw commands, cell compositor, crossterm driver
//! - **[`backend`]**: the [`Backend`] seam, terminal and headless backends,
//!   frame pacing
//! - **[`app`]**: the frame pump tying a context to a backend
//! - **[`testing`]**: `Pilot` and snapshot helpers for headless tests
//! - **[`geometry`]**: Point, Size, Rect, Spacing primitives

// Foundation
pub mod error;
pub mod geometry;
pub mod id;

// Styling
pub mod options;
pub mod theme;

// Widget system
pub mod widget;
pub mod widgets;

// Per-frame state
pub mod cache;
pub mod event;
pub mod subwindow;
pub mod ui;

// Session
pub mod config;
pub mod context;

// Rendering and I/O
pub mod backend;
pub mod render;

// Application
pub mod app;
pub mod testing;

pub use app::App;
pub use backend::{Backend, FramePacer, HeadlessBackend, TerminalBackend};
pub use config::Config;
pub use context::{Context, FrameOutput};
pub use error::{Error, Result};
pub use event::{
    Event, EventKind, InputEvent, Key, KeyAction, KeyEvent, Modifiers, MouseAction, MouseBtn, MouseEvent,
};
pub use geometry::{Point, Rect, RectScale, Size, Spacing};
pub use id::WidgetId;
pub use options::{Expand, Gravity, Options};
pub use render::DrawCmd;
pub use subwindow::{Floating, Subwindow};
pub use theme::{Color, ColorRef, Font, Theme, ThemeColor, ThemeFont};
pub use widget::{EventFlow, Widget, WidgetData, WidgetKey};
