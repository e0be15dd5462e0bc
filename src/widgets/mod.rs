//! Built-in widgets: label, button, text entry, boxes, floating window, popup, menu item.
//!
//! Every widget is a `#[track_caller]` function: its id comes from the call
//! site, so calling one in a loop needs a distinct `id_extra` per iteration.

pub mod boxes;
pub mod button;
pub mod label;
pub mod menu;
pub mod popup;
pub mod text_entry;
pub mod window;

pub use boxes::{hbox, vbox, BoxWidget};
pub use button::{button, Button};
pub use label::{label, Label};
pub use menu::menu_item;
pub use popup::{popup, Popup, PopupResponse};
pub use text_entry::{text_entry, TextEntry};
pub use window::{floating_window, modal_window, FloatingWindow};
