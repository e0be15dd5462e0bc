//! Widget system: trait, per-frame data, parent stack, placement.

pub mod data;
pub mod layout;
pub mod stack;
pub mod traits;

pub use data::WidgetData;
pub use layout::{place_in, BoxLayout, BoxSummary, Direction};
pub use stack::ParentStack;
pub use traits::{EventFlow, Plain, Widget};

slotmap::new_key_type! {
    /// Handle to a widget installed in the current frame's arena.
    pub struct WidgetKey;
}
