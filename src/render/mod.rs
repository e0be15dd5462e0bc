//! Rendering pipeline: draw commands, cell compositor, terminal driver.

pub mod compositor;
pub mod draw;
pub mod driver;

pub use compositor::{Cell, CellUpdate, Compositor};
pub use draw::DrawCmd;
pub use driver::Driver;
