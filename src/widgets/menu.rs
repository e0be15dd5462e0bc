//! Menu item: a button that closes the popup chain it lives in.

use crate::context::Context;
use crate::error::Result;
use crate::event::EventKind;
use crate::geometry::Spacing;
use crate::options::{Expand, Options};

use super::button::clickable;

/// A menu entry. Returns `true` on the frame it is chosen; choosing it also
/// sends a `ClosePopup` up to the enclosing popups.
#[track_caller]
pub fn menu_item(ctx: &mut Context, text: &str, opts: &Options) -> Result<bool> {
    let defaults = Options::new()
        .with_name("MenuItem")
        .with_padding(Spacing::symmetric(0.0, 1.0))
        .with_expand(Expand::Horizontal);
    clickable(ctx, &defaults, text, opts, |ctx, key| {
        ctx.bubble_event(key, EventKind::ClosePopup)?;
        Ok(())
    })
}
