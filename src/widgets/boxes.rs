//! Box containers: children laid out in a row or a column.
//!
//! Free space along the main axis is shared among expanding children using
//! the totals this box recorded last frame, so a newly added expander gets
//! its share one frame later.

use std::any::Any;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::geometry::{Rect, Size};
use crate::id::WidgetId;
use crate::options::{Expand, Gravity, Options};
use crate::widget::{BoxLayout, BoxSummary, Direction, Widget, WidgetData};

#[derive(Debug)]
pub struct BoxWidget {
    wd: WidgetData,
    layout: BoxLayout,
}

impl BoxWidget {
    pub fn direction(&self) -> Direction {
        self.layout.direction()
    }
}

impl Widget for BoxWidget {
    fn widget_type(&self) -> &str {
        match self.layout.direction() {
            Direction::Horizontal => "HBox",
            Direction::Vertical => "VBox",
        }
    }

    fn data(&self) -> &WidgetData {
        &self.wd
    }

    fn data_mut(&mut self) -> &mut WidgetData {
        &mut self.wd
    }

    fn rect_for(&mut self, _child: WidgetId, min_size: Size, expand: Expand, gravity: Gravity) -> Rect {
        let avail = self.wd.content_rect().just_size();
        self.layout.next_rect(avail, min_size, expand, gravity)
    }

    fn min_size_for_child(&mut self, size: Size) {
        self.wd.min_size_children = self.layout.fold(self.wd.min_size_children, size);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Lay out the widgets `body` installs top to bottom.
#[track_caller]
pub fn vbox<R>(ctx: &mut Context, opts: &Options, body: impl FnOnce(&mut Context) -> Result<R>) -> Result<R> {
    boxed(ctx, Direction::Vertical, opts, body)
}

/// Lay out the widgets `body` installs left to right.
#[track_caller]
pub fn hbox<R>(ctx: &mut Context, opts: &Options, body: impl FnOnce(&mut Context) -> Result<R>) -> Result<R> {
    boxed(ctx, Direction::Horizontal, opts, body)
}

#[track_caller]
fn boxed<R>(
    ctx: &mut Context,
    dir: Direction,
    opts: &Options,
    body: impl FnOnce(&mut Context) -> Result<R>,
) -> Result<R> {
    let defaults = Options::new().with_name(match dir {
        Direction::Horizontal => "HBox",
        Direction::Vertical => "VBox",
    });
    ctx.scope(
        &defaults,
        opts,
        |wd, ui| {
            let prev = ui.data_get::<BoxSummary>(wd.id).unwrap_or_default();
            BoxWidget { wd, layout: BoxLayout::new(dir, prev) }
        },
        |ctx, key| {
            ctx.draw_chrome(key, None)?;
            let value = body(ctx)?;
            let (id, summary) = ctx
                .widget::<BoxWidget>(key)
                .map(|b| (b.wd.id, b.layout.summary()))
                .ok_or(Error::StaleWidget)?;
            ctx.ui_mut().data_set(id, summary);
            Ok(value)
        },
    )
}

// ===========================================================================
// Tests
// ===========================================================================
