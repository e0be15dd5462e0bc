//! Label widget: one line of static text.

use std::any::Any;

use crate::context::Context;
use crate::error::Result;
use crate::options::Options;
use crate::widget::{Widget, WidgetData};

/// A non-interactive line of text.
#[derive(Debug)]
pub struct Label {
    wd: WidgetData,
}

impl Widget for Label {
    fn widget_type(&self) -> &str {
        "Label"
    }

    fn data(&self) -> &WidgetData {
        &self.wd
    }

    fn data_mut(&mut self) -> &mut WidgetData {
        &mut self.wd
    }

    fn is_container(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Draw `text`. Its min size is the text's extent in the chosen font.
#[track_caller]
pub fn label(ctx: &mut Context, text: &str, opts: &Options) -> Result<()> {
    let defaults = Options::new()
        .with_name("Label")
        .with_min_size_content(ctx.theme().font(opts.font()).text_size(text));
    ctx.scope(&defaults, opts, |wd, _| Label { wd }, |ctx, key| {
        let (content, color) = {
            let wd = ctx.data(key)?;
            (wd.content_rect_scale().r, wd.options.color_text())
        };
        ctx.draw_chrome(key, None)?;
        ctx.draw_text(content, text, color);
        Ok(())
    })
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Rect, Size};
    use crate::render::DrawCmd;

    #[test]
    fn label_reports_text_extent_and_draws_it() {
        let mut ctx = Context::default();
        let mut cmds = Vec::new();
        for frame in 0..2 {
            ctx.begin_frame(frame, Size::new(20.0, 4.0)).unwrap();
            label(&mut ctx, "hello", &Options::new()).unwrap();
            cmds = ctx.end_frame().unwrap().commands;
        }
        assert_eq!(
            cmds,
            vec![DrawCmd::Text {
                rect: Rect::new(0.0, 0.0, 5.0, 1.0),
                text: "hello".into(),
                color: ctx.theme().color_text,
                clip: Rect::new(0.0, 0.0, 5.0, 1.0),
            }]
        );
    }
}
