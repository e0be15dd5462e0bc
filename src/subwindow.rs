//! Subwindow registry: floating surfaces, z-order and deferred rendering.
//!
//! Order in the registry is z-order and render order: the first entry is the
//! base window, the last is on top. Entries installed again keep their
//! position; new entries are appended. Each entry collects its own draw
//! commands during the frame, and [`SubwindowRegistry::end_frame`] flushes
//! them back to front and drops entries nobody installed.

use tracing::{debug, trace};

use crate::geometry::{Point, Rect};
use crate::id::WidgetId;
use crate::render::DrawCmd;

// ---------------------------------------------------------------------------
// Subwindow
// ---------------------------------------------------------------------------

/// One floating surface.
#[derive(Debug, Clone)]
pub struct Subwindow {
    pub id: WidgetId,
    /// Screen-space rect.
    pub rect: Rect,
    /// Screen-space clip for everything drawn inside.
    pub clip: Rect,
    /// Captures all mouse input regardless of position.
    pub modal: bool,
    /// Stays above `parent` when that window is raised.
    pub stay_above: bool,
    /// The subwindow that was current when this one was installed; focus
    /// returns there when this one goes away.
    pub parent: WidgetId,
    /// Keyboard focus within this subwindow.
    pub focused_widget: Option<WidgetId>,
    pub used: bool,
    pub cmds: Vec<DrawCmd>,
}

/// Placement flags for a subwindow install.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Floating {
    pub modal: bool,
    pub stay_above: bool,
}

impl Floating {
    pub const WINDOW: Floating = Floating { modal: false, stay_above: false };
    pub const MODAL: Floating = Floating { modal: true, stay_above: false };
    pub const POPUP: Floating = Floating { modal: false, stay_above: true };
}

// ---------------------------------------------------------------------------
// SubwindowRegistry
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SubwindowRegistry {
    entries: Vec<Subwindow>,
}

impl SubwindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark every entry unused and drop last frame's commands.
    pub fn begin_frame(&mut self) {
        for sw in &mut self.entries {
            sw.used = false;
            sw.cmds.clear();
        }
    }

    /// Register `id` for this frame.
    ///
    /// An existing entry keeps its z position and focused widget; a new one
    /// is appended on top.
    pub fn add(&mut self, id: WidgetId, rect: Rect, floating: Floating, parent: WidgetId) {
        if let Some(sw) = self.get_mut(id) {
            sw.rect = rect;
            sw.clip = rect;
            sw.modal = floating.modal;
            sw.stay_above = floating.stay_above;
            sw.used = true;
            return;
        }
        trace!(%id, %parent, "new subwindow");
        self.entries.push(Subwindow {
            id,
            rect,
            clip: rect,
            modal: floating.modal,
            stay_above: floating.stay_above,
            parent,
            focused_widget: None,
            used: true,
            cmds: Vec::new(),
        });
    }

    pub fn get(&self, id: WidgetId) -> Option<&Subwindow> {
        self.entries.iter().find(|sw| sw.id == id)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut Subwindow> {
        self.entries.iter_mut().find(|sw| sw.id == id)
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.get(id).is_some()
    }

    /// Ids in z-order, bottom first.
    pub fn order(&self) -> Vec<WidgetId> {
        self.entries.iter().map(|sw| sw.id).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The topmost subwindow that takes input at `p`.
    ///
    /// Walks top to bottom. A modal window takes every point. Falls back to
    /// the bottom entry, or `fallback` when the registry is empty.
    pub fn window_for(&self, p: Point, fallback: WidgetId) -> WidgetId {
        self.entries
            .iter()
            .rev()
            .find(|sw| sw.modal || sw.rect.contains(p))
            .or_else(|| self.entries.first())
            .map_or(fallback, |sw| sw.id)
    }

    /// Move `id` to the top, with its `stay_above` children kept above it.
    ///
    /// Returns `false` when `id` is not registered.
    pub fn raise(&mut self, id: WidgetId) -> bool {
        let Some(pos) = self.entries.iter().position(|sw| sw.id == id) else {
            return false;
        };
        let target = self.entries.remove(pos);
        let mut followers = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].stay_above && self.entries[i].parent == id {
                followers.push(self.entries.remove(i));
            } else {
                i += 1;
            }
        }
        debug!(%id, followers = followers.len(), "raise subwindow");
        self.entries.push(target);
        self.entries.extend(followers);
        true
    }

    /// Append a command to `id`'s list. Returns `false` if `id` is unknown.
    pub fn push_cmd(&mut self, id: WidgetId, cmd: DrawCmd) -> bool {
        match self.get_mut(id) {
            Some(sw) => {
                sw.cmds.push(cmd);
                true
            }
            None => false,
        }
    }

    /// Drop unused entries and flush the rest, bottom to top.
    ///
    /// Returns the flattened command list and the ids that were removed.
    pub fn end_frame(&mut self) -> (Vec<DrawCmd>, Vec<WidgetId>) {
        let removed: Vec<WidgetId> = self.entries.iter().filter(|sw| !sw.used).map(|sw| sw.id).collect();
        self.entries.retain(|sw| sw.used);
        let cmds = self.entries.iter_mut().flat_map(|sw| std::mem::take(&mut sw.cmds)).collect();
        (cmds, removed)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::theme::Color;

    const BASE: WidgetId = WidgetId(0);

    fn id(n: u64) -> WidgetId {
        WidgetId(n)
    }

    fn fill(tag: u8) -> DrawCmd {
        DrawCmd::Fill {
            rect: Rect::new(0.0, 0.0, 1.0, 1.0),
            color: Color::rgb(tag, 0, 0),
            clip: Rect::new(0.0, 0.0, 10.0, 10.0),
        }
    }

    fn registry() -> SubwindowRegistry {
        let mut reg = SubwindowRegistry::new();
        reg.add(BASE, Rect::new(0.0, 0.0, 80.0, 24.0), Floating::WINDOW, BASE);
        reg
    }

    // -----------------------------------------------------------------------
    // Ordering
    // -----------------------------------------------------------------------

    #[test]
    fn new_entries_append_existing_keep_position() {
        let mut reg = registry();
        reg.add(id(1), Rect::new(0.0, 0.0, 5.0, 5.0), Floating::WINDOW, BASE);
        reg.add(id(2), Rect::new(0.0, 0.0, 5.0, 5.0), Floating::WINDOW, BASE);
        reg.end_frame();

        reg.begin_frame();
        reg.add(BASE, Rect::new(0.0, 0.0, 80.0, 24.0), Floating::WINDOW, BASE);
        reg.add(id(2), Rect::new(1.0, 1.0, 5.0, 5.0), Floating::WINDOW, BASE);
        reg.add(id(1), Rect::new(0.0, 0.0, 5.0, 5.0), Floating::WINDOW, BASE);
        assert_eq!(reg.order(), vec![BASE, id(1), id(2)]);
        assert_eq!(reg.get(id(2)).map(|sw| sw.rect), Some(Rect::new(1.0, 1.0, 5.0, 5.0)));
    }

    #[test]
    fn flush_follows_registry_order_not_draw_order() {
        let mut reg = registry();
        reg.add(id(1), Rect::new(0.0, 0.0, 5.0, 5.0), Floating::WINDOW, BASE);
        // Interleaved drawing: base, window, base again.
        reg.push_cmd(BASE, fill(1));
        reg.push_cmd(id(1), fill(2));
        reg.push_cmd(BASE, fill(3));

        let (cmds, removed) = reg.end_frame();
        assert_eq!(cmds, vec![fill(1), fill(3), fill(2)]);
        assert!(removed.is_empty());
    }

    #[test]
    fn unused_entries_are_removed_at_end_of_frame() {
        let mut reg = registry();
        reg.add(id(1), Rect::new(0.0, 0.0, 5.0, 5.0), Floating::WINDOW, BASE);
        reg.end_frame();

        reg.begin_frame();
        reg.add(BASE, Rect::new(0.0, 0.0, 80.0, 24.0), Floating::WINDOW, BASE);
        let (_, removed) = reg.end_frame();
        assert_eq!(removed, vec![id(1)]);
        assert_eq!(reg.order(), vec![BASE]);
    }

    // -----------------------------------------------------------------------
    // Raise
    // -----------------------------------------------------------------------

    #[test]
    fn raise_moves_stay_above_children_along() {
        let mut reg = registry();
        reg.add(id(1), Rect::new(0.0, 0.0, 5.0, 5.0), Floating::WINDOW, BASE);
        reg.add(id(11), Rect::new(0.0, 0.0, 2.0, 2.0), Floating::POPUP, id(1));
        reg.add(id(2), Rect::new(0.0, 0.0, 5.0, 5.0), Floating::WINDOW, BASE);

        assert!(reg.raise(id(1)));
        assert_eq!(reg.order(), vec![BASE, id(2), id(1), id(11)]);
        assert!(!reg.raise(id(99)));
    }

    // -----------------------------------------------------------------------
    // Hit testing
    // -----------------------------------------------------------------------

    #[test]
    fn window_for_picks_topmost() {
        let mut reg = registry();
        reg.add(id(1), Rect::new(0.0, 0.0, 10.0, 10.0), Floating::WINDOW, BASE);
        reg.add(id(2), Rect::new(5.0, 5.0, 10.0, 10.0), Floating::WINDOW, BASE);
        assert_eq!(reg.window_for(Point::new(7.0, 7.0), BASE), id(2));
        assert_eq!(reg.window_for(Point::new(2.0, 2.0), BASE), id(1));
        assert_eq!(reg.window_for(Point::new(50.0, 20.0), BASE), BASE);
        assert_eq!(reg.window_for(Point::new(500.0, 500.0), BASE), BASE);
    }

    #[test]
    fn modal_window_takes_every_point() {
        let mut reg = registry();
        reg.add(id(1), Rect::new(0.0, 0.0, 10.0, 10.0), Floating::WINDOW, BASE);
        reg.add(id(2), Rect::new(30.0, 5.0, 4.0, 4.0), Floating::MODAL, BASE);
        assert_eq!(reg.window_for(Point::new(2.0, 2.0), BASE), id(2));
    }

    #[test]
    fn window_for_empty_registry_uses_fallback() {
        let reg = SubwindowRegistry::new();
        assert_eq!(reg.window_for(Point::ZERO, id(42)), id(42));
    }
}
