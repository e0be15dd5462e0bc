//! Session state reachable from inside event handlers.
//!
//! [`UiState`] is the part of a [`Context`](crate::context::Context) that a
//! widget's `process_event` may read and change: focus, mouse capture, tab
//! order, the theme, the id-keyed caches and the current frame's event
//! queue. It is a separate value from the widget arena so a widget can be
//! borrowed mutably at the same time.

use tracing::{debug, warn};

use crate::cache::{Animation, Caches};
use crate::event::{Event, EventKind, EventQueue, FocusTarget};
use crate::geometry::{Point, Rect};
use crate::id::WidgetId;
use crate::render::DrawCmd;
use crate::subwindow::SubwindowRegistry;
use crate::theme::Theme;

// ---------------------------------------------------------------------------
// Capture / tab order
// ---------------------------------------------------------------------------

/// The widget receiving all mouse events regardless of position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    pub id: WidgetId,
    /// Whether the owner was installed this frame.
    maintained: bool,
}

/// One focusable widget registered for tab navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabEntry {
    pub id: WidgetId,
    pub tab_index: u16,
    pub subwindow: WidgetId,
}

// ---------------------------------------------------------------------------
// UiState
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct UiState {
    pub(crate) events: EventQueue,
    pub(crate) subwindows: SubwindowRegistry,
    pub(crate) caches: Caches,
    pub(crate) clip: Rect,
    current_subwindow: WidgetId,
    focused_subwindow: WidgetId,
    capture: Option<Capture>,
    tab_prev: Vec<TabEntry>,
    tab_cur: Vec<TabEntry>,
    theme: Theme,
    now: u64,
    refresh: bool,
    screen: Rect,
    scale: f32,
    mouse_pt: Point,
}

impl UiState {
    pub fn new(theme: Theme, scale: f32) -> Self {
        Self {
            events: EventQueue::new(),
            subwindows: SubwindowRegistry::new(),
            caches: Caches::new(),
            clip: Rect::EMPTY,
            current_subwindow: WidgetId::ROOT,
            focused_subwindow: WidgetId::ROOT,
            capture: None,
            tab_prev: Vec::new(),
            tab_cur: Vec::new(),
            theme,
            now: 0,
            refresh: false,
            screen: Rect::EMPTY,
            scale,
            mouse_pt: Point::ZERO,
        }
    }

    // ── Frame bookkeeping (driven by Context) ────────────────────────

    pub(crate) fn begin_frame(&mut self, now: u64, screen: Rect) {
        self.now = now;
        self.screen = screen;
        self.clip = screen;
        self.current_subwindow = WidgetId::ROOT;
        self.tab_cur.clear();
        self.subwindows.begin_frame();
        if let Some(c) = &mut self.capture {
            c.maintained = false;
        }
    }

    /// Close the frame: release an unmaintained capture, keep this frame's
    /// tab order, prune the registry and return its commands back to front.
    pub(crate) fn end_frame(&mut self) -> Vec<DrawCmd> {
        if let Some(c) = self.capture {
            if !c.maintained {
                warn!(id = %c.id, "mouse capture not maintained this frame, releasing");
                self.capture = None;
            }
        }
        self.tab_prev = std::mem::take(&mut self.tab_cur);

        let return_to = self.subwindows.get(self.focused_subwindow).map(|sw| sw.parent);
        let (cmds, removed) = self.subwindows.end_frame();
        if removed.contains(&self.focused_subwindow) {
            let next = return_to
                .filter(|&p| self.subwindows.contains(p))
                .unwrap_or(WidgetId::ROOT);
            debug!(from = %self.focused_subwindow, to = %next, "focused subwindow went away");
            self.focused_subwindow = next;
        }
        self.caches.end_frame(self.now);
        cmds
    }

    pub(crate) fn set_current_subwindow(&mut self, id: WidgetId) {
        self.current_subwindow = id;
    }

    pub(crate) fn maintain_capture(&mut self, id: WidgetId) {
        if let Some(c) = &mut self.capture {
            if c.id == id {
                c.maintained = true;
            }
        }
    }

    pub(crate) fn set_mouse_pt(&mut self, p: Point) {
        self.mouse_pt = p;
    }

    /// Whether a refresh was requested since the last call.
    pub(crate) fn take_refresh(&mut self) -> bool {
        std::mem::take(&mut self.refresh)
    }

    /// Keyboard routing target at this moment.
    pub(crate) fn key_target(&self) -> FocusTarget {
        FocusTarget { subwindow: self.focused_subwindow, widget: self.focused_widget() }
    }

    /// Whether `event` should be offered to widget `id` whose hit rect is `rect`.
    pub(crate) fn event_matches(&self, event: &Event, id: WidgetId, rect: Rect) -> bool {
        if event.handled {
            return false;
        }
        match &event.kind {
            EventKind::Key(_) | EventKind::Text(_) => {
                event.focus.and_then(|f| f.widget) == Some(id)
            }
            EventKind::Mouse(m) => match self.capture {
                Some(c) => c.id == id,
                None => {
                    event.floating_win == Some(self.current_subwindow)
                        && rect.contains(m.p)
                        && self.clip.contains(m.p)
                }
            },
            EventKind::ClosePopup => false,
        }
    }

    // ── Time / screen ────────────────────────────────────────────────

    /// Timestamp of the current frame, in microseconds.
    pub fn now_micros(&self) -> u64 {
        self.now
    }

    /// Screen rect of the current frame.
    pub fn screen_rect(&self) -> Rect {
        self.screen
    }

    /// Screen units per logical unit.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub(crate) fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// Current clip rect (screen space).
    pub fn clip(&self) -> Rect {
        self.clip
    }

    /// Last known mouse position (screen space).
    pub fn mouse_pt(&self) -> Point {
        self.mouse_pt
    }

    /// Ask for another frame as soon as possible.
    pub fn refresh(&mut self) {
        self.refresh = true;
    }

    // ── Theme ────────────────────────────────────────────────────────

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Swap the active theme. Takes effect for everything drawn afterwards.
    pub fn set_theme(&mut self, theme: Theme) {
        debug!(theme = %theme.name, "theme changed");
        self.theme = theme;
        self.refresh = true;
    }

    // ── Subwindows / focus ───────────────────────────────────────────

    pub fn current_subwindow(&self) -> WidgetId {
        self.current_subwindow
    }

    /// The subwindow receiving keyboard input.
    pub fn focused_subwindow(&self) -> WidgetId {
        self.focused_subwindow
    }

    /// Focused widget of the focused subwindow.
    pub fn focused_widget(&self) -> Option<WidgetId> {
        self.focused_widget_in(self.focused_subwindow)
    }

    pub fn focused_widget_in(&self, subwindow: WidgetId) -> Option<WidgetId> {
        self.subwindows.get(subwindow).and_then(|sw| sw.focused_widget)
    }

    /// Whether `id` is the focused widget of the current subwindow.
    pub fn is_focused(&self, id: WidgetId) -> bool {
        self.focused_widget_in(self.current_subwindow) == Some(id)
    }

    /// Focus `id` within `subwindow` (the current one if `None`).
    ///
    /// With `event_num`, every keyboard event queued after that event is
    /// redirected to the new focus, so widgets installed later in this frame
    /// receive the rest of the input.
    pub fn focus_widget(&mut self, id: Option<WidgetId>, subwindow: Option<WidgetId>, event_num: Option<u32>) {
        let sw_id = subwindow.unwrap_or(self.current_subwindow);
        let Some(sw) = self.subwindows.get_mut(sw_id) else {
            return;
        };
        if sw.focused_widget == id {
            return;
        }
        sw.focused_widget = id;
        debug!(widget = ?id, subwindow = %sw_id, ?event_num, "focus widget");
        if let Some(num) = event_num {
            self.events.retarget_after(num, FocusTarget { subwindow: sw_id, widget: id });
        }
        self.refresh = true;
    }

    /// Give `id` keyboard focus among subwindows.
    pub fn focus_subwindow(&mut self, id: WidgetId, event_num: Option<u32>) {
        if self.focused_subwindow == id {
            return;
        }
        self.focused_subwindow = id;
        debug!(subwindow = %id, "focus subwindow");
        if let Some(num) = event_num {
            let target = self.key_target();
            self.events.retarget_after(num, target);
        }
        self.refresh = true;
    }

    /// Move `id` to the top of the z-order.
    pub fn raise_subwindow(&mut self, id: WidgetId) {
        if self.subwindows.raise(id) {
            self.refresh = true;
        }
    }

    // ── Mouse capture ────────────────────────────────────────────────

    /// Route all mouse events to `id` (or stop doing so with `None`).
    ///
    /// The owner must stay installed; a capture whose owner skipped a frame
    /// is released at the end of that frame.
    pub fn capture_mouse(&mut self, id: Option<WidgetId>) {
        self.capture = id.map(|id| Capture { id, maintained: true });
    }

    pub fn captured(&self, id: WidgetId) -> bool {
        self.capture.is_some_and(|c| c.id == id)
    }

    pub fn capture_owner(&self) -> Option<WidgetId> {
        self.capture.map(|c| c.id)
    }

    // ── Tab order ────────────────────────────────────────────────────

    /// Register `id` as focusable in the current subwindow for this frame.
    ///
    /// Widgets without an index sort after indexed ones, in install order.
    pub fn tab_index_set(&mut self, id: WidgetId, tab_index: Option<u16>) {
        self.tab_cur.push(TabEntry {
            id,
            tab_index: tab_index.unwrap_or(u16::MAX),
            subwindow: self.current_subwindow,
        });
    }

    /// Last frame's tab order of the focused subwindow.
    pub fn tab_order(&self) -> Vec<WidgetId> {
        let mut entries: Vec<TabEntry> =
            self.tab_prev.iter().filter(|t| t.subwindow == self.focused_subwindow).copied().collect();
        entries.sort_by_key(|t| t.tab_index);
        entries.into_iter().map(|t| t.id).collect()
    }

    /// Focus the next widget in tab order, wrapping around.
    pub fn focus_next(&mut self, event_num: Option<u32>) {
        self.focus_step(event_num, true);
    }

    /// Focus the previous widget in tab order, wrapping around.
    pub fn focus_prev(&mut self, event_num: Option<u32>) {
        self.focus_step(event_num, false);
    }

    fn focus_step(&mut self, event_num: Option<u32>, forward: bool) {
        let order = self.tab_order();
        if order.is_empty() {
            return;
        }
        let len = order.len();
        let pos = self.focused_widget().and_then(|f| order.iter().position(|&id| id == f));
        let next = match (pos, forward) {
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
            (None, true) => 0,
            (None, false) => len - 1,
        };
        let sw = self.focused_subwindow;
        self.focus_widget(Some(order[next]), Some(sw), event_num);
    }

    // ── Caches ───────────────────────────────────────────────────────

    pub fn data_set<T: std::any::Any>(&mut self, id: WidgetId, value: T) {
        self.caches.data_set(id, value);
    }

    pub fn data_get<T: std::any::Any + Clone>(&self, id: WidgetId) -> Option<T> {
        self.caches.data_get(id)
    }

    pub fn data_remove<T: std::any::Any>(&mut self, id: WidgetId) -> Option<T> {
        self.caches.data_remove(id)
    }

    /// Start an animation of `key` on `id` lasting `duration` micros.
    pub fn animate(&mut self, id: WidgetId, key: &'static str, start_val: f32, end_val: f32, duration: u64) {
        self.caches.animation_set(id, key, Animation::new(start_val, end_val, self.now, duration));
        self.refresh = true;
    }

    /// Current value of a running animation.
    pub fn animation_value(&self, id: WidgetId, key: &'static str) -> Option<f32> {
        self.caches.animation_get(id, key).map(|a| a.value(self.now))
    }

    /// Arm a timer for `id` that fires `after` micros from now.
    pub fn timer(&mut self, id: WidgetId, after: u64) {
        self.caches.timer_arm(id, self.now.saturating_add(after));
    }

    /// Whether `id`'s timer fired. Reports each timer once.
    pub fn timer_done(&mut self, id: WidgetId) -> bool {
        self.caches.timer_fired(id, self.now)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
