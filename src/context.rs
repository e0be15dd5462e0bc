//! Session context: frames, the widget arena and the event pass.
//!
//! A [`Context`] owns everything a UI session needs between and during
//! frames. A frame is bracketed by [`Context::begin_frame`] and
//! [`Context::end_frame`]; in between, widgets are installed against the
//! current parent, process the events addressed to them, draw, and are
//! deinitialized in reverse order.
//!
//! ```no_run
//! use framekit::{Config, Context, Options, Size};
//! use framekit::widgets;
//!
//! let mut ctx = Context::new(Config::default());
//! ctx.begin_frame(0, Size::new(80.0, 24.0))?;
//! if widgets::button(&mut ctx, "Quit", &Options::new())? {
//!     // ...
//! }
//! let out = ctx.end_frame()?;
//! # let _ = out;
//! # Ok::<(), framekit::Error>(())
//! ```

use std::collections::HashMap;
use std::panic::Location;

use slotmap::SlotMap;
use tracing::{debug, trace, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::event::{
    Event, EventKind, InputEvent, Key, KeyAction, KeyEvent, Modifiers, MouseAction, MouseBtn, MouseEvent,
};
use crate::geometry::{Point, Rect, RectScale, Size, Spacing};
use crate::id::WidgetId;
use crate::options::Options;
use crate::render::DrawCmd;
use crate::subwindow::Floating;
use crate::theme::{ColorRef, Theme};
use crate::ui::UiState;
use crate::widget::{EventFlow, ParentStack, Plain, Widget, WidgetData, WidgetKey};

// ---------------------------------------------------------------------------
// FrameOutput
// ---------------------------------------------------------------------------

/// Result of a completed frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// Draw commands, back to front.
    pub commands: Vec<DrawCmd>,
    /// When the next frame is due (micros). `None` waits for input.
    pub next_deadline: Option<u64>,
}

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

pub struct Context {
    config: Config,
    widgets: SlotMap<WidgetKey, Box<dyn Widget>>,
    stack: ParentStack,
    ui: UiState,
    /// Ids installed this frame and where from.
    ids: HashMap<WidgetId, &'static Location<'static>>,
    root: Option<WidgetKey>,
    frame_open: bool,
    /// Queue length when the frame began.
    frame_events: usize,
    frame_count: u64,
}

impl Default for Context {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("frame_open", &self.frame_open)
            .field("frame_count", &self.frame_count)
            .field("open_widgets", &self.stack.depth())
            .field("events", &self.ui.events.len())
            .finish()
    }
}

impl Context {
    pub fn new(config: Config) -> Self {
        let ui = UiState::new(config.theme.clone(), config.scale);
        Self {
            widgets: SlotMap::with_capacity_and_key(config.arena_capacity.min(1024)),
            config,
            stack: ParentStack::new(),
            ui,
            ids: HashMap::new(),
            root: None,
            frame_open: false,
            frame_events: 0,
            frame_count: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// State shared with event handlers.
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut UiState {
        &mut self.ui
    }

    // -----------------------------------------------------------------------
    // Frame lifecycle
    // -----------------------------------------------------------------------

    /// Start a frame at time `now` (micros) on a screen of `screen` units.
    ///
    /// Always starts from a clean stack. A frame that was begun and never
    /// ended is discarded along with the events it had consumed.
    #[track_caller]
    pub fn begin_frame(&mut self, now: u64, screen: Size) -> Result<()> {
        if self.frame_open {
            warn!(open = self.stack.depth(), "previous frame was never ended, discarding it");
            self.discard_frame();
        }
        self.widgets.clear();
        self.stack.clear();
        self.ids.clear();

        let screen_rect = screen.to_rect();
        self.ui.begin_frame(now, screen_rect);
        self.ui.subwindows.add(WidgetId::ROOT, screen_rect, Floating::WINDOW, WidgetId::ROOT);
        self.frame_open = true;
        self.frame_events = self.ui.events.len();

        let mut wd = WidgetData::root(screen_rect, self.ui.scale(), Location::caller());
        wd.min_size = self.ui.caches.min_size(WidgetId::ROOT);
        self.ids.insert(WidgetId::ROOT, wd.location);
        self.ui.caches.touch(WidgetId::ROOT);
        let key = self.widgets.insert(Box::new(Plain::new(wd, "Root")));
        self.stack.push(key, WidgetId::ROOT, true);
        self.root = Some(key);

        debug!(frame = self.frame_count, now, events = self.frame_events, "begin frame");
        Ok(())
    }

    /// Finish the frame.
    ///
    /// Fails with [`Error::UnclosedWidgets`] if anything besides the root is
    /// still installed; the frame is dropped in that case.
    pub fn end_frame(&mut self) -> Result<FrameOutput> {
        if !self.frame_open {
            return Err(Error::NoFrame);
        }
        let open = self.stack.depth().saturating_sub(1);
        if open > 0 {
            warn!(open, "frame ended with widgets still installed, dropping it");
            self.discard_frame();
            return Err(Error::UnclosedWidgets { open });
        }
        if let Some(root) = self.root.take() {
            self.deinit(root)?;
        }

        let tabs = self.take_unhandled_tabs();
        let unhandled = self.ui.events.unhandled_count();
        self.ui.events.clear();
        let commands = self.ui.end_frame();
        // Runs against this frame's tab order, now in place for the next one.
        for forward in tabs {
            if forward {
                self.ui.focus_next(None);
            } else {
                self.ui.focus_prev(None);
            }
        }
        self.widgets.clear();
        self.frame_open = false;

        let now = self.ui.now_micros();
        let next_deadline = if self.ui.take_refresh() || self.ui.caches.animating(now) {
            Some(now)
        } else {
            self.ui.caches.next_timer()
        };
        debug!(
            frame = self.frame_count,
            installs = self.stack.installs(),
            commands = commands.len(),
            unhandled,
            ?next_deadline,
            "end frame"
        );
        self.frame_count += 1;
        Ok(FrameOutput { commands, next_deadline })
    }

    /// Whether a frame is in progress.
    pub fn frame_open(&self) -> bool {
        self.frame_open
    }

    /// Completed frames.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Installs during the current (or last) frame, root included.
    pub fn installs(&self) -> usize {
        self.stack.installs()
    }

    /// Deinits during the current (or last) frame, root included.
    pub fn deinits(&self) -> usize {
        self.stack.deinits()
    }

    /// Widgets currently open, root included.
    pub fn open_widgets(&self) -> usize {
        self.stack.depth()
    }

    fn discard_frame(&mut self) {
        self.ui.events.discard_first(self.frame_events);
        self.ui.caches.abandon_frame();
        self.widgets.clear();
        self.stack.clear();
        self.ids.clear();
        self.root = None;
        self.frame_open = false;
    }

    /// Claims the Tab/BackTab presses nobody consumed. Each one moves focus
    /// once the frame's tab order is final: `true` steps forward.
    fn take_unhandled_tabs(&mut self) -> Vec<bool> {
        self.ui
            .events
            .iter_mut()
            .filter(|e| !e.handled)
            .filter_map(|e| {
                let k = e.as_key()?;
                if k.action == KeyAction::Up {
                    return None;
                }
                let forward = match k.code {
                    Key::Tab => !k.modifiers.contains(Modifiers::SHIFT),
                    Key::BackTab => false,
                    _ => return None,
                };
                e.handle();
                Some(forward)
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Install / deinit
    // -----------------------------------------------------------------------

    /// Install a widget under the current parent.
    ///
    /// `defaults` are the widget kind's class defaults, `opts` the call
    /// site's overrides. `make` builds the widget from its resolved data.
    #[track_caller]
    pub fn install<W, F>(&mut self, defaults: &Options, opts: &Options, make: F) -> Result<WidgetKey>
    where
        W: Widget,
        F: FnOnce(WidgetData, &mut UiState) -> W,
    {
        self.install_at(Location::caller(), defaults, opts, None, make)
    }

    /// Install a floating widget: it becomes the current subwindow, gets an
    /// entry in the registry and clips to exactly its own rect.
    ///
    /// Its rect is in logical units relative to the screen.
    #[track_caller]
    pub fn install_subwindow<W, F>(
        &mut self,
        defaults: &Options,
        opts: &Options,
        floating: Floating,
        make: F,
    ) -> Result<WidgetKey>
    where
        W: Widget,
        F: FnOnce(WidgetData, &mut UiState) -> W,
    {
        self.install_at(Location::caller(), defaults, opts, Some(floating), make)
    }

    fn install_at<W, F>(
        &mut self,
        location: &'static Location<'static>,
        defaults: &Options,
        opts: &Options,
        floating: Option<Floating>,
        make: F,
    ) -> Result<WidgetKey>
    where
        W: Widget,
        F: FnOnce(WidgetData, &mut UiState) -> W,
    {
        if !self.frame_open {
            return Err(Error::NoFrame);
        }
        let (parent, parent_id) = match (self.stack.current(), self.stack.current_id()) {
            (Some(key), Some(id)) => (key, id),
            _ => return Err(Error::NoFrame),
        };

        let options = defaults.override_with(opts);
        let id = WidgetId::derive(parent_id, location, options.id_extra.unwrap_or(0));
        if let Some(&first) = self.ids.get(&id) {
            warn!(%id, %first, second = %location, "duplicate widget id");
            return Err(Error::DuplicateId { id, first, second: location });
        }
        let capacity = self.config.arena_capacity;
        if self.stack.installs() >= capacity {
            warn!(capacity, "widget arena exhausted");
            return Err(Error::ArenaExhausted { capacity });
        }
        self.ids.insert(id, location);
        self.ui.caches.touch(id);
        let min_size = self.ui.caches.min_size(id);

        let (rect, rect_scale) = match floating {
            None => {
                let p = self.widgets.get_mut(parent).ok_or(Error::StaleWidget)?;
                let rect = match options.rect {
                    Some(r) => r,
                    None => p.rect_for(id, min_size, options.expand(), options.gravity()),
                };
                (rect, p.screen_rect_scale(rect))
            }
            Some(_) => {
                let rect = options.rect.unwrap_or_else(|| min_size.to_rect());
                let screen = RectScale::new(self.ui.screen_rect(), self.ui.scale());
                (rect, screen.rect_to_rect_scale(rect))
            }
        };

        let mut wd = WidgetData {
            id,
            parent: Some(parent),
            rect,
            rect_scale,
            min_size,
            options,
            location,
            min_size_children: Size::ZERO,
            saved_clip: Some(self.ui.clip),
            saved_subwindow: None,
        };
        let border = wd.border_rect_scale().r;
        match floating {
            None => self.ui.clip = self.ui.clip.intersect(border),
            Some(f) => {
                let prev = self.ui.current_subwindow();
                wd.saved_subwindow = Some(prev);
                self.ui.subwindows.add(id, border, f, prev);
                self.ui.set_current_subwindow(id);
                self.ui.clip = border;
            }
        }
        self.ui.maintain_capture(id);

        let widget = make(wd, &mut self.ui);
        let container = widget.is_container();
        trace!(widget = widget.widget_type(), %id, container, depth = self.stack.depth(), "install");
        let key = self.widgets.insert(Box::new(widget));
        self.stack.push(key, id, container);
        Ok(key)
    }

    /// Close a widget: it must be the innermost open one.
    ///
    /// Finalizes and caches its min size, reports it to the parent (in-flow
    /// widgets only), and restores the clip and current subwindow.
    pub fn deinit(&mut self, key: WidgetKey) -> Result<()> {
        if !self.frame_open {
            return Err(Error::NoFrame);
        }
        let id = self.widgets.get(key).ok_or(Error::StaleWidget)?.data().id;
        self.stack.pop(key, id)?;
        let widget = self.widgets.remove(key).ok_or(Error::StaleWidget)?;
        let wd = widget.data();

        let size = wd.finalized_min_size();
        if size != wd.min_size {
            // Layout read last frame's size; draw again with the new one.
            trace!(%id, "min size changed, refreshing");
            self.ui.refresh();
        }
        self.ui.caches.set_min_size(id, size);
        if wd.saved_subwindow.is_none() {
            if let Some(parent) = wd.parent.and_then(|p| self.widgets.get_mut(p)) {
                parent.min_size_for_child(size);
            }
        }
        if let Some(clip) = wd.saved_clip {
            self.ui.clip = clip;
        }
        if let Some(prev) = wd.saved_subwindow {
            self.ui.set_current_subwindow(prev);
        }
        trace!(widget = widget.widget_type(), %id, w = size.w, h = size.h, "deinit");
        Ok(())
    }

    /// Install, run `body`, and deinit, even when `body` fails.
    ///
    /// The body's error wins over a deinit error.
    #[track_caller]
    pub fn scope<W, F, R>(
        &mut self,
        defaults: &Options,
        opts: &Options,
        make: F,
        body: impl FnOnce(&mut Context, WidgetKey) -> Result<R>,
    ) -> Result<R>
    where
        W: Widget,
        F: FnOnce(WidgetData, &mut UiState) -> W,
    {
        let key = self.install_at(Location::caller(), defaults, opts, None, make)?;
        let result = body(self, key);
        let closed = self.deinit(key);
        let value = result?;
        closed?;
        Ok(value)
    }

    /// [`scope`](Self::scope) for a floating widget.
    #[track_caller]
    pub fn subwindow_scope<W, F, R>(
        &mut self,
        defaults: &Options,
        opts: &Options,
        floating: Floating,
        make: F,
        body: impl FnOnce(&mut Context, WidgetKey) -> Result<R>,
    ) -> Result<R>
    where
        W: Widget,
        F: FnOnce(WidgetData, &mut UiState) -> W,
    {
        let key = self.install_at(Location::caller(), defaults, opts, Some(floating), make)?;
        let result = body(self, key);
        let closed = self.deinit(key);
        let value = result?;
        closed?;
        Ok(value)
    }

    // -----------------------------------------------------------------------
    // Arena access
    // -----------------------------------------------------------------------

    /// The innermost open container.
    pub fn current_parent(&self) -> Option<WidgetKey> {
        self.stack.current()
    }

    /// The id a widget installed from the caller's location with `opts`
    /// would get under the current parent.
    ///
    /// Lets a widget look up last frame's state (min size, cached data)
    /// before it installs.
    #[track_caller]
    pub fn widget_id(&self, opts: &Options) -> Result<WidgetId> {
        let parent = self.stack.current_id().ok_or(Error::NoFrame)?;
        Ok(WidgetId::derive(parent, Location::caller(), opts.id_extra.unwrap_or(0)))
    }

    pub fn data(&self, key: WidgetKey) -> Result<&WidgetData> {
        self.widgets.get(key).map(|w| w.data()).ok_or(Error::StaleWidget)
    }

    /// Downcast an installed widget.
    pub fn widget<W: Widget>(&self, key: WidgetKey) -> Option<&W> {
        self.widgets.get(key).and_then(|w| w.as_any().downcast_ref::<W>())
    }

    pub fn widget_mut<W: Widget>(&mut self, key: WidgetKey) -> Option<&mut W> {
        self.widgets.get_mut(key).and_then(|w| w.as_any_mut().downcast_mut::<W>())
    }

    // -----------------------------------------------------------------------
    // Event pass
    // -----------------------------------------------------------------------

    /// Offer every matching, unhandled event to `key`, in queue order.
    ///
    /// An event the widget leaves unhandled and asks to bubble is offered to
    /// each ancestor in turn. Matching is re-evaluated per event, so a focus
    /// change made while handling one event applies to the next.
    pub fn process_events(&mut self, key: WidgetKey) -> Result<()> {
        let (id, rect) = {
            let wd = self.data(key)?;
            (wd.id, wd.border_rect_scale().r)
        };
        for index in 0..self.ui.events.len() {
            let matches = self.ui.events.get(index).is_some_and(|e| self.ui.event_matches(e, id, rect));
            if matches {
                self.dispatch(key, index)?;
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, key: WidgetKey, index: usize) -> Result<()> {
        let Some(mut event) = self.ui.events.get(index).cloned() else {
            return Ok(());
        };
        self.offer(Some(key), &mut event, false)?;
        if event.handled {
            if let Some(e) = self.ui.events.get_mut(index) {
                e.handle();
            }
        }
        Ok(())
    }

    fn offer(&mut self, start: Option<WidgetKey>, event: &mut Event, mut bubbling: bool) -> Result<()> {
        let mut cur = start;
        while let Some(k) = cur {
            let widget = self.widgets.get_mut(k).ok_or(Error::StaleWidget)?;
            let flow = widget.process_event(event, bubbling, &mut self.ui);
            if event.handled || flow == EventFlow::Stop {
                break;
            }
            cur = widget.data().parent;
            bubbling = true;
        }
        Ok(())
    }

    /// Send a synthetic event up from `key` to its ancestors.
    ///
    /// Returns whether someone handled it.
    pub fn bubble_event(&mut self, key: WidgetKey, kind: EventKind) -> Result<bool> {
        let parent = self.data(key)?.parent;
        let mut event = Event { num: u32::MAX, kind, handled: false, focus: None, floating_win: None };
        self.offer(parent, &mut event, true)?;
        Ok(event.handled)
    }

    // -----------------------------------------------------------------------
    // Input queueing
    // -----------------------------------------------------------------------

    /// Queue a backend event. Returns its number, or `None` for events that
    /// are not delivered to widgets (resize, terminal focus).
    pub fn add_input(&mut self, input: InputEvent) -> Option<u32> {
        match input {
            InputEvent::Key(k) => Some(self.add_key(k)),
            InputEvent::Text(t) => Some(self.add_text(&t)),
            InputEvent::Mouse(m) => Some(self.add_mouse(m)),
            InputEvent::Resize { .. } | InputEvent::FocusGained | InputEvent::FocusLost => {
                self.ui.refresh();
                None
            }
        }
    }

    /// Queue a key event, addressed to the currently focused widget.
    pub fn add_key(&mut self, key: KeyEvent) -> u32 {
        let target = self.ui.key_target();
        self.ui.events.push(EventKind::Key(key), Some(target), None)
    }

    /// Queue text input, addressed to the currently focused widget.
    pub fn add_text(&mut self, text: &str) -> u32 {
        let target = self.ui.key_target();
        self.ui.events.push(EventKind::Text(text.to_owned()), Some(target), None)
    }

    /// Queue a mouse event, addressed to the subwindow under the pointer.
    ///
    /// A press also focuses that subwindow and raises it.
    pub fn add_mouse(&mut self, mouse: MouseEvent) -> u32 {
        self.ui.set_mouse_pt(mouse.p);
        let win = self.ui.subwindows.window_for(mouse.p, WidgetId::ROOT);
        if let MouseAction::Press(_) = mouse.action {
            self.ui.focus_subwindow(win, None);
            if win != WidgetId::ROOT {
                self.ui.raise_subwindow(win);
            }
        }
        self.ui.events.push(EventKind::Mouse(mouse), None, Some(win))
    }

    pub fn add_mouse_motion(&mut self, p: Point) -> u32 {
        self.add_mouse(MouseEvent { action: MouseAction::Motion, p, modifiers: Modifiers::NONE })
    }

    pub fn add_mouse_button(&mut self, button: MouseBtn, pressed: bool, p: Point) -> u32 {
        let action = if pressed { MouseAction::Press(button) } else { MouseAction::Release(button) };
        self.add_mouse(MouseEvent { action, p, modifiers: Modifiers::NONE })
    }

    pub fn add_mouse_wheel(&mut self, p: Point, dy: f32) -> u32 {
        self.add_mouse(MouseEvent { action: MouseAction::Wheel(dy), p, modifiers: Modifiers::NONE })
    }

    // -----------------------------------------------------------------------
    // Drawing
    // -----------------------------------------------------------------------

    /// Fill `rect` (screen space) in the current subwindow.
    pub fn draw_fill(&mut self, rect: Rect, color: ColorRef) {
        let color = self.ui.theme().color(color);
        let clip = self.ui.clip;
        self.push_cmd(DrawCmd::Fill { rect, color, clip });
    }

    /// Outline `rect` (screen space) with per-side widths (screen units).
    pub fn draw_border(&mut self, rect: Rect, width: Spacing, color: ColorRef) {
        let color = self.ui.theme().color(color);
        let clip = self.ui.clip;
        self.push_cmd(DrawCmd::Border { rect, width, color, clip });
    }

    /// Draw `text` with its first glyph at `rect`'s top-left (screen space).
    pub fn draw_text(&mut self, rect: Rect, text: &str, color: ColorRef) {
        let color = self.ui.theme().color(color);
        let clip = self.ui.clip;
        self.push_cmd(DrawCmd::Text { rect, text: text.to_owned(), color, clip });
    }

    /// Draw a widget's background and border as its options ask.
    pub fn draw_chrome(&mut self, key: WidgetKey, fill: Option<ColorRef>) -> Result<()> {
        let wd = self.data(key)?;
        let background = wd.options.background();
        let border = wd.options.border();
        let fill = fill.unwrap_or(wd.options.color_fill());
        let color_border = wd.options.color_border();
        let bg_rect = wd.background_rect_scale().r;
        let border_rs = wd.border_rect_scale();

        if background {
            self.draw_fill(bg_rect, fill);
        }
        if border.is_nonzero() {
            let s = border_rs.s;
            let width = Spacing::new(border.top * s, border.right * s, border.bottom * s, border.left * s);
            self.draw_border(border_rs.r, width, color_border);
        }
        Ok(())
    }

    fn push_cmd(&mut self, cmd: DrawCmd) {
        if cmd.is_clipped_out() {
            return;
        }
        let sw = self.ui.current_subwindow();
        self.ui.subwindows.push_cmd(sw, cmd);
    }

    // -----------------------------------------------------------------------
    // Convenience
    // -----------------------------------------------------------------------

    pub fn theme(&self) -> &Theme {
        self.ui.theme()
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.ui.set_theme(theme);
    }

    /// Ask for another frame as soon as possible.
    pub fn refresh(&mut self) {
        self.ui.refresh();
    }

    /// Focus `id` in the current subwindow (see [`UiState::focus_widget`]).
    pub fn focus_widget(&mut self, id: Option<WidgetId>, event_num: Option<u32>) {
        self.ui.focus_widget(id, None, event_num);
    }

    pub fn focused_widget(&self) -> Option<WidgetId> {
        self.ui.focused_widget()
    }

    /// Subwindow ids in z-order, bottom first.
    pub fn subwindow_order(&self) -> Vec<WidgetId> {
        self.ui.subwindows.order()
    }

    /// Min size `id` reported last frame.
    pub fn min_size(&self, id: WidgetId) -> Size {
        self.ui.caches.min_size(id)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
