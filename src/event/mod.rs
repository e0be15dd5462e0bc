//! Events for the single-pass event delivery.
//!
//! Input accumulated between frames is fixed into an [`EventQueue`] when the
//! frame starts. Each [`Event`] is numbered, carries its own `handled` flag and
//! is stamped with where it should go: keyboard and text events with a focus
//! target, mouse events with the subwindow under the pointer.

pub mod input;

pub use input::{InputEvent, Key, KeyAction, KeyEvent, Modifiers, MouseAction, MouseBtn, MouseEvent};

use crate::id::WidgetId;

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// The payload of a queued event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Key(KeyEvent),
    Text(String),
    Mouse(MouseEvent),
    /// Synthetic: ask the enclosing popup chain to close.
    ClosePopup,
}

/// Keyboard routing target: a subwindow and the widget focused in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusTarget {
    pub subwindow: WidgetId,
    pub widget: Option<WidgetId>,
}

/// One input event as seen by the widgets of a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Position in the frame's queue; later events have larger numbers.
    pub num: u32,
    pub kind: EventKind,
    /// Set once a widget consumes the event; nobody else may then.
    pub handled: bool,
    /// Keyboard/text routing target.
    pub focus: Option<FocusTarget>,
    /// Topmost subwindow under the pointer when the event was queued.
    pub floating_win: Option<WidgetId>,
}

impl Event {
    /// Mark as consumed.
    pub fn handle(&mut self) {
        self.handled = true;
    }

    /// Whether this event routes by keyboard focus.
    pub fn is_focus_routed(&self) -> bool {
        matches!(self.kind, EventKind::Key(_) | EventKind::Text(_))
    }

    pub fn as_key(&self) -> Option<&KeyEvent> {
        match &self.kind {
            EventKind::Key(k) => Some(k),
            _ => None,
        }
    }

    pub fn as_mouse(&self) -> Option<&MouseEvent> {
        match &self.kind {
            EventKind::Mouse(m) => Some(m),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// EventQueue
// ---------------------------------------------------------------------------

/// Ordered, numbered events of one frame.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<Event>,
    next_num: u32,
}

impl EventQueue {
    /// Create a new, empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event and return its number.
    pub fn push(
        &mut self,
        kind: EventKind,
        focus: Option<FocusTarget>,
        floating_win: Option<WidgetId>,
    ) -> u32 {
        let num = self.next_num;
        self.next_num = self.next_num.wrapping_add(1);
        self.events.push(Event { num, kind, handled: false, focus, floating_win });
        num
    }

    /// Restamp every focus-routed event queued after event `after` with `target`.
    ///
    /// This is how a focus change in the middle of the event pass redirects
    /// the keystrokes that follow it. Events are found by queue position, so
    /// wrapped numbering cannot misroute them; an unknown `after` changes
    /// nothing.
    pub fn retarget_after(&mut self, after: u32, target: FocusTarget) -> usize {
        let Some(pos) = self.events.iter().position(|e| e.num == after) else {
            return 0;
        };
        let mut changed = 0;
        for e in self.events[pos + 1..].iter_mut().filter(|e| e.is_focus_routed()) {
            e.focus = Some(target);
            changed += 1;
        }
        changed
    }

    /// Drop the oldest `n` events, keeping numbering as is.
    pub fn discard_first(&mut self, n: usize) {
        let n = n.min(self.events.len());
        self.events.drain(..n);
    }

    /// Remove every event and restart numbering.
    pub fn clear(&mut self) {
        self.events.clear();
        self.next_num = 0;
    }

    pub fn get(&self, index: usize) -> Option<&Event> {
        self.events.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Event> {
        self.events.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Event> {
        self.events.iter_mut()
    }

    /// Number of events in the queue.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events no widget consumed.
    pub fn unhandled_count(&self) -> usize {
        self.events.iter().filter(|e| !e.handled).count()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn target(widget: u64) -> FocusTarget {
        FocusTarget { subwindow: WidgetId::ROOT, widget: Some(WidgetId(widget)) }
    }

    fn text(s: &str) -> EventKind {
        EventKind::Text(s.to_owned())
    }

    #[test]
    fn push_numbers_in_order() {
        let mut q = EventQueue::new();
        assert_eq!(q.push(text("a"), None, None), 0);
        assert_eq!(q.push(text("b"), None, None), 1);
        assert_eq!(q.len(), 2);
        assert_eq!(q.get(1).map(|e| e.num), Some(1));
    }

    #[test]
    fn retarget_only_touches_later_focus_events() {
        let mut q = EventQueue::new();
        let tab = q.push(EventKind::Key(KeyEvent::new(Key::Tab, Modifiers::NONE)), Some(target(1)), None);
        q.push(text("x"), Some(target(1)), None);
        q.push(
            EventKind::Mouse(MouseEvent {
                action: MouseAction::Motion,
                p: crate::geometry::Point::ZERO,
                modifiers: Modifiers::NONE,
            }),
            None,
            Some(WidgetId::ROOT),
        );
        q.push(text("y"), Some(target(1)), None);

        let changed = q.retarget_after(tab, target(2));
        assert_eq!(changed, 2);
        assert_eq!(q.get(0).and_then(|e| e.focus), Some(target(1)));
        assert_eq!(q.get(1).and_then(|e| e.focus), Some(target(2)));
        assert_eq!(q.get(2).and_then(|e| e.focus), None);
        assert_eq!(q.get(3).and_then(|e| e.focus), Some(target(2)));
    }

    #[test]
    fn retarget_follows_queue_order_across_wrapped_numbers() {
        let mut q = EventQueue::new();
        q.next_num = u32::MAX;
        let last = q.push(EventKind::Key(KeyEvent::new(Key::Tab, Modifiers::NONE)), Some(target(1)), None);
        q.push(text("x"), Some(target(1)), None);
        q.push(text("y"), Some(target(1)), None);
        assert_eq!(q.get(1).map(|e| e.num), Some(0));

        assert_eq!(q.retarget_after(last, target(2)), 2);
        assert_eq!(q.get(0).and_then(|e| e.focus), Some(target(1)));
        assert_eq!(q.get(2).and_then(|e| e.focus), Some(target(2)));
    }

    #[test]
    fn retarget_after_unknown_event_changes_nothing() {
        let mut q = EventQueue::new();
        q.push(text("x"), Some(target(1)), None);
        assert_eq!(q.retarget_after(u32::MAX, target(2)), 0);
        assert_eq!(q.get(0).and_then(|e| e.focus), Some(target(1)));
    }

    #[test]
    fn handled_flags_are_independent() {
        let mut q = EventQueue::new();
        q.push(text("a"), None, None);
        q.push(text("b"), None, None);
        if let Some(e) = q.get_mut(0) {
            e.handle();
        }
        assert_eq!(q.unhandled_count(), 1);
        assert!(q.get(0).is_some_and(|e| e.handled));
        assert!(q.get(1).is_some_and(|e| !e.handled));
    }

    #[test]
    fn discard_first_keeps_later_events() {
        let mut q = EventQueue::new();
        q.push(text("a"), None, None);
        q.push(text("b"), None, None);
        q.discard_first(1);
        assert_eq!(q.len(), 1);
        assert_eq!(q.get(0).map(|e| e.num), Some(1));
        q.discard_first(5);
        assert!(q.is_empty());
        assert_eq!(q.push(text("c"), None, None), 2);
    }

    #[test]
    fn clear_restarts_numbering() {
        let mut q = EventQueue::new();
        q.push(text("a"), None, None);
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.push(text("b"), None, None), 0);
    }
}
