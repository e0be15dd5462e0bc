//! Id-keyed state that outlives a frame.
//!
//! Widgets themselves live for one frame; anything they need to remember
//! (last reported min size, scroll offsets, drag anchors, animations,
//! timers) is stored here under the widget's id. Entries whose id was not
//! installed during a frame are dropped at the end of that frame.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};

use crate::geometry::Size;
use crate::id::WidgetId;

// ---------------------------------------------------------------------------
// Animation
// ---------------------------------------------------------------------------

/// Linear interpolation between two values over a time span (micros).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub start_val: f32,
    pub end_val: f32,
    pub start_time: u64,
    pub end_time: u64,
}

impl Animation {
    /// Animate from `start_val` to `end_val` over `duration` starting at `now`.
    pub fn new(start_val: f32, end_val: f32, now: u64, duration: u64) -> Self {
        Self { start_val, end_val, start_time: now, end_time: now.saturating_add(duration) }
    }

    /// Interpolated value at `now`, clamped to the end points.
    pub fn value(&self, now: u64) -> f32 {
        if now >= self.end_time || self.end_time <= self.start_time {
            return self.end_val;
        }
        if now <= self.start_time {
            return self.start_val;
        }
        let t = (now - self.start_time) as f32 / (self.end_time - self.start_time) as f32;
        self.start_val + (self.end_val - self.start_val) * t
    }

    pub fn done(&self, now: u64) -> bool {
        now >= self.end_time
    }
}

// ---------------------------------------------------------------------------
// Caches
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct Caches {
    min_sizes: HashMap<WidgetId, Size>,
    data: HashMap<(WidgetId, TypeId), Box<dyn Any>>,
    animations: HashMap<(WidgetId, &'static str), Animation>,
    timers: HashMap<WidgetId, u64>,
    touched: HashSet<WidgetId>,
}

impl std::fmt::Debug for Caches {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Caches")
            .field("min_sizes", &self.min_sizes.len())
            .field("data", &self.data.len())
            .field("animations", &self.animations.len())
            .field("timers", &self.timers.len())
            .finish()
    }
}

impl Caches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `id` was installed this frame.
    pub fn touch(&mut self, id: WidgetId) {
        self.touched.insert(id);
    }

    // ── Min sizes ────────────────────────────────────────────────────

    /// Size `id` reported on the previous frame, zero if unknown.
    pub fn min_size(&self, id: WidgetId) -> Size {
        self.min_sizes.get(&id).copied().unwrap_or_default()
    }

    pub fn set_min_size(&mut self, id: WidgetId, size: Size) {
        self.min_sizes.insert(id, size);
    }

    // ── Typed data ───────────────────────────────────────────────────

    /// Store one value of type `T` for `id`, replacing any previous one.
    pub fn data_set<T: Any>(&mut self, id: WidgetId, value: T) {
        self.data.insert((id, TypeId::of::<T>()), Box::new(value));
    }

    pub fn data_get<T: Any + Clone>(&self, id: WidgetId) -> Option<T> {
        self.data.get(&(id, TypeId::of::<T>())).and_then(|b| b.downcast_ref::<T>()).cloned()
    }

    pub fn data_remove<T: Any>(&mut self, id: WidgetId) -> Option<T> {
        self.data
            .remove(&(id, TypeId::of::<T>()))
            .and_then(|b| b.downcast::<T>().ok())
            .map(|b| *b)
    }

    // ── Animations ───────────────────────────────────────────────────

    pub fn animation_set(&mut self, id: WidgetId, key: &'static str, animation: Animation) {
        self.animations.insert((id, key), animation);
    }

    pub fn animation_get(&self, id: WidgetId, key: &'static str) -> Option<Animation> {
        self.animations.get(&(id, key)).copied()
    }

    /// Whether any animation is still in progress at `now`.
    pub fn animating(&self, now: u64) -> bool {
        self.animations.values().any(|a| !a.done(now))
    }

    // ── Timers ───────────────────────────────────────────────────────

    /// Arm a timer for `id` firing at `deadline` unless one is already armed.
    pub fn timer_arm(&mut self, id: WidgetId, deadline: u64) {
        self.timers.entry(id).or_insert(deadline);
    }

    /// Whether `id`'s timer has fired by `now`. A fired timer is disarmed.
    pub fn timer_fired(&mut self, id: WidgetId, now: u64) -> bool {
        match self.timers.get(&id) {
            Some(&deadline) if deadline <= now => {
                self.timers.remove(&id);
                true
            }
            _ => false,
        }
    }

    /// Earliest armed deadline.
    pub fn next_timer(&self) -> Option<u64> {
        self.timers.values().copied().min()
    }

    // ── End of frame ─────────────────────────────────────────────────

    /// Drop state of widgets not installed this frame and finished animations.
    pub fn end_frame(&mut self, now: u64) {
        let touched = std::mem::take(&mut self.touched);
        self.min_sizes.retain(|id, _| touched.contains(id));
        self.data.retain(|(id, _), _| touched.contains(id));
        self.animations.retain(|(id, _), a| touched.contains(id) && !a.done(now));
        self.timers.retain(|id, _| touched.contains(id));
    }

    /// Forget everything touched during an abandoned frame.
    pub fn abandon_frame(&mut self) {
        self.touched.clear();
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const A: WidgetId = WidgetId(1);
    const B: WidgetId = WidgetId(2);

    #[test]
    fn animation_interpolates_and_clamps() {
        let a = Animation::new(0.0, 10.0, 100, 100);
        assert_eq!(a.value(50), 0.0);
        assert_eq!(a.value(150), 5.0);
        assert_eq!(a.value(400), 10.0);
        assert!(!a.done(199));
        assert!(a.done(200));
    }

    #[test]
    fn data_is_keyed_by_id_and_type() {
        let mut c = Caches::new();
        c.data_set(A, 3u32);
        c.data_set(A, String::from("x"));
        c.data_set(B, 4u32);
        assert_eq!(c.data_get::<u32>(A), Some(3));
        assert_eq!(c.data_get::<String>(A).as_deref(), Some("x"));
        assert_eq!(c.data_get::<u32>(B), Some(4));
        assert_eq!(c.data_remove::<u32>(A), Some(3));
        assert_eq!(c.data_get::<u32>(A), None);
    }

    #[test]
    fn untouched_ids_are_dropped_at_end_of_frame() {
        let mut c = Caches::new();
        c.touch(A);
        c.touch(B);
        c.set_min_size(A, Size::new(1.0, 1.0));
        c.set_min_size(B, Size::new(2.0, 2.0));
        c.end_frame(0);

        c.touch(A);
        c.end_frame(0);
        assert_eq!(c.min_size(A), Size::new(1.0, 1.0));
        assert_eq!(c.min_size(B), Size::ZERO);
    }

    #[test]
    fn timers_fire_once() {
        let mut c = Caches::new();
        c.timer_arm(A, 1_000);
        c.timer_arm(A, 5_000);
        assert_eq!(c.next_timer(), Some(1_000));
        assert!(!c.timer_fired(A, 999));
        assert!(c.timer_fired(A, 1_000));
        assert!(!c.timer_fired(A, 2_000));
        assert_eq!(c.next_timer(), None);
    }

    #[test]
    fn finished_animations_are_dropped() {
        let mut c = Caches::new();
        c.touch(A);
        c.animation_set(A, "fade", Animation::new(0.0, 1.0, 0, 10));
        assert!(c.animating(5));
        c.end_frame(5);
        c.touch(A);
        assert!(c.animation_get(A, "fade").is_some());
        c.end_frame(10);
        assert!(c.animation_get(A, "fade").is_none());
        assert!(!c.animating(10));
    }
}
