//! Widget identity.
//!
//! A [`WidgetId`] is a hash of the installing call site, the parent's id and an
//! optional caller-supplied discriminator. The same code path through the same
//! ancestry yields the same id every frame, which is what lets the id-keyed
//! caches (min size, focus, capture, animations) follow a widget that is
//! rebuilt from scratch each frame.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::panic::Location;

/// Stable per-frame widget identity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u64);

impl WidgetId {
    /// Id of the root widget every frame is built under.
    pub const ROOT: WidgetId = WidgetId(0x9e37_79b9_7f4a_7c15);

    /// Derive a child id from its parent, call site and discriminator.
    pub fn derive(parent: WidgetId, location: &Location<'_>, extra: usize) -> WidgetId {
        let mut hasher = DefaultHasher::new();
        parent.0.hash(&mut hasher);
        location.file().hash(&mut hasher);
        location.line().hash(&mut hasher);
        location.column().hash(&mut hasher);
        extra.hash(&mut hasher);
        WidgetId(hasher.finish())
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn here() -> &'static Location<'static> {
        Location::caller()
    }

    #[test]
    fn same_site_same_parent_is_stable() {
        let loc = here();
        let a = WidgetId::derive(WidgetId::ROOT, loc, 0);
        let b = WidgetId::derive(WidgetId::ROOT, loc, 0);
        assert_eq!(a, b);
    }

    #[test]
    fn different_sites_differ() {
        let a = WidgetId::derive(WidgetId::ROOT, here(), 0);
        let b = WidgetId::derive(WidgetId::ROOT, here(), 0);
        assert_ne!(a, b);
    }

    #[test]
    fn extra_discriminates_loop_iterations() {
        let loc = here();
        let ids: Vec<_> = (0..4).map(|i| WidgetId::derive(WidgetId::ROOT, loc, i)).collect();
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn ancestry_changes_id() {
        let loc = here();
        let parent_a = WidgetId::derive(WidgetId::ROOT, loc, 1);
        let parent_b = WidgetId::derive(WidgetId::ROOT, loc, 2);
        assert_ne!(
            WidgetId::derive(parent_a, loc, 0),
            WidgetId::derive(parent_b, loc, 0)
        );
    }

    #[test]
    fn display_is_fixed_width_hex() {
        assert_eq!(WidgetId(0xff).to_string(), "00000000000000ff");
    }
}
