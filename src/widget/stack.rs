//! Parent/child stack: push/pop discipline for the widgets of one frame.
//!
//! Every install is recorded as open and every deinit must close the most
//! recently opened widget. Only containers become the current parent; a leaf
//! is open while installed but never has children placed under it. The stack
//! also counts installs and deinits so a frame can be checked for balance.

use tracing::warn;

use crate::error::{Error, Result};
use crate::id::WidgetId;

use super::WidgetKey;

// ---------------------------------------------------------------------------
// ParentStack
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Open {
    key: WidgetKey,
    id: WidgetId,
    container: bool,
}

/// The open widgets of the current frame, innermost last.
#[derive(Debug, Default)]
pub struct ParentStack {
    open: Vec<Open>,
    /// Indices into `open` of the containers, innermost last.
    parents: Vec<usize>,
    installs: usize,
    deinits: usize,
}

impl ParentStack {
    /// Create a new, empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an install. A `container` becomes the current parent.
    pub fn push(&mut self, key: WidgetKey, id: WidgetId, container: bool) {
        if container {
            self.parents.push(self.open.len());
        }
        self.open.push(Open { key, id, container });
        self.installs += 1;
    }

    /// Record a deinit of `id`, which must be the innermost open widget.
    ///
    /// On mismatch nothing is popped: the engine never guesses which widget
    /// the caller meant to close.
    pub fn pop(&mut self, key: WidgetKey, id: WidgetId) -> Result<()> {
        match self.open.last() {
            Some(top) if top.key == key => {
                if top.container {
                    self.parents.pop();
                }
                self.open.pop();
                self.deinits += 1;
                Ok(())
            }
            top => {
                let expected = top.map(|o| o.id);
                warn!(found = %id, ?expected, "deinit does not match the innermost open widget");
                Err(Error::UnbalancedDeinit { expected, found: id })
            }
        }
    }

    fn current_entry(&self) -> Option<&Open> {
        self.parents.last().and_then(|&i| self.open.get(i))
    }

    /// The current parent: the innermost open container.
    pub fn current(&self) -> Option<WidgetKey> {
        self.current_entry().map(|o| o.key)
    }

    /// Id of the current parent.
    pub fn current_id(&self) -> Option<WidgetId> {
        self.current_entry().map(|o| o.id)
    }

    /// Number of open widgets, leaves included.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Installs since the last [`clear`](Self::clear).
    pub fn installs(&self) -> usize {
        self.installs
    }

    /// Deinits since the last [`clear`](Self::clear).
    pub fn deinits(&self) -> usize {
        self.deinits
    }

    /// Forget everything, including the counters.
    pub fn clear(&mut self) {
        self.open.clear();
        self.parents.clear();
        self.installs = 0;
        self.deinits = 0;
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    fn keys(n: usize) -> Vec<WidgetKey> {
        let mut arena: SlotMap<WidgetKey, ()> = SlotMap::with_key();
        (0..n).map(|_| arena.insert(())).collect()
    }

    #[test]
    fn balanced_push_pop() {
        let k = keys(2);
        let mut stack = ParentStack::new();
        stack.push(k[0], WidgetId(1), true);
        stack.push(k[1], WidgetId(2), true);
        assert_eq!(stack.current(), Some(k[1]));
        assert_eq!(stack.current_id(), Some(WidgetId(2)));

        stack.pop(k[1], WidgetId(2)).unwrap();
        stack.pop(k[0], WidgetId(1)).unwrap();
        assert!(stack.is_empty());
        assert_eq!(stack.installs(), 2);
        assert_eq!(stack.deinits(), 2);
    }

    #[test]
    fn pop_out_of_order_is_rejected_and_leaves_stack_intact() {
        let k = keys(2);
        let mut stack = ParentStack::new();
        stack.push(k[0], WidgetId(1), true);
        stack.push(k[1], WidgetId(2), true);

        let err = stack.pop(k[0], WidgetId(1)).unwrap_err();
        assert!(matches!(
            err,
            Error::UnbalancedDeinit { expected: Some(WidgetId(2)), found: WidgetId(1) }
        ));
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.deinits(), 0);
    }

    #[test]
    fn pop_on_empty_stack() {
        let k = keys(1);
        let mut stack = ParentStack::new();
        let err = stack.pop(k[0], WidgetId(7)).unwrap_err();
        assert!(matches!(err, Error::UnbalancedDeinit { expected: None, .. }));
    }

    #[test]
    fn clear_resets_counters() {
        let k = keys(1);
        let mut stack = ParentStack::new();
        stack.push(k[0], WidgetId(1), true);
        stack.clear();
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.installs(), 0);
        assert_eq!(stack.current(), None);
    }

    // -----------------------------------------------------------------------
    // Leaves
    // -----------------------------------------------------------------------

    #[test]
    fn leaf_is_open_but_never_the_parent() {
        let k = keys(3);
        let mut stack = ParentStack::new();
        stack.push(k[0], WidgetId(1), true);
        stack.push(k[1], WidgetId(2), false);
        assert_eq!(stack.current(), Some(k[0]));
        assert_eq!(stack.current_id(), Some(WidgetId(1)));
        assert_eq!(stack.depth(), 2);

        // A widget opened while the leaf is open still lands under the container.
        stack.push(k[2], WidgetId(3), true);
        assert_eq!(stack.current(), Some(k[2]));
        stack.pop(k[2], WidgetId(3)).unwrap();
        assert_eq!(stack.current(), Some(k[0]));

        stack.pop(k[1], WidgetId(2)).unwrap();
        assert_eq!(stack.current(), Some(k[0]));
        stack.pop(k[0], WidgetId(1)).unwrap();
        assert!(stack.is_empty());
        assert_eq!((stack.installs(), stack.deinits()), (3, 3));
    }

    #[test]
    fn leaf_must_close_before_its_container() {
        let k = keys(2);
        let mut stack = ParentStack::new();
        stack.push(k[0], WidgetId(1), true);
        stack.push(k[1], WidgetId(2), false);
        let err = stack.pop(k[0], WidgetId(1)).unwrap_err();
        assert!(matches!(
            err,
            Error::UnbalancedDeinit { expected: Some(WidgetId(2)), found: WidgetId(1) }
        ));
        assert_eq!(stack.current(), Some(k[0]));
    }
}
