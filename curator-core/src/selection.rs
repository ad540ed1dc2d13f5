//! Accepted-change selection for one review session.
//!
//! The selection lives exactly as long as one loaded `DiffResult`: opening a
//! different PR's diff re-initializes it, closing the review discards it.
//! Nothing here is persisted.

use std::collections::BTreeSet;

/// The set of change indices the reviewer currently wants applied.
///
/// Invariant: `accepted` is always a subset of `universe`, the indices that
/// were present in the `DiffResult` at initialization time. `toggle` of an
/// index outside the universe is a no-op, so the invariant cannot be broken
/// by stray input.
#[derive(Debug, Clone, Default)]
pub struct AcceptedSelection {
    universe: BTreeSet<usize>,
    accepted: BTreeSet<usize>,
}

impl AcceptedSelection {
    /// Resets the selection for a freshly loaded diff: every index present
    /// in the result starts out accepted.
    ///
    /// This is the only way the selection is ever reset.
    pub fn initialize<I: IntoIterator<Item = usize>>(&mut self, indices: I) {
        self.universe = indices.into_iter().collect();
        self.accepted = self.universe.clone();
    }

    /// Flips membership of `index`. Indices not present in the current
    /// diff are ignored.
    pub fn toggle(&mut self, index: usize) {
        if !self.universe.contains(&index) {
            return;
        }
        if !self.accepted.remove(&index) {
            self.accepted.insert(index);
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.accepted.contains(&index)
    }

    /// Number of currently accepted indices.
    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    /// The accepted indices as an ordered list, ready to submit.
    ///
    /// Ordering is ascending (BTreeSet iteration) and therefore
    /// deterministic for a given membership; callers must not depend on any
    /// relation to the diff's display order.
    pub fn snapshot(&self) -> Vec<usize> {
        self.accepted.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_accepts_everything() {
        let mut sel = AcceptedSelection::default();
        sel.initialize([0, 3, 7]);
        assert_eq!(sel.len(), 3);
        assert!(sel.contains(0) && sel.contains(3) && sel.contains(7));
    }

    #[test]
    fn double_toggle_restores_membership() {
        let mut sel = AcceptedSelection::default();
        sel.initialize([0, 1]);
        sel.toggle(1);
        assert!(!sel.contains(1));
        sel.toggle(1);
        assert!(sel.contains(1));
        assert_eq!(sel.len(), 2);
    }

    #[test]
    fn toggle_outside_universe_is_ignored() {
        let mut sel = AcceptedSelection::default();
        sel.initialize([0, 1]);
        sel.toggle(42);
        assert_eq!(sel.snapshot(), vec![0, 1]);
    }

    #[test]
    fn reinitialize_replaces_prior_session() {
        let mut sel = AcceptedSelection::default();
        sel.initialize([0, 1, 2]);
        sel.toggle(2);
        sel.initialize([5, 6]);
        assert_eq!(sel.snapshot(), vec![5, 6]);
    }
}
