use std::collections::BTreeSet;

/// Record ids marked for the next batch operation.
///
/// Membership is scoped to whatever list the user is looking at, but it is
/// deliberately NOT pruned when the visible set changes: selecting across
/// searches is intended behavior, and stale ids stay until cleared or
/// toggled off.
#[derive(Debug, Default, Clone)]
pub struct SelectionSet {
    ids: BTreeSet<u64>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert if absent, remove if present.
    pub fn toggle(&mut self, id: u64) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Select-all affordance: if the selection is already exactly the
    /// visible set, clear it; otherwise replace it with the visible set.
    /// The flip keys on exact set equality, not mere non-emptiness.
    pub fn select_all(&mut self, visible: &[u64]) {
        let visible_set: BTreeSet<u64> = visible.iter().copied().collect();
        if self.ids == visible_set {
            self.ids.clear();
        } else {
            self.ids = visible_set;
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn is_selected(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Snapshot of the selected ids, in ascending order.
    pub fn ids(&self) -> Vec<u64> {
        self.ids.iter().copied().collect()
    }
}
