//! Row selection for bulk actions.
//!
//! Rows are identified by [`RowId`], their position in the currently loaded
//! row buffer. Identity is therefore tied to one load: every data reload
//! replaces the buffer and clears the selection, so a stale id can never point
//! at a different row.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Identity of a row within the currently loaded row buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowId(pub usize);

/// Selected rows, kept in the order they were selected.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    order: Vec<RowId>,
    members: HashSet<RowId>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of a row. Returns `true` if the row is now selected.
    pub fn toggle(&mut self, row: RowId) -> bool {
        if self.members.remove(&row) {
            self.order.retain(|r| *r != row);
            false
        } else {
            self.members.insert(row);
            self.order.push(row);
            true
        }
    }

    /// Selects every visible row, or clears the selection when all of them
    /// are already selected.
    ///
    /// Returns `true` if the rows were selected, `false` if the selection was
    /// cleared. An empty `visible` slice clears the selection.
    pub fn select_all_visible(&mut self, visible: &[RowId]) -> bool {
        if visible.is_empty() || self.all_selected(visible) {
            self.clear();
            return false;
        }

        for row in visible {
            if self.members.insert(*row) {
                self.order.push(*row);
            }
        }
        true
    }

    /// Whether every row in `visible` is selected (false for an empty slice).
    #[must_use]
    pub fn all_selected(&self, visible: &[RowId]) -> bool {
        !visible.is_empty() && visible.iter().all(|row| self.members.contains(row))
    }

    #[must_use]
    pub fn is_selected(&self, row: RowId) -> bool {
        self.members.contains(&row)
    }

    /// Selected rows in selection order.
    #[must_use]
    pub fn rows(&self) -> &[RowId] {
        &self.order
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[usize]) -> Vec<RowId> {
        raw.iter().copied().map(RowId).collect()
    }

    #[test]
    fn toggle_flips_membership() {
        let mut selection = Selection::new();
        assert!(selection.toggle(RowId(3)));
        assert!(selection.is_selected(RowId(3)));
        assert!(!selection.toggle(RowId(3)));
        assert!(selection.is_empty());
    }

    #[test]
    fn select_all_twice_returns_to_empty() {
        let visible = ids(&[0, 1, 2]);
        let mut selection = Selection::new();

        assert!(selection.select_all_visible(&visible));
        assert_eq!(selection.rows(), visible.as_slice());

        assert!(!selection.select_all_visible(&visible));
        assert!(selection.is_empty());
    }

    #[test]
    fn select_all_completes_a_partial_selection() {
        let visible = ids(&[0, 1, 2]);
        let mut selection = Selection::new();
        selection.toggle(RowId(1));

        assert!(selection.select_all_visible(&visible));
        assert_eq!(selection.rows(), ids(&[1, 0, 2]).as_slice());
    }

    #[test]
    fn selection_keeps_insertion_order() {
        let mut selection = Selection::new();
        selection.toggle(RowId(5));
        selection.toggle(RowId(2));
        selection.toggle(RowId(9));
        selection.toggle(RowId(2));
        assert_eq!(selection.rows(), ids(&[5, 9]).as_slice());
    }
}
