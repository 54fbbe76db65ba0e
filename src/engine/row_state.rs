//! Per-row ephemeral UI state
//!
//! Expanded/copied flags keyed by row identity, so the state survives
//! re-renders without living inside any rendering component. Entries are
//! created on first interaction and pruned when their rows leave view.

use std::collections::HashMap;

/// Ephemeral flags for one row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowUiState {
    pub expanded: bool,
    pub copied: bool,
}

/// Explicit map from row identity to ephemeral state.
#[derive(Debug, Default)]
pub struct RowStateMap {
    states: HashMap<String, RowUiState>,
}

impl RowStateMap {
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
        }
    }

    pub fn get(&self, row_id: &str) -> RowUiState {
        self.states.get(row_id).copied().unwrap_or_default()
    }

    pub fn is_expanded(&self, row_id: &str) -> bool {
        self.get(row_id).expanded
    }

    pub fn is_copied(&self, row_id: &str) -> bool {
        self.get(row_id).copied
    }

    pub fn toggle_expanded(&mut self, row_id: &str) -> bool {
        let state = self.states.entry(row_id.to_string()).or_default();
        state.expanded = !state.expanded;
        state.expanded
    }

    pub fn set_copied(&mut self, row_id: &str, copied: bool) {
        self.states.entry(row_id.to_string()).or_default().copied = copied;
    }

    /// Drop state for rows no longer in view.
    pub fn retain_rows<'a>(&mut self, visible: impl IntoIterator<Item = &'a str>) {
        let keep: std::collections::HashSet<&str> = visible.into_iter().collect();
        self.states.retain(|id, _| keep.contains(id.as_str()));
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_row_defaults_to_collapsed() {
        let map = RowStateMap::new();
        assert!(!map.is_expanded("p-1"));
        assert!(!map.is_copied("p-1"));
    }

    #[test]
    fn test_toggle_expanded() {
        let mut map = RowStateMap::new();
        assert!(map.toggle_expanded("p-1"));
        assert!(map.is_expanded("p-1"));
        assert!(!map.toggle_expanded("p-1"));
        assert!(!map.is_expanded("p-1"));
    }

    #[test]
    fn test_retain_discards_offscreen_rows() {
        let mut map = RowStateMap::new();
        map.toggle_expanded("p-1");
        map.toggle_expanded("p-2");
        map.set_copied("p-3", true);

        map.retain_rows(["p-2"]);

        assert_eq!(map.len(), 1);
        assert!(map.is_expanded("p-2"));
        assert!(!map.is_expanded("p-1"));
        assert!(!map.is_copied("p-3"));
    }
}
