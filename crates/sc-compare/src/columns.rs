//! Selection set, column permutation, and hidden columns.
//!
//! Columns are identified by record id. The permutation indexes into the
//! selection list, so `MetricRow::values` never has to be reshuffled.

use sc_catalog::Catalog;

/// Most records that can be compared at once.
pub const MAX_SELECTION: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Added,
    AlreadySelected,
    /// Rejected: the selection is full.
    AtCapacity,
    /// Rejected: blank ids never enter the selection.
    EmptyId,
}

/// Displayed column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    pub index: usize,
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnState {
    selection: Vec<String>,
    order: Vec<usize>,
    hidden: Vec<String>,
}

impl ColumnState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore from persisted lists. The selection is deduplicated and
    /// truncated; hidden ids outside it are dropped.
    pub fn restore(selection: Vec<String>, hidden: Vec<String>) -> Self {
        let mut state = Self::new();
        state.replace_selection(selection);
        for id in hidden {
            state.hide(&id);
        }
        state
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    /// Current permutation over the selection.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn hidden(&self) -> &[String] {
        &self.hidden
    }

    pub fn len(&self) -> usize {
        self.selection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.selection.len() >= MAX_SELECTION
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.hidden.iter().any(|h| h == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.selection.iter().position(|s| s == id)
    }

    fn membership_changed(&mut self) {
        self.order = (0..self.selection.len()).collect();
        let selection = &self.selection;
        self.hidden.retain(|id| selection.contains(id));
    }

    pub fn select(&mut self, id: &str) -> SelectOutcome {
        if id.is_empty() {
            return SelectOutcome::EmptyId;
        }
        if self.contains(id) {
            return SelectOutcome::AlreadySelected;
        }
        if self.is_full() {
            tracing::debug!(id, "selection full; ignoring");
            return SelectOutcome::AtCapacity;
        }
        self.selection.push(id.to_string());
        self.membership_changed();
        SelectOutcome::Added
    }

    /// Remove `id`; returns whether it was selected.
    pub fn deselect(&mut self, id: &str) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        self.selection.remove(pos);
        self.membership_changed();
        true
    }

    /// Replace the whole selection, keeping the first occurrence of each id
    /// and at most [`MAX_SELECTION`] ids.
    pub fn replace_selection<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection: Vec<String> = Vec::new();
        for id in ids {
            let id = id.into();
            if selection.len() == MAX_SELECTION {
                break;
            }
            if !id.is_empty() && !selection.contains(&id) {
                selection.push(id);
            }
        }
        self.selection = selection;
        self.membership_changed();
    }

    pub fn clear(&mut self) {
        self.replace_selection(Vec::<String>::new());
    }

    /// Drag `dragged` onto `target`: take it out of the permutation and
    /// reinsert it at the target's position. Returns whether the order
    /// changed.
    pub fn reorder(&mut self, dragged: &str, target: &str) -> bool {
        if dragged == target {
            return false;
        }
        let (Some(from_col), Some(to_col)) = (self.position(dragged), self.position(target))
        else {
            return false;
        };
        let (Some(from), Some(to)) = (
            self.order.iter().position(|&c| c == from_col),
            self.order.iter().position(|&c| c == to_col),
        ) else {
            return false;
        };
        let moved = self.order.remove(from);
        self.order.insert(to, moved);
        true
    }

    /// Hide a selected column. Returns whether anything changed.
    pub fn hide(&mut self, id: &str) -> bool {
        if !self.contains(id) || self.is_hidden(id) {
            return false;
        }
        self.hidden.push(id.to_string());
        true
    }

    pub fn show(&mut self, id: &str) -> bool {
        let before = self.hidden.len();
        self.hidden.retain(|h| h != id);
        self.hidden.len() != before
    }

    pub fn show_all(&mut self) -> bool {
        let changed = !self.hidden.is_empty();
        self.hidden.clear();
        changed
    }

    /// Permutation minus hidden columns: the only order used for display
    /// and diffing.
    pub fn visible_order(&self) -> Vec<usize> {
        self.order
            .iter()
            .copied()
            .filter(|&i| !self.is_hidden(&self.selection[i]))
            .collect()
    }

    pub fn visible_ids(&self) -> Vec<&str> {
        self.visible_order()
            .into_iter()
            .map(|i| self.selection[i].as_str())
            .collect()
    }

    /// Headers for visible columns: record name, or the id when the record is
    /// unnamed or unknown.
    pub fn headers(&self, catalog: &Catalog) -> Vec<ColumnHeader> {
        self.visible_order()
            .into_iter()
            .map(|index| {
                let id = &self.selection[index];
                let title = catalog
                    .get(id)
                    .map(|r| r.display_name())
                    .unwrap_or(id)
                    .to_string();
                ColumnHeader {
                    index,
                    id: id.clone(),
                    title,
                }
            })
            .collect()
    }
}
