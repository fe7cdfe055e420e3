//! Comparison session: column state backed by a durable store.

use sc_catalog::Catalog;
use sc_store::{HIDDEN_COLUMNS_KEY, KvStore, SELECTION_KEY, load_id_list, save_id_list};

use crate::columns::{ColumnHeader, ColumnState, SelectOutcome};
use crate::diff::highlight;
use crate::matrix::{ComparisonMatrix, build_matrix};
use crate::metrics::ExpandedSections;

/// Owns the column state and writes the selection and hidden columns back
/// to the store after every change that touches them. Write failures are
/// logged and the in-memory state stays authoritative.
pub struct ComparisonSession<S: KvStore> {
    store: S,
    columns: ColumnState,
    highlight_differences: bool,
    expanded: ExpandedSections,
}

impl<S: KvStore> ComparisonSession<S> {
    /// Read the persisted selection and hidden columns. Malformed entries read
    /// as empty; hidden ids not in the selection are dropped.
    pub fn load(store: S) -> Self {
        let selection = load_id_list(&store, SELECTION_KEY);
        let hidden = load_id_list(&store, HIDDEN_COLUMNS_KEY);
        let columns = ColumnState::restore(selection, hidden);
        tracing::debug!(
            selected = columns.len(),
            hidden = columns.hidden().len(),
            "comparison session restored"
        );
        Self {
            store,
            columns,
            highlight_differences: false,
            expanded: ExpandedSections::default(),
        }
    }

    pub fn with_highlight(mut self, enabled: bool) -> Self {
        self.highlight_differences = enabled;
        self
    }

    pub fn columns(&self) -> &ColumnState {
        &self.columns
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn highlight_differences(&self) -> bool {
        self.highlight_differences
    }

    pub fn set_highlight_differences(&mut self, enabled: bool) {
        self.highlight_differences = enabled;
    }

    pub fn expanded(&self) -> &ExpandedSections {
        &self.expanded
    }

    pub fn expanded_mut(&mut self) -> &mut ExpandedSections {
        &mut self.expanded
    }

    fn persist(&mut self, key: &str, ids: &[String]) {
        if let Err(err) = save_id_list(&mut self.store, key, ids) {
            tracing::warn!(key, %err, "failed to persist comparison state");
        }
    }

    fn persist_selection(&mut self) {
        let selection = self.columns.selection().to_vec();
        self.persist(SELECTION_KEY, &selection);
        self.persist_hidden();
    }

    fn persist_hidden(&mut self) {
        let hidden = self.columns.hidden().to_vec();
        self.persist(HIDDEN_COLUMNS_KEY, &hidden);
    }

    pub fn select(&mut self, id: &str) -> SelectOutcome {
        let outcome = self.columns.select(id);
        if outcome == SelectOutcome::Added {
            self.persist_selection();
        }
        outcome
    }

    pub fn deselect(&mut self, id: &str) -> bool {
        let changed = self.columns.deselect(id);
        if changed {
            self.persist_selection();
        }
        changed
    }

    pub fn replace_selection<I, T>(&mut self, ids: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.columns.replace_selection(ids);
        self.persist_selection();
    }

    pub fn clear_selection(&mut self) {
        self.columns.clear();
        self.persist_selection();
    }

    /// Column order is session-local and not persisted.
    pub fn reorder(&mut self, dragged: &str, target: &str) -> bool {
        self.columns.reorder(dragged, target)
    }

    pub fn hide(&mut self, id: &str) -> bool {
        let changed = self.columns.hide(id);
        if changed {
            self.persist_hidden();
        }
        changed
    }

    pub fn show(&mut self, id: &str) -> bool {
        let changed = self.columns.show(id);
        if changed {
            self.persist_hidden();
        }
        changed
    }

    pub fn show_all(&mut self) -> bool {
        let changed = self.columns.show_all();
        if changed {
            self.persist_hidden();
        }
        changed
    }

    pub fn headers(&self, catalog: &Catalog) -> Vec<ColumnHeader> {
        self.columns.headers(catalog)
    }

    pub fn matrix(&self, catalog: &Catalog) -> ComparisonMatrix {
        build_matrix(self.columns.selection(), catalog)
    }

    /// Highlight flags for every row of `matrix`, in `matrix.rows()` order.
    pub fn differences(&self, matrix: &ComparisonMatrix) -> Vec<bool> {
        let visible = self.columns.visible_order();
        highlight(
            matrix.rows().map(|(_, row)| row),
            &visible,
            self.highlight_differences,
        )
    }
}
