//! JSON id-list entries: hidden comparison columns and the default selection.

use crate::StoreResult;
use crate::store::KvStore;

/// Hidden comparison columns (JSON array of record ids).
pub const HIDDEN_COLUMNS_KEY: &str = "compare_hidden_cols.v1";

/// Persisted comparison selection (JSON array of record ids).
pub const SELECTION_KEY: &str = "selected_simulation_ids.v1";

/// Read an id list. Missing keys, unparsable JSON, and non-array values all
/// read as an empty list; non-string array entries are dropped.
pub fn load_id_list(store: &dyn KvStore, key: &str) -> Vec<String> {
    let Some(raw) = store.get(key) else {
        return Vec::new();
    };
    match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(id) => Some(id),
                _ => None,
            })
            .collect(),
        Ok(_) => {
            tracing::warn!(key, "stored id list is not an array; ignoring");
            Vec::new()
        }
        Err(err) => {
            tracing::warn!(key, %err, "stored id list is not valid JSON; ignoring");
            Vec::new()
        }
    }
}

pub fn save_id_list(store: &mut dyn KvStore, key: &str, ids: &[String]) -> StoreResult<()> {
    let json = serde_json::to_string(ids)?;
    store.set(key, &json)
}
