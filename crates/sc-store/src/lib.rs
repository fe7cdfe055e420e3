//! sc-store: durable key-value storage for browser session state.

pub mod ids;
pub mod store;

pub use ids::{HIDDEN_COLUMNS_KEY, SELECTION_KEY, load_id_list, save_id_list};
pub use store::{FileStore, KvStore, MemoryStore};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid storage key: {key}")]
    InvalidKey { key: String },
}
