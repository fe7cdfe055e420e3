//! Error types for the sc-app service layer.

use std::path::PathBuf;

/// Application error wrapping the catalog, store, and config failures that
/// can reach a frontend.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Failed to read catalog file: {path}")]
    CatalogFileRead {
        path: PathBuf,
        source: sc_catalog::CatalogError,
    },

    #[error("Store error: {0}")]
    Store(String),

    #[error("Failed to read config file: {path}")]
    ConfigFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unknown simulation: {0}")]
    UnknownRecord(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sc-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<sc_catalog::CatalogError> for AppError {
    fn from(err: sc_catalog::CatalogError) -> Self {
        AppError::Catalog(err.to_string())
    }
}

impl From<sc_store::StoreError> for AppError {
    fn from(err: sc_store::StoreError) -> Self {
        AppError::Store(err.to_string())
    }
}
