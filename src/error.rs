//! Error types for schema assembly
//!
//! Schema problems found while assembling (duplicate identifiers, bad field
//! imports) are data and live in [`crate::diagnostics`]. The errors here are
//! operational failures around the assembly pass.

use thiserror::Error;

use crate::definition::Category;

/// Result type for assembly operations
pub type Result<T> = std::result::Result<T, AssemblyError>;

/// Assembly errors
#[derive(Error, Debug)]
pub enum AssemblyError {
    #[error("Imported {category} '{identifier}' not found in source '{source_name}'")]
    MissingImport {
        category: Category,
        identifier: String,
        source_name: String,
    },

    #[error("Unknown artifact source: {0}")]
    UnknownSource(String),

    #[error("Invalid definition document: {0}")]
    InvalidDocument(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}
