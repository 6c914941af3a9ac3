//! Error kinds surfaced by catalog loading, document editing and export

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigToolError {
    /// Catalog, template or configuration file is missing
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Malformed JSON in an imported file, override payload or args cell
    #[error("Invalid JSON: {0}")]
    Decode(String),

    /// Well-formed input with the wrong shape (e.g. overrides that are not an object)
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Destination could not be created or written
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ConfigToolError {
    fn from(err: serde_json::Error) -> Self {
        ConfigToolError::Decode(err.to_string())
    }
}

pub type ToolResult<T> = Result<T, ConfigToolError>;
