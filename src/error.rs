//! Error types for spawnedit
//!
//! Centralized error handling using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// All error types that can occur while loading or editing spawn files
#[derive(Debug, Error)]
pub enum SpawnError {
    /// Backing file does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Top-level shape of the file is not what the format expects
    #[error("Malformed root in {}: {reason}", path.display())]
    MalformedRoot { path: PathBuf, reason: String },

    /// A single record could not be decoded
    #[error("Malformed element: {0}")]
    MalformedElement(String),

    /// Positional index has no entry for the record being mutated
    #[error("Index miss: {0}")]
    IndexMiss(String),

    /// Record to delete is not present in the file
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// Handle was issued by an earlier load
    #[error("Stale handle: {0}")]
    StaleHandle(String),

    /// Mutation attempted before the store was loaded
    #[error("Store not loaded: {}", .0.display())]
    NotLoaded(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for spawnedit operations
pub type Result<T> = std::result::Result<T, SpawnError>;
