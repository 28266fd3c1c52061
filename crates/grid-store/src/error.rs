//! Error types for grid-store
//!
//! A single flat enum covers every storage backend; callers in the
//! dashboard only ever log these and fall back to an empty state.

use std::path::PathBuf;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error reading the stored document
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path of the document
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The stored document is not valid for the requested type
    #[error("Failed to parse stored document: {0}")]
    Parse(String),

    /// The value could not be encoded
    #[error("Failed to serialize value: {0}")]
    Serialize(String),

    /// Writing the temp file or creating directories failed
    #[error("Failed to write {path}: {message}")]
    Write {
        /// Path of the document
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// Failed to move the temp file over the document
    #[error("Failed to write {path} atomically - Safety copy at: {temp_path}")]
    WriteAtomic {
        /// Path of the document
        path: PathBuf,
        /// Path to the temporary safety copy
        temp_path: PathBuf,
    },
}

/// Result type alias for grid-store operations
pub type Result<T> = std::result::Result<T, StoreError>;
