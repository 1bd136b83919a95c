//! Error taxonomy for the memory log core
//!
//! Every core operation returns [`MemoryError`]. The CLI layer wraps these
//! in `anyhow` and prints them; nothing here is retried.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the entry codec, store, and engines
#[derive(Debug, Error)]
pub enum MemoryError {
    /// Malformed caller input (bad boolean, bad ref-level, multi-line content, ...)
    #[error("{0}")]
    Validation(String),

    /// No entry carries the requested id
    #[error("Entry ID not found: {id}")]
    NotFound { id: String },

    /// The same id was decoded from more than one line
    #[error("Entry ID {id} appears {count} times. Refine the logs manually.")]
    AmbiguousId { id: String, count: usize },

    /// The store's initialization marker is missing
    #[error("Memory store at {} is not initialized. Run 'emem init' first.", dir.display())]
    Uninitialized { dir: PathBuf },

    /// Underlying file-system failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MemoryError {
    pub fn validation(msg: impl Into<String>) -> Self {
        MemoryError::Validation(msg.into())
    }

    /// True for errors caused by the caller's input
    pub fn is_validation(&self) -> bool {
        matches!(self, MemoryError::Validation(_))
    }
}
