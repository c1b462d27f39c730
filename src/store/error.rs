//! State store error definitions.

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Faults raised while reading or writing the state file.
///
/// Cloneable so a failed reload can be remembered and handed to every
/// caller until the file becomes readable again.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The backing file does not exist.
    #[error("state file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// No line in the file carries the requested key.
    #[error("key '{0}' missing from state file")]
    MissingKey(String),

    /// Any other filesystem failure.
    #[error("state file I/O error: {0}")]
    Io(Arc<std::io::Error>),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(Arc::new(err))
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
