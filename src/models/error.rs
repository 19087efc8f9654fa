//! Snippet store error types

use std::error::Error as StdError;
use thiserror::Error;

/// Boxed error for wrapping driver-specific errors
pub type BoxedError = Box<dyn StdError + Send + Sync>;

/// Outcome of a failed store operation.
///
/// Callers must be able to tell "absent or expired" apart from a storage
/// malfunction, so the two are separate variants.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No currently visible snippet has this id
    #[error("no visible snippet with id {id}")]
    NotFound { id: i64 },

    /// Any other failure: connectivity, query, constraint, row decoding
    #[error("storage failure: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<BoxedError>,
    },
}

impl StoreError {
    /// Create a storage error with source
    pub fn storage(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Storage {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a storage error for data that decoded but is unusable
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            source: None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
