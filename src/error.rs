//! Unified error type.

use thiserror::Error;

use crate::config::ConfigError;
use crate::models::StoreError;

/// The error type returned by snippetbox's bootstrap and server operations.
///
/// Per-request failures (404, 500, ...) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// failures that stop the process: bad configuration, a database that cannot
/// be opened or migrated, or a port that cannot be bound.
#[derive(Debug, Error)]
pub enum Error {
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("store: {0}")]
    Store(#[from] StoreError),
}
