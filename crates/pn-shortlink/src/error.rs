//! Error types for the short-link store
//!
//! Two layers:
//! - [`PersistError`]: failures reading or writing the backing blob
//! - [`ShortLinkError`]: failures surfaced by store operations

use pn_notation::NotationError;
use std::path::PathBuf;

/// Errors from a [`LinkPersistence`](crate::LinkPersistence) backend
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// IO error on the backing file
    #[error("io error on {path}: {source}")]
    Io {
        /// File being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Stored blob is not a valid link index
    #[error("corrupt link index in {path}: {source}")]
    Corrupt {
        /// File that failed to parse
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// Index could not be serialized
    #[error("failed to serialize link index: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Backend refused the operation
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

impl PersistError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create corrupt-blob error for path
    pub fn corrupt(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Corrupt {
            path: path.into(),
            source,
        }
    }
}

/// Errors from [`ShortLinkStore`](crate::ShortLinkStore) operations
#[derive(Debug, thiserror::Error)]
pub enum ShortLinkError {
    /// Input is not a decodable plate notation
    #[error("invalid plate notation: {0}")]
    InvalidNotation(#[source] NotationError),

    /// Request carried neither a notation nor a share URL holding one
    #[error("could not find valid plate notation in request")]
    NotationNotFound,

    /// Writing the index failed; the store is unchanged
    #[error("persistence failed: {0}")]
    Persistence(#[from] PersistError),

    /// Every generated id collided with an existing one
    #[error("no free short id after {attempts} attempts")]
    IdSpaceExhausted {
        /// Number of ids tried
        attempts: u32,
    },
}

impl ShortLinkError {
    /// Whether the caller sent bad input, as opposed to a store fault
    #[inline]
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidNotation(_) | Self::NotationNotFound)
    }
}

/// Result alias for store operations
pub type ShortLinkResult<T> = Result<T, ShortLinkError>;
