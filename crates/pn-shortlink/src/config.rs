//! Store configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default location of the persisted index, relative to the working directory
pub const DEFAULT_DATA_PATH: &str = "data/short-links.json";

/// Default short id length
pub const DEFAULT_ID_LENGTH: usize = 8;

/// Default bound on id collision retries
pub const DEFAULT_MAX_ID_ATTEMPTS: u32 = 1024;

/// Short-link store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortLinkConfig {
    /// JSON file holding the index
    pub data_path: PathBuf,
    /// Characters per generated id
    pub id_length: usize,
    /// Ids tried before giving up on a create
    pub max_id_attempts: u32,
}

impl ShortLinkConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With index file path
    #[inline]
    #[must_use]
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    /// With id length (clamped to at least 1)
    #[inline]
    #[must_use]
    pub fn with_id_length(mut self, length: usize) -> Self {
        self.id_length = length.max(1);
        self
    }

    /// With collision retry bound (clamped to at least 1)
    #[inline]
    #[must_use]
    pub fn with_max_id_attempts(mut self, attempts: u32) -> Self {
        self.max_id_attempts = attempts.max(1);
        self
    }
}

impl Default for ShortLinkConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            id_length: DEFAULT_ID_LENGTH,
            max_id_attempts: DEFAULT_MAX_ID_ATTEMPTS,
        }
    }
}
