//! CLI configuration
//!
//! Loaded from a TOML file, then overridden by the environment and flags:
//!
//! ```toml
//! [store]
//! data_path = "data/short-links.json"
//! id_length = 8
//! max_id_attempts = 1024
//!
//! [share]
//! base_url = "https://plates.example/designer"
//! ```

use anyhow::Context;
use pn_shortlink::ShortLinkConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file read from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "pn.toml";

/// Environment variable overriding `store.data_path`
pub const DATA_PATH_ENV: &str = "PN_DATA_PATH";

/// Top-level CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Short-link store settings
    pub store: ShortLinkConfig,
    /// Share URL settings
    pub share: ShareConfig,
}

/// Share URL settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    /// Page share URLs point at; also the origin for short URLs
    pub base_url: Option<String>,
}

impl CliConfig {
    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this layout.
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        toml::from_str(raw).context("invalid configuration")
    }

    /// Load configuration from `explicit`, else `pn.toml` if present, else defaults
    ///
    /// `PN_DATA_PATH` is applied on top.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.is_file()),
        };

        let config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                tracing::debug!("Loaded configuration from {}", path.display());
                Self::from_toml_str(&raw).with_context(|| format!("in {}", path.display()))?
            }
            None => Self::default(),
        };

        Ok(config.with_data_path_override(std::env::var_os(DATA_PATH_ENV).map(PathBuf::from)))
    }

    /// Replace the store path when `path` is set
    #[must_use]
    pub fn with_data_path_override(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) {
            self.store.data_path = path;
        }
        self
    }

    /// Replace the share base URL when `base_url` is set
    #[must_use]
    pub fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        if base_url.is_some() {
            self.share.base_url = base_url;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(CliConfig::from_toml_str("").unwrap(), CliConfig::default());
    }

    #[test]
    fn full_toml() {
        let config = CliConfig::from_toml_str(
            r#"
            [store]
            data_path = "/var/lib/pn/links.json"
            id_length = 10

            [share]
            base_url = "https://plates.example/designer"
            "#,
        )
        .unwrap();

        assert_eq!(config.store.data_path, PathBuf::from("/var/lib/pn/links.json"));
        assert_eq!(config.store.id_length, 10);
        assert_eq!(config.store.max_id_attempts, 1024);
        assert_eq!(
            config.share.base_url.as_deref(),
            Some("https://plates.example/designer")
        );
    }

    #[test]
    fn bad_toml_is_error() {
        assert!(CliConfig::from_toml_str("[store]\nid_length = \"eight\"").is_err());
    }

    #[test]
    fn overrides() {
        let config = CliConfig::default()
            .with_data_path_override(Some(PathBuf::from("/tmp/a.json")))
            .with_data_path_override(None)
            .with_data_path_override(Some(PathBuf::new()))
            .with_base_url_override(Some("https://x.test/".into()))
            .with_base_url_override(None);

        assert_eq!(config.store.data_path, PathBuf::from("/tmp/a.json"));
        assert_eq!(config.share.base_url.as_deref(), Some("https://x.test/"));
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CliConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn explicit_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pn.toml");
        std::fs::write(&path, "[share]\nbase_url = \"https://x.test/\"\n").unwrap();

        let config = CliConfig::load(Some(&path)).unwrap();
        assert_eq!(config.share.base_url.as_deref(), Some("https://x.test/"));
    }
}
