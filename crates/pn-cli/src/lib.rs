//! `pn` command-line tool
//!
//! Encodes and decodes plate notation, builds share URLs and manages the
//! local short-link store.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod commands;
pub mod config;
pub mod logging;

pub use config::{CliConfig, ShareConfig, DATA_PATH_ENV, DEFAULT_CONFIG_FILE};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
