//! Short-Link Store
//!
//! Maps short random ids to plate notation strings so large layouts can be
//! shared as `/s/<id>` instead of a long fragment URL.
//!
//! # Core Concepts
//!
//! - [`ShortLinkStore`]: the store; one per process, shared via `Arc`
//! - [`LinkPersistence`]: where the index lives ([`JsonFilePersistence`],
//!   [`MemoryPersistence`])
//! - [`IdGenerator`]: source of candidate ids
//! - [`ShortLinkConfig`]: data path, id length, retry bound
//!
//! # Example
//!
//! ```rust
//! use pn_shortlink::ShortLinkStore;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let store = ShortLinkStore::in_memory();
//! let link = store.create_short_link("PN:v1/96/A1:HeLa").await.unwrap();
//!
//! assert_eq!(
//!     store.notation_by_short_id(&link.id).await.as_deref(),
//!     Some("PN:v1/96/A1:HeLa")
//! );
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod extract;
pub mod id;
pub mod index;
pub mod persistence;
pub mod store;

// Re-exports for convenience
pub use config::ShortLinkConfig;
pub use error::{PersistError, ShortLinkError, ShortLinkResult};
pub use extract::extract_notation_from_share_url;
pub use id::{IdGenerator, RandomIdGenerator, ALPHABET};
pub use index::LinkIndex;
pub use persistence::{JsonFilePersistence, LinkPersistence, MemoryPersistence};
pub use store::{ShortLinkRecord, ShortLinkStore, ShortenRequest, ShortenResponse};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
