//! The short-link store
//!
//! Maps short random ids to notation strings and back. The index is loaded
//! from the backend on first use and kept in memory for the store's lifetime.
//!
//! Writes are serialized through a FIFO async mutex: each create reads the
//! index, persists the extended copy, and only then publishes it. Readers
//! take a brief read guard on the published index and never queue behind
//! writers.

use crate::config::ShortLinkConfig;
use crate::error::{ShortLinkError, ShortLinkResult};
use crate::extract::extract_notation_from_share_url;
use crate::id::{is_valid_id, IdGenerator, RandomIdGenerator};
use crate::index::LinkIndex;
use crate::persistence::{JsonFilePersistence, LinkPersistence, MemoryPersistence};
use parking_lot::RwLock;
use pn_notation::{share_url_for_notation, try_decode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};

/// Path prefix under which short links are served
pub const SHORT_PATH_PREFIX: &str = "/s/";

/// A stored link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortLinkRecord {
    /// Short id
    pub id: String,
    /// Normalized (trimmed) notation
    pub notation: String,
}

/// Input to [`ShortLinkStore::shorten`]
///
/// A non-blank `notation` wins over `url`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortenRequest {
    /// Raw notation string
    #[serde(default)]
    pub notation: Option<String>,
    /// Share URL carrying the notation in its fragment
    #[serde(default)]
    pub url: Option<String>,
}

impl ShortenRequest {
    /// Request for a raw notation
    #[must_use]
    pub fn from_notation(notation: impl Into<String>) -> Self {
        Self {
            notation: Some(notation.into()),
            url: None,
        }
    }

    /// Request for a share URL
    #[must_use]
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            notation: None,
            url: Some(url.into()),
        }
    }
}

/// Result of [`ShortLinkStore::shorten`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    /// Short id
    pub id: String,
    /// Server-relative path, `/s/<id>`
    pub short_path: String,
}

impl ShortenResponse {
    fn for_id(id: String) -> Self {
        let short_path = format!("{SHORT_PATH_PREFIX}{id}");
        Self { id, short_path }
    }

    /// Absolute short URL under `origin`
    #[must_use]
    pub fn short_url(&self, origin: &str) -> String {
        format!("{}{}", origin.trim_end_matches('/'), self.short_path)
    }
}

/// Persistent, concurrency-safe short-link store
///
/// Share one instance behind an [`Arc`].
#[derive(Debug)]
pub struct ShortLinkStore {
    config: ShortLinkConfig,
    backend: Arc<dyn LinkPersistence>,
    ids: Arc<dyn IdGenerator>,
    index: OnceCell<RwLock<LinkIndex>>,
    write_lock: Mutex<()>,
}

impl ShortLinkStore {
    /// Create store backed by the JSON file at `config.data_path`
    #[must_use]
    pub fn new(config: ShortLinkConfig) -> Self {
        let backend = Arc::new(JsonFilePersistence::new(config.data_path.clone()));
        Self::with_backend(config, backend)
    }

    /// Create store over an arbitrary backend
    #[must_use]
    pub fn with_backend(config: ShortLinkConfig, backend: Arc<dyn LinkPersistence>) -> Self {
        Self {
            config,
            backend,
            ids: Arc::new(RandomIdGenerator),
            index: OnceCell::new(),
            write_lock: Mutex::new(()),
        }
    }

    /// Create store that keeps everything in memory
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_backend(ShortLinkConfig::default(), Arc::new(MemoryPersistence::new()))
    }

    /// Replace the id source
    #[inline]
    #[must_use]
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Store configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ShortLinkConfig {
        &self.config
    }

    /// Create (or find) the short link for `notation`
    ///
    /// Surrounding whitespace is trimmed. The same notation always maps to
    /// the same id. A new id is visible to readers only after the index has
    /// been persisted; if persisting fails the store is left unchanged.
    ///
    /// Each new link copies the whole index before saving it, so a create
    /// costs time proportional to the number of stored links. Repeat
    /// creates of a known notation do not copy.
    ///
    /// # Errors
    ///
    /// - [`ShortLinkError::InvalidNotation`] if the notation does not decode
    /// - [`ShortLinkError::Persistence`] if the index could not be written
    /// - [`ShortLinkError::IdSpaceExhausted`] if no free id was found
    pub async fn create_short_link(&self, notation: &str) -> ShortLinkResult<ShortLinkRecord> {
        let normalized = notation.trim();
        try_decode(normalized).map_err(ShortLinkError::InvalidNotation)?;

        let _guard = self.write_lock.lock().await;
        let index = self.index().await;

        let existing = index.read().id_for(normalized).map(str::to_owned);
        if let Some(id) = existing {
            return Ok(ShortLinkRecord {
                id,
                notation: normalized.to_owned(),
            });
        }

        let (id, next) = {
            let current = index.read();
            let id = self.fresh_id(&current)?;
            let mut next = current.clone();
            next.insert(id.clone(), normalized);
            (id, next)
        };

        self.backend.save(&next).await?;
        *index.write() = next;

        tracing::info!("Created short link {} ({} chars)", id, normalized.len());
        Ok(ShortLinkRecord {
            id,
            notation: normalized.to_owned(),
        })
    }

    /// Notation stored under `id`, if any
    ///
    /// Ids outside the generator alphabet are rejected without a lookup.
    pub async fn notation_by_short_id(&self, id: &str) -> Option<String> {
        if !is_valid_id(id) {
            tracing::debug!("Rejected malformed short id {:?}", id);
            return None;
        }
        let index = self.index().await;
        let notation = index.read().notation(id).map(str::to_owned);
        notation
    }

    /// Shorten a raw notation or a share URL
    ///
    /// # Errors
    ///
    /// [`ShortLinkError::NotationNotFound`] when the request has no usable
    /// notation, otherwise as [`create_short_link`](Self::create_short_link).
    pub async fn shorten(&self, request: &ShortenRequest) -> ShortLinkResult<ShortenResponse> {
        let direct = request
            .notation
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());

        let notation = match direct {
            Some(notation) => notation.to_owned(),
            None => request
                .url
                .as_deref()
                .and_then(extract_notation_from_share_url)
                .ok_or(ShortLinkError::NotationNotFound)?,
        };

        let record = self.create_short_link(&notation).await?;
        Ok(ShortenResponse::for_id(record.id))
    }

    /// Where a visit to `/s/<id>` should land
    ///
    /// `/#pn=<encoded notation>` for a known id, `/` otherwise.
    pub async fn redirect_target(&self, id: &str) -> String {
        match self.notation_by_short_id(id).await {
            Some(notation) => share_url_for_notation(&notation, Some("/")),
            None => "/".to_owned(),
        }
    }

    /// Number of published links
    pub async fn len(&self) -> usize {
        let index = self.index().await;
        let len = index.read().len();
        len
    }

    /// Whether no links are published
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// All published links, sorted by id
    pub async fn records(&self) -> Vec<ShortLinkRecord> {
        let index = self.index().await;
        let mut records: Vec<ShortLinkRecord> = index
            .read()
            .iter()
            .map(|(id, notation)| ShortLinkRecord {
                id: id.to_owned(),
                notation: notation.to_owned(),
            })
            .collect();
        records.sort_by(|a, b| a.id.cmp(&b.id));
        records
    }

    async fn index(&self) -> &RwLock<LinkIndex> {
        self.index
            .get_or_init(|| async {
                let index = match self.backend.load().await {
                    Ok(Some(index)) => {
                        tracing::debug!("Loaded {} short links", index.len());
                        index
                    }
                    Ok(None) => LinkIndex::new(),
                    Err(e) => {
                        tracing::warn!("Failed to load short links, starting empty: {}", e);
                        LinkIndex::new()
                    }
                };
                RwLock::new(index)
            })
            .await
    }

    fn fresh_id(&self, index: &LinkIndex) -> ShortLinkResult<String> {
        let attempts = self.config.max_id_attempts;
        for _ in 0..attempts {
            let id = self.ids.generate(self.config.id_length);
            if !index.contains_id(&id) {
                return Ok(id);
            }
            tracing::debug!("Short id collision on {}", id);
        }
        Err(ShortLinkError::IdSpaceExhausted { attempts })
    }
}
