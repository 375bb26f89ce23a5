//! Testing utilities for the plate notation workspace
//!
//! Shared fixtures, scripted id sources and faulty persistence backends.

#![allow(missing_docs)]

use async_trait::async_trait;
use parking_lot::Mutex;
use pn_notation::{PlateGrid, PlateType, WellRecord};
use pn_shortlink::{
    IdGenerator, LinkIndex, LinkPersistence, MemoryPersistence, PersistError, ShortLinkConfig,
    ShortLinkStore,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// Notation of [`sample_grid`]
pub const SAMPLE_NOTATION: &str = "PN:v1/96/A1:-CompoundA-10-uM-1*B2:HeLa*H12:HEK293-DMSO";

pub fn compound_a() -> WellRecord {
    WellRecord::new()
        .with_compound("CompoundA")
        .with_concentration("10", "uM")
        .with_replicate(1)
}

pub fn sample_grid() -> PlateGrid {
    PlateGrid::new(PlateType::Wells96)
        .with_well("H12", WellRecord::new().with_cell_type("HEK293").with_compound("DMSO"))
        .with_well("A1", compound_a())
        .with_well("B2", WellRecord::new().with_cell_type("HeLa"))
}

/// Distinct valid notations, one well each
pub fn distinct_notations(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("PN:v1/384/A1:cell{i}"))
        .collect()
}

/// Store over a JSON file inside a fresh temp dir
///
/// Keep the returned [`TempDir`] alive for as long as the store is used.
pub fn temp_file_store() -> (TempDir, ShortLinkStore) {
    let dir = tempfile::tempdir().unwrap();
    let config = ShortLinkConfig::new().with_data_path(dir.path().join("data/short-links.json"));
    (dir, ShortLinkStore::new(config))
}

/// Plays back a fixed list of ids, then repeats the last one
#[derive(Debug)]
pub struct ScriptedIds {
    script: Mutex<VecDeque<String>>,
    last: Mutex<String>,
    calls: AtomicUsize,
}

impl ScriptedIds {
    pub fn new<I, S>(ids: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let script: VecDeque<String> = ids.into_iter().map(Into::into).collect();
        let last = script.back().cloned().unwrap_or_else(|| "x".repeat(8));
        Arc::new(Self {
            script: Mutex::new(script),
            last: Mutex::new(last),
            calls: AtomicUsize::new(0),
        })
    }

    /// Number of ids handed out
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IdGenerator for ScriptedIds {
    fn generate(&self, _length: usize) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.script.lock().pop_front() {
            Some(id) => {
                self.last.lock().clone_from(&id);
                id
            }
            None => self.last.lock().clone(),
        }
    }
}

/// Memory backend whose loads and saves can be made to fail
#[derive(Debug, Default)]
pub struct FlakyPersistence {
    inner: MemoryPersistence,
    fail_loads: AtomicBool,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl FlakyPersistence {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seeded(index: LinkIndex) -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryPersistence::with_index(index),
            ..Self::default()
        })
    }

    pub fn fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Successful saves so far
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Option<LinkIndex> {
        self.inner.snapshot()
    }
}

#[async_trait]
impl LinkPersistence for FlakyPersistence {
    async fn load(&self) -> Result<Option<LinkIndex>, PersistError> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(PersistError::Unavailable("load disabled".into()));
        }
        self.inner.load().await
    }

    async fn save(&self, index: &LinkIndex) -> Result<(), PersistError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(PersistError::Unavailable("save disabled".into()));
        }
        self.inner.save(index).await?;
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
