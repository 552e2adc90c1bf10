//! Persistent session-title cache.
//!
//! The whole file is read, mutated in memory and written back on every
//! change. There is no locking: two concurrent writers race and the last
//! rename wins. Writes go through a temp file, so a reader never sees a
//! half-written document.

use gaap_core::{GaapError, Result};
use gaap_telemetry::{atomic_write, Clock};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Most recently used sessions kept on disk
pub const MAX_CACHE_ENTRIES: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub title: String,
    #[serde(rename = "message_hash", default)]
    pub content_hash: String,
    /// Last access, Unix seconds; missing sorts as oldest
    #[serde(default)]
    pub timestamp: i64,
}

/// Session id → entry
pub type CacheMap = BTreeMap<String, CacheEntry>;

pub struct SessionTitleCache {
    path: PathBuf,
    clock: Arc<dyn Clock>,
    capacity: usize,
}

impl SessionTitleCache {
    pub fn new(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self::with_capacity(path, clock, MAX_CACHE_ENTRIES)
    }

    pub fn with_capacity(path: impl Into<PathBuf>, clock: Arc<dyn Clock>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            clock,
            capacity,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every entry; a missing file is an empty cache
    pub fn load(&self) -> Result<CacheMap> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(CacheMap::new()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&content).map_err(|e| {
            GaapError::CacheCorrupt(format!(
                "Failed to parse cache {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Cached title for `session_id` if it was generated from the same first message.
    ///
    /// A hit refreshes the entry's timestamp and is persisted immediately;
    /// if that write fails the hit is still returned.
    pub fn lookup(&self, session_id: &str, content_hash: &str) -> Result<Option<String>> {
        let mut entries = self.load()?;
        let title = match entries.get_mut(session_id) {
            Some(entry) if entry.content_hash == content_hash => {
                entry.timestamp = self.clock.now_epoch();
                entry.title.clone()
            }
            Some(_) => {
                tracing::debug!(session_id, "cached title is stale");
                return Ok(None);
            }
            None => return Ok(None),
        };

        if let Err(e) = self.save(entries) {
            tracing::debug!(session_id, error = %e, "cache hit refresh not saved");
        }
        tracing::debug!(session_id, "session title cache hit");
        Ok(Some(title))
    }

    /// Insert or replace an entry stamped with the current time.
    ///
    /// A corrupt cache file is replaced wholesale.
    pub fn store(&self, session_id: &str, content_hash: &str, title: &str) -> Result<()> {
        let mut entries = match self.load() {
            Ok(entries) => entries,
            Err(GaapError::CacheCorrupt(reason)) => {
                tracing::debug!(%reason, "discarding corrupt session title cache");
                CacheMap::new()
            }
            Err(e) => return Err(e),
        };

        entries.insert(
            session_id.to_string(),
            CacheEntry {
                title: title.to_string(),
                content_hash: content_hash.to_string(),
                timestamp: self.clock.now_epoch(),
            },
        );
        self.save(entries)
    }

    fn save(&self, entries: CacheMap) -> Result<()> {
        let entries = evict_oldest(entries, self.capacity);
        let json = serde_json::to_string_pretty(&entries)
            .map_err(|e| GaapError::CacheCorrupt(e.to_string()))?;
        atomic_write(&self.path, json.as_bytes())?;
        Ok(())
    }
}

/// Keep the `capacity` most recently accessed entries.
///
/// Ties on timestamp keep session-id order, so the result is stable.
pub fn evict_oldest(entries: CacheMap, capacity: usize) -> CacheMap {
    if entries.len() <= capacity {
        return entries;
    }

    let mut ordered: Vec<(String, CacheEntry)> = entries.into_iter().collect();
    ordered.sort_by_key(|(_, entry)| entry.timestamp);
    let excess = ordered.len() - capacity;
    tracing::debug!(evicted = excess, "session title cache trimmed");

    ordered.into_iter().skip(excess).collect()
}
