//! Populate-once asset cache.
//!
//! Pre-fetch and decode may run concurrently across items, but each entry
//! is written at most once and is immutable afterwards: a reader never
//! observes a partially-populated entry. A read before population yields
//! [`AssetFetch::NotReady`], not a crash.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

use storyreel_core::ContentRef;

/// Result of a cache read.
#[derive(Debug, Clone)]
pub enum AssetFetch {
    /// Decoded payload bytes.
    Ready(Arc<[u8]>),
    /// Not populated yet; try again on a later frame.
    NotReady,
    /// Population failed; render/play as empty.
    Unavailable,
}

impl AssetFetch {
    pub fn is_ready(&self) -> bool {
        matches!(self, AssetFetch::Ready(_))
    }
}

enum Entry {
    Ready(Arc<[u8]>),
    Failed,
}

/// Shared cache of decoded asset payloads, keyed by content reference.
#[derive(Default)]
pub struct AssetCache {
    entries: RwLock<HashMap<ContentRef, Entry>>,
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read an entry. Never blocks on population.
    pub fn fetch(&self, content: &ContentRef) -> AssetFetch {
        match self.entries.read().get(content) {
            Some(Entry::Ready(bytes)) => AssetFetch::Ready(Arc::clone(bytes)),
            Some(Entry::Failed) => AssetFetch::Unavailable,
            None => AssetFetch::NotReady,
        }
    }

    /// Populate an entry with its decoded payload. The first write wins;
    /// later writes are ignored. Returns whether this call populated it.
    pub fn populate(&self, content: ContentRef, bytes: Vec<u8>) -> bool {
        let mut entries = self.entries.write();
        if entries.contains_key(&content) {
            return false;
        }
        entries.insert(content, Entry::Ready(bytes.into()));
        true
    }

    /// Record that a reference could not be fetched or decoded. First
    /// write wins, like [`AssetCache::populate`].
    pub fn mark_unavailable(&self, content: ContentRef) -> bool {
        let mut entries = self.entries.write();
        if entries.contains_key(&content) {
            return false;
        }
        warn!(%content, "asset unavailable");
        entries.insert(content, Entry::Failed);
        true
    }

    /// Number of populated (ready or failed) entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
