//! In-memory cache of resolved tracks
//!
//! Filled while album listings are expanded and consulted before any remote
//! track lookup. Entries live as long as the backend: no capacity bound, no TTL,
//! no invalidation.

use moka::future::Cache as MokaCache;
use pmosource::Track;
use std::sync::Arc;

/// Track cache keyed by track URI
#[derive(Clone)]
pub struct TrackCache {
    tracks: Arc<MokaCache<String, Track>>,
}

impl TrackCache {
    pub fn new() -> Self {
        Self {
            tracks: Arc::new(MokaCache::builder().build()),
        }
    }

    /// Returns the cached track for `uri`
    pub async fn get(&self, uri: &str) -> Option<Track> {
        self.tracks.get(uri).await
    }

    /// Stores `track` under `uri`, replacing any previous entry
    pub async fn put(&self, uri: impl Into<String>, track: Track) {
        self.tracks.insert(uri.into(), track).await;
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.tracks.contains_key(uri)
    }

    /// Number of cached tracks
    pub async fn len(&self) -> u64 {
        self.tracks.run_pending_tasks().await;
        self.tracks.entry_count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for TrackCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TrackCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackCache")
            .field("entries", &self.tracks.entry_count())
            .finish()
    }
}
