//! Caching proxy in front of a song service.
//!
//! [`CachingSongService`] implements [`SongService`] by wrapping another
//! implementation. Point lookups by id are memoized after the first
//! successful fetch; title and album scans always go to the wrapped service.
//!
//! Songs that were not found are never cached, so a missing id is looked up
//! on the wrapped service every time.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{debug, info};

use super::songs::SongCache;
use crate::catalog::SongService;
use crate::types::{Song, SongId};

/// Where a point lookup was answered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupSource {
    /// Answered from the proxy's cache.
    Cache,
    /// Fetched from the wrapped service.
    Server,
}

impl LookupSource {
    /// Returns the string representation of the source.
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupSource::Cache => "cache",
            LookupSource::Server => "server",
        }
    }
}

impl fmt::Display for LookupSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of a point lookup through the proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Cache hit; the wrapped service was not called.
    Cached(Song),
    /// Cache miss; fetched from the wrapped service and now cached.
    Fetched(Song),
    /// The wrapped service has no song with this id. Nothing was cached.
    NotFound,
}

impl LookupOutcome {
    /// Returns the song, if one was found.
    pub fn song(&self) -> Option<&Song> {
        match self {
            LookupOutcome::Cached(song) | LookupOutcome::Fetched(song) => Some(song),
            LookupOutcome::NotFound => None,
        }
    }

    /// Consumes the outcome and returns the song, if one was found.
    pub fn into_song(self) -> Option<Song> {
        match self {
            LookupOutcome::Cached(song) | LookupOutcome::Fetched(song) => Some(song),
            LookupOutcome::NotFound => None,
        }
    }

    /// Returns where the song came from, or `None` if it was not found.
    pub fn source(&self) -> Option<LookupSource> {
        match self {
            LookupOutcome::Cached(_) => Some(LookupSource::Cache),
            LookupOutcome::Fetched(_) => Some(LookupSource::Server),
            LookupOutcome::NotFound => None,
        }
    }
}

/// Point lookup counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups fetched from the wrapped service and cached.
    pub misses: u64,
    /// Lookups the wrapped service could not answer.
    pub not_found: u64,
}

/// Song service proxy that caches point lookups.
///
/// The wrapped service is held through an `Arc` and may be shared with
/// other callers.
pub struct CachingSongService<S: SongService + ?Sized> {
    inner: Arc<S>,
    cache: Mutex<SongCache>,
    hits: AtomicU64,
    misses: AtomicU64,
    not_found: AtomicU64,
}

impl<S: SongService + ?Sized> CachingSongService<S> {
    /// Creates a proxy with an empty cache in front of `inner`.
    pub fn new(inner: Arc<S>) -> Self {
        Self {
            inner,
            cache: Mutex::new(SongCache::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            not_found: AtomicU64::new(0),
        }
    }

    /// Returns the wrapped service.
    pub fn inner(&self) -> &Arc<S> {
        &self.inner
    }

    /// Looks up a song by id and reports where the answer came from.
    ///
    /// The cache lock is released while the wrapped service is called. If two
    /// callers miss on the same id concurrently, both fetch and the first
    /// insert is kept.
    pub fn lookup_by_id_outcome(&self, id: SongId) -> LookupOutcome {
        let cached = self.cache().get(id).cloned();
        if let Some(song) = cached {
            self.hits.fetch_add(1, Ordering::Relaxed);
            info!(source = %LookupSource::Cache, song_id = id, "fetching song metadata from cache");
            return LookupOutcome::Cached(song);
        }

        match self.inner.lookup_by_id(id) {
            Some(song) => {
                let song = self.cache().insert(id, song).clone();
                self.misses.fetch_add(1, Ordering::Relaxed);
                info!(source = %LookupSource::Server, song_id = id, "fetching song metadata from server");
                LookupOutcome::Fetched(song)
            }
            None => {
                self.not_found.fetch_add(1, Ordering::Relaxed);
                debug!(song_id = id, "song not found on server, nothing cached");
                LookupOutcome::NotFound
            }
        }
    }

    /// Returns a snapshot of the point lookup counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
        }
    }

    /// Returns true if `id` is cached.
    pub fn is_cached(&self, id: SongId) -> bool {
        self.cache().contains(id)
    }

    /// Returns the cached ids in ascending order.
    pub fn cached_ids(&self) -> Vec<SongId> {
        self.cache().ids()
    }

    /// Returns the number of cached songs.
    pub fn cached_len(&self) -> usize {
        self.cache().len()
    }

    fn cache(&self) -> MutexGuard<'_, SongCache> {
        // Entries are write-once, so a poisoned map is still consistent.
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: SongService + ?Sized> SongService for CachingSongService<S> {
    fn lookup_by_id(&self, id: SongId) -> Option<Song> {
        self.lookup_by_id_outcome(id).into_song()
    }

    fn lookup_by_title(&self, title: &str) -> Vec<Song> {
        self.inner.lookup_by_title(title)
    }

    fn lookup_by_album(&self, album: &str) -> Vec<Song> {
        self.inner.lookup_by_album(album)
    }
}
