//! Song cache keyed by id.
//!
//! Entries are written once and never replaced, evicted, or expired.

use std::collections::HashMap;

use crate::types::{Song, SongId};

/// Write-once in-memory song cache.
#[derive(Debug, Default)]
pub struct SongCache {
    /// Songs indexed by id.
    songs: HashMap<SongId, Song>,
}

impl SongCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached song for `id`.
    pub fn get(&self, id: SongId) -> Option<&Song> {
        self.songs.get(&id)
    }

    /// Stores `song` under `id` unless an entry already exists.
    ///
    /// Returns the entry now in the cache, which is the existing one if the
    /// id was already present.
    pub fn insert(&mut self, id: SongId, song: Song) -> &Song {
        self.songs.entry(id).or_insert(song)
    }

    /// Checks if an id exists in the cache.
    pub fn contains(&self, id: SongId) -> bool {
        self.songs.contains_key(&id)
    }

    /// Returns the cached ids in ascending order.
    pub fn ids(&self) -> Vec<SongId> {
        let mut ids: Vec<_> = self.songs.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Returns the number of cached songs.
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}
