//! Slow catalog server.
//!
//! Answers every lookup against an immutable [`Catalog`] after waiting on the
//! configured [`Delay`]. Point lookups read the id index; title and album
//! lookups scan every record.

use std::sync::Arc;

use tracing::{debug, warn};

use super::delay::{Delay, FixedDelay, NoDelay};
use super::store::Catalog;
use super::SongService;
use crate::types::{Song, SongId};

/// Song lookup service backed by an in-memory catalog with simulated latency.
pub struct SongServer {
    catalog: Arc<Catalog>,
    delay: Box<dyn Delay>,
}

impl SongServer {
    /// Creates a server over `catalog` that waits on `delay` before each lookup.
    pub fn new(catalog: Arc<Catalog>, delay: Box<dyn Delay>) -> Self {
        Self { catalog, delay }
    }

    /// Creates a server with a fixed latency of `latency_ms` milliseconds.
    pub fn with_latency_ms(catalog: Arc<Catalog>, latency_ms: u64) -> Self {
        Self::new(catalog, Box::new(FixedDelay::from_millis(latency_ms)))
    }

    /// Creates a server that answers immediately.
    pub fn instant(catalog: Arc<Catalog>) -> Self {
        Self::new(catalog, Box::new(NoDelay))
    }

    /// Returns the catalog this server reads from.
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Waits out the simulated latency.
    ///
    /// An interrupted wait is logged and otherwise ignored; the lookup proceeds.
    fn simulate_latency(&self, operation: &'static str) {
        if let Err(e) = self.delay.wait() {
            warn!(operation, error = %e, "simulated latency interrupted, continuing lookup");
        }
    }

    fn scan<F>(&self, matches: F) -> Vec<Song>
    where
        F: Fn(&Song) -> bool,
    {
        self.catalog
            .iter()
            .filter(|song| matches(*song))
            .cloned()
            .collect()
    }
}

impl SongService for SongServer {
    fn lookup_by_id(&self, id: SongId) -> Option<Song> {
        self.simulate_latency("lookup_by_id");
        let song = self.catalog.get(id).cloned();
        debug!(song_id = id, found = song.is_some(), "server lookup by id");
        song
    }

    fn lookup_by_title(&self, title: &str) -> Vec<Song> {
        self.simulate_latency("lookup_by_title");
        let songs = self.scan(|song| song.title_matches(title));
        debug!(title, matches = songs.len(), "server lookup by title");
        songs
    }

    fn lookup_by_album(&self, album: &str) -> Vec<Song> {
        self.simulate_latency("lookup_by_album");
        let songs = self.scan(|song| song.album_matches(album));
        debug!(album, matches = songs.len(), "server lookup by album");
        songs
    }
}
