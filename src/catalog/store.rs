//! Immutable song record set.
//!
//! A [`Catalog`] is built once, from the built-in seed list or a JSON file,
//! and shared read-only with the server afterwards.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{CatalogError, Result};
use crate::types::{Song, SongId};

/// Ordered, immutable collection of songs keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    songs: BTreeMap<SongId, Song>,
}

impl Catalog {
    /// Builds a catalog from a list of songs.
    ///
    /// Fails with `INVALID_CATALOG` if two songs share an id.
    pub fn from_songs(songs: impl IntoIterator<Item = Song>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for song in songs {
            let id = song.id;
            if map.insert(id, song).is_some() {
                return Err(CatalogError::duplicate_song_id(id));
            }
        }
        Ok(Self { songs: map })
    }

    /// Returns the built-in catalog.
    pub fn seeded() -> Self {
        let songs = seed_songs()
            .into_iter()
            .map(|song| (song.id, song))
            .collect();
        Self { songs }
    }

    /// Loads a catalog from a JSON file containing an array of songs.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CatalogError::catalog_load_failed(path.display(), e))?;
        let songs: Vec<Song> = serde_json::from_str(&content)
            .map_err(|e| CatalogError::catalog_load_failed(path.display(), e))?;
        Self::from_songs(songs)
    }

    /// Returns the song with the given id.
    pub fn get(&self, id: SongId) -> Option<&Song> {
        self.songs.get(&id)
    }

    /// Iterates over all songs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Song> {
        self.songs.values()
    }

    /// Returns the number of songs.
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Returns true if the catalog has no songs.
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

/// The built-in song list.
pub fn seed_songs() -> Vec<Song> {
    vec![
        Song::new(1, "Water", "Tyla", "Album 1", 200),
        Song::new(
            2,
            "The Way I Are",
            "Timbaland, Keri Hilson, D.O.E.",
            "Shock Value",
            179,
        ),
        Song::new(
            3,
            "Skate",
            "Bruno Mars, Anderson .Paak, Silk Sonic",
            "An Evening With Silk Sonic",
            203,
        ),
        Song::new(4, "Crush", "SEVENTEEN", "Attacca", 170),
        Song::new(5, "Closer", "Ne-Yo", "Year Of The Gentleman", 234),
        Song::new(6, "Water", "Kehlani", "It Was Good Until It Wasn't", 124),
    ]
}
