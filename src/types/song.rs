//! Song type representing a catalog record.
//!
//! A Song is an immutable metadata record. Songs are created when a catalog
//! is built and are never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Identifier of a song within a catalog.
pub type SongId = u32;

/// Song metadata record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Primary key, unique within a catalog.
    pub id: SongId,

    /// Song title. Not unique: several songs may share a title.
    pub title: String,

    /// Performing artist(s).
    pub artist: String,

    /// Album the song appears on.
    pub album: String,

    /// Length of the song in seconds.
    pub duration_sec: u32,
}

impl Song {
    /// Creates a new Song.
    pub fn new(
        id: SongId,
        title: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
        duration_sec: u32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
            album: album.into(),
            duration_sec,
        }
    }

    /// Returns true if the title equals `title`, ignoring case.
    pub fn title_matches(&self, title: &str) -> bool {
        eq_ignore_case(&self.title, title)
    }

    /// Returns true if the album equals `album`, ignoring case.
    pub fn album_matches(&self, album: &str) -> bool {
        eq_ignore_case(&self.album, album)
    }

    /// Formats the duration as `m:ss`.
    pub fn duration_display(&self) -> String {
        format!("{}:{:02}", self.duration_sec / 60, self.duration_sec % 60)
    }
}

/// Unicode-aware case-insensitive equality.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    if a.len() == b.len() && a.eq_ignore_ascii_case(b) {
        return true;
    }
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
