//! Core types for the song catalog.
//!
//! - [`Song`]: an immutable song metadata record
//! - [`SongId`]: the identifier used for point lookups

mod song;

pub use song::{Song, SongId};
