//! Song catalog: the lookup contract and the slow server implementing it.
//!
//! - [`SongService`]: point lookup by id, scan lookups by title and album
//! - [`SongServer`]: the server, answering after a simulated latency
//! - [`Catalog`]: the immutable record set the server reads
//! - [`delay`]: latency strategies

pub mod delay;
mod server;
mod store;

pub use delay::{CancelToken, Delay, FixedDelay, NoDelay};
pub use server::SongServer;
pub use store::{seed_songs, Catalog};

use crate::types::{Song, SongId};

/// Song lookup operations.
///
/// A lookup that finds nothing returns `None` or an empty list; it is not
/// an error.
pub trait SongService: Send + Sync {
    /// Returns the song with the given id, if any.
    fn lookup_by_id(&self, id: SongId) -> Option<Song>;

    /// Returns every song whose title equals `title`, ignoring case.
    fn lookup_by_title(&self, title: &str) -> Vec<Song>;

    /// Returns every song whose album equals `album`, ignoring case.
    fn lookup_by_album(&self, album: &str) -> Vec<Song>;
}
