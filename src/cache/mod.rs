//! Caching layer for song lookups.
//!
//! Provides a write-once song cache and the proxy that uses it to avoid
//! repeat server latency on point lookups.

pub mod proxy;
pub mod songs;

// Re-export commonly used types
pub use proxy::{CacheStats, CachingSongService, LookupOutcome, LookupSource};
pub use songs::SongCache;
