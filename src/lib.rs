//! song-catalog: song metadata lookups with a caching proxy.
//!
//! A [`catalog::SongServer`] answers lookups against an in-memory catalog
//! after a simulated latency. A [`cache::CachingSongService`] wraps it and
//! memoizes point lookups by id, so repeat lookups skip the latency. Title
//! and album searches are always passed through.
//!
//! # Modules
//!
//! - [`types`]: Core data types (Song, SongId)
//! - [`catalog`]: The lookup trait, the catalog, and the slow server
//! - [`cache`]: The song cache and the caching proxy
//! - [`demo`]: Scripted lookup run used by the binary
//! - [`config`]: Runtime configuration (CatalogConfig, LogConfig)
//! - [`error`]: Error types and codes (CatalogError, ErrorCode)
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use song_catalog::{
//!     cache::{CachingSongService, LookupSource},
//!     catalog::{Catalog, SongServer, SongService},
//! };
//!
//! let server = Arc::new(SongServer::instant(Arc::new(Catalog::seeded())));
//! let proxy = CachingSongService::new(server);
//!
//! let first = proxy.lookup_by_id_outcome(1);
//! assert_eq!(first.source(), Some(LookupSource::Server));
//! let again = proxy.lookup_by_id_outcome(1);
//! assert_eq!(again.source(), Some(LookupSource::Cache));
//!
//! assert_eq!(proxy.lookup_by_title("water").len(), 2);
//! ```

pub mod cache;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod demo;
pub mod error;
pub mod logging;
pub mod types;
