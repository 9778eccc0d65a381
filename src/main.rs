//! song-catalog: runs a scripted set of lookups through the caching proxy.
//!
//! Results go to stdout; logs, including the cache/server source of each
//! point lookup, go to stderr.

use std::io;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use song_catalog::cache::CachingSongService;
use song_catalog::catalog::{Catalog, SongServer};
use song_catalog::cli::Cli;
use song_catalog::config::CatalogConfig;
use song_catalog::demo::{run_demo, write_json, write_text};
use song_catalog::logging;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    let mut config = CatalogConfig::from_env();
    config.apply_cli(&cli);
    config.validate().context("invalid configuration")?;

    logging::init(&config.log).context("failed to initialize logging")?;

    let catalog = match config.catalog_path {
        Some(ref path) => Catalog::load(path)
            .with_context(|| format!("failed to load catalog {}", path.display()))?,
        None => Catalog::seeded(),
    };
    info!(
        songs = catalog.len(),
        latency_ms = config.latency_ms,
        "catalog server ready"
    );

    let server = Arc::new(SongServer::with_latency_ms(
        Arc::new(catalog),
        config.latency_ms,
    ));
    let proxy = CachingSongService::new(server);

    let report = run_demo(&proxy, &cli.demo_plan());

    let mut stdout = io::stdout().lock();
    if cli.json {
        write_json(&report, &mut stdout).context("failed to write report")?;
    } else {
        write_text(&report, &mut stdout).context("failed to write report")?;
    }

    Ok(())
}
