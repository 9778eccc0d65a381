//! Scripted lookup run.
//!
//! Performs the point lookups first, then one title scan and one album scan,
//! all through the caching proxy, and collects the results into a report
//! that can be printed as text or JSON.

use std::io::{self, Write};

use serde::Serialize;
use tracing::info;

use crate::cache::{CacheStats, CachingSongService, LookupSource};
use crate::catalog::SongService;
use crate::types::{Song, SongId};

/// Largest lookup list allocated before the run starts.
const MAX_RESERVED_LOOKUPS: usize = 1024;

/// Lookups to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoPlan {
    /// Ids for the point lookups, in order.
    pub ids: Vec<SongId>,
    /// Title for the title scan.
    pub title: String,
    /// Album for the album scan.
    pub album: String,
    /// Number of passes over `ids`.
    pub repeat: u32,
}

impl Default for DemoPlan {
    fn default() -> Self {
        Self {
            ids: vec![1, 2, 3, 4],
            title: "Water".to_string(),
            album: "Shock Value".to_string(),
            repeat: 1,
        }
    }
}

/// One point lookup.
#[derive(Debug, Clone, Serialize)]
pub struct IdLookup {
    /// 1-based pass number.
    pub pass: u32,
    /// Requested song id.
    pub id: SongId,
    /// `None` when the song was not found.
    pub source: Option<LookupSource>,
    /// The song, if found.
    pub song: Option<Song>,
}

/// One scan lookup.
#[derive(Debug, Clone, Serialize)]
pub struct ScanLookup {
    /// Title or album searched for, as given.
    pub query: String,
    /// Number of matching songs.
    pub count: usize,
    /// Matching songs in ascending id order.
    pub songs: Vec<Song>,
}

impl ScanLookup {
    fn new(query: &str, songs: Vec<Song>) -> Self {
        Self {
            query: query.to_string(),
            count: songs.len(),
            songs,
        }
    }
}

/// Everything a demo run observed.
#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    /// Point lookups in the order they ran.
    pub lookups: Vec<IdLookup>,
    /// Title scan result.
    pub by_title: ScanLookup,
    /// Album scan result.
    pub by_album: ScanLookup,
    /// Proxy counters after the run.
    pub stats: CacheStats,
}

/// Runs `plan` against `service`.
pub fn run_demo<S>(service: &CachingSongService<S>, plan: &DemoPlan) -> DemoReport
where
    S: SongService + ?Sized,
{
    let mut lookups = Vec::with_capacity(reserved_lookups(plan));
    for pass in 1..=plan.repeat {
        for &id in &plan.ids {
            let outcome = service.lookup_by_id_outcome(id);
            lookups.push(IdLookup {
                pass,
                id,
                source: outcome.source(),
                song: outcome.into_song(),
            });
        }
    }

    let by_title = ScanLookup::new(&plan.title, service.lookup_by_title(&plan.title));
    let by_album = ScanLookup::new(&plan.album, service.lookup_by_album(&plan.album));
    let stats = service.stats();

    info!(
        hits = stats.hits,
        misses = stats.misses,
        not_found = stats.not_found,
        "demo run complete"
    );

    DemoReport {
        lookups,
        by_title,
        by_album,
        stats,
    }
}

/// Up-front capacity for the lookup list; large repeat counts grow on demand.
fn reserved_lookups(plan: &DemoPlan) -> usize {
    plan.ids
        .len()
        .saturating_mul(plan.repeat as usize)
        .min(MAX_RESERVED_LOOKUPS)
}

/// Writes the report as text lines.
pub fn write_text<W: Write>(report: &DemoReport, out: &mut W) -> io::Result<()> {
    for lookup in &report.lookups {
        match &lookup.song {
            Some(song) => writeln!(out, "Song {}: {} by {}", lookup.id, song.title, song.artist)?,
            None => writeln!(out, "Song {}: not found", lookup.id)?,
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "Songs with title '{}': {}",
        report.by_title.query, report.by_title.count
    )?;
    writeln!(
        out,
        "Songs in album '{}': {}",
        report.by_album.query, report.by_album.count
    )?;
    writeln!(
        out,
        "Cache: {} hits, {} misses, {} not found",
        report.stats.hits, report.stats.misses, report.stats.not_found
    )?;
    Ok(())
}

/// Writes the report as a single JSON document.
pub fn write_json<W: Write>(report: &DemoReport, out: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, SongServer};
    use std::sync::Arc;

    fn proxy() -> CachingSongService<SongServer> {
        CachingSongService::new(Arc::new(SongServer::instant(Arc::new(Catalog::seeded()))))
    }

    #[test]
    fn default_plan_text_output() {
        let report = run_demo(&proxy(), &DemoPlan::default());
        let mut out = Vec::new();
        write_text(&report, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let expected = "\
Song 1: Water by Tyla
Song 2: The Way I Are by Timbaland, Keri Hilson, D.O.E.
Song 3: Skate by Bruno Mars, Anderson .Paak, Silk Sonic
Song 4: Crush by SEVENTEEN

Songs with title 'Water': 2
Songs in album 'Shock Value': 1
Cache: 0 hits, 4 misses, 0 not found
";
        assert_eq!(text, expected);
    }

    #[test]
    fn repeated_passes_hit_cache() {
        let plan = DemoPlan {
            ids: vec![1, 999],
            repeat: 2,
            ..DemoPlan::default()
        };
        let report = run_demo(&proxy(), &plan);

        let sources: Vec<_> = report.lookups.iter().map(|l| (l.pass, l.id, l.source)).collect();
        assert_eq!(
            sources,
            vec![
                (1, 1, Some(LookupSource::Server)),
                (1, 999, None),
                (2, 1, Some(LookupSource::Cache)),
                (2, 999, None),
            ]
        );
        assert_eq!(report.stats.hits, 1);
        assert_eq!(report.stats.misses, 1);
        assert_eq!(report.stats.not_found, 2);
    }

    #[test]
    fn not_found_line() {
        let plan = DemoPlan {
            ids: vec![42],
            ..DemoPlan::default()
        };
        let report = run_demo(&proxy(), &plan);
        let mut out = Vec::new();
        write_text(&report, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("Song 42: not found\n"));
    }

    #[test]
    fn huge_repeat_does_not_preallocate() {
        let plan = DemoPlan {
            repeat: u32::MAX,
            ..DemoPlan::default()
        };
        assert_eq!(reserved_lookups(&plan), MAX_RESERVED_LOOKUPS);
        assert_eq!(reserved_lookups(&DemoPlan::default()), 4);

        let empty = DemoPlan {
            ids: Vec::new(),
            repeat: u32::MAX,
            ..DemoPlan::default()
        };
        assert_eq!(reserved_lookups(&empty), 0);
    }

    #[test]
    fn json_report() {
        let report = run_demo(&proxy(), &DemoPlan::default());
        let mut out = Vec::new();
        write_json(&report, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["lookups"].as_array().unwrap().len(), 4);
        assert_eq!(value["lookups"][0]["source"], "server");
        assert_eq!(value["lookups"][0]["song"]["artist"], "Tyla");
        assert_eq!(value["by_title"]["count"], 2);
        assert_eq!(value["by_album"]["songs"][0]["id"], 2);
        assert_eq!(value["stats"]["misses"], 4);
    }
}
