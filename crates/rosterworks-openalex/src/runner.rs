//! Pipeline orchestration: roster → per-author fetch → compiled artifacts.
//!
//! Fetching is sequential by design. OpenAlex rate-limits the polite
//! pool, so authors are processed one at a time with a fixed delay
//! between pages; a failed author is logged and skipped, never aborting
//! the run.

use std::time::Instant;

use anyhow::Context;
use indicatif::ProgressBar;

use rosterworks_core::roster::{self, Author};
use rosterworks_core::{SharedProgress, fmt_num, sink};

use crate::client::WorksClient;
use crate::compile;
use crate::config::Config;
use crate::record::{COLUMNS, WorkRecord, YearWindow, author_file_stem};

/// Run the works pipeline end to end.
///
/// Fails only on configuration or output errors; per-author fetch
/// failures are counted in the summary.
pub fn run(config: &Config, progress: SharedProgress) -> anyhow::Result<RunSummary> {
    let start = Instant::now();

    let authors = roster::load_roster(&config.roster)
        .with_context(|| format!("roster {}", config.roster.display()))?;
    let window = YearWindow::last_n_years(config.years);
    log::info!(
        "Authors with OpenAlex IDs: {} (years {}-{})",
        authors.len(),
        window.from,
        window.to
    );
    if let Some(sample) = authors.first() {
        log::debug!("Sample ID: {}", sample.id);
    }

    let client = WorksClient::new(&config.base_url, &config.email, config.delay);
    let pb = progress.roster_bar(authors.len());

    let (rows, failed) = aggregate(&authors, &pb, |author| {
        let rows = client.fetch_author_works(author, &window)?;
        if config.author_files {
            let path = config
                .output_dir
                .join("authors")
                .join(format!("{}.csv", author_file_stem(&author.id)));
            sink::append_csv(&path, &COLUMNS, &rows, true)
                .with_context(|| format!("cannot write {}", path.display()))?;
        }
        Ok(rows)
    });
    pb.finish_and_clear();

    let (compiled_rows, dedup_rows) = compile::write_artifacts(&config.output_dir, &rows)?;

    let summary = RunSummary {
        authors_total: authors.len(),
        authors_failed: failed,
        compiled_rows,
        dedup_rows,
        elapsed: start.elapsed(),
    };
    summary.log();
    Ok(summary)
}

/// Drive a fetch function over the author list, accumulating rows in
/// roster order and isolating failures per author.
///
/// Returns the accumulated rows and the failure count.
pub fn aggregate<F>(authors: &[Author], pb: &ProgressBar, mut fetch: F) -> (Vec<WorkRecord>, usize)
where
    F: FnMut(&Author) -> anyhow::Result<Vec<WorkRecord>>,
{
    let total = authors.len();
    let mut all_rows = Vec::new();
    let mut failed = 0;
    for (i, author) in authors.iter().enumerate() {
        pb.set_message(author.id.clone());
        match fetch(author) {
            Ok(rows) => {
                log::info!(
                    "[works] {:03}/{:03}  {}  -> {} works",
                    i + 1,
                    total,
                    author.id,
                    rows.len()
                );
                all_rows.extend(rows);
            }
            Err(e) => {
                failed += 1;
                log::warn!("{:03}/{:03}  {}  failed: {e:#}", i + 1, total, author.id);
            }
        }
        pb.inc(1);
    }
    (all_rows, failed)
}

/// Summary of a pipeline run
#[derive(Debug)]
pub struct RunSummary {
    pub authors_total: usize,
    pub authors_failed: usize,
    pub compiled_rows: usize,
    pub dedup_rows: usize,
    pub elapsed: std::time::Duration,
}

impl RunSummary {
    pub fn authors_succeeded(&self) -> usize {
        self.authors_total - self.authors_failed
    }

    pub fn log(&self) {
        log::info!("=== Run Summary ===");
        log::info!(
            "Authors: {}/{} succeeded ({} failed)",
            self.authors_succeeded(),
            self.authors_total,
            self.authors_failed
        );
        log::info!(
            "Rows: {} compiled, {} after dedup",
            fmt_num(self.compiled_rows),
            fmt_num(self.dedup_rows)
        );
        log::info!("Time: {:.1}s", self.elapsed.as_secs_f64());
    }
}
