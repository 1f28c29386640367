//! Fetch subcommand - run the roster works pipeline

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use rosterworks_core::SharedProgress;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Roster CSV with author OpenAlex IDs
    #[arg(short, long)]
    pub roster: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Calendar years to cover, ending at the current year
    #[arg(short, long)]
    pub years: Option<u32>,

    /// Milliseconds to sleep between pagination requests
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Contact email for the OpenAlex polite pool
    #[arg(short, long)]
    pub email: Option<String>,

    /// Skip the per-author key-fields CSVs
    #[arg(long)]
    pub no_author_files: bool,
}

/// Environment overrides honored between CLI flags and the config file:
/// INPUT_ROSTER, OPENALEX_POLITE_EMAIL, YEARS, DELAY (seconds, fractional).
fn env_overrides() -> (Option<PathBuf>, Option<String>, Option<u32>, Option<u64>) {
    let roster = std::env::var("INPUT_ROSTER").ok().map(PathBuf::from);
    let email = std::env::var("OPENALEX_POLITE_EMAIL").ok();
    let years = std::env::var("YEARS").ok().and_then(|s| s.parse().ok());
    let delay_ms = std::env::var("DELAY")
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .map(|secs| (secs * 1000.0) as u64);
    (roster, email, years, delay_ms)
}

pub fn run(args: FetchArgs, config: &Config, progress: &SharedProgress) -> Result<()> {
    let (env_roster, env_email, env_years, env_delay) = env_overrides();

    let roster = args
        .roster
        .or(env_roster)
        .unwrap_or_else(|| config.roster.path.clone());
    let output_dir = args
        .output
        .unwrap_or_else(|| config.output.default_dir.clone());
    let years = args.years.or(env_years).unwrap_or(config.fetch.years);
    let delay_ms = args.delay_ms.or(env_delay).unwrap_or(config.fetch.delay_ms);
    let email = args
        .email
        .or(env_email)
        .or_else(|| config.openalex.mailto.clone())
        .unwrap_or_else(|| "you@example.com".to_string());

    let oa_config = rosterworks_openalex::Config {
        roster: roster.clone(),
        output_dir: output_dir.clone(),
        years,
        delay: Duration::from_millis(delay_ms),
        email,
        base_url: config.openalex.base_url.clone(),
        author_files: config.fetch.author_files && !args.no_author_files,
    };

    log::info!("Fetching OpenAlex works for roster");
    log::info!("  Roster: {}", roster.display());
    log::info!("  Output: {}", output_dir.display());

    let summary = rosterworks_openalex::run(&oa_config, progress.clone())?;

    print_summary(
        "Roster works",
        &[
            (
                "Authors",
                format!(
                    "{}/{} ({} failed)",
                    summary.authors_succeeded(),
                    summary.authors_total,
                    summary.authors_failed
                ),
            ),
            (
                "Rows",
                format!(
                    "{} compiled, {} after dedup",
                    summary.compiled_rows, summary.dedup_rows
                ),
            ),
            ("Time", format!("{:.1}s", summary.elapsed.as_secs_f64())),
        ],
    );

    // Per-author failures are best-effort by contract; only configuration
    // and output errors fail the process.
    Ok(())
}

/// Print a key-value summary table on stderr
fn print_summary(title: &str, rows: &[(&str, String)]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new(title).fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    eprintln!("\n{table}");
}
