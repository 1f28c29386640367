//! rosterworks - compile per-author OpenAlex works for a roster
//!
//! Reads a roster CSV, fetches each author's recent works from the
//! OpenAlex API, and writes a compiled key-fields CSV plus a
//! work-id-deduplicated variant.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "rosterworks")]
#[command(about = "Compile per-author OpenAlex works for a roster")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./rosterworks.toml or ~/.config/rosterworks/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch works for every roster author and write the compiled artifacts
    Fetch(cmd::fetch::FetchArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Progress context (TTY auto-detect)
    let progress = Arc::new(rosterworks_core::ProgressContext::new());

    // Logging:
    //   TTY:     per-author lines routed above the roster bar
    //   non-TTY: info unless --debug — logs are the only progress indicator
    let is_tty = progress.is_tty();
    let multi = if is_tty { Some(progress.multi()) } else { None };
    rosterworks_core::init_logging(false, cli.debug, multi);

    // Load configuration
    let config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };

    match cli.command {
        Command::Fetch(args) => cmd::fetch::run(args, &config, &progress),
        Command::Config => {
            use comfy_table::{
                Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
            };

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_header(vec![
                    Cell::new("Setting").fg(Color::Cyan),
                    Cell::new("Value").fg(Color::Cyan),
                ]);

            table.add_row(vec![
                "Output directory",
                &config.output.default_dir.display().to_string(),
            ]);
            table.add_row(vec!["Roster", &config.roster.path.display().to_string()]);
            table.add_row(vec!["OA base URL", &config.openalex.base_url]);
            table.add_row(vec![
                "Contact email",
                config.openalex.mailto.as_deref().unwrap_or("not set"),
            ]);
            table.add_row(vec!["Years", &config.fetch.years.to_string()]);
            table.add_row(vec!["Page delay", &format!("{}ms", config.fetch.delay_ms)]);

            eprintln!("\n{table}");
            Ok(())
        }
    }
}
