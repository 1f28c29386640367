//! Pipeline configuration, constructed once at startup and passed by
//! reference into the runner. No process-global mutable state.

use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration for the works pipeline
#[derive(Debug, Clone)]
pub struct Config {
    /// Roster CSV with the author OpenAlex IDs
    pub roster: PathBuf,
    /// Output directory; artifacts land under `<output_dir>/compiled`
    pub output_dir: PathBuf,
    /// Calendar years to cover, ending at the current year
    pub years: u32,
    /// Delay between pagination requests
    pub delay: Duration,
    /// Contact email for the OpenAlex polite pool
    pub email: String,
    /// API base URL
    pub base_url: String,
    /// Also write one key-fields CSV per author under `<output_dir>/authors`
    pub author_files: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roster: PathBuf::from("data/roster_with_metrics.csv"),
            output_dir: PathBuf::from("data"),
            years: 5,
            delay: Duration::from_millis(150),
            email: "you@example.com".to_string(),
            base_url: "https://api.openalex.org".to_string(),
            author_files: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.years, 5);
        assert_eq!(config.delay, Duration::from_millis(150));
        assert_eq!(config.output_dir, PathBuf::from("data"));
        assert_eq!(config.base_url, "https://api.openalex.org");
        assert!(config.author_files);
    }
}
