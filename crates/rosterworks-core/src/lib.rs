//! Rosterworks Core - Common infrastructure for the roster works pipeline
//!
//! This crate provides the shared pieces the OpenAlex pipeline is built on:
//! HTTP client plumbing, logging, progress reporting, roster loading, and
//! the CSV artifact sink.

pub mod http;
pub mod logging;
pub mod progress;
pub mod roster;
pub mod sink;

// Re-exports for convenience
pub use http::{RequestError, SHARED_RUNTIME, get_json, http_client};
pub use logging::{IndicatifLogger, init_logging};
pub use progress::{ProgressContext, SharedProgress, fmt_num};
pub use roster::{RosterError, find_column, load_roster};
pub use sink::{append_csv, write_csv};
