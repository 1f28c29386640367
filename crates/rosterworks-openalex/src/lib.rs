//! OpenAlex works pipeline: cursor-paginated per-author fetching,
//! normalization into the fixed key-fields schema, and compiled/dedup
//! CSV artifact writing.

pub mod client;
pub mod compile;
pub mod config;
pub mod record;
pub mod runner;

pub use client::{WorksClient, WorksPage};
pub use compile::{COMPILED_FILE, DEDUP_FILE, artifact_paths, dedup_by_work_id, write_artifacts};
pub use config::Config;
pub use record::{COLUMNS, WorkRecord, YearWindow};
pub use rosterworks_core::roster::Author;
pub use runner::{RunSummary, run};
