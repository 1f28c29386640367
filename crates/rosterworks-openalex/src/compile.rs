//! Compiled artifact writing: the full table and the work-id dedup table.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context;

use rosterworks_core::sink;

use crate::record::{COLUMNS, WorkRecord};

pub const COMPILED_FILE: &str = "openalex_all_authors_last5y_key_fields.csv";
pub const DEDUP_FILE: &str = "openalex_all_authors_last5y_key_fields_dedup.csv";

/// First-occurrence-wins dedup on the work `id`, preserving order and the
/// first occurrence's field values. Idempotent.
pub fn dedup_by_work_id(rows: &[WorkRecord]) -> Vec<WorkRecord> {
    let mut seen = HashSet::new();
    rows.iter()
        .filter(|r| seen.insert(r.id.clone()))
        .cloned()
        .collect()
}

/// Paths of the two compiled artifacts under `out_dir`.
pub fn artifact_paths(out_dir: &Path) -> (PathBuf, PathBuf) {
    let compiled_dir = out_dir.join("compiled");
    (
        compiled_dir.join(COMPILED_FILE),
        compiled_dir.join(DEDUP_FILE),
    )
}

/// Write both artifacts. Returns (compiled rows, dedup rows).
///
/// Both files are written even for an empty accumulation, as header-only
/// CSVs with the fixed schema.
pub fn write_artifacts(out_dir: &Path, rows: &[WorkRecord]) -> anyhow::Result<(usize, usize)> {
    let (compiled_path, dedup_path) = artifact_paths(out_dir);

    sink::write_csv(&compiled_path, &COLUMNS, rows)
        .with_context(|| format!("cannot write {}", compiled_path.display()))?;
    log::info!("wrote {} rows={}", compiled_path.display(), rows.len());

    let deduped = dedup_by_work_id(rows);
    sink::write_csv(&dedup_path, &COLUMNS, &deduped)
        .with_context(|| format!("cannot write {}", dedup_path.display()))?;
    log::info!("wrote {} rows={}", dedup_path.display(), deduped.len());

    Ok((rows.len(), deduped.len()))
}
