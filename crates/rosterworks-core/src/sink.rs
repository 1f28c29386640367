//! CSV artifact sink.
//!
//! The header is always written explicitly from the caller's schema
//! constant, never derived from the row type, so an empty accumulation
//! still produces a schema-valid header-only file.

use std::io;
use std::path::Path;

use serde::Serialize;

/// Write a full artifact: header row, then every row in order.
///
/// An empty `rows` slice yields a valid header-only file.
pub fn write_csv<S: Serialize>(path: &Path, header: &[&str], rows: &[S]) -> csv::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Append rows to an artifact, creating it (with header) if needed.
///
/// With `always_write_header` set, an empty `rows` slice against a missing
/// or zero-length target still creates a header-only file, so downstream
/// consumers that depend on file existence and column structure never see
/// a gap. Without it, an empty append against a missing target is a no-op.
pub fn append_csv<S: Serialize>(
    path: &Path,
    header: &[&str],
    rows: &[S],
    always_write_header: bool,
) -> csv::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let is_new = match std::fs::metadata(path) {
        Ok(meta) => meta.len() == 0,
        Err(e) if e.kind() == io::ErrorKind::NotFound => true,
        Err(e) => return Err(e.into()),
    };

    if rows.is_empty() && is_new && !always_write_header {
        return Ok(());
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    if is_new {
        writer.write_record(header)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HEADER: [&str; 3] = ["id", "name", "year"];

    #[derive(Serialize)]
    struct Row {
        id: String,
        name: String,
        year: Option<i32>,
    }

    fn row(id: &str, name: &str, year: Option<i32>) -> Row {
        Row {
            id: id.into(),
            name: name.into(),
            year,
        }
    }

    fn read(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn write_csv_rows_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let rows = vec![row("W1", "First", Some(2024)), row("W2", "Second", None)];
        write_csv(&path, &HEADER, &rows).unwrap();
        let lines = read(&path);
        assert_eq!(lines, vec!["id,name,year", "W1,First,2024", "W2,Second,"]);
    }

    #[test]
    fn write_csv_empty_is_header_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");
        let rows: Vec<Row> = Vec::new();
        write_csv(&path, &HEADER, &rows).unwrap();
        assert_eq!(read(&path), vec!["id,name,year"]);
    }

    #[test]
    fn write_csv_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/out.csv");
        let rows: Vec<Row> = Vec::new();
        write_csv(&path, &HEADER, &rows).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn append_csv_empty_with_header_flag_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let rows: Vec<Row> = Vec::new();
        append_csv(&path, &HEADER, &rows, true).unwrap();
        assert_eq!(read(&path), vec!["id,name,year"]);
    }

    #[test]
    fn append_csv_empty_without_flag_skips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let rows: Vec<Row> = Vec::new();
        append_csv(&path, &HEADER, &rows, false).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn append_csv_no_duplicate_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        append_csv(&path, &HEADER, &[row("W1", "a", None)], true).unwrap();
        append_csv(&path, &HEADER, &[row("W2", "b", None)], true).unwrap();
        let lines = read(&path);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "id,name,year");
        assert_eq!(lines[2], "W2,b,");
    }

    #[test]
    fn append_csv_header_flag_on_existing_nonempty_is_plain_append() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        append_csv(&path, &HEADER, &[row("W1", "a", None)], true).unwrap();
        let rows: Vec<Row> = Vec::new();
        append_csv(&path, &HEADER, &rows, true).unwrap();
        assert_eq!(read(&path).len(), 2);
    }
}
