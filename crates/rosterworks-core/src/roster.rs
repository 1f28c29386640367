//! Roster loading: locate the OpenAlex ID and name columns by heuristic,
//! then yield a deduplicated author list in first-seen order.

use std::collections::HashSet;
use std::path::Path;

/// Recognized header names for the OpenAlex author ID column, in match order.
pub const ID_COLUMN_CANDIDATES: [&str; 5] = [
    "openalexid",
    "openalex_id",
    "author_openalex_id",
    "openalex id",
    "oaid",
];

/// Recognized header names for the display-name column, in match order.
pub const NAME_COLUMN_CANDIDATES: [&str; 4] = ["name", "author_name", "faculty_name", "full_name"];

/// One roster entry: the author to query works for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    /// OpenAlex author ID, trimmed, as it appeared in the roster
    pub id: String,
    /// Display name from the first roster row carrying this ID (may be empty)
    pub name: String,
}

/// Error loading or interpreting the roster file
#[derive(Debug)]
pub enum RosterError {
    Io(std::io::Error),
    Csv(csv::Error),
    /// No recognized ID column; carries the headers actually seen
    MissingIdColumn {
        seen: Vec<String>,
    },
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read roster: {e}"),
            Self::Csv(e) => write!(f, "cannot parse roster: {e}"),
            Self::MissingIdColumn { seen } => write!(
                f,
                "no OpenAlex ID column in roster; looked for {:?}, found columns {:?}",
                ID_COLUMN_CANDIDATES, seen
            ),
        }
    }
}

impl std::error::Error for RosterError {}

impl From<std::io::Error> for RosterError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<csv::Error> for RosterError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}

/// Find the first candidate present in `headers`, case-insensitively and
/// ignoring surrounding whitespace. Returns the column index.
pub fn find_column(headers: &[String], candidates: &[&str]) -> Option<usize> {
    let lowered: Vec<String> = headers
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    for cand in candidates {
        if let Some(idx) = lowered.iter().position(|h| h == cand) {
            return Some(idx);
        }
    }
    None
}

/// Load the roster, dropping rows without an ID and deduplicating IDs
/// while preserving first-seen order.
pub fn load_roster(path: &Path) -> Result<Vec<Author>, RosterError> {
    let file = std::fs::File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();

    let id_col = find_column(&headers, &ID_COLUMN_CANDIDATES).ok_or_else(|| {
        RosterError::MissingIdColumn {
            seen: headers.clone(),
        }
    })?;
    let name_col = find_column(&headers, &NAME_COLUMN_CANDIDATES);

    let mut seen = HashSet::new();
    let mut authors = Vec::new();
    for record in reader.records() {
        let record = record?;
        let id = record.get(id_col).unwrap_or("").trim();
        if id.is_empty() {
            continue;
        }
        if !seen.insert(id.to_string()) {
            continue;
        }
        let name = name_col
            .and_then(|c| record.get(c))
            .unwrap_or("")
            .trim()
            .to_string();
        authors.push(Author {
            id: id.to_string(),
            name,
        });
    }
    Ok(authors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn write_roster(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn find_column_exact() {
        let h = headers(&["name", "openalex_id"]);
        assert_eq!(find_column(&h, &ID_COLUMN_CANDIDATES), Some(1));
    }

    #[test]
    fn find_column_case_insensitive() {
        let h = headers(&["Name", "OpenAlexID"]);
        assert_eq!(find_column(&h, &ID_COLUMN_CANDIDATES), Some(1));
    }

    #[test]
    fn find_column_whitespace() {
        let h = headers(&["  OpenAlex ID  ", "other"]);
        assert_eq!(find_column(&h, &ID_COLUMN_CANDIDATES), Some(0));
    }

    #[test]
    fn find_column_candidate_order_wins() {
        // "openalexid" is tried before "oaid", regardless of position
        let h = headers(&["oaid", "openalexid"]);
        assert_eq!(find_column(&h, &ID_COLUMN_CANDIDATES), Some(1));
    }

    #[test]
    fn find_column_none() {
        let h = headers(&["first", "last", "orcid"]);
        assert_eq!(find_column(&h, &ID_COLUMN_CANDIDATES), None);
    }

    #[test]
    fn find_name_column_legacy() {
        let h = headers(&["Faculty_Name", "OAID"]);
        assert_eq!(find_column(&h, &NAME_COLUMN_CANDIDATES), Some(0));
    }

    #[test]
    fn load_roster_basic() {
        let f = write_roster("name,openalex_id\nAda,A1\nBob,A2\n");
        let authors = load_roster(f.path()).unwrap();
        assert_eq!(authors.len(), 2);
        assert_eq!(authors[0], Author { id: "A1".into(), name: "Ada".into() });
        assert_eq!(authors[1].id, "A2");
    }

    #[test]
    fn load_roster_drops_empty_ids() {
        let f = write_roster("openalexid\nA1\n\n  \nA2\n");
        let authors = load_roster(f.path()).unwrap();
        let ids: Vec<&str> = authors.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["A1", "A2"]);
    }

    #[test]
    fn load_roster_dedups_first_seen() {
        let f = write_roster("name,oaid\nFirst,A1\nSecond,A1\nThird,A2\n");
        let authors = load_roster(f.path()).unwrap();
        assert_eq!(authors.len(), 2);
        // name of the first row with that ID is kept
        assert_eq!(authors[0].name, "First");
    }

    #[test]
    fn load_roster_trims_ids() {
        let f = write_roster("openalexid\n  A1  \n");
        let authors = load_roster(f.path()).unwrap();
        assert_eq!(authors[0].id, "A1");
    }

    #[test]
    fn load_roster_missing_name_column() {
        let f = write_roster("openalexid\nA1\n");
        let authors = load_roster(f.path()).unwrap();
        assert_eq!(authors[0].name, "");
    }

    #[test]
    fn load_roster_missing_id_column_lists_candidates() {
        let f = write_roster("first,last\nAda,Lovelace\n");
        let err = load_roster(f.path()).unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("openalexid"), "message should list candidates: {msg}");
        assert!(msg.contains("first"), "message should list seen columns: {msg}");
    }

    #[test]
    fn load_roster_missing_file() {
        let err = load_roster(Path::new("/nonexistent/roster.csv")).unwrap_err();
        assert!(matches!(err, RosterError::Io(_)));
    }
}
