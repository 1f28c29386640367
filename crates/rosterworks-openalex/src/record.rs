//! The fixed key-fields row schema and the fetch year window.

use chrono::Datelike;
use serde::Serialize;

use rosterworks_core::roster::Author;

/// Column order of both compiled artifacts. The sink writes this header
/// explicitly; `WorkRecord` field order must stay in sync.
pub const COLUMNS: [&str; 8] = [
    "id",
    "display_name",
    "publication_year",
    "type",
    "cited_by_count",
    "host_venue_display_name",
    "author_openalex_id",
    "author_name",
];

/// One normalized work row, tagged with the author it was queried under.
///
/// A work fetched under several co-authors appears once per query; the
/// dedup artifact collapses those on `id`, keeping the first-seen row.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WorkRecord {
    /// OpenAlex work ID (e.g. "https://openalex.org/W2741809807")
    pub id: String,
    pub display_name: String,
    pub publication_year: Option<i32>,
    #[serde(rename = "type")]
    pub work_type: String,
    pub cited_by_count: Option<u64>,
    pub host_venue_display_name: String,
    /// The queried author, not necessarily the work's only author
    pub author_openalex_id: String,
    pub author_name: String,
}

/// Inclusive calendar-year fetch window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearWindow {
    pub from: i32,
    pub to: i32,
}

impl YearWindow {
    /// Window ending at `to`, spanning `years` calendar years inclusive.
    pub fn ending_at(to: i32, years: u32) -> Self {
        Self {
            from: to - (years.max(1) as i32 - 1),
            to,
        }
    }

    /// Window ending at the current UTC year.
    pub fn last_n_years(years: u32) -> Self {
        Self::ending_at(chrono::Utc::now().year(), years)
    }

    /// OpenAlex filter expression for one author restricted to this window.
    pub fn filter_for(&self, author_id: &str) -> String {
        format!(
            "author.id:{},from_publication_date:{}-01-01,to_publication_date:{}-12-31",
            author_id, self.from, self.to
        )
    }
}

/// File stem for an author's own key-fields CSV: the ID tail after the
/// last slash, with anything outside [A-Za-z0-9_-] replaced by '_'.
pub fn author_file_stem(id: &str) -> String {
    let tail = id.rsplit('/').next().unwrap_or(id);
    tail.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Row with only the identity fields set; every other column stays
/// empty/unknown.
pub fn record_for(author: &Author, id: &str) -> WorkRecord {
    WorkRecord {
        id: id.to_string(),
        display_name: String::new(),
        publication_year: None,
        work_type: String::new(),
        cited_by_count: None,
        host_venue_display_name: String::new(),
        author_openalex_id: author.id.clone(),
        author_name: author.name.clone(),
    }
}
