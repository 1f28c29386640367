//! OpenAlex works API client with cursor pagination.
//!
//! Pagination is cursor-driven only: the loop keeps requesting while the
//! response carries a non-empty `meta.next_cursor`, sleeping the polite
//! delay between pages. A failed page fails the whole author atomically;
//! the aggregator isolates that per author.

use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use rosterworks_core::http;
use rosterworks_core::roster::Author;

use crate::record::{WorkRecord, YearWindow};

/// Initial cursor sentinel
pub const CURSOR_START: &str = "*";

/// Works per page (OpenAlex maximum)
pub const PER_PAGE: u32 = 200;

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const SELECT_FIELDS: &str =
    "id,display_name,publication_year,type,cited_by_count,host_venue.display_name";

/// One page of the works endpoint response
#[derive(Debug, Deserialize)]
pub struct WorksPage {
    #[serde(default)]
    pub results: Vec<WorkJson>,
    #[serde(default)]
    pub meta: PageMeta,
}

#[derive(Debug, Deserialize, Default)]
pub struct PageMeta {
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// OpenAlex work object, restricted to the selected fields
#[derive(Debug, Deserialize)]
pub struct WorkJson {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub publication_year: Option<i32>,
    #[serde(rename = "type", default)]
    pub work_type: Option<String>,
    #[serde(default)]
    pub cited_by_count: Option<u64>,
    #[serde(default)]
    pub host_venue: Option<HostVenue>,
}

#[derive(Debug, Deserialize, Default)]
pub struct HostVenue {
    #[serde(default)]
    pub display_name: Option<String>,
}

impl WorkJson {
    /// Normalize into a row tagged with the queried author.
    pub fn into_record(self, author: &Author) -> WorkRecord {
        WorkRecord {
            id: self.id,
            display_name: self.display_name.unwrap_or_default(),
            publication_year: self.publication_year,
            work_type: self.work_type.unwrap_or_default(),
            cited_by_count: self.cited_by_count,
            host_venue_display_name: self
                .host_venue
                .and_then(|v| v.display_name)
                .unwrap_or_default(),
            author_openalex_id: author.id.clone(),
            author_name: author.name.clone(),
        }
    }
}

/// Client for the OpenAlex works endpoint.
#[derive(Debug, Clone)]
pub struct WorksClient {
    base_url: String,
    mailto: String,
    delay: Duration,
}

impl WorksClient {
    pub fn new(base_url: impl Into<String>, mailto: impl Into<String>, delay: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            mailto: mailto.into(),
            delay,
        }
    }

    fn user_agent(&self) -> String {
        format!(
            "rosterworks/{} ({})",
            env!("CARGO_PKG_VERSION"),
            self.mailto
        )
    }

    fn fetch_page(
        &self,
        author_id: &str,
        window: &YearWindow,
        cursor: &str,
    ) -> anyhow::Result<WorksPage> {
        let url = format!("{}/works", self.base_url.trim_end_matches('/'));
        let filter = window.filter_for(author_id);
        let per_page = PER_PAGE.to_string();
        let query = [
            ("filter", filter.as_str()),
            ("per-page", per_page.as_str()),
            ("cursor", cursor),
            ("select", SELECT_FIELDS),
            ("mailto", self.mailto.as_str()),
        ];
        http::get_json(&url, &query, &self.user_agent(), REQUEST_TIMEOUT)
            .with_context(|| format!("works request failed for {author_id}"))
    }

    /// Fetch every work for one author within the window.
    ///
    /// Returns all pages' rows; any page failure aborts the author with
    /// no partial result.
    pub fn fetch_author_works(
        &self,
        author: &Author,
        window: &YearWindow,
    ) -> anyhow::Result<Vec<WorkRecord>> {
        paginate(author, self.delay, |cursor| {
            self.fetch_page(&author.id, window, cursor)
        })
    }
}

/// Drive cursor pagination over a page-fetch function, accumulating
/// normalized rows. Terminates when `meta.next_cursor` is absent or empty.
pub fn paginate<F>(author: &Author, delay: Duration, mut fetch_page: F) -> anyhow::Result<Vec<WorkRecord>>
where
    F: FnMut(&str) -> anyhow::Result<WorksPage>,
{
    let mut rows = Vec::new();
    let mut cursor = CURSOR_START.to_string();
    loop {
        let page = fetch_page(&cursor)?;
        rows.extend(page.results.into_iter().map(|w| w.into_record(author)));
        match page.meta.next_cursor {
            Some(next) if !next.is_empty() => {
                std::thread::sleep(delay);
                cursor = next;
            }
            _ => break,
        }
    }
    Ok(rows)
}
