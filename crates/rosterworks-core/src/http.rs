//! Shared HTTP client and runtime.
//!
//! Uses async reqwest internally but presents a sync interface: the
//! pipeline is sequential by design (the OpenAlex polite pool is rate
//! limited), so callers block on the shared runtime per request.

use std::sync::LazyLock;
use std::time::Duration;

/// Connect timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Error from a single API request
#[derive(Debug)]
pub enum RequestError {
    /// HTTP error with optional status code
    Http {
        status: Option<u16>,
        message: String,
    },
    /// Malformed response body
    Decode(String),
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http {
                status: Some(s),
                message,
            } => write!(f, "HTTP {s}: {message}"),
            Self::Http {
                status: None,
                message,
            } => write!(f, "HTTP error: {message}"),
            Self::Decode(msg) => write!(f, "invalid response: {msg}"),
        }
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    /// Create HTTP error from reqwest error
    pub fn from_reqwest(e: &reqwest::Error) -> Self {
        Self::Http {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => *status,
            Self::Decode(_) => None,
        }
    }
}

/// Shared async HTTP client with connection pooling.
static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .pool_max_idle_per_host(2)
        .build()
        .expect("failed to build HTTP client")
});

/// Get shared HTTP client.
pub fn http_client() -> &'static reqwest::Client {
    &SHARED_CLIENT
}

/// Shared tokio runtime for HTTP operations.
pub static SHARED_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

/// HTTP GET, decoding the JSON response body.
///
/// `timeout` bounds the whole request; a stalled endpoint surfaces as an
/// HTTP error after that bound, to be isolated by the caller.
pub fn get_json<T: serde::de::DeserializeOwned>(
    url: &str,
    query: &[(&str, &str)],
    user_agent: &str,
    timeout: Duration,
) -> Result<T, RequestError> {
    let body = SHARED_RUNTIME.handle().block_on(async {
        let resp = SHARED_CLIENT
            .get(url)
            .query(query)
            .header(reqwest::header::USER_AGENT, user_agent)
            .timeout(timeout)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| RequestError::from_reqwest(&e))?;
        resp.text()
            .await
            .map_err(|e| RequestError::from_reqwest(&e))
    })?;
    serde_json::from_str(&body).map_err(|e| RequestError::Decode(e.to_string()))
}
