//! HTTP fetcher
//!
//! One client is built per run and shared by every task. Each request is
//! bounded by the client's 30 second timeout, so a hung server cannot hold
//! a concurrency slot indefinitely. Failures are classified for logging;
//! none of them are retried.

use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Fixed per-request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Identification sent with every request
const USER_AGENT: &str = concat!("sitescribe/", env!("CARGO_PKG_VERSION"));

/// Terminal failure of a single fetch attempt.
///
/// The address stays claimed in the dedup store; a failed fetch is never
/// re-queued within a run.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {0}")]
    Status(StatusCode),

    #[error("not an HTML document (content-type: {0})")]
    NotHtml(String),

    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),
}

/// Builds the HTTP client shared by all fetch tasks
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(5))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one page and returns its HTML body
///
/// Non-2xx statuses and non-HTML content types are failures; the caller
/// logs and abandons the task.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().await.map_err(classify_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    // An absent content-type header is given the benefit of the doubt.
    if !content_type.is_empty() && !content_type.contains("text/html") {
        return Err(FetchError::NotHtml(content_type));
    }

    response.text().await.map_err(classify_error)
}

fn classify_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Network(error.to_string())
    }
}
