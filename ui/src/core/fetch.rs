//! Shared "fetch with timeout and bounded fallback candidates" utility.
//!
//! The transport is a trait so the manifest loader and the lead form run
//! against `fetch` in the browser and against fakes in tests.

use std::future::Future;

use futures::future::{select, Either};
use thiserror::Error;

use super::timing;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, content_type: Option<&str>, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: content_type.map(str::to_string),
            body: body.into(),
        }
    }

    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self::new(status, Some("application/json"), body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"))
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("request timed out after {0} ms")]
    Timeout(u64),
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("no candidate URL to fetch")]
    NoCandidates,
}

/// GET transport. Implementations must abort the underlying request when
/// the returned future is dropped.
#[allow(async_fn_in_trait)]
pub trait HttpClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

/// Race `request` against a timer. Dropping the losing request future is
/// what aborts it.
pub async fn with_timeout<T, F>(request: F, timeout_ms: u64) -> Result<T, FetchError>
where
    F: Future<Output = Result<T, FetchError>>,
{
    let request = Box::pin(request);
    let timer = Box::pin(timing::sleep_ms(timeout_ms));
    match select(request, timer).await {
        Either::Left((outcome, _)) => outcome,
        Either::Right(((), _)) => Err(FetchError::Timeout(timeout_ms)),
    }
}

/// Try each candidate URL in order, each bounded by `timeout_ms`, until one
/// returns a success status that `parse` accepts. The last error wins.
pub async fn fetch_first<C, T, P>(
    client: &C,
    candidates: &[String],
    timeout_ms: u64,
    parse: P,
) -> Result<T, FetchError>
where
    C: HttpClient,
    P: Fn(&HttpResponse) -> Result<T, FetchError>,
{
    let mut last_error = FetchError::NoCandidates;
    for url in candidates {
        let attempt = with_timeout(client.get(url), timeout_ms).await.and_then(|response| {
            if response.is_success() {
                parse(&response)
            } else {
                Err(FetchError::Status(response.status))
            }
        });
        match attempt {
            Ok(value) => return Ok(value),
            Err(err) => {
                tracing::debug!(%url, %err, "candidate failed");
                last_error = err;
            }
        }
    }
    Err(last_error)
}
