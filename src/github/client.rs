// src/github/client.rs
// =============================================================================
// Authenticated client for the GitHub REST API (v3).
//
// Contract of `get`:
// - 200          -> Ok(Some(json))
// - 404          -> Ok(None)          the resource is simply absent
// - 403 / 429    -> Err(RateLimited)  with the reset time from the headers
// - other status -> Err(Http)         with status code and body
// - transport    -> retried with linear backoff, then Err(Transport)
//
// Every call is a fresh round trip. Nothing is cached.
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::fetch::fetch_raw;
use super::retry::{retry_with_backoff, RetryPolicy};
use super::{GitHubApi, GitHubError};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("sql-manifest/", env!("CARGO_PKG_VERSION"));
const ACCEPT_JSON: &str = "application/vnd.github.v3+json";

/// Warn once the remaining quota drops below this
const RATE_LIMIT_LOW_WATER: u64 = 10;

pub struct GitHubClient {
    http: Client,
    api_base: String,
    token: Option<String>,
    retry: RetryPolicy,
    calls: AtomicUsize,
}

impl GitHubClient {
    pub fn new(
        api_base: &str,
        token: Option<String>,
        retry: RetryPolicy,
        timeout: Duration,
    ) -> Result<Self, GitHubError> {
        // One client for all requests (connection pooling)
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            token,
            retry,
            calls: AtomicUsize::new(0),
        })
    }

    /// GET with the client's default retry policy
    pub async fn get(&self, path_or_url: &str) -> Result<Option<Value>, GitHubError> {
        self.get_with_retries(path_or_url, self.retry).await
    }

    pub async fn get_with_retries(
        &self,
        path_or_url: &str,
        retry: RetryPolicy,
    ) -> Result<Option<Value>, GitHubError> {
        let url = resolve_url(&self.api_base, path_or_url)?;
        retry_with_backoff(retry, || self.get_once(&url)).await
    }

    async fn get_once(&self, url: &Url) -> Result<Option<Value>, GitHubError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        debug!(%url, "GET");

        let mut request = self.http.get(url.clone()).header(ACCEPT, ACCEPT_JSON);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();

        if let Some(remaining) = remaining_quota(&headers) {
            if remaining < RATE_LIMIT_LOW_WATER {
                warn!(
                    remaining,
                    reset = %reset_time(&headers),
                    "GitHub API rate limit nearly exhausted"
                );
            }
        }

        let body = response.text().await?;
        interpret_response(url.as_str(), status, &headers, &body)
    }

    pub fn calls_made(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn get_json(&self, path_or_url: &str) -> Result<Option<Value>, GitHubError> {
        self.get(path_or_url).await
    }

    async fn fetch_raw(&self, url: &str) -> Option<String> {
        fetch_raw(&self.http, url).await
    }

    fn calls_made(&self) -> usize {
        GitHubClient::calls_made(self)
    }
}

/// Full URLs pass through; anything else is a path on the API host.
fn resolve_url(api_base: &str, path_or_url: &str) -> Result<Url, GitHubError> {
    let raw = if path_or_url.starts_with("https://") || path_or_url.starts_with("http://") {
        path_or_url.to_string()
    } else {
        format!("{}/{}", api_base, path_or_url.trim_start_matches('/'))
    };

    Url::parse(&raw).map_err(|_| GitHubError::InvalidUrl(raw))
}

/// Maps a finished response onto the client contract (see top of file).
fn interpret_response(
    url: &str,
    status: StatusCode,
    headers: &HeaderMap,
    body: &str,
) -> Result<Option<Value>, GitHubError> {
    match status {
        StatusCode::OK => serde_json::from_str(body)
            .map(Some)
            .map_err(|source| GitHubError::MalformedBody {
                url: url.to_string(),
                source,
            }),
        StatusCode::NOT_FOUND => Ok(None),
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => Err(GitHubError::RateLimited {
            reset: reset_time(headers),
        }),
        _ => Err(GitHubError::Http {
            status,
            body: body.to_string(),
        }),
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

fn remaining_quota(headers: &HeaderMap) -> Option<u64> {
    header_u64(headers, "x-ratelimit-remaining")
}

/// `x-ratelimit-reset` is a Unix epoch in seconds.
fn reset_time(headers: &HeaderMap) -> String {
    header_u64(headers, "x-ratelimit-reset")
        .and_then(|secs| i64::try_from(secs).ok())
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
