// src/github/error.rs
// =============================================================================
// Error types for talking to the GitHub REST API.
//
// Not every bad response is an error:
// - 404 is "resource absent" and shows up as Ok(None) from the client
// - everything listed here is a real failure for that call
//
// Only transport problems (timeouts, dropped connections) are worth retrying.
// A rate limit will not lift until its reset time, and a malformed body will
// be just as malformed on the next attempt.
// =============================================================================

use reqwest::StatusCode;
use thiserror::Error;

use super::retry::Transient;

#[derive(Debug, Error)]
pub enum GitHubError {
    /// 403/429 from the API. `reset` is already formatted for humans.
    #[error("GitHub API rate limit exceeded, resets at {reset}")]
    RateLimited { reset: String },

    /// Any other non-200, non-404 status
    #[error("HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },

    /// DNS, connect, timeout, connection reset
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// 200 with a body that is not JSON
    #[error("invalid JSON response from {url}: {source}")]
    MalformedBody {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON that is missing fields we rely on
    #[error("unexpected {what} payload: {source}")]
    Schema {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid API URL '{0}'")]
    InvalidUrl(String),
}

impl GitHubError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, GitHubError::RateLimited { .. })
    }
}

impl Transient for GitHubError {
    fn is_transient(&self) -> bool {
        matches!(self, GitHubError::Transport(_))
    }
}
