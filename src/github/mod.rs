// src/github/mod.rs
// =============================================================================
// This module talks to GitHub.
//
// Submodules:
// - client: authenticated REST API client (status mapping, rate limits)
// - fetch: raw file downloads that treat failure as "no content"
// - retry: generic retry-with-linear-backoff helper
// - types: typed JSON shapes (repository, contents entry) and RepoRef
// - error: GitHubError
//
// The rest of the crate only sees the GitHubApi trait, so the scanner and
// pipeline can be tested against canned JSON without touching the network.
// =============================================================================

mod client;
mod error;
mod fetch;
pub mod retry;
mod types;

use async_trait::async_trait;
use serde_json::Value;

pub use client::{GitHubClient, DEFAULT_API_BASE};
pub use error::GitHubError;
pub use retry::RetryPolicy;
pub use types::{
    parse_contents, parse_repositories, ContentEntry, InvalidRepoRef, RepoRef, Repository,
};

#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// GET an API path (or full API URL). `Ok(None)` means 404.
    async fn get_json(&self, path_or_url: &str) -> Result<Option<Value>, GitHubError>;

    /// Download a raw file. `None` means the content is unavailable.
    async fn fetch_raw(&self, url: &str) -> Option<String>;

    /// Number of API requests issued so far
    fn calls_made(&self) -> usize;
}
