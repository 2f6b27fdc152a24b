// src/github/types.rs
// =============================================================================
// Typed views of the GitHub JSON we consume.
//
// Only fields we actually read are declared. serde ignores the rest of the
// (very large) payloads, and a missing required field fails deserialization
// right here at the boundary instead of leaking an empty value downstream.
//
// Also holds RepoRef, the "owner/repo" pair used to name a scan target.
// =============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

use super::GitHubError;

/// One item from `GET /users/{owner}/repos`
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
}

/// `type` of a contents entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Submodule,
    #[serde(other)]
    Other,
}

/// One item from `GET /repos/{owner}/{repo}/contents[/{path}]`
#[derive(Debug, Clone, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// API URL of this entry, used to list a directory's children
    #[serde(default)]
    pub url: Option<String>,
    /// Raw content URL; null for directories
    #[serde(default)]
    pub download_url: Option<String>,
}

impl ContentEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// Repository-relative path, falling back to the bare name
    pub fn repo_path(&self) -> &str {
        self.path.as_deref().unwrap_or(&self.name)
    }
}

pub fn parse_repositories(value: Value) -> Result<Vec<Repository>, GitHubError> {
    serde_json::from_value(value).map_err(|source| GitHubError::Schema {
        what: "repository list",
        source,
    })
}

pub fn parse_contents(value: Value) -> Result<Vec<ContentEntry>, GitHubError> {
    serde_json::from_value(value).map_err(|source| GitHubError::Schema {
        what: "contents listing",
        source,
    })
}

/// An "owner/repo" pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid repository reference '{0}' (expected OWNER/REPO or a github.com URL)")]
pub struct InvalidRepoRef(pub String);

impl FromStr for RepoRef {
    type Err = InvalidRepoRef;

    // Accepts:
    //   owner/repo
    //   https://github.com/owner/repo
    //   github.com/owner/repo.git
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input
            .trim()
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_start_matches("www.");

        let path = trimmed.strip_prefix("github.com/").unwrap_or(trimmed);

        let mut parts = path.split('/').filter(|p| !p.is_empty());
        let owner = parts.next();
        let repo = parts.next().map(|r| r.trim_end_matches(".git"));

        // GitHub owners never contain '.', so "gitlab.com/..." is another host
        match (owner, repo) {
            (Some(owner), Some(repo))
                if !repo.is_empty() && !owner.contains(['.', ':']) =>
            {
                Ok(RepoRef::new(owner, repo))
            }
            _ => Err(InvalidRepoRef(input.to_string())),
        }
    }
}
