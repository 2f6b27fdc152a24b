// src/config.rs
// =============================================================================
// Run configuration, built once from the parsed CLI and passed by reference
// to every stage of the pipeline. Nothing here is global.
//
// This is also where subcommand-specific defaults are filled in:
//
//                 repo               user
//   mode          links              content
//   titles        folder-title-case  title-case
//   sort          title              platform-title
//   output        problems.json      questions.json
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::cli::{Commands, ScanOptions};
use crate::github::{InvalidRepoRef, RepoRef, RetryPolicy};
use crate::manifest::{OutputMode, SortKey, TitleStyle};
use crate::scan::{LocatorRules, RepoFilter};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GITHUB_TOKEN environment variable is not set (required by --require-token)")]
    MissingToken,

    #[error(transparent)]
    InvalidRepo(#[from] InvalidRepoRef),

    #[error("invalid GitHub user '{0}'")]
    InvalidOwner(String),

    #[error("--batch-size must be at least 1")]
    ZeroBatchSize,
}

/// What to scan
#[derive(Debug, Clone)]
pub enum ScanTarget {
    /// One named repository; every record gets `platform`
    Repository { repo: RepoRef, platform: String },
    /// All of a user's repositories that pass `filter`
    User { owner: String, filter: RepoFilter },
}

/// Sleeps that keep us under GitHub's abuse thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub directory_delay: Duration,
    pub batch_size: usize,
    pub batch_pause: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            directory_delay: Duration::from_millis(100),
            batch_size: 10,
            batch_pause: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub target: ScanTarget,
    pub mode: OutputMode,
    pub titles: TitleStyle,
    pub sort: SortKey,
    pub locator: LocatorRules,
    pub tags: Vec<String>,
    pub pacing: Pacing,
    pub retry: RetryPolicy,
    pub timeout: Duration,
    pub token: Option<String>,
    pub api_base: String,
    pub output: PathBuf,
}

impl Config {
    pub fn from_command(command: Commands) -> Result<Self, ConfigError> {
        match command {
            Commands::Repo {
                repo,
                platform,
                options,
            } => {
                let repo: RepoRef = repo.parse()?;
                let platform = platform.unwrap_or_else(|| repo.name.clone());
                Self::build(
                    ScanTarget::Repository { repo, platform },
                    options,
                    Defaults {
                        mode: OutputMode::Links,
                        titles: TitleStyle::FolderTitleCase,
                        sort: SortKey::Title,
                        output: "problems.json",
                    },
                )
            }
            Commands::User {
                owner,
                required,
                platforms,
                options,
            } => Self::build(
                ScanTarget::User {
                    owner: validate_owner(owner)?,
                    filter: RepoFilter::new(required, platforms),
                },
                options,
                Defaults {
                    mode: OutputMode::Content,
                    titles: TitleStyle::TitleCase,
                    sort: SortKey::PlatformTitle,
                    output: "questions.json",
                },
            ),
        }
    }

    fn build(target: ScanTarget, o: ScanOptions, d: Defaults) -> Result<Self, ConfigError> {
        let token = o.token.filter(|t| !t.trim().is_empty());
        if o.require_token && token.is_none() {
            return Err(ConfigError::MissingToken);
        }

        if o.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }

        Ok(Self {
            target,
            mode: o.mode.unwrap_or(d.mode),
            titles: o.titles.unwrap_or(d.titles),
            sort: o.sort.unwrap_or(d.sort),
            locator: LocatorRules::new(&o.extension, &o.readme_names),
            tags: o.tags,
            pacing: Pacing {
                directory_delay: Duration::from_millis(o.delay_ms),
                batch_size: o.batch_size,
                batch_pause: Duration::from_millis(o.batch_pause_ms),
            },
            retry: RetryPolicy::new(o.retries, Duration::from_millis(o.retry_delay_ms)),
            timeout: Duration::from_secs(o.timeout_secs),
            token,
            api_base: o.api_base,
            output: o.output.unwrap_or_else(|| PathBuf::from(d.output)),
        })
    }
}

// The owner is spliced into /users/{owner}/repos, so anything that could
// change the path (or query) is refused
fn validate_owner(owner: String) -> Result<String, ConfigError> {
    let trimmed = owner.trim();
    if trimmed.is_empty() || trimmed.contains(['/', '?', '#', '\\']) || trimmed.contains("..") {
        return Err(ConfigError::InvalidOwner(owner));
    }
    Ok(trimmed.to_string())
}

struct Defaults {
    mode: OutputMode,
    titles: TitleStyle,
    sort: SortKey,
    output: &'static str,
}
