// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands, one per scan shape:
// - repo: scan the top-level directories of one repository
// - user: scan every repository of a user that passes a keyword filter
//
// Both share the ScanOptions flags. Flags whose default depends on the
// subcommand (mode, titles, sort, output) are Option<...> here and get their
// defaults in config.rs.
// =============================================================================

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::github::DEFAULT_API_BASE;
use crate::manifest::{OutputMode, SortKey, TitleStyle};

#[derive(Parser, Debug)]
#[command(
    name = "sql-manifest",
    version,
    about = "Index SQL practice repositories on GitHub into a static JSON manifest",
    long_about = "sql-manifest walks GitHub repositories, finds directories that hold a SQL \
                  solution (and usually a README), and writes one JSON file describing them. \
                  The file is rebuilt from scratch on every run."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan one repository's top-level directories
    ///
    /// Example: sql-manifest repo vikasvooradi/leetcode-oracle
    Repo {
        /// Repository as OWNER/REPO or https://github.com/OWNER/REPO
        repo: String,

        /// Platform tag for every record (defaults to the repository name)
        #[arg(long)]
        platform: Option<String>,

        #[command(flatten)]
        options: ScanOptions,
    },

    /// Scan all matching repositories of a user
    ///
    /// Example: sql-manifest user vikasvooradi --platform leetcode,hackerrank
    User {
        /// GitHub user name
        owner: String,

        /// Keywords a repository name must all contain
        #[arg(long = "require", value_delimiter = ',', default_values_t = ["sql".to_string()])]
        required: Vec<String>,

        /// Platform keywords; a repository name must contain at least one
        #[arg(
            long = "platform",
            value_delimiter = ',',
            default_values_t = [
                "leetcode".to_string(),
                "hackerrank".to_string(),
                "codechef".to_string(),
                "codewars".to_string(),
                "lintcode".to_string(),
                "datalemur".to_string(),
            ]
        )]
        platforms: Vec<String>,

        #[command(flatten)]
        options: ScanOptions,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ScanOptions {
    /// Where to write the manifest [default: problems.json for repo, questions.json for user]
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Store download links or embed file contents [default: links for repo, content for user]
    #[arg(long, value_enum)]
    pub mode: Option<OutputMode>,

    /// How directory names become titles [default: folder-title-case for repo, title-case for user]
    #[arg(long, value_enum)]
    pub titles: Option<TitleStyle>,

    /// Sort order of the records [default: title for repo, platform-title for user]
    #[arg(long, value_enum)]
    pub sort: Option<SortKey>,

    /// Extension of the code file
    #[arg(long, default_value = ".sql")]
    pub extension: String,

    /// Accepted description file names (case-insensitive)
    #[arg(
        long = "readme-name",
        default_values_t = ["readme.md".to_string(), "read.me".to_string()]
    )]
    pub readme_names: Vec<String>,

    /// Label attached to every record (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Pause before each directory inspection, in milliseconds
    #[arg(long, default_value_t = 100)]
    pub delay_ms: u64,

    /// Directories per batch
    #[arg(long, default_value_t = 10)]
    pub batch_size: usize,

    /// Extra pause between batches, in milliseconds
    #[arg(long, default_value_t = 500)]
    pub batch_pause_ms: u64,

    /// Attempts per API request on network errors
    #[arg(long, default_value_t = 3)]
    pub retries: u32,

    /// Base delay for retry backoff, in milliseconds (attempt N waits N * base)
    #[arg(long, default_value_t = 1000)]
    pub retry_delay_ms: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// GitHub token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Fail instead of running unauthenticated when no token is set
    #[arg(long)]
    pub require_token: bool,

    /// GitHub API base URL (for GitHub Enterprise)
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,
}
