// src/pipeline.rs
// =============================================================================
// The whole job, start to finish:
//
//   repositories -> directories -> located files -> (downloads) -> records
//                -> sorted manifest -> file
//
// Everything runs sequentially on one task. The only fan-out is the paired
// download of a directory's code and description file in content mode.
//
// Failure policy:
// - a rate limit aborts the run (every later call would fail too)
// - any other error while inspecting one repository or directory is logged
//   and that repository/directory is skipped
// - no repositories, or no records at the end, fails the run before
//   anything is written
//
// Rust concepts:
// - Generics with trait bounds: `A: GitHubApi + ?Sized` lets the same code
//   run against the real client or an in-memory fake
// - match guards: `Err(e) if e.is_rate_limited()` picks out one error kind
// - slice::chunks: splits the directory list into fixed-size batches
// =============================================================================

use std::path::PathBuf;

use anyhow::{bail, Result};
use futures::future::join;
use tracing::{debug, info, warn};

use crate::config::{Config, ScanTarget};
use crate::github::{ContentEntry, GitHubApi, GitHubError, RepoRef};
use crate::manifest::{
    normalize_title, problem_number, write_manifest, Manifest, ManifestBuilder, OutputMode,
    ProblemRecord, RecordBody,
};
use crate::scan::{directories, list_directory, list_entry, list_repositories, locate};

/// One repository to scan, with the platform tag its records get
#[derive(Debug, Clone)]
struct Source {
    repo: RepoRef,
    platform: String,
}

/// What a successful run reports back
#[derive(Debug)]
pub struct RunReport {
    pub output: PathBuf,
    pub count: usize,
    pub bytes: usize,
    pub api_calls: usize,
    pub platforms: Vec<String>,
}

// Collects records and writes the manifest
//
// Returns Err (and writes nothing) when the scan comes up empty.
pub async fn run<A>(api: &A, config: &Config) -> Result<RunReport>
where
    A: GitHubApi + ?Sized,
{
    let manifest = collect(api, config).await?;
    let bytes = write_manifest(&config.output, &manifest)?;

    Ok(RunReport {
        output: config.output.clone(),
        count: manifest.count,
        bytes,
        api_calls: api.calls_made(),
        platforms: manifest.platforms().into_iter().map(String::from).collect(),
    })
}

pub async fn collect<A>(api: &A, config: &Config) -> Result<Manifest>
where
    A: GitHubApi + ?Sized,
{
    let sources = resolve_sources(api, config).await?;
    let mut builder = ManifestBuilder::new();

    for source in &sources {
        info!(repo = %source.repo, platform = %source.platform, "Processing repository");

        // Polite crawling: small delay before every request burst
        tokio::time::sleep(config.pacing.directory_delay).await;

        let dirs = match list_directory(api, &source.repo, "").await {
            Ok(Some(entries)) => directories(entries),
            Ok(None) => {
                warn!(repo = %source.repo, "Could not fetch repository contents");
                continue;
            }
            Err(e) if e.is_rate_limited() => return Err(e.into()),
            Err(e) => {
                warn!(repo = %source.repo, error = %e, "Error processing repository");
                continue;
            }
        };
        info!(repo = %source.repo, "Found {} directories", dirs.len());

        scan_directories(api, config, source, &dirs, &mut builder).await?;
        debug!("{} records so far", builder.len());
    }

    builder.finish(config.sort)
}

async fn resolve_sources<A>(api: &A, config: &Config) -> Result<Vec<Source>>
where
    A: GitHubApi + ?Sized,
{
    match &config.target {
        ScanTarget::Repository { repo, platform } => Ok(vec![Source {
            repo: repo.clone(),
            platform: platform.clone(),
        }]),
        ScanTarget::User { owner, filter } => {
            info!(%owner, "Fetching repositories");
            let repos = list_repositories(api, owner).await?;
            if repos.is_empty() {
                bail!("No repositories found for user '{}'", owner);
            }
            info!("Found {} repositories", repos.len());

            let selected = filter.select(repos);
            if selected.is_empty() {
                bail!("No repositories of '{}' matched the name filter", owner);
            }
            info!("{} repositories matched the filter", selected.len());

            Ok(selected
                .into_iter()
                .map(|(r, platform)| Source {
                    repo: RepoRef::new(owner.clone(), r.name),
                    platform,
                })
                .collect())
        }
    }
}

async fn scan_directories<A>(
    api: &A,
    config: &Config,
    source: &Source,
    dirs: &[ContentEntry],
    builder: &mut ManifestBuilder,
) -> Result<()>
where
    A: GitHubApi + ?Sized,
{
    let pacing = &config.pacing;
    let total = dirs.len();

    // chunks() yields slices of at most batch_size directories, in order
    for (batch_no, batch) in dirs.chunks(pacing.batch_size).enumerate() {
        // Longer pause between batches (not before the first one)
        if batch_no > 0 {
            tokio::time::sleep(pacing.batch_pause).await;
        }

        for (i, dir) in batch.iter().enumerate() {
            let position = batch_no * pacing.batch_size + i + 1;
            debug!("Scanning {}/{}: {}", position, total, dir.name);
            tokio::time::sleep(pacing.directory_delay).await;

            match inspect_directory(api, config, source, dir).await {
                Ok(Some(record)) => {
                    info!("  ✓ {}", record.title);
                    builder.push(record);
                }
                Ok(None) => debug!(dir = %dir.name, "No code file, skipping"),
                Err(e) if e.is_rate_limited() => return Err(e.into()),
                Err(e) => warn!(dir = %dir.name, error = %e, "Error processing directory"),
            }
        }
    }

    Ok(())
}

// Turns one directory into a record, or None if it has no code file
async fn inspect_directory<A>(
    api: &A,
    config: &Config,
    source: &Source,
    dir: &ContentEntry,
) -> Result<Option<ProblemRecord>, GitHubError>
where
    A: GitHubApi + ?Sized,
{
    let listing = match list_entry(api, &source.repo, dir).await? {
        Some(listing) => listing,
        None => return Ok(None),
    };

    let found = match locate(&listing, &config.locator) {
        Some(found) => found,
        None => return Ok(None),
    };

    // A code file we cannot link to or download is as good as no code file,
    // in either output mode
    let code_url = match found.code.download_url.as_deref() {
        Some(url) => url,
        None => {
            warn!(dir = %dir.name, file = %found.code.name, "Code file has no download URL");
            return Ok(None);
        }
    };
    let description_url = found.description.and_then(|d| d.download_url.as_deref());

    let body = match config.mode {
        OutputMode::Links => RecordBody::Links {
            sql_url: code_url.to_string(),
            readme_url: description_url.map(String::from),
        },
        OutputMode::Content => {
            // Both downloads run at once; join waits for the pair
            let (sql_code, description) =
                join(download(api, Some(code_url)), download(api, description_url)).await;
            RecordBody::Content {
                sql_code,
                description,
            }
        }
    };

    Ok(Some(ProblemRecord {
        platform: source.platform.clone(),
        title: normalize_title(&dir.name, config.titles),
        number: problem_number(&dir.name),
        repo: source.repo.name.clone(),
        folder_name: dir.name.clone(),
        path: dir.repo_path().to_string(),
        sql_file_name: found.code.name.clone(),
        body,
        tags: config.tags.clone(),
    }))
}

async fn download<A>(api: &A, url: Option<&str>) -> Option<String>
where
    A: GitHubApi + ?Sized,
{
    match url {
        Some(url) => api.fetch_raw(url).await,
        None => None,
    }
}
