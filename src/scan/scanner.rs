// src/scan/scanner.rs
// =============================================================================
// Lists repositories and directories, built on the GitHubApi trait.
//
// Filtering rules:
// - only `type == "dir"` entries are candidate directories
// - in user-wide scans a repository must contain every required keyword
//   and at least one platform keyword (case-insensitive substring match);
//   the first matching platform becomes the record's platform tag
// =============================================================================

use tracing::debug;

use crate::github::{
    parse_contents, parse_repositories, ContentEntry, GitHubApi, GitHubError, RepoRef, Repository,
};

// Lists all repositories of a user (first page of 100)
//
// A 404 (unknown user) comes back as an empty list.
pub async fn list_repositories<A>(api: &A, owner: &str) -> Result<Vec<Repository>, GitHubError>
where
    A: GitHubApi + ?Sized,
{
    let path = format!("/users/{}/repos?per_page=100", owner);
    match api.get_json(&path).await? {
        Some(value) => parse_repositories(value),
        None => Ok(Vec::new()),
    }
}

pub fn contents_path(repo: &RepoRef, path: &str) -> String {
    let path = path.trim_matches('/');
    if path.is_empty() {
        format!("/repos/{}/{}/contents", repo.owner, repo.name)
    } else {
        format!("/repos/{}/{}/contents/{}", repo.owner, repo.name, path)
    }
}

// Lists one directory of a repository ("" = root)
//
// Ok(None) means the directory (or repository) does not exist.
pub async fn list_directory<A>(
    api: &A,
    repo: &RepoRef,
    path: &str,
) -> Result<Option<Vec<ContentEntry>>, GitHubError>
where
    A: GitHubApi + ?Sized,
{
    fetch_listing(api, &contents_path(repo, path)).await
}

// Lists the children of an entry from a previous listing
//
// Prefers the API URL GitHub handed us; falls back to the contents path.
pub async fn list_entry<A>(
    api: &A,
    repo: &RepoRef,
    entry: &ContentEntry,
) -> Result<Option<Vec<ContentEntry>>, GitHubError>
where
    A: GitHubApi + ?Sized,
{
    let target = match &entry.url {
        Some(url) => url.clone(),
        None => contents_path(repo, entry.repo_path()),
    };
    fetch_listing(api, &target).await
}

async fn fetch_listing<A>(api: &A, target: &str) -> Result<Option<Vec<ContentEntry>>, GitHubError>
where
    A: GitHubApi + ?Sized,
{
    match api.get_json(target).await? {
        Some(value) => parse_contents(value).map(Some),
        None => {
            debug!(target, "Listing not found");
            Ok(None)
        }
    }
}

/// Keeps only directories, in listing order
pub fn directories(entries: Vec<ContentEntry>) -> Vec<ContentEntry> {
    entries.into_iter().filter(|e| e.is_dir()).collect()
}

/// Which repositories a user-wide scan keeps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoFilter {
    required: Vec<String>,
    platforms: Vec<String>,
}

impl RepoFilter {
    pub fn new<R, P>(required: R, platforms: P) -> Self
    where
        R: IntoIterator,
        R::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let lower = |s: &str| s.trim().to_lowercase();
        Self {
            required: required
                .into_iter()
                .map(|s| lower(s.as_ref()))
                .filter(|s| !s.is_empty())
                .collect(),
            platforms: platforms
                .into_iter()
                .map(|s| lower(s.as_ref()))
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Returns the platform tag if the repository passes the filter.
    ///
    /// With no platform keywords configured the repository name itself is
    /// the tag.
    pub fn platform_for(&self, repo_name: &str) -> Option<String> {
        let name = repo_name.to_lowercase();

        if !self.required.iter().all(|k| name.contains(k.as_str())) {
            return None;
        }

        if self.platforms.is_empty() {
            return Some(repo_name.to_string());
        }

        self.platforms
            .iter()
            .find(|p| name.contains(p.as_str()))
            .cloned()
    }

    /// Filters a repository list, pairing each survivor with its platform
    pub fn select(&self, repos: Vec<Repository>) -> Vec<(Repository, String)> {
        repos
            .into_iter()
            .filter_map(|r| self.platform_for(&r.name).map(|p| (r, p)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::testing::FakeGitHub;
    use serde_json::json;

    fn sql_filter() -> RepoFilter {
        RepoFilter::new(["sql"], ["leetcode", "hackerrank", "datalemur"])
    }

    #[test]
    fn test_filter_requires_keyword_and_platform() {
        let f = sql_filter();
        assert_eq!(f.platform_for("LeetCode-SQL-50"), Some("leetcode".to_string()));
        assert_eq!(f.platform_for("hackerrank_sql"), Some("hackerrank".to_string()));
        assert_eq!(f.platform_for("leetcode-python"), None);
        assert_eq!(f.platform_for("my-sql-notes"), None);
    }

    #[test]
    fn test_filter_first_platform_wins() {
        let f = sql_filter();
        assert_eq!(
            f.platform_for("datalemur-and-leetcode-sql"),
            Some("leetcode".to_string())
        );
    }

    #[test]
    fn test_filter_without_platforms_uses_repo_name() {
        let f = RepoFilter::new(["sql"], Vec::<String>::new());
        assert_eq!(f.platform_for("Oracle-SQL"), Some("Oracle-SQL".to_string()));
    }

    #[test]
    fn test_select_keeps_order() {
        let repos = vec![
            Repository { name: "leetcode-sql".into() },
            Repository { name: "dotfiles".into() },
            Repository { name: "hackerrank-sql".into() },
        ];
        let selected = sql_filter().select(repos);
        let names: Vec<_> = selected.iter().map(|(r, p)| (r.name.as_str(), p.as_str())).collect();
        assert_eq!(
            names,
            vec![("leetcode-sql", "leetcode"), ("hackerrank-sql", "hackerrank")]
        );
    }

    #[test]
    fn test_contents_path() {
        let repo = RepoRef::new("o", "r");
        assert_eq!(contents_path(&repo, ""), "/repos/o/r/contents");
        assert_eq!(contents_path(&repo, "/1-two-sum/"), "/repos/o/r/contents/1-two-sum");
    }

    #[tokio::test]
    async fn test_list_repositories_unknown_user_is_empty() {
        let api = FakeGitHub::new();
        let repos = list_repositories(&api, "ghost").await.unwrap();
        assert!(repos.is_empty());
    }

    #[tokio::test]
    async fn test_list_directory_keeps_dirs() {
        let api = FakeGitHub::new().json(
            "/repos/o/r/contents",
            json!([
                { "name": "README.md", "type": "file" },
                { "name": "1-two-sum", "type": "dir" },
                { "name": "2-add", "type": "dir" }
            ]),
        );
        let repo = RepoRef::new("o", "r");
        let entries = list_directory(&api, &repo, "").await.unwrap().unwrap();
        let dirs = directories(entries);
        let names: Vec<_> = dirs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["1-two-sum", "2-add"]);
    }

    #[tokio::test]
    async fn test_list_directory_not_found_is_none() {
        let api = FakeGitHub::new();
        let repo = RepoRef::new("o", "missing");
        assert!(list_directory(&api, &repo, "").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_entry_prefers_api_url() {
        let api = FakeGitHub::new().json("https://api.github.com/custom/url", json!([]));
        let entry: ContentEntry = serde_json::from_value(json!({
            "name": "d", "type": "dir", "url": "https://api.github.com/custom/url"
        }))
        .unwrap();
        let listing = list_entry(&api, &RepoRef::new("o", "r"), &entry).await.unwrap();
        assert!(listing.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_entry_falls_back_to_path() {
        let api = FakeGitHub::new().json("/repos/o/r/contents/nested/d", json!([]));
        let entry: ContentEntry = serde_json::from_value(json!({
            "name": "d", "path": "nested/d", "type": "dir"
        }))
        .unwrap();
        let listing = list_entry(&api, &RepoRef::new("o", "r"), &entry).await.unwrap();
        assert!(listing.is_some());
    }
}
