// src/scan/locator.rs
// =============================================================================
// Picks the interesting files out of one directory listing.
//
// - code file: first file whose lowercased name ends with the extension
// - description file: first file whose lowercased name is one of the
//   accepted README names
//
// No code file means no record for this directory. A missing description
// is fine.
// =============================================================================

use crate::github::ContentEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorRules {
    /// Lowercase, including the dot (".sql")
    pub code_extension: String,
    /// Lowercase file names ("readme.md", "read.me")
    pub description_names: Vec<String>,
}

impl Default for LocatorRules {
    fn default() -> Self {
        Self::new(".sql", ["readme.md", "read.me"])
    }
}

impl LocatorRules {
    pub fn new<I, S>(code_extension: &str, description_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ext = code_extension.trim().to_lowercase();
        let code_extension = if ext.starts_with('.') {
            ext
        } else {
            format!(".{}", ext)
        };

        Self {
            code_extension,
            description_names: description_names
                .into_iter()
                .map(|n| n.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    fn is_code(&self, name: &str) -> bool {
        name.to_lowercase().ends_with(&self.code_extension)
    }

    fn is_description(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.description_names.iter().any(|n| *n == lower)
    }
}

/// What the locator found in one directory
#[derive(Debug, Clone, Copy)]
pub struct Artifacts<'a> {
    pub code: &'a ContentEntry,
    pub description: Option<&'a ContentEntry>,
}

pub fn locate<'a>(entries: &'a [ContentEntry], rules: &LocatorRules) -> Option<Artifacts<'a>> {
    let files = || entries.iter().filter(|e| e.is_file());

    let code = files().find(|e| rules.is_code(&e.name))?;
    let description = files().find(|e| rules.is_description(&e.name));

    Some(Artifacts { code, description })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::parse_contents;
    use serde_json::json;

    fn listing(files: &[(&str, &str)]) -> Vec<ContentEntry> {
        let items: Vec<_> = files
            .iter()
            .map(|(name, kind)| {
                json!({
                    "name": name,
                    "type": kind,
                    "download_url": format!("https://raw.example/{}", name),
                })
            })
            .collect();
        parse_contents(json!(items)).unwrap()
    }

    #[test]
    fn test_code_and_description_found() {
        let entries = listing(&[("README.md", "file"), ("solution.sql", "file")]);
        let found = locate(&entries, &LocatorRules::default()).unwrap();
        assert_eq!(found.code.name, "solution.sql");
        assert_eq!(found.description.unwrap().name, "README.md");
    }

    #[test]
    fn test_missing_description_is_tolerated() {
        let entries = listing(&[("query.SQL", "file"), ("notes.txt", "file")]);
        let found = locate(&entries, &LocatorRules::default()).unwrap();
        assert_eq!(found.code.name, "query.SQL");
        assert!(found.description.is_none());
    }

    #[test]
    fn test_no_code_file_means_no_artifacts() {
        let entries = listing(&[("README.md", "file"), ("notes.txt", "file")]);
        assert!(locate(&entries, &LocatorRules::default()).is_none());
        assert!(locate(&[], &LocatorRules::default()).is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let entries = listing(&[
            ("a.sql", "file"),
            ("read.me", "file"),
            ("b.sql", "file"),
            ("README.md", "file"),
        ]);
        let found = locate(&entries, &LocatorRules::default()).unwrap();
        assert_eq!(found.code.name, "a.sql");
        assert_eq!(found.description.unwrap().name, "read.me");
    }

    #[test]
    fn test_directories_are_not_files() {
        let entries = listing(&[("archive.sql", "dir"), ("README.md", "file")]);
        assert!(locate(&entries, &LocatorRules::default()).is_none());
    }

    #[test]
    fn test_description_needs_exact_name() {
        let entries = listing(&[("x.sql", "file"), ("README.md.bak", "file")]);
        let found = locate(&entries, &LocatorRules::default()).unwrap();
        assert!(found.description.is_none());
    }

    #[test]
    fn test_rules_normalize_extension() {
        let rules = LocatorRules::new("PY", ["Readme.MD"]);
        assert_eq!(rules.code_extension, ".py");
        assert_eq!(rules.description_names, vec!["readme.md".to_string()]);
    }
}
