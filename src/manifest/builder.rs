// src/manifest/builder.rs
// =============================================================================
// Collects records, sorts them, and writes the manifest file.
//
// - sorting is by platform then title, or by title alone (plain byte-wise
//   string comparison, stable)
// - an empty result is an error, and nothing is written in that case
// - the output file is replaced wholesale on every run
// =============================================================================

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::ValueEnum;

use super::record::{Manifest, ProblemRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    PlatformTitle,
    Title,
}

#[derive(Debug, Default)]
pub struct ManifestBuilder {
    records: Vec<ProblemRecord>,
}

impl ManifestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ProblemRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorts and stamps the manifest. Fails if no record was collected.
    pub fn finish(mut self, sort: SortKey) -> Result<Manifest> {
        if self.is_empty() {
            bail!("No matching directories found; refusing to write an empty manifest");
        }

        sort_records(&mut self.records, sort);
        Ok(Manifest::new(self.records))
    }
}

pub fn sort_records(records: &mut [ProblemRecord], sort: SortKey) {
    match sort {
        SortKey::PlatformTitle => records.sort_by(|a, b| {
            a.platform
                .cmp(&b.platform)
                .then_with(|| a.title.cmp(&b.title))
        }),
        SortKey::Title => records.sort_by(|a, b| a.title.cmp(&b.title)),
    }
}

// Writes the manifest as pretty-printed JSON, replacing any existing file
//
// Returns the number of bytes written.
pub fn write_manifest(path: &Path, manifest: &Manifest) -> Result<usize> {
    let mut json = serde_json::to_string_pretty(manifest).context("Failed to serialize manifest")?;
    json.push('\n');

    std::fs::write(path, &json)
        .with_context(|| format!("Failed to write manifest to {}", path.display()))?;

    Ok(json.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::RecordBody;

    fn rec(platform: &str, title: &str) -> ProblemRecord {
        ProblemRecord {
            platform: platform.into(),
            title: title.into(),
            number: None,
            repo: "r".into(),
            folder_name: title.into(),
            path: title.into(),
            sql_file_name: "q.sql".into(),
            body: RecordBody::Links {
                sql_url: format!("https://raw/{}.sql", title),
                readme_url: None,
            },
            tags: vec![],
        }
    }

    fn keys(records: &[ProblemRecord]) -> Vec<(&str, &str)> {
        records
            .iter()
            .map(|r| (r.platform.as_str(), r.title.as_str()))
            .collect()
    }

    #[test]
    fn test_sort_platform_then_title() {
        let mut records = vec![rec("b", "Zebra"), rec("a", "Apple")];
        sort_records(&mut records, SortKey::PlatformTitle);
        assert_eq!(keys(&records), vec![("a", "Apple"), ("b", "Zebra")]);

        let mut records = vec![rec("b", "Apple"), rec("a", "Zebra"), rec("a", "Mango")];
        sort_records(&mut records, SortKey::PlatformTitle);
        assert_eq!(keys(&records), vec![("a", "Mango"), ("a", "Zebra"), ("b", "Apple")]);
    }

    #[test]
    fn test_sort_title_only_is_stable() {
        let mut records = vec![rec("z", "Same"), rec("a", "Other"), rec("m", "Same")];
        sort_records(&mut records, SortKey::Title);
        assert_eq!(keys(&records), vec![("a", "Other"), ("z", "Same"), ("m", "Same")]);
    }

    #[test]
    fn test_empty_builder_fails() {
        let builder = ManifestBuilder::new();
        assert!(builder.is_empty());
        assert!(builder.finish(SortKey::Title).is_err());
    }

    #[test]
    fn test_finish_sorts_and_counts() {
        let mut builder = ManifestBuilder::new();
        builder.push(rec("b", "Zebra"));
        builder.push(rec("a", "Apple"));
        assert_eq!(builder.len(), 2);

        let manifest = builder.finish(SortKey::PlatformTitle).unwrap();
        assert_eq!(manifest.count, 2);
        assert_eq!(manifest.problems[0].title, "Apple");
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("problems.json");
        std::fs::write(&path, "old contents that are much longer than needed").unwrap();

        let manifest = Manifest::new(vec![rec("a", "Apple")]);
        let written = write_manifest(&path, &manifest).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.len(), written);
        assert!(!text.contains("old contents"));

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["problems"][0]["title"], "Apple");
        assert!(value["generated"].is_string());
    }
}
