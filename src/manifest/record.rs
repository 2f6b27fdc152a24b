// src/manifest/record.rs
// =============================================================================
// The output unit (one record per qualifying directory) and the manifest.
//
// Field order here is the key order in the JSON file.
// =============================================================================

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

/// What a record carries for the code and description files
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Download URLs only
    Links,
    /// File contents embedded inline
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RecordBody {
    #[serde(rename_all = "camelCase")]
    Links {
        sql_url: String,
        readme_url: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Content {
        sql_code: Option<String>,
        description: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemRecord {
    pub platform: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    pub repo: String,
    pub folder_name: String,
    pub path: String,
    pub sql_file_name: String,
    #[serde(flatten)]
    pub body: RecordBody,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub generated: DateTime<Utc>,
    pub count: usize,
    pub problems: Vec<ProblemRecord>,
}

impl Manifest {
    pub fn new(problems: Vec<ProblemRecord>) -> Self {
        Self {
            generated: Utc::now(),
            count: problems.len(),
            problems,
        }
    }

    /// Distinct platforms, in manifest order
    pub fn platforms(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for p in &self.problems {
            if !seen.contains(&p.platform.as_str()) {
                seen.push(&p.platform);
            }
        }
        seen
    }
}
