// src/manifest/mod.rs
// =============================================================================
// Everything about the output file.
//
// Submodules:
// - title: directory name -> display title
// - record: ProblemRecord / Manifest and their JSON shape
// - builder: accumulate, sort, write
// =============================================================================

mod builder;
mod record;
mod title;

pub use builder::{write_manifest, ManifestBuilder, SortKey};
pub use record::{Manifest, OutputMode, ProblemRecord, RecordBody};
pub use title::{normalize_title, problem_number, TitleStyle};
