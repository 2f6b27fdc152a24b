// src/scan/mod.rs
// =============================================================================
// Repository discovery and directory inspection.
//
// - scanner: lists repositories / directories and filters them
// - locator: finds the code file and description file inside a directory
// =============================================================================

mod locator;
mod scanner;

pub use locator::{locate, LocatorRules};
pub use scanner::{directories, list_directory, list_entry, list_repositories, RepoFilter};
