// src/manifest/title.rs
// =============================================================================
// Turns directory names into display titles.
//
//   folder            "1-two_sum"  -> "two sum"
//   title-case        "1-two_sum"  -> "1 Two Sum"
//   folder-title-case "1-two_sum"  -> "Two Sum"
//
// All rules are pure and ASCII-only: a "word character" is [A-Za-z0-9_].
// =============================================================================

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TitleStyle {
    /// Strip a leading problem number, separators become spaces
    Folder,
    /// Separators become spaces, every word capitalized
    TitleCase,
    /// Both of the above
    FolderTitleCase,
}

pub fn normalize_title(raw: &str, style: TitleStyle) -> String {
    match style {
        TitleStyle::Folder => folder_title(raw),
        TitleStyle::TitleCase => title_case(raw),
        TitleStyle::FolderTitleCase => title_case(&folder_title(raw)),
    }
}

/// Leading digits of a folder name ("1" for "1-two-sum")
pub fn problem_number(raw: &str) -> Option<String> {
    let digits: String = raw.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}

pub fn folder_title(raw: &str) -> String {
    replace_separators(strip_number_prefix(raw)).trim().to_string()
}

pub fn title_case(raw: &str) -> String {
    let spaced = replace_separators(raw);
    let mut out = String::with_capacity(spaced.len());
    let mut prev_is_word = false;

    for c in spaced.chars() {
        let is_word = c.is_ascii_alphanumeric() || c == '_';
        if is_word && !prev_is_word {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        prev_is_word = is_word;
    }

    out.trim().to_string()
}

// "12-", "12.", "12_" plus any following whitespace. Bare digits stay.
fn strip_number_prefix(raw: &str) -> &str {
    let digits = raw.len() - raw.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return raw;
    }

    let rest = &raw[digits..];
    match rest.chars().next() {
        Some('-' | '.' | '_') => rest[1..].trim_start(),
        _ => raw,
    }
}

fn replace_separators(raw: &str) -> String {
    raw.replace(['-', '_'], " ")
}
