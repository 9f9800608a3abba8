//! Delimited catalog parser.
//!
//! The catalog format is line oriented:
//!
//! ```text
//! ###Animals
//! canis;dog
//! felis;cat
//! ```
//!
//! A `###` line opens a group, every other non-blank line is split on `;`
//! into front and back. Lines with fewer than two fields are dropped.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::{VocabularyEntry, DEFAULT_GROUP};

const GROUP_MARKER: &str = "###";
const FIELD_SEPARATOR: char = ';';

/// Result of parsing a catalog, including the lines that were skipped.
#[derive(Debug, Clone, Default)]
pub struct ParsedCatalog {
    /// Entries in file order.
    pub entries: Vec<VocabularyEntry>,
    /// 1-based line numbers of non-blank lines that were not entries or headers.
    pub dropped_lines: Vec<usize>,
}

/// Parse catalog text into entries, silently dropping malformed lines.
pub fn parse_catalog(content: &str) -> Vec<VocabularyEntry> {
    parse_catalog_detailed(content).entries
}

/// Parse catalog text and keep track of the lines that were dropped.
pub fn parse_catalog_detailed(content: &str) -> ParsedCatalog {
    let mut parsed = ParsedCatalog::default();
    let mut current_group = DEFAULT_GROUP.to_string();

    for (idx, raw) in content.split('\n').enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix(GROUP_MARKER) {
            current_group = header.trim().to_string();
            continue;
        }

        let mut fields = line.split(FIELD_SEPARATOR);
        match (fields.next(), fields.next()) {
            (Some(front), Some(back)) => parsed.entries.push(VocabularyEntry {
                group: current_group.clone(),
                front: front.to_string(),
                back: back.to_string(),
            }),
            _ => parsed.dropped_lines.push(idx + 1),
        }
    }

    parsed
}

/// Read and parse a catalog file from disk.
pub fn parse_catalog_file(path: &Path) -> Result<ParsedCatalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;
    Ok(parse_catalog_detailed(&content))
}

/// A warning from catalog validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based source line, when the warning is tied to one.
    pub line: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Check a parsed catalog for data-quality issues.
///
/// Duplicate fronts share a single progress slot, so marking one marks all.
pub fn validate_catalog(parsed: &ParsedCatalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen: HashMap<&str, &str> = HashMap::new();
    for entry in &parsed.entries {
        if let Some(first_group) = seen.insert(entry.front.as_str(), entry.group.as_str()) {
            warnings.push(ValidationWarning {
                line: None,
                message: format!(
                    "duplicate front '{}' (groups '{}' and '{}') shares one progress entry",
                    entry.front, first_group, entry.group
                ),
            });
        }
    }

    for &line in &parsed.dropped_lines {
        warnings.push(ValidationWarning {
            line: Some(line),
            message: "line has fewer than two ';'-separated fields and was skipped".into(),
        });
    }

    if parsed.entries.is_empty() {
        warnings.push(ValidationWarning {
            line: None,
            message: "catalog contains no entries".into(),
        });
    }

    warnings
}
