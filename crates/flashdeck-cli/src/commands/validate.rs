//! The `flashdeck validate` command.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;

use flashdeck_core::parser::{parse_catalog_file, validate_catalog};

pub fn execute(catalog_path: PathBuf) -> Result<()> {
    let parsed = parse_catalog_file(&catalog_path)?;

    let groups: BTreeSet<&str> = parsed.entries.iter().map(|e| e.group.as_str()).collect();
    println!(
        "Catalog: {} ({} entries, {} groups)",
        catalog_path.display(),
        parsed.entries.len(),
        groups.len()
    );

    let warnings = validate_catalog(&parsed);
    for w in &warnings {
        let prefix = w
            .line
            .map(|line| format!("  [line {line}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Catalog valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
