//! The `flashdeck stats` command.

use std::collections::BTreeMap;

use anyhow::Result;
use comfy_table::{Cell, Table};

use flashdeck_core::model::{LearningStatus, VocabularyEntry};
use flashdeck_core::{Progress, Summary};

use flashdeck_sources::create_source;

use crate::{SessionArgs, StatsFormat};

pub async fn execute(args: SessionArgs, unknown_only: bool, format: StatsFormat) -> Result<()> {
    let config = super::resolve_config(&args)?;
    let source = create_source(&config.catalog)?;
    let mut session = super::open_session(&config, source.as_ref()).await?;

    if unknown_only {
        session.toggle_unknown_only()?;
    }
    let snapshot = session.snapshot();
    let state = session.state();

    match format {
        StatsFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&snapshot.summary)?);
        }
        StatsFormat::Text => {
            println!("{}", snapshot.summary);
            let table = group_table(
                state.catalog(),
                state.progress(),
                |group| state.groups().is_selected(group),
            );
            println!("\n{table}");
        }
    }

    Ok(())
}

/// Per-group counts over the whole catalog, regardless of the current filters.
pub fn group_counts<'a>(
    catalog: &'a [VocabularyEntry],
    progress: &Progress,
) -> BTreeMap<&'a str, Summary> {
    let mut counts: BTreeMap<&str, Summary> = BTreeMap::new();
    for entry in catalog {
        let summary = counts.entry(entry.group.as_str()).or_default();
        summary.total += 1;
        match progress.status(&entry.front) {
            LearningStatus::Known => summary.known += 1,
            LearningStatus::Unknown => summary.unknown += 1,
            LearningStatus::Unmarked => summary.unmarked += 1,
        }
    }
    counts
}

fn group_table(
    catalog: &[VocabularyEntry],
    progress: &Progress,
    is_selected: impl Fn(&str) -> bool,
) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Group", "Selected", "Cards", "Known", "Unknown", "Unmarked",
    ]);

    for (group, summary) in group_counts(catalog, progress) {
        table.add_row(vec![
            Cell::new(group),
            Cell::new(if is_selected(group) { "yes" } else { "no" }),
            Cell::new(summary.total),
            Cell::new(summary.known),
            Cell::new(summary.unknown),
            Cell::new(summary.unmarked),
        ]);
    }
    table
}
