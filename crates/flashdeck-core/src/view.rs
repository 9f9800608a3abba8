//! Filtered view derivation and aggregate counts.
//!
//! Both functions are pure: the view is recomputed from scratch on every
//! call and never cached, so counts cannot drift from the underlying state.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::{LearningStatus, Progress, VocabularyEntry};

/// Predicates applied to the catalog.
#[derive(Debug, Clone, Copy)]
pub struct ViewFilter<'a> {
    /// Groups to include. `None` includes every group.
    pub selected_groups: Option<&'a BTreeSet<String>>,
    /// Exclude entries marked as known.
    pub unknown_only: bool,
}

impl ViewFilter<'_> {
    /// Whether `entry` passes both predicates.
    pub fn admits(&self, entry: &VocabularyEntry, progress: &Progress) -> bool {
        if let Some(groups) = self.selected_groups {
            if !groups.contains(&entry.group) {
                return false;
            }
        }
        !(self.unknown_only && progress.is_known(&entry.front))
    }
}

/// Entries of `catalog` that pass `filter`, in catalog order.
pub fn current_view<'c>(
    catalog: &'c [VocabularyEntry],
    filter: ViewFilter<'_>,
    progress: &Progress,
) -> Vec<&'c VocabularyEntry> {
    catalog
        .iter()
        .filter(|entry| filter.admits(entry, progress))
        .collect()
}

/// Counts over a view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub known: usize,
    pub unknown: usize,
    pub unmarked: usize,
}

impl Summary {
    pub fn compute(view: &[&VocabularyEntry], progress: &Progress) -> Self {
        let mut known = 0;
        let mut unknown = 0;
        for entry in view {
            match progress.status(&entry.front) {
                LearningStatus::Known => known += 1,
                LearningStatus::Unknown => unknown += 1,
                LearningStatus::Unmarked => {}
            }
        }

        Self {
            total: view.len(),
            known,
            unknown,
            unmarked: view.len() - known - unknown,
        }
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Selected: {} | Known: {} | Unknown: {} | Unmarked: {}",
            self.total, self.known, self.unknown, self.unmarked
        )
    }
}
