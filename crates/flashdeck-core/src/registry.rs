//! Group registry: every group ever seen, and which of them are selected.
//!
//! Groups are never removed from the discovered list, even when a later
//! catalog no longer contains them. This keeps the group list stable across
//! catalog edits at the cost of carrying stale names.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::StudyError;
use crate::model::VocabularyEntry;

/// A group as rendered by a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupOption {
    pub group: String,
    pub selected: bool,
}

/// Discovered and selected groups.
///
/// Invariant: every selected group is also discovered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupRegistry {
    discovered: Vec<String>,
    selected: BTreeSet<String>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a registry from stored parts.
    ///
    /// Selected names that were never discovered are dropped.
    pub fn from_parts(discovered: Vec<String>, selected: impl IntoIterator<Item = String>) -> Self {
        let mut dedup = Vec::with_capacity(discovered.len());
        for name in discovered {
            if !dedup.contains(&name) {
                dedup.push(name);
            }
        }

        let selected = selected
            .into_iter()
            .filter(|name| {
                let known = dedup.contains(name);
                if !known {
                    tracing::warn!("dropping selected group '{name}' that was never discovered");
                }
                known
            })
            .collect();

        Self {
            discovered: dedup,
            selected,
        }
    }

    /// All groups ever seen, in sorted order.
    pub fn discovered(&self) -> &[String] {
        &self.discovered
    }

    /// Groups currently included in study.
    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn is_discovered(&self, name: &str) -> bool {
        self.discovered.iter().any(|g| g == name)
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.contains(name)
    }

    /// Register groups, auto-selecting the ones seen for the first time.
    ///
    /// Returns the newly discovered names in first-seen order. When the
    /// result is non-empty the discovered list has been re-sorted and both
    /// sets need to be persisted.
    pub fn discover<'a, I>(&mut self, groups: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut added = Vec::new();
        for group in groups {
            if self.is_discovered(group) {
                continue;
            }
            self.discovered.push(group.to_string());
            self.selected.insert(group.to_string());
            added.push(group.to_string());
        }

        if !added.is_empty() {
            self.discovered.sort();
        }
        added
    }

    /// Register every group that occurs in `catalog`.
    pub fn discover_catalog(&mut self, catalog: &[VocabularyEntry]) -> Vec<String> {
        self.discover(catalog.iter().map(|e| e.group.as_str()))
    }

    /// Flip selection of `name`, returning whether it is now selected.
    pub fn toggle(&mut self, name: &str) -> Result<bool, StudyError> {
        if !self.is_discovered(name) {
            return Err(StudyError::UnknownGroup(name.to_string()));
        }
        if self.selected.remove(name) {
            Ok(false)
        } else {
            self.selected.insert(name.to_string());
            Ok(true)
        }
    }

    /// Groups in display order with their selection state.
    pub fn options(&self) -> Vec<GroupOption> {
        self.discovered
            .iter()
            .map(|group| GroupOption {
                group: group.clone(),
                selected: self.selected.contains(group),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_catalog;

    #[test]
    fn discovery_sorts_and_selects_new_groups() {
        let mut registry = GroupRegistry::new();
        let added = registry.discover(["Colors", "Animals", "Colors"]);
        assert_eq!(added, vec!["Colors", "Animals"]);
        assert_eq!(registry.discovered(), ["Animals", "Colors"]);
        assert!(registry.is_selected("Animals"));
        assert!(registry.is_selected("Colors"));
    }

    #[test]
    fn discovery_is_idempotent() {
        let catalog = parse_catalog("###Animals\ncanis;dog\n###Colors\nruber;red");
        let mut registry = GroupRegistry::new();
        assert_eq!(registry.discover_catalog(&catalog).len(), 2);

        let snapshot = registry.clone();
        assert!(registry.discover_catalog(&catalog).is_empty());
        assert_eq!(registry, snapshot);
    }

    #[test]
    fn discovery_keeps_deselection_of_known_groups() {
        let mut registry = GroupRegistry::new();
        registry.discover(["Animals", "Colors"]);
        registry.toggle("Colors").unwrap();

        let added = registry.discover(["Animals", "Colors", "Numbers"]);
        assert_eq!(added, vec!["Numbers"]);
        assert!(!registry.is_selected("Colors"));
        assert!(registry.is_selected("Numbers"));
    }

    #[test]
    fn removed_groups_are_never_pruned() {
        let mut registry = GroupRegistry::new();
        registry.discover(["Animals", "Colors"]);
        registry.discover(["Animals"]);
        assert_eq!(registry.discovered(), ["Animals", "Colors"]);
    }

    #[test]
    fn toggle_flips_membership() {
        let mut registry = GroupRegistry::new();
        registry.discover(["Animals"]);
        assert!(!registry.toggle("Animals").unwrap());
        assert!(registry.toggle("Animals").unwrap());
    }

    #[test]
    fn toggle_unknown_group_is_rejected() {
        let mut registry = GroupRegistry::new();
        let err = registry.toggle("Ghosts").unwrap_err();
        assert!(matches!(err, StudyError::UnknownGroup(name) if name == "Ghosts"));
        assert!(registry.selected().is_empty());
    }

    #[test]
    fn from_parts_restores_subset_invariant() {
        let registry = GroupRegistry::from_parts(
            vec!["Animals".into(), "Animals".into(), "Colors".into()],
            vec!["Colors".into(), "Stale".into()],
        );
        assert_eq!(registry.discovered(), ["Animals", "Colors"]);
        assert_eq!(registry.selected().len(), 1);
        assert!(registry.is_selected("Colors"));
    }

    #[test]
    fn options_follow_discovered_order() {
        let mut registry = GroupRegistry::new();
        registry.discover(["b", "a"]);
        registry.toggle("b").unwrap();
        let options = registry.options();
        assert_eq!(
            options,
            vec![
                GroupOption {
                    group: "a".into(),
                    selected: true
                },
                GroupOption {
                    group: "b".into(),
                    selected: false
                },
            ]
        );
    }
}
