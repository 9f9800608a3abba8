//! Core data model types for flashdeck.
//!
//! These are the fundamental types the rest of the system uses to represent
//! vocabulary entries, learning status, and the per-term progress map.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Group name used for entries that appear before any `###` header.
pub const DEFAULT_GROUP: &str = "Allgemein";

/// A single flashcard loaded from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    /// Topical group declared by the nearest preceding header line.
    pub group: String,
    /// The term shown first. Also the lookup key into [`Progress`].
    pub front: String,
    /// The translation shown after flipping.
    pub back: String,
}

impl VocabularyEntry {
    pub fn new(
        group: impl Into<String>,
        front: impl Into<String>,
        back: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            front: front.into(),
            back: back.into(),
        }
    }
}

/// A status the user has explicitly assigned to a term.
///
/// This is what gets persisted; the absence of an entry means "unmarked".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Known,
    Unknown,
}

/// Learning status of a term as seen by the engine and presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LearningStatus {
    Known,
    Unknown,
    #[default]
    Unmarked,
}

impl From<Option<Mark>> for LearningStatus {
    fn from(mark: Option<Mark>) -> Self {
        match mark {
            Some(Mark::Known) => LearningStatus::Known,
            Some(Mark::Unknown) => LearningStatus::Unknown,
            None => LearningStatus::Unmarked,
        }
    }
}

impl fmt::Display for LearningStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LearningStatus::Known => write!(f, "known"),
            LearningStatus::Unknown => write!(f, "unknown"),
            LearningStatus::Unmarked => write!(f, "none"),
        }
    }
}

impl FromStr for Mark {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "known" => Ok(Mark::Known),
            "unknown" => Ok(Mark::Unknown),
            other => Err(format!("unknown learning status: {other}")),
        }
    }
}

/// Durable mapping of `front` → explicit mark.
///
/// Only grows: marks are overwritten but never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress {
    marks: BTreeMap<String, Mark>,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status of `front`; unmarked when it has never been marked.
    pub fn status(&self, front: &str) -> LearningStatus {
        self.marks.get(front).copied().into()
    }

    pub fn is_known(&self, front: &str) -> bool {
        self.status(front) == LearningStatus::Known
    }

    /// Set the mark for `front`, returning the previous status.
    pub fn mark(&mut self, front: impl Into<String>, mark: Mark) -> LearningStatus {
        self.marks.insert(front.into(), mark).into()
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Mark)> {
        self.marks.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, Mark)> for Progress {
    fn from_iter<I: IntoIterator<Item = (String, Mark)>>(iter: I) -> Self {
        Self {
            marks: iter.into_iter().collect(),
        }
    }
}
