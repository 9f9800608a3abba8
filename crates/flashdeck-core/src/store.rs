//! Durable key-value storage and the typed adapters on top of it.
//!
//! Values are stored under fixed keys as JSON strings. Reads are forgiving:
//! a missing or malformed value means "no prior state". Writes replace the
//! whole value.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::StoreError;
use crate::model::{Mark, Progress};
use crate::registry::GroupRegistry;
use crate::traits::KeyValueStore;

/// Key of the `front` → status map.
pub const PROGRESS_KEY: &str = "vocabProgress";
/// Key of the sorted list of every group ever seen.
pub const DISCOVERED_GROUPS_KEY: &str = "discoveredVocabGroups";
/// Key of the currently selected groups (order not significant).
pub const SELECTED_GROUPS_KEY: &str = "selectedVocabSets";

// ---------------------------------------------------------------------------
// Typed adapters
// ---------------------------------------------------------------------------

fn read_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("failed to read '{key}', starting empty: {e}");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("ignoring malformed value for '{key}': {e}");
            None
        }
    }
}

fn write_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, json)
}

/// Load the progress map, defaulting to empty.
///
/// Entries whose status is not a recognised mark are skipped; the rest load.
pub fn load_progress<S: KeyValueStore + ?Sized>(store: &S) -> Progress {
    let raw: BTreeMap<String, serde_json::Value> =
        read_json(store, PROGRESS_KEY).unwrap_or_default();

    raw.into_iter()
        .filter_map(|(front, value)| {
            match value.as_str().map(str::parse::<Mark>) {
                Some(Ok(mark)) => Some((front, mark)),
                _ => {
                    tracing::warn!("ignoring unrecognised status {value} for '{front}'");
                    None
                }
            }
        })
        .collect()
}

/// Persist the full progress map.
pub fn save_progress<S: KeyValueStore + ?Sized>(
    store: &mut S,
    progress: &Progress,
) -> Result<(), StoreError> {
    write_json(store, PROGRESS_KEY, progress)
}

/// Load the group registry, defaulting to empty sets.
pub fn load_registry<S: KeyValueStore + ?Sized>(store: &S) -> GroupRegistry {
    let discovered: Vec<String> = read_json(store, DISCOVERED_GROUPS_KEY).unwrap_or_default();
    let selected: Vec<String> = read_json(store, SELECTED_GROUPS_KEY).unwrap_or_default();
    GroupRegistry::from_parts(discovered, selected)
}

/// Persist the discovered group list.
pub fn save_discovered<S: KeyValueStore + ?Sized>(
    store: &mut S,
    registry: &GroupRegistry,
) -> Result<(), StoreError> {
    write_json(store, DISCOVERED_GROUPS_KEY, registry.discovered())
}

/// Persist the selected group set as an array.
pub fn save_selected<S: KeyValueStore + ?Sized>(
    store: &mut S,
    registry: &GroupRegistry,
) -> Result<(), StoreError> {
    write_json(store, SELECTED_GROUPS_KEY, registry.selected())
}

// ---------------------------------------------------------------------------
// JSON file store
// ---------------------------------------------------------------------------

/// A key-value store backed by a single JSON object on disk.
///
/// The file is rewritten on every `set`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(values) => values,
                Err(e) => {
                    tracing::warn!("store file {} is malformed, starting empty: {e}", path.display());
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        tracing::debug!("opened store {} ({} keys)", path.display(), values.len());
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the whole file via a temporary sibling and an atomic rename.
    fn flush(&self) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        let parent = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                std::fs::create_dir_all(parent).map_err(io_err)?;
                parent
            }
            None => Path::new("."),
        };
        let json = serde_json::to_string_pretty(&self.values).map_err(|source| {
            StoreError::Encode {
                key: "*".into(),
                source,
            }
        })?;

        let mut tmp = NamedTempFile::new_in(parent).map_err(io_err)?;
        tmp.write_all(json.as_bytes()).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        self.flush()
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// A volatile store that records every write, for tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
    writes: Vec<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value without recording a write.
    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    /// Keys written so far, in write order.
    pub fn writes(&self) -> &[String] {
        &self.writes
    }

    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.writes.push(key.to_string());
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}
