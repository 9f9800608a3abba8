//! Core trait definitions for catalog sources and durable storage.
//!
//! `CatalogSource` is implemented by the `flashdeck-sources` crate; the
//! key-value stores live in [`crate::store`].

use async_trait::async_trait;

use crate::error::StoreError;

// ---------------------------------------------------------------------------
// Catalog source trait
// ---------------------------------------------------------------------------

/// Somewhere the raw catalog text can be fetched from.
///
/// This is the only asynchronous boundary of a study session: no session
/// exists until `fetch` resolves.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Human-readable description of the source (a path or URL).
    fn describe(&self) -> String;

    /// Fetch the raw catalog text.
    async fn fetch(&self) -> anyhow::Result<String>;
}

// ---------------------------------------------------------------------------
// Key-value store trait
// ---------------------------------------------------------------------------

/// A string-keyed durable store holding JSON-encoded values.
///
/// Every `set` replaces the whole value for its key.
pub trait KeyValueStore {
    /// Read the raw value for `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the value for `key`.
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}
