//! In-memory catalog source for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use flashdeck_core::traits::CatalogSource;

/// A catalog source serving fixed text, which can be swapped between fetches.
pub struct StaticSource {
    text: Mutex<Option<String>>,
    fetch_count: AtomicU32,
}

impl StaticSource {
    pub fn new(text: &str) -> Self {
        Self {
            text: Mutex::new(Some(text.to_string())),
            fetch_count: AtomicU32::new(0),
        }
    }

    /// A source whose fetch always fails.
    pub fn failing() -> Self {
        Self {
            text: Mutex::new(None),
            fetch_count: AtomicU32::new(0),
        }
    }

    /// Replace the text served by later fetches.
    pub fn set_text(&self, text: &str) {
        if let Ok(mut guard) = self.text.lock() {
            *guard = Some(text.to_string());
        }
    }

    /// Number of fetches made so far.
    pub fn fetch_count(&self) -> u32 {
        self.fetch_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl CatalogSource for StaticSource {
    fn describe(&self) -> String {
        "static".into()
    }

    async fn fetch(&self) -> anyhow::Result<String> {
        self.fetch_count.fetch_add(1, Ordering::Relaxed);
        let guard = self
            .text
            .lock()
            .map_err(|_| anyhow::anyhow!("static source lock poisoned"))?;
        guard
            .clone()
            .ok_or_else(|| anyhow::anyhow!("static source configured to fail"))
    }
}
