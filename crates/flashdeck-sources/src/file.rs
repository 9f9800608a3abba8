//! Local file catalog source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::instrument;

use flashdeck_core::traits::CatalogSource;

use crate::error::SourceError;

/// Reads the catalog from a file on disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    #[instrument(skip(self))]
    async fn fetch(&self) -> anyhow::Result<String> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(SourceError::NotFound(self.path.clone()).into())
            }
            Err(source) => Err(SourceError::Io {
                path: self.path.clone(),
                source,
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vokabeln.csv");
        std::fs::write(&path, "canis;dog\n").unwrap();

        let source = FileSource::new(&path);
        assert_eq!(source.fetch().await.unwrap(), "canis;dog\n");
        assert!(source.describe().ends_with("vokabeln.csv"));
    }

    #[tokio::test]
    async fn missing_file() {
        let source = FileSource::new("/nonexistent/vokabeln.csv");
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SourceError>(),
            Some(SourceError::NotFound(_))
        ));
        assert!(err.to_string().contains("not found"));
    }
}
