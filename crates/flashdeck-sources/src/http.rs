//! HTTP catalog source.

use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use flashdeck_core::traits::CatalogSource;

use crate::error::SourceError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fetches the catalog with a plain `GET`.
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            url: url.to_string(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    #[instrument(skip(self))]
    async fn fetch(&self) -> anyhow::Result<String> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout(DEFAULT_TIMEOUT_SECS)
            } else {
                SourceError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(SourceError::Http {
                status,
                url: self.url.clone(),
            }
            .into());
        }

        let text = response
            .text()
            .await
            .map_err(|e| SourceError::NetworkError(format!("failed to read body: {e}")))?;
        tracing::debug!("fetched {} bytes", text.len());
        Ok(text)
    }
}
