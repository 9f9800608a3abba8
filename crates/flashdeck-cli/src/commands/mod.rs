//! Subcommand implementations.

use anyhow::{Context, Result};

use flashdeck_core::store::JsonFileStore;
use flashdeck_core::traits::CatalogSource;
use flashdeck_core::StudySession;
use flashdeck_sources::config::{self, CatalogConfig, FlashdeckConfig};

use crate::SessionArgs;

pub mod groups;
pub mod init;
pub mod stats;
pub mod study;
pub mod validate;

/// Resolve the effective configuration: config file, env, then flags.
pub fn resolve_config(args: &SessionArgs) -> Result<FlashdeckConfig> {
    let mut config = config::load_config_from(args.config.as_deref())?;
    if let Some(location) = &args.catalog {
        config.catalog = CatalogConfig::from_location(location);
    }
    if let Some(store) = &args.store {
        config.store_path = store.clone();
    }
    if args.seed.is_some() {
        config.shuffle_seed = args.seed;
    }
    Ok(config)
}

/// Fetch the catalog from `source` and open a session against the configured store.
pub async fn open_session(
    config: &FlashdeckConfig,
    source: &dyn CatalogSource,
) -> Result<StudySession<JsonFileStore>> {
    let store = JsonFileStore::open(&config.store_path)
        .with_context(|| format!("failed to open store {}", config.store_path.display()))?;
    tracing::debug!(
        "catalog: {}, store: {}",
        config.catalog,
        config.store_path.display()
    );

    StudySession::load(source, store, config.shuffle_seed)
        .await
        .with_context(|| format!("failed to load catalog from {}", config.catalog))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashdeck_sources::mock::StaticSource;

    #[tokio::test]
    async fn session_and_reload_share_one_source() {
        let dir = tempfile::tempdir().unwrap();
        let config = FlashdeckConfig {
            store_path: dir.path().join("store.json"),
            shuffle_seed: Some(1),
            ..FlashdeckConfig::default()
        };
        let source = StaticSource::new("###Animals\ncanis;dog");

        let mut session = open_session(&config, &source).await.unwrap();
        assert_eq!(source.fetch_count(), 1);

        source.set_text("###Animals\ncanis;dog\n###Colors\nruber;red");
        session.reload(&source).await.unwrap();
        assert_eq!(source.fetch_count(), 2);
        assert_eq!(
            session.state().groups().discovered(),
            ["Animals", "Colors"]
        );
    }
}
