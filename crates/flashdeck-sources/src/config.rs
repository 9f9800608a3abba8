//! Configuration loading and catalog source factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use flashdeck_core::traits::CatalogSource;

use crate::file::FileSource;
use crate::http::HttpSource;

/// Environment variable overriding the catalog location (path or URL).
pub const CATALOG_ENV: &str = "FLASHDECK_CATALOG";
/// Environment variable overriding the store file path.
pub const STORE_ENV: &str = "FLASHDECK_STORE";

/// Where the catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CatalogConfig {
    File { path: PathBuf },
    Http { url: String },
}

impl CatalogConfig {
    /// Interpret a location string: `http(s)://` means a URL, anything else a path.
    pub fn from_location(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            CatalogConfig::Http {
                url: location.to_string(),
            }
        } else {
            CatalogConfig::File {
                path: PathBuf::from(location),
            }
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig::File {
            path: PathBuf::from("vokabeln.csv"),
        }
    }
}

impl std::fmt::Display for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogConfig::File { path } => write!(f, "{}", path.display()),
            CatalogConfig::Http { url } => write!(f, "{url}"),
        }
    }
}

/// Top-level flashdeck configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashdeckConfig {
    /// Catalog source.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// JSON file holding progress and group selection.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    /// Fixed shuffle seed for a reproducible card order.
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(".flashdeck/store.json")
}

impl Default for FlashdeckConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            store_path: default_store_path(),
            shuffle_seed: None,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not expanded again.
fn resolve_env_vars(s: &str) -> String {
    resolve_with(s, |name| std::env::var(name).ok())
}

fn resolve_with<F>(s: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        result.push_str(&lookup(&rest[start + 2..start + end]).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Resolve env vars in every string-valued setting.
fn resolve_config(config: FlashdeckConfig) -> FlashdeckConfig {
    let catalog = match config.catalog {
        CatalogConfig::File { path } => CatalogConfig::File {
            path: resolve_path(&path),
        },
        CatalogConfig::Http { url } => CatalogConfig::Http {
            url: resolve_env_vars(&url),
        },
    };
    FlashdeckConfig {
        catalog,
        store_path: resolve_path(&config.store_path),
        shuffle_seed: config.shuffle_seed,
    }
}

/// Apply `FLASHDECK_CATALOG` / `FLASHDECK_STORE` style overrides.
pub fn apply_env_overrides<F>(mut config: FlashdeckConfig, lookup: F) -> FlashdeckConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(location) = lookup(CATALOG_ENV).filter(|v| !v.is_empty()) {
        config.catalog = CatalogConfig::from_location(&location);
    }
    if let Some(store) = lookup(STORE_ENV).filter(|v| !v.is_empty()) {
        config.store_path = PathBuf::from(store);
    }
    config
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `flashdeck.toml` in the current directory
/// 2. `~/.config/flashdeck/config.toml`
///
/// Environment variable overrides: `FLASHDECK_CATALOG`, `FLASHDECK_STORE`.
pub fn load_config() -> Result<FlashdeckConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<FlashdeckConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("flashdeck.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            tracing::debug!("using config {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<FlashdeckConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => FlashdeckConfig::default(),
    };

    let config = apply_env_overrides(config, |key| std::env::var(key).ok());
    Ok(resolve_config(config))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("flashdeck"))
}

/// Create a catalog source from its configuration.
pub fn create_source(config: &CatalogConfig) -> Result<Box<dyn CatalogSource>> {
    match config {
        CatalogConfig::File { path } => Ok(Box::new(FileSource::new(path))),
        CatalogConfig::Http { url } => Ok(Box::new(
            HttpSource::new(url).context("failed to build HTTP client")?,
        )),
    }
}
