//! flashdeck-sources — Catalog sources and configuration.
//!
//! Implements the `CatalogSource` trait for local files and HTTP URLs, and
//! loads the `flashdeck.toml` configuration that selects between them.

pub mod config;
pub mod error;
pub mod file;
pub mod http;
pub mod mock;

pub use config::{create_source, load_config, CatalogConfig, FlashdeckConfig};
pub use error::SourceError;
