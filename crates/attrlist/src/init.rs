//! # Context Initialization
//!
//! [`initialize`] wires a ready-to-use [`CatalogContext`]: it finds the data
//! directory, loads configuration from it, and opens an [`FsStore`] on the
//! configured catalog snapshot.
//!
//! ## Data Directory
//!
//! 1. `data_override`, when given
//! 2. `ATTRLIST_DATA` environment variable
//! 3. OS-appropriate data directory (via `directories` crate)

use crate::api::AttributeApi;
use crate::config::CatalogConfig;
use crate::error::Result;
use crate::lang::Language;
use crate::store::fs::FsStore;
use clapfig::{Clapfig, SearchMode, SearchPath};
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;

pub const CONFIG_FILE: &str = "attrlist.toml";

pub struct CatalogContext {
    pub api: AttributeApi<FsStore>,
    pub config: CatalogConfig,
    /// Default language for callers without a per-request one
    pub language: Language,
}

/// Pick the data directory, honouring an explicit override first.
pub fn data_dir(data_override: Option<PathBuf>) -> PathBuf {
    data_override
        .or_else(|| std::env::var("ATTRLIST_DATA").ok().map(PathBuf::from))
        .unwrap_or_else(|| {
            ProjectDirs::from("com", "attrlist", "attrlist")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".attrlist"))
        })
}

/// Build the resolution context.
///
/// Fails only when the configured language has no column in the schema; an
/// unreadable config file falls back to defaults.
pub fn initialize(data_override: Option<PathBuf>) -> Result<CatalogContext> {
    let data_dir = data_dir(data_override);

    let config: CatalogConfig = Clapfig::builder()
        .app_name("attrlist")
        .file_name(CONFIG_FILE)
        .search_paths(vec![SearchPath::Path(data_dir.clone())])
        .search_mode(SearchMode::Merge)
        .load()
        .unwrap_or_default();
    let language = config.language()?;

    debug!(
        data_dir = %data_dir.display(),
        %language,
        catalog_file = %config.catalog_file,
        "initialized catalog context"
    );

    let store = FsStore::new(data_dir).with_catalog_file(&config.catalog_file);
    Ok(CatalogContext {
        api: AttributeApi::new(store),
        config,
        language,
    })
}
