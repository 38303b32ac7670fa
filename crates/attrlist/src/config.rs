//! # Configuration
//!
//! Configuration is managed by [`clapfig`], which handles layered loading
//! from TOML files, environment variables, and compiled defaults.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `ATTRLIST__BASE_LANGUAGE`, `ATTRLIST__CATALOG_FILE`.
//! 2. **Data Directory Config**: `<data dir>/attrlist.toml`.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `base_language` | `0` | Language index used when the caller has no per-request language |
//! | `catalog_file` | `catalog.json` | Catalog snapshot file inside the data directory |

use crate::error::Result;
use crate::lang::Language;
use crate::store::fs::DEFAULT_CATALOG_FILE;
use confique::Config;
use serde::{Deserialize, Serialize};

/// Configuration for attribute resolution, stored in `attrlist.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Default language index (0 reads the unsuffixed columns)
    #[config(default = 0)]
    pub base_language: usize,

    /// Catalog snapshot file name, relative to the data directory
    #[config(default = "catalog.json")]
    pub catalog_file: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_language: 0,
            catalog_file: DEFAULT_CATALOG_FILE.to_string(),
        }
    }
}

impl CatalogConfig {
    /// The configured default language, validated against the schema.
    pub fn language(&self) -> Result<Language> {
        Language::new(self.base_language)
    }
}
