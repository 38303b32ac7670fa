use super::catalog::Catalog;
use super::AttributeStore;
use crate::error::{AttrError, Result};
use crate::query::{AttributeQuery, Row};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const DEFAULT_CATALOG_FILE: &str = "catalog.json";

/// Attribute store backed by a JSON catalog snapshot.
///
/// The snapshot is re-read on every query; nothing is cached between calls.
/// A missing snapshot reads as an empty catalog.
pub struct FsStore {
    root: PathBuf,
    catalog_file: String,
}

impl FsStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            catalog_file: DEFAULT_CATALOG_FILE.to_string(),
        }
    }

    pub fn with_catalog_file(mut self, name: &str) -> Self {
        self.catalog_file = name.to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.root.join(&self.catalog_file)
    }

    pub fn load_catalog(&self) -> Result<Catalog> {
        let path = self.catalog_path();
        if !path.exists() {
            return Ok(Catalog::default());
        }
        let content = fs::read_to_string(path).map_err(AttrError::Io)?;
        let catalog: Catalog = serde_json::from_str(&content).map_err(AttrError::Serialization)?;
        Ok(catalog)
    }

    /// Replace the snapshot on disk.
    pub fn write_catalog(&self, catalog: &Catalog) -> Result<()> {
        self.ensure_dir(&self.root)?;
        let content = serde_json::to_string_pretty(catalog).map_err(AttrError::Serialization)?;

        // Atomic: readers never see a half-written snapshot
        let tmp_file = self.root.join(format!(".catalog-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(AttrError::Io)?;
        fs::rename(&tmp_file, self.catalog_path()).map_err(AttrError::Io)?;
        Ok(())
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(AttrError::Io)?;
        }
        Ok(())
    }
}

impl AttributeStore for FsStore {
    fn query(&self, query: &AttributeQuery) -> Result<Vec<Row>> {
        Ok(self.load_catalog()?.execute(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::Language;
    use crate::model::{AttributeDefinition, ObjectAttributeValue};
    use crate::test_utils::TestEnv;

    #[test]
    fn missing_snapshot_reads_empty() {
        let env = TestEnv::new();
        let catalog = env.store.load_catalog().unwrap();
        assert_eq!(catalog, Catalog::default());
    }

    #[test]
    fn write_then_query() {
        let env = TestEnv::new();
        let catalog = Catalog {
            attributes: vec![AttributeDefinition::new("size", "Größe")],
            object_attributes: vec![ObjectAttributeValue::new("shirt", "size", "M")],
            ..Default::default()
        };
        env.store.write_catalog(&catalog).unwrap();

        let rows = env
            .store
            .query(&AttributeQuery::ObjectBindings {
                object_ids: vec!["shirt".to_string()],
                basket_only: false,
                language: Language::BASE,
            })
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value.as_deref(), Some("M"));
    }

    #[test]
    fn malformed_snapshot_is_a_serialization_error() {
        let env = TestEnv::new();
        fs::write(env.store.catalog_path(), "{ not json").unwrap();
        let result = env.store.query(&AttributeQuery::Definitions {
            attribute_ids: vec!["size".to_string()],
            language: Language::BASE,
        });
        assert!(matches!(result, Err(AttrError::Serialization(_))));
    }

    #[test]
    fn custom_catalog_file_name() {
        let env = TestEnv::new();
        let store = FsStore::new(env.root.clone()).with_catalog_file("shop.json");
        store.write_catalog(&Catalog::default()).unwrap();
        assert!(env.root.join("shop.json").exists());
        assert!(!env.root.join(DEFAULT_CATALOG_FILE).exists());
    }

    #[test]
    fn write_creates_missing_directory() {
        let env = TestEnv::new();
        let store = FsStore::new(env.root.join("nested").join("data"));
        store.write_catalog(&Catalog::default()).unwrap();
        assert!(store.catalog_path().exists());
    }
}
