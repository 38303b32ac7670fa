use super::catalog::Catalog;
use super::AttributeStore;
use crate::error::{AttrError, Result};
use crate::model::{
    AttributeDefinition, CategoryAttributeAssociation, CategoryMembership, ObjectAttributeValue,
};
use crate::query::{AttributeQuery, Row};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory attribute store.
///
/// Reads take a shared lock so concurrent resolutions never block each other.
pub struct MemStore {
    catalog: RwLock<Catalog>,
    simulate_read_error: AtomicBool,
}

impl Default for MemStore {
    fn default() -> Self {
        Self::from_catalog(Catalog::default())
    }
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_catalog(catalog: Catalog) -> Self {
        Self {
            catalog: RwLock::new(catalog),
            simulate_read_error: AtomicBool::new(false),
        }
    }

    /// Make every query fail, for testing error propagation.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.store(simulate, Ordering::SeqCst);
    }

    pub fn insert_attribute(&self, def: AttributeDefinition) {
        self.write().attributes.push(def);
    }

    pub fn bind(&self, binding: ObjectAttributeValue) {
        self.write().object_attributes.push(binding);
    }

    pub fn associate(&self, assoc: CategoryAttributeAssociation) {
        self.write().category_attributes.push(assoc);
    }

    pub fn add_member(&self, member: CategoryMembership) {
        self.write().category_members.push(member);
    }

    /// Copy of the current tables.
    pub fn snapshot(&self) -> Catalog {
        self.read().clone()
    }

    // Every write is a single push, so a poisoned lock still guards whole rows.
    fn read(&self) -> RwLockReadGuard<'_, Catalog> {
        self.catalog
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Catalog> {
        self.catalog
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl AttributeStore for MemStore {
    fn query(&self, query: &AttributeQuery) -> Result<Vec<Row>> {
        if self.simulate_read_error.load(Ordering::SeqCst) {
            return Err(AttrError::Store("Simulated read error".to_string()));
        }
        Ok(self.read().execute(query))
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::lang::Language;
    use crate::model::LocalizedText;

    /// Variant product whose attributes merge with [`PARENT`].
    pub const VARIANT: &str = "1672";
    pub const PARENT: &str = "1351";
    pub const GARDEN: &str = "garden-decor";

    pub struct CatalogFixture {
        pub store: MemStore,
    }

    impl Default for CatalogFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl CatalogFixture {
        pub fn new() -> Self {
            Self {
                store: MemStore::new(),
            }
        }

        pub fn with_attribute(self, id: &str, title: &str, position: i64) -> Self {
            self.store
                .insert_attribute(AttributeDefinition::new(id, title).at_position(position));
            self
        }

        pub fn with_basket_attribute(self, id: &str, title: &str, position: i64) -> Self {
            self.store.insert_attribute(
                AttributeDefinition::new(id, title)
                    .at_position(position)
                    .in_basket(),
            );
            self
        }

        pub fn with_value(self, object_id: &str, attribute_id: &str, value: &str) -> Self {
            self.store
                .bind(ObjectAttributeValue::new(object_id, attribute_id, value));
            self
        }

        pub fn with_text(self, object_id: &str, attribute_id: &str, value: LocalizedText) -> Self {
            self.store
                .bind(ObjectAttributeValue::new(object_id, attribute_id, value));
            self
        }

        pub fn with_category_attribute(
            self,
            category_id: &str,
            attribute_id: &str,
            sort: i64,
        ) -> Self {
            self.store
                .associate(CategoryAttributeAssociation::new(category_id, attribute_id, sort));
            self
        }

        pub fn with_member(self, category_id: &str, object_id: &str) -> Self {
            self.store
                .add_member(CategoryMembership::new(category_id, object_id));
            self
        }

        /// A garden decor shop: a variant planter ([`VARIANT`]) inheriting from
        /// its parent ([`PARENT`]), both listed in [`GARDEN`].
        ///
        /// | Attribute | Pos | Basket | Variant | Parent | Other members |
        /// |-----------|-----|--------|---------|--------|---------------|
        /// | diameter  | 1   | yes    | 25 cm   | 30 cm  |               |
        /// | material  | 2   | yes    |         | Granit | Holz, Granit  |
        /// | color     | 3   | no     | Silber  |        | Rot           |
        /// | weight    | 4   | no     |         | 12 kg  |               |
        pub fn garden_shop() -> Self {
            let en = Language::new(1).expect("language 1 has a column");
            let text = |de: &str, english: &str| LocalizedText::new(de).with(en, english);

            let store = MemStore::new();
            for (id, de, english, position, basket) in [
                ("diameter", "Durchmesser", "Diameter", 1, true),
                ("material", "Material", "Material", 2, true),
                ("color", "Farbe", "Color", 3, false),
                ("weight", "Gewicht", "Weight", 4, false),
            ] {
                let mut def = AttributeDefinition::new(id, text(de, english)).at_position(position);
                def.display_in_basket = basket;
                store.insert_attribute(def);
            }
            for (object_id, attribute_id, de, english) in [
                (VARIANT, "diameter", "25 cm", "25 cm"),
                (VARIANT, "color", "Silber", "Silver"),
                (PARENT, "diameter", "30 cm", "30 cm"),
                (PARENT, "material", "Granit", "Granite"),
                (PARENT, "weight", "12 kg", "12 kg"),
                ("2000", "material", "Holz", "Wood"),
                ("2000", "color", "Rot", "Red"),
                ("2001", "material", "Granit", "Granite"),
            ] {
                store.bind(ObjectAttributeValue::new(object_id, attribute_id, text(de, english)));
            }
            for object_id in [VARIANT, PARENT, "2000", "2001"] {
                store.add_member(CategoryMembership::new(GARDEN, object_id));
            }
            store.associate(CategoryAttributeAssociation::new(GARDEN, "material", 333));

            Self { store }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{CatalogFixture, GARDEN, PARENT, VARIANT};
    use super::*;
    use crate::lang::Language;

    #[test]
    fn empty_store_returns_no_rows() {
        let store = MemStore::new();
        let rows = store
            .query(&AttributeQuery::ObjectBindings {
                object_ids: vec![VARIANT.to_string()],
                basket_only: false,
                language: Language::BASE,
            })
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn simulated_read_error_propagates() {
        let store = MemStore::new();
        store.set_simulate_read_error(true);
        let result = store.query(&AttributeQuery::Definitions {
            attribute_ids: vec!["a".to_string()],
            language: Language::BASE,
        });
        assert!(matches!(result, Err(AttrError::Store(_))));

        store.set_simulate_read_error(false);
        assert!(store
            .query(&AttributeQuery::Definitions {
                attribute_ids: vec!["a".to_string()],
                language: Language::BASE,
            })
            .is_ok());
    }

    #[test]
    fn poisoned_lock_still_serves_queries() {
        let store = CatalogFixture::garden_shop().store;
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.catalog.write().unwrap();
            panic!("writer died holding the lock");
        }));
        assert!(store.catalog.is_poisoned());

        let rows = store
            .query(&AttributeQuery::ObjectBindings {
                object_ids: vec![VARIANT.to_string()],
                basket_only: false,
                language: Language::BASE,
            })
            .unwrap();
        assert_eq!(rows.len(), 2);

        store.add_member(CategoryMembership::new(GARDEN, "2002"));
        assert_eq!(store.snapshot().category_members.len(), 5);
    }

    #[test]
    fn fixture_builders_populate_tables() {
        let fixture = CatalogFixture::default()
            .with_attribute("a", "A", 1)
            .with_basket_attribute("b", "B", 2)
            .with_value("obj", "a", "x")
            .with_category_attribute("cat", "a", 1)
            .with_member("cat", "obj");

        let catalog = fixture.store.snapshot();
        assert_eq!(catalog.attributes.len(), 2);
        assert!(catalog.definition("b").unwrap().display_in_basket);
        assert_eq!(catalog.object_attributes.len(), 1);
        assert_eq!(catalog.category_attributes.len(), 1);
        assert_eq!(catalog.category_members.len(), 1);
    }

    #[test]
    fn garden_shop_fixture_shape() {
        let catalog = CatalogFixture::garden_shop().store.snapshot();
        assert_eq!(catalog.attributes.len(), 4);
        assert_eq!(
            catalog
                .object_attributes
                .iter()
                .filter(|b| b.object_id == VARIANT || b.object_id == PARENT)
                .count(),
            5
        );
        assert!(catalog
            .category_members
            .iter()
            .all(|m| m.category_id == GARDEN));
    }
}
