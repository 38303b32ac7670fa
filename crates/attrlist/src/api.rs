//! # API Facade
//!
//! [`AttributeApi`] is the single entry point for attribute resolution. It is a
//! **thin facade**: every method builds the matching resolver over its store
//! and dispatches. Ordering, keying, and merge rules live in [`crate::resolve`].
//!
//! ## Generic Over AttributeStore
//!
//! - Production: `AttributeApi<FsStore>`
//! - Testing: `AttributeApi<MemStore>`
//!
//! ## Language
//!
//! Callers pass the active language on every call. The facade keeps no
//! language state of its own; [`crate::init::CatalogContext`] carries the
//! configured default for callers that want one.

use crate::collection::AttributeCollection;
use crate::error::Result;
use crate::lang::Language;
use crate::query::CategoryFilter;
use crate::resolve::{AttributeResolver, BasketAttributeFilter, CategoryAttributeProjector};
use crate::store::AttributeStore;

pub struct AttributeApi<S: AttributeStore> {
    store: S,
}

impl<S: AttributeStore> AttributeApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// See [`AttributeResolver::load_by_ids`].
    pub fn load_by_ids<I, T>(
        &self,
        ids: I,
        language: Language,
    ) -> Result<Option<AttributeCollection>>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        AttributeResolver::new(&self.store).load_by_ids(ids, language)
    }

    /// See [`AttributeResolver::load_by_object_ids`].
    pub fn load_by_object_ids<I, T>(
        &self,
        object_ids: I,
        language: Language,
    ) -> Result<Option<AttributeCollection>>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        AttributeResolver::new(&self.store).load_by_object_ids(object_ids, language)
    }

    /// See [`AttributeResolver::load`].
    pub fn load(
        &self,
        object_id: Option<&str>,
        parent_id: Option<&str>,
        language: Language,
    ) -> Result<AttributeCollection> {
        AttributeResolver::new(&self.store).load(object_id, parent_id, language)
    }

    /// See [`BasketAttributeFilter::load_displayable_in_basket`].
    pub fn load_displayable_in_basket(
        &self,
        object_id: Option<&str>,
        parent_id: Option<&str>,
        language: Language,
    ) -> Result<AttributeCollection> {
        BasketAttributeFilter::new(&self.store).load_displayable_in_basket(
            object_id, parent_id, language,
        )
    }

    /// See [`CategoryAttributeProjector::load_for_category`].
    pub fn load_for_category(
        &self,
        category_id: &str,
        language: Language,
    ) -> Result<AttributeCollection> {
        CategoryAttributeProjector::new(&self.store).load_for_category(category_id, language)
    }

    /// See [`CategoryAttributeProjector::load_for_category_filtered`].
    pub fn load_for_category_filtered(
        &self,
        category_id: &str,
        language: Language,
        filter: &CategoryFilter,
    ) -> Result<AttributeCollection> {
        CategoryAttributeProjector::new(&self.store).load_for_category_filtered(
            category_id,
            language,
            filter,
        )
    }
}
