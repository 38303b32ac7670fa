use super::{by_position, fetch, object_and_parent, own_first, present};
use crate::attribute::Attribute;
use crate::collection::AttributeCollection;
use crate::error::Result;
use crate::lang::Language;
use crate::query::{AttributeQuery, Row};
use crate::store::AttributeStore;
use std::collections::BTreeSet;
use tracing::debug;

/// Resolves the attribute set of objects and of explicit attribute ids.
pub struct AttributeResolver<'s, S: AttributeStore + ?Sized> {
    store: &'s S,
}

impl<'s, S: AttributeStore + ?Sized> AttributeResolver<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Load attributes by id, each with every value bound to it.
    ///
    /// Returns `None` when `ids` is empty. Ids without a definition are
    /// silently absent from the result; a definition without bindings is
    /// still included.
    pub fn load_by_ids<I, T>(
        &self,
        ids: I,
        language: Language,
    ) -> Result<Option<AttributeCollection>>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let attribute_ids = distinct(ids);
        if attribute_ids.is_empty() {
            return Ok(None);
        }

        let requested = attribute_ids.len();
        let mut rows = fetch(
            self.store,
            &AttributeQuery::Definitions {
                attribute_ids,
                language,
            },
        )?;
        rows.sort_by(|a, b| by_position(a, b).then_with(|| a.object_id.cmp(&b.object_id)));

        let list = merge_rows(&rows, language);
        debug!(requested, found = list.len(), %language, "loaded attributes by id");
        Ok(Some(list))
    }

    /// Load every attribute bound to any of `object_ids`, one value per object.
    ///
    /// Returns `None` when `object_ids` is empty.
    pub fn load_by_object_ids<I, T>(
        &self,
        object_ids: I,
        language: Language,
    ) -> Result<Option<AttributeCollection>>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let object_ids = distinct(object_ids);
        if object_ids.is_empty() {
            return Ok(None);
        }

        let objects = object_ids.len();
        let mut rows = fetch(
            self.store,
            &AttributeQuery::ObjectBindings {
                object_ids,
                basket_only: false,
                language,
            },
        )?;
        rows.sort_by(|a, b| by_position(a, b).then_with(|| a.object_id.cmp(&b.object_id)));

        let list = merge_rows(&rows, language);
        debug!(objects, found = list.len(), %language, "loaded attributes by object id");
        Ok(Some(list))
    }

    /// Load the attributes of `object_id`, merged with those of `parent_id`.
    ///
    /// An attribute bound to both contributes one entry carrying both values;
    /// the object's own value is the effective one. Absent or empty
    /// `object_id` gives an empty collection.
    pub fn load(
        &self,
        object_id: Option<&str>,
        parent_id: Option<&str>,
        language: Language,
    ) -> Result<AttributeCollection> {
        let Some(object_id) = present(object_id) else {
            return Ok(AttributeCollection::keyed_by_attribute());
        };

        let mut rows = fetch(
            self.store,
            &AttributeQuery::ObjectBindings {
                object_ids: object_and_parent(object_id, parent_id),
                basket_only: false,
                language,
            },
        )?;
        rows.sort_by(|a, b| by_position(a, b).then_with(|| own_first(object_id, a, b)));

        let list = merge_rows(&rows, language);
        debug!(object_id, ?parent_id, found = list.len(), %language, "loaded object attributes");
        Ok(list)
    }
}

/// Attribute-keyed merge: rows of the same attribute fold into one entry,
/// in row order.
fn merge_rows(rows: &[Row], language: Language) -> AttributeCollection {
    let mut list = AttributeCollection::keyed_by_attribute();
    for row in rows {
        let mut attr = Attribute::from_row(row, language);
        attr.bind(row);
        list.merge_by_attribute(attr);
    }
    list
}

fn distinct<I, T>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    ids.into_iter()
        .map(|id| id.as_ref().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
