use super::fetch;
use crate::attribute::Attribute;
use crate::collection::AttributeCollection;
use crate::error::Result;
use crate::lang::Language;
use crate::query::{AttributeQuery, CategoryFilter};
use crate::store::AttributeStore;
use tracing::debug;

/// Projects the attributes attached to a category, with the values found
/// among the category's member objects.
pub struct CategoryAttributeProjector<'s, S: AttributeStore + ?Sized> {
    store: &'s S,
}

impl<'s, S: AttributeStore + ?Sized> CategoryAttributeProjector<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Load the attributes associated with `category_id`, ordered by the
    /// association's sort order. Associations none of the category's members
    /// carry a value for are left out.
    pub fn load_for_category(
        &self,
        category_id: &str,
        language: Language,
    ) -> Result<AttributeCollection> {
        self.load_for_category_filtered(category_id, language, &CategoryFilter::default())
    }

    /// Like [`load_for_category`](Self::load_for_category), but only member
    /// objects carrying every value selected in `filter` contribute values.
    /// Attributes with a selection get it as their active value.
    pub fn load_for_category_filtered(
        &self,
        category_id: &str,
        language: Language,
        filter: &CategoryFilter,
    ) -> Result<AttributeCollection> {
        let mut list = AttributeCollection::keyed_by_attribute();
        if category_id.is_empty() {
            return Ok(list);
        }

        let mut rows = fetch(
            self.store,
            &AttributeQuery::CategoryAttributes {
                category_id: category_id.to_string(),
                filter: filter.clone(),
                language,
            },
        )?;
        rows.sort_by(|a, b| {
            a.sort
                .cmp(&b.sort)
                .then_with(|| a.position.cmp(&b.position))
                .then_with(|| a.title.cmp(&b.title))
                .then_with(|| a.attribute_id.cmp(&b.attribute_id))
                .then_with(|| a.value.cmp(&b.value))
        });

        for row in &rows {
            let mut attr = Attribute::from_row(row, language);
            if let Some(value) = &row.value {
                attr.add_value(value);
            }
            if let Some(selected) = filter.get(&row.attribute_id) {
                attr.set_active_value(selected);
            }
            list.merge_by_attribute(attr);
        }

        debug!(category_id, found = list.len(), %language, "loaded category attributes");
        Ok(list)
    }
}
