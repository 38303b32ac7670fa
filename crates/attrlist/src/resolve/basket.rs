use super::{by_position, fetch, object_and_parent, own_first, present};
use crate::attribute::Attribute;
use crate::collection::AttributeCollection;
use crate::error::Result;
use crate::lang::Language;
use crate::query::AttributeQuery;
use crate::store::AttributeStore;
use tracing::debug;

/// Resolves the attributes shown in the basket and on order review.
pub struct BasketAttributeFilter<'s, S: AttributeStore + ?Sized> {
    store: &'s S,
}

impl<'s, S: AttributeStore + ?Sized> BasketAttributeFilter<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Load the basket-displayable attributes of `object_id` and `parent_id`.
    ///
    /// Results are keyed by binding id, so an attribute displayable on both
    /// the object and its parent appears twice, once per value.
    pub fn load_displayable_in_basket(
        &self,
        object_id: Option<&str>,
        parent_id: Option<&str>,
        language: Language,
    ) -> Result<AttributeCollection> {
        let mut list = AttributeCollection::keyed_by_binding();
        let Some(object_id) = present(object_id) else {
            return Ok(list);
        };

        let mut rows = fetch(
            self.store,
            &AttributeQuery::ObjectBindings {
                object_ids: object_and_parent(object_id, parent_id),
                basket_only: true,
                language,
            },
        )?;
        rows.sort_by(|a, b| by_position(a, b).then_with(|| own_first(object_id, a, b)));

        for row in &rows {
            let mut attr = Attribute::from_row(row, language);
            attr.bind(row);
            // binding-keyed: object and parent contributions never collide
            list.append_by_binding(attr);
        }

        debug!(object_id, ?parent_id, found = list.len(), %language, "loaded basket attributes");
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::KeyKind;
    use crate::error::AttrError;
    use crate::model::LocalizedText;
    use crate::store::mem::fixtures::{CatalogFixture, PARENT, VARIANT};

    #[test]
    fn excludes_attributes_not_shown_in_basket() {
        let fixture = CatalogFixture::garden_shop();
        let filter = BasketAttributeFilter::new(&fixture.store);
        let list = filter
            .load_displayable_in_basket(Some(VARIANT), Some(PARENT), Language::BASE)
            .unwrap();

        assert_eq!(list.key_kind(), KeyKind::Binding);
        assert!(list.attributes().all(Attribute::display_in_basket));
        assert!(list.attributes().all(|a| a.id() != "color" && a.id() != "weight"));
    }

    #[test]
    fn keeps_object_and_parent_values_apart() {
        let fixture = CatalogFixture::garden_shop();
        let filter = BasketAttributeFilter::new(&fixture.store);
        let list = filter
            .load_displayable_in_basket(Some(VARIANT), Some(PARENT), Language::BASE)
            .unwrap();

        let entries: Vec<(&str, Option<&str>)> = list
            .attributes()
            .map(|a| (a.id(), a.value()))
            .collect();
        assert_eq!(
            entries,
            vec![
                ("diameter", Some("25 cm")),
                ("diameter", Some("30 cm")),
                ("material", Some("Granit")),
            ]
        );

        for (key, attr) in list.iter() {
            assert_eq!(Some(key), attr.binding_id());
        }
    }

    #[test]
    fn without_parent_only_own_bindings() {
        let fixture = CatalogFixture::garden_shop();
        let filter = BasketAttributeFilter::new(&fixture.store);
        let list = filter
            .load_displayable_in_basket(Some(VARIANT), None, Language::BASE)
            .unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.attributes().next().unwrap().value_for(VARIANT), Some("25 cm"));
    }

    #[test]
    fn nothing_displayable_is_empty() {
        let fixture = CatalogFixture::new()
            .with_attribute("color", "Farbe", 1)
            .with_value("1672", "color", "Rot");
        let filter = BasketAttributeFilter::new(&fixture.store);
        let list = filter
            .load_displayable_in_basket(Some("1672"), None, Language::BASE)
            .unwrap();
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn absent_object_is_empty() {
        let fixture = CatalogFixture::garden_shop();
        let filter = BasketAttributeFilter::new(&fixture.store);
        assert!(filter
            .load_displayable_in_basket(None, Some(PARENT), Language::BASE)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn other_language_values() {
        let fixture = CatalogFixture::garden_shop();
        let filter = BasketAttributeFilter::new(&fixture.store);
        let list = filter
            .load_displayable_in_basket(Some(VARIANT), Some(PARENT), Language::new(1).unwrap())
            .unwrap();
        let material = list.attributes().find(|a| a.id() == "material").unwrap();
        assert_eq!(material.title(), "Material");
        assert_eq!(material.value(), Some("Granite"));
    }

    #[test]
    fn untranslated_values_are_not_shown() {
        let english = Language::new(1).unwrap();
        let fixture = CatalogFixture::new()
            .with_basket_attribute("material", "Material", 1)
            .with_value(VARIANT, "material", "Basalt")
            .with_text(
                PARENT,
                "material",
                LocalizedText::new("Granit").with(english, "Granite"),
            );
        let filter = BasketAttributeFilter::new(&fixture.store);

        assert!(filter
            .load_displayable_in_basket(Some(VARIANT), None, english)
            .unwrap()
            .is_empty());

        let list = filter
            .load_displayable_in_basket(Some(VARIANT), Some(PARENT), english)
            .unwrap();
        let values: Vec<_> = list.attributes().map(Attribute::value).collect();
        assert_eq!(values, vec![Some("Granite")]);
    }

    #[test]
    fn store_failure_propagates() {
        let fixture = CatalogFixture::garden_shop();
        fixture.store.set_simulate_read_error(true);
        let filter = BasketAttributeFilter::new(&fixture.store);
        assert!(matches!(
            filter.load_displayable_in_basket(Some(VARIANT), None, Language::BASE),
            Err(AttrError::Store(_))
        ));
    }
}
