//! In-process execution of [`AttributeQuery`] joins over catalog tables.

use crate::lang::Language;
use crate::model::{
    AttributeDefinition, CategoryAttributeAssociation, CategoryMembership, ObjectAttributeValue,
};
use crate::query::{AttributeQuery, CategoryFilter, Row};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A snapshot of the four catalog tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub attributes: Vec<AttributeDefinition>,
    #[serde(default)]
    pub object_attributes: Vec<ObjectAttributeValue>,
    #[serde(default)]
    pub category_attributes: Vec<CategoryAttributeAssociation>,
    #[serde(default)]
    pub category_members: Vec<CategoryMembership>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn definition(&self, id: &str) -> Option<&AttributeDefinition> {
        self.attributes.iter().find(|def| def.id == id)
    }

    /// Run a query against the snapshot.
    pub fn execute(&self, query: &AttributeQuery) -> Vec<Row> {
        match query {
            AttributeQuery::Definitions {
                attribute_ids,
                language,
            } => self.definitions(attribute_ids, *language),
            AttributeQuery::ObjectBindings {
                object_ids,
                basket_only,
                language,
            } => self.object_bindings(object_ids, *basket_only, *language),
            AttributeQuery::CategoryAttributes {
                category_id,
                filter,
                language,
            } => self.category_attributes(category_id, filter, *language),
        }
    }

    fn definitions(&self, attribute_ids: &[String], lang: Language) -> Vec<Row> {
        let mut rows = Vec::new();
        for def in self
            .attributes
            .iter()
            .filter(|def| attribute_ids.contains(&def.id))
        {
            let mut bound = false;
            for binding in self
                .object_attributes
                .iter()
                .filter(|b| b.attribute_id == def.id)
            {
                rows.push(binding_row(def, binding, lang));
                bound = true;
            }
            if !bound {
                rows.push(definition_row(def, lang));
            }
        }
        rows
    }

    fn object_bindings(
        &self,
        object_ids: &[String],
        basket_only: bool,
        lang: Language,
    ) -> Vec<Row> {
        self.object_attributes
            .iter()
            .filter(|b| object_ids.contains(&b.object_id))
            // an empty value never becomes the effective one
            .filter(|b| !b.value.get(lang).is_empty())
            .filter_map(|b| self.definition(&b.attribute_id).map(|def| (def, b)))
            .filter(|(def, _)| !basket_only || def.display_in_basket)
            .map(|(def, b)| binding_row(def, b, lang))
            .collect()
    }

    fn category_attributes(
        &self,
        category_id: &str,
        filter: &CategoryFilter,
        lang: Language,
    ) -> Vec<Row> {
        let members: HashSet<&str> = self
            .category_members
            .iter()
            .filter(|m| m.category_id == category_id)
            .map(|m| m.object_id.as_str())
            .filter(|object_id| self.matches_filter(object_id, filter, lang))
            .collect();

        let mut rows = Vec::new();
        for assoc in self
            .category_attributes
            .iter()
            .filter(|a| a.category_id == category_id)
        {
            let Some(def) = self.definition(&assoc.attribute_id) else {
                continue;
            };

            // inner join: an association with nothing to select yields no row
            for binding in self.object_attributes.iter().filter(|b| {
                b.attribute_id == def.id
                    && members.contains(b.object_id.as_str())
                    && !b.value.get(lang).is_empty()
            }) {
                let mut row = binding_row(def, binding, lang);
                row.sort = Some(assoc.sort);
                rows.push(row);
            }
        }
        rows
    }

    /// True if `object_id` carries every value selected in `filter`.
    fn matches_filter(&self, object_id: &str, filter: &CategoryFilter, lang: Language) -> bool {
        filter.iter().all(|(attribute_id, selected)| {
            self.object_attributes.iter().any(|b| {
                b.object_id == object_id
                    && b.attribute_id == attribute_id
                    && b.value.get(lang) == selected
            })
        })
    }
}

fn definition_row(def: &AttributeDefinition, lang: Language) -> Row {
    Row {
        attribute_id: def.id.clone(),
        title: def.title.get(lang).to_string(),
        position: def.position,
        display_in_basket: def.display_in_basket,
        ..Default::default()
    }
}

fn binding_row(def: &AttributeDefinition, binding: &ObjectAttributeValue, lang: Language) -> Row {
    Row {
        binding_id: Some(binding.id.clone()),
        object_id: Some(binding.object_id.clone()),
        value: Some(binding.value.get(lang).to_string()),
        ..definition_row(def, lang)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LocalizedText;

    fn catalog() -> Catalog {
        Catalog {
            attributes: vec![
                AttributeDefinition::new(
                    "size",
                    LocalizedText::new("Größe").with(Language::new(1).unwrap(), "Size"),
                )
                .at_position(1),
                AttributeDefinition::new("color", "Farbe").at_position(2).in_basket(),
                AttributeDefinition::new("unused", "Leer").at_position(3),
            ],
            object_attributes: vec![
                ObjectAttributeValue::new(
                    "shirt",
                    "size",
                    LocalizedText::new("M").with(Language::new(1).unwrap(), "M"),
                )
                .with_id("b1"),
                ObjectAttributeValue::new("shirt", "color", "Rot").with_id("b2"),
                ObjectAttributeValue::new("pants", "color", "").with_id("b3"),
                ObjectAttributeValue::new("shirt", "ghost", "orphan").with_id("b4"),
            ],
            category_attributes: vec![CategoryAttributeAssociation::new("apparel", "color", 10)],
            category_members: vec![
                CategoryMembership::new("apparel", "shirt"),
                CategoryMembership::new("apparel", "pants"),
            ],
        }
    }

    #[test]
    fn definitions_left_join_bindings() {
        let rows = catalog().execute(&AttributeQuery::Definitions {
            attribute_ids: vec!["size".into(), "unused".into(), "missing".into()],
            language: Language::BASE,
        });
        assert_eq!(rows.len(), 2);
        let size = rows.iter().find(|r| r.attribute_id == "size").unwrap();
        assert_eq!(size.binding_id.as_deref(), Some("b1"));
        let unused = rows.iter().find(|r| r.attribute_id == "unused").unwrap();
        assert_eq!(unused.binding_id, None);
        assert_eq!(unused.value, None);
    }

    #[test]
    fn object_bindings_skip_orphaned_bindings() {
        let rows = catalog().execute(&AttributeQuery::ObjectBindings {
            object_ids: vec!["shirt".into()],
            basket_only: false,
            language: Language::BASE,
        });
        let ids: Vec<&str> = rows.iter().map(|r| r.attribute_id.as_str()).collect();
        assert_eq!(ids, vec!["size", "color"]);
    }

    #[test]
    fn object_bindings_basket_only() {
        let rows = catalog().execute(&AttributeQuery::ObjectBindings {
            object_ids: vec!["shirt".into()],
            basket_only: true,
            language: Language::BASE,
        });
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].attribute_id, "color");
    }

    #[test]
    fn object_bindings_read_language_column() {
        let rows = catalog().execute(&AttributeQuery::ObjectBindings {
            object_ids: vec!["shirt".into()],
            basket_only: false,
            language: Language::new(1).unwrap(),
        });
        // color has no value_1, so only size comes back
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Size");
        assert_eq!(rows[0].value.as_deref(), Some("M"));
    }

    #[test]
    fn object_bindings_skip_empty_values() {
        let rows = catalog().execute(&AttributeQuery::ObjectBindings {
            object_ids: vec!["shirt".into(), "pants".into()],
            basket_only: true,
            language: Language::BASE,
        });
        let bindings: Vec<_> = rows.iter().map(|r| r.binding_id.as_deref()).collect();
        assert_eq!(bindings, vec![Some("b2")]);
    }

    #[test]
    fn category_attributes_skip_empty_values() {
        let rows = catalog().execute(&AttributeQuery::CategoryAttributes {
            category_id: "apparel".into(),
            filter: CategoryFilter::new(),
            language: Language::BASE,
        });
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value.as_deref(), Some("Rot"));
        assert_eq!(rows[0].sort, Some(10));
    }

    #[test]
    fn category_attributes_without_values_yield_nothing() {
        let rows = catalog().execute(&AttributeQuery::CategoryAttributes {
            category_id: "apparel".into(),
            filter: CategoryFilter::new().select("size", "XL"),
            language: Language::BASE,
        });
        assert!(rows.is_empty());
    }
}
