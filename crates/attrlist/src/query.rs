//! # Query Contract
//!
//! Resolvers never touch tables directly. They describe the join they need as
//! an [`AttributeQuery`] and hand it to an [`AttributeStore`](crate::store::AttributeStore),
//! which returns flat [`Row`]s.
//!
//! Each query carries the active [`Language`]; the language picks the title and
//! value columns out of the const tables in [`crate::lang`]. For SQL-backed
//! stores, [`AttributeQuery::to_sql`] renders the equivalent parameterized
//! statement: identifiers come only from those tables, every id is a `?`
//! placeholder.
//!
//! ## Tables
//!
//! | Table | Columns |
//! |-------|---------|
//! | `attribute` | `id`, `title`/`title_N`, `position`, `display_in_basket` |
//! | `object2attribute` | `id`, `object_id`, `attribute_id`, `value`/`value_N` |
//! | `category2attribute` | `id`, `category_id`, `attribute_id`, `sort` |
//! | `object2category` | `id`, `category_id`, `object_id` |

use crate::lang::Language;
use std::collections::BTreeMap;

pub const ATTRIBUTE_TABLE: &str = "attribute";
pub const OBJECT_ATTRIBUTE_TABLE: &str = "object2attribute";
pub const CATEGORY_ATTRIBUTE_TABLE: &str = "category2attribute";
pub const CATEGORY_OBJECT_TABLE: &str = "object2category";

/// Selected attribute values narrowing a category's member objects.
///
/// Maps attribute id to the value a shopper picked in a filter UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    selected: BTreeMap<String, String>,
}

impl CategoryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, attribute_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.selected.insert(attribute_id.into(), value.into());
        self
    }

    pub fn get(&self, attribute_id: &str) -> Option<&str> {
        self.selected.get(attribute_id).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.selected.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A read the resolvers ask the store to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeQuery {
    /// Definitions with the given ids, left-joined with every object binding
    /// of those attributes. Definitions without bindings yield one row with no
    /// binding columns.
    Definitions {
        attribute_ids: Vec<String>,
        language: Language,
    },

    /// Non-empty bindings of the given objects, inner-joined to their
    /// definitions. With `basket_only`, restricted to definitions flagged for
    /// basket display.
    ObjectBindings {
        object_ids: Vec<String>,
        basket_only: bool,
        language: Language,
    },

    /// Associations of a category joined to their definitions and to the
    /// non-empty values of the category's member objects that pass `filter`.
    /// Associations without such a value yield no row.
    CategoryAttributes {
        category_id: String,
        filter: CategoryFilter,
        language: Language,
    },
}

impl AttributeQuery {
    pub fn language(&self) -> Language {
        match self {
            AttributeQuery::Definitions { language, .. }
            | AttributeQuery::ObjectBindings { language, .. }
            | AttributeQuery::CategoryAttributes { language, .. } => *language,
        }
    }

    /// Render the parameterized SQL statement for this query.
    pub fn to_sql(&self) -> SqlStatement {
        let lang = self.language();
        let title = lang.title_column();
        let value = lang.value_column();

        match self {
            AttributeQuery::Definitions { attribute_ids, .. } => SqlStatement {
                text: format!(
                    "SELECT a.id, a.{title}, a.position, a.display_in_basket, o.id, o.object_id, o.{value} \
                     FROM {ATTRIBUTE_TABLE} a \
                     LEFT JOIN {OBJECT_ATTRIBUTE_TABLE} o ON o.attribute_id = a.id \
                     WHERE a.id IN ({}) \
                     ORDER BY a.position, a.id",
                    placeholders(attribute_ids.len())
                ),
                params: attribute_ids.clone(),
            },
            AttributeQuery::ObjectBindings {
                object_ids,
                basket_only,
                ..
            } => {
                let basket = if *basket_only {
                    " AND a.display_in_basket = 1"
                } else {
                    ""
                };
                SqlStatement {
                    text: format!(
                        "SELECT a.id, a.{title}, a.position, a.display_in_basket, o.id, o.object_id, o.{value} \
                         FROM {OBJECT_ATTRIBUTE_TABLE} o \
                         JOIN {ATTRIBUTE_TABLE} a ON a.id = o.attribute_id \
                         WHERE o.object_id IN ({}) AND o.{value} != ''{basket} \
                         ORDER BY a.position, a.id",
                        placeholders(object_ids.len())
                    ),
                    params: object_ids.clone(),
                }
            }
            AttributeQuery::CategoryAttributes {
                category_id,
                filter,
                ..
            } => {
                let mut params = vec![category_id.clone()];
                let mut narrowing = String::new();
                for (attribute_id, selected) in filter.iter() {
                    narrowing.push_str(&format!(
                        " AND EXISTS (SELECT 1 FROM {OBJECT_ATTRIBUTE_TABLE} f \
                         WHERE f.object_id = m.object_id AND f.attribute_id = ? AND f.{value} = ?)"
                    ));
                    params.push(attribute_id.to_string());
                    params.push(selected.to_string());
                }
                params.push(category_id.clone());
                SqlStatement {
                    text: format!(
                        "SELECT a.id, a.{title}, a.position, a.display_in_basket, v.id, v.object_id, v.{value}, c.sort \
                         FROM {CATEGORY_ATTRIBUTE_TABLE} c \
                         JOIN {ATTRIBUTE_TABLE} a ON a.id = c.attribute_id \
                         JOIN {OBJECT_ATTRIBUTE_TABLE} v ON v.attribute_id = a.id AND v.{value} != '' \
                         AND v.object_id IN (SELECT m.object_id FROM {CATEGORY_OBJECT_TABLE} m \
                         WHERE m.category_id = ?{narrowing}) \
                         WHERE c.category_id = ? \
                         ORDER BY c.sort, a.position, a.{title}, v.{value}"
                    ),
                    params,
                }
            }
        }
    }
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// A rendered statement with its positional parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlStatement {
    pub text: String,
    pub params: Vec<String>,
}

/// One flat result row.
///
/// Definition columns are always present. Binding columns are `None` for
/// left-joined definitions without a binding; `sort` is only set by category
/// queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub attribute_id: String,
    pub title: String,
    pub position: i64,
    pub display_in_basket: bool,
    pub binding_id: Option<String>,
    pub object_id: Option<String>,
    pub value: Option<String>,
    pub sort: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn definitions_sql_uses_base_columns() {
        let stmt = AttributeQuery::Definitions {
            attribute_ids: ids(&["a", "b"]),
            language: Language::BASE,
        }
        .to_sql();
        assert!(stmt.text.contains("a.title,"));
        assert!(stmt.text.contains("o.value "));
        assert!(stmt.text.contains("IN (?, ?)"));
        assert_eq!(stmt.params, ids(&["a", "b"]));
    }

    #[test]
    fn object_bindings_sql_uses_language_columns() {
        let stmt = AttributeQuery::ObjectBindings {
            object_ids: ids(&["1672"]),
            basket_only: false,
            language: Language::new(1).unwrap(),
        }
        .to_sql();
        assert!(stmt.text.contains("a.title_1"));
        assert!(stmt.text.contains("o.value_1"));
        assert!(stmt.text.contains("AND o.value_1 != ''"));
        assert!(!stmt.text.contains("display_in_basket = 1"));
    }

    #[test]
    fn basket_sql_adds_flag_predicate() {
        let stmt = AttributeQuery::ObjectBindings {
            object_ids: ids(&["1672", "1351"]),
            basket_only: true,
            language: Language::BASE,
        }
        .to_sql();
        assert!(stmt.text.contains("AND a.display_in_basket = 1"));
        assert_eq!(stmt.params, ids(&["1672", "1351"]));
    }

    #[test]
    fn category_sql_binds_filter_parameters_in_order() {
        let filter = CategoryFilter::new().select("material", "Granit");
        let stmt = AttributeQuery::CategoryAttributes {
            category_id: "garden".to_string(),
            filter,
            language: Language::new(2).unwrap(),
        }
        .to_sql();
        assert!(stmt.text.contains("ORDER BY c.sort, a.position, a.title_2, v.value_2"));
        assert_eq!(stmt.text.matches("EXISTS").count(), 1);
        assert_eq!(stmt.params, ids(&["garden", "material", "Granit", "garden"]));
    }

    #[test]
    fn filter_lookup() {
        let filter = CategoryFilter::new().select("color", "Red");
        assert_eq!(filter.get("color"), Some("Red"));
        assert_eq!(filter.get("size"), None);
        assert!(!filter.is_empty());
        assert!(CategoryFilter::new().is_empty());
    }
}
