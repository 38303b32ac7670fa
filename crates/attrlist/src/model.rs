//! # Catalog Rows
//!
//! Row types for the four logical tables the resolvers read:
//!
//! - [`AttributeDefinition`]: id, per-language title, display position, basket flag
//! - [`ObjectAttributeValue`]: binding of one attribute to one object, with a per-language value
//! - [`CategoryAttributeAssociation`]: binding of one attribute to a category, with its own sort order
//! - [`CategoryMembership`]: which objects belong to which category
//!
//! Rows are owned by the store and read-only to resolution. Every row carries
//! its own identity (`id`), which for bindings is the binding id used to key
//! basket-filtered results.

use crate::lang::Language;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Language-dependent text, one slot per language column.
///
/// Slot 0 is the base column. Slots beyond the stored length read as the
/// empty string, which is what an unset (NULL) column looks like to callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(Vec<String>);

impl LocalizedText {
    pub fn new(base: impl Into<String>) -> Self {
        LocalizedText(vec![base.into()])
    }

    /// Builder form of [`LocalizedText::set`].
    pub fn with(mut self, lang: Language, text: impl Into<String>) -> Self {
        self.set(lang, text);
        self
    }

    pub fn set(&mut self, lang: Language, text: impl Into<String>) {
        let idx = lang.index();
        if self.0.len() <= idx {
            self.0.resize(idx + 1, String::new());
        }
        self.0[idx] = text.into();
    }

    /// Read the column for `lang`.
    pub fn get(&self, lang: Language) -> &str {
        self.0.get(lang.index()).map(String::as_str).unwrap_or("")
    }
}

impl From<&str> for LocalizedText {
    fn from(base: &str) -> Self {
        LocalizedText::new(base)
    }
}

impl From<String> for LocalizedText {
    fn from(base: String) -> Self {
        LocalizedText::new(base)
    }
}

fn new_row_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    pub id: String,
    pub title: LocalizedText,
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub display_in_basket: bool,
}

impl AttributeDefinition {
    pub fn new(id: impl Into<String>, title: impl Into<LocalizedText>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            position: 0,
            display_in_basket: false,
        }
    }

    pub fn at_position(mut self, position: i64) -> Self {
        self.position = position;
        self
    }

    pub fn in_basket(mut self) -> Self {
        self.display_in_basket = true;
        self
    }
}

/// One attribute bound to one catalog object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectAttributeValue {
    /// Binding id (identity of the join row itself)
    pub id: String,
    pub object_id: String,
    pub attribute_id: String,
    pub value: LocalizedText,
}

impl ObjectAttributeValue {
    /// Create a binding with a freshly generated binding id.
    pub fn new(
        object_id: impl Into<String>,
        attribute_id: impl Into<String>,
        value: impl Into<LocalizedText>,
    ) -> Self {
        Self {
            id: new_row_id(),
            object_id: object_id.into(),
            attribute_id: attribute_id.into(),
            value: value.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// One attribute attached to a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAttributeAssociation {
    pub id: String,
    pub category_id: String,
    pub attribute_id: String,
    /// Sort order within the category, independent of the attribute's position
    #[serde(default)]
    pub sort: i64,
}

impl CategoryAttributeAssociation {
    pub fn new(category_id: impl Into<String>, attribute_id: impl Into<String>, sort: i64) -> Self {
        Self {
            id: new_row_id(),
            category_id: category_id.into(),
            attribute_id: attribute_id.into(),
            sort,
        }
    }
}

/// An object listed in a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMembership {
    pub id: String,
    pub category_id: String,
    pub object_id: String,
}

impl CategoryMembership {
    pub fn new(category_id: impl Into<String>, object_id: impl Into<String>) -> Self {
        Self {
            id: new_row_id(),
            category_id: category_id.into(),
            object_id: object_id.into(),
        }
    }
}
