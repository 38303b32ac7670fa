//! The resolved attribute entity.
//!
//! An [`Attribute`] is one definition projected into a single language, plus
//! whatever the resolution attached to it:
//!
//! - object bindings, keyed by object id (a variant and its parent can both
//!   carry a value for the same attribute)
//! - for category projections, the association's sort order, the distinct
//!   values found among the category's members, and the value a shopper
//!   has selected
//!
//! Attributes are plain data. Resolvers build them from store rows; callers
//! only read them.

use crate::lang::Language;
use crate::query::Row;
use serde::Serialize;

/// A value bound to one object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundValue {
    pub binding_id: String,
    pub object_id: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    id: String,
    title: String,
    language: Language,
    position: i64,
    display_in_basket: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    bindings: Vec<BoundValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    active_value: Option<String>,
}

impl Attribute {
    /// Project the definition columns of `row`. Bindings and values are
    /// attached separately.
    pub(crate) fn from_row(row: &Row, language: Language) -> Self {
        Self {
            id: row.attribute_id.clone(),
            title: row.title.clone(),
            language,
            position: row.position,
            display_in_basket: row.display_in_basket,
            bindings: Vec::new(),
            sort: row.sort,
            values: Vec::new(),
            active_value: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Title in [`Attribute::language`].
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The language the title and values were resolved in.
    pub fn language(&self) -> Language {
        self.language
    }

    pub fn display_position(&self) -> i64 {
        self.position
    }

    pub fn display_in_basket(&self) -> bool {
        self.display_in_basket
    }

    /// Association sort order, for attributes projected from a category.
    pub fn sort_order(&self) -> Option<i64> {
        self.sort
    }

    /// Value bound to `object_id`, if any.
    pub fn value_for(&self, object_id: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|b| b.object_id == object_id)
            .map(|b| b.value.as_str())
    }

    /// The effective value: the first binding attached.
    ///
    /// Object resolution attaches the object's own binding before its
    /// parent's, so a variant's value overrides the inherited one.
    pub fn value(&self) -> Option<&str> {
        self.bindings.first().map(|b| b.value.as_str())
    }

    /// Id of the first binding attached.
    pub fn binding_id(&self) -> Option<&str> {
        self.bindings.first().map(|b| b.binding_id.as_str())
    }

    pub fn bindings(&self) -> &[BoundValue] {
        &self.bindings
    }

    /// Distinct non-empty values across a category's member objects.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// The value selected for this attribute in a category filter.
    pub fn active_value(&self) -> Option<&str> {
        self.active_value.as_deref()
    }

    /// Attach the binding columns of `row`. Returns false when the row has no
    /// binding or the object is already bound.
    pub(crate) fn bind(&mut self, row: &Row) -> bool {
        let (Some(binding_id), Some(object_id)) = (&row.binding_id, &row.object_id) else {
            return false;
        };
        if self.bindings.iter().any(|b| &b.object_id == object_id) {
            return false;
        }
        self.bindings.push(BoundValue {
            binding_id: binding_id.clone(),
            object_id: object_id.clone(),
            value: row.value.clone().unwrap_or_default(),
        });
        true
    }

    /// Record a category value, keeping the list distinct.
    pub(crate) fn add_value(&mut self, value: &str) {
        if !value.is_empty() && !self.values.iter().any(|v| v == value) {
            self.values.push(value.to_string());
        }
    }

    pub(crate) fn set_active_value(&mut self, value: impl Into<String>) {
        self.active_value = Some(value.into());
    }

    /// Fold a later resolution of the same attribute into this one.
    ///
    /// Definition columns stay as first resolved; bindings and values from
    /// `other` are appended where they are new.
    pub(crate) fn absorb(&mut self, other: Attribute) {
        debug_assert_eq!(self.id, other.id);
        for binding in other.bindings {
            if !self.bindings.iter().any(|b| b.object_id == binding.object_id) {
                self.bindings.push(binding);
            }
        }
        for value in &other.values {
            self.add_value(value);
        }
        if self.active_value.is_none() {
            self.active_value = other.active_value;
        }
    }
}
