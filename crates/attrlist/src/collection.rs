//! # Attribute Collections
//!
//! An [`AttributeCollection`] is an ordered, keyed container. Insertion order
//! is the resolution's sort contract, so resolvers sort rows before inserting.
//!
//! ## Keying
//!
//! A collection is keyed one of two ways, fixed at construction:
//!
//! | Kind | Key | Filled by | Repeated key |
//! |------|-----|-----------|--------------|
//! | [`KeyKind::Attribute`] | attribute id | [`merge_by_attribute`](AttributeCollection::merge_by_attribute) | folded into the existing entry |
//! | [`KeyKind::Binding`] | binding id | [`append_by_binding`](AttributeCollection::append_by_binding) | rejected, first entry kept |
//!
//! The two insert paths are separate methods. Attribute-keyed
//! resolution merges a variant and its parent into one entry; binding-keyed
//! resolution keeps every contribution as its own entry.

use crate::attribute::Attribute;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Attribute,
    Binding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeCollection {
    kind: KeyKind,
    entries: Vec<(String, Attribute)>,
    index: HashMap<String, usize>,
}

impl AttributeCollection {
    pub fn keyed_by_attribute() -> Self {
        Self::with_kind(KeyKind::Attribute)
    }

    pub fn keyed_by_binding() -> Self {
        Self::with_kind(KeyKind::Binding)
    }

    fn with_kind(kind: KeyKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn key_kind(&self) -> KeyKind {
        self.kind
    }

    /// Insert `attr` under its attribute id, or fold it into the entry
    /// already there. The entry keeps its original position.
    pub(crate) fn merge_by_attribute(&mut self, attr: Attribute) {
        debug_assert_eq!(self.kind, KeyKind::Attribute);
        let slot = self.index.get(attr.id()).copied();
        match slot {
            Some(slot) => self.entries[slot].1.absorb(attr),
            None => self.push(attr.id().to_string(), attr),
        }
    }

    /// Append `attr` under its binding id. Never overwrites: returns false and
    /// drops `attr` if the binding is already present or `attr` has none.
    pub(crate) fn append_by_binding(&mut self, attr: Attribute) -> bool {
        debug_assert_eq!(self.kind, KeyKind::Binding);
        let Some(key) = attr.binding_id().map(str::to_string) else {
            return false;
        };
        if self.index.contains_key(&key) {
            return false;
        }
        self.push(key, attr);
        true
    }

    fn push(&mut self, key: String, attr: Attribute) {
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, attr));
    }

    pub fn get(&self, key: &str) -> Option<&Attribute> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.entries.iter().map(|(key, attr)| (key.as_str(), attr))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.entries.iter().map(|(_, attr)| attr)
    }
}

impl IntoIterator for AttributeCollection {
    type Item = (String, Attribute);
    type IntoIter = std::vec::IntoIter<(String, Attribute)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

struct Entry<'a> {
    key: &'a str,
    attribute: &'a Attribute,
}

impl Serialize for Entry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entry = serializer.serialize_struct("Entry", 2)?;
        entry.serialize_field("key", self.key)?;
        entry.serialize_field("attribute", self.attribute)?;
        entry.end()
    }
}

/// Serializes as a list of `{ "key", "attribute" }` objects in resolution order.
impl Serialize for AttributeCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.iter().map(|(key, attribute)| Entry { key, attribute }))
    }
}
