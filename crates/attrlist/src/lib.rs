//! # Attrlist Architecture
//!
//! Attrlist resolves the attributes of catalog entities: the ordered
//! name/value pairs ("Diameter: 25 cm") shown for a product, its basket line,
//! or a category's filter panel. Attributes can be bound to a product
//! directly, inherited from a variant's parent, or attached to a category.
//!
//! It is a read-side library. Defining attributes, walking the category
//! tree, and rendering are the caller's business.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade, one method per resolution                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Resolution Layer (resolve/)                                │
//! │  - Builds one query per call, sorts rows, merges entries    │
//! │  - Returns AttributeCollection                              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - AttributeStore trait: AttributeQuery in, rows out        │
//! │  - FsStore (JSON snapshot), MemStore (testing)              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Languages
//!
//! Titles and values live in one column per language. The active
//! [`lang::Language`] is passed into every call and mapped to a fixed column
//! name; see [`lang`].
//!
//! ## Empty vs Absent
//!
//! "Nothing to resolve" (no object id) gives an empty collection. "Nothing
//! requested" (an empty id list for `load_by_ids`) gives `None`. Callers rely
//! on the difference.
//!
//! ## Module Overview
//!
//! - [`api`]: Facade over the resolvers
//! - [`resolve`]: `AttributeResolver`, `BasketAttributeFilter`, `CategoryAttributeProjector`
//! - [`collection`]: Ordered, keyed result container
//! - [`attribute`]: The resolved attribute entity
//! - [`query`]: Query plans, result rows, SQL rendering
//! - [`store`]: Storage trait and backends
//! - [`model`]: Catalog table rows
//! - [`lang`]: Languages and column mapping
//! - [`config`] / [`init`]: Configuration and context setup
//! - [`error`]: Error types

pub mod api;
pub mod attribute;
pub mod collection;
pub mod config;
pub mod error;
pub mod init;
pub mod lang;
pub mod model;
pub mod query;
pub mod resolve;
pub mod store;

#[cfg(test)]
pub mod test_utils;

pub use api::AttributeApi;
pub use attribute::Attribute;
pub use collection::AttributeCollection;
pub use error::{AttrError, Result};
pub use lang::Language;
