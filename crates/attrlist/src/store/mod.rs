//! # Storage Layer
//!
//! The [`AttributeStore`] trait is the only boundary between resolution and
//! persistence. A store receives an [`AttributeQuery`] and returns raw
//! [`Row`]s; it knows nothing about collections, ordering contracts, or
//! merge rules.
//!
//! ## Implementations
//!
//! - [`mem::MemStore`]: in-memory tables, for tests and embedding.
//! - [`fs::FsStore`]: a JSON catalog snapshot on disk, read on every query.
//!
//! Both delegate query execution to [`catalog::Catalog`], which implements
//! the joins described in [`crate::query`]. A SQL-backed store would instead
//! run [`AttributeQuery::to_sql`].
//!
//! ## Failure Semantics
//!
//! Queries that match nothing return an empty `Vec`. Any `Err` means the store
//! itself failed, and resolvers hand it to the caller unchanged.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── attrlist.toml       # Configuration
//! └── catalog.json        # Catalog snapshot
//! ```

use crate::error::Result;
use crate::query::{AttributeQuery, Row};

pub mod catalog;
pub mod fs;
pub mod mem;

/// Executes attribute reads against a relational store.
pub trait AttributeStore {
    /// Run `query` and return every matching row, in no particular order.
    fn query(&self, query: &AttributeQuery) -> Result<Vec<Row>>;
}

impl<S: AttributeStore + ?Sized> AttributeStore for &S {
    fn query(&self, query: &AttributeQuery) -> Result<Vec<Row>> {
        (**self).query(query)
    }
}
