//! # Resolution Layer
//!
//! Each resolver turns one caller request into one store query, then sorts
//! the returned rows and builds an
//! [`AttributeCollection`](crate::collection::AttributeCollection).
//!
//! | Resolver | Operation | Keyed by | Order |
//! |----------|-----------|----------|-------|
//! | [`AttributeResolver`] | `load_by_ids` | attribute id | position, attribute id |
//! | [`AttributeResolver`] | `load_by_object_ids` | attribute id | position, attribute id |
//! | [`AttributeResolver`] | `load` | attribute id | position, attribute id |
//! | [`BasketAttributeFilter`] | `load_displayable_in_basket` | binding id | position, attribute id, object before parent |
//! | [`CategoryAttributeProjector`] | `load_for_category` | attribute id | association sort, position, title |
//!
//! ## Empty Results
//!
//! - Absent or empty object/category ids resolve to an empty collection, not an error.
//! - `load_by_ids` and `load_by_object_ids` return `None` when given no ids at all,
//!   and `Some(empty)` when the ids match nothing.
//!
//! ## Errors
//!
//! Store errors are returned as-is. Resolvers never retry and never swallow
//! a failed read.
//!
//! ## Language
//!
//! Every operation takes the active [`Language`](crate::lang::Language)
//! explicitly. Resolvers hold no state besides the store reference, so they
//! are cheap to build per request and safe to use from parallel callers.

use crate::error::Result;
use crate::query::{AttributeQuery, Row};
use crate::store::AttributeStore;
use std::cmp::Ordering;
use tracing::trace;

pub mod basket;
pub mod category;
pub mod resolver;

pub use basket::BasketAttributeFilter;
pub use category::CategoryAttributeProjector;
pub use resolver::AttributeResolver;

/// Absent and empty ids both mean "nothing to resolve".
fn present(id: Option<&str>) -> Option<&str> {
    id.filter(|id| !id.is_empty())
}

fn fetch<S: AttributeStore + ?Sized>(store: &S, query: &AttributeQuery) -> Result<Vec<Row>> {
    trace!(sql = %query.to_sql().text, "attribute query");
    store.query(query)
}

/// Display position, then attribute id.
fn by_position(a: &Row, b: &Row) -> Ordering {
    a.position
        .cmp(&b.position)
        .then_with(|| a.attribute_id.cmp(&b.attribute_id))
}

/// Rows bound to `object_id` sort before rows bound to anything else.
fn own_first(object_id: &str, a: &Row, b: &Row) -> Ordering {
    let rank = |row: &Row| row.object_id.as_deref() != Some(object_id);
    rank(a)
        .cmp(&rank(b))
        .then_with(|| a.object_id.cmp(&b.object_id))
        .then_with(|| a.binding_id.cmp(&b.binding_id))
}

/// The ids to query for an object and its optional parent.
fn object_and_parent(object_id: &str, parent_id: Option<&str>) -> Vec<String> {
    let mut ids = vec![object_id.to_string()];
    if let Some(parent_id) = present(parent_id).filter(|p| *p != object_id) {
        ids.push(parent_id.to_string());
    }
    ids
}
