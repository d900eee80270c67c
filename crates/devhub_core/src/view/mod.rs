//! Derived views over the reference catalog.
//!
//! # Responsibility
//! - Project catalog collections through transient query state.
//! - Keep projection ordering deterministic.
//!
//! # Invariants
//! - Stage order is category filter, then text search, then sort.
//! - Projections borrow from the catalog and never mutate it.

pub mod collate;
pub mod query;

pub use query::{project, CategoryFilter, QueryState, SortKey, FILTER_ALL};
