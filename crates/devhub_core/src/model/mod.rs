//! Domain model for the reference catalog and persisted user state.
//!
//! # Responsibility
//! - Define the immutable catalog records every view projects over.
//! - Define the persisted shapes (messages, theme) written through storage.
//!
//! # Invariants
//! - Catalog records are identified by a stable string ID, unique per collection.
//! - Catalog records are never mutated after construction.

pub mod catalog;
pub mod message;
pub mod seed;
pub mod theme;
