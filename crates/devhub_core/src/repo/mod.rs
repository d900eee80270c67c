//! Persisted user state layered on the reference catalog.
//!
//! # Responsibility
//! - Read-modify-write annotation sets and channel logs through [`crate::storage::KvStore`].
//! - Keep storage key composition inside this layer.
//!
//! # Invariants
//! - Every mutation writes the full resulting value (no partial updates).
//! - Mutations are applied in call order; there is no batching or reordering.

pub mod annotation_repo;
pub mod channel_repo;
