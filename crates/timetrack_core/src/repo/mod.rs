//! In-memory collection abstractions.
//!
//! # Responsibility
//! - Provide one generic create/update/delete/find contract reused by every
//!   container that owns a collection.
//!
//! # Invariants
//! - Insertion order is preserved.
//! - Update and delete against a missing id are silent no-ops, not errors.

pub mod entity_store;
