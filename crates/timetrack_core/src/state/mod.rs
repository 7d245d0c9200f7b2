//! Aggregate state composition.
//!
//! # Responsibility
//! - Compose the containers into one root state under fixed names.
//! - Route every dispatched action to exactly one container.
//! - Persist and restore the allow-listed containers.
//!
//! # Invariants
//! - `AppStore::dispatch` is the only write path into the root state.
//! - Reads hand out snapshots; callers never hold a live reference.

pub mod app_store;
pub mod persist;
pub mod root;
