//! Domain records held by the state containers.
//!
//! # Responsibility
//! - Define the canonical account and project shapes shared by every slice.
//! - Keep identity generation and creation timestamps in one place.
//!
//! # Invariants
//! - Every record is identified by a random v4 UUID that is never reused.
//! - Field names serialize in camelCase to match the persisted client blob.

pub mod account;
pub mod project;
