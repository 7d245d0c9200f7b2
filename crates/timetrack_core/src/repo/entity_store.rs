//! Generic entity collection keyed by UUID.
//!
//! # Responsibility
//! - Own one ordered collection of records and its merge rules
//!   (append, replace-by-id, remove-by-id).
//! - Enforce per-collection uniqueness through `Entity::collides_with`.
//!
//! # Invariants
//! - Records keep insertion order; `update` replaces in place.
//! - `create` never appends a record that collides with an existing one.
//! - Missing ids on `update`/`delete` are reported through return values
//!   only, never as errors.

use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Identifier shared by every stored entity kind.
pub type EntityId = Uuid;

/// A record that can live in an `EntityStore`.
pub trait Entity: Clone {
    /// Short label used in diagnostics (`entity=<KIND>`).
    const KIND: &'static str;
    /// Human-readable message surfaced when `collides_with` rejects a create.
    const DUPLICATE_MESSAGE: &'static str = "Record already exists.";

    fn id(&self) -> EntityId;

    /// Returns whether `other` violates a uniqueness rule of this kind.
    ///
    /// Kinds without uniqueness rules keep the default.
    fn collides_with(&self, _other: &Self) -> bool {
        false
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by entity store writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Create rejected because a stored record already claims a unique field.
    DuplicateEntity {
        kind: &'static str,
        message: String,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateEntity { message, .. } => write!(f, "{message}"),
        }
    }
}

impl Error for StoreError {}

/// Ordered in-memory collection of one entity kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityStore<E> {
    records: Vec<E>,
}

impl<E> Default for EntityStore<E> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<E: Entity> EntityStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects `candidate` when any stored record collides with it.
    pub fn ensure_unique(&self, candidate: &E) -> StoreResult<()> {
        if self
            .records
            .iter()
            .any(|existing| existing.collides_with(candidate))
        {
            debug!(
                "event=entity_create module=repo status=duplicate entity={}",
                E::KIND
            );
            return Err(StoreError::DuplicateEntity {
                kind: E::KIND,
                message: E::DUPLICATE_MESSAGE.to_string(),
            });
        }
        Ok(())
    }

    /// Validates uniqueness, appends `candidate` and returns the stored record.
    ///
    /// The candidate carries its own generated id and creation timestamp.
    pub fn create(&mut self, candidate: E) -> StoreResult<&E> {
        self.ensure_unique(&candidate)?;
        Ok(self.append(candidate))
    }

    /// Appends without a uniqueness check.
    ///
    /// Used by fulfilled merges whose payload was validated when it was built.
    pub fn append(&mut self, record: E) -> &E {
        let index = self.records.len();
        self.records.push(record);
        debug!(
            "event=entity_append module=repo status=ok entity={} len={}",
            E::KIND,
            self.records.len()
        );
        &self.records[index]
    }

    /// Replaces the record with the same id in place.
    ///
    /// Returns `false` and leaves the collection untouched when the id is
    /// absent.
    pub fn update(&mut self, record: E) -> bool {
        let id = record.id();
        match self.records.iter_mut().find(|existing| existing.id() == id) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => {
                debug!(
                    "event=entity_update module=repo status=missing entity={} id={id}",
                    E::KIND
                );
                false
            }
        }
    }

    /// Removes every record with `id` and returns how many were removed.
    pub fn delete(&mut self, id: EntityId) -> usize {
        let before = self.records.len();
        self.records.retain(|record| record.id() != id);
        before - self.records.len()
    }

    /// Returns the first record matching `predicate`.
    pub fn find(&self, predicate: impl Fn(&E) -> bool) -> Option<&E> {
        self.records.iter().find(|record| predicate(record))
    }

    pub fn find_mut(&mut self, predicate: impl Fn(&E) -> bool) -> Option<&mut E> {
        self.records.iter_mut().find(|record| predicate(record))
    }

    pub fn get(&self, id: EntityId) -> Option<&E> {
        self.find(|record| record.id() == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut E> {
        self.find_mut(|record| record.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[E] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<E: Entity> FromIterator<E> for EntityStore<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
