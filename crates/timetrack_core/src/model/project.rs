//! Project domain model.
//!
//! # Invariants
//! - New projects always start as `ProjectStatus::Active`.
//! - Updates replace the whole record; there are no cross-field rules.

use crate::model::account::AccountId;
use crate::repo::entity_store::{Entity, EntityId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ProjectId = Uuid;

/// Lifecycle of a tracked project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Active,
    Completed,
    OnHold,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub code: String,
    pub start_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    /// Account that created the project.
    pub created_by: AccountId,
    pub status: ProjectStatus,
}

impl Entity for Project {
    const KIND: &'static str = "project";

    fn id(&self) -> EntityId {
        self.id
    }
}

/// Project creation input; id, timestamp and status are assigned on create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    pub code: String,
    pub start_date: NaiveDate,
    pub created_by: AccountId,
}

impl NewProject {
    pub fn into_project(self) -> Project {
        Project {
            id: Uuid::new_v4(),
            name: self.name,
            code: self.code,
            start_date: self.start_date,
            created_at: Utc::now(),
            created_by: self.created_by,
            status: ProjectStatus::Active,
        }
    }
}
