//! Three-phase async action protocol.
//!
//! # Responsibility
//! - Name every asynchronous operation and its latency class.
//! - Model the pending -> fulfilled | rejected lifecycle as one generic type.
//! - Provide the shared in-flight/last-error bookkeeping every container
//!   applies before its own merge rule.
//!
//! # Invariants
//! - Pending always sets in-flight and clears the last error.
//! - Settling (either way) always clears in-flight.
//! - Only a rejection writes the last error; a rejection never carries a
//!   payload to merge.

pub mod unit_of_work;

use crate::repo::entity_store::StoreError;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const USER_NOT_FOUND_MESSAGE: &str = "User not found. Please register first.";

/// Failure surfaced on the rejected phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// Uniqueness violation on create.
    DuplicateEntity(String),
    /// Login identifier matched no registered account.
    UserNotFound(String),
}

impl ActionError {
    pub fn user_not_found() -> Self {
        Self::UserNotFound(USER_NOT_FOUND_MESSAGE.to_string())
    }

    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateEntity(_) => "duplicate_entity",
            Self::UserNotFound(_) => "user_not_found",
        }
    }
}

impl Display for ActionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateEntity(message) | Self::UserNotFound(message) => {
                write!(f, "{message}")
            }
        }
    }
}

impl Error for ActionError {}

impl From<StoreError> for ActionError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::DuplicateEntity { message, .. } => Self::DuplicateEntity(message),
        }
    }
}

/// Simulated round-trip class of an async action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyClass {
    Auth,
    Data,
}

/// Every asynchronous operation the store can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Login,
    Register,
    CreateProject,
    UpdateProject,
    DeleteProject,
    CreateUser,
    UpdateUser,
    DeleteUser,
    AssignManager,
}

impl ActionKind {
    /// Action type string in `<slice>/<operation>` form.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Login => "auth/login",
            Self::Register => "auth/register",
            Self::CreateProject => "projects/create",
            Self::UpdateProject => "projects/update",
            Self::DeleteProject => "projects/delete",
            Self::CreateUser => "users/create",
            Self::UpdateUser => "users/update",
            Self::DeleteUser => "users/delete",
            Self::AssignManager => "users/assignManager",
        }
    }

    pub fn latency_class(self) -> LatencyClass {
        match self {
            Self::Login | Self::Register => LatencyClass::Auth,
            _ => LatencyClass::Data,
        }
    }
}

/// Observable step of a dispatched action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Pending,
    Fulfilled,
    Rejected,
    /// Synchronous action applied immediately.
    Applied,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fulfilled => "fulfilled",
            Self::Rejected => "rejected",
            Self::Applied => "applied",
        }
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of the three-phase protocol, carrying the payload to merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionPhase<T> {
    Pending,
    Fulfilled(T),
    Rejected(ActionError),
}

impl<T> ActionPhase<T> {
    /// Converts the outcome of a unit of work into its settled phase.
    pub fn settle(result: Result<T, ActionError>) -> Self {
        match result {
            Ok(payload) => Self::Fulfilled(payload),
            Err(err) => Self::Rejected(err),
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            Self::Pending => Phase::Pending,
            Self::Fulfilled(_) => Phase::Fulfilled,
            Self::Rejected(_) => Phase::Rejected,
        }
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// In-flight flag and last error owned by each container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsyncStatus {
    pub is_loading: bool,
    pub error: Option<String>,
}

impl AsyncStatus {
    /// Applies the status half of `phase` and hands back the fulfilled
    /// payload, if any, for the container's merge rule.
    pub fn track<T>(&mut self, phase: ActionPhase<T>) -> Option<T> {
        match phase {
            ActionPhase::Pending => {
                self.is_loading = true;
                self.error = None;
                None
            }
            ActionPhase::Fulfilled(payload) => {
                self.is_loading = false;
                Some(payload)
            }
            ActionPhase::Rejected(err) => {
                self.is_loading = false;
                self.error = Some(err.to_string());
                None
            }
        }
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
