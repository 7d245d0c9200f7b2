//! Account domain model.
//!
//! # Responsibility
//! - Define the identity record used by auth (registered accounts) and by
//!   user management (managed users).
//! - Provide draft types for registration and user creation.
//!
//! # Invariants
//! - `username` and `email` are unique within one collection; uniqueness is
//!   enforced by the owning `EntityStore`, not by this type.
//! - `manager_id` is a bare reference; it is never validated against a
//!   collection.

use crate::repo::entity_store::{Entity, EntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for accounts and managed users.
pub type AccountId = Uuid;

/// Access level of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Employee,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Employee => "employee",
        }
    }
}

/// Identity record for an authenticated or managed user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<AccountId>,
    pub created_at: DateTime<Utc>,
}

/// Users managed by admins share the account shape but live in their own
/// collection with an independent uniqueness domain.
pub type ManagedUser = Account;

impl Account {
    /// Creates an account with a generated ID and the current UTC time.
    pub fn new(username: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            role,
            manager_id: None,
            created_at: Utc::now(),
        }
    }

    /// Returns whether `identifier` equals this account's username or email.
    ///
    /// Matching is exact and case-sensitive.
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        self.email == identifier || self.username == identifier
    }

    /// Returns whether another account claims this username or email.
    pub fn shares_identity_with(&self, other: &Self) -> bool {
        self.email == other.email || self.username == other.username
    }
}

impl Entity for Account {
    const KIND: &'static str = "account";
    const DUPLICATE_MESSAGE: &'static str = "User with this email or username already exists.";

    fn id(&self) -> EntityId {
        self.id
    }

    fn collides_with(&self, other: &Self) -> bool {
        self.shares_identity_with(other)
    }
}

/// Self-service registration input.
///
/// `password` is accepted for interface parity but is neither stored nor
/// verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    /// Builds the account a successful registration appends.
    ///
    /// Registration always yields an `employee` without a manager.
    pub fn into_account(self) -> Account {
        Account::new(self.username, self.email, Role::Employee)
    }
}

/// Login input. `identifier` is matched against username or email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

/// Admin-side user creation input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub manager_id: Option<AccountId>,
}

impl NewUser {
    /// Builds the managed user a successful creation appends.
    pub fn into_user(self) -> ManagedUser {
        let mut user = Account::new(self.username, self.email, self.role);
        user.manager_id = self.manager_id;
        user
    }
}
