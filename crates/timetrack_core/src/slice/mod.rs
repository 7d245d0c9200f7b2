//! State containers composed into the root state.
//!
//! # Responsibility
//! - Own one collection (or UI flag set) per container.
//! - Translate action phases into collection merges.
//!
//! # Invariants
//! - A container only ever mutates its own state.
//! - Reducers are synchronous and run to completion.

pub mod auth;
pub mod projects;
pub mod sidebar;
pub mod users;

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Fixed name of each container inside the root state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SliceName {
    Auth,
    Projects,
    Users,
    Sidebar,
}

impl SliceName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Projects => "projects",
            Self::Users => "users",
            Self::Sidebar => "sidebar",
        }
    }
}

impl Display for SliceName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
