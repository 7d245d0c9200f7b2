//! Versioned persistence envelope for the allow-listed containers.
//!
//! # Responsibility
//! - Serialize allow-listed slices into one JSON blob.
//! - Rebuild a root state from a blob, restoring allow-listed slices only.
//!
//! # Invariants
//! - Slices outside the allow-list are never written and never restored.
//! - A version mismatch is a restore failure; callers cold-start on it.
//! - Restored slices never come back with an operation in flight.

use crate::config::StoreConfig;
use crate::slice::auth::AuthState;
use crate::slice::projects::ProjectState;
use crate::slice::sidebar::SidebarState;
use crate::slice::users::UserState;
use crate::slice::SliceName;
use crate::state::root::RootState;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum RestoreError {
    Decode(serde_json::Error),
    VersionMismatch { found: u32, expected: u32 },
}

impl RestoreError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Decode(_) => "decode_failed",
            Self::VersionMismatch { .. } => "version_mismatch",
        }
    }
}

impl Display for RestoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode(err) => write!(f, "persisted state is not valid: {err}"),
            Self::VersionMismatch { found, expected } => write!(
                f,
                "persisted state version {found} does not match expected {expected}"
            ),
        }
    }
}

impl Error for RestoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Decode(err) => Some(err),
            Self::VersionMismatch { .. } => None,
        }
    }
}

impl From<serde_json::Error> for RestoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    auth: Option<&'a AuthState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    projects: Option<&'a ProjectState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    users: Option<&'a UserState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sidebar: Option<&'a SidebarState>,
}

#[derive(Deserialize)]
struct Snapshot {
    version: u32,
    #[serde(default)]
    auth: Option<AuthState>,
    #[serde(default)]
    projects: Option<ProjectState>,
    #[serde(default)]
    users: Option<UserState>,
    #[serde(default)]
    sidebar: Option<SidebarState>,
}

/// Serializes the allow-listed slices of `state`.
pub fn encode_snapshot(state: &RootState, config: &StoreConfig) -> serde_json::Result<String> {
    let snapshot = SnapshotRef {
        version: config.persist_version,
        auth: config.persists(SliceName::Auth).then_some(&state.auth),
        projects: config.persists(SliceName::Projects).then_some(&state.projects),
        users: config.persists(SliceName::Users).then_some(&state.users),
        sidebar: config.persists(SliceName::Sidebar).then_some(&state.sidebar),
    };
    serde_json::to_string(&snapshot)
}

/// Builds a root state from `blob`; slices not restored keep their defaults.
pub fn decode_snapshot(blob: &str, config: &StoreConfig) -> Result<RootState, RestoreError> {
    let snapshot: Snapshot = serde_json::from_str(blob)?;
    if snapshot.version != config.persist_version {
        return Err(RestoreError::VersionMismatch {
            found: snapshot.version,
            expected: config.persist_version,
        });
    }

    let mut state = RootState::default();
    if let Some(mut auth) = snapshot.auth.filter(|_| config.persists(SliceName::Auth)) {
        auth.status.is_loading = false;
        state.auth = auth;
    }
    if let Some(mut projects) = snapshot
        .projects
        .filter(|_| config.persists(SliceName::Projects))
    {
        projects.status.is_loading = false;
        state.projects = projects;
    }
    if let Some(mut users) = snapshot.users.filter(|_| config.persists(SliceName::Users)) {
        users.status.is_loading = false;
        state.users = users;
    }
    if let Some(sidebar) = snapshot
        .sidebar
        .filter(|_| config.persists(SliceName::Sidebar))
    {
        state.sidebar = sidebar;
    }
    Ok(state)
}
