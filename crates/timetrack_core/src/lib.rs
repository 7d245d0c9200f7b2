//! Client-side application state for a time-tracking app.
//!
//! Authentication, project and user management live in isolated containers
//! composed by [`AppStore`]. Every write goes through
//! [`AppStore::dispatch`]; async actions run the pending -> fulfilled |
//! rejected protocol around a pluggable [`UnitOfWork`], and allow-listed
//! containers are persisted through a [`StorageAdapter`].

pub mod action;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod slice;
pub mod state;
pub mod storage;

pub use action::unit_of_work::{NoLatency, SimulatedLatency, UnitOfWork};
pub use action::{ActionError, ActionKind, ActionPhase, AsyncStatus, Phase};
pub use config::{ConfigError, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::account::{
    Account, AccountId, LoginRequest, ManagedUser, NewUser, RegisterRequest, Role,
};
pub use model::project::{NewProject, Project, ProjectId, ProjectStatus};
pub use repo::entity_store::{Entity, EntityId, EntityStore, StoreError};
pub use slice::auth::{AuthAction, AuthState};
pub use slice::projects::{ProjectAction, ProjectState};
pub use slice::sidebar::{SidebarAction, SidebarState};
pub use slice::users::{ManagerAssignment, UserAction, UserState};
pub use slice::SliceName;
pub use state::app_store::{AppStore, DispatchResult, StoreEvent};
pub use state::root::{Action, Outcome, RootState};
pub use storage::{MemoryStorage, SqliteStorage, StorageAdapter, StorageError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
