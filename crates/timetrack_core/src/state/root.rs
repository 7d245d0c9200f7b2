//! Root state tree and the dispatch surface.

use crate::action::ActionKind;
use crate::model::account::Account;
use crate::model::project::Project;
use crate::repo::entity_store::EntityId;
use crate::slice::auth::{AuthAction, AuthState};
use crate::slice::projects::{ProjectAction, ProjectState};
use crate::slice::sidebar::{SidebarAction, SidebarState};
use crate::slice::users::{ManagerAssignment, UserAction, UserState};
use crate::slice::SliceName;
use serde::Serialize;

/// Composed state of every container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RootState {
    pub auth: AuthState,
    pub projects: ProjectState,
    pub users: UserState,
    pub sidebar: SidebarState,
}

/// Any operation accepted by `AppStore::dispatch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Auth(AuthAction),
    Projects(ProjectAction),
    Users(UserAction),
    Sidebar(SidebarAction),
}

impl Action {
    pub fn slice(&self) -> SliceName {
        match self {
            Self::Auth(_) => SliceName::Auth,
            Self::Projects(_) => SliceName::Projects,
            Self::Users(_) => SliceName::Users,
            Self::Sidebar(_) => SliceName::Sidebar,
        }
    }

    /// Async kind, or `None` for actions applied synchronously.
    pub fn kind(&self) -> Option<ActionKind> {
        match self {
            Self::Auth(AuthAction::Login(_)) => Some(ActionKind::Login),
            Self::Auth(AuthAction::Register(_)) => Some(ActionKind::Register),
            Self::Projects(ProjectAction::Create(_)) => Some(ActionKind::CreateProject),
            Self::Projects(ProjectAction::Update(_)) => Some(ActionKind::UpdateProject),
            Self::Projects(ProjectAction::Delete(_)) => Some(ActionKind::DeleteProject),
            Self::Users(UserAction::Create(_)) => Some(ActionKind::CreateUser),
            Self::Users(UserAction::Update(_)) => Some(ActionKind::UpdateUser),
            Self::Users(UserAction::Delete(_)) => Some(ActionKind::DeleteUser),
            Self::Users(UserAction::AssignManager(_)) => Some(ActionKind::AssignManager),
            Self::Auth(AuthAction::Logout | AuthAction::ClearError)
            | Self::Projects(ProjectAction::ClearError)
            | Self::Users(UserAction::ClearError)
            | Self::Sidebar(_) => None,
        }
    }

    /// Action type string in `<slice>/<operation>` form.
    pub fn type_name(&self) -> &'static str {
        if let Some(kind) = self.kind() {
            return kind.type_name();
        }
        match self {
            Self::Auth(AuthAction::Logout) => "auth/logout",
            Self::Auth(_) => "auth/clearError",
            Self::Projects(_) => "projects/clearProjectError",
            Self::Users(_) => "users/clearUserError",
            Self::Sidebar(SidebarAction::Toggle) => "sidebar/toggle",
            Self::Sidebar(SidebarAction::SetCollapsed(_)) => "sidebar/setCollapsed",
        }
    }
}

impl From<AuthAction> for Action {
    fn from(value: AuthAction) -> Self {
        Self::Auth(value)
    }
}

impl From<ProjectAction> for Action {
    fn from(value: ProjectAction) -> Self {
        Self::Projects(value)
    }
}

impl From<UserAction> for Action {
    fn from(value: UserAction) -> Self {
        Self::Users(value)
    }
}

impl From<SidebarAction> for Action {
    fn from(value: SidebarAction) -> Self {
        Self::Sidebar(value)
    }
}

/// Fulfilled payload of a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Synchronous action applied.
    Applied,
    /// Login or registration succeeded with this account.
    Account(Account),
    Project(Project),
    User(Account),
    /// Delete settled for this id (whether or not it was present).
    Removed(EntityId),
    ManagerAssigned(ManagerAssignment),
}
