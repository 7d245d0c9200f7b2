//! User management container.
//!
//! # Responsibility
//! - Keep the managed-user collection, independent from registered accounts.
//! - Reassign managers by id.
//!
//! # Invariants
//! - Username/email uniqueness is checked only within this collection.
//! - Manager assignment does not check that the manager exists or that the
//!   reporting chain stays acyclic.

use crate::action::{ActionError, ActionPhase, AsyncStatus};
use crate::model::account::{AccountId, ManagedUser, NewUser};
use crate::repo::entity_store::EntityStore;
use log::debug;
use serde::{Deserialize, Serialize};

/// Payload of a manager reassignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerAssignment {
    pub user_id: AccountId,
    pub manager_id: AccountId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Create(NewUser),
    Update(ManagedUser),
    Delete(AccountId),
    AssignManager(ManagerAssignment),
    ClearError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserState {
    pub users: EntityStore<ManagedUser>,
    #[serde(flatten)]
    pub status: AsyncStatus,
}

impl UserState {
    /// Builds the managed user for `request` after the uniqueness check.
    pub fn prepare_user(&self, request: NewUser) -> Result<ManagedUser, ActionError> {
        let user = request.into_user();
        self.users.ensure_unique(&user)?;
        Ok(user)
    }

    pub fn reduce_create(&mut self, phase: ActionPhase<ManagedUser>) {
        if let Some(user) = self.status.track(phase) {
            self.users.append(user);
        }
    }

    pub fn reduce_update(&mut self, phase: ActionPhase<ManagedUser>) {
        if let Some(user) = self.status.track(phase) {
            let id = user.id;
            if !self.users.update(user) {
                debug!("event=user_update module=users status=skipped id={id}");
            }
        }
    }

    pub fn reduce_delete(&mut self, phase: ActionPhase<AccountId>) {
        if let Some(id) = self.status.track(phase) {
            self.users.delete(id);
        }
    }

    pub fn reduce_assign_manager(&mut self, phase: ActionPhase<ManagerAssignment>) {
        let Some(assignment) = self.status.track(phase) else {
            return;
        };
        match self.users.get_mut(assignment.user_id) {
            Some(user) => user.manager_id = Some(assignment.manager_id),
            None => debug!(
                "event=assign_manager module=users status=skipped user_id={}",
                assignment.user_id
            ),
        }
    }

    pub fn clear_error(&mut self) {
        self.status.clear_error();
    }

    /// Users whose `manager_id` points at `manager_id`, in insertion order.
    pub fn direct_reports(&self, manager_id: AccountId) -> Vec<&ManagedUser> {
        self.users
            .iter()
            .filter(|user| user.manager_id == Some(manager_id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{ManagerAssignment, UserState};
    use crate::action::{ActionError, ActionPhase};
    use crate::model::account::{NewUser, Role};
    use uuid::Uuid;

    fn new_user(username: &str, role: Role) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: "pw".to_string(),
            role,
            manager_id: None,
        }
    }

    #[test]
    fn prepare_user_keeps_requested_role_and_manager() {
        let state = UserState::default();
        let manager = Uuid::new_v4();
        let mut request = new_user("eve", Role::Manager);
        request.manager_id = Some(manager);

        let user = state.prepare_user(request).unwrap();
        assert_eq!(user.role, Role::Manager);
        assert_eq!(user.manager_id, Some(manager));
    }

    #[test]
    fn duplicate_users_are_rejected() {
        let mut state = UserState::default();
        let user = state.prepare_user(new_user("eve", Role::Employee)).unwrap();
        state.reduce_create(ActionPhase::Fulfilled(user));

        let err = state
            .prepare_user(new_user("eve", Role::Admin))
            .unwrap_err();
        assert!(matches!(err, ActionError::DuplicateEntity(_)));
    }

    #[test]
    fn assign_manager_accepts_unknown_manager_ids() {
        let mut state = UserState::default();
        let user = state.prepare_user(new_user("eve", Role::Employee)).unwrap();
        let user_id = user.id;
        state.reduce_create(ActionPhase::Fulfilled(user));

        let phantom = Uuid::new_v4();
        state.reduce_assign_manager(ActionPhase::Fulfilled(ManagerAssignment {
            user_id,
            manager_id: phantom,
        }));

        assert_eq!(state.users.get(user_id).unwrap().manager_id, Some(phantom));
        assert_eq!(state.direct_reports(phantom).len(), 1);
    }

    #[test]
    fn assign_manager_to_missing_user_is_a_no_op() {
        let mut state = UserState::default();
        state.reduce_assign_manager(ActionPhase::Pending);
        state.reduce_assign_manager(ActionPhase::Fulfilled(ManagerAssignment {
            user_id: Uuid::new_v4(),
            manager_id: Uuid::new_v4(),
        }));
        assert!(state.users.is_empty());
        assert!(!state.status.is_loading);
    }
}
