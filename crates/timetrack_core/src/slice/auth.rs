//! Authentication container.
//!
//! # Responsibility
//! - Keep the registered-account collection and the current session pointer.
//! - Resolve login identifiers and validate registrations.
//!
//! # Invariants
//! - `current_user` is `Some` exactly when `is_authenticated` is true.
//! - Registration implies login on success.
//! - Passwords are accepted by requests but never stored or compared.

use crate::action::{ActionError, ActionPhase, AsyncStatus};
use crate::model::account::{Account, LoginRequest, RegisterRequest};
use crate::repo::entity_store::EntityStore;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    Login(LoginRequest),
    Register(RegisterRequest),
    Logout,
    ClearError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub current_user: Option<Account>,
    pub is_authenticated: bool,
    #[serde(flatten)]
    pub status: AsyncStatus,
    pub registered_users: EntityStore<Account>,
}

impl AuthState {
    /// Finds the account whose username or email equals the identifier.
    pub fn resolve_login(&self, request: &LoginRequest) -> Result<Account, ActionError> {
        self.registered_users
            .find(|account| account.matches_identifier(&request.identifier))
            .cloned()
            .ok_or_else(ActionError::user_not_found)
    }

    /// Builds the account for `request` after the uniqueness check.
    pub fn prepare_registration(&self, request: RegisterRequest) -> Result<Account, ActionError> {
        let account = request.into_account();
        self.registered_users.ensure_unique(&account)?;
        Ok(account)
    }

    pub fn reduce_login(&mut self, phase: ActionPhase<Account>) {
        if let Some(account) = self.status.track(phase) {
            self.sign_in(account);
        }
    }

    pub fn reduce_register(&mut self, phase: ActionPhase<Account>) {
        if let Some(account) = self.status.track(phase) {
            self.registered_users.append(account.clone());
            self.sign_in(account);
        }
    }

    pub fn logout(&mut self) {
        self.current_user = None;
        self.is_authenticated = false;
        self.status.clear_error();
    }

    pub fn clear_error(&mut self) {
        self.status.clear_error();
    }

    fn sign_in(&mut self, account: Account) {
        self.current_user = Some(account);
        self.is_authenticated = true;
    }
}
