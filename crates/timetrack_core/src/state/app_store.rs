//! Application store: the single read/write entry point.
//!
//! # Responsibility
//! - Own the root state for its whole lifetime (no process-wide singleton).
//! - Run async actions through pending -> unit of work -> settled.
//! - Persist allow-listed slices after every commit and notify subscribers.
//!
//! # Invariants
//! - Rehydration finishes inside the constructor, before any dispatch.
//! - The only suspension point of a dispatch is the unit of work; the
//!   lookup/uniqueness check and the settled merge run in one synchronous
//!   step after it, so other dispatches cannot interleave between them.
//! - Persistence failures are logged and swallowed.
//!
//! The store is single-threaded: dispatch futures borrow it and are not
//! `Send`. Drive them on one task (`tokio::join!`, a current-thread runtime or
//! a `LocalSet`).

use crate::action::unit_of_work::UnitOfWork;
use crate::action::{ActionError, ActionKind, ActionPhase, Phase};
use crate::config::{ConfigError, StoreConfig};
use crate::slice::auth::AuthAction;
use crate::slice::projects::ProjectAction;
use crate::slice::users::UserAction;
use crate::state::persist::{decode_snapshot, encode_snapshot};
use crate::state::root::{Action, Outcome, RootState};
use crate::storage::{StorageAdapter, StorageResult};
use log::{debug, info, warn};
use std::cell::RefCell;

pub type DispatchResult = Result<Outcome, ActionError>;

/// Notification delivered after each committed mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreEvent {
    pub action_type: &'static str,
    pub phase: Phase,
}

type Listener = Box<dyn Fn(&StoreEvent)>;

pub struct AppStore {
    config: StoreConfig,
    storage_key: String,
    state: RefCell<RootState>,
    storage: Box<dyn StorageAdapter>,
    unit_of_work: Box<dyn UnitOfWork>,
    listeners: RefCell<Vec<Listener>>,
}

impl AppStore {
    /// Creates a store with the simulated latency from `config`.
    pub fn new(
        config: StoreConfig,
        storage: impl StorageAdapter + 'static,
    ) -> Result<Self, ConfigError> {
        let latency = config.latency();
        Self::with_unit_of_work(config, storage, latency)
    }

    /// Creates a store with a caller-provided unit of work.
    ///
    /// # Errors
    /// - Returns an error when `config` fails validation.
    pub fn with_unit_of_work(
        config: StoreConfig,
        storage: impl StorageAdapter + 'static,
        unit_of_work: impl UnitOfWork + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let storage_key = config.storage_key();
        let state = rehydrate(&config, &storage_key, &storage);

        Ok(Self {
            config,
            storage_key,
            state: RefCell::new(state),
            storage: Box::new(storage),
            unit_of_work: Box::new(unit_of_work),
            listeners: RefCell::new(Vec::new()),
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns a snapshot of the composed state.
    pub fn get_state(&self) -> RootState {
        self.state.borrow().clone()
    }

    /// Reads from the live state without cloning all of it.
    pub fn select<R>(&self, selector: impl FnOnce(&RootState) -> R) -> R {
        selector(&*self.state.borrow())
    }

    /// Registers a callback run after every committed mutation.
    ///
    /// Listeners may read the store but must not dispatch or subscribe.
    pub fn subscribe(&self, listener: impl Fn(&StoreEvent) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Removes the persisted snapshot. In-memory state is untouched.
    pub fn purge(&self) -> StorageResult<()> {
        self.storage.remove_item(&self.storage_key)?;
        info!("event=persist_purge module=store status=ok");
        Ok(())
    }

    /// Applies `action` to the container it targets.
    ///
    /// Synchronous actions resolve immediately with `Outcome::Applied`.
    /// Async actions commit pending, await the unit of work, then commit the
    /// settled phase; the returned result mirrors that settled phase.
    pub async fn dispatch(&self, action: impl Into<Action>) -> DispatchResult {
        match action.into() {
            Action::Auth(AuthAction::Login(request)) => self
                .run(
                    ActionKind::Login,
                    move |state| state.auth.resolve_login(&request),
                    |state, phase| state.auth.reduce_login(phase),
                )
                .await
                .map(Outcome::Account),
            Action::Auth(AuthAction::Register(request)) => self
                .run(
                    ActionKind::Register,
                    move |state| state.auth.prepare_registration(request),
                    |state, phase| state.auth.reduce_register(phase),
                )
                .await
                .map(Outcome::Account),
            Action::Projects(ProjectAction::Create(draft)) => self
                .run(
                    ActionKind::CreateProject,
                    move |_| Ok(draft.into_project()),
                    |state, phase| state.projects.reduce_create(phase),
                )
                .await
                .map(Outcome::Project),
            Action::Projects(ProjectAction::Update(project)) => self
                .run(
                    ActionKind::UpdateProject,
                    move |_| Ok(project),
                    |state, phase| state.projects.reduce_update(phase),
                )
                .await
                .map(Outcome::Project),
            Action::Projects(ProjectAction::Delete(id)) => self
                .run(
                    ActionKind::DeleteProject,
                    move |_| Ok(id),
                    |state, phase| state.projects.reduce_delete(phase),
                )
                .await
                .map(Outcome::Removed),
            Action::Users(UserAction::Create(request)) => self
                .run(
                    ActionKind::CreateUser,
                    move |state| state.users.prepare_user(request),
                    |state, phase| state.users.reduce_create(phase),
                )
                .await
                .map(Outcome::User),
            Action::Users(UserAction::Update(user)) => self
                .run(
                    ActionKind::UpdateUser,
                    move |_| Ok(user),
                    |state, phase| state.users.reduce_update(phase),
                )
                .await
                .map(Outcome::User),
            Action::Users(UserAction::Delete(id)) => self
                .run(
                    ActionKind::DeleteUser,
                    move |_| Ok(id),
                    |state, phase| state.users.reduce_delete(phase),
                )
                .await
                .map(Outcome::Removed),
            Action::Users(UserAction::AssignManager(assignment)) => self
                .run(
                    ActionKind::AssignManager,
                    move |_| Ok(assignment),
                    |state, phase| state.users.reduce_assign_manager(phase),
                )
                .await
                .map(Outcome::ManagerAssigned),
            sync_action => {
                self.apply(sync_action);
                Ok(Outcome::Applied)
            }
        }
    }

    async fn run<T, W, R>(&self, kind: ActionKind, work: W, reduce: R) -> Result<T, ActionError>
    where
        T: Clone,
        W: FnOnce(&RootState) -> Result<T, ActionError>,
        R: Fn(&mut RootState, ActionPhase<T>),
    {
        let action_type = kind.type_name();
        self.commit(action_type, Phase::Pending, |state| {
            reduce(state, ActionPhase::Pending)
        });

        self.unit_of_work.perform(kind).await;

        let result = work(&*self.state.borrow());
        let settled = ActionPhase::settle(result.clone());
        let phase = settled.phase();
        self.commit(action_type, phase, |state| reduce(state, settled));

        match &result {
            Ok(_) => info!("event=action_settled module=store action={action_type} status=ok"),
            Err(err) => info!(
                "event=action_settled module=store action={action_type} status=rejected error_code={}",
                err.code()
            ),
        }
        result
    }

    fn apply(&self, action: Action) {
        let action_type = action.type_name();
        self.commit(action_type, Phase::Applied, |state| match action {
            Action::Auth(AuthAction::Logout) => state.auth.logout(),
            Action::Auth(AuthAction::ClearError) => state.auth.clear_error(),
            Action::Projects(ProjectAction::ClearError) => state.projects.clear_error(),
            Action::Users(UserAction::ClearError) => state.users.clear_error(),
            Action::Sidebar(sidebar_action) => state.sidebar.reduce(sidebar_action),
            other => warn!(
                "event=action_apply module=store status=skipped action={} reason=not_synchronous",
                other.type_name()
            ),
        });
    }

    fn commit(&self, action_type: &'static str, phase: Phase, mutate: impl FnOnce(&mut RootState)) {
        mutate(&mut *self.state.borrow_mut());
        debug!("event=action_commit module=store action={action_type} phase={phase}");

        self.persist();

        let event = StoreEvent { action_type, phase };
        for listener in self.listeners.borrow().iter() {
            listener(&event);
        }
    }

    fn persist(&self) {
        let blob = match encode_snapshot(&self.state.borrow(), &self.config) {
            Ok(blob) => blob,
            Err(err) => {
                warn!("event=persist_write module=store status=error error_code=encode_failed error={err}");
                return;
            }
        };
        if let Err(err) = self.storage.set_item(&self.storage_key, &blob) {
            warn!("event=persist_write module=store status=error error_code=write_failed error={err}");
        }
    }
}

fn rehydrate(config: &StoreConfig, storage_key: &str, storage: &dyn StorageAdapter) -> RootState {
    let blob = match storage.get_item(storage_key) {
        Ok(Some(blob)) => blob,
        Ok(None) => {
            info!("event=rehydrate module=store status=cold_start reason=missing");
            return RootState::default();
        }
        Err(err) => {
            warn!("event=rehydrate module=store status=cold_start reason=read_failed error={err}");
            return RootState::default();
        }
    };

    match decode_snapshot(&blob, config) {
        Ok(state) => {
            info!(
                "event=rehydrate module=store status=ok accounts={} projects={} users={}",
                state.auth.registered_users.len(),
                state.projects.projects.len(),
                state.users.users.len()
            );
            state
        }
        Err(err) => {
            warn!(
                "event=rehydrate module=store status=cold_start reason={} error={err}",
                err.code()
            );
            RootState::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AppStore;
    use crate::action::unit_of_work::NoLatency;
    use crate::action::Phase;
    use crate::config::StoreConfig;
    use crate::slice::sidebar::SidebarAction;
    use crate::state::root::Outcome;
    use crate::storage::{MemoryStorage, StorageAdapter};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn rejects_invalid_config() {
        let config = StoreConfig {
            allow_list: Vec::new(),
            ..StoreConfig::default()
        };
        assert!(AppStore::with_unit_of_work(config, MemoryStorage::new(), NoLatency).is_err());
    }

    #[tokio::test]
    async fn sync_actions_emit_applied_and_persist() {
        let storage = MemoryStorage::new();
        let store =
            AppStore::with_unit_of_work(StoreConfig::default(), storage.clone(), NoLatency)
                .unwrap();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        store.subscribe(move |event| sink.borrow_mut().push(*event));

        let outcome = store.dispatch(SidebarAction::Toggle).await.unwrap();

        assert_eq!(outcome, Outcome::Applied);
        assert!(store.select(|state| state.sidebar.collapsed));
        let recorded = events.borrow();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].action_type, "sidebar/toggle");
        assert_eq!(recorded[0].phase, Phase::Applied);
        assert!(storage.get_item("persist:timetracker").unwrap().is_some());
    }

    #[tokio::test]
    async fn purge_removes_the_snapshot_only() {
        let storage = MemoryStorage::new();
        let store =
            AppStore::with_unit_of_work(StoreConfig::default(), storage.clone(), NoLatency)
                .unwrap();
        store.dispatch(SidebarAction::SetCollapsed(true)).await.unwrap();

        store.purge().unwrap();

        assert!(storage.is_empty());
        assert!(store.get_state().sidebar.collapsed);
    }
}
