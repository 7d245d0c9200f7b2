use chrono::NaiveDate;
use timetrack_core::{
    AppStore, AuthAction, ManagerAssignment, MemoryStorage, NewProject, NewUser, NoLatency,
    Outcome, ProjectAction, RegisterRequest, Role, SidebarAction, SliceName, SqliteStorage,
    StorageAdapter, StorageError, StoreConfig, UserAction,
};

const STORAGE_KEY: &str = "persist:timetracker";

fn open(storage: impl StorageAdapter + 'static) -> AppStore {
    AppStore::with_unit_of_work(StoreConfig::default(), storage, NoLatency).unwrap()
}

async fn populate(store: &AppStore) {
    let Outcome::Account(owner) = store
        .dispatch(AuthAction::Register(RegisterRequest {
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "pw".to_string(),
        }))
        .await
        .unwrap()
    else {
        panic!("registration should yield an account");
    };

    store
        .dispatch(ProjectAction::Create(NewProject {
            name: "Website".to_string(),
            code: "WEB".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
            created_by: owner.id,
        }))
        .await
        .unwrap();

    let mut user_ids = Vec::new();
    for (username, role) in [("maria", Role::Manager), ("eve", Role::Employee)] {
        let outcome = store
            .dispatch(UserAction::Create(NewUser {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password: "pw".to_string(),
                role,
                manager_id: None,
            }))
            .await
            .unwrap();
        if let Outcome::User(user) = outcome {
            user_ids.push(user.id);
        }
    }
    store
        .dispatch(UserAction::AssignManager(ManagerAssignment {
            user_id: user_ids[1],
            manager_id: user_ids[0],
        }))
        .await
        .unwrap();
    store.dispatch(SidebarAction::Toggle).await.unwrap();
}

#[tokio::test]
async fn restart_restores_allow_listed_slices_only() {
    let storage = MemoryStorage::new();
    let before = {
        let store = open(storage.clone());
        populate(&store).await;
        store.get_state()
    };
    assert!(before.sidebar.collapsed);

    let restored = open(storage).get_state();

    assert_eq!(restored.auth, before.auth);
    assert_eq!(restored.projects, before.projects);
    assert_eq!(restored.users, before.users);
    assert!(!restored.sidebar.collapsed);
}

#[tokio::test]
async fn persisted_blob_matches_the_client_shape() {
    let storage = MemoryStorage::new();
    let store = open(storage.clone());
    populate(&store).await;

    let blob = storage.get_item(STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&blob).unwrap();

    assert_eq!(value["version"], 1);
    assert_eq!(value["auth"]["isAuthenticated"], true);
    assert_eq!(value["auth"]["registeredUsers"][0]["username"], "ada");
    assert_eq!(value["projects"]["projects"][0]["status"], "active");
    assert_eq!(value["projects"]["projects"][0]["startDate"], "2024-05-06");
    assert!(value["users"]["users"][1]["managerId"].is_string());
    assert!(value.get("sidebar").is_none());
    assert!(!blob.contains("\"pw\""));
}

#[tokio::test]
async fn version_mismatch_cold_starts() {
    let storage = MemoryStorage::new();
    {
        let store = open(storage.clone());
        populate(&store).await;
    }

    let bumped = StoreConfig {
        persist_version: 2,
        ..StoreConfig::default()
    };
    let store = AppStore::with_unit_of_work(bumped, storage, NoLatency).unwrap();

    let state = store.get_state();
    assert!(state.auth.registered_users.is_empty());
    assert!(state.projects.projects.is_empty());
    assert!(state.users.users.is_empty());
}

#[tokio::test]
async fn corrupt_blob_cold_starts_and_is_overwritten() {
    let storage = MemoryStorage::new();
    storage.set_item(STORAGE_KEY, "{\"version\": 1, \"auth\": 42}").unwrap();

    let store = open(storage.clone());
    assert!(!store.get_state().auth.is_authenticated);

    store.dispatch(SidebarAction::Toggle).await.unwrap();
    let blob = storage.get_item(STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
    assert_eq!(value["auth"]["isAuthenticated"], false);
}

struct BrokenStorage;

impl StorageAdapter for BrokenStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("disk on fire".to_string()))
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("disk on fire".to_string()))
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("disk on fire".to_string()))
    }
}

#[tokio::test]
async fn storage_failures_are_never_fatal() {
    let store = open(BrokenStorage);

    populate(&store).await;

    let state = store.get_state();
    assert!(state.auth.is_authenticated);
    assert_eq!(state.projects.projects.len(), 1);
    assert!(store.purge().is_err());
}

#[tokio::test]
async fn custom_allow_list_can_persist_the_sidebar() {
    let storage = MemoryStorage::new();
    let config = StoreConfig {
        allow_list: vec![SliceName::Sidebar],
        ..StoreConfig::default()
    };
    {
        let store = AppStore::with_unit_of_work(config.clone(), storage.clone(), NoLatency).unwrap();
        populate(&store).await;
    }

    let state = AppStore::with_unit_of_work(config, storage, NoLatency)
        .unwrap()
        .get_state();
    assert!(state.sidebar.collapsed);
    assert!(state.auth.registered_users.is_empty());
}

#[tokio::test]
async fn sqlite_file_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("timetrack.sqlite3");

    let before = {
        let store = open(SqliteStorage::open(&path).unwrap());
        populate(&store).await;
        store.get_state()
    };

    let restored = open(SqliteStorage::open(&path).unwrap()).get_state();
    assert_eq!(restored.auth, before.auth);
    assert_eq!(restored.projects, before.projects);
    assert_eq!(restored.users, before.users);
}

#[tokio::test]
async fn purge_forgets_everything_on_next_start() {
    let storage = MemoryStorage::new();
    {
        let store = open(storage.clone());
        populate(&store).await;
        store.purge().unwrap();
    }

    let state = open(storage).get_state();
    assert!(state.auth.registered_users.is_empty());
}
