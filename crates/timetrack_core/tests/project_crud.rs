use chrono::NaiveDate;
use timetrack_core::{
    AppStore, MemoryStorage, NewProject, NoLatency, Outcome, Project, ProjectAction,
    ProjectStatus, StoreConfig,
};
use uuid::Uuid;

fn store() -> AppStore {
    AppStore::with_unit_of_work(StoreConfig::default(), MemoryStorage::new(), NoLatency).unwrap()
}

fn draft(code: &str) -> NewProject {
    NewProject {
        name: format!("Project {code}"),
        code: code.to_string(),
        start_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        created_by: Uuid::new_v4(),
    }
}

async fn create(store: &AppStore, code: &str) -> Project {
    match store
        .dispatch(ProjectAction::Create(draft(code)))
        .await
        .unwrap()
    {
        Outcome::Project(project) => project,
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn create_appends_active_projects_in_order() {
    let store = store();
    let first = create(&store, "A").await;
    let second = create(&store, "B").await;

    let projects = store.get_state().projects;
    let ids: Vec<_> = projects.projects.iter().map(|project| project.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
    assert!(projects
        .projects
        .iter()
        .all(|project| project.status == ProjectStatus::Active));
    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn update_replaces_whole_record_in_place() {
    let store = store();
    let first = create(&store, "A").await;
    create(&store, "B").await;

    let mut changed = first.clone();
    changed.name = "Renamed".to_string();
    changed.status = ProjectStatus::OnHold;
    store
        .dispatch(ProjectAction::Update(changed.clone()))
        .await
        .unwrap();

    let projects = store.get_state().projects;
    assert_eq!(projects.projects.as_slice()[0], changed);
    assert_eq!(projects.projects.len(), 2);
}

#[tokio::test]
async fn update_of_missing_id_is_a_silent_no_op() {
    let store = store();
    create(&store, "A").await;
    let before = store.get_state().projects.projects;

    let ghost = draft("GHOST").into_project();
    let outcome = store.dispatch(ProjectAction::Update(ghost.clone())).await;

    assert_eq!(outcome, Ok(Outcome::Project(ghost)));
    let after = store.get_state().projects;
    assert_eq!(after.projects, before);
    assert!(!after.status.is_loading);
    assert_eq!(after.status.error, None);
}

#[tokio::test]
async fn deleting_twice_is_harmless() {
    let store = store();
    let doomed = create(&store, "A").await;
    let kept = create(&store, "B").await;

    store
        .dispatch(ProjectAction::Delete(doomed.id))
        .await
        .unwrap();
    let after_first = store.get_state().projects.projects;

    let outcome = store
        .dispatch(ProjectAction::Delete(doomed.id))
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Removed(doomed.id));
    let projects = store.get_state().projects;
    assert_eq!(projects.projects, after_first);
    assert_eq!(projects.projects.as_slice(), &[kept]);
    assert_eq!(projects.status.error, None);
}

#[tokio::test]
async fn clear_project_error_is_synchronous() {
    let store = store();
    assert_eq!(
        store.dispatch(ProjectAction::ClearError).await.unwrap(),
        Outcome::Applied
    );
    assert_eq!(store.get_state().projects.status.error, None);
}
