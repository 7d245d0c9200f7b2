//! Project container.
//!
//! # Invariants
//! - Created projects are appended with status `active`.
//! - Update replaces by id; an unknown id leaves the list unchanged.
//! - Delete removes by id; an unknown id is not an error.

use crate::action::{ActionPhase, AsyncStatus};
use crate::model::project::{NewProject, Project, ProjectId};
use crate::repo::entity_store::EntityStore;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectAction {
    Create(NewProject),
    Update(Project),
    Delete(ProjectId),
    ClearError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectState {
    pub projects: EntityStore<Project>,
    #[serde(flatten)]
    pub status: AsyncStatus,
}

impl ProjectState {
    pub fn reduce_create(&mut self, phase: ActionPhase<Project>) {
        if let Some(project) = self.status.track(phase) {
            self.projects.append(project);
        }
    }

    pub fn reduce_update(&mut self, phase: ActionPhase<Project>) {
        if let Some(project) = self.status.track(phase) {
            let id = project.id;
            if !self.projects.update(project) {
                debug!("event=project_update module=projects status=skipped id={id}");
            }
        }
    }

    pub fn reduce_delete(&mut self, phase: ActionPhase<ProjectId>) {
        if let Some(id) = self.status.track(phase) {
            let removed = self.projects.delete(id);
            debug!("event=project_delete module=projects status=ok id={id} removed={removed}");
        }
    }

    pub fn clear_error(&mut self) {
        self.status.clear_error();
    }

    pub fn get(&self, id: ProjectId) -> Option<&Project> {
        self.projects.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::ProjectState;
    use crate::action::{ActionError, ActionPhase};
    use crate::model::project::{NewProject, ProjectStatus};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn draft(code: &str) -> NewProject {
        NewProject {
            name: format!("Project {code}"),
            code: code.to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            created_by: Uuid::new_v4(),
        }
    }

    #[test]
    fn create_update_delete_follow_merge_rules() {
        let mut state = ProjectState::default();
        let project = draft("A").into_project();
        state.reduce_create(ActionPhase::Fulfilled(project.clone()));

        let mut changed = project.clone();
        changed.status = ProjectStatus::Completed;
        state.reduce_update(ActionPhase::Fulfilled(changed.clone()));
        assert_eq!(state.get(project.id), Some(&changed));

        state.reduce_delete(ActionPhase::Fulfilled(project.id));
        assert!(state.projects.is_empty());
    }

    #[test]
    fn update_of_unknown_id_changes_nothing_but_settles() {
        let mut state = ProjectState::default();
        state.reduce_create(ActionPhase::Fulfilled(draft("A").into_project()));
        let before = state.projects.clone();

        state.reduce_update(ActionPhase::Pending);
        state.reduce_update(ActionPhase::Fulfilled(draft("B").into_project()));

        assert_eq!(state.projects, before);
        assert!(!state.status.is_loading);
        assert_eq!(state.status.error, None);
    }

    #[test]
    fn clear_error_only_touches_the_message() {
        let mut state = ProjectState::default();
        state.reduce_create(ActionPhase::Rejected(ActionError::DuplicateEntity(
            "dup".to_string(),
        )));
        assert_eq!(state.status.error.as_deref(), Some("dup"));

        state.clear_error();
        assert_eq!(state.status.error, None);
    }
}
