use crate::application::AppResult;
use crate::domain::{Project, ProjectId, Route};

pub const PROJECT_NOT_FOUND_MESSAGE: &str = "Project not found.";

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Found(Project),
    /// Terminal: the store has no such record, or no identifier was given
    NotFound,
    Failed(String),
}

/// State behind the project detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDetail {
    id: Option<ProjectId>,
    state: DetailState,
}

impl ProjectDetail {
    pub fn new(id: Option<ProjectId>) -> Self {
        let id = id.filter(|id| !id.0.trim().is_empty());
        let state = if id.is_some() {
            DetailState::Loading
        } else {
            DetailState::NotFound
        };
        Self { id, state }
    }

    /// The identifier to fetch, while a fetch is still owed
    pub fn pending_fetch(&self) -> Option<&ProjectId> {
        match self.state {
            DetailState::Loading => self.id.as_ref(),
            _ => None,
        }
    }

    pub fn apply(&mut self, result: AppResult<Option<Project>>) {
        self.state = match result {
            Ok(Some(project)) => DetailState::Found(project),
            Ok(None) => DetailState::NotFound,
            Err(e) => {
                tracing::warn!("Failed to load project {:?}: {}", self.id, e);
                DetailState::Failed(format!("Failed to load project: {e}"))
            }
        };
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn back_link(&self) -> Route {
        Route::Projects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::SiteService;
    use crate::ports::{MockRecordStore, StoreError};
    use mockall::predicate::eq;
    use serde_json::json;
    use std::sync::Arc;

    /// Fetch the way the app does: only while a fetch is still owed.
    async fn load(detail: &mut ProjectDetail, service: &SiteService) {
        if let Some(id) = detail.pending_fetch().cloned() {
            detail.apply(service.get_project(&id).await);
        }
    }

    #[tokio::test]
    async fn test_found_project() {
        let mut store = MockRecordStore::new();
        store
            .expect_get_by_id()
            .with(eq("projects"), eq("p-1"))
            .times(1)
            .returning(|_, _| Ok(Some(json!({ "_id": "p-1", "projectName": "Churn" }))));
        let service = SiteService::new(Arc::new(store));

        let mut detail = ProjectDetail::new(Some("p-1".into()));
        load(&mut detail, &service).await;

        match detail.state() {
            DetailState::Found(project) => assert_eq!(project.display_name(), "Churn"),
            other => panic!("expected project, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_not_found_is_terminal_with_back_link() {
        let mut store = MockRecordStore::new();
        store
            .expect_get_by_id()
            .times(1)
            .returning(|_, _| Ok(None));
        let service = SiteService::new(Arc::new(store));

        let mut detail = ProjectDetail::new(Some("nope".into()));
        load(&mut detail, &service).await;

        assert_eq!(detail.state(), &DetailState::NotFound);
        assert_eq!(detail.back_link(), Route::Projects);
        assert!(detail.pending_fetch().is_none());

        // A second load issues no further call
        load(&mut detail, &service).await;
        assert_eq!(detail.state(), &DetailState::NotFound);
    }

    #[tokio::test]
    async fn test_missing_identifier_skips_store() {
        let store = MockRecordStore::new();
        let service = SiteService::new(Arc::new(store));

        let mut detail = ProjectDetail::new(None);
        assert_eq!(detail.state(), &DetailState::NotFound);
        load(&mut detail, &service).await;

        let blank = ProjectDetail::new(Some("  ".into()));
        assert_eq!(blank.state(), &DetailState::NotFound);
    }

    #[test]
    fn test_failure_becomes_error_state() {
        let mut detail = ProjectDetail::new(Some("p".into()));
        detail.apply(Err(StoreError::StoreUnavailable("down".to_string()).into()));
        assert!(matches!(detail.state(), DetailState::Failed(msg) if msg.contains("down")));
    }
}
