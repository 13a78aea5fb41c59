use super::LoadState;
use crate::application::AppResult;
use crate::domain::Project;

pub const EMPTY_PROJECTS_MESSAGE: &str = "No projects available at the moment.";

/// What the projects page should show right now.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectListView<'a> {
    Loading,
    Empty,
    Cards(&'a [Project]),
    Failed(&'a str),
}

/// State behind the projects list page.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectList {
    state: LoadState<Vec<Project>>,
}

impl Default for ProjectList {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectList {
    pub fn new() -> Self {
        Self {
            state: LoadState::Loading,
        }
    }

    pub fn apply(&mut self, result: AppResult<Vec<Project>>) {
        self.state = match result {
            Ok(projects) => LoadState::Ready(projects),
            Err(e) => {
                tracing::warn!("Failed to load projects: {}", e);
                LoadState::Failed(format!("Failed to load projects: {e}"))
            }
        };
    }

    pub fn state(&self) -> &LoadState<Vec<Project>> {
        &self.state
    }

    pub fn view(&self) -> ProjectListView<'_> {
        match &self.state {
            LoadState::Loading => ProjectListView::Loading,
            LoadState::Ready(projects) if projects.is_empty() => ProjectListView::Empty,
            LoadState::Ready(projects) => ProjectListView::Cards(projects),
            LoadState::Failed(message) => ProjectListView::Failed(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::SiteService;
    use crate::ports::{MockRecordStore, RecordPage, StoreError};
    use serde_json::json;
    use std::sync::Arc;

    fn service_with(page: Result<RecordPage<serde_json::Value>, StoreError>) -> SiteService {
        let mut store = MockRecordStore::new();
        store
            .expect_get_all()
            .times(1)
            .returning(move |_| page.clone());
        SiteService::new(Arc::new(store))
    }

    async fn load(list: &mut ProjectList, service: &SiteService) {
        list.apply(service.list_projects().await);
    }

    #[tokio::test]
    async fn test_empty_collection_shows_empty_state() {
        let service = service_with(Ok(RecordPage::new(vec![])));
        let mut list = ProjectList::new();
        assert_eq!(list.view(), ProjectListView::Loading);

        load(&mut list, &service).await;

        assert_eq!(list.view(), ProjectListView::Empty);
    }

    #[tokio::test]
    async fn test_cards_in_store_order() {
        let service = service_with(Ok(RecordPage::new(vec![
            json!({ "_id": "2", "projectName": "Beta" }),
            json!({ "_id": "1", "projectName": "Alpha" }),
        ])));
        let mut list = ProjectList::new();
        load(&mut list, &service).await;

        match list.view() {
            ProjectListView::Cards(cards) => {
                let names: Vec<&str> = cards.iter().map(|p| p.display_name()).collect();
                assert_eq!(names, vec!["Beta", "Alpha"]);
            }
            other => panic!("expected cards, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_store_failure_is_recovered_error_state() {
        let service = service_with(Err(StoreError::StoreUnavailable("timeout".to_string())));
        let mut list = ProjectList::new();
        load(&mut list, &service).await;

        assert!(matches!(list.view(), ProjectListView::Failed(msg) if msg.contains("timeout")));
    }
}
