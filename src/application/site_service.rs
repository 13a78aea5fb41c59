use super::AppResult;
use crate::domain::{ContactSubmission, Project, ProjectId, Record};
use crate::ports::{RecordPage, RecordStore, StoreError};
use std::sync::Arc;

/// Typed access to the content store collections.
pub struct SiteService {
    store: Arc<dyn RecordStore>,
}

impl SiteService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Persist `record`. Stores may answer with the full record or with a bare
    /// acknowledgment; a reply that does not read back as `T` still counts as
    /// stored and yields `record` itself.
    pub async fn create<T: Record + Clone>(&self, record: &T) -> AppResult<T> {
        let value = serde_json::to_value(record)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let stored = self.store.create(T::COLLECTION, value).await?;
        match decode::<T>(stored) {
            Ok(stored) => Ok(stored),
            Err(e) => {
                tracing::debug!("{} create acknowledged without a full record: {}", T::COLLECTION, e);
                Ok(record.clone())
            }
        }
    }

    pub async fn get_by_id<T: Record>(&self, id: &str) -> AppResult<Option<T>> {
        match self.store.get_by_id(T::COLLECTION, id).await? {
            Some(value) => Ok(Some(decode(value)?)),
            None => Ok(None),
        }
    }

    pub async fn get_all<T: Record>(&self) -> AppResult<RecordPage<T>> {
        let page = self.store.get_all(T::COLLECTION).await?;
        let items = page
            .items
            .into_iter()
            .map(decode)
            .collect::<Result<Vec<T>, _>>()?;

        Ok(RecordPage {
            items,
            total_count: page.total_count,
        })
    }

    pub async fn list_projects(&self) -> AppResult<Vec<Project>> {
        let page = self.get_all::<Project>().await?;
        tracing::debug!("Loaded {} of {} projects", page.items.len(), page.total_count);
        Ok(page.items)
    }

    pub async fn get_project(&self, id: &ProjectId) -> AppResult<Option<Project>> {
        self.get_by_id::<Project>(&id.0).await
    }

    pub async fn submit_contact(&self, submission: &ContactSubmission) -> AppResult<ContactSubmission> {
        let stored = self.create(submission).await?;
        tracing::info!("Contact submission {} stored", stored.id);
        Ok(stored)
    }
}

fn decode<T: Record>(value: serde_json::Value) -> Result<T, StoreError> {
    serde_json::from_value(value).map_err(|e| {
        StoreError::Serialization(format!("Invalid {} record: {}", T::COLLECTION, e))
    })
}
