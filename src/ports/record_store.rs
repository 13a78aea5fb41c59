use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Record rejected: {0}")]
    ValidationRejected(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited: retry after {0} seconds")]
    RateLimit(u64),

    #[error("API error: {0}")]
    Api(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Every record of a collection, in the order the store returned them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPage<T> {
    pub items: Vec<T>,
    pub total_count: usize,
}

impl<T> RecordPage<T> {
    pub fn new(items: Vec<T>) -> Self {
        let total_count = items.len();
        Self { items, total_count }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Create/read access to the named collections of the content store.
///
/// Records cross this boundary as JSON objects; typed access lives in
/// `SiteService`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn create(&self, collection: &str, record: Value) -> StoreResult<Value>;

    /// `Ok(None)` when no record carries `id`.
    async fn get_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<Value>>;

    async fn get_all(&self, collection: &str) -> StoreResult<RecordPage<Value>>;
}
