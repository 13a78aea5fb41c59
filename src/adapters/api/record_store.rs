use async_trait::async_trait;
use serde_json::Value;

use super::{CmsClient, DataItemEnvelope, DataItemsEnvelope};
use crate::ports::{RecordPage, RecordStore, StoreResult};

/// `RecordStore` backed by the CMS collections API.
#[derive(Clone)]
pub struct HttpRecordStore {
    client: CmsClient,
}

impl HttpRecordStore {
    pub fn new(client: CmsClient) -> Self {
        Self { client }
    }

    fn items_path(collection: &str) -> String {
        format!("/collections/{}/items", urlencoding::encode(collection))
    }

    fn item_path(collection: &str, id: &str) -> String {
        format!(
            "{}/{}",
            Self::items_path(collection),
            urlencoding::encode(id)
        )
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn create(&self, collection: &str, record: Value) -> StoreResult<Value> {
        let path = Self::items_path(collection);
        tracing::debug!("POST {} to {}", path, self.client.base_url());

        let body = DataItemEnvelope { data_item: record };
        let created: DataItemEnvelope<Value> = self.client.post(&path, &body).await?;
        Ok(created.data_item)
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        let path = Self::item_path(collection, id);

        let found: Option<DataItemEnvelope<Value>> = self.client.get(&path).await?;
        Ok(found.map(|envelope| envelope.data_item))
    }

    async fn get_all(&self, collection: &str) -> StoreResult<RecordPage<Value>> {
        let path = Self::items_path(collection);

        let page: Option<DataItemsEnvelope> = self.client.get(&path).await?;
        // A missing collection reads as an empty one
        let Some(page) = page else {
            tracing::warn!("Collection {} not found, treating as empty", collection);
            return Ok(RecordPage::new(Vec::new()));
        };

        let total_count = page.total_count.unwrap_or(page.data_items.len());
        Ok(RecordPage {
            items: page.data_items,
            total_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::StoreError;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store_for(server: &MockServer, api_key: Option<&str>) -> HttpRecordStore {
        let client = CmsClient::new(
            &server.uri(),
            api_key.map(str::to_string),
            Duration::from_secs(5),
        )
        .unwrap();
        HttpRecordStore::new(client)
    }

    #[tokio::test]
    async fn test_create_posts_envelope_with_bearer_key() {
        let server = MockServer::start().await;
        let record = json!({ "_id": "s1", "name": "Jane Doe", "status": "new" });

        Mock::given(method("POST"))
            .and(path("/collections/contactsubmissions/items"))
            .and(header("authorization", "Bearer secret"))
            .and(body_json(json!({ "dataItem": record.clone() })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "dataItem": record.clone() })))
            .expect(1)
            .mount(&server)
            .await;

        let store = store_for(&server, Some("secret"));
        let created = store.create("contactsubmissions", record.clone()).await.unwrap();
        assert_eq!(created, record);
    }

    #[tokio::test]
    async fn test_get_by_id_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/collections/projects/items/p1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "dataItem": { "_id": "p1", "projectName": "Churn" } })),
            )
            .mount(&server)
            .await;

        let store = store_for(&server, None);
        let found = store.get_by_id("projects", "p1").await.unwrap().unwrap();
        assert_eq!(found["projectName"], "Churn");
    }

    #[tokio::test]
    async fn test_get_by_id_404_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/collections/projects/items/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let store = store_for(&server, None);
        assert_eq!(store.get_by_id("projects", "missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_id_is_percent_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/collections/projects/items/a%20b"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "dataItem": { "_id": "a b" } })))
            .expect(1)
            .mount(&server)
            .await;

        let store = store_for(&server, None);
        assert!(store.get_by_id("projects", "a b").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_get_all_keeps_order_and_count() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/collections/projects/items"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "dataItems": [{ "_id": "b" }, { "_id": "a" }],
                "totalCount": 2
            })))
            .mount(&server)
            .await;

        let store = store_for(&server, None);
        let page = store.get_all("projects").await.unwrap();
        assert_eq!(page.total_count, 2);
        assert_eq!(page.items[0]["_id"], "b");
        assert_eq!(page.items[1]["_id"], "a");
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/collections/rejected/items"))
            .respond_with(ResponseTemplate::new(422).set_body_string("email required"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/collections/locked/items"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/collections/busy/items"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/collections/down/items"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let store = store_for(&server, None);
        let record = json!({ "_id": "x" });

        assert_eq!(
            store.create("rejected", record.clone()).await.unwrap_err(),
            StoreError::ValidationRejected("email required".to_string())
        );
        assert!(matches!(
            store.create("locked", record.clone()).await.unwrap_err(),
            StoreError::Authentication(_)
        ));
        assert_eq!(
            store.create("busy", record.clone()).await.unwrap_err(),
            StoreError::RateLimit(7)
        );
        assert!(matches!(
            store.create("down", record).await.unwrap_err(),
            StoreError::StoreUnavailable(_)
        ));
    }

    #[tokio::test]
    async fn test_hung_request_times_out_as_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/collections/projects/items"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let client = CmsClient::new(&server.uri(), None, Duration::from_millis(100)).unwrap();
        let store = HttpRecordStore::new(client);
        assert!(matches!(
            store.get_all("projects").await.unwrap_err(),
            StoreError::StoreUnavailable(_)
        ));
    }

    #[tokio::test]
    async fn test_unreachable_store_is_unavailable() {
        let client = CmsClient::new("http://127.0.0.1:1", None, Duration::from_secs(1)).unwrap();
        let store = HttpRecordStore::new(client);
        assert!(matches!(
            store.get_all("projects").await.unwrap_err(),
            StoreError::StoreUnavailable(_)
        ));
    }
}
