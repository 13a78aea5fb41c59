use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Single-record envelope used for both request and response bodies.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataItemEnvelope<T> {
    pub data_item: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataItemsEnvelope {
    pub data_items: Vec<Value>,
    /// Absent on some deployments; falls back to the item count
    pub total_count: Option<usize>,
}
