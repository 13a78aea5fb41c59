use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::ports::{StoreError, StoreResult};

const USER_AGENT: &str = concat!("portfolio-cli/", env!("CARGO_PKG_VERSION"));

/// Thin JSON client for the CMS REST surface.
#[derive(Clone)]
pub struct CmsClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CmsClient {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| StoreError::StoreUnavailable(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `Ok(None)` on 404
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> StoreResult<Option<T>> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(transport_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!("GET {} returned 404", url);
            return Ok(None);
        }

        self.handle_response(response).await.map(Some)
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> StoreResult<T> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .authorize(self.client.post(&url))
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        self.handle_response(response).await
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> StoreResult<T> {
        let status = response.status();

        match status.as_u16() {
            200..=299 => {
                let response_text = response.text().await.map_err(transport_error)?;

                tracing::debug!("CMS response: {}", response_text);

                serde_json::from_str(&response_text).map_err(|e| {
                    StoreError::Serialization(format!(
                        "Failed to parse response: {}. Response was: {}",
                        e, response_text
                    ))
                })
            }
            400 | 409 | 422 => Err(StoreError::ValidationRejected(error_body(response).await)),
            401 | 403 => Err(StoreError::Authentication(
                "Invalid or missing API key".to_string(),
            )),
            404 => Err(StoreError::NotFound(error_body(response).await)),
            429 => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60);
                Err(StoreError::RateLimit(retry_after))
            }
            500..=599 => Err(StoreError::StoreUnavailable(format!(
                "HTTP {}: {}",
                status,
                error_body(response).await
            ))),
            _ => Err(StoreError::Api(format!(
                "HTTP {}: {}",
                status,
                error_body(response).await
            ))),
        }
    }
}

fn transport_error(e: reqwest::Error) -> StoreError {
    if e.is_timeout() {
        StoreError::StoreUnavailable(format!("Request timed out: {e}"))
    } else {
        StoreError::StoreUnavailable(e.to_string())
    }
}

async fn error_body(response: Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string())
}
