use async_trait::async_trait;
use thiserror::Error;

use crate::domain::SiteProfile;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    ReadError(String),

    #[error("Failed to write configuration: {0}")]
    WriteError(String),

    #[error("Invalid configuration format: {0}")]
    InvalidFormat(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub store_url: Option<String>,
    pub api_key: Option<String>,
    pub request_timeout_seconds: u64,
    /// Logical pixels covered by one terminal row
    pub px_per_row: u16,
    /// Logical pixels covered by one terminal column
    pub px_per_col: u16,
    pub profile: SiteProfile,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_url: None,
            api_key: None,
            request_timeout_seconds: 30,
            px_per_row: 16,
            px_per_col: 8,
            profile: SiteProfile::default(),
        }
    }
}

#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn load_config(&self) -> ConfigResult<AppConfig>;
    async fn save_config(&self, config: &AppConfig) -> ConfigResult<()>;
    async fn get_api_key(&self) -> ConfigResult<Option<String>>;
    async fn set_api_key(&self, key: &str) -> ConfigResult<()>;
}
