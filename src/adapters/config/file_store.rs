use crate::{
    domain::SiteProfile,
    ports::{AppConfig, ConfigError, ConfigResult, ConfigStore},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::{fs, io::AsyncWriteExt};

const APP_NAME: &str = "portfolio-cli";
const KEYRING_USER: &str = "api_key";

#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    store_url: Option<String>,
    request_timeout_seconds: Option<u64>,
    px_per_row: Option<u16>,
    px_per_col: Option<u16>,
    profile: Option<SiteProfile>,
}

pub struct FileConfigStore {
    config_path: PathBuf,
    /// `None` keeps the API key in the token file only
    keyring_service: Option<String>,
}

impl FileConfigStore {
    pub fn new() -> ConfigResult<Self> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::ReadError("Cannot determine config directory".to_string())
        })?;

        Ok(Self {
            config_path: config_dir.join(APP_NAME).join("config.json"),
            keyring_service: Some(APP_NAME.to_string()),
        })
    }

    /// Store rooted at an explicit config file, without keyring access.
    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            keyring_service: None,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    async fn ensure_config_dir(&self) -> ConfigResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }
        Ok(())
    }

    fn key_file_path(&self) -> PathBuf {
        self.config_path
            .parent()
            .map(|dir| dir.join(".api_key"))
            .unwrap_or_else(|| PathBuf::from(".api_key"))
    }

    async fn get_key_from_file(&self) -> ConfigResult<Option<String>> {
        match fs::read_to_string(self.key_file_path()).await {
            Ok(key) => {
                let key = key.trim().to_string();
                Ok((!key.is_empty()).then_some(key))
            }
            Err(_) => Ok(None),
        }
    }

    async fn set_key_in_file(&self, key: &str) -> ConfigResult<()> {
        self.ensure_config_dir().await?;
        let key_path = self.key_file_path();

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options
            .open(&key_path)
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        // `mode` only applies on creation; tighten a file left by an older run
        // before the key goes in
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))
                .await
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        file.write_all(key.as_bytes())
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    fn keyring_entry(&self) -> Option<keyring::Entry> {
        let service = self.keyring_service.as_ref()?;
        match keyring::Entry::new(service, KEYRING_USER) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Keyring service not available ({}), using file storage", e);
                None
            }
        }
    }
}

/// A zero timeout fails every request and a zero pixel scale divides by zero.
fn non_zero<T>(name: &str, value: Option<T>, default: T) -> ConfigResult<T>
where
    T: Default + PartialEq,
{
    match value {
        Some(value) if value == T::default() => Err(ConfigError::InvalidFormat(format!(
            "{name} must be greater than zero"
        ))),
        Some(value) => Ok(value),
        None => Ok(default),
    }
}

#[async_trait]
impl ConfigStore for FileConfigStore {
    async fn load_config(&self) -> ConfigResult<AppConfig> {
        let config_file = match fs::read_to_string(&self.config_path).await {
            Ok(content) => serde_json::from_str::<ConfigFile>(&content)
                .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?,
            Err(_) => {
                tracing::debug!("No config at {}, using defaults", self.config_path.display());
                ConfigFile::default()
            }
        };

        let defaults = AppConfig::default();
        Ok(AppConfig {
            store_url: config_file.store_url,
            api_key: self.get_api_key().await?,
            request_timeout_seconds: non_zero(
                "request_timeout_seconds",
                config_file.request_timeout_seconds,
                defaults.request_timeout_seconds,
            )?,
            px_per_row: non_zero("px_per_row", config_file.px_per_row, defaults.px_per_row)?,
            px_per_col: non_zero("px_per_col", config_file.px_per_col, defaults.px_per_col)?,
            profile: config_file.profile.unwrap_or(defaults.profile),
        })
    }

    async fn save_config(&self, config: &AppConfig) -> ConfigResult<()> {
        self.ensure_config_dir().await?;

        let config_file = ConfigFile {
            store_url: config.store_url.clone(),
            request_timeout_seconds: Some(config.request_timeout_seconds),
            px_per_row: Some(config.px_per_row),
            px_per_col: Some(config.px_per_col),
            profile: Some(config.profile.clone()),
        };

        let content = serde_json::to_string_pretty(&config_file)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        fs::write(&self.config_path, content)
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        // The key never goes into config.json
        if let Some(key) = &config.api_key {
            self.set_api_key(key).await?;
        }

        Ok(())
    }

    async fn get_api_key(&self) -> ConfigResult<Option<String>> {
        if let Some(entry) = self.keyring_entry() {
            match entry.get_password() {
                Ok(key) => return Ok(Some(key)),
                Err(keyring::Error::NoEntry) => {}
                Err(e) => {
                    tracing::warn!("Keyring read failed ({}), falling back to file storage", e);
                }
            }
        }

        self.get_key_from_file().await
    }

    async fn set_api_key(&self, key: &str) -> ConfigResult<()> {
        if let Some(entry) = self.keyring_entry() {
            match entry.set_password(key) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::warn!("Failed to store in keyring ({}), falling back to file storage", e);
                }
            }
        }

        self.set_key_in_file(key).await
    }
}
