use crate::domain::DomainError;
use crate::ports::{ConfigError, StoreError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Application error: {0}")]
    Application(String),

    #[error("Content store not configured")]
    StoreNotConfigured,
}

pub type AppResult<T> = Result<T, AppError>;
