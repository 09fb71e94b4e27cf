use super::{ConfigStoreError, HubError, SystemError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigStoreError),

    #[error("Hub error: {0}")]
    HubError(#[from] HubError),

    #[error("System error: {0}")]
    SystemError(#[from] SystemError),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}
