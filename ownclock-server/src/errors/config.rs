use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ConfigStoreError {
    #[error("Unknown config field '{0}'")]
    InvalidField(String),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),

    #[error("Error saving configuration")]
    PersistFailed,

    #[error("Config file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigStoreError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ConfigStoreError::InvalidField(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ConfigStoreError::InvalidValue(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ConfigStoreError::PersistFailed => StatusCode::INTERNAL_SERVER_ERROR,
            ConfigStoreError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ConfigStoreError::Parse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
