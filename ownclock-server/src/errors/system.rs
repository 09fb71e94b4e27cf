use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Error changing timezone: {0}")]
    TimezoneCommandFailed(String),
}

impl SystemError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SystemError::InvalidTimezone(_) => StatusCode::BAD_REQUEST,
            SystemError::TimezoneCommandFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
