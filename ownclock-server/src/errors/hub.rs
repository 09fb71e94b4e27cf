use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum HubError {
    #[error("Home Assistant is not configured")]
    NotConfigured,

    #[error("No calendars configured")]
    NoCalendars,

    #[error("Invalid Home Assistant token")]
    InvalidToken,

    #[error("Entity '{0}' not found")]
    EntityNotFound(String),

    #[error("Invalid Home Assistant URL: {0}")]
    InvalidUrl(String),

    #[error("Home Assistant error: {body}")]
    Upstream { status: u16, body: String },

    #[error("Cannot connect to Home Assistant")]
    Unreachable,

    #[error("Timeout connecting to Home Assistant")]
    Timeout,

    #[error("Unexpected response from Home Assistant: {0}")]
    InvalidResponse(String),

    #[error("Home Assistant request failed: {0}")]
    Transport(String),
}

impl HubError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            HubError::NotConfigured => StatusCode::BAD_REQUEST,
            HubError::NoCalendars => StatusCode::BAD_REQUEST,
            HubError::InvalidToken => StatusCode::UNAUTHORIZED,
            HubError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            HubError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            HubError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            HubError::Unreachable => StatusCode::SERVICE_UNAVAILABLE,
            HubError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            HubError::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
            HubError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the hub could not be reached at all, as opposed to answering badly.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, HubError::Unreachable | HubError::Timeout)
    }
}

impl From<reqwest::Error> for HubError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            HubError::Timeout
        } else if error.is_connect() {
            HubError::Unreachable
        } else if error.is_decode() {
            HubError::InvalidResponse(error.to_string())
        } else {
            HubError::Transport(error.to_string())
        }
    }
}
