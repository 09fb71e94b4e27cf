pub mod api;
pub mod config;
pub mod hub;
pub mod system;

pub use api::ApiError;
pub use config::ConfigStoreError;
pub use hub::HubError;
pub use system::SystemError;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use uuid::Uuid;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::ConfigError(e) => (e.status_code(), e.to_string()),
            ApiError::HubError(e) => (e.status_code(), e.to_string()),
            ApiError::SystemError(e) => (e.status_code(), e.to_string()),
            ApiError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let mut error_obj = json!({
            "code": status.as_u16(),
            "message": message
        });

        if status.is_server_error() {
            let error_id = Uuid::new_v4();
            tracing::error!(error_id = ?error_id, "{}", self);
            error_obj["error_id"] = json!(error_id.to_string());
        } else {
            tracing::debug!("request rejected: {}", self);
        }

        // `detail` is the field the clock frontend reads
        let body = Json(json!({
            "detail": message,
            "error": error_obj
        }));

        (status, body).into_response()
    }
}
