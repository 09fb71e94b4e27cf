use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use ownclock_api::models::{ClockConfig, RefreshResponse};
use serde_json::{Map, Value};

use super::blocking;
use crate::configs::ConfigStore;
use crate::errors::{ApiError, ConfigStoreError};

#[derive(Clone)]
pub struct ConfigState {
    pub config_store: Arc<ConfigStore>,
}

pub fn config_router(config_state: ConfigState) -> Router {
    Router::new()
        .route(
            "/api/config",
            get(get_config).post(save_config).patch(update_config),
        )
        .route("/api/config/reset", post(reset_config))
        .route("/api/refresh", post(refresh_config))
        .with_state(config_state)
}

#[utoipa::path(
    get,
    path = "/api/config",
    tag = "config",
    responses(
        (status = 200, description = "Current clock configuration", body = ClockConfig)
    )
)]
pub async fn get_config(State(state): State<ConfigState>) -> Result<Json<ClockConfig>, ApiError> {
    let config = blocking(move || state.config_store.get()).await?;

    Ok(Json(config))
}

#[utoipa::path(
    post,
    path = "/api/config",
    tag = "config",
    request_body = ClockConfig,
    responses(
        (status = 200, description = "Configuration saved", body = ClockConfig),
        (status = 422, description = "Malformed configuration"),
        (status = 500, description = "Configuration could not be written")
    )
)]
pub async fn save_config(
    State(state): State<ConfigState>,
    Json(body): Json<ClockConfig>,
) -> Result<Json<ClockConfig>, ApiError> {
    let config = blocking(move || {
        if state.config_store.save(&body) {
            Ok(body)
        } else {
            Err(ConfigStoreError::PersistFailed)
        }
    })
    .await??;

    Ok(Json(config))
}

#[utoipa::path(
    patch,
    path = "/api/config",
    tag = "config",
    request_body(content = ClockConfig, description = "Any subset of the configuration fields"),
    responses(
        (status = 200, description = "Merged configuration", body = ClockConfig),
        (status = 422, description = "Unknown field or invalid value"),
        (status = 500, description = "Configuration could not be written")
    )
)]
pub async fn update_config(
    State(state): State<ConfigState>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<ClockConfig>, ApiError> {
    let config = blocking(move || state.config_store.update(body)).await??;

    Ok(Json(config))
}

#[utoipa::path(
    post,
    path = "/api/config/reset",
    tag = "config",
    responses(
        (status = 200, description = "Defaults restored", body = ClockConfig),
        (status = 500, description = "Configuration could not be written")
    )
)]
pub async fn reset_config(State(state): State<ConfigState>) -> Result<Json<ClockConfig>, ApiError> {
    let config = blocking(move || state.config_store.reset()).await??;

    Ok(Json(config))
}

/// Rewrites the stored config unchanged so polling clients notice a change.
#[utoipa::path(
    post,
    path = "/api/refresh",
    tag = "config",
    responses(
        (status = 200, description = "Refresh signalled", body = RefreshResponse),
        (status = 500, description = "Configuration could not be written")
    )
)]
pub async fn refresh_config(
    State(state): State<ConfigState>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let saved = blocking(move || {
        let config = state.config_store.get();
        state.config_store.save(&config)
    })
    .await?;

    if !saved {
        return Err(ConfigStoreError::PersistFailed.into());
    }

    Ok(Json(RefreshResponse {
        status: String::from("ok"),
        message: String::from("Refresh signal sent"),
    }))
}
