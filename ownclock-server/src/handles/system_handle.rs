use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use ownclock_api::models::{BatteryStatus, HealthResponse, SystemInfo, TimezoneResponse};
use serde::Deserialize;

use crate::errors::ApiError;
use crate::services::SystemService;

#[derive(Clone)]
pub struct SystemState {
    pub system_service: Arc<SystemService>,
}

#[derive(Debug, Deserialize)]
pub struct TimezoneQuery {
    pub timezone: String,
}

pub fn system_router(system_state: SystemState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/system", get(get_system_info))
        .route("/api/system/timezone", post(set_timezone))
        .route("/api/battery", get(get_battery))
        .with_state(system_state)
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "system",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<SystemState>) -> Json<HealthResponse> {
    Json(state.system_service.health())
}

#[utoipa::path(
    get,
    path = "/api/system",
    tag = "system",
    responses(
        (status = 200, description = "Host information", body = SystemInfo)
    )
)]
pub async fn get_system_info(State(state): State<SystemState>) -> Json<SystemInfo> {
    Json(state.system_service.system_info().await)
}

#[utoipa::path(
    get,
    path = "/api/battery",
    tag = "system",
    responses(
        (status = 200, description = "Battery reading, or `available: false`", body = BatteryStatus)
    )
)]
pub async fn get_battery(State(state): State<SystemState>) -> Json<BatteryStatus> {
    Json(state.system_service.battery_status().await)
}

#[utoipa::path(
    post,
    path = "/api/system/timezone",
    tag = "system",
    params(
        ("timezone" = String, Query, description = "Zoneinfo name, e.g. America/Lima")
    ),
    responses(
        (status = 200, description = "Timezone changed", body = TimezoneResponse),
        (status = 400, description = "Unknown timezone"),
        (status = 500, description = "timedatectl failed")
    )
)]
pub async fn set_timezone(
    State(state): State<SystemState>,
    Query(query): Query<TimezoneQuery>,
) -> Result<Json<TimezoneResponse>, ApiError> {
    let response = state.system_service.set_timezone(&query.timezone).await?;

    Ok(Json(response))
}
