use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

use super::blocking;
use crate::configs::ConfigStore;
use crate::errors::ApiError;
use crate::services::HubService;

#[derive(Clone)]
pub struct HubState {
    pub config_store: Arc<ConfigStore>,
    pub hub_service: Arc<HubService>,
}

pub fn hub_router(hub_state: HubState) -> Router {
    Router::new()
        .route("/api/weather", get(get_weather))
        .route("/api/calendar", get(get_calendar_events))
        .route("/api/calendars", get(list_calendars))
        .with_state(hub_state)
}

#[utoipa::path(
    get,
    path = "/api/weather",
    tag = "hub",
    responses(
        (status = 200, description = "Weather entity state with `attributes.forecast` when available"),
        (status = 400, description = "Home Assistant not configured"),
        (status = 401, description = "Invalid Home Assistant token"),
        (status = 404, description = "Weather entity not found"),
        (status = 503, description = "Home Assistant unreachable"),
        (status = 504, description = "Home Assistant timed out")
    )
)]
pub async fn get_weather(State(state): State<HubState>) -> Result<Json<Value>, ApiError> {
    let config_store = state.config_store.clone();
    let config = blocking(move || config_store.get()).await?;
    let weather = state.hub_service.get_weather(&config).await?;

    Ok(Json(weather))
}

#[utoipa::path(
    get,
    path = "/api/calendar",
    tag = "hub",
    responses(
        (status = 200, description = "Events of all configured calendars for the next week, sorted by start"),
        (status = 400, description = "Home Assistant or calendars not configured"),
        (status = 503, description = "Home Assistant unreachable"),
        (status = 504, description = "Home Assistant timed out")
    )
)]
pub async fn get_calendar_events(
    State(state): State<HubState>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let config_store = state.config_store.clone();
    let config = blocking(move || config_store.get()).await?;
    let events = state.hub_service.get_calendar_events(&config).await?;

    Ok(Json(events))
}

#[utoipa::path(
    get,
    path = "/api/calendars",
    tag = "hub",
    responses(
        (status = 200, description = "Calendars exposed by Home Assistant"),
        (status = 400, description = "Home Assistant not configured"),
        (status = 503, description = "Home Assistant unreachable")
    )
)]
pub async fn list_calendars(State(state): State<HubState>) -> Result<Json<Value>, ApiError> {
    let config_store = state.config_store.clone();
    let config = blocking(move || config_store.get()).await?;
    let calendars = state.hub_service.list_calendars(&config).await?;

    Ok(Json(calendars))
}
