use axum::routing::get;
use axum::{Json, Router};
use ownclock_api::models::*;
use utoipa::OpenApi;

use super::*;

#[derive(OpenApi)]
#[openapi(
    info(title = "Own Clock API", description = "Configuration and Home Assistant proxy for the wall clock"),
    paths(
        health_check,
        get_system_info,
        get_battery,
        set_timezone,
        get_config,
        save_config,
        update_config,
        reset_config,
        refresh_config,
        get_weather,
        get_calendar_events,
        list_calendars,
    ),
    components(schemas(
        ClockConfig,
        HealthResponse,
        SystemInfo,
        BatteryStatus,
        TimezoneResponse,
        RefreshResponse,
    )),
    tags(
        (name = "config", description = "Persisted clock configuration"),
        (name = "system", description = "Host information"),
        (name = "hub", description = "Home Assistant proxy"),
    )
)]
pub struct ApiDoc;

pub fn docs_router() -> Router {
    Router::new().route("/api/openapi.json", get(openapi_json))
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
