use std::collections::HashMap;
use std::time::Duration;

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const TOKEN: &str = "good-token";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == format!("Bearer {TOKEN}"))
}

async fn entity_state(headers: HeaderMap, Path(entity): Path<String>) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Unauthorized" })));
    }

    match entity.as_str() {
        "weather.home" => (
            StatusCode::OK,
            Json(json!({
                "entity_id": "weather.home",
                "state": "sunny",
                "attributes": { "temperature": 21.5 }
            })),
        ),
        "weather.bare" => (
            StatusCode::OK,
            Json(json!({ "entity_id": "weather.bare", "state": "cloudy", "attributes": {} })),
        ),
        "weather.slow" => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            (StatusCode::OK, Json(json!({})))
        }
        "weather.broken" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "integration crashed" })),
        ),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Entity not found." })),
        ),
    }
}

async fn forecasts(Json(body): Json<Value>) -> impl IntoResponse {
    if body["type"] != "daily" {
        return (StatusCode::BAD_REQUEST, Json(json!({})));
    }

    match body["entity_id"].as_str() {
        Some("weather.home") => (
            StatusCode::OK,
            Json(json!({
                "changed_states": [],
                "service_response": {
                    "weather.home": {
                        "forecast": [
                            { "datetime": "2024-01-02T12:00:00+00:00", "temperature": 23.0 }
                        ]
                    }
                }
            })),
        ),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({}))),
    }
}

async fn calendars(headers: HeaderMap) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!("Unauthorized")));
    }

    (
        StatusCode::OK,
        Json(json!([
            { "entity_id": "calendar.personal", "name": "Personal" },
            { "entity_id": "calendar.work", "name": "Work" }
        ])),
    )
}

async fn calendar_events(
    Path(entity): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let window_ok = params.get("start").is_some_and(|start| start.ends_with("T00:00:00"))
        && params.get("end").is_some_and(|end| end.ends_with("T23:59:59"));

    if !window_ok {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": "missing window" })));
    }

    match entity.as_str() {
        "calendar.personal" => (
            StatusCode::OK,
            Json(json!([
                { "summary": "Dentist", "start": { "dateTime": "2024-01-02T10:00" } }
            ])),
        ),
        "calendar.work" => (
            StatusCode::OK,
            Json(json!([
                { "summary": "Holiday", "start": { "date": "2024-01-01" } }
            ])),
        ),
        "calendar.slow" => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            (StatusCode::OK, Json(json!([])))
        }
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "calendar failed" })),
        ),
    }
}

/// Starts a fake Home Assistant on a free local port and returns its base URL.
pub async fn spawn_hub() -> String {
    let router = Router::new()
        .route("/api/states/:entity", get(entity_state))
        .route("/api/services/weather/get_forecasts", post(forecasts))
        .route("/api/calendars", get(calendars))
        .route("/api/calendars/:entity", get(calendar_events));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{address}")
}

/// Base URL of a port nothing listens on.
pub async fn closed_port() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    format!("http://{address}")
}
