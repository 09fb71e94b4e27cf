use std::time::Duration;

use ownclock_api::models::ClockConfig;
use reqwest::{Client, IntoUrl, RequestBuilder, Response, StatusCode, Url};
use serde_json::{Value, json};

use crate::configs::Hub;
use crate::errors::HubError;
use crate::services::calendar::{CalendarEntry, CalendarWindow, sort_events};

/// Read-only proxy to the Home Assistant REST API.
///
/// Every call takes the current [`ClockConfig`] so credential changes apply immediately.
#[derive(Clone)]
pub struct HubService {
    client: Client,
}

impl HubService {
    pub fn new(settings: &Hub) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .build()?;

        Ok(Self { client })
    }

    /// Entity state of the weather entity, with the daily forecast under `attributes.forecast`.
    pub async fn get_weather(&self, config: &ClockConfig) -> Result<Value, HubError> {
        ensure_configured(config)?;

        let entity = &config.weather_entity;
        let url = entity_endpoint(config, "/api/states", entity)?;
        let response = self.get(config, url).send().await?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::UNAUTHORIZED => return Err(HubError::InvalidToken),
            StatusCode::NOT_FOUND => return Err(HubError::EntityNotFound(entity.clone())),
            _ => return Err(upstream_error(response).await),
        }

        let mut state: Value = response.json().await?;

        match self.fetch_forecast(config).await {
            Ok(Some(forecast)) => {
                if let Some(attributes) = state
                    .as_object_mut()
                    .map(|object| object.entry("attributes").or_insert_with(|| json!({})))
                    .and_then(Value::as_object_mut)
                {
                    attributes.insert("forecast".into(), forecast);
                }
            }
            Ok(None) => tracing::debug!("no forecast returned for {entity}"),
            Err(e) => tracing::warn!("failed to fetch forecast for {entity}: {e}"),
        }

        Ok(state)
    }

    async fn fetch_forecast(&self, config: &ClockConfig) -> Result<Option<Value>, HubError> {
        let entity = &config.weather_entity;
        let url = endpoint(config, "/api/services/weather/get_forecasts?return_response");
        let response = self
            .authorized(self.client.post(&url), config)
            .json(&json!({ "entity_id": entity, "type": "daily" }))
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(upstream_error(response).await);
        }

        let mut body: Value = response.json().await?;

        let forecast = body
            .get_mut("service_response")
            .and_then(|response| response.get_mut(entity.as_str()))
            .and_then(|state| state.get_mut("forecast"))
            .map(Value::take)
            .filter(|forecast| !forecast.is_null());

        Ok(forecast)
    }

    /// Calendars known to the hub, returned as the hub sends them.
    pub async fn list_calendars(&self, config: &ClockConfig) -> Result<Value, HubError> {
        ensure_configured(config)?;

        let url = endpoint(config, "/api/calendars");
        let response = self.get(config, url).send().await?;

        if response.status() != StatusCode::OK {
            return Err(upstream_error(response).await);
        }

        Ok(response.json().await?)
    }

    /// Events of every configured calendar over the coming week, sorted by start.
    ///
    /// A calendar that fails is skipped. The hub is only reported unreachable when
    /// no calendar could be fetched because of it.
    pub async fn get_calendar_events(&self, config: &ClockConfig) -> Result<Vec<Value>, HubError> {
        ensure_configured(config)?;

        if config.calendar_entities.is_empty() {
            return Err(HubError::NoCalendars);
        }

        let window = CalendarWindow::current();
        let mut events = Vec::new();
        let mut fetched = 0;
        let mut unreachable = None;

        for entry in config.calendar_entities.iter().filter_map(|raw| CalendarEntry::parse(raw)) {
            match self.fetch_calendar_events(config, &entry, &window).await {
                Ok(calendar_events) => {
                    fetched += 1;
                    events.extend(entry.tag_events(calendar_events));
                }
                Err(e) => {
                    tracing::warn!("skipping calendar {}: {e}", entry.entity_id);
                    if e.is_unreachable() {
                        unreachable.get_or_insert(e);
                    }
                }
            }
        }

        if fetched == 0 {
            if let Some(e) = unreachable {
                return Err(e);
            }
        }

        sort_events(&mut events);

        Ok(events)
    }

    async fn fetch_calendar_events(
        &self,
        config: &ClockConfig,
        entry: &CalendarEntry,
        window: &CalendarWindow,
    ) -> Result<Vec<Value>, HubError> {
        let url = entity_endpoint(config, "/api/calendars", &entry.entity_id)?;
        let response = self
            .get(config, url)
            .query(&[("start", &window.start), ("end", &window.end)])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(upstream_error(response).await);
        }

        let body: Value = response.json().await?;

        match body {
            Value::Array(events) => Ok(events),
            other => Err(HubError::InvalidResponse(format!(
                "expected a list of events, got {other}"
            ))),
        }
    }

    fn get(&self, config: &ClockConfig, url: impl IntoUrl) -> RequestBuilder {
        self.authorized(self.client.get(url), config)
    }

    fn authorized(&self, request: RequestBuilder, config: &ClockConfig) -> RequestBuilder {
        request
            .bearer_auth(&config.ha_token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
    }
}

fn ensure_configured(config: &ClockConfig) -> Result<(), HubError> {
    if config.is_hub_configured() {
        Ok(())
    } else {
        Err(HubError::NotConfigured)
    }
}

fn endpoint(config: &ClockConfig, path: &str) -> String {
    format!("{}{path}", config.ha_url.trim_end_matches('/'))
}

/// `collection` joined with `entity` as one percent-encoded path segment.
fn entity_endpoint(config: &ClockConfig, collection: &str, entity: &str) -> Result<Url, HubError> {
    let mut url = Url::parse(&endpoint(config, collection))
        .map_err(|e| HubError::InvalidUrl(format!("{}: {e}", config.ha_url)))?;

    url.path_segments_mut()
        .map_err(|_| HubError::InvalidUrl(config.ha_url.clone()))?
        .push(entity);

    Ok(url)
}

async fn upstream_error(response: Response) -> HubError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    HubError::Upstream { status, body }
}
