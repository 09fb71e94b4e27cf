use serde::{Deserialize, Serialize};

/// Persisted settings of the wall clock.
///
/// Serialized with camelCase names; the snake_case names are accepted on input.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClockConfig {
    /// Base URL of the Home Assistant instance
    #[serde(alias = "ha_url")]
    pub ha_url: String,
    /// Long-lived access token
    #[serde(alias = "ha_token")]
    pub ha_token: String,
    /// Weather entity id
    #[serde(alias = "weather_entity")]
    pub weather_entity: String,
    /// Calendar entries, `entity_id` or `entity_id:display_name`
    #[serde(alias = "calendar_entities")]
    pub calendar_entities: Vec<String>,
    /// Display timezone
    pub timezone: String,
    /// Frontend poll interval in milliseconds
    #[serde(alias = "update_interval")]
    pub update_interval: u64,
    /// Either `12h` or `24h`
    #[serde(alias = "clock_format")]
    pub clock_format: String,
    /// Time of the last save as an ISO timestamp
    #[serde(alias = "last_update")]
    pub last_update: Option<String>,
}

impl ClockConfig {
    /// External field names paired with their snake_case aliases.
    pub const FIELDS: [(&'static str, &'static str); 8] = [
        ("haUrl", "ha_url"),
        ("haToken", "ha_token"),
        ("weatherEntity", "weather_entity"),
        ("calendarEntities", "calendar_entities"),
        ("timezone", "timezone"),
        ("updateInterval", "update_interval"),
        ("clockFormat", "clock_format"),
        ("lastUpdate", "last_update"),
    ];

    /// Resolves a field name, in either naming scheme, to its external name.
    pub fn external_field_name(name: &str) -> Option<&'static str> {
        Self::FIELDS
            .iter()
            .find(|(external, alias)| *external == name || *alias == name)
            .map(|(external, _)| *external)
    }

    pub fn is_hub_configured(&self) -> bool {
        !self.ha_url.is_empty() && !self.ha_token.is_empty()
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            ha_url: String::new(),
            ha_token: String::new(),
            weather_entity: String::from("weather.openweathermap"),
            calendar_entities: Vec::new(),
            timezone: String::from("America/Lima"),
            update_interval: 60000,
            clock_format: String::from("24h"),
            last_update: None,
        }
    }
}
