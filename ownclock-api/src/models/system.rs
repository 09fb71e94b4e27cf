use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok` while the service answers
    pub status: String,
    /// Server version
    pub version: String,
    /// Time of the response
    pub timestamp: String,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Host name of the machine
    pub hostname: String,
    /// Operating system timezone, or `Unknown`
    pub timezone: String,
    /// Human readable uptime, or `Unknown`
    pub uptime: String,
    /// Server version
    pub version: String,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryStatus {
    /// Whether any battery reading could be taken
    pub available: bool,
    /// Charge level in percent
    pub percent: Option<u8>,
    /// Whether the battery is currently charging
    pub charging: bool,
    /// Status text reported by the platform
    pub status: String,
}

impl BatteryStatus {
    pub fn unavailable() -> Self {
        Self {
            available: false,
            percent: None,
            charging: false,
            status: String::from("No battery"),
        }
    }
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimezoneResponse {
    pub status: String,
    /// Timezone now active on the host
    pub timezone: String,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub status: String,
    pub message: String,
}
