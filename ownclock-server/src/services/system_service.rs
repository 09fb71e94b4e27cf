use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use chrono::{Local, SecondsFormat};
use ownclock_api::models::{BatteryStatus, HealthResponse, SystemInfo, TimezoneResponse};
use regex::Regex;
use tokio::fs;
use tokio::process::Command;

use crate::errors::SystemError;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const UNKNOWN: &str = "Unknown";

const BATTERY_DEVICES: [&str; 2] = ["BAT0", "BAT1"];

static PERCENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)%").expect("percent pattern is valid"));

/// Host files and commands the collector works with.
#[derive(Debug, Clone)]
pub struct SystemHost {
    pub timezone_file: PathBuf,
    pub localtime_link: PathBuf,
    pub zoneinfo_dir: PathBuf,
    pub power_supply_dir: PathBuf,
    /// Program and leading arguments; the zone name is appended.
    pub timezone_command: Vec<String>,
}

impl Default for SystemHost {
    fn default() -> Self {
        Self {
            timezone_file: PathBuf::from("/etc/timezone"),
            localtime_link: PathBuf::from("/etc/localtime"),
            zoneinfo_dir: PathBuf::from("/usr/share/zoneinfo"),
            power_supply_dir: PathBuf::from("/sys/class/power_supply"),
            timezone_command: ["sudo", "timedatectl", "set-timezone"]
                .map(String::from)
                .to_vec(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SystemService {
    host: SystemHost,
}

impl SystemService {
    pub fn new(host: SystemHost) -> Self {
        Self { host }
    }

    pub fn health(&self) -> HealthResponse {
        HealthResponse {
            status: String::from("ok"),
            version: VERSION.to_string(),
            timestamp: Local::now().to_rfc3339_opts(SecondsFormat::Micros, false),
        }
    }

    pub async fn system_info(&self) -> SystemInfo {
        SystemInfo {
            hostname: hostname(),
            timezone: self.timezone().await,
            uptime: uptime().await,
            version: VERSION.to_string(),
        }
    }

    /// Host timezone from `/etc/timezone`, else from the `/etc/localtime` link target.
    pub async fn timezone(&self) -> String {
        if let Ok(content) = fs::read_to_string(&self.host.timezone_file).await {
            let timezone = content.trim();
            if !timezone.is_empty() {
                return timezone.to_string();
            }
        }

        fs::read_link(&self.host.localtime_link)
            .await
            .ok()
            .and_then(|target| {
                let target = target.to_string_lossy().into_owned();
                target
                    .split_once("zoneinfo/")
                    .map(|(_, name)| name.to_string())
            })
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// Reads the battery from sysfs, then from `upower`, then from `pmset`.
    pub async fn battery_status(&self) -> BatteryStatus {
        if let Some(status) = self.read_battery_files().await {
            return status;
        }

        let tools: [(&str, &[&str]); 2] = [
            ("upower", &["-i", "/org/freedesktop/UPower/devices/battery_BAT0"]),
            ("pmset", &["-g", "batt"]),
        ];

        for (program, args) in tools {
            match Command::new(program).args(args).output().await {
                Ok(output) if output.status.success() => {
                    let text = String::from_utf8_lossy(&output.stdout);
                    if let Some(status) = parse_tool_output(&text) {
                        return status;
                    }
                }
                Ok(output) => tracing::debug!("{program} exited with {}", output.status),
                Err(e) => tracing::debug!("{program} unavailable: {e}"),
            }
        }

        BatteryStatus::unavailable()
    }

    async fn read_battery_files(&self) -> Option<BatteryStatus> {
        for device in BATTERY_DEVICES {
            let dir = self.host.power_supply_dir.join(device);

            let Ok(capacity) = fs::read_to_string(dir.join("capacity")).await else {
                continue;
            };
            let Ok(percent) = capacity.trim().parse::<u8>() else {
                continue;
            };

            let status = fs::read_to_string(dir.join("status"))
                .await
                .map(|status| status.trim().to_string())
                .unwrap_or_else(|_| UNKNOWN.to_string());

            return Some(BatteryStatus {
                available: true,
                percent: Some(percent),
                charging: status.eq_ignore_ascii_case("charging"),
                status,
            });
        }

        None
    }

    /// Changes the host timezone through the configured command.
    pub async fn set_timezone(&self, timezone: &str) -> Result<TimezoneResponse, SystemError> {
        self.validate_timezone(timezone).await?;

        let (program, args) = self.host.timezone_command.split_first().ok_or_else(|| {
            SystemError::TimezoneCommandFailed(String::from("no timezone command configured"))
        })?;

        let output = Command::new(program)
            .args(args)
            .arg(timezone)
            .output()
            .await
            .map_err(|e| SystemError::TimezoneCommandFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(SystemError::TimezoneCommandFailed(stderr));
        }

        tracing::info!("system timezone changed to {timezone}");

        Ok(TimezoneResponse {
            status: String::from("ok"),
            timezone: timezone.to_string(),
        })
    }

    async fn validate_timezone(&self, timezone: &str) -> Result<(), SystemError> {
        let relative = Path::new(timezone);
        let is_plain = !timezone.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));

        let is_zone = is_plain
            && fs::metadata(self.host.zoneinfo_dir.join(relative))
                .await
                .is_ok_and(|metadata| metadata.is_file());

        if is_zone {
            Ok(())
        } else {
            Err(SystemError::InvalidTimezone(timezone.to_string()))
        }
    }
}

pub fn hostname() -> String {
    let mut buffer = [0u8; 256];
    // SAFETY: the buffer outlives the call and its length is passed alongside it.
    let result = unsafe { libc::gethostname(buffer.as_mut_ptr().cast(), buffer.len()) };

    if result != 0 {
        return String::from("localhost");
    }

    let length = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());

    String::from_utf8_lossy(&buffer[..length]).into_owned()
}

async fn uptime() -> String {
    match Command::new("uptime").arg("-p").output().await {
        Ok(output) if output.status.success() => {
            String::from_utf8_lossy(&output.stdout).trim().to_string()
        }
        Ok(output) => {
            tracing::debug!("uptime exited with {}", output.status);
            UNKNOWN.to_string()
        }
        Err(e) => {
            tracing::debug!("uptime unavailable: {e}");
            UNKNOWN.to_string()
        }
    }
}

/// Extracts a battery reading from `upower -i` or `pmset -g batt` output.
fn parse_tool_output(text: &str) -> Option<BatteryStatus> {
    let percent = PERCENT_PATTERN
        .captures(text)
        .and_then(|captures| captures[1].parse::<u8>().ok())?;

    let lower = text.to_lowercase();
    let charging = lower.contains("charging")
        && !lower.contains("discharging")
        && !lower.contains("not charging");

    let status = if charging {
        "Charging"
    } else if lower.contains("charged") {
        "Full"
    } else {
        "Discharging"
    };

    Some(BatteryStatus {
        available: true,
        percent: Some(percent),
        charging,
        status: status.to_string(),
    })
}
