use std::env;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::configs::ConfigStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Storage {
    /// Location of the clock config file, `<home>/.own_clock/config.json` when unset
    #[serde(default)]
    pub config_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frontend {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hub {
    pub timeout_secs: u64,
    pub accept_invalid_certs: bool,
}

impl Default for Hub {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            accept_invalid_certs: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct System {
    pub zoneinfo_dir: String,
    /// Program and leading arguments run to change the host timezone
    pub timezone_command: Vec<String>,
}

impl Default for System {
    fn default() -> Self {
        Self {
            zoneinfo_dir: String::from("/usr/share/zoneinfo"),
            timezone_command: ["sudo", "timedatectl", "set-timezone"]
                .map(String::from)
                .to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub logger: Logger,
    #[serde(default)]
    pub storage: Storage,
    pub frontend: Frontend,
    #[serde(default)]
    pub hub: Hub,
    #[serde(default)]
    pub system: System,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_dir("configs")
    }

    /// Layers `default.toml`, the optional `{RUN_MODE}.toml` and `OWNCLOCK__*` variables.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());

        Config::builder()
            .add_source(File::with_name(&dir.join("default").to_string_lossy()))
            .add_source(File::with_name(&dir.join(run_mode).to_string_lossy()).required(false))
            .add_source(
                Environment::with_prefix("OWNCLOCK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn config_path(&self) -> PathBuf {
        match self.storage.config_path.as_deref() {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => ConfigStore::default_path(),
        }
    }
}
