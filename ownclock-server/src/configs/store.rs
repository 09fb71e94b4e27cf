use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use ownclock_api::models::ClockConfig;
use serde_json::{Map, Value};

use crate::errors::ConfigStoreError;

/// Owns the single clock config file.
///
/// Reads and writes are whole-file and unsynchronised: concurrent writers race
/// and the last one wins.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> PathBuf {
        let home = env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        home.join(".own_clock").join("config.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored config, or the defaults when the file is missing or unreadable.
    pub fn get(&self) -> ClockConfig {
        match self.read() {
            Ok(Some(config)) => config,
            Ok(None) => ClockConfig::default(),
            Err(e) => {
                tracing::warn!("failed to read config from {}: {e}", self.path.display());
                ClockConfig::default()
            }
        }
    }

    pub fn save(&self, config: &ClockConfig) -> bool {
        match self.write(config) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("failed to save config to {}: {e}", self.path.display());
                false
            }
        }
    }

    /// Merges `updates` over the current record and persists the result.
    ///
    /// Keys may use either the camelCase or the snake_case field name.
    pub fn update(&self, updates: Map<String, Value>) -> Result<ClockConfig, ConfigStoreError> {
        let mut merged = match serde_json::to_value(self.get())? {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        for (key, value) in updates {
            let field = ClockConfig::external_field_name(&key)
                .ok_or(ConfigStoreError::InvalidField(key))?;
            merged.insert(field.to_string(), value);
        }

        let config: ClockConfig = serde_json::from_value(Value::Object(merged))
            .map_err(|e| ConfigStoreError::InvalidValue(e.to_string()))?;

        if !self.save(&config) {
            return Err(ConfigStoreError::PersistFailed);
        }

        Ok(config)
    }

    /// Overwrites the file with the defaults and returns them.
    pub fn reset(&self) -> Result<ClockConfig, ConfigStoreError> {
        let config = ClockConfig::default();

        if !self.save(&config) {
            return Err(ConfigStoreError::PersistFailed);
        }

        Ok(config)
    }

    fn read(&self) -> Result<Option<ClockConfig>, ConfigStoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        Ok(Some(serde_json::from_str(&content)?))
    }

    fn write(&self, config: &ClockConfig) -> Result<(), ConfigStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, content)?;

        tracing::debug!("config saved to {}", self.path.display());

        Ok(())
    }
}
