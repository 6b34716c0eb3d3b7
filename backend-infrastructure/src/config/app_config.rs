use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::{RuntimeConfig, StoreConfig};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub events_dir: String,
    pub profile_path: String,
    pub accuracy_threshold_meters: f64,
    pub token_validity_hours: i64,
    pub location_timeout_seconds: u64,
    pub repository_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            events_dir: "./data/events".to_string(),
            profile_path: "./profile.yaml".to_string(),
            accuracy_threshold_meters: 50.0,
            token_validity_hours: 24,
            location_timeout_seconds: 10,
            repository_timeout_seconds: 15,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("ROLLCALL_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let base_dir = file_path.parent();
        if !file_path.exists() {
            warn!("config.toml not found, using defaults");
            let mut config = AppConfig::default();
            config.apply_env_overrides();
            config.resolve_paths(base_dir);
            config.validate()?;
            return Ok(config);
        }
        let content = fs::read_to_string(file_path).await?;
        let mut config: AppConfig = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.validate()?;
        Ok(config)
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.events_dir = resolve_path(base, &self.events_dir);
        self.profile_path = resolve_path(base, &self.profile_path);
    }

    pub fn validate(&self) -> Result<()> {
        if self.events_dir.trim().is_empty() {
            return Err(anyhow!("events_dir must not be empty"));
        }
        if self.profile_path.trim().is_empty() {
            return Err(anyhow!("profile_path must not be empty"));
        }
        if !self.accuracy_threshold_meters.is_finite() || self.accuracy_threshold_meters <= 0.0 {
            return Err(anyhow!("accuracy_threshold_meters must be a positive number"));
        }
        if self.token_validity_hours <= 0 {
            return Err(anyhow!("token_validity_hours must be greater than 0"));
        }
        if self.location_timeout_seconds == 0 {
            return Err(anyhow!("location_timeout_seconds must be greater than 0"));
        }
        if self.repository_timeout_seconds == 0 {
            return Err(anyhow!("repository_timeout_seconds must be greater than 0"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            accuracy_threshold_meters: self.accuracy_threshold_meters,
            token_validity_hours: self.token_validity_hours,
            location_timeout_seconds: self.location_timeout_seconds,
            repository_timeout_seconds: self.repository_timeout_seconds,
            profile_path: self.profile_path.clone(),
        }
    }

    pub fn to_store_config(&self) -> StoreConfig {
        StoreConfig {
            events_dir: self.events_dir.clone(),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("ROLLCALL_EVENTS_DIR") {
            self.events_dir = value;
        }
        if let Ok(value) = env::var("ROLLCALL_PROFILE_PATH") {
            self.profile_path = value;
        }
        if let Ok(value) = env::var("ROLLCALL_ACCURACY_THRESHOLD_METERS") {
            self.accuracy_threshold_meters =
                value.parse().unwrap_or(self.accuracy_threshold_meters);
        }
        if let Ok(value) = env::var("ROLLCALL_TOKEN_VALIDITY_HOURS") {
            self.token_validity_hours = value.parse().unwrap_or(self.token_validity_hours);
        }
        if let Ok(value) = env::var("ROLLCALL_LOCATION_TIMEOUT_SECONDS") {
            self.location_timeout_seconds =
                value.parse().unwrap_or(self.location_timeout_seconds);
        }
        if let Ok(value) = env::var("ROLLCALL_REPOSITORY_TIMEOUT_SECONDS") {
            self.repository_timeout_seconds =
                value.parse().unwrap_or(self.repository_timeout_seconds);
        }
    }
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}
