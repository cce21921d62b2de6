//! Application configuration
//!
//! This module re-exports shared types from spellwatch-types and provides
//! persistence and path resolution for AppConfig.

use std::path::PathBuf;
use std::time::Duration;

pub use spellwatch_types::{
    AppConfig, CatalogSettings, CountdownSettings, LATEST_PATCH, MAX_POLL_INTERVAL_MS,
    MIN_POLL_INTERVAL_MS, TrackingVariant,
};

use super::ConfigError;

const APP_NAME: &str = "spellwatch";
const CONFIG_NAME: &str = "config";
const STATE_FILE_NAME: &str = "state.json";

// ─────────────────────────────────────────────────────────────────────────────
// Platform-Specific Defaults
// ─────────────────────────────────────────────────────────────────────────────

/// `<data dir>/spellwatch/state.json`, or the working directory if the
/// platform has no data dir
fn default_state_path() -> PathBuf {
    dirs::data_dir()
        .map(|p| p.join(APP_NAME))
        .unwrap_or_default()
        .join(STATE_FILE_NAME)
}

// ─────────────────────────────────────────────────────────────────────────────
// AppConfig Extensions
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for AppConfig persistence
pub trait AppConfigExt: Sized {
    fn load() -> Self;
    fn try_load() -> Result<Self, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    fn config_path() -> Result<PathBuf, ConfigError>;
    fn state_path(&self) -> PathBuf;
    fn poll_interval(&self) -> Duration;
}

impl AppConfigExt for AppConfig {
    /// Load the stored config, falling back to defaults on any failure
    fn load() -> Self {
        Self::try_load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load configuration, using defaults");
            Self::default()
        })
    }

    fn try_load() -> Result<Self, ConfigError> {
        Ok(confy::load(APP_NAME, CONFIG_NAME)?)
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    fn config_path() -> Result<PathBuf, ConfigError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).map_err(ConfigError::Load)
    }

    fn state_path(&self) -> PathBuf {
        match &self.state_file {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_state_path(),
        }
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.countdown.poll_interval_ms())
    }
}
