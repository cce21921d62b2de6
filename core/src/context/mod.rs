mod config;
mod error;

pub use config::{
    AppConfig, AppConfigExt, CatalogSettings, CountdownSettings, LATEST_PATCH,
    MAX_POLL_INTERVAL_MS, MIN_POLL_INTERVAL_MS, TrackingVariant,
};
pub use error::ConfigError;
