//! Shared configuration types for spellwatch
//!
//! This crate contains serializable configuration types that are shared between
//! the tracking engine (spellwatch-core) and its front-ends.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Tracking Variant
// ─────────────────────────────────────────────────────────────────────────────

/// How summoner spell timers are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingVariant {
    /// Each spell carries its own identity and cooldown, and spells use
    /// summoner spell haste from the boots/insight toggles.
    #[default]
    Full,
    /// Both spells share the default cooldown and use the champion's
    /// ability haste. Modifier toggles and spell assignment are ignored.
    Simplified,
}

impl TrackingVariant {
    pub fn label(&self) -> &'static str {
        match self {
            TrackingVariant::Full => "full",
            TrackingVariant::Simplified => "simplified",
        }
    }

    /// Whether per-spell identity and the haste toggles are tracked
    pub fn tracks_spell_details(&self) -> bool {
        matches!(self, TrackingVariant::Full)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Catalog Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Patch version sentinel that resolves to the newest published patch
pub const LATEST_PATCH: &str = "latest";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// CDN root serving the static game data
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Explicit patch version (e.g. "14.23.1") or "latest"
    #[serde(default = "default_patch_version")]
    pub patch_version: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Game mode used to filter the summoner spell list
    #[serde(default = "default_game_mode")]
    pub game_mode: String,
}

fn default_base_url() -> String {
    "https://ddragon.leagueoflegends.com".to_string()
}

fn default_patch_version() -> String {
    LATEST_PATCH.to_string()
}

fn default_locale() -> String {
    "en_US".to_string()
}

fn default_game_mode() -> String {
    "CLASSIC".to_string()
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            patch_version: default_patch_version(),
            locale: default_locale(),
            game_mode: default_game_mode(),
        }
    }
}

impl CatalogSettings {
    /// Returns true if the patch version should be resolved against the CDN
    pub fn wants_latest(&self) -> bool {
        self.patch_version.trim().is_empty() || self.patch_version == LATEST_PATCH
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Countdown Settings
// ─────────────────────────────────────────────────────────────────────────────

pub const MIN_POLL_INTERVAL_MS: u64 = 100;
pub const MAX_POLL_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownSettings {
    /// How often running countdowns are re-derived from the clock
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_poll_interval_ms() -> u64 {
    MAX_POLL_INTERVAL_MS
}

impl Default for CountdownSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl CountdownSettings {
    /// Poll interval clamped to the supported range
    pub fn poll_interval_ms(&self) -> u64 {
        self.poll_interval_ms
            .clamp(MIN_POLL_INTERVAL_MS, MAX_POLL_INTERVAL_MS)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// App Config
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub variant: TrackingVariant,
    /// Overrides the default location of the persisted slot state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_file: Option<String>,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub countdown: CountdownSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            variant: TrackingVariant::default(),
            state_file: None,
            catalog: CatalogSettings::default(),
            countdown: CountdownSettings::default(),
        }
    }
}
