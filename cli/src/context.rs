use std::path::PathBuf;

use spellwatch_core::catalog::{CachePolicy, CachedCatalog, CatalogClient, CatalogError};
use spellwatch_core::{AppConfig, AppConfigExt, CountdownBoard, SystemClock, TimerStore};

/// Holds all state for the CLI session.
/// This is a lightweight container - logic lives in the individual state types.
pub struct CliContext {
    pub config: AppConfig,
    pub store: TimerStore<SystemClock>,
    pub board: CountdownBoard<SystemClock>,
    pub catalog: CachedCatalog<CatalogClient>,
    state_path: PathBuf,
}

impl CliContext {
    /// Load config and the saved slot state, and arm countdowns for any
    /// timers still running from the last session.
    pub fn new() -> Self {
        Self::with_config(AppConfig::load())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let state_path = config.state_path();
        let store = TimerStore::load_or_default(&state_path, config.variant, SystemClock);
        let mut board = CountdownBoard::new(SystemClock, config.poll_interval());
        board.sync(&store.snapshot());

        let catalog = CachedCatalog::new(CatalogClient::new(&config.catalog), CachePolicy::PerPatch);

        tracing::info!(
            state = %state_path.display(),
            variant = config.variant.label(),
            "Session started"
        );

        Self {
            config,
            store,
            board,
            catalog,
            state_path,
        }
    }

    pub fn state_path(&self) -> &PathBuf {
        &self.state_path
    }

    /// Patch version to query, resolving "latest"
    pub async fn patch_version(&mut self) -> Result<String, CatalogError> {
        self.catalog.resolve_version(&self.config.catalog).await
    }

    /// Publish a store change: re-arm countdowns and persist slot state
    pub fn commit(&mut self) {
        self.board.sync(&self.store.snapshot());
        if let Err(e) = self.store.save(&self.state_path) {
            tracing::warn!(error = %e, "Failed to save slot state");
            println!("Warning: could not save state: {e}");
        }
    }

    /// Stop all background polling
    pub fn shutdown(&mut self) {
        self.board.cancel_all();
    }
}

impl Default for CliContext {
    fn default() -> Self {
        Self::new()
    }
}
