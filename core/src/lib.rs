pub mod catalog;
pub mod clock;
pub mod context;
pub mod cooldown;
pub mod countdown;
pub mod slot;
pub mod store;

// Re-exports for convenience
pub use catalog::{CachePolicy, CachedCatalog, CatalogClient, CatalogError, CatalogSource};
pub use clock::{Clock, ManualClock, SystemClock};
pub use context::{AppConfig, AppConfigExt, ConfigError, TrackingVariant};
pub use countdown::{Countdown, CountdownBoard, CountdownObserver};
pub use slot::{
    EntitySlot, HasteModifier, Identity, SLOT_COUNT, Slots, SpellSlot, Tier, TimerKind,
};
pub use store::{PersistedState, PersistenceError, TimerStore};
