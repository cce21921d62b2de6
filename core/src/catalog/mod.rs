//! Static game-data catalog
//!
//! Champion names, icons and ability cooldowns come from the public data CDN.
//! The tracking engine never talks to the network itself: callers fetch
//! through [`CachedCatalog`] and hand fully resolved records to the store.

mod cache;
mod client;
mod error;
mod model;

pub use cache::{CachePolicy, CachedCatalog, CatalogCache};
pub use client::{CatalogClient, CatalogSource, champion_icon_url, spell_icon_url};
pub use error::CatalogError;
pub use model::{AbilityInfo, ChampionDetail, ChampionSummary, SpellInfo, sorted_champions};
