//! Per-patch catalog cache
//!
//! Catalog documents only change between patches, so lookups are cached
//! against the patch version they were fetched for. Asking for a different
//! version drops everything. A TTL policy additionally expires entries by age.

use std::time::Duration;

use hashbrown::HashMap;
use spellwatch_types::CatalogSettings;
use tokio::time::Instant;

use super::client::CatalogSource;
use super::model::{ChampionDetail, ChampionSummary, SpellInfo, sorted_champions};
use super::CatalogError;

/// When cached catalog data stops being trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Keep entries until the patch version changes or `clear` is called
    #[default]
    PerPatch,
    /// Like `PerPatch`, but entries also expire after the given age
    MaxAge(Duration),
}

#[derive(Debug)]
struct Entry<T> {
    value: T,
    fetched_at: Instant,
}

impl<T> Entry<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            fetched_at: Instant::now(),
        }
    }
}

/// Cached documents for a single patch
#[derive(Debug, Default)]
pub struct CatalogCache {
    policy: CachePolicy,
    version: Option<String>,
    latest: Option<Entry<String>>,
    champions: Option<Entry<HashMap<String, ChampionSummary>>>,
    details: HashMap<String, Entry<ChampionDetail>>,
    spells: HashMap<String, Entry<Vec<SpellInfo>>>,
}

impl CatalogCache {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Patch version the cached documents belong to
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.version = None;
        self.latest = None;
        self.champions = None;
        self.details.clear();
        self.spells.clear();
    }

    /// Switch to `version`, dropping documents cached for another patch.
    /// Returns true if anything was invalidated.
    pub fn ensure_version(&mut self, version: &str) -> bool {
        if self.version.as_deref() == Some(version) {
            return false;
        }
        let had_data = self.version.is_some();
        self.champions = None;
        self.details.clear();
        self.spells.clear();
        self.version = Some(version.to_string());
        if had_data {
            tracing::info!(version, "Patch changed, catalog cache cleared");
        }
        had_data
    }

    fn is_fresh<T>(&self, entry: &Entry<T>) -> bool {
        match self.policy {
            CachePolicy::PerPatch => true,
            CachePolicy::MaxAge(max_age) => entry.fetched_at.elapsed() < max_age,
        }
    }
}

/// A [`CatalogSource`] fronted by a [`CatalogCache`]
#[derive(Debug)]
pub struct CachedCatalog<S> {
    source: S,
    cache: CatalogCache,
}

impl<S: CatalogSource> CachedCatalog<S> {
    pub fn new(source: S, policy: CachePolicy) -> Self {
        Self {
            source,
            cache: CatalogCache::new(policy),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &CatalogCache {
        &self.cache
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Concrete patch version for the configured one, resolving "latest"
    pub async fn resolve_version(
        &mut self,
        settings: &CatalogSettings,
    ) -> Result<String, CatalogError> {
        if !settings.wants_latest() {
            return Ok(settings.patch_version.clone());
        }

        if let Some(entry) = &self.cache.latest
            && self.cache.is_fresh(entry)
        {
            return Ok(entry.value.clone());
        }

        let latest = self
            .source
            .fetch_versions()
            .await?
            .into_iter()
            .next()
            .ok_or(CatalogError::NoVersions)?;
        tracing::info!(version = %latest, "Resolved latest patch");
        self.cache.latest = Some(Entry::new(latest.clone()));
        Ok(latest)
    }

    /// Champion list sorted by name
    pub async fn champions(&mut self, version: &str) -> Result<Vec<ChampionSummary>, CatalogError> {
        self.cache.ensure_version(version);

        if let Some(entry) = &self.cache.champions
            && self.cache.is_fresh(entry)
        {
            return Ok(sorted_champions(&entry.value));
        }

        let list = self.source.fetch_champion_list(version).await?;
        let sorted = sorted_champions(&list);
        self.cache.champions = Some(Entry::new(list));
        Ok(sorted)
    }

    /// Find a champion by id or display name (case-insensitive)
    pub async fn find_champion(
        &mut self,
        version: &str,
        query: &str,
    ) -> Result<Option<ChampionSummary>, CatalogError> {
        let champions = self.champions(version).await?;
        Ok(champions
            .into_iter()
            .find(|c| c.id.eq_ignore_ascii_case(query) || c.name.eq_ignore_ascii_case(query)))
    }

    pub async fn champion_detail(
        &mut self,
        id: &str,
        version: &str,
    ) -> Result<ChampionDetail, CatalogError> {
        self.cache.ensure_version(version);

        if let Some(entry) = self.cache.details.get(id)
            && self.cache.is_fresh(entry)
        {
            return Ok(entry.value.clone());
        }

        let detail = self.source.fetch_champion_detail(id, version).await?;
        self.cache
            .details
            .insert(id.to_string(), Entry::new(detail.clone()));
        Ok(detail)
    }

    /// Summoner spells for a game mode, sorted by name
    pub async fn spells(&mut self, version: &str, mode: &str) -> Result<Vec<SpellInfo>, CatalogError> {
        self.cache.ensure_version(version);

        if let Some(entry) = self.cache.spells.get(mode)
            && self.cache.is_fresh(entry)
        {
            return Ok(entry.value.clone());
        }

        let spells = self.source.fetch_spell_list(version, mode).await?;
        self.cache
            .spells
            .insert(mode.to_string(), Entry::new(spells.clone()));
        Ok(spells)
    }

    /// Find a summoner spell by id or display name (case-insensitive)
    pub async fn find_spell(
        &mut self,
        version: &str,
        mode: &str,
        query: &str,
    ) -> Result<Option<SpellInfo>, CatalogError> {
        let spells = self.spells(version, mode).await?;
        Ok(spells
            .into_iter()
            .find(|s| s.id.eq_ignore_ascii_case(query) || s.name.eq_ignore_ascii_case(query)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::catalog::AbilityInfo;

    /// In-memory source that counts every fetch
    #[derive(Clone, Default)]
    struct FakeSource {
        fetches: Arc<AtomicUsize>,
    }

    impl FakeSource {
        fn fetches(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }

        fn hit(&self) {
            self.fetches.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl CatalogSource for FakeSource {
        async fn fetch_versions(&self) -> Result<Vec<String>, CatalogError> {
            self.hit();
            Ok(vec!["14.24.1".to_string(), "14.23.1".to_string()])
        }

        async fn fetch_champion_list(
            &self,
            _version: &str,
        ) -> Result<HashMap<String, ChampionSummary>, CatalogError> {
            self.hit();
            let mut list = HashMap::new();
            for name in ["Zed", "Ahri"] {
                list.insert(
                    name.to_string(),
                    ChampionSummary {
                        id: name.to_string(),
                        name: name.to_string(),
                        icon: format!("{name}.png"),
                    },
                );
            }
            Ok(list)
        }

        async fn fetch_champion_detail(
            &self,
            id: &str,
            version: &str,
        ) -> Result<ChampionDetail, CatalogError> {
            self.hit();
            if id != "Ahri" {
                return Err(CatalogError::NotFound {
                    kind: "champion",
                    id: id.to_string(),
                    version: version.to_string(),
                });
            }
            Ok(ChampionDetail {
                id: "Ahri".to_string(),
                name: "Ahri".to_string(),
                abilities: vec![AbilityInfo {
                    id: "AhriR".to_string(),
                    name: "Spirit Rush".to_string(),
                    cooldowns: vec![130.0, 105.0, 80.0],
                }],
            })
        }

        async fn fetch_spell_list(
            &self,
            _version: &str,
            _mode: &str,
        ) -> Result<Vec<SpellInfo>, CatalogError> {
            self.hit();
            Ok(vec![SpellInfo {
                id: "SummonerFlash".to_string(),
                name: "Flash".to_string(),
                cooldown: vec![300.0],
                icon: "SummonerFlash.png".to_string(),
            }])
        }
    }

    #[tokio::test]
    async fn repeated_lookups_hit_cache() {
        let source = FakeSource::default();
        let mut catalog = CachedCatalog::new(source.clone(), CachePolicy::PerPatch);

        let first = catalog.champions("14.23.1").await.unwrap();
        let second = catalog.champions("14.23.1").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0].name, "Ahri");
        assert_eq!(source.fetches(), 1);

        catalog.champion_detail("Ahri", "14.23.1").await.unwrap();
        catalog.champion_detail("Ahri", "14.23.1").await.unwrap();
        assert_eq!(source.fetches(), 2);
    }

    #[tokio::test]
    async fn version_change_invalidates() {
        let source = FakeSource::default();
        let mut catalog = CachedCatalog::new(source.clone(), CachePolicy::PerPatch);

        catalog.spells("14.23.1", "CLASSIC").await.unwrap();
        catalog.spells("14.24.1", "CLASSIC").await.unwrap();
        assert_eq!(source.fetches(), 2);
        assert_eq!(catalog.cache().version(), Some("14.24.1"));
    }

    #[tokio::test]
    async fn explicit_clear_refetches() {
        let source = FakeSource::default();
        let mut catalog = CachedCatalog::new(source.clone(), CachePolicy::PerPatch);

        catalog.champions("14.23.1").await.unwrap();
        catalog.clear();
        assert_eq!(catalog.cache().version(), None);
        catalog.champions("14.23.1").await.unwrap();
        assert_eq!(source.fetches(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn max_age_expires_entries() {
        let source = FakeSource::default();
        let policy = CachePolicy::MaxAge(Duration::from_secs(60));
        let mut catalog = CachedCatalog::new(source.clone(), policy);

        catalog.champions("14.23.1").await.unwrap();
        tokio::time::advance(Duration::from_secs(30)).await;
        catalog.champions("14.23.1").await.unwrap();
        assert_eq!(source.fetches(), 1);

        tokio::time::advance(Duration::from_secs(31)).await;
        catalog.champions("14.23.1").await.unwrap();
        assert_eq!(source.fetches(), 2);
    }

    #[tokio::test]
    async fn latest_resolves_to_first_version() {
        let source = FakeSource::default();
        let mut catalog = CachedCatalog::new(source.clone(), CachePolicy::PerPatch);

        let settings = CatalogSettings::default();
        assert_eq!(catalog.resolve_version(&settings).await.unwrap(), "14.24.1");
        assert_eq!(catalog.resolve_version(&settings).await.unwrap(), "14.24.1");
        assert_eq!(source.fetches(), 1);

        let pinned = CatalogSettings {
            patch_version: "13.1.1".to_string(),
            ..Default::default()
        };
        assert_eq!(catalog.resolve_version(&pinned).await.unwrap(), "13.1.1");
        assert_eq!(source.fetches(), 1);
    }

    #[tokio::test]
    async fn lookups_match_name_or_id() {
        let mut catalog = CachedCatalog::new(FakeSource::default(), CachePolicy::PerPatch);

        let zed = catalog.find_champion("14.23.1", "zed").await.unwrap();
        assert_eq!(zed.map(|c| c.id), Some("Zed".to_string()));

        let flash = catalog.find_spell("14.23.1", "CLASSIC", "flash").await.unwrap();
        assert_eq!(flash.map(|s| s.id), Some("SummonerFlash".to_string()));

        let err = catalog.champion_detail("Nobody", "14.23.1").await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }));
    }
}
