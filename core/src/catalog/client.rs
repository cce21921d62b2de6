//! HTTP client for the static game-data CDN

use std::future::Future;
use std::time::Duration;

use hashbrown::HashMap;
use serde::de::DeserializeOwned;
use spellwatch_types::CatalogSettings;

use super::CatalogError;
use super::model::{
    ChampionDetail, ChampionSummary, RawChampion, RawChampionDetail, RawDocument,
    RawSummonerSpell, SpellInfo,
};

const USER_AGENT: &str = concat!("spellwatch/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Anything that can answer catalog lookups
pub trait CatalogSource {
    /// Published patch versions, newest first
    fn fetch_versions(&self) -> impl Future<Output = Result<Vec<String>, CatalogError>> + Send;

    fn fetch_champion_list(
        &self,
        version: &str,
    ) -> impl Future<Output = Result<HashMap<String, ChampionSummary>, CatalogError>> + Send;

    fn fetch_champion_detail(
        &self,
        id: &str,
        version: &str,
    ) -> impl Future<Output = Result<ChampionDetail, CatalogError>> + Send;

    /// Summoner spells usable in `mode`, sorted by name
    fn fetch_spell_list(
        &self,
        version: &str,
        mode: &str,
    ) -> impl Future<Output = Result<Vec<SpellInfo>, CatalogError>> + Send;
}

/// Fetches catalog documents over HTTP
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    locale: String,
}

impl CatalogClient {
    pub fn new(settings: &CatalogSettings) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to build HTTP client, using defaults");
                reqwest::Client::new()
            });

        Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            locale: settings.locale.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn data_url(&self, version: &str, document: &str) -> String {
        format!(
            "{}/cdn/{}/data/{}/{}",
            self.base_url, version, self.locale, document
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, CatalogError> {
        tracing::debug!(%url, "Fetching catalog document");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| CatalogError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                url,
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| CatalogError::Decode { url, source })
    }
}

impl CatalogSource for CatalogClient {
    async fn fetch_versions(&self) -> Result<Vec<String>, CatalogError> {
        let url = format!("{}/api/versions.json", self.base_url);
        self.get_json(url).await
    }

    async fn fetch_champion_list(
        &self,
        version: &str,
    ) -> Result<HashMap<String, ChampionSummary>, CatalogError> {
        let doc: RawDocument<RawChampion> =
            self.get_json(self.data_url(version, "champion.json")).await?;

        Ok(doc
            .data
            .into_iter()
            .map(|(id, raw)| (id, ChampionSummary::from(raw)))
            .collect())
    }

    async fn fetch_champion_detail(
        &self,
        id: &str,
        version: &str,
    ) -> Result<ChampionDetail, CatalogError> {
        let document = format!("champion/{id}.json");
        let doc: RawDocument<RawChampionDetail> =
            self.get_json(self.data_url(version, &document)).await?;

        doc.data
            .into_values()
            .next()
            .map(ChampionDetail::from)
            .ok_or_else(|| CatalogError::NotFound {
                kind: "champion",
                id: id.to_string(),
                version: version.to_string(),
            })
    }

    async fn fetch_spell_list(
        &self,
        version: &str,
        mode: &str,
    ) -> Result<Vec<SpellInfo>, CatalogError> {
        let doc: RawDocument<RawSummonerSpell> =
            self.get_json(self.data_url(version, "summoner.json")).await?;

        let mut spells: Vec<SpellInfo> = doc
            .data
            .into_values()
            .filter(|raw| raw.available_in(mode))
            .map(SpellInfo::from)
            .collect();
        spells.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(spells)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Icon URLs
// ─────────────────────────────────────────────────────────────────────────────

/// URL of a champion square portrait, e.g. `.../img/champion/Ahri.png`
pub fn champion_icon_url(base_url: &str, version: &str, icon: &str) -> String {
    format!(
        "{}/cdn/{}/img/champion/{}",
        base_url.trim_end_matches('/'),
        version,
        icon
    )
}

/// URL of an ability or summoner spell icon
pub fn spell_icon_url(base_url: &str, version: &str, icon: &str) -> String {
    format!(
        "{}/cdn/{}/img/spell/{}",
        base_url.trim_end_matches('/'),
        version,
        icon
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_from_settings() {
        let settings = CatalogSettings {
            base_url: "https://cdn.example/".to_string(),
            ..CatalogSettings::default()
        };
        let client = CatalogClient::new(&settings);
        assert_eq!(client.base_url(), "https://cdn.example");
        assert_eq!(
            client.data_url("14.23.1", "champion.json"),
            "https://cdn.example/cdn/14.23.1/data/en_US/champion.json"
        );
    }

    #[test]
    fn icon_urls() {
        assert_eq!(
            champion_icon_url("https://cdn.example/", "14.23.1", "Ahri.png"),
            "https://cdn.example/cdn/14.23.1/img/champion/Ahri.png"
        );
        assert_eq!(
            spell_icon_url("https://cdn.example", "14.23.1", "SummonerFlash.png"),
            "https://cdn.example/cdn/14.23.1/img/spell/SummonerFlash.png"
        );
    }

    #[test]
    fn data_url_includes_locale() {
        let settings = CatalogSettings {
            base_url: "https://cdn.example/".to_string(),
            locale: "de_DE".to_string(),
            ..Default::default()
        };
        let client = CatalogClient::new(&settings);
        assert_eq!(
            client.data_url("14.23.1", "champion.json"),
            "https://cdn.example/cdn/14.23.1/data/de_DE/champion.json"
        );
    }

    #[test]
    fn summoner_mode_filter_is_case_insensitive() {
        let json = r#"{"data": {
            "SummonerFlash": {"id": "SummonerFlash", "name": "Flash", "cooldown": [300],
                              "modes": ["CLASSIC", "ARAM"], "image": {"full": "SummonerFlash.png"}},
            "SummonerSnowball": {"id": "SummonerSnowball", "name": "Mark", "cooldown": [80],
                                 "modes": ["ARAM"], "image": {"full": "SummonerSnowball.png"}}
        }}"#;
        let doc: RawDocument<RawSummonerSpell> = serde_json::from_str(json).unwrap();
        let classic: Vec<_> = doc
            .data
            .into_values()
            .filter(|s| s.available_in("classic"))
            .map(SpellInfo::from)
            .collect();
        assert_eq!(classic.len(), 1);
        assert_eq!(classic[0].cooldown_secs(), 300.0);
    }
}
