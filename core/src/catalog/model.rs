//! Catalog records
//!
//! Public types are what the rest of the crate consumes. The `Raw*` types
//! mirror the CDN's JSON documents and are converted on the way in.

use hashbrown::HashMap;
use serde::Deserialize;

use crate::slot::Identity;

/// Entry of the champion list
#[derive(Debug, Clone, PartialEq)]
pub struct ChampionSummary {
    pub id: String,
    pub name: String,
    /// Image file name, e.g. `Ahri.png`
    pub icon: String,
}

/// One champion ability with its per-rank cooldowns
#[derive(Debug, Clone, PartialEq)]
pub struct AbilityInfo {
    pub id: String,
    pub name: String,
    pub cooldowns: Vec<f64>,
}

/// Champion detail record; abilities are in Q, W, E, R order
#[derive(Debug, Clone, PartialEq)]
pub struct ChampionDetail {
    pub id: String,
    pub name: String,
    pub abilities: Vec<AbilityInfo>,
}

impl ChampionDetail {
    /// Position of the ultimate in `abilities`
    pub const ULTIMATE_INDEX: usize = 3;

    pub fn identity(&self) -> Identity {
        Identity::new(self.id.clone(), self.name.clone())
    }

    pub fn ultimate(&self) -> Option<&AbilityInfo> {
        self.abilities.get(Self::ULTIMATE_INDEX)
    }

    /// Ultimate cooldown at ranks 1–3. Missing entries read as 0.
    pub fn ultimate_cooldowns(&self) -> [f64; 3] {
        let mut table = [0.0; 3];
        if let Some(ult) = self.ultimate() {
            for (slot, value) in table.iter_mut().zip(&ult.cooldowns) {
                *slot = *value;
            }
        }
        table
    }
}

/// Summoner spell entry
#[derive(Debug, Clone, PartialEq)]
pub struct SpellInfo {
    pub id: String,
    pub name: String,
    pub cooldown: Vec<f64>,
    pub icon: String,
}

impl SpellInfo {
    pub fn identity(&self) -> Identity {
        Identity::new(self.id.clone(), self.name.clone())
    }

    /// Base cooldown in seconds (summoner spells have a single rank)
    pub fn cooldown_secs(&self) -> f64 {
        self.cooldown.first().copied().unwrap_or(0.0)
    }
}

/// Champion list sorted by display name
pub fn sorted_champions(list: &HashMap<String, ChampionSummary>) -> Vec<ChampionSummary> {
    let mut champions: Vec<_> = list.values().cloned().collect();
    champions.sort_by(|a, b| a.name.cmp(&b.name));
    champions
}

// ─────────────────────────────────────────────────────────────────────────────
// CDN documents
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct RawDocument<T> {
    pub data: HashMap<String, T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawImage {
    pub full: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawChampion {
    pub id: String,
    pub name: String,
    pub image: RawImage,
}

impl From<RawChampion> for ChampionSummary {
    fn from(raw: RawChampion) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            icon: raw.image.full,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawAbility {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub cooldown: Vec<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawChampionDetail {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub spells: Vec<RawAbility>,
}

impl From<RawChampionDetail> for ChampionDetail {
    fn from(raw: RawChampionDetail) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            abilities: raw
                .spells
                .into_iter()
                .map(|s| AbilityInfo {
                    id: s.id,
                    name: s.name,
                    cooldowns: s.cooldown,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSummonerSpell {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub cooldown: Vec<f64>,
    #[serde(default)]
    pub modes: Vec<String>,
    pub image: RawImage,
}

impl RawSummonerSpell {
    pub fn available_in(&self, mode: &str) -> bool {
        self.modes.iter().any(|m| m.eq_ignore_ascii_case(mode))
    }
}

impl From<RawSummonerSpell> for SpellInfo {
    fn from(raw: RawSummonerSpell) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            cooldown: raw.cooldown,
            icon: raw.image.full,
        }
    }
}
