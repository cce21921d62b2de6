//! Per-champion tracking state
//!
//! An `EntitySlot` holds everything known about one enemy champion: who it is,
//! its ultimate rank and per-rank cooldowns, the haste values that shorten its
//! cooldowns, its two summoner spells, and the absolute end time of each of
//! the three tracked timers.
//!
//! # Derived values
//!
//! The active ultimate base cooldown is cached on the slot and recomputed by
//! every method that changes its inputs. Summoner spell haste is computed on
//! demand from the modifier toggles.

use std::fmt;

use serde::{Deserialize, Serialize};
use spellwatch_types::TrackingVariant;

use super::haste::{HasteModifier, HasteModifiers, derive_secondary_haste};
use super::tier::{Tier, derive_active_base_duration};
use crate::cooldown;

/// Cooldown of a summoner spell nobody has identified yet (Flash)
pub const DEFAULT_SPELL_COOLDOWN_SECS: f64 = 300.0;

/// Catalog identity of a champion or spell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
}

impl Identity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Which of the two summoner spells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpellSlot {
    First,
    Second,
}

impl SpellSlot {
    pub const ALL: [SpellSlot; 2] = [SpellSlot::First, SpellSlot::Second];

    pub fn index(self) -> usize {
        match self {
            SpellSlot::First => 0,
            SpellSlot::Second => 1,
        }
    }
}

/// One of the three timers tracked per slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    Ultimate,
    Spell(SpellSlot),
}

impl TimerKind {
    pub const ALL: [TimerKind; 3] = [
        TimerKind::Ultimate,
        TimerKind::Spell(SpellSlot::First),
        TimerKind::Spell(SpellSlot::Second),
    ];

    /// Position in [`TimerKind::ALL`]
    pub fn index(self) -> usize {
        match self {
            TimerKind::Ultimate => 0,
            TimerKind::Spell(slot) => 1 + slot.index(),
        }
    }
}

impl fmt::Display for TimerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerKind::Ultimate => f.write_str("ult"),
            TimerKind::Spell(SpellSlot::First) => f.write_str("spell1"),
            TimerKind::Spell(SpellSlot::Second) => f.write_str("spell2"),
        }
    }
}

/// A summoner spell and its timer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellState {
    /// Identified spell, `None` while assumed to be the default
    #[serde(default)]
    pub spell: Option<Identity>,
    pub cooldown_secs: f64,
    #[serde(default)]
    pub ends_at: Option<i64>,
}

impl Default for SpellState {
    fn default() -> Self {
        Self {
            spell: None,
            cooldown_secs: DEFAULT_SPELL_COOLDOWN_SECS,
            ends_at: None,
        }
    }
}

/// Tracking state for one enemy champion
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntitySlot {
    #[serde(default)]
    entity: Option<Identity>,
    #[serde(default)]
    tier: Tier,
    /// Ultimate base cooldown at ranks 1, 2 and 3
    #[serde(default)]
    tier_cooldowns: [f64; 3],
    #[serde(skip)]
    active_base: Option<f64>,
    #[serde(default)]
    ability_haste: u32,
    #[serde(default)]
    modifiers: HasteModifiers,
    #[serde(default)]
    spells: [SpellState; 2],
    #[serde(default)]
    ultimate_ends_at: Option<i64>,
}

impl EntitySlot {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fresh slot for a newly picked champion, ultimate at rank 1.
    ///
    /// Negative or non-finite table entries are stored as 0.
    pub fn assigned(entity: Identity, tier_cooldowns: [f64; 3]) -> Self {
        let mut slot = Self {
            entity: Some(entity),
            tier: Tier::T1,
            tier_cooldowns: tier_cooldowns.map(sanitize_secs),
            ..Self::default()
        };
        slot.rederive();
        slot
    }

    // ─── Read access ────────────────────────────────────────────────────────

    pub fn entity(&self) -> Option<&Identity> {
        self.entity.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.entity.is_none()
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn tier_cooldowns(&self) -> &[f64; 3] {
        &self.tier_cooldowns
    }

    /// Ultimate base cooldown at the current rank, `None` at T0
    pub fn active_base_duration(&self) -> Option<f64> {
        self.active_base
    }

    pub fn ability_haste(&self) -> u32 {
        self.ability_haste
    }

    pub fn modifiers(&self) -> &HasteModifiers {
        &self.modifiers
    }

    pub fn secondary_haste(&self) -> u32 {
        derive_secondary_haste(&self.modifiers)
    }

    pub fn spell(&self, which: SpellSlot) -> &SpellState {
        &self.spells[which.index()]
    }

    pub fn end_time(&self, kind: TimerKind) -> Option<i64> {
        match kind {
            TimerKind::Ultimate => self.ultimate_ends_at,
            TimerKind::Spell(which) => self.spells[which.index()].ends_at,
        }
    }

    /// End times in [`TimerKind::ALL`] order
    pub fn end_times(&self) -> [Option<i64>; 3] {
        TimerKind::ALL.map(|kind| self.end_time(kind))
    }

    pub fn is_running(&self, kind: TimerKind, now_ms: i64) -> bool {
        self.end_time(kind).is_some_and(|end| end > now_ms)
    }

    pub fn remaining_secs(&self, kind: TimerKind, now_ms: i64) -> u64 {
        self.end_time(kind)
            .map_or(0, |end| cooldown::remaining_secs(end, now_ms))
    }

    /// Base cooldown the timer would start from, before haste
    pub fn base_duration(&self, kind: TimerKind, variant: TrackingVariant) -> Option<f64> {
        match (kind, variant) {
            (TimerKind::Ultimate, _) => self.active_base,
            (TimerKind::Spell(which), TrackingVariant::Full) => {
                Some(self.spells[which.index()].cooldown_secs)
            }
            (TimerKind::Spell(_), TrackingVariant::Simplified) => Some(DEFAULT_SPELL_COOLDOWN_SECS),
        }
    }

    /// Haste that shortens the given timer
    pub fn applicable_haste(&self, kind: TimerKind, variant: TrackingVariant) -> u32 {
        match (kind, variant) {
            (TimerKind::Ultimate, _) | (TimerKind::Spell(_), TrackingVariant::Simplified) => {
                self.ability_haste
            }
            (TimerKind::Spell(_), TrackingVariant::Full) => self.secondary_haste(),
        }
    }

    /// Haste-adjusted cooldown in seconds, `None` if the ability has no cooldown yet
    pub fn effective_duration(&self, kind: TimerKind, variant: TrackingVariant) -> Option<f64> {
        let base = self.base_duration(kind, variant)?;
        let haste = self.applicable_haste(kind, variant);
        Some(cooldown::effective(base, f64::from(haste)))
    }

    // ─── Mutation (store only) ──────────────────────────────────────────────

    pub(crate) fn cycle_tier(&mut self) {
        self.tier = self.tier.next();
        self.rederive();
    }

    pub(crate) fn toggle_modifier(&mut self, modifier: HasteModifier) {
        self.modifiers.toggle(modifier);
    }

    pub(crate) fn set_ability_haste(&mut self, haste: u32) {
        self.ability_haste = haste;
    }

    pub(crate) fn assign_spell(&mut self, which: SpellSlot, spell: Identity, cooldown_secs: f64) {
        self.spells[which.index()] = SpellState {
            spell: Some(spell),
            cooldown_secs: sanitize_secs(cooldown_secs),
            ends_at: None,
        };
    }

    pub(crate) fn set_end_time(&mut self, kind: TimerKind, ends_at: Option<i64>) {
        match kind {
            TimerKind::Ultimate => self.ultimate_ends_at = ends_at,
            TimerKind::Spell(which) => self.spells[which.index()].ends_at = ends_at,
        }
    }

    /// Zero any negative or non-finite cooldown and recompute the derived base.
    /// Deserialized slots skip the checks `assigned` and `assign_spell` apply.
    pub(crate) fn sanitize(&mut self) {
        self.tier_cooldowns = self.tier_cooldowns.map(sanitize_secs);
        for spell in &mut self.spells {
            spell.cooldown_secs = sanitize_secs(spell.cooldown_secs);
        }
        self.rederive();
    }

    /// Recompute the cached ultimate base cooldown from rank and table
    pub(crate) fn rederive(&mut self) {
        self.active_base = derive_active_base_duration(self.tier, &self.tier_cooldowns);
    }

    /// Drop end times at or before `now_ms`. Returns how many were dropped.
    pub(crate) fn clear_expired(&mut self, now_ms: i64) -> usize {
        let mut cleared = 0;
        for kind in TimerKind::ALL {
            if self.end_time(kind).is_some_and(|end| end <= now_ms) {
                self.set_end_time(kind, None);
                cleared += 1;
            }
        }
        cleared
    }
}

fn sanitize_secs(secs: f64) -> f64 {
    if secs.is_finite() && secs > 0.0 { secs } else { 0.0 }
}
