//! The timer store
//!
//! Owns the five enemy slots and is the only place they change. Every
//! mutation builds a new slot array and swaps the shared reference, so a
//! snapshot handed out earlier never changes underneath its reader.
//! Mutations that would not change anything (bad index, duplicate start,
//! unavailable cooldown) return `false` and publish nothing.

use std::path::Path;
use std::sync::Arc;

use spellwatch_types::TrackingVariant;
use tokio::sync::watch;

use super::PersistenceError;
use super::persistence::PersistedState;
use crate::catalog::{ChampionDetail, SpellInfo};
use crate::clock::{Clock, SystemClock};
use crate::cooldown;
use crate::slot::{
    EntitySlot, HasteModifier, SLOT_COUNT, Slots, SpellSlot, TimerKind, parse_haste,
};

/// Ordered collection of the five tracked enemy slots
#[derive(Debug)]
pub struct TimerStore<C: Clock = SystemClock> {
    slots: Arc<Slots>,
    variant: TrackingVariant,
    clock: C,
    snapshots: watch::Sender<Arc<Slots>>,
}

impl<C: Clock> TimerStore<C> {
    /// Store with five empty slots
    pub fn new(variant: TrackingVariant, clock: C) -> Self {
        Self::with_slots(Slots::default(), variant, clock)
    }

    fn with_slots(slots: Slots, variant: TrackingVariant, clock: C) -> Self {
        let slots = Arc::new(slots);
        let (snapshots, _) = watch::channel(Arc::clone(&slots));
        Self {
            slots,
            variant,
            clock,
            snapshots,
        }
    }

    /// Rebuild a store from persisted state.
    ///
    /// Stored cooldowns are re-checked, end times at or before the current
    /// clock are dropped and derived durations recomputed before the store
    /// is returned.
    pub fn restore(
        state: PersistedState,
        variant: TrackingVariant,
        clock: C,
    ) -> Result<Self, PersistenceError> {
        let mut slots = state.into_slots()?;
        let now = clock.now_ms();

        let mut expired = 0;
        for slot in slots.iter_mut() {
            slot.sanitize();
            expired += slot.clear_expired(now);
        }
        tracing::info!(expired, "Restored slot state");

        Ok(Self::with_slots(slots, variant, clock))
    }

    /// Load from a state file, falling back to empty slots on any failure
    pub fn load_or_default(path: &Path, variant: TrackingVariant, clock: C) -> Self {
        let state = match PersistedState::load(path) {
            Ok(Some(state)) => state,
            Ok(None) => {
                tracing::info!(path = %path.display(), "No saved state, starting empty");
                return Self::new(variant, clock);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read saved state, starting empty");
                return Self::new(variant, clock);
            }
        };

        match Self::restore(state, variant, clock.clone()) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!(error = %e, "Saved state rejected, starting empty");
                Self::new(variant, clock)
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        self.to_persisted().save(path)
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState::from_slots(&self.slots)
    }

    // ─── Read access ────────────────────────────────────────────────────────

    /// Immutable view of all five slots
    pub fn snapshot(&self) -> Arc<Slots> {
        Arc::clone(&self.slots)
    }

    /// Receive every new snapshot as mutations land
    pub fn subscribe(&self) -> watch::Receiver<Arc<Slots>> {
        self.snapshots.subscribe()
    }

    pub fn slot(&self, index: usize) -> Option<&EntitySlot> {
        self.slots.get(index)
    }

    pub fn variant(&self) -> TrackingVariant {
        self.variant
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn active_base_duration(&self, index: usize) -> Option<f64> {
        self.slot(index)?.active_base_duration()
    }

    pub fn end_time(&self, index: usize, kind: TimerKind) -> Option<i64> {
        self.slot(index)?.end_time(kind)
    }

    pub fn remaining_secs(&self, index: usize, kind: TimerKind) -> u64 {
        let now = self.clock.now_ms();
        self.slot(index)
            .map_or(0, |slot| slot.remaining_secs(kind, now))
    }

    // ─── Mutations ──────────────────────────────────────────────────────────

    /// Put a freshly fetched champion into a slot, replacing everything in it.
    ///
    /// The ultimate starts at rank 1 and all timers are cleared.
    pub fn assign_entity(&mut self, index: usize, detail: &ChampionDetail) -> bool {
        self.update(index, "assign_entity", |slot| {
            *slot = EntitySlot::assigned(detail.identity(), detail.ultimate_cooldowns());
            tracing::info!(index, champion = %detail.name, "Champion assigned");
            true
        })
    }

    /// Reset one slot to empty
    pub fn clear_entity(&mut self, index: usize) -> bool {
        self.update(index, "clear_entity", |slot| {
            *slot = EntitySlot::empty();
            true
        })
    }

    /// Advance the ultimate rank. Running timers are left alone.
    pub fn cycle_tier(&mut self, index: usize) -> bool {
        self.update(index, "cycle_tier", |slot| {
            slot.cycle_tier();
            true
        })
    }

    pub fn toggle_modifier(&mut self, index: usize, modifier: HasteModifier) -> bool {
        if !self.variant.tracks_spell_details() {
            tracing::debug!(index, modifier = modifier.label(), "Modifiers unused in simplified mode");
            return false;
        }
        self.update(index, "toggle_modifier", |slot| {
            slot.toggle_modifier(modifier);
            true
        })
    }

    pub fn set_primary_haste(&mut self, index: usize, haste: u32) -> bool {
        self.update(index, "set_primary_haste", |slot| {
            if slot.ability_haste() == haste {
                return false;
            }
            slot.set_ability_haste(haste);
            true
        })
    }

    /// Set ability haste from user text; bad input counts as 0
    pub fn set_primary_haste_input(&mut self, index: usize, input: &str) -> bool {
        self.set_primary_haste(index, parse_haste(input))
    }

    /// Identify one of a slot's summoner spells. Clears that spell's timer.
    pub fn assign_auxiliary(&mut self, index: usize, which: SpellSlot, spell: &SpellInfo) -> bool {
        if !self.variant.tracks_spell_details() {
            tracing::debug!(index, spell = %spell.name, "Spell assignment unused in simplified mode");
            return false;
        }
        self.update(index, "assign_auxiliary", |slot| {
            slot.assign_spell(which, spell.identity(), spell.cooldown_secs());
            true
        })
    }

    /// Start a cooldown timer.
    ///
    /// No-op if the slot is empty, the timer is already running, or the
    /// ability has no positive cooldown yet.
    pub fn start(&mut self, index: usize, kind: TimerKind) -> bool {
        let now = self.clock.now_ms();
        let variant = self.variant;

        self.update(index, "start", |slot| {
            if slot.is_empty() {
                return false;
            }
            if slot.is_running(kind, now) {
                tracing::debug!(index, timer = %kind, "Timer already running");
                return false;
            }
            let Some(secs) = slot.effective_duration(kind, variant) else {
                return false;
            };
            if secs <= 0.0 {
                return false;
            }

            let ends_at = cooldown::end_time_after(now, secs);
            slot.set_end_time(kind, Some(ends_at));
            tracing::info!(index, timer = %kind, secs, ends_at, "Timer started");
            true
        })
    }

    /// Stop a timer regardless of its state
    pub fn clear(&mut self, index: usize, kind: TimerKind) -> bool {
        self.update(index, "clear", |slot| {
            if slot.end_time(kind).is_none() {
                return false;
            }
            slot.set_end_time(kind, None);
            true
        })
    }

    /// Empty all five slots
    pub fn reset_all(&mut self) {
        tracing::info!("All slots reset");
        self.publish(Slots::default());
    }

    /// Apply `op` to a copy of slot `index` and publish the copy if it changed
    fn update(
        &mut self,
        index: usize,
        op: &'static str,
        f: impl FnOnce(&mut EntitySlot) -> bool,
    ) -> bool {
        if index >= SLOT_COUNT {
            tracing::debug!(index, op, "Ignoring out-of-range slot");
            return false;
        }

        let mut next: Slots = (*self.slots).clone();
        if !f(&mut next[index]) {
            return false;
        }
        self.publish(next);
        true
    }

    fn publish(&mut self, next: Slots) {
        let next = Arc::new(next);
        self.slots = Arc::clone(&next);
        self.snapshots.send_replace(next);
    }
}
