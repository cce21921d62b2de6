//! Slot model
//!
//! This module provides:
//! - **Tier**: ultimate rank breakpoints and the per-rank cooldown lookup
//! - **Haste**: ability haste input parsing and summoner spell haste modifiers
//! - **State**: the `EntitySlot` tracked for each enemy champion

mod haste;
mod state;
mod tier;

pub use haste::{HasteModifier, HasteModifiers, derive_secondary_haste, parse_haste};
pub use state::{
    DEFAULT_SPELL_COOLDOWN_SECS, EntitySlot, Identity, SpellSlot, SpellState, TimerKind,
};
pub use tier::{Tier, derive_active_base_duration};

/// Number of tracked enemy champions
pub const SLOT_COUNT: usize = 5;

/// The full, fixed-size slot collection
pub type Slots = [EntitySlot; SLOT_COUNT];
