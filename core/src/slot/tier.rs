//! Ultimate rank breakpoints

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ultimate rank. `T0` means the ultimate has not been learned yet.
///
/// Ranks only ever move forward through [`Tier::next`], wrapping from `T3`
/// back to `T0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tier {
    #[default]
    T0,
    T1,
    T2,
    T3,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::T0, Tier::T1, Tier::T2, Tier::T3];

    /// Next rank in the cycle T0 → T1 → T2 → T3 → T0
    pub fn next(self) -> Self {
        match self {
            Tier::T0 => Tier::T1,
            Tier::T1 => Tier::T2,
            Tier::T2 => Tier::T3,
            Tier::T3 => Tier::T0,
        }
    }

    /// Index into the per-rank cooldown table (T1 → 0, T2 → 1, T3 → 2)
    pub fn table_index(self) -> Option<usize> {
        match self {
            Tier::T0 => None,
            Tier::T1 => Some(0),
            Tier::T2 => Some(1),
            Tier::T3 => Some(2),
        }
    }

    pub fn is_learned(self) -> bool {
        self != Tier::T0
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tier::T0 => "T0",
            Tier::T1 => "T1",
            Tier::T2 => "T2",
            Tier::T3 => "T3",
        };
        f.write_str(s)
    }
}

/// Base ultimate cooldown for a rank, or `None` while unlearned
pub fn derive_active_base_duration(tier: Tier, table: &[f64; 3]) -> Option<f64> {
    tier.table_index().map(|i| table[i])
}
