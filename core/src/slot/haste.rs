//! Ability haste input and summoner spell haste modifiers

use serde::{Deserialize, Serialize};

/// A toggleable source of summoner spell haste
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HasteModifier {
    /// Ionian Boots of Lucidity
    LucidityBoots,
    /// Cosmic Insight rune
    CosmicInsight,
}

impl HasteModifier {
    pub const ALL: [HasteModifier; 2] = [HasteModifier::LucidityBoots, HasteModifier::CosmicInsight];

    /// Summoner spell haste granted while active
    pub fn points(self) -> u32 {
        match self {
            HasteModifier::LucidityBoots => 12,
            HasteModifier::CosmicInsight => 18,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HasteModifier::LucidityBoots => "boots",
            HasteModifier::CosmicInsight => "insight",
        }
    }
}

/// On/off state for every [`HasteModifier`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HasteModifiers {
    #[serde(default)]
    pub lucidity_boots: bool,
    #[serde(default)]
    pub cosmic_insight: bool,
}

impl HasteModifiers {
    pub fn is_active(&self, modifier: HasteModifier) -> bool {
        match modifier {
            HasteModifier::LucidityBoots => self.lucidity_boots,
            HasteModifier::CosmicInsight => self.cosmic_insight,
        }
    }

    pub fn toggle(&mut self, modifier: HasteModifier) {
        match modifier {
            HasteModifier::LucidityBoots => self.lucidity_boots = !self.lucidity_boots,
            HasteModifier::CosmicInsight => self.cosmic_insight = !self.cosmic_insight,
        }
    }

    pub fn active(&self) -> impl Iterator<Item = HasteModifier> + '_ {
        HasteModifier::ALL
            .into_iter()
            .filter(|m| self.is_active(*m))
    }
}

/// Summoner spell haste from the active modifiers
pub fn derive_secondary_haste(modifiers: &HasteModifiers) -> u32 {
    modifiers.active().map(HasteModifier::points).sum()
}

/// Parse user-entered haste.
///
/// Fractions truncate; negative, non-finite or unparseable input becomes 0.
pub fn parse_haste(input: &str) -> u32 {
    match input.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value.min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secondary_haste_sums_active_modifiers() {
        let mut mods = HasteModifiers::default();
        assert_eq!(derive_secondary_haste(&mods), 0);

        mods.toggle(HasteModifier::LucidityBoots);
        assert_eq!(derive_secondary_haste(&mods), 12);

        mods.toggle(HasteModifier::CosmicInsight);
        assert_eq!(derive_secondary_haste(&mods), 30);

        mods.toggle(HasteModifier::LucidityBoots);
        assert_eq!(derive_secondary_haste(&mods), 18);
    }

    #[test]
    fn parse_haste_coerces_bad_input() {
        assert_eq!(parse_haste("45"), 45);
        assert_eq!(parse_haste(" 12 "), 12);
        assert_eq!(parse_haste("12.9"), 12);
        assert_eq!(parse_haste("-20"), 0);
        assert_eq!(parse_haste("abc"), 0);
        assert_eq!(parse_haste(""), 0);
        assert_eq!(parse_haste("NaN"), 0);
        assert_eq!(parse_haste("inf"), 0);
    }
}
