/// Rules configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulesConfig {
    /// Ranks a skill needs before its synergies apply.
    pub synergy_ranks: i32,

    /// Value of the bonus granted by a synergy.
    pub synergy_bonus: i32,

    /// Node kind targeted by ability-score references and synergies.
    pub character_kind: String,

    /// Ability score whose modifier is zero.
    pub ability_baseline: i32,
}

impl RulesConfig {
    // ===== compile-time constants =====
    /// Largest value [`crate::numbers::ordinal`] converts.
    pub const MAX_ORDINAL: u32 = 20;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SYNERGY_RANKS: i32 = 5;
    pub const DEFAULT_SYNERGY_BONUS: i32 = 2;
    pub const DEFAULT_CHARACTER_KIND: &'static str = "Character";
    pub const DEFAULT_ABILITY_BASELINE: i32 = 10;

    pub fn new() -> Self {
        Self {
            synergy_ranks: Self::DEFAULT_SYNERGY_RANKS,
            synergy_bonus: Self::DEFAULT_SYNERGY_BONUS,
            character_kind: Self::DEFAULT_CHARACTER_KIND.to_owned(),
            ability_baseline: Self::DEFAULT_ABILITY_BASELINE,
        }
    }

    pub fn with_synergy(mut self, ranks: i32, bonus: i32) -> Self {
        self.synergy_ranks = ranks;
        self.synergy_bonus = bonus;
        self
    }

    pub fn with_character_kind(mut self, kind: impl Into<String>) -> Self {
        self.character_kind = kind.into();
        self
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_constants() {
        let config = RulesConfig::default();
        assert_eq!(config.synergy_ranks, RulesConfig::DEFAULT_SYNERGY_RANKS);
        assert_eq!(config.synergy_bonus, RulesConfig::DEFAULT_SYNERGY_BONUS);
        assert_eq!(config.character_kind, "Character");
        assert_eq!(config.ability_baseline, 10);
    }

    #[test]
    fn builders_override_defaults() {
        let config = RulesConfig::new().with_synergy(3, 1).with_character_kind("Hero");
        assert_eq!((config.synergy_ranks, config.synergy_bonus), (3, 1));
        assert_eq!(config.character_kind, "Hero");
    }
}
