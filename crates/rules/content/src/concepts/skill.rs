//! Skills, ranks and synergies.

use std::sync::{Arc, LazyLock};

use rules_core::{
    Aggregator, Composable, CompositionError, Condition, Modifier, ModifierTotal, Reference,
    RulesConfig, Schema, Target, Threshold, Value,
};

use super::AbilityKind;

bitflags::bitflags! {
    /// Usage restrictions of a skill.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SkillFlags: u8 {
        /// Unusable without ranks.
        const TRAINED_ONLY = 1 << 0;
        /// Penalized by heavy armor.
        const ARMOR_CHECK_PENALTY = 1 << 1;
    }
}

/// A bonus a skill grants to another skill once it has enough ranks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Synergy {
    skill: String,
    condition: Option<Condition>,
}

impl Synergy {
    /// Synergy toward the skill with attribute key `skill`.
    pub fn new(skill: impl Into<String>) -> Self {
        Self {
            skill: skill.into(),
            condition: None,
        }
    }

    #[must_use]
    pub fn with_condition(mut self, condition: impl Into<Condition>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// Key of the skill receiving the bonus.
    pub fn skill(&self) -> &str {
        &self.skill
    }

    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    /// Threshold reference reading `<source>_ranks` on the character.
    ///
    /// The offset starts as an empty total so synergies with different
    /// conditions can be summed.
    pub fn reference(&self, source: &str, config: &RulesConfig) -> Reference {
        let bonus = Modifier::untyped(config.synergy_bonus);
        let bonus = match &self.condition {
            Some(condition) => bonus.with_condition(condition.clone()),
            None => bonus,
        };
        Reference::new(ranks_name(source), Target::kind(config.character_kind.clone()))
            .with_threshold(Threshold::new(config.synergy_ranks, bonus))
            .with_modifier(ModifierTotal::new())
    }
}

/// Attribute holding the ranks in a skill.
pub fn ranks_name(skill: &str) -> String {
    format!("{skill}_ranks")
}

/// Attribute collecting the synergy bonuses toward a skill.
pub fn synergy_name(skill: &str) -> String {
    format!("{skill}_synergy")
}

/// A skill definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Skill {
    name: String,
    key_ability: AbilityKind,
    flags: SkillFlags,
    synergies: Vec<Synergy>,
}

impl Skill {
    pub fn new(name: impl Into<String>, key_ability: AbilityKind) -> Self {
        Self {
            name: name.into(),
            key_ability,
            flags: SkillFlags::empty(),
            synergies: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: SkillFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_synergy(mut self, synergy: Synergy) -> Self {
        self.synergies.push(synergy);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute key, e.g. `craft_alchemy` for "Craft (alchemy)".
    pub fn key(&self) -> String {
        super::attribute_key(&self.name)
    }

    pub fn key_ability(&self) -> AbilityKind {
        self.key_ability
    }

    pub fn flags(&self) -> SkillFlags {
        self.flags
    }

    pub fn trained_only(&self) -> bool {
        self.flags.contains(SkillFlags::TRAINED_ONLY)
    }

    pub fn armor_check_penalty(&self) -> bool {
        self.flags.contains(SkillFlags::ARMOR_CHECK_PENALTY)
    }

    pub fn synergies(&self) -> &[Synergy] {
        &self.synergies
    }

    /// Key ability reference plus `ranks`, still pending until read on a
    /// character.
    pub fn modifier(&self, ranks: i32, config: &RulesConfig) -> Reference {
        self.key_ability
            .reference(config)
            .with_modifier(ModifierTotal::from(Modifier::untyped(ranks)))
    }

    /// Ranks invested in this skill, as a node for a character.
    pub fn ranks(&self, ranks: i32, config: &RulesConfig) -> SkillRanks {
        let key = self.key();
        let mut attributes = Aggregator::new(SKILL_RANKS_SCHEMA.clone());
        attributes.set(ranks_name(&key), ranks);
        for synergy in &self.synergies {
            attributes.set(synergy_name(synergy.skill()), synergy.reference(&key, config));
        }
        SkillRanks {
            skill: key,
            ranks,
            attributes,
        }
    }
}

static SKILL_RANKS_SCHEMA: LazyLock<Arc<Schema>> =
    LazyLock::new(|| Arc::new(Schema::builder("SkillRanks").build()));

/// Ranks a character holds in one skill.
///
/// Exposes `<skill>_ranks` and one `<other>_synergy` reference per
/// synergy of the skill.
#[derive(Clone, Debug, PartialEq)]
pub struct SkillRanks {
    skill: String,
    ranks: i32,
    attributes: Aggregator,
}

impl SkillRanks {
    pub fn skill(&self) -> &str {
        &self.skill
    }

    pub fn ranks(&self) -> i32 {
        self.ranks
    }
}

impl Composable for SkillRanks {
    fn kind(&self) -> &str {
        self.attributes.kind()
    }

    fn lookup(&self, name: &str) -> Result<Option<Value>, CompositionError> {
        self.attributes.compose(self, name)
    }
}
