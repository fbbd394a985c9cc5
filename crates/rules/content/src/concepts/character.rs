//! Characters: the root of the aggregation tree.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use rules_core::{
    Aggregator, Composable, CompositionError, RulesConfig, Schema, Value, ValueKind,
};
use strum::IntoEnumIterator;

use super::skill::{ranks_name, synergy_name};
use super::{AbilityKind, AbilityScore, Class, ClassLevel, Feat, Race, Skill};

/// A player character or NPC.
///
/// Base ability scores (`strength`, ...), the race, one node per class and
/// one node per trained skill are contributors, so reading any name sums it
/// over all of them. `STR` ... `CHA` are computed as the ability modifier of
/// the adjusted score; `level` is the total class level.
#[derive(Clone, Debug)]
pub struct Character {
    name: String,
    config: RulesConfig,
    class_levels: BTreeMap<String, u32>,
    feats: Vec<Feat>,
    attributes: Aggregator,
}

impl Character {
    pub fn new(name: impl Into<String>, race: Race, config: RulesConfig) -> Self {
        let schema = AbilityKind::iter()
            .fold(Schema::builder(config.character_kind.clone()), |builder, kind| {
                builder.property(kind.to_string())
            })
            .property("level")
            .ignore("name")
            .build();

        let mut attributes = Aggregator::new(Arc::new(schema));
        for kind in AbilityKind::iter() {
            attributes.set(kind.score_name(), config.ability_baseline);
        }
        attributes.set("race", Value::node(race));

        Self {
            name: name.into(),
            config,
            class_levels: BTreeMap::new(),
            feats: Vec::new(),
            attributes,
        }
    }

    /// Sets the base scores in STR, DEX, CON, INT, WIS, CHA order.
    #[must_use]
    pub fn with_scores(mut self, scores: [i32; 6]) -> Self {
        for (kind, score) in AbilityKind::iter().zip(scores) {
            self.set_score(kind, score);
        }
        self
    }

    pub fn set_score(&mut self, ability: AbilityKind, score: i32) {
        self.attributes.set(ability.score_name(), score);
    }

    /// Gains one level in `class`.
    pub fn add_level(&mut self, class: Arc<Class>) {
        let key = class.key();
        let level = self.class_levels.entry(key.clone()).or_insert(0);
        *level = level.saturating_add(1);
        self.attributes.set(key, Value::node(ClassLevel::new(class, *level)));
    }

    /// Invests `ranks` in `skill`, replacing earlier ranks.
    pub fn train(&mut self, skill: &Skill, ranks: i32) {
        let node = skill.ranks(ranks, &self.config);
        self.attributes.set(format!("{}_skill", node.skill()), Value::node(node));
    }

    pub fn add_feat(&mut self, feat: Feat) {
        self.feats.push(feat);
    }

    /// Attaches any other contributor, e.g. a temporary effect.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.attributes.set(name, value);
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.attributes.remove(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn feats(&self) -> &[Feat] {
        &self.feats
    }

    pub fn class_level(&self, class_key: &str) -> u32 {
        self.class_levels.get(class_key).copied().unwrap_or(0)
    }

    pub fn level(&self) -> u32 {
        self.class_levels.values().fold(0, |sum, level| sum.saturating_add(*level))
    }

    /// Ability score after racial and other adjustments.
    pub fn score(&self, ability: AbilityKind) -> Result<AbilityScore, CompositionError> {
        let score = self
            .attributes
            .gather(ability.score_name())?
            .ok_or_else(|| CompositionError::MissingAttribute {
                name: ability.score_name().to_owned(),
                kind: self.kind().to_owned(),
            })?;
        score
            .as_number()
            .map(AbilityScore)
            .ok_or(CompositionError::UnsupportedCombination {
                left: score.kind(),
                right: ValueKind::Number,
            })
    }

    /// Ranks invested in the skill with attribute key `skill`.
    pub fn ranks(&self, skill: &str) -> Result<i32, CompositionError> {
        let ranks = self.lookup(&ranks_name(skill))?;
        Ok(ranks.and_then(|value| value.as_number()).unwrap_or(0))
    }

    /// Total bonus on checks with `skill`: key ability modifier, ranks,
    /// synergies from other skills and any bonus named after the skill.
    pub fn skill_check(&self, skill: &Skill) -> Result<Value, CompositionError> {
        let key = skill.key();
        let mut check = Value::Reference(skill.modifier(self.ranks(&key)?, &self.config));

        if let Some(synergies) = self.lookup(&synergy_name(&key))? {
            check = check.try_add(&synergies)?;
        }
        if let Some(bonus) = self.lookup(&key)? {
            check = check.try_add(&bonus)?;
        }

        let check = match check {
            Value::Reference(reference) => reference.resolve(self)?.into_value(),
            value => value,
        };
        tracing::trace!(skill = %skill.name(), check = %check, "computed skill check");
        Ok(check)
    }
}

impl Composable for Character {
    fn kind(&self) -> &str {
        self.attributes.kind()
    }

    fn lookup(&self, name: &str) -> Result<Option<Value>, CompositionError> {
        self.attributes.compose(self, name)
    }

    fn property(&self, name: &str) -> Result<Option<Value>, CompositionError> {
        if name == "level" {
            return number(self.level(), name, self.kind()).map(Some);
        }
        let Ok(ability) = AbilityKind::from_str(name) else {
            return Ok(None);
        };
        let modifier = self.score(ability)?.modifier_from(self.config.ability_baseline);
        Ok(Some(Value::Total(modifier.into())))
    }
}

fn number(value: u32, name: &str, kind: &str) -> Result<Value, CompositionError> {
    i32::try_from(value)
        .map(Value::Number)
        .map_err(|_| CompositionError::OutOfRange {
            name: name.to_owned(),
            kind: kind.to_owned(),
        })
}
