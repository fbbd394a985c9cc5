//! Ability scores and special abilities.

use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, LazyLock};

use rules_core::{
    Aggregator, Composable, CompositionError, Modifier, ModifierType, Reference, RulesConfig,
    Schema, Target, Value,
};

/// The six ability scores.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "UPPERCASE")]
pub enum AbilityKind {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

impl AbilityKind {
    /// Attribute holding the raw score, e.g. `strength`.
    pub const fn score_name(&self) -> &'static str {
        match self {
            Self::Str => "strength",
            Self::Dex => "dexterity",
            Self::Con => "constitution",
            Self::Int => "intelligence",
            Self::Wis => "wisdom",
            Self::Cha => "charisma",
        }
    }

    /// Reference to this ability's modifier on a character.
    pub fn reference(&self, config: &RulesConfig) -> Reference {
        Reference::new(
            self.to_string(),
            Target::kind(config.character_kind.clone()),
        )
    }
}

/// A raw ability score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityScore(pub i32);

impl AbilityScore {
    pub const MODIFIER_TYPE: ModifierType = ModifierType::from_static("ability", false);

    /// Modifier around the default baseline of 10.
    pub fn modifier(&self) -> Modifier {
        self.modifier_from(RulesConfig::DEFAULT_ABILITY_BASELINE)
    }

    /// Modifier rounding toward negative infinity, so 7 gives -2.
    pub fn modifier_from(&self, baseline: i32) -> Modifier {
        Modifier::new(self.0.saturating_sub(baseline).div_euclid(2), Self::MODIFIER_TYPE)
    }
}

impl Default for AbilityScore {
    fn default() -> Self {
        Self(RulesConfig::DEFAULT_ABILITY_BASELINE)
    }
}

impl std::ops::Add<i32> for AbilityScore {
    type Output = AbilityScore;

    fn add(self, adjustment: i32) -> AbilityScore {
        AbilityScore(self.0.saturating_add(adjustment))
    }
}

/// Classification of special abilities.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AbilityType {
    name: Cow<'static, str>,
    abbreviation: Option<Cow<'static, str>>,
}

impl AbilityType {
    pub const NATURAL: AbilityType = AbilityType::from_static("Natural", None);
    pub const EXTRAORDINARY: AbilityType = AbilityType::from_static("Extraordinary", Some("Ex"));
    pub const SPELL_LIKE: AbilityType = AbilityType::from_static("Spell-Like", Some("Sp"));
    pub const SUPERNATURAL: AbilityType = AbilityType::from_static("Supernatural", Some("Su"));

    pub const fn from_static(name: &'static str, abbreviation: Option<&'static str>) -> Self {
        Self {
            name: Cow::Borrowed(name),
            abbreviation: match abbreviation {
                Some(abbreviation) => Some(Cow::Borrowed(abbreviation)),
                None => None,
            },
        }
    }

    pub fn new(name: impl Into<Cow<'static, str>>, abbreviation: Option<String>) -> Self {
        Self {
            name: name.into(),
            abbreviation: abbreviation.map(Cow::Owned),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn abbreviation(&self) -> Option<&str> {
        self.abbreviation.as_deref()
    }
}

impl Default for AbilityType {
    fn default() -> Self {
        Self::NATURAL
    }
}

impl fmt::Display for AbilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(abbreviation) = &self.abbreviation {
            write!(f, " ({abbreviation})")?;
        }
        Ok(())
    }
}

static ABILITY_SCHEMA: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Arc::new(
        Schema::builder("Ability")
            .ignore("name")
            .ignore("ability_type")
            .ignore("description")
            .build(),
    )
});

/// A special ability (darkvision, stonecunning, rage) whose named features
/// join the aggregation of whatever node holds it.
#[derive(Clone, Debug, PartialEq)]
pub struct Ability {
    name: String,
    ability_type: AbilityType,
    description: String,
    features: Aggregator,
}

impl Ability {
    /// Creates an ability. Without an explicit type it is
    /// [`AbilityType::NATURAL`].
    pub fn new(name: impl Into<String>, ability_type: Option<AbilityType>) -> Self {
        Self {
            name: name.into(),
            ability_type: ability_type.unwrap_or_default(),
            description: String::new(),
            features: Aggregator::new(ABILITY_SCHEMA.clone()),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds a named feature (builder pattern).
    #[must_use]
    pub fn with_feature(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_feature(name, value);
        self
    }

    pub fn set_feature(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.features.set(name, value);
    }

    pub fn remove_feature(&mut self, name: &str) -> Option<Value> {
        self.features.remove(name)
    }

    pub fn feature(&self, name: &str) -> Option<&Value> {
        self.features.attribute(name)
    }

    pub fn feature_names(&self) -> &[String] {
        self.features.contributors()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ability_type(&self) -> &AbilityType {
        &self.ability_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Composable for Ability {
    fn kind(&self) -> &str {
        self.features.kind()
    }

    fn lookup(&self, name: &str) -> Result<Option<Value>, CompositionError> {
        self.features.compose(self, name)
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rules_core::Condition;
    use strum::IntoEnumIterator;

    #[test]
    fn ability_modifiers_round_down() {
        assert_eq!(AbilityScore(17).modifier(), Modifier::new(3, AbilityScore::MODIFIER_TYPE));
        assert_eq!(AbilityScore(7).modifier(), Modifier::new(-2, AbilityScore::MODIFIER_TYPE));
        assert_eq!(AbilityScore(10).modifier().value(), 0);
        assert_eq!(AbilityScore(9).modifier().value(), -1);
        assert_eq!((AbilityScore(12) + 2).modifier_from(8).value(), 3);
    }

    #[test]
    fn extreme_scores_saturate() {
        assert_eq!((AbilityScore(i32::MAX) + 1).0, i32::MAX);
        assert_eq!(AbilityScore(i32::MIN).modifier().value(), i32::MIN.div_euclid(2));
    }

    #[test]
    fn ability_kinds_render_as_abbreviations() {
        let names: Vec<String> = AbilityKind::iter().map(|kind| kind.to_string()).collect();
        assert_eq!(names, ["STR", "DEX", "CON", "INT", "WIS", "CHA"]);
        assert_eq!("CHA".parse::<AbilityKind>(), Ok(AbilityKind::Cha));
        assert_eq!(AbilityKind::Int.score_name(), "intelligence");
    }

    #[test]
    fn references_target_the_configured_character_kind() {
        let config = RulesConfig::new().with_character_kind("Hero");
        assert_eq!(
            AbilityKind::Dex.reference(&config),
            Reference::new("DEX", Target::kind("Hero"))
        );
    }

    #[test]
    fn ability_type_shows_abbreviation() {
        assert_eq!(AbilityType::SUPERNATURAL.to_string(), "Supernatural (Su)");
        assert_eq!(AbilityType::NATURAL.to_string(), "Natural");
        assert_eq!(AbilityType::new("Psionic", Some("Ps".into())).to_string(), "Psionic (Ps)");
    }

    #[test]
    fn supplied_ability_type_is_kept() {
        let rage = Ability::new("Rage", Some(AbilityType::EXTRAORDINARY));
        assert_eq!(rage.ability_type(), &AbilityType::EXTRAORDINARY);
        assert_eq!(Ability::new("Darkvision", None).ability_type(), &AbilityType::NATURAL);
    }

    #[test]
    fn features_render_and_aggregate() {
        let racial = ModifierType::from_static("racial", false);
        let stonecunning = Ability::new("Stonecunning", None).with_feature(
            "search",
            Modifier::new(2, racial).with_condition(Condition::new("to notice unusual stonework")),
        );

        assert_eq!(
            stonecunning.get("search").unwrap().to_string(),
            "+2 racial bonus to notice unusual stonework"
        );
    }

    #[test]
    fn removed_features_are_forgotten() {
        let mut ability = Ability::new("Test", None).with_feature("test", 10);
        assert_eq!(ability.get("test").unwrap(), 10);

        assert_eq!(ability.remove_feature("test"), Some(Value::from(10)));
        assert_eq!(ability, Ability::new("Test", None));
        assert!(ability.feature_names().is_empty());
        assert!(ability.lookup("test").unwrap().is_none());
    }
}
