//! Character classes and the levels a character holds in them.

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use rules_core::{
    Aggregator, Composable, CompositionError, Die, OrdinalError, Progression, Schema, Value,
    parse_ordinal,
};

use super::Ability;

/// Abilities a class grants, keyed by the level they are gained at.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassFeature {
    name: String,
    description: String,
    progression: BTreeMap<u32, Ability>,
}

impl ClassFeature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            progression: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Grants `ability` from `level` on.
    #[must_use]
    pub fn with_level(mut self, level: u32, ability: Ability) -> Self {
        self.progression.insert(level, ability);
        self
    }

    /// Grants `ability` from the level named by an ordinal such as `"fourth"`.
    pub fn gained_at(self, level: &str, ability: Ability) -> Result<Self, OrdinalError> {
        Ok(self.with_level(parse_ordinal(level)?, ability))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The version of the ability held at `level`: the entry with the
    /// highest level not above it.
    pub fn at_level(&self, level: u32) -> Option<&Ability> {
        self.progression
            .range(..=level)
            .next_back()
            .map(|(_, ability)| ability)
    }
}

/// A character class.
#[derive(Clone, Debug, PartialEq)]
pub struct Class {
    pub name: String,
    pub hit_die: Die,
    pub skill_points_per_level: i32,
    pub class_skills: Vec<String>,
    pub base_attack_bonus: Progression,
    pub fort_save: Progression,
    pub ref_save: Progression,
    pub will_save: Progression,
    pub features: Vec<ClassFeature>,
}

impl Class {
    /// Attribute key of the class, e.g. `barbarian`.
    pub fn key(&self) -> String {
        super::attribute_key(&self.name)
    }

    pub fn is_class_skill(&self, skill_key: &str) -> bool {
        self.class_skills.iter().any(|skill| skill == skill_key)
    }
}

const PROGRESSIONS: [&str; 4] = ["base_attack_bonus", "fort_save", "ref_save", "will_save"];

static CLASS_LEVEL_SCHEMA: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Arc::new(
        PROGRESSIONS
            .iter()
            .fold(Schema::builder("ClassLevel"), |builder, name| builder.property(*name))
            .build(),
    )
});

/// Levels attained in one class.
///
/// Exposes the class progressions at that level and the class features
/// held at that level.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassLevel {
    class: Arc<Class>,
    level: u32,
    features: Aggregator,
}

impl ClassLevel {
    pub fn new(class: Arc<Class>, level: u32) -> Self {
        let mut features = Aggregator::new(CLASS_LEVEL_SCHEMA.clone());
        for feature in &class.features {
            if let Some(ability) = feature.at_level(level) {
                features.set(super::attribute_key(feature.name()), Value::node(ability.clone()));
            }
        }
        Self {
            class,
            level,
            features,
        }
    }

    pub fn class(&self) -> &Class {
        &self.class
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    fn progression(&self, name: &str) -> Option<&Progression> {
        match name {
            "base_attack_bonus" => Some(&self.class.base_attack_bonus),
            "fort_save" => Some(&self.class.fort_save),
            "ref_save" => Some(&self.class.ref_save),
            "will_save" => Some(&self.class.will_save),
            _ => None,
        }
    }
}

impl Composable for ClassLevel {
    fn kind(&self) -> &str {
        self.features.kind()
    }

    fn lookup(&self, name: &str) -> Result<Option<Value>, CompositionError> {
        self.features.compose(self, name)
    }

    fn property(&self, name: &str) -> Result<Option<Value>, CompositionError> {
        let modifier = self
            .progression(name)
            .and_then(|progression| progression.at_level(self.level as usize));
        Ok(modifier.map(Value::Modifier))
    }
}
