//! Character races.

use std::sync::{Arc, LazyLock};

use rules_core::{Aggregator, Composable, CompositionError, Value};

use super::{AbilityKind, Size};

/// Languages any race may pick as bonus languages unless it lists its own.
pub const DEFAULT_BONUS_LANGUAGES: &[&str] = &[
    "Abyssal",
    "Aquan",
    "Auran",
    "Celestial",
    "Common",
    "Draconic",
    "Dwarven",
    "Elven",
    "Giant",
    "Gnome",
    "Goblin",
    "Gnoll",
    "Halfling",
    "Ignan",
    "Infernal",
    "Orc",
    "Sylvan",
    "Terran",
    "Undercommon",
];

const SAVES: [&str; 3] = ["fortitude", "reflex", "will"];

static RACE_SCHEMA: LazyLock<Arc<rules_core::Schema>> = LazyLock::new(|| {
    Arc::new(
        SAVES
            .iter()
            .fold(rules_core::Schema::builder("Race").ignore("name"), |builder, save| {
                builder.property(*save)
            })
            .build(),
    )
});

/// Data shared by every member of a race.
///
/// Racial traits are attributes: ability adjustments (`constitution`),
/// skill bonuses (`search`), special abilities stored as nodes. The
/// `fortitude`, `reflex` and `will` saves combine the generic
/// `saving_throws` bonus with the save-specific one.
#[derive(Clone, Debug, PartialEq)]
pub struct Race {
    name: String,
    languages: Vec<String>,
    bonus_languages: Vec<String>,
    favored_class: String,
    traits: Aggregator,
}

impl Race {
    pub fn new(name: impl Into<String>, size: Size, speed: i32) -> Self {
        let mut traits = Aggregator::new(RACE_SCHEMA.clone());
        traits.set("size", Value::node(size));
        traits.set("speed", speed);
        Self {
            name: name.into(),
            languages: Vec::new(),
            bonus_languages: DEFAULT_BONUS_LANGUAGES.iter().map(|l| (*l).to_owned()).collect(),
            favored_class: "Any".to_owned(),
            traits,
        }
    }

    #[must_use]
    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the default bonus language list.
    #[must_use]
    pub fn with_bonus_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bonus_languages = languages.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_favored_class(mut self, class: impl Into<String>) -> Self {
        self.favored_class = class.into();
        self
    }

    /// Adjusts a starting ability score.
    #[must_use]
    pub fn with_adjustment(mut self, ability: AbilityKind, adjustment: i32) -> Self {
        self.traits.set(ability.score_name(), adjustment);
        self
    }

    /// Adds any racial trait (builder pattern).
    #[must_use]
    pub fn with_trait(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.traits.set(name, value);
        self
    }

    pub fn set_trait(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.traits.set(name, value);
    }

    pub fn remove_trait(&mut self, name: &str) -> Option<Value> {
        self.traits.remove(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn bonus_languages(&self) -> &[String] {
        &self.bonus_languages
    }

    pub fn favored_class(&self) -> &str {
        &self.favored_class
    }

    fn save_bonus(&self, save: &str) -> Result<Option<Value>, CompositionError> {
        let generic = self.traits.gather("saving_throws")?;
        let specific = self.traits.attribute(save).cloned();
        match (generic, specific) {
            (Some(generic), Some(specific)) => generic.try_add(&specific).map(Some),
            (generic, specific) => Ok(generic.or(specific)),
        }
    }
}

impl Composable for Race {
    fn kind(&self) -> &str {
        self.traits.kind()
    }

    fn lookup(&self, name: &str) -> Result<Option<Value>, CompositionError> {
        self.traits.compose(self, name)
    }

    fn property(&self, name: &str) -> Result<Option<Value>, CompositionError> {
        if SAVES.contains(&name) {
            self.save_bonus(name)
        } else {
            Ok(None)
        }
    }
}
