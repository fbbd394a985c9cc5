//! Creature size categories.

use std::borrow::Cow;
use std::fmt;

use rules_core::{Composable, CompositionError, Modifier, ModifierType, Value};

/// Size of a creature.
///
/// `value` is the size modifier of the category: negative for creatures
/// smaller than Medium. The derived modifiers follow from it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    name: Cow<'static, str>,
    value: i32,
}

impl Size {
    pub const MODIFIER_TYPE: ModifierType = ModifierType::from_static("size", false);

    pub const fn from_static(name: &'static str, value: i32) -> Self {
        Self {
            name: Cow::Borrowed(name),
            value,
        }
    }

    pub fn new(name: impl Into<Cow<'static, str>>, value: i32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    fn modifier(&self) -> Modifier {
        Modifier::new(self.value, Self::MODIFIER_TYPE)
    }

    pub fn attack(&self) -> Modifier {
        -self.modifier()
    }

    pub fn armor_class(&self) -> Modifier {
        -self.modifier()
    }

    pub fn grapple(&self) -> Modifier {
        4 * self.modifier()
    }

    pub fn hide(&self) -> Modifier {
        -4 * self.modifier()
    }
}

impl Composable for Size {
    fn kind(&self) -> &str {
        "Size"
    }

    fn lookup(&self, name: &str) -> Result<Option<Value>, CompositionError> {
        let modifier = match name {
            "attack" => self.attack(),
            "armor_class" => self.armor_class(),
            "grapple" => self.grapple(),
            "hide" => self.hide(),
            _ => return Ok(None),
        };
        Ok(Some(Value::Modifier(modifier)))
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
