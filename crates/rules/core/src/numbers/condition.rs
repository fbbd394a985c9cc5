//! Situational qualifiers attached to modifiers.

use core::fmt;

/// A specific situation to which a bonus or penalty applies.
///
/// In "+2 racial bonus to notice unusual stonework" the condition is
/// "to notice unusual stonework". Two conditions are the same condition
/// exactly when their text is equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Condition {
    text: String,
}

impl Condition {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for Condition {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Condition {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}
