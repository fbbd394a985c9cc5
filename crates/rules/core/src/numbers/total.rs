//! Sums of modifiers that keep same-typed contributions apart.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::{Condition, Modifier, ModifierType};

/// Which combination rule an entry of a [`ModifierTotal`] follows.
///
/// Non-stacking types keep their best bonus and their worst penalty in
/// separate entries so both still apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Bucket {
    Stacking,
    Bonus,
    Penalty,
}

impl Bucket {
    fn of(modifier: &Modifier) -> Self {
        if modifier.modifier_type().stacks() {
            Self::Stacking
        } else if modifier.is_bonus() {
            Self::Bonus
        } else {
            Self::Penalty
        }
    }
}

type EntryKey = (ModifierType, Bucket, Option<Condition>);

/// A collection of modifiers merged by (type, bucket, condition).
///
/// Conditional modifiers are stored but only counted by [`value`] when the
/// caller states that their condition is met.
///
/// [`value`]: ModifierTotal::value
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "Vec<Modifier>", from = "Vec<Modifier>")
)]
pub struct ModifierTotal {
    entries: BTreeMap<EntryKey, Modifier>,
}

impl ModifierTotal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_modifiers(modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        let mut total = Self::new();
        for modifier in modifiers {
            total.insert(modifier);
        }
        total
    }

    /// Adds a modifier, combining it with the stored entry for its key.
    ///
    /// Entries sharing a key always have the same type, condition and sign
    /// class, so combining them cannot fail.
    pub fn insert(&mut self, modifier: Modifier) {
        let bucket = Bucket::of(&modifier);
        let key = (
            modifier.modifier_type().clone(),
            bucket,
            modifier.condition().cloned(),
        );

        match self.entries.get_mut(&key) {
            Some(stored) => {
                let value = match bucket {
                    Bucket::Stacking => stored.value().saturating_add(modifier.value()),
                    Bucket::Bonus => stored.value().max(modifier.value()),
                    Bucket::Penalty => stored.value().min(modifier.value()),
                };
                *stored = rebuild(&modifier, value);
            }
            None => {
                self.entries.insert(key, modifier);
            }
        }
    }

    /// Sum of every unconditional modifier plus the conditional ones whose
    /// condition is in `conditions_met`, saturating at the `i32` bounds.
    pub fn value(&self, conditions_met: &[Condition]) -> i32 {
        self.entries
            .values()
            .filter(|m| m.condition().is_none_or(|c| conditions_met.contains(c)))
            .map(Modifier::value)
            .fold(0, i32::saturating_add)
    }

    /// Sum assuming every condition present in the total is met.
    pub fn value_with_all_conditions(&self) -> i32 {
        self.entries
            .values()
            .map(Modifier::value)
            .fold(0, i32::saturating_add)
    }

    /// All conditions carried by the stored modifiers.
    pub fn conditions(&self) -> BTreeSet<Condition> {
        self.entries
            .keys()
            .filter_map(|(_, _, condition)| condition.clone())
            .collect()
    }

    /// Returns the union of both totals.
    #[must_use]
    pub fn merge(&self, other: &ModifierTotal) -> ModifierTotal {
        let mut merged = self.clone();
        for modifier in other.iter() {
            merged.insert(modifier.clone());
        }
        merged
    }

    /// The only stored modifier, if there is exactly one.
    pub fn single(&self) -> Option<&Modifier> {
        match self.entries.len() {
            1 => self.entries.values().next(),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modifier> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn rebuild(template: &Modifier, value: i32) -> Modifier {
    let modifier = Modifier::new(value, template.modifier_type().clone());
    match template.condition() {
        Some(condition) => modifier.with_condition(condition.clone()),
        None => modifier,
    }
}

impl From<Modifier> for ModifierTotal {
    fn from(modifier: Modifier) -> Self {
        Self::from_modifiers([modifier])
    }
}

impl From<Vec<Modifier>> for ModifierTotal {
    fn from(modifiers: Vec<Modifier>) -> Self {
        Self::from_modifiers(modifiers)
    }
}

impl From<ModifierTotal> for Vec<Modifier> {
    fn from(total: ModifierTotal) -> Self {
        total.entries.into_values().collect()
    }
}

impl FromIterator<Modifier> for ModifierTotal {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        Self::from_modifiers(iter)
    }
}

impl fmt::Display for ModifierTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return f.write_str("+0");
        }
        for (i, modifier) in self.entries.values().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{modifier}")?;
        }
        Ok(())
    }
}
