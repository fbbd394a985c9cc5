//! Level-indexed sequences of typed modifiers (base attack, base saves).

use std::fmt;

use super::{Modifier, ModifierType};

/// A progression of modifiers of one type, indexed by level starting at 1.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Progression {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    modifier_type: ModifierType,
    values: Vec<i32>,
}

impl Progression {
    pub fn new(modifier_type: ModifierType, values: impl IntoIterator<Item = i32>) -> Self {
        Self {
            modifier_type,
            values: values.into_iter().collect(),
        }
    }

    pub fn modifier_type(&self) -> &ModifierType {
        &self.modifier_type
    }

    /// Modifier granted at `level`, or `None` outside `1..=len`.
    pub fn at_level(&self, level: usize) -> Option<Modifier> {
        let index = level.checked_sub(1)?;
        self.values
            .get(index)
            .map(|value| Modifier::new(*value, self.modifier_type.clone()))
    }

    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.values
            .iter()
            .map(|value| Modifier::new(*value, self.modifier_type.clone()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for Progression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.modifier_type)?;
        for value in &self.values {
            write!(f, " {value:+}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_SAVE: ModifierType = ModifierType::from_static("base save", true);

    #[test]
    fn looks_up_by_level() {
        let poor = Progression::new(BASE_SAVE, [0, 0, 1, 1, 1, 2]);
        assert_eq!(poor.at_level(1), Some(Modifier::new(0, BASE_SAVE)));
        assert_eq!(poor.at_level(3), Some(Modifier::new(1, BASE_SAVE)));
        assert_eq!(poor.at_level(6), Some(Modifier::new(2, BASE_SAVE)));
    }

    #[test]
    fn levels_outside_the_table_are_absent() {
        let good = Progression::new(BASE_SAVE, [2, 3]);
        assert_eq!(good.at_level(0), None);
        assert_eq!(good.at_level(3), None);
        assert_eq!(good.len(), 2);
    }

    #[test]
    fn renders_values_with_signs() {
        let good = Progression::new(BASE_SAVE, [2, 3]);
        assert_eq!(good.to_string(), "base save: +2 +3");
        assert_eq!(good.iter().map(|m| m.value()).sum::<i32>(), 5);
    }
}
