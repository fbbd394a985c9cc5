//! Typed rules concepts built on the composition engine.
//!
//! Every concept that contributes to a character is a [`rules_core::Composable`]
//! node, so a [`Character`] read of `search` or `fortitude` picks up the race,
//! its special abilities, class levels and trained skills without the
//! concepts knowing about each other.

pub mod ability;
pub mod character;
pub mod class;
pub mod feat;
pub mod race;
pub mod size;
pub mod skill;

pub use ability::{Ability, AbilityKind, AbilityScore, AbilityType};
pub use character::Character;
pub use class::{Class, ClassFeature, ClassLevel};
pub use feat::{Feat, FeatType};
pub use race::{DEFAULT_BONUS_LANGUAGES, Race};
pub use size::Size;
pub use skill::{Skill, SkillFlags, SkillRanks, Synergy, ranks_name, synergy_name};

/// Attribute name for a display name: lowercase, with every run of other
/// characters collapsed to `_`.
///
/// `"Craft (alchemy)"` becomes `craft_alchemy`.
pub fn attribute_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_alphanumeric() {
            key.extend(c.to_lowercase());
        } else if !key.is_empty() && !key.ends_with('_') {
            key.push('_');
        }
    }
    if key.ends_with('_') {
        key.pop();
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_keys_are_snake_case() {
        assert_eq!(attribute_key("Craft (alchemy)"), "craft_alchemy");
        assert_eq!(attribute_key("Sleight of Hand"), "sleight_of_hand");
        assert_eq!(attribute_key("Bonus Feat"), "bonus_feat");
        assert_eq!(attribute_key("  Low-Light Vision "), "low_light_vision");
        assert_eq!(attribute_key("Search"), "search");
    }
}
