//! SRD rules content built on `rules-core`.
//!
//! This crate houses the typed rules concepts and static SRD definitions:
//! - Sizes, ability scores and special abilities
//! - Races, classes, class levels and feats
//! - Skills, skill ranks and synergies
//! - Characters, which aggregate all of the above
//! - SRD tables (dice, modifier types, progressions, sizes, sample content)
//!
//! With the `loaders` feature, rules configuration (TOML) and tables (RON)
//! can be read from a data directory.

pub mod concepts;
pub mod srd;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use concepts::{
    Ability, AbilityKind, AbilityScore, AbilityType, Character, Class, ClassFeature, ClassLevel,
    Feat, FeatType, Race, Size, Skill, SkillFlags, SkillRanks, Synergy, attribute_key,
};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, Tables, TablesLoader};
