//! Ordinal words ("first", "second", ...) used to key class features by level.

use crate::config::RulesConfig;
use crate::error::OrdinalError;

const ORDINALS: [&str; RulesConfig::MAX_ORDINAL as usize + 1] = [
    "zeroth",
    "first",
    "second",
    "third",
    "fourth",
    "fifth",
    "sixth",
    "seventh",
    "eighth",
    "ninth",
    "tenth",
    "eleventh",
    "twelfth",
    "thirteenth",
    "fourteenth",
    "fifteenth",
    "sixteenth",
    "seventeenth",
    "eighteenth",
    "nineteenth",
    "twentieth",
];

/// Converts an integer in `0..=20` to its ordinal word.
pub fn ordinal(value: i64) -> Result<&'static str, OrdinalError> {
    if value < 0 {
        return Err(OrdinalError::Negative);
    }
    usize::try_from(value)
        .ok()
        .and_then(|index| ORDINALS.get(index).copied())
        .ok_or(OrdinalError::TooLarge(value))
}

/// Converts an ordinal word back to its integer.
pub fn parse_ordinal(word: &str) -> Result<u32, OrdinalError> {
    ORDINALS
        .iter()
        .zip(0u32..)
        .find_map(|(candidate, value)| (*candidate == word).then_some(value))
        .ok_or_else(|| OrdinalError::UnknownWord(word.to_owned()))
}
