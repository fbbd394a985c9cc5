//! Dice and dice pools.
//!
//! Only arithmetic averages are computed here; nothing is ever rolled.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use crate::error::DiceError;

/// A single die, ordered by its number of sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Die {
    sides: u32,
}

impl Die {
    pub const fn new(sides: u32) -> Self {
        Self { sides }
    }

    pub const fn sides(&self) -> u32 {
        self.sides
    }

    /// Average roll of the die.
    pub fn average(&self) -> f64 {
        (f64::from(self.sides) + 1.0) / 2.0
    }
}

impl FromStr for Die {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sides = s
            .strip_prefix('d')
            .ok_or_else(|| DiceError::MissingPrefix(s.to_owned()))?;
        let sides: u32 = sides
            .parse()
            .map_err(|_| DiceError::InvalidSides(s.to_owned()))?;
        if sides == 0 {
            return Err(DiceError::NoSides);
        }
        Ok(Self::new(sides))
    }
}

impl TryFrom<String> for Die {
    type Error = DiceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Die> for String {
    fn from(die: Die) -> Self {
        die.to_string()
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.sides)
    }
}

/// A multiset of dice, e.g. `d3 + 6d6 + 10d8`.
///
/// Dice with a zero count are never stored, so two pools are equal when
/// they hold the same number of each die.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct DicePool {
    counts: BTreeMap<Die, u32>,
}

impl DicePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` dice to the pool (builder pattern).
    #[must_use]
    pub fn with(mut self, die: Die, count: u32) -> Self {
        self.add_dice(die, count);
        self
    }

    pub fn add_dice(&mut self, die: Die, count: u32) {
        if count > 0 {
            let stored = self.counts.entry(die).or_insert(0);
            *stored = stored.saturating_add(count);
        }
    }

    /// Number of `die` in the pool.
    pub fn count(&self, die: Die) -> u32 {
        self.counts.get(&die).copied().unwrap_or(0)
    }

    /// Average of a roll of every die in the pool.
    pub fn average(&self) -> f64 {
        self.counts
            .iter()
            .map(|(die, count)| f64::from(*count) * die.average())
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Die, u32)> + '_ {
        self.counts.iter().map(|(die, count)| (*die, *count))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl From<Die> for DicePool {
    fn from(die: Die) -> Self {
        Self::new().with(die, 1)
    }
}

impl FromIterator<(Die, u32)> for DicePool {
    fn from_iter<I: IntoIterator<Item = (Die, u32)>>(iter: I) -> Self {
        let mut pool = Self::new();
        for (die, count) in iter {
            pool.add_dice(die, count);
        }
        pool
    }
}

impl FromStr for DicePool {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut pool = Self::new();
        if s.trim().is_empty() {
            return Ok(pool);
        }

        for term in s.split('+').map(str::trim) {
            let (count, die) = match term.split_once('d') {
                Some(("", _)) => (1, term),
                Some((prefix, _)) => {
                    let count: u32 = prefix
                        .parse()
                        .map_err(|_| DiceError::InvalidTerm(term.to_owned()))?;
                    (count, &term[prefix.len()..])
                }
                None => return Err(DiceError::InvalidTerm(term.to_owned())),
            };
            pool.add_dice(die.parse()?, count);
        }
        Ok(pool)
    }
}

impl TryFrom<String> for DicePool {
    type Error = DiceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DicePool> for String {
    fn from(pool: DicePool) -> Self {
        pool.to_string()
    }
}

impl fmt::Display for DicePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (die, count)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            match count {
                1 => write!(f, "{die}")?,
                _ => write!(f, "{count}{die}")?,
            }
        }
        Ok(())
    }
}

impl Add for DicePool {
    type Output = DicePool;

    fn add(mut self, other: DicePool) -> DicePool {
        self += other;
        self
    }
}

impl Add<Die> for DicePool {
    type Output = DicePool;

    fn add(self, die: Die) -> DicePool {
        self.with(die, 1)
    }
}

impl AddAssign for DicePool {
    fn add_assign(&mut self, other: DicePool) {
        for (die, count) in other.counts {
            self.add_dice(die, count);
        }
    }
}
