//! Typed numeric values: conditions, modifiers, totals and the numeric
//! helpers used by rules content (dice, ordinals, progressions).

mod condition;
mod dice;
mod modifier;
mod ordinal;
mod progression;
mod total;

pub use condition::Condition;
pub use dice::{DicePool, Die};
pub use modifier::{Modifier, ModifierType};
pub use ordinal::{ordinal, parse_ordinal};
pub use progression::Progression;
pub use total::ModifierTotal;
