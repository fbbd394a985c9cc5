//! Attribute composition engine for tabletop rules.
//!
//! `rules-core` combines bonuses and penalties contributed by independent
//! sources (a base score, a race, class levels, transient effects) into one
//! value. Contributions are typed [`Modifier`]s whose [`ModifierType`]
//! decides whether they stack, and combinations that would silently drop
//! information are reported as errors. Values that depend on a peer
//! attribute unknown at construction time are [`Reference`]s, resolved
//! once an [`Aggregator`] read reaches a node matching their target.
//!
//! Rules content (sizes, races, classes, skills) lives in `rules-content`
//! and only uses the API re-exported here.
pub mod compose;
pub mod config;
pub mod error;
pub mod numbers;

pub use compose::{
    Aggregator, Composable, Composite, Reference, Resolution, Schema, SchemaBuilder, Target,
    Threshold, Value, ValueKind,
};
pub use config::RulesConfig;
pub use error::{CompositionError, DiceError, ErrorKind, ModifierError, OrdinalError, RulesError};
pub use numbers::{
    Condition, DicePool, Die, Modifier, ModifierTotal, ModifierType, Progression, ordinal,
    parse_ordinal,
};
