//! Attribute composition: values, deferred references and aggregating nodes.
//!
//! ```text
//! Character (Aggregator)
//!   ├── race: Race (Aggregator) ── darkvision: Ability
//!   ├── fighter_1: ClassLevel
//!   └── STR, DEX, ... (properties)
//! ```
//!
//! Reading `character.get("strength")` sums the character's own
//! `strength` with the `strength` of every contributor, recursively, then
//! resolves a pending [`Reference`] against the character.

mod aggregator;
mod node;
mod reference;
mod value;

pub use aggregator::{Aggregator, Schema, SchemaBuilder};
pub use node::{AsAny, Composable, Composite};
pub use reference::{Reference, Resolution, Target, Threshold};
pub use value::{Value, ValueKind};
