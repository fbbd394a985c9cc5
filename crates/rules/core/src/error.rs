//! Common error infrastructure for rules-core.
//!
//! This module provides the classification shared by every error type in the
//! workspace. Concrete errors (e.g. [`ModifierError`], [`CompositionError`])
//! are defined here too, since the arithmetic and composition layers raise
//! each other's failures.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each layer has its own error enum with specific variants
//! - **Never Silent**: Combinations that would lose information are errors
//! - **Kind Classification**: Errors are grouped by [`ErrorKind`] for callers
//!   that only care about the category of failure

use crate::compose::ValueKind;
use crate::numbers::ModifierType;

/// Category of an error, independent of which layer raised it.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Two modifiers of different types were added or compared.
    TypeMismatch,

    /// An unstackable bonus and penalty of the same type were added.
    LossyCombination,

    /// Two modifiers with different conditions were added directly.
    ConditionMismatch,

    /// A scale or negation was requested on a value that does not denote a
    /// single typed quantity.
    AmbiguousScaling,

    /// Two values whose kinds have no addition rule were combined.
    UnsupportedCombination,

    /// No node of the aggregation tree defines the requested name.
    MissingAttribute,

    /// A read re-entered itself through a reference.
    CyclicLookup,

    /// Malformed input to a parser or constructor.
    InvalidInput,
}

impl ErrorKind {
    /// Returns true if the error came from modifier arithmetic.
    pub const fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            Self::TypeMismatch
                | Self::LossyCombination
                | Self::ConditionMismatch
                | Self::AmbiguousScaling
        )
    }
}

/// Common trait for all rules errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - `error_code` returns a stable, SCREAMING_CASE identifier per variant
pub trait RulesError: core::fmt::Display + core::fmt::Debug {
    /// Returns the category of this error.
    fn kind(&self) -> ErrorKind;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

// ============================================================================
// Modifier Arithmetic Errors
// ============================================================================

/// Errors raised when combining modifiers cannot be done without losing
/// information.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ModifierError {
    /// Modifiers only track a single type.
    #[error("cannot combine modifiers of different types: {left} and {right}")]
    DifferentTypes {
        left: ModifierType,
        right: ModifierType,
    },

    /// The best bonus and the worst penalty should both apply.
    #[error("combining a bonus and a penalty loses information: {left:+} and {right:+}")]
    BonusAndPenalty { left: i32, right: i32 },

    /// A single modifier cannot carry two conditions.
    #[error("cannot add modifiers with different conditions: {left} and {right}")]
    DifferentConditions { left: String, right: String },
}

impl RulesError for ModifierError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::DifferentTypes { .. } => ErrorKind::TypeMismatch,
            Self::BonusAndPenalty { .. } => ErrorKind::LossyCombination,
            Self::DifferentConditions { .. } => ErrorKind::ConditionMismatch,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DifferentTypes { .. } => "MODIFIER_DIFFERENT_TYPES",
            Self::BonusAndPenalty { .. } => "MODIFIER_BONUS_AND_PENALTY",
            Self::DifferentConditions { .. } => "MODIFIER_DIFFERENT_CONDITIONS",
        }
    }
}

// ============================================================================
// Composition Errors
// ============================================================================

/// Errors raised while combining values or reading aggregated attributes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompositionError {
    /// Arithmetic failure between two modifiers.
    #[error(transparent)]
    Modifier(#[from] ModifierError),

    /// The value does not unambiguously denote one typed quantity.
    #[error("cannot scale a {kind} value unambiguously")]
    AmbiguousScaling { kind: ValueKind },

    /// No addition rule exists for this pair of value kinds.
    #[error("cannot add a {left} value and a {right} value")]
    UnsupportedCombination { left: ValueKind, right: ValueKind },

    /// Nothing in the aggregation tree defines the name.
    #[error("the attribute `{name}` could not be found on {kind} or its contributors")]
    MissingAttribute { name: String, kind: String },

    /// A read of `name` on the node re-entered itself.
    #[error("reading `{name}` on {kind} refers back to itself")]
    CyclicLookup { name: String, kind: String },

    /// A computed attribute does not fit in a number value.
    #[error("the value of `{name}` on {kind} is out of range")]
    OutOfRange { name: String, kind: String },
}

impl CompositionError {
    pub(crate) fn missing(name: &str, kind: &str) -> Self {
        Self::MissingAttribute {
            name: name.to_owned(),
            kind: kind.to_owned(),
        }
    }
}

impl RulesError for CompositionError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Modifier(inner) => inner.kind(),
            Self::AmbiguousScaling { .. } => ErrorKind::AmbiguousScaling,
            Self::UnsupportedCombination { .. } => ErrorKind::UnsupportedCombination,
            Self::MissingAttribute { .. } => ErrorKind::MissingAttribute,
            Self::CyclicLookup { .. } => ErrorKind::CyclicLookup,
            Self::OutOfRange { .. } => ErrorKind::InvalidInput,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Modifier(inner) => inner.error_code(),
            Self::AmbiguousScaling { .. } => "COMPOSE_AMBIGUOUS_SCALING",
            Self::UnsupportedCombination { .. } => "COMPOSE_UNSUPPORTED_COMBINATION",
            Self::MissingAttribute { .. } => "COMPOSE_MISSING_ATTRIBUTE",
            Self::CyclicLookup { .. } => "COMPOSE_CYCLIC_LOOKUP",
            Self::OutOfRange { .. } => "COMPOSE_OUT_OF_RANGE",
        }
    }
}

// ============================================================================
// Parsing Errors
// ============================================================================

/// Errors for malformed dice notation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    #[error("a die string must start with `d`, got `{0}`")]
    MissingPrefix(String),

    #[error("invalid die string `{0}`, expected something like `d6`")]
    InvalidSides(String),

    #[error("invalid dice term `{0}`, expected something like `4d8`")]
    InvalidTerm(String),

    #[error("a die must have at least one side")]
    NoSides,
}

impl RulesError for DiceError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidInput
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingPrefix(_) => "DICE_MISSING_PREFIX",
            Self::InvalidSides(_) => "DICE_INVALID_SIDES",
            Self::InvalidTerm(_) => "DICE_INVALID_TERM",
            Self::NoSides => "DICE_NO_SIDES",
        }
    }
}

/// Errors converting between integers and ordinal words.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OrdinalError {
    #[error("cannot convert a negative number to an ordinal")]
    Negative,

    #[error(
        "cannot convert {0} to an ordinal, the largest supported value is {max}",
        max = crate::config::RulesConfig::MAX_ORDINAL
    )]
    TooLarge(i64),

    #[error("unable to convert `{0}` to an integer")]
    UnknownWord(String),
}

impl RulesError for OrdinalError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidInput
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Negative => "ORDINAL_NEGATIVE",
            Self::TooLarge(_) => "ORDINAL_TOO_LARGE",
            Self::UnknownWord(_) => "ORDINAL_UNKNOWN_WORD",
        }
    }
}
