//! Deferred bindings to attributes of an ancestor node.
//!
//! A [`Reference`] reads as "the value of attribute `name` on the nearest
//! node matching `target`, plus an optional offset". It stays pending while
//! it travels up an aggregation tree and resolves once it is evaluated
//! against a node that matches its target.

use std::any::TypeId;
use std::borrow::Cow;
use std::fmt;

use super::{Composable, Value};
use crate::error::CompositionError;
use crate::numbers::Modifier;

/// What a [`Reference`] must meet to resolve.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    /// Exactly this Rust type.
    Type { id: TypeId, name: &'static str },

    /// Any node whose [`Composable::kind`] is this name.
    Kind(Cow<'static, str>),
}

impl Target {
    pub fn of<T: Composable + 'static>() -> Self {
        let name = std::any::type_name::<T>();
        Self::Type {
            id: TypeId::of::<T>(),
            name: name.rsplit("::").next().unwrap_or(name),
        }
    }

    pub fn kind(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Kind(name.into())
    }

    pub fn matches(&self, candidate: &dyn Composable) -> bool {
        match self {
            Self::Type { id, .. } => super::AsAny::as_any(candidate).type_id() == *id,
            Self::Kind(name) => candidate.kind() == name.as_ref(),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type { name, .. } => f.write_str(name),
            Self::Kind(name) => f.write_str(name),
        }
    }
}

/// Replaces a fetched value with a fixed bonus once it reaches a threshold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Threshold {
    pub at_least: i32,
    pub bonus: Modifier,
}

impl Threshold {
    pub fn new(at_least: i32, bonus: Modifier) -> Self {
        Self { at_least, bonus }
    }

    /// Values without a numeric reading are passed through untouched.
    pub fn apply(&self, value: Value) -> Value {
        match value.as_number() {
            Some(n) if n >= self.at_least => Value::Modifier(self.bonus.clone()),
            Some(_) => Value::Modifier(Modifier::new(0, self.bonus.modifier_type().clone())),
            None => value,
        }
    }
}

/// Outcome of [`Reference::resolve`].
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    Resolved(Value),
    Pending(Reference),
}

impl Resolution {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    pub fn into_value(self) -> Value {
        match self {
            Self::Resolved(value) => value,
            Self::Pending(reference) => Value::Reference(reference),
        }
    }
}

impl From<Value> for Resolution {
    fn from(value: Value) -> Self {
        match value {
            Value::Reference(reference) => Self::Pending(reference),
            value => Self::Resolved(value),
        }
    }
}

/// A binding to attribute `name` on the first node matching `target`.
///
/// Two references are equal when name, target, offset and threshold all
/// match.
#[derive(Clone, Debug, PartialEq)]
pub struct Reference {
    name: String,
    target: Target,
    modifier: Option<Box<Value>>,
    threshold: Option<Threshold>,
}

impl Reference {
    pub fn new(name: impl Into<String>, target: Target) -> Self {
        Self {
            name: name.into(),
            target,
            modifier: None,
            threshold: None,
        }
    }

    /// Sets the value added to the fetched attribute (builder pattern).
    #[must_use]
    pub fn with_modifier(mut self, modifier: impl Into<Value>) -> Self {
        self.modifier = Some(Box::new(modifier.into()));
        self
    }

    /// Swaps the fetched attribute for `threshold`'s bonus (builder pattern).
    #[must_use]
    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn modifier(&self) -> Option<&Value> {
        self.modifier.as_deref()
    }

    pub fn threshold(&self) -> Option<&Threshold> {
        self.threshold.as_ref()
    }

    /// Layers `value` onto the offset, keeping the reference pending.
    ///
    /// # Errors
    ///
    /// Whatever [`Value::try_add`] raises combining the current offset
    /// with `value`.
    pub fn add(&self, value: &Value) -> Result<Reference, CompositionError> {
        let modifier = match self.modifier.as_deref() {
            Some(current) => current.try_add(value)?,
            None => value.clone(),
        };
        Ok(Reference {
            modifier: Some(Box::new(modifier)),
            ..self.clone()
        })
    }

    /// Evaluates the reference against `candidate`.
    ///
    /// A nested reference in the offset is resolved first, so progress on
    /// it is kept even when `candidate` is not this reference's target.
    /// The reference only resolves when `candidate` matches and the offset
    /// is concrete; otherwise the (possibly updated) reference is returned
    /// as [`Resolution::Pending`].
    ///
    /// # Errors
    ///
    /// Reading the attribute on `candidate` or adding the offset failed.
    pub fn resolve(&self, candidate: &dyn Composable) -> Result<Resolution, CompositionError> {
        let modifier = match self.modifier.as_deref() {
            Some(Value::Reference(inner)) => Some(inner.resolve(candidate)?.into_value()),
            Some(value) => Some(value.clone()),
            None => None,
        };

        let offset_pending = modifier.as_ref().is_some_and(Value::is_pending);
        if offset_pending || !self.target.matches(candidate) {
            return Ok(Resolution::Pending(Reference {
                modifier: modifier.map(Box::new),
                ..self.clone()
            }));
        }

        let fetched = candidate.get(&self.name)?;
        let fetched = match &self.threshold {
            Some(threshold) => threshold.apply(fetched),
            None => fetched,
        };

        let value = match modifier {
            Some(modifier) => fetched.try_add(&modifier)?,
            None => fetched,
        };
        Ok(Resolution::from(value))
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.name, self.target)?;
        if let Some(threshold) = &self.threshold {
            write!(f, " (at least {}: {})", threshold.at_least, threshold.bonus)?;
        }
        if let Some(modifier) = &self.modifier {
            write!(f, " + {modifier}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{Composite, Schema};
    use crate::numbers::{Condition, ModifierTotal};
    use std::sync::Arc;

    fn node(kind: &'static str, attributes: &[(&str, Value)]) -> Composite {
        let mut node = Composite::new(Arc::new(Schema::builder(kind).build()));
        for (name, value) in attributes {
            node.set(*name, value.clone());
        }
        node
    }

    #[test]
    fn resolves_against_matching_kind() {
        let root = node("Root", &[("x", Value::from(5))]);
        let reference = Reference::new("x", Target::kind("Root"));

        assert_eq!(reference.resolve(&root).unwrap(), Resolution::Resolved(Value::from(5)));
    }

    #[test]
    fn resolves_against_matching_type() {
        let root = node("Root", &[("x", Value::from(5))]);
        let reference = Reference::new("x", Target::of::<Composite>());

        assert_eq!(reference.resolve(&root).unwrap().into_value(), 5);
        assert_eq!(reference.target().to_string(), "Composite");
    }

    #[test]
    fn non_matching_candidate_leaves_reference_unchanged() {
        let other = node("Other", &[("x", Value::from(5))]);
        let reference =
            Reference::new("x", Target::kind("Root")).with_modifier(Modifier::untyped(1));

        assert_eq!(
            reference.resolve(&other).unwrap(),
            Resolution::Pending(reference.clone())
        );
    }

    #[test]
    fn nested_reference_resolves_against_the_same_candidate() {
        let root = node("Root", &[("value", Value::from(5)), ("inner", Value::from(3))]);
        let reference = Reference::new("value", Target::kind("Root"))
            .with_modifier(Reference::new("inner", Target::kind("Root")));

        assert_eq!(reference.resolve(&root).unwrap().into_value(), 8);
    }

    #[test]
    fn nested_reference_keeps_progress_when_outer_target_differs() {
        let test = node("MyTest", &[("x", Value::from(5))]);
        let reference = Reference::new("y", Target::kind("Unknown"))
            .with_modifier(Reference::new("x", Target::kind("MyTest")));

        assert_eq!(
            reference.resolve(&test).unwrap(),
            Resolution::Pending(Reference::new("y", Target::kind("Unknown")).with_modifier(5))
        );
    }

    #[test]
    fn added_values_apply_on_resolution() {
        let test = node("MyTest", &[("x", Value::from(5))]);
        let reference = Reference::new("x", Target::kind("MyTest"))
            .add(&Value::from(8))
            .unwrap();

        assert_eq!(reference.resolve(&test).unwrap().into_value(), 13);
    }

    #[test]
    fn missing_attribute_on_matching_target_is_an_error() {
        let root = node("Root", &[]);
        let err = Reference::new("x", Target::kind("Root")).resolve(&root).unwrap_err();
        assert_eq!(err, CompositionError::missing("x", "Root"));
    }

    #[test]
    fn threshold_swaps_value_for_bonus() {
        let bonus = Modifier::untyped(2).with_condition("on checks related to alchemy");
        let threshold = Threshold::new(5, bonus.clone());

        assert_eq!(threshold.apply(Value::from(10)), Value::from(bonus));
        assert_eq!(
            threshold.apply(Value::from(Modifier::untyped(4))),
            Value::from(Modifier::untyped(0))
        );

        let pending = Value::from(Reference::new("x", Target::kind("Root")));
        assert_eq!(threshold.apply(pending.clone()), pending);
    }

    #[test]
    fn threshold_reference_adds_its_offset() {
        let character = node("Character", &[("bluff", Value::from(Modifier::untyped(10)))]);
        let synergy = Reference::new("bluff", Target::kind("Character"))
            .with_threshold(Threshold::new(5, Modifier::untyped(2)))
            .with_modifier(Modifier::untyped(3));

        assert_eq!(synergy.resolve(&character).unwrap().into_value(), 5);
    }

    #[test]
    fn conditional_bonus_joins_a_total_offset() {
        let character = node("Character", &[("bluff", Value::from(7))]);
        let condition = Condition::new("when acting in character");
        let synergy = Reference::new("bluff", Target::kind("Character"))
            .with_threshold(Threshold::new(
                5,
                Modifier::untyped(2).with_condition(condition.clone()),
            ))
            .with_modifier(ModifierTotal::from(Modifier::untyped(4)));

        let Value::Total(total) = synergy.resolve(&character).unwrap().into_value() else {
            panic!("expected a total");
        };
        assert_eq!(total.value(&[]), 4);
        assert_eq!(total.value(&[condition]), 6);
    }

    #[test]
    fn renders_name_target_and_offset() {
        let reference =
            Reference::new("STR", Target::kind("Character")).with_modifier(Modifier::untyped(4));
        assert_eq!(reference.to_string(), "STR of Character + +4 untyped bonus");
    }
}
