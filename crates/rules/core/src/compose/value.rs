//! The closed set of values an attribute can hold.

use std::fmt;
use std::rc::Rc;

use super::{Composable, Reference};
use crate::error::CompositionError;
use crate::numbers::{Modifier, ModifierTotal};

/// Discriminant of a [`Value`], used in error messages.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum ValueKind {
    Number,
    Modifier,
    Total,
    Reference,
    Node,
}

/// A named attribute's value.
///
/// Values are combined with [`Value::try_add`] when several nodes of an
/// aggregation tree define the same name.
#[derive(Clone, Debug)]
pub enum Value {
    /// A plain integer (speeds, ranks, ability scores).
    Number(i32),

    Modifier(Modifier),

    Total(ModifierTotal),

    /// A binding that is still waiting for a matching node.
    Reference(Reference),

    /// A nested node whose attributes join the aggregation.
    Node(Rc<dyn Composable>),
}

impl Value {
    /// Wraps a node so it can be stored as an attribute.
    pub fn node(node: impl Composable + 'static) -> Self {
        Self::Node(Rc::new(node))
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Number(_) => ValueKind::Number,
            Self::Modifier(_) => ValueKind::Modifier,
            Self::Total(_) => ValueKind::Total,
            Self::Reference(_) => ValueKind::Reference,
            Self::Node(_) => ValueKind::Node,
        }
    }

    /// Adds two values.
    ///
    /// | left | right | result |
    /// |------|-------|--------|
    /// | number | number | number, saturating |
    /// | modifier | modifier | [`Modifier::try_add`] |
    /// | total or modifier | total or modifier | merged total |
    /// | reference | any | reference with the other value layered on |
    /// | any | reference | reference with the other value layered on |
    ///
    /// # Errors
    ///
    /// Modifier arithmetic failures, and
    /// [`CompositionError::UnsupportedCombination`] for every other pairing.
    pub fn try_add(&self, other: &Value) -> Result<Value, CompositionError> {
        let sum = match (self, other) {
            (Self::Number(a), Self::Number(b)) => Self::Number(a.saturating_add(*b)),
            (Self::Modifier(a), Self::Modifier(b)) => Self::Modifier(a.try_add(b)?),
            (Self::Total(a), Self::Total(b)) => Self::Total(a.merge(b)),
            (Self::Total(total), Self::Modifier(modifier))
            | (Self::Modifier(modifier), Self::Total(total)) => {
                let mut total = total.clone();
                total.insert(modifier.clone());
                Self::Total(total)
            }
            (Self::Reference(reference), value) | (value, Self::Reference(reference)) => {
                Self::Reference(reference.add(value)?)
            }
            _ => {
                return Err(CompositionError::UnsupportedCombination {
                    left: self.kind(),
                    right: other.kind(),
                });
            }
        };
        Ok(sum)
    }

    /// Multiplies a value that denotes a single typed quantity.
    ///
    /// # Errors
    ///
    /// [`CompositionError::AmbiguousScaling`] for totals with several
    /// entries and for references; nodes cannot be scaled at all.
    pub fn try_scale(&self, factor: i32) -> Result<Value, CompositionError> {
        match self {
            Self::Number(n) => Ok(Self::Number(n.saturating_mul(factor))),
            Self::Modifier(modifier) => Ok(Self::Modifier(modifier.scale(factor))),
            Self::Total(total) if total.is_empty() => Ok(Self::Total(total.clone())),
            Self::Total(total) => total
                .single()
                .map(|modifier| Self::Total(ModifierTotal::from(modifier.scale(factor))))
                .ok_or(CompositionError::AmbiguousScaling { kind: self.kind() }),
            Self::Reference(_) => Err(CompositionError::AmbiguousScaling { kind: self.kind() }),
            Self::Node(_) => Err(CompositionError::UnsupportedCombination {
                left: self.kind(),
                right: ValueKind::Number,
            }),
        }
    }

    pub fn try_neg(&self) -> Result<Value, CompositionError> {
        self.try_scale(-1)
    }

    /// Numeric reading of the value. Totals count unconditional modifiers
    /// only; references and nodes have no number yet.
    pub fn as_number(&self) -> Option<i32> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Modifier(modifier) => Some(modifier.value()),
            Self::Total(total) => Some(total.value(&[])),
            Self::Reference(_) | Self::Node(_) => None,
        }
    }

    pub fn as_modifier(&self) -> Option<&Modifier> {
        match self {
            Self::Modifier(modifier) => Some(modifier),
            _ => None,
        }
    }

    pub fn as_total(&self) -> Option<&ModifierTotal> {
        match self {
            Self::Total(total) => Some(total),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Self::Reference(reference) => Some(reference),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&dyn Composable> {
        match self {
            Self::Node(node) => Some(node.as_ref()),
            _ => None,
        }
    }

    /// True for a reference that has not found its target yet.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Reference(_))
    }

    /// Reads `name` on the value when it is a node. Other values expose no
    /// attributes.
    pub fn attribute(&self, name: &str) -> Result<Option<Value>, CompositionError> {
        match self {
            Self::Node(node) => node.lookup(name),
            _ => Ok(None),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Modifier(a), Self::Modifier(b)) => a == b,
            (Self::Total(a), Self::Total(b)) => a == b,
            (Self::Reference(a), Self::Reference(b)) => a == b,
            (Self::Node(a), Self::Node(b)) => std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b)),
            _ => false,
        }
    }
}

impl PartialEq<i32> for Value {
    fn eq(&self, other: &i32) -> bool {
        self.as_number() == Some(*other)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(value)
    }
}

impl From<Modifier> for Value {
    fn from(modifier: Modifier) -> Self {
        Self::Modifier(modifier)
    }
}

impl From<ModifierTotal> for Value {
    fn from(total: ModifierTotal) -> Self {
        Self::Total(total)
    }
}

impl From<Reference> for Value {
    fn from(reference: Reference) -> Self {
        Self::Reference(reference)
    }
}

impl From<Rc<dyn Composable>> for Value {
    fn from(node: Rc<dyn Composable>) -> Self {
        Self::Node(node)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Modifier(modifier) => write!(f, "{modifier}"),
            Self::Total(total) => write!(f, "{total}"),
            Self::Reference(reference) => write!(f, "{reference}"),
            Self::Node(node) => write!(f, "<{}>", node.kind()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{Reference, Target};
    use crate::error::{ErrorKind, RulesError};
    use crate::numbers::ModifierType;

    const ARMOR: ModifierType = ModifierType::from_static("armor", false);
    const SHIELD: ModifierType = ModifierType::from_static("shield", false);

    #[test]
    fn numbers_add() {
        assert_eq!(Value::from(2).try_add(&Value::from(3)).unwrap(), 5);
    }

    #[test]
    fn modifiers_of_different_types_merge_only_through_totals() {
        let armor = Value::from(Modifier::new(4, ARMOR));
        let shield = Value::from(Modifier::new(1, SHIELD));
        assert_eq!(
            armor.try_add(&shield).unwrap_err().kind(),
            ErrorKind::TypeMismatch
        );

        let total = Value::from(ModifierTotal::from(Modifier::new(4, ARMOR)));
        let sum = total.try_add(&shield).unwrap();
        assert_eq!(sum.kind(), ValueKind::Total);
        assert_eq!(sum, 5);

        let reversed = shield.try_add(&total).unwrap();
        assert_eq!(reversed, sum);
    }

    #[test]
    fn numbers_and_modifiers_do_not_mix() {
        let err = Value::from(2)
            .try_add(&Value::from(Modifier::untyped(1)))
            .unwrap_err();
        assert_eq!(
            err,
            CompositionError::UnsupportedCombination {
                left: ValueKind::Number,
                right: ValueKind::Modifier,
            }
        );
    }

    #[test]
    fn adding_to_a_reference_from_either_side_layers_the_value() {
        let reference = Value::from(Reference::new("x", Target::kind("Root")));
        let expected = Value::from(Reference::new("x", Target::kind("Root")).with_modifier(3));

        assert_eq!(reference.try_add(&Value::from(3)).unwrap(), expected);
        assert_eq!(Value::from(3).try_add(&reference).unwrap(), expected);
    }

    #[test]
    fn scaling_requires_a_single_quantity() {
        assert_eq!(Value::from(3).try_neg().unwrap(), -3);
        assert_eq!(
            Value::from(Modifier::new(2, ARMOR)).try_scale(3).unwrap(),
            Value::from(Modifier::new(6, ARMOR))
        );

        let single = Value::from(ModifierTotal::from(Modifier::new(2, ARMOR)));
        assert_eq!(single.try_neg().unwrap(), -2);

        let ambiguous = Value::from(ModifierTotal::from_modifiers([
            Modifier::new(2, ARMOR),
            Modifier::new(1, SHIELD),
        ]));
        let err = ambiguous.try_neg().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AmbiguousScaling);
        assert_eq!(err.error_code(), "COMPOSE_AMBIGUOUS_SCALING");

        let reference = Value::from(Reference::new("x", Target::kind("Root")));
        assert_eq!(reference.try_neg().unwrap_err().kind(), ErrorKind::AmbiguousScaling);
    }

    #[test]
    fn number_arithmetic_saturates() {
        assert_eq!(Value::from(i32::MAX).try_add(&Value::from(1)).unwrap(), i32::MAX);
        assert_eq!(Value::from(i32::MIN).try_neg().unwrap(), i32::MAX);
        assert_eq!(
            Value::from(Modifier::untyped(i32::MIN)).try_scale(2).unwrap(),
            Value::from(Modifier::untyped(i32::MIN))
        );
    }

    #[test]
    fn only_nodes_expose_attributes() {
        assert_eq!(Value::from(3).attribute("x"), Ok(None));
        assert!(!Value::from(3).is_pending());
    }
}
