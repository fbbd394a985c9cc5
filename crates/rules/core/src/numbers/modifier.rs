//! Typed bonuses and penalties.
//!
//! A [`Modifier`] is the arithmetic unit of the engine: one integer value
//! tagged with a [`ModifierType`] and, optionally, the [`Condition`] under
//! which it applies. Same-typed modifiers either stack (values sum) or keep
//! only the best bonus / worst penalty, depending on the type.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Mul, Neg};

use super::Condition;
use crate::error::ModifierError;

/// Type of a bonus or penalty and its stacking behavior.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierType {
    name: Cow<'static, str>,

    /// Same-typed modifiers sum when true; otherwise only the extreme
    /// bonus or penalty is kept.
    #[cfg_attr(feature = "serde", serde(default))]
    stacks: bool,
}

impl ModifierType {
    /// Modifiers without a named type. These always stack.
    pub const UNTYPED: ModifierType = ModifierType::from_static("untyped", true);

    /// Creates a type usable in constants.
    pub const fn from_static(name: &'static str, stacks: bool) -> Self {
        Self {
            name: Cow::Borrowed(name),
            stacks,
        }
    }

    pub fn new(name: impl Into<Cow<'static, str>>, stacks: bool) -> Self {
        Self {
            name: name.into(),
            stacks,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stacks(&self) -> bool {
        self.stacks
    }
}

impl Default for ModifierType {
    fn default() -> Self {
        Self::UNTYPED
    }
}

impl fmt::Display for ModifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A bonus or penalty to a roll or other value.
///
/// A modifier is a bonus when its value is `>= 0` and a penalty when it is
/// `<= 0`, so zero counts as both. Rendering follows the bonus convention
/// for zero: `+0 untyped bonus`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifier {
    value: i32,

    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    modifier_type: ModifierType,

    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    condition: Option<Condition>,
}

impl Modifier {
    pub fn new(value: i32, modifier_type: ModifierType) -> Self {
        Self {
            value,
            modifier_type,
            condition: None,
        }
    }

    /// Creates an untyped (stacking) modifier.
    pub fn untyped(value: i32) -> Self {
        Self::new(value, ModifierType::UNTYPED)
    }

    /// Restricts the modifier to a situation (builder pattern).
    #[must_use]
    pub fn with_condition(mut self, condition: impl Into<Condition>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn modifier_type(&self) -> &ModifierType {
        &self.modifier_type
    }

    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    pub fn is_bonus(&self) -> bool {
        self.value >= 0
    }

    pub fn is_penalty(&self) -> bool {
        self.value <= 0
    }

    /// Adds two modifiers of the same type.
    ///
    /// Stacking types sum their values. Otherwise two bonuses keep the larger
    /// value and two penalties keep the smaller one; a bonus and a penalty
    /// cannot be combined because one of them would be discarded. A shared
    /// condition is carried over to the result. Stacked sums saturate at the
    /// `i32` bounds.
    ///
    /// # Errors
    ///
    /// - [`ModifierError::DifferentTypes`] when the types differ
    /// - [`ModifierError::DifferentConditions`] when the conditions differ
    /// - [`ModifierError::BonusAndPenalty`] for an unstackable bonus and penalty
    pub fn try_add(&self, other: &Modifier) -> Result<Modifier, ModifierError> {
        self.ensure_same_type(other)?;

        if self.condition != other.condition {
            return Err(ModifierError::DifferentConditions {
                left: condition_label(self.condition.as_ref()),
                right: condition_label(other.condition.as_ref()),
            });
        }

        let value = if self.modifier_type.stacks {
            self.value.saturating_add(other.value)
        } else if self.is_bonus() && other.is_bonus() {
            self.value.max(other.value)
        } else if self.is_penalty() && other.is_penalty() {
            self.value.min(other.value)
        } else {
            return Err(ModifierError::BonusAndPenalty {
                left: self.value,
                right: other.value,
            });
        };

        Ok(Modifier {
            value,
            modifier_type: self.modifier_type.clone(),
            condition: self.condition.clone(),
        })
    }

    /// Compares the values of two modifiers of the same type.
    ///
    /// # Errors
    ///
    /// [`ModifierError::DifferentTypes`] when the types differ.
    pub fn try_cmp(&self, other: &Modifier) -> Result<Ordering, ModifierError> {
        self.ensure_same_type(other)?;
        Ok(self.value.cmp(&other.value))
    }

    /// Multiplies the value, keeping type and condition. Saturates at the
    /// `i32` bounds.
    #[must_use]
    pub fn scale(&self, factor: i32) -> Modifier {
        Modifier {
            value: self.value.saturating_mul(factor),
            modifier_type: self.modifier_type.clone(),
            condition: self.condition.clone(),
        }
    }

    fn ensure_same_type(&self, other: &Modifier) -> Result<(), ModifierError> {
        if self.modifier_type == other.modifier_type {
            Ok(())
        } else {
            Err(ModifierError::DifferentTypes {
                left: self.modifier_type.clone(),
                right: other.modifier_type.clone(),
            })
        }
    }
}

fn condition_label(condition: Option<&Condition>) -> String {
    condition.map_or_else(|| "no condition".to_owned(), |c| format!("`{c}`"))
}

impl Neg for Modifier {
    type Output = Modifier;

    fn neg(self) -> Modifier {
        self.scale(-1)
    }
}

impl Neg for &Modifier {
    type Output = Modifier;

    fn neg(self) -> Modifier {
        self.scale(-1)
    }
}

impl Mul<i32> for Modifier {
    type Output = Modifier;

    fn mul(self, factor: i32) -> Modifier {
        self.scale(factor)
    }
}

impl Mul<Modifier> for i32 {
    type Output = Modifier;

    fn mul(self, modifier: Modifier) -> Modifier {
        modifier.scale(self)
    }
}

impl PartialEq<i32> for Modifier {
    fn eq(&self, other: &i32) -> bool {
        self.value == *other
    }
}

impl PartialOrd<i32> for Modifier {
    fn partial_cmp(&self, other: &i32) -> Option<Ordering> {
        Some(self.value.cmp(other))
    }
}

impl From<&Modifier> for i32 {
    fn from(modifier: &Modifier) -> i32 {
        modifier.value
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.is_bonus() { "bonus" } else { "penalty" };
        write!(f, "{:+} {} {}", self.value, self.modifier_type, label)?;
        if let Some(condition) = &self.condition {
            write!(f, " {condition}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, RulesError};
    use proptest::prelude::*;

    const ARMOR: ModifierType = ModifierType::from_static("armor", false);
    const DODGE: ModifierType = ModifierType::from_static("dodge", true);

    #[test]
    fn stacking_modifiers_sum() {
        let total = Modifier::new(2, DODGE).try_add(&Modifier::new(3, DODGE)).unwrap();
        assert_eq!(total, Modifier::new(5, DODGE));
    }

    #[test]
    fn untyped_bonus_and_penalty_cancel_out() {
        let total = Modifier::untyped(5).try_add(&Modifier::untyped(-5)).unwrap();
        assert_eq!(total, Modifier::untyped(0));
    }

    #[test]
    fn unstackable_bonus_and_penalty_is_lossy() {
        let err = Modifier::new(5, ARMOR)
            .try_add(&Modifier::new(-5, ARMOR))
            .unwrap_err();
        assert_eq!(err, ModifierError::BonusAndPenalty { left: 5, right: -5 });
        assert_eq!(err.kind(), ErrorKind::LossyCombination);
    }

    #[test]
    fn zero_combines_with_unstackable_penalty() {
        let total = Modifier::new(0, ARMOR).try_add(&Modifier::new(-3, ARMOR)).unwrap();
        assert_eq!(total.value(), -3);
    }

    #[test]
    fn different_types_cannot_be_added_or_compared() {
        let armor = Modifier::new(4, ARMOR);
        let dodge = Modifier::new(1, DODGE);

        assert!(matches!(
            armor.try_add(&dodge),
            Err(ModifierError::DifferentTypes { .. })
        ));
        assert_eq!(
            armor.try_cmp(&dodge).unwrap_err().kind(),
            ErrorKind::TypeMismatch
        );
    }

    #[test]
    fn shared_condition_survives_addition() {
        let first = Modifier::untyped(1).with_condition("against poison");
        let second = Modifier::untyped(2).with_condition("against poison");

        let total = first.try_add(&second).unwrap();
        assert_eq!(total.condition(), Some(&Condition::new("against poison")));
        assert_eq!(total.value(), 3);
    }

    #[test]
    fn different_conditions_are_rejected() {
        let conditional = Modifier::untyped(2).with_condition("against poison");
        let err = conditional.try_add(&Modifier::untyped(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConditionMismatch);
        assert_eq!(
            err.to_string(),
            "cannot add modifiers with different conditions: `against poison` and no condition"
        );
    }

    #[test]
    fn scaling_and_negation_keep_type_and_condition() {
        let size = ModifierType::from_static("size", false);
        let small = Modifier::new(1, size.clone()).with_condition("while hiding");

        assert_eq!(-small.clone(), Modifier::new(-1, size.clone()).with_condition("while hiding"));
        assert_eq!(
            -4 * small.clone(),
            Modifier::new(-4, size.clone()).with_condition("while hiding")
        );
        assert_eq!((small * 4).value(), 4);
    }

    #[test]
    fn compares_against_integers() {
        let modifier = Modifier::untyped(3);
        assert!(modifier < 5);
        assert!(modifier == 3);
        assert_eq!(Modifier::new(2, ARMOR).try_cmp(&Modifier::new(4, ARMOR)), Ok(Ordering::Less));
    }

    #[test]
    fn renders_bonus_penalty_and_condition() {
        let racial = ModifierType::from_static("racial", false);
        let stonework = Modifier::new(2, racial).with_condition("to notice unusual stonework");
        assert_eq!(stonework.to_string(), "+2 racial bonus to notice unusual stonework");

        let size = ModifierType::from_static("size", false);
        assert_eq!(Modifier::new(-1, size).to_string(), "-1 size penalty");
    }

    #[test]
    fn arithmetic_saturates_at_the_bounds() {
        let sum = Modifier::untyped(i32::MAX).try_add(&Modifier::untyped(1)).unwrap();
        assert_eq!(sum.value(), i32::MAX);

        assert_eq!(Modifier::untyped(i32::MIN).scale(-1).value(), i32::MAX);
        assert_eq!((-Modifier::new(i32::MIN, DODGE)).value(), i32::MAX);
        assert_eq!((Modifier::new(i32::MIN, DODGE) * 2).value(), i32::MIN);
    }

    #[test]
    fn zero_renders_as_bonus() {
        assert_eq!(Modifier::untyped(0).to_string(), "+0 untyped bonus");
    }

    proptest! {
        #[test]
        fn stacking_addition_sums_values(a in -1000i32..1000, b in -1000i32..1000) {
            let total = Modifier::new(a, DODGE).try_add(&Modifier::new(b, DODGE)).unwrap();
            prop_assert_eq!(total.value(), a + b);
            prop_assert_eq!(total.modifier_type(), &DODGE);
        }

        #[test]
        fn unstackable_bonuses_keep_the_best(a in 0i32..1000, b in 0i32..1000) {
            let total = Modifier::new(a, ARMOR).try_add(&Modifier::new(b, ARMOR)).unwrap();
            prop_assert_eq!(total, Modifier::new(a.max(b), ARMOR));
        }

        #[test]
        fn unstackable_penalties_keep_the_worst(a in -1000i32..=0, b in -1000i32..=0) {
            let total = Modifier::new(a, ARMOR).try_add(&Modifier::new(b, ARMOR)).unwrap();
            prop_assert_eq!(total, Modifier::new(a.min(b), ARMOR));
        }

        #[test]
        fn unstackable_mixed_signs_are_lossy(a in 1i32..1000, b in -1000i32..0) {
            let result = Modifier::new(a, ARMOR).try_add(&Modifier::new(b, ARMOR));
            prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::LossyCombination);
        }

        #[test]
        fn mismatched_types_always_fail(a in -100i32..100, b in -100i32..100) {
            let armor = Modifier::new(a, ARMOR);
            let dodge = Modifier::new(b, DODGE);
            prop_assert_eq!(armor.try_add(&dodge).unwrap_err().kind(), ErrorKind::TypeMismatch);
            prop_assert_eq!(armor.try_cmp(&dodge).unwrap_err().kind(), ErrorKind::TypeMismatch);
        }
    }
}
