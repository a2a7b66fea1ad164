//! Field contract used by every algebraic routine in the crate.
//!
//! The persistence engine is field-agnostic: all coefficient arithmetic is
//! expressed through [`Field`], so a reduction over Z/pZ and one over Q share
//! the same code path.

use std::cmp::Ordering;
use std::fmt::Debug;

use crate::error::Result;

/// A commutative field acting on values of type [`Field::Element`].
pub trait Field: Clone + Debug {
    /// Representation of a field value.
    type Element: Clone + PartialEq + Debug;

    /// Additive identity.
    fn zero(&self) -> Self::Element;

    /// Multiplicative identity.
    fn one(&self) -> Self::Element;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    fn negate(&self, a: &Self::Element) -> Self::Element;

    fn multiply(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    /// Multiplicative inverse. Fails with `DivisionByZero` on the zero element.
    fn invert(&self, a: &Self::Element) -> Result<Self::Element>;

    /// Image of an integer under the canonical ring map Z -> F.
    fn value_of(&self, n: i64) -> Self::Element;

    /// 0 for fields of infinite characteristic, p for Z/pZ.
    fn characteristic(&self) -> u64;

    fn subtract(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.add(a, &self.negate(b))
    }

    /// `a / b`. Fails with `DivisionByZero` when `b` is the additive identity.
    fn divide(&self, a: &Self::Element, b: &Self::Element) -> Result<Self::Element> {
        Ok(self.multiply(a, &self.invert(b)?))
    }

    fn is_zero(&self, a: &Self::Element) -> bool {
        *a == self.zero()
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        *a == self.one()
    }
}

/// A field equipped with a total order on its elements.
pub trait OrderedField: Field {
    fn compare(&self, a: &Self::Element, b: &Self::Element) -> Ordering;
}
