//! The field of rational numbers.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_rational::Ratio;
use num_traits::{One, Zero};

use super::field::{Field, OrderedField};
use crate::error::{Error, Result};

pub type Rational = Ratio<BigInt>;

/// Q with arbitrary-precision numerators and denominators kept in lowest terms.
///
/// Characteristic is 0, so the field is suitable where Z/pZ would introduce
/// torsion artefacts.
#[derive(Debug, Clone, Copy, Default)]
pub struct RationalField;

impl RationalField {
    pub fn new() -> Self {
        Self
    }
}

impl Field for RationalField {
    type Element = Rational;

    fn zero(&self) -> Rational {
        Rational::zero()
    }

    fn one(&self) -> Rational {
        Rational::one()
    }

    fn add(&self, a: &Rational, b: &Rational) -> Rational {
        a + b
    }

    fn negate(&self, a: &Rational) -> Rational {
        -a
    }

    fn multiply(&self, a: &Rational, b: &Rational) -> Rational {
        a * b
    }

    fn invert(&self, a: &Rational) -> Result<Rational> {
        if a.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok(a.recip())
    }

    fn value_of(&self, n: i64) -> Rational {
        Rational::from_integer(BigInt::from(n))
    }

    fn characteristic(&self) -> u64 {
        0
    }

    fn is_zero(&self, a: &Rational) -> bool {
        a.is_zero()
    }
}

impl OrderedField for RationalField {
    fn compare(&self, a: &Rational, b: &Rational) -> Ordering {
        a.cmp(b)
    }
}
