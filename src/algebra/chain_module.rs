//! Free module arithmetic over formal sums.

use std::collections::hash_map::Entry;
use std::hash::Hash;
use std::marker::PhantomData;

use super::field::Field;
use super::formal_sum::FormalSum;
use crate::error::{Error, Result};

/// The free `F`-module with basis `M`.
///
/// Every operation keeps the support free of zero coefficients.
#[derive(Debug, Clone)]
pub struct ChainModule<F, M> {
    field: F,
    _basis: PhantomData<fn() -> M>,
}

impl<F, M> ChainModule<F, M>
where
    F: Field,
    M: Clone + Eq + Hash,
{
    pub fn new(field: F) -> Self {
        Self {
            field,
            _basis: PhantomData,
        }
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    /// `coefficient * generator`; empty when the coefficient is zero.
    pub fn create_sum(&self, coefficient: F::Element, generator: M) -> FormalSum<F::Element, M> {
        let mut sum = FormalSum::new();
        if !self.field.is_zero(&coefficient) {
            sum.put(coefficient, generator);
        }
        sum
    }

    /// Builds `sum_i coefficients[i] * generators[i]` from parallel slices.
    ///
    /// Repeated generators have their coefficients added.
    pub fn create_sum_from(
        &self,
        coefficients: &[F::Element],
        generators: &[M],
    ) -> Result<FormalSum<F::Element, M>> {
        if coefficients.len() != generators.len() {
            return Err(Error::LengthMismatch {
                left: coefficients.len(),
                right: generators.len(),
            });
        }
        let mut sum = FormalSum::with_capacity(generators.len());
        for (coefficient, generator) in coefficients.iter().zip(generators) {
            self.add_term(&mut sum, coefficient, generator.clone());
        }
        Ok(sum)
    }

    pub fn add(
        &self,
        a: &FormalSum<F::Element, M>,
        b: &FormalSum<F::Element, M>,
    ) -> FormalSum<F::Element, M> {
        let (mut result, other) = if a.len() >= b.len() {
            (a.clone(), b)
        } else {
            (b.clone(), a)
        };
        self.accumulate_sum(&mut result, other);
        result
    }

    pub fn subtract(
        &self,
        a: &FormalSum<F::Element, M>,
        b: &FormalSum<F::Element, M>,
    ) -> FormalSum<F::Element, M> {
        let mut result = a.clone();
        let minus_one = self.field.negate(&self.field.one());
        self.accumulate(&mut result, b, &minus_one);
        result
    }

    pub fn negate(&self, a: &FormalSum<F::Element, M>) -> FormalSum<F::Element, M> {
        a.iter()
            .map(|(m, r)| (self.field.negate(r), m.clone()))
            .collect()
    }

    /// `scalar * sum`; the empty sum when `scalar` is zero.
    pub fn multiply(
        &self,
        scalar: &F::Element,
        sum: &FormalSum<F::Element, M>,
    ) -> FormalSum<F::Element, M> {
        if self.field.is_zero(scalar) {
            return FormalSum::new();
        }
        let mut result = FormalSum::with_capacity(sum.len());
        for (m, r) in sum {
            let product = self.field.multiply(scalar, r);
            // zero divisors cannot occur in a field, but a broken field impl could
            if !self.field.is_zero(&product) {
                result.put(product, m.clone());
            }
        }
        result
    }

    /// `target += scalar * source`, in time proportional to `source.len()`.
    pub fn accumulate(
        &self,
        target: &mut FormalSum<F::Element, M>,
        source: &FormalSum<F::Element, M>,
        scalar: &F::Element,
    ) {
        if self.field.is_zero(scalar) {
            return;
        }
        for (m, r) in source {
            let term = self.field.multiply(scalar, r);
            self.add_term(target, &term, m.clone());
        }
    }

    /// `target += source`.
    pub fn accumulate_sum(
        &self,
        target: &mut FormalSum<F::Element, M>,
        source: &FormalSum<F::Element, M>,
    ) {
        for (m, r) in source {
            self.add_term(target, r, m.clone());
        }
    }

    fn add_term(&self, target: &mut FormalSum<F::Element, M>, coefficient: &F::Element, generator: M) {
        if self.field.is_zero(coefficient) {
            return;
        }
        match target.entry(generator) {
            Entry::Occupied(mut occupied) => {
                let updated = self.field.add(occupied.get(), coefficient);
                if self.field.is_zero(&updated) {
                    occupied.remove();
                } else {
                    *occupied.get_mut() = updated;
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(coefficient.clone());
            }
        }
    }
}
