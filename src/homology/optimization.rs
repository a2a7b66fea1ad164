//! Local search over a homology class.
//!
//! Given a cycle `z` and chain homotopies `h₁, …, hₖ` (typically boundaries of
//! the next dimension, see
//! [`PersistentHomology::boundary_columns`](super::PersistentHomology::boundary_columns)),
//! every chain `z + Σ cᵢ·hᵢ` represents the same class. These routines look
//! for a representative minimising a user objective.

use std::cmp::Ordering;
use std::hash::Hash;

use rand::Rng;
use tracing::debug;

use crate::algebra::{ChainModule, FormalSum, OrderedField};
use crate::error::{Error, Result};

/// Best chain found and its objective value.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult<E, M>
where
    M: Eq + Hash,
{
    pub chain: FormalSum<E, M>,
    pub objective: E,
}

/// Samples `repetitions` chains `cycle + Σ cᵢ·hᵢ` with `cᵢ ∈ {-1, 0, 1}` and
/// keeps the one with the smallest objective. `None` when `repetitions` is 0.
pub fn randomized_optimization<F, M, O, R>(
    module: &ChainModule<F, M>,
    cycle: &FormalSum<F::Element, M>,
    homotopies: &[FormalSum<F::Element, M>],
    objective: O,
    repetitions: usize,
    rng: &mut R,
) -> Option<OptimizationResult<F::Element, M>>
where
    F: OrderedField,
    M: Clone + Eq + Hash,
    O: Fn(&FormalSum<F::Element, M>) -> F::Element,
    R: Rng,
{
    let field = module.field();
    let mut best: Option<OptimizationResult<F::Element, M>> = None;

    for _ in 0..repetitions {
        let mut chain = cycle.clone();
        for homotopy in homotopies {
            let c = field.value_of(rng.gen_range(-1..=1));
            module.accumulate(&mut chain, homotopy, &c);
        }
        let value = objective(&chain);
        if best
            .as_ref()
            .map_or(true, |b| field.compare(&value, &b.objective) == Ordering::Less)
        {
            best = Some(OptimizationResult {
                chain,
                objective: value,
            });
        }
    }
    best
}

/// Greedy coordinate descent from `repetitions` random starting points.
///
/// Each start draws every coefficient uniformly from the prime field, then
/// repeatedly moves to the first single-coordinate change that strictly
/// lowers the objective until none does. Requires a finite field.
pub fn greedy_optimization<F, M, O, R>(
    module: &ChainModule<F, M>,
    cycle: &FormalSum<F::Element, M>,
    homotopies: &[FormalSum<F::Element, M>],
    objective: O,
    repetitions: usize,
    rng: &mut R,
) -> Result<Option<OptimizationResult<F::Element, M>>>
where
    F: OrderedField,
    M: Clone + Eq + Hash,
    O: Fn(&FormalSum<F::Element, M>) -> F::Element,
    R: Rng,
{
    let field = module.field();
    let p = field.characteristic();
    let p = match i64::try_from(p) {
        Ok(p) if p > 0 => p,
        _ => return Err(Error::InvalidCharacteristic(p)),
    };

    let mut best: Option<OptimizationResult<F::Element, M>> = None;
    for repetition in 0..repetitions {
        let mut chain = cycle.clone();
        for homotopy in homotopies {
            let c = field.value_of(rng.gen_range(0..p));
            module.accumulate(&mut chain, homotopy, &c);
        }
        let mut value = objective(&chain);

        let mut moves = 0usize;
        let mut improved = true;
        while improved {
            improved = false;
            for homotopy in homotopies {
                for c in 1..p {
                    let mut candidate = chain.clone();
                    module.accumulate(&mut candidate, homotopy, &field.value_of(c));
                    let candidate_value = objective(&candidate);
                    if field.compare(&candidate_value, &value) == Ordering::Less {
                        chain = candidate;
                        value = candidate_value;
                        moves += 1;
                        improved = true;
                    }
                }
            }
        }
        debug!(repetition, moves, "greedy descent converged");

        if best
            .as_ref()
            .map_or(true, |b| field.compare(&value, &b.objective) == Ordering::Less)
        {
            best = Some(OptimizationResult {
                chain,
                objective: value,
            });
        }
    }
    Ok(best)
}
