//! Parameters of a persistence computation.

use crate::error::{invalid, Result};

/// Which column of the decomposition represents an interval, and which
/// dimension it is reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    /// Ordinary persistent homology: intervals at the dimension of the killed
    /// generator, with the reduced column `R[i]` as representative and
    /// right-infinite essential classes.
    #[default]
    Absolute,
    /// Duality extraction: intervals at the dimension of the killing
    /// generator, with the change-of-basis column `V[i]` as representative and
    /// left-infinite essential classes.
    Relative,
}

/// Configuration for [`PersistentHomology`](super::PersistentHomology).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceConfig {
    /// Smallest homological dimension of interest.
    pub min_dimension: usize,
    /// Largest homological dimension of interest. Generators of dimension up
    /// to `max_dimension + 1` are reduced.
    pub max_dimension: usize,
    /// Finite intervals shorter than this (in filtration indices) are dropped.
    pub min_granularity: usize,
    pub polarity: Polarity,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            min_dimension: 0,
            max_dimension: 1,
            min_granularity: 1,
            polarity: Polarity::Absolute,
        }
    }
}

impl PersistenceConfig {
    /// Dimensions `0..=max_dimension`, absolute polarity.
    pub fn new(max_dimension: usize) -> Self {
        Self {
            max_dimension,
            ..Self::default()
        }
    }

    pub fn with_min_dimension(mut self, min_dimension: usize) -> Self {
        self.min_dimension = min_dimension;
        self
    }

    pub fn with_min_granularity(mut self, min_granularity: usize) -> Self {
        self.min_granularity = min_granularity;
        self
    }

    pub fn with_polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_dimension > self.max_dimension {
            return Err(invalid(format!(
                "min_dimension {} exceeds max_dimension {}",
                self.min_dimension, self.max_dimension
            )));
        }
        Ok(())
    }

    /// Whether a generator of this dimension takes part in the reduction at
    /// all, as a column or as a row: `dimension <= max_dimension + 1`.
    pub(crate) fn is_indexed_dimension(&self, dimension: usize) -> bool {
        dimension.saturating_sub(1) <= self.max_dimension
    }

    /// Whether a generator of this dimension gets a column in the reduction.
    pub(crate) fn is_column_dimension(&self, dimension: usize) -> bool {
        dimension >= self.min_dimension && self.is_indexed_dimension(dimension)
    }

    /// Whether an unmatched generator of this dimension opens an interval.
    pub(crate) fn is_birth_dimension(&self, dimension: usize) -> bool {
        dimension >= self.min_dimension && dimension <= self.max_dimension
    }
}
