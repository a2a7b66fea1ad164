//! Sparse column store for the pHcol reduction.
//!
//! Rows and columns are addressed by stream position, so the pivot ("low") of
//! a column is simply the largest position in its support.

use std::collections::HashMap;

use tracing::trace;

use crate::algebra::{ChainModule, Field, FormalSum};
use crate::error::{invariant, Result};

/// A column keyed by stream position.
pub type Column<E> = FormalSum<E, usize>;

/// Reduced boundary matrix `R` and change of basis `V`, built one column at a
/// time in stream order.
///
/// Invariant: every stored nonempty `R` column has a distinct low, and the
/// pivot map sends each such low to its column.
#[derive(Debug, Clone)]
pub struct ColumnStore<F: Field> {
    module: ChainModule<F, usize>,
    r: HashMap<usize, Column<F::Element>>,
    v: HashMap<usize, Column<F::Element>>,
    pivots: HashMap<usize, usize>,
    reductions: usize,
}

/// Largest row present in a column.
pub fn low<E>(column: &Column<E>) -> Option<usize> {
    column.generators().copied().max()
}

impl<F: Field> ColumnStore<F> {
    pub fn new(field: F) -> Self {
        Self {
            module: ChainModule::new(field),
            r: HashMap::new(),
            v: HashMap::new(),
            pivots: HashMap::new(),
            reductions: 0,
        }
    }

    pub fn module(&self) -> &ChainModule<F, usize> {
        &self.module
    }

    /// Adds column `index` with boundary `boundary` and reduces it against the
    /// columns already stored. Returns the settled low.
    ///
    /// Columns must be inserted in increasing index order, and every row of
    /// `boundary` must be smaller than `index`.
    pub fn insert_column(&mut self, index: usize, boundary: Column<F::Element>) -> Result<Option<usize>> {
        let field = self.module.field().clone();
        let mut r_i = boundary;
        let mut v_i = self.module.create_sum(field.one(), index);
        let mut low_i = low(&r_i);

        while let Some(row) = low_i {
            let Some(&j) = self.pivots.get(&row) else {
                break;
            };
            let (r_j, v_j) = match (self.r.get(&j), self.v.get(&j)) {
                (Some(r_j), Some(v_j)) => (r_j, v_j),
                _ => return Err(invariant(format!("pivot column {j} is missing"))),
            };
            let (Some(a), Some(b)) = (r_i.coefficient(&row), r_j.coefficient(&row)) else {
                return Err(invariant(format!("row {row} absent from pivot column {j}")));
            };

            let c = field.divide(a, b)?;
            let minus_c = field.negate(&c);
            self.module.accumulate(&mut r_i, r_j, &minus_c);
            self.module.accumulate(&mut v_i, v_j, &minus_c);
            self.reductions += 1;
            trace!(column = index, partner = j, row, "column reduction step");

            let next = low(&r_i);
            if next.is_some_and(|next| next >= row) {
                return Err(invariant(format!(
                    "low of column {index} did not decrease below {row}"
                )));
            }
            low_i = next;
        }

        if let Some(row) = low_i {
            if let Some(previous) = self.pivots.insert(row, index) {
                return Err(invariant(format!(
                    "columns {previous} and {index} share low {row}"
                )));
            }
        }
        self.r.insert(index, r_i);
        self.v.insert(index, v_i);
        Ok(low_i)
    }

    pub fn r(&self, index: usize) -> Option<&Column<F::Element>> {
        self.r.get(&index)
    }

    pub fn v(&self, index: usize) -> Option<&Column<F::Element>> {
        self.v.get(&index)
    }

    /// Column whose low is `row`, if any.
    pub fn pivot_column(&self, row: usize) -> Option<usize> {
        self.pivots.get(&row).copied()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.r.contains_key(&index)
    }

    pub fn num_columns(&self) -> usize {
        self.r.len()
    }

    pub fn num_pivots(&self) -> usize {
        self.pivots.len()
    }

    /// Total column additions performed so far.
    pub fn num_reductions(&self) -> usize {
        self.reductions
    }

    pub(crate) fn into_columns(self) -> (HashMap<usize, Column<F::Element>>, HashMap<usize, Column<F::Element>>) {
        (self.r, self.v)
    }
}
