//! Tensor product of two filtered chain complexes.

use std::cmp::Ordering;

use tracing::debug;

use super::storage::SortedStorage;
use super::{FilteredStream, StreamIter};
use crate::error::{Error, Result};

/// The complex `C ⊗ D` with basis pairs `(a, b)`.
///
/// - `dim(a, b) = dim a + dim b`
/// - `index(a, b) = max(index a, index b)`
/// - `∂(a ⊗ b) = ∂a ⊗ b + (-1)^{dim a} a ⊗ ∂b`
///
/// Finalizing the product first finalizes both factors.
#[derive(Debug, Clone)]
pub struct TensorStream<S1, S2>
where
    S1: FilteredStream,
    S2: FilteredStream,
{
    first: S1,
    second: S2,
    storage: SortedStorage<(S1::Basis, S2::Basis)>,
}

impl<S1, S2> TensorStream<S1, S2>
where
    S1: FilteredStream,
    S2: FilteredStream,
{
    pub fn new(first: S1, second: S2) -> Self {
        Self {
            first,
            second,
            storage: SortedStorage::new(),
        }
    }

    pub fn first(&self) -> &S1 {
        &self.first
    }

    pub fn second(&self) -> &S2 {
        &self.second
    }

    pub fn into_parts(self) -> (S1, S2) {
        (self.first, self.second)
    }

    fn finalize_underlying_streams(&mut self) -> Result<()> {
        if !self.first.is_finalized() {
            self.first.finalize()?;
        }
        if !self.second.is_finalized() {
            self.second.finalize()?;
        }
        Ok(())
    }

    fn construct(&mut self) -> Result<()> {
        for a in self.first.iter()? {
            let a_index = self.first.filtration_index(a)?;
            for b in self.second.iter()? {
                let b_index = self.second.filtration_index(b)?;
                self.storage
                    .add_element((a.clone(), b.clone()), a_index.max(b_index))?;
            }
        }
        Ok(())
    }

    fn check_dimension(&self, parent: usize, face: &(S1::Basis, S2::Basis)) -> Result<()> {
        let found = self.dimension(face);
        if found + 1 != parent {
            return Err(Error::DimensionMismatch {
                expected_parent: parent,
                found,
            });
        }
        Ok(())
    }
}

impl<S1, S2> FilteredStream for TensorStream<S1, S2>
where
    S1: FilteredStream,
    S2: FilteredStream,
{
    type Basis = (S1::Basis, S2::Basis);

    fn finalize(&mut self) -> Result<()> {
        if self.storage.is_finalized() {
            return Ok(());
        }
        self.finalize_underlying_streams()?;
        self.construct()?;

        let (first, second) = (&self.first, &self.second);
        self.storage.finalize_by(|x, y| {
            first
                .compare_basis(&x.0, &y.0)
                .then_with(|| second.compare_basis(&x.1, &y.1))
        });
        debug!(size = self.storage.len(), "finalized tensor stream");
        Ok(())
    }

    fn is_finalized(&self) -> bool {
        self.storage.is_finalized()
    }

    fn iter(&self) -> Result<StreamIter<'_, Self::Basis>> {
        Ok(Box::new(self.storage.elements()?.iter()))
    }

    fn dimension(&self, element: &Self::Basis) -> usize {
        self.first.dimension(&element.0) + self.second.dimension(&element.1)
    }

    fn filtration_index(&self, element: &Self::Basis) -> Result<usize> {
        self.storage.filtration_index(element)
    }

    fn boundary(&self, element: &Self::Basis) -> Result<Vec<Self::Basis>> {
        self.storage.ensure_finalized()?;
        let (a, b) = element;
        let d_a = self.first.boundary(a)?;
        let d_b = self.second.boundary(b)?;
        let parent = self.dimension(element);

        let mut boundary = Vec::with_capacity(d_a.len() + d_b.len());
        for face in d_a {
            boundary.push((face, b.clone()));
        }
        for face in d_b {
            boundary.push((a.clone(), face));
        }
        for face in &boundary {
            self.check_dimension(parent, face)?;
        }
        Ok(boundary)
    }

    fn boundary_coefficients(&self, element: &Self::Basis) -> Result<Vec<i64>> {
        self.storage.ensure_finalized()?;
        let (a, b) = element;
        let mut coefficients = self.first.boundary_coefficients(a)?;
        // Koszul sign (-1)^{dim a} on the second factor's differential
        let sign = if self.first.dimension(a) % 2 == 0 { 1 } else { -1 };
        coefficients.extend(
            self.second
                .boundary_coefficients(b)?
                .into_iter()
                .map(|c| sign * c),
        );
        Ok(coefficients)
    }

    fn compare_basis(&self, x: &Self::Basis, y: &Self::Basis) -> Ordering {
        self.first
            .compare_basis(&x.0, &y.0)
            .then_with(|| self.second.compare_basis(&x.1, &y.1))
    }

    fn size(&self) -> Result<usize> {
        self.storage.ensure_finalized()?;
        Ok(self.storage.len())
    }

    fn max_filtration_index(&self) -> Result<Option<usize>> {
        self.storage.max_filtration_index()
    }

    fn filtration_value(&self, element: &Self::Basis) -> Result<f64> {
        let a = self.first.filtration_value(&element.0)?;
        let b = self.second.filtration_value(&element.1)?;
        Ok(a.max(b))
    }
}
