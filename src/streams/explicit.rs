//! Streams populated by direct insertion.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;

use super::storage::SortedStorage;
use super::{BasisOrder, ChainBasisElement, FilteredStream, NaturalOrder, StreamIter};
use crate::error::Result;
use crate::topology::Simplex;

/// A stream whose elements are added explicitly with their filtration index.
///
/// Boundaries come from the generator type itself ([`ChainBasisElement`]).
/// After finalization, iteration visits elements by filtration index and then
/// by the supplied basis order.
#[derive(Debug, Clone)]
pub struct ExplicitStream<T, O = NaturalOrder>
where
    T: Clone + Eq + Hash + Debug,
{
    storage: SortedStorage<T>,
    order: O,
}

/// Explicit stream of simplices under their natural order.
pub type ExplicitSimplexStream = ExplicitStream<Simplex>;

impl<T, O> ExplicitStream<T, O>
where
    T: ChainBasisElement + Clone + Eq + Hash + Debug,
    O: BasisOrder<T>,
{
    pub fn with_order(order: O) -> Self {
        Self {
            storage: SortedStorage::new(),
            order,
        }
    }

    /// Adds `element` entering at `filtration_index`. Fails once finalized.
    pub fn add_element(&mut self, element: T, filtration_index: usize) -> Result<()> {
        self.storage.add_element(element, filtration_index)
    }

    pub fn contains(&self, element: &T) -> bool {
        self.storage.contains(element)
    }
}

impl<T> ExplicitStream<T, NaturalOrder>
where
    T: ChainBasisElement + Clone + Eq + Hash + Debug + Ord,
{
    pub fn new() -> Self {
        Self::with_order(NaturalOrder)
    }
}

impl<T> Default for ExplicitStream<T, NaturalOrder>
where
    T: ChainBasisElement + Clone + Eq + Hash + Debug + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<O: BasisOrder<Simplex>> ExplicitStream<Simplex, O> {
    pub fn add_vertex(&mut self, vertex: usize, filtration_index: usize) -> Result<()> {
        self.add_element(Simplex::vertex(vertex), filtration_index)
    }

    pub fn add_simplex(&mut self, vertices: &[usize], filtration_index: usize) -> Result<()> {
        self.add_element(Simplex::try_from(vertices)?, filtration_index)
    }

    /// Closes the complex under taking faces.
    ///
    /// A missing face is added at the smallest filtration index of the
    /// simplices containing it; an existing face entering later than one of
    /// its cofaces is moved down to that coface's index.
    pub fn ensure_all_faces(&mut self) -> Result<()> {
        let simplices: Vec<(Simplex, usize)> = self
            .storage
            .entries()
            .map(|(simplex, index)| (simplex.clone(), index))
            .collect();

        for (simplex, index) in simplices {
            for face in simplex.proper_faces() {
                self.storage.lower_index(face, index)?;
            }
        }
        Ok(())
    }
}

impl<T, O> FilteredStream for ExplicitStream<T, O>
where
    T: ChainBasisElement + Clone + Eq + Hash + Debug,
    O: BasisOrder<T>,
{
    type Basis = T;

    fn finalize(&mut self) -> Result<()> {
        let order = &self.order;
        self.storage.finalize_by(|a, b| order.compare(a, b));
        Ok(())
    }

    fn is_finalized(&self) -> bool {
        self.storage.is_finalized()
    }

    fn iter(&self) -> Result<StreamIter<'_, T>> {
        Ok(Box::new(self.storage.elements()?.iter()))
    }

    fn dimension(&self, element: &T) -> usize {
        element.dimension()
    }

    fn filtration_index(&self, element: &T) -> Result<usize> {
        self.storage.filtration_index(element)
    }

    fn boundary(&self, element: &T) -> Result<Vec<T>> {
        self.storage.ensure_finalized()?;
        Ok(element.boundary())
    }

    fn boundary_coefficients(&self, element: &T) -> Result<Vec<i64>> {
        self.storage.ensure_finalized()?;
        Ok(element.boundary_coefficients())
    }

    fn compare_basis(&self, a: &T, b: &T) -> Ordering {
        self.order.compare(a, b)
    }

    fn size(&self) -> Result<usize> {
        self.storage.ensure_finalized()?;
        Ok(self.storage.len())
    }

    fn max_filtration_index(&self) -> Result<Option<usize>> {
        self.storage.max_filtration_index()
    }
}
