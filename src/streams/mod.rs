//! Filtered chain complexes presented as streams of basis elements.
//!
//! A stream has two lifecycle states. While *building*, elements may be added
//! but nothing can be queried; [`FilteredStream::finalize`] freezes it, fixes
//! the iteration order (filtration index ascending, then the basis order), and
//! makes the full contract available. Finalizing twice is a no-op, and derived
//! streams finalize the streams they are built from.
//!
//! ## Implementations
//!
//! - [`ExplicitStream`]: elements inserted by hand
//! - [`FlagComplexStream`] / [`VietorisRipsStream`]: clique expansion of a
//!   weighted 1-skeleton
//! - [`TensorStream`]: tensor product of two streams
//! - [`ImportedStream`]: adapter over a foreign sequence of simplices

use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::Result;

mod explicit;
mod flag_complex;
mod imported;
mod storage;
mod tensor;
mod vietoris_rips;

pub use explicit::{ExplicitSimplexStream, ExplicitStream};
pub use flag_complex::{FlagComplexStream, SkeletonSource, WeightedGraph};
pub use imported::ImportedStream;
pub use storage::SortedStorage;
pub use tensor::TensorStream;
pub use vietoris_rips::{RipsSkeleton, VietorisRipsConfig, VietorisRipsStream};

/// Iterator over the basis elements of a finalized stream, in filtration order.
pub type StreamIter<'a, T> = Box<dyn Iterator<Item = &'a T> + 'a>;

/// A finite filtered chain complex.
pub trait FilteredStream {
    /// Basis element (generator) type.
    type Basis: Clone + Eq + Hash + Debug;

    /// Freezes the stream. Idempotent.
    fn finalize(&mut self) -> Result<()>;

    fn is_finalized(&self) -> bool;

    /// Basis elements in non-decreasing filtration order, ties broken by
    /// [`FilteredStream::compare_basis`]. Each call restarts from the beginning.
    fn iter(&self) -> Result<StreamIter<'_, Self::Basis>>;

    /// Dimension of a generator; a pure function of the generator.
    fn dimension(&self, element: &Self::Basis) -> usize;

    fn filtration_index(&self, element: &Self::Basis) -> Result<usize>;

    /// Codimension-1 faces of `element`.
    fn boundary(&self, element: &Self::Basis) -> Result<Vec<Self::Basis>>;

    /// Signed incidence of each face returned by [`FilteredStream::boundary`].
    fn boundary_coefficients(&self, element: &Self::Basis) -> Result<Vec<i64>>;

    /// Total order on generators used to break filtration ties.
    fn compare_basis(&self, a: &Self::Basis, b: &Self::Basis) -> Ordering;

    /// Number of generators.
    fn size(&self) -> Result<usize>;

    /// Largest filtration index, `None` for an empty stream.
    fn max_filtration_index(&self) -> Result<Option<usize>>;

    /// Real-valued filtration level of a generator; the index unless the
    /// stream was built from geometric data.
    fn filtration_value(&self, element: &Self::Basis) -> Result<f64> {
        Ok(self.filtration_index(element)? as f64)
    }
}

/// Generator types whose boundary is intrinsic, independent of any stream.
pub trait ChainBasisElement {
    fn dimension(&self) -> usize;

    fn boundary(&self) -> Vec<Self>
    where
        Self: Sized;

    /// Signed incidence coefficients, parallel to [`ChainBasisElement::boundary`].
    fn boundary_coefficients(&self) -> Vec<i64>;
}

/// A total order on basis elements.
pub trait BasisOrder<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The generator type's own [`Ord`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord> BasisOrder<T> for NaturalOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T, F> BasisOrder<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Number of generators of the given dimension.
pub fn skeleton_size<S: FilteredStream + ?Sized>(stream: &S, dimension: usize) -> Result<usize> {
    Ok(stream
        .iter()?
        .filter(|element| stream.dimension(element) == dimension)
        .count())
}

/// Every generator with its filtration index, in stream order.
pub fn collect_filtration<S: FilteredStream + ?Sized>(stream: &S) -> Result<Vec<(S::Basis, usize)>> {
    stream
        .iter()?
        .map(|element| Ok((element.clone(), stream.filtration_index(element)?)))
        .collect()
}
