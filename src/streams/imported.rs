//! Streams imported from a foreign representation.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use super::{ChainBasisElement, FilteredStream, StreamIter};
use crate::error::{invalid, unknown, Result};

/// Read-only stream over elements produced by another system.
///
/// Elements are converted once, at construction, through an adapter that
/// yields each element with its filtration index. The foreign iteration order
/// is preserved and must already be non-decreasing in filtration index. The
/// stream is born finalized.
#[derive(Debug, Clone)]
pub struct ImportedStream<T>
where
    T: Clone + Eq + Hash + Debug,
{
    elements: Vec<T>,
    indices: HashMap<T, usize>,
}

impl<T> ImportedStream<T>
where
    T: ChainBasisElement + Clone + Eq + Hash + Debug + Ord,
{
    pub fn from_foreign<I, F, X>(foreign: I, mut adapter: F) -> Result<Self>
    where
        I: IntoIterator<Item = X>,
        F: FnMut(X) -> (T, usize),
    {
        Self::try_from_foreign(foreign, |item| Ok(adapter(item)))
    }

    /// Like [`ImportedStream::from_foreign`] with an adapter that can reject
    /// a foreign element; the first error aborts the import.
    pub fn try_from_foreign<I, F, X>(foreign: I, mut adapter: F) -> Result<Self>
    where
        I: IntoIterator<Item = X>,
        F: FnMut(X) -> Result<(T, usize)>,
    {
        let mut elements = Vec::new();
        let mut indices = HashMap::new();
        let mut previous = 0usize;

        for item in foreign {
            let (element, index) = adapter(item)?;
            if index < previous {
                return Err(invalid(format!(
                    "foreign stream is not filtered: {element:?} at {index} after {previous}"
                )));
            }
            if indices.insert(element.clone(), index).is_some() {
                return Err(invalid(format!("duplicate element {element:?}")));
            }
            previous = index;
            elements.push(element);
        }

        Ok(Self { elements, indices })
    }

    /// Imports `(element, index)` pairs directly.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, usize)>,
    {
        Self::from_foreign(pairs, |pair| pair)
    }
}

impl<T> FilteredStream for ImportedStream<T>
where
    T: ChainBasisElement + Clone + Eq + Hash + Debug + Ord,
{
    type Basis = T;

    fn finalize(&mut self) -> Result<()> {
        Ok(())
    }

    fn is_finalized(&self) -> bool {
        true
    }

    fn iter(&self) -> Result<StreamIter<'_, T>> {
        Ok(Box::new(self.elements.iter()))
    }

    fn dimension(&self, element: &T) -> usize {
        element.dimension()
    }

    fn filtration_index(&self, element: &T) -> Result<usize> {
        self.indices.get(element).copied().ok_or_else(|| unknown(element))
    }

    fn boundary(&self, element: &T) -> Result<Vec<T>> {
        Ok(element.boundary())
    }

    fn boundary_coefficients(&self, element: &T) -> Result<Vec<i64>> {
        Ok(element.boundary_coefficients())
    }

    fn compare_basis(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }

    fn size(&self) -> Result<usize> {
        Ok(self.elements.len())
    }

    fn max_filtration_index(&self) -> Result<Option<usize>> {
        Ok(self.indices.values().copied().max())
    }
}
