//! Storage shared by the stream implementations.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::debug;

use crate::error::{unknown, Error, Result};

/// Generator → filtration index map that is sorted once, at finalization.
///
/// Adding an element twice keeps the last filtration index.
#[derive(Debug, Clone)]
pub struct SortedStorage<T> {
    indices: HashMap<T, usize>,
    order: Vec<T>,
    finalized: bool,
}

impl<T> SortedStorage<T>
where
    T: Clone + Eq + Hash + Debug,
{
    pub fn new() -> Self {
        Self {
            indices: HashMap::new(),
            order: Vec::new(),
            finalized: false,
        }
    }

    pub fn add_element(&mut self, element: T, filtration_index: usize) -> Result<()> {
        if self.finalized {
            return Err(Error::AlreadyFinalized);
        }
        self.indices.insert(element, filtration_index);
        Ok(())
    }

    /// Lowers the filtration index of an existing element; inserts it otherwise.
    pub(crate) fn lower_index(&mut self, element: T, filtration_index: usize) -> Result<()> {
        if self.finalized {
            return Err(Error::AlreadyFinalized);
        }
        self.indices
            .entry(element)
            .and_modify(|index| *index = (*index).min(filtration_index))
            .or_insert(filtration_index);
        Ok(())
    }

    /// Fixes the iteration order: filtration index ascending, then `compare`.
    /// Later calls do nothing.
    pub fn finalize_by<F>(&mut self, compare: F)
    where
        F: Fn(&T, &T) -> Ordering,
    {
        if self.finalized {
            return;
        }
        let mut order: Vec<T> = self.indices.keys().cloned().collect();
        order.sort_by(|a, b| self.indices[a].cmp(&self.indices[b]).then_with(|| compare(a, b)));
        self.order = order;
        self.finalized = true;
        debug!(elements = self.order.len(), "finalized stream storage");
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn elements(&self) -> Result<&[T]> {
        if !self.finalized {
            return Err(Error::NotFinalized);
        }
        Ok(&self.order)
    }

    pub fn filtration_index(&self, element: &T) -> Result<usize> {
        if !self.finalized {
            return Err(Error::NotFinalized);
        }
        self.indices.get(element).copied().ok_or_else(|| unknown(element))
    }

    pub fn contains(&self, element: &T) -> bool {
        self.indices.contains_key(element)
    }

    /// Entries inserted so far, in arbitrary order. Available in both states.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&T, usize)> {
        self.indices.iter().map(|(element, index)| (element, *index))
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn max_filtration_index(&self) -> Result<Option<usize>> {
        if !self.finalized {
            return Err(Error::NotFinalized);
        }
        Ok(self.indices.values().copied().max())
    }

    pub(crate) fn ensure_finalized(&self) -> Result<()> {
        if self.finalized {
            Ok(())
        } else {
            Err(Error::NotFinalized)
        }
    }
}

impl<T> Default for SortedStorage<T>
where
    T: Clone + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
