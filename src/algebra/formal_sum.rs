//! Sparse formal sums `r_1 m_1 + ... + r_k m_k`.

use std::collections::hash_map;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// A finite-support map from generators to coefficients.
///
/// The sum is unaware of coefficient arithmetic: [`FormalSum::put`] replaces
/// any existing coefficient. Arithmetic that combines terms, and that keeps
/// explicit zeros out of the support, lives in
/// [`ChainModule`](super::ChainModule).
#[derive(Clone, PartialEq, Eq)]
pub struct FormalSum<R, M>
where
    M: Eq + Hash,
{
    terms: HashMap<M, R>,
}

impl<R, M> FormalSum<R, M>
where
    M: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            terms: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            terms: HashMap::with_capacity(capacity),
        }
    }

    /// Sets the coefficient of `generator`, replacing any previous one.
    pub fn put(&mut self, coefficient: R, generator: M) {
        self.terms.insert(generator, coefficient);
    }

    pub fn remove(&mut self, generator: &M) -> Option<R> {
        self.terms.remove(generator)
    }

    /// Coefficient of `generator`, `None` meaning zero.
    pub fn coefficient(&self, generator: &M) -> Option<&R> {
        self.terms.get(generator)
    }

    pub fn contains(&self, generator: &M) -> bool {
        self.terms.contains_key(generator)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, M, R> {
        self.terms.iter()
    }

    pub fn generators(&self) -> hash_map::Keys<'_, M, R> {
        self.terms.keys()
    }

    pub(crate) fn entry(&mut self, generator: M) -> hash_map::Entry<'_, M, R> {
        self.terms.entry(generator)
    }

    /// Relabels every generator through `f`. `f` must be injective on the support.
    pub fn map_generators<N, F>(&self, mut f: F) -> FormalSum<R, N>
    where
        R: Clone,
        N: Eq + Hash,
        F: FnMut(&M) -> N,
    {
        FormalSum {
            terms: self.terms.iter().map(|(m, r)| (f(m), r.clone())).collect(),
        }
    }
}

impl<R, M> Default for FormalSum<R, M>
where
    M: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<R, M> FromIterator<(R, M)> for FormalSum<R, M>
where
    M: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (R, M)>>(iter: I) -> Self {
        let mut sum = Self::new();
        for (r, m) in iter {
            sum.put(r, m);
        }
        sum
    }
}

impl<'a, R, M> IntoIterator for &'a FormalSum<R, M>
where
    M: Eq + Hash,
{
    type Item = (&'a M, &'a R);
    type IntoIter = hash_map::Iter<'a, M, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

impl<R, M> fmt::Debug for FormalSum<R, M>
where
    R: fmt::Debug,
    M: Eq + Hash + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.terms.iter().map(|(m, r)| (m, r)))
            .finish()
    }
}

impl<R, M> fmt::Display for FormalSum<R, M>
where
    R: fmt::Display,
    M: Eq + Hash + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (index, (m, r)) in self.terms.iter().enumerate() {
            if index > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{r} {m}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_replaces_instead_of_adding() {
        let mut sum: FormalSum<i64, &str> = FormalSum::new();
        sum.put(2, "a");
        sum.put(3, "a");
        assert_eq!(sum.len(), 1);
        assert_eq!(sum.coefficient(&"a"), Some(&3));
        assert_eq!(sum.coefficient(&"b"), None);
    }

    #[test]
    fn display_of_empty_sum_is_zero() {
        let sum: FormalSum<i64, u32> = FormalSum::new();
        assert_eq!(sum.to_string(), "0");
        let single: FormalSum<i64, u32> = [(4, 7)].into_iter().collect();
        assert_eq!(single.to_string(), "4 7");
    }
}
