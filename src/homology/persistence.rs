//! Persistent homology by column reduction (pHcol).
//!
//! ## Mathematical Background
//!
//! Order the generators of a filtered complex as the stream presents them and
//! let `∂` be the boundary matrix in that basis. The algorithm computes
//! `R = ∂·V` with `V` invertible upper-triangular and `R` *reduced*: no two
//! nonempty columns share a pivot `low(R[i])`, the largest row in the column.
//!
//! Column `i` is reduced by repeatedly subtracting `c·R[j]`, where `j < i` is
//! the settled column with the same low and `c = R[i][low] / R[j][low]`, until
//! its low is unique or the column vanishes. The same operations are applied
//! to `V`.
//!
//! Reading the barcode off the decomposition:
//!
//! - `R[i] = 0`: generator `i` creates a class (a birth)
//! - `R[i] ≠ 0`: generator `i` kills the class born at `low(R[i])`, giving the
//!   interval `[index(low), index(i))`
//! - births never killed are essential classes
//!
//! ## Reference
//!
//! Zomorodian, Carlsson (2005). "Computing Persistent Homology".
//! Discrete & Computational Geometry.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::hash::Hash;

use tracing::debug;

use super::barcodes::{AugmentedBarcodeCollection, BarcodeCollection};
use super::column_store::{low, Column, ColumnStore};
use super::config::{PersistenceConfig, Polarity};
use crate::algebra::{ChainModule, Field, FormalSum};
use crate::error::{invariant, Error, Result};
use crate::streams::FilteredStream;

/// The `R = ∂·V` decomposition of a filtered complex.
///
/// Rows and columns are stream positions; the accessors translate them back
/// into generators.
#[derive(Debug, Clone)]
pub struct BoundaryDecomposition<T, E>
where
    T: Eq + Hash,
{
    generators: Vec<T>,
    dimensions: Vec<usize>,
    indices: Vec<usize>,
    positions: HashMap<T, usize>,
    r: HashMap<usize, Column<E>>,
    v: HashMap<usize, Column<E>>,
    reductions: usize,
}

impl<T, E> BoundaryDecomposition<T, E>
where
    T: Clone + Eq + Hash,
    E: Clone,
{
    /// Number of generators indexed (columns and the rows they reach).
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Generators that received a column, in stream order.
    pub fn columns(&self) -> impl Iterator<Item = &T> + '_ {
        self.column_positions().map(move |p| &self.generators[p])
    }

    pub fn num_columns(&self) -> usize {
        self.r.len()
    }

    /// Column additions performed during the reduction.
    pub fn num_reductions(&self) -> usize {
        self.reductions
    }

    /// Reduced column `R[g]`.
    pub fn reduced(&self, generator: &T) -> Option<FormalSum<E, T>> {
        let position = self.positions.get(generator)?;
        self.r.get(position).map(|c| self.relabel(c))
    }

    /// Change-of-basis column `V[g]`.
    pub fn change_of_basis(&self, generator: &T) -> Option<FormalSum<E, T>> {
        let position = self.positions.get(generator)?;
        self.v.get(position).map(|c| self.relabel(c))
    }

    /// Pivot of `R[g]`; `None` when the column is empty or absent.
    pub fn low(&self, generator: &T) -> Option<&T> {
        let position = self.positions.get(generator)?;
        let row = low(self.r.get(position)?)?;
        self.generators.get(row)
    }

    /// Whether every nonempty column has a distinct low.
    pub fn is_reduced(&self) -> bool {
        let mut seen = HashSet::new();
        self.r.values().filter_map(low).all(|row| seen.insert(row))
    }

    fn column_positions(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.generators.len()).filter(move |p| self.r.contains_key(p))
    }

    fn relabel(&self, column: &Column<E>) -> FormalSum<E, T> {
        column.map_generators(|&p| self.generators[p].clone())
    }
}

/// Persistence engine over a coefficient field.
#[derive(Debug, Clone)]
pub struct PersistentHomology<F: Field> {
    field: F,
    config: PersistenceConfig,
}

impl<F: Field> PersistentHomology<F> {
    pub fn new(field: F, config: PersistenceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { field, config })
    }

    /// Engine for dimensions `0..=max_dimension` with default settings.
    pub fn with_max_dimension(field: F, max_dimension: usize) -> Self {
        Self {
            field,
            config: PersistenceConfig::new(max_dimension),
        }
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn config(&self) -> &PersistenceConfig {
        &self.config
    }

    /// Reduces the boundary matrix of a finalized stream.
    ///
    /// Generators above `max_dimension + 1` are skipped; those below
    /// `min_dimension` are indexed as rows only.
    pub fn decompose<S>(&self, stream: &S) -> Result<BoundaryDecomposition<S::Basis, F::Element>>
    where
        S: FilteredStream + ?Sized,
    {
        let mut generators = Vec::new();
        let mut dimensions = Vec::new();
        let mut indices: Vec<usize> = Vec::new();
        let mut positions = HashMap::new();
        let mut store = ColumnStore::new(self.field.clone());

        for element in stream.iter()? {
            let dimension = stream.dimension(element);
            if !self.config.is_indexed_dimension(dimension) {
                continue;
            }
            let index = stream.filtration_index(element)?;
            if indices.last().is_some_and(|&previous| index < previous) {
                return Err(invariant(format!(
                    "{element:?} at index {index} follows a generator at a later index"
                )));
            }

            let position = generators.len();
            generators.push(element.clone());
            dimensions.push(dimension);
            indices.push(index);
            positions.insert(element.clone(), position);

            if !self.config.is_column_dimension(dimension) {
                continue;
            }
            let boundary = boundary_rows(stream, store.module(), element, &positions)?;
            store.insert_column(position, boundary)?;
        }

        debug!(
            generators = generators.len(),
            columns = store.num_columns(),
            reductions = store.num_reductions(),
            pivots = store.num_pivots(),
            "boundary matrix reduced"
        );

        let reductions = store.num_reductions();
        let (r, v) = store.into_columns();
        Ok(BoundaryDecomposition {
            generators,
            dimensions,
            indices,
            positions,
            r,
            v,
            reductions,
        })
    }

    /// Barcodes of a finalized stream.
    pub fn compute_intervals<S>(&self, stream: &S) -> Result<BarcodeCollection>
    where
        S: FilteredStream + ?Sized,
    {
        let decomposition = self.decompose(stream)?;
        Ok(self.extract(&decomposition, |_| ()).to_barcode_collection())
    }

    /// Barcodes whose intervals carry representative chains: `R[i]` for
    /// finite intervals in absolute polarity, `V[i]` otherwise.
    pub fn compute_augmented_intervals<S>(
        &self,
        stream: &S,
    ) -> Result<AugmentedBarcodeCollection<FormalSum<F::Element, S::Basis>>>
    where
        S: FilteredStream + ?Sized,
    {
        let decomposition = self.decompose(stream)?;
        Ok(self.extract(&decomposition, |column| decomposition.relabel(column)))
    }

    /// Barcode extraction; `representative` receives the column chosen by the
    /// polarity.
    fn extract<'d, T, G>(
        &self,
        decomposition: &'d BoundaryDecomposition<T, F::Element>,
        mut representative: impl FnMut(&'d Column<F::Element>) -> G,
    ) -> AugmentedBarcodeCollection<G>
    where
        T: Clone + Eq + Hash,
    {
        let d = decomposition;
        let mut barcodes = AugmentedBarcodeCollection::new();
        let mut births = BTreeSet::new();

        for position in d.column_positions() {
            let Some(r) = d.r.get(&position) else {
                continue;
            };
            match low(r) {
                None => {
                    if self.config.is_birth_dimension(d.dimensions[position]) {
                        births.insert(position);
                    }
                }
                Some(row) => {
                    births.remove(&row);
                    births.remove(&position);
                    let (start, end) = (d.indices[row], d.indices[position]);
                    if end.saturating_sub(start) < self.config.min_granularity {
                        continue;
                    }
                    match self.config.polarity {
                        Polarity::Absolute => {
                            barcodes.add_interval(d.dimensions[row], start, end, representative(r));
                        }
                        Polarity::Relative => {
                            if let Some(v) = d.v.get(&position) {
                                barcodes.add_interval(d.dimensions[position], start, end, representative(v));
                            }
                        }
                    }
                }
            }
        }

        for position in births {
            let Some(v) = d.v.get(&position) else {
                continue;
            };
            let (dimension, index) = (d.dimensions[position], d.indices[position]);
            match self.config.polarity {
                Polarity::Absolute => barcodes.add_right_infinite_interval(dimension, index, representative(v)),
                Polarity::Relative => barcodes.add_left_infinite_interval(dimension, index, representative(v)),
            }
        }
        barcodes
    }

    /// `∂g` as a chain over the stream's generators.
    pub fn boundary_chain<S>(&self, stream: &S, element: &S::Basis) -> Result<FormalSum<F::Element, S::Basis>>
    where
        S: FilteredStream + ?Sized,
    {
        let faces = stream.boundary(element)?;
        let coefficients: Vec<F::Element> = stream
            .boundary_coefficients(element)?
            .into_iter()
            .map(|c| self.field.value_of(c))
            .collect();
        ChainModule::new(self.field.clone()).create_sum_from(&coefficients, &faces)
    }

    /// Boundary of an arbitrary chain, extended linearly.
    pub fn boundary_of<S>(
        &self,
        stream: &S,
        chain: &FormalSum<F::Element, S::Basis>,
    ) -> Result<FormalSum<F::Element, S::Basis>>
    where
        S: FilteredStream + ?Sized,
    {
        let module = ChainModule::new(self.field.clone());
        let mut result = FormalSum::new();
        for (generator, coefficient) in chain {
            let boundary = self.boundary_chain(stream, generator)?;
            module.accumulate(&mut result, &boundary, coefficient);
        }
        Ok(result)
    }

    /// Boundaries of every generator of `dimension`, in stream order. For
    /// `dimension = k + 1` these span the homotopies between homologous
    /// `k`-cycles.
    pub fn boundary_columns<S>(&self, stream: &S, dimension: usize) -> Result<Vec<FormalSum<F::Element, S::Basis>>>
    where
        S: FilteredStream + ?Sized,
    {
        let mut columns = Vec::new();
        for element in stream.iter()? {
            if stream.dimension(element) == dimension {
                columns.push(self.boundary_chain(stream, element)?);
            }
        }
        Ok(columns)
    }
}

/// Barcodes of `stream` in dimensions `0..=max_dimension`.
pub fn compute_persistence<S, F>(stream: &S, field: F, max_dimension: usize) -> Result<BarcodeCollection>
where
    S: FilteredStream + ?Sized,
    F: Field,
{
    PersistentHomology::with_max_dimension(field, max_dimension).compute_intervals(stream)
}

/// Boundary of `element` as a column over the positions seen so far.
fn boundary_rows<S, F>(
    stream: &S,
    module: &ChainModule<F, usize>,
    element: &S::Basis,
    positions: &HashMap<S::Basis, usize>,
) -> Result<Column<F::Element>>
where
    S: FilteredStream + ?Sized,
    F: Field,
{
    let faces = stream.boundary(element)?;
    let incidences = stream.boundary_coefficients(element)?;
    if faces.len() != incidences.len() {
        return Err(Error::LengthMismatch {
            left: incidences.len(),
            right: faces.len(),
        });
    }

    let mut rows = Vec::with_capacity(faces.len());
    for face in &faces {
        match positions.get(face) {
            Some(&row) => rows.push(row),
            None => {
                // present in the stream but not yet seen: ordered after its coface
                stream.filtration_index(face)?;
                return Err(invariant(format!("face {face:?} does not precede {element:?}")));
            }
        }
    }
    let coefficients: Vec<F::Element> = incidences.into_iter().map(|c| module.field().value_of(c)).collect();
    module.create_sum_from(&coefficients, &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::{ModularField, RationalField};
    use crate::homology::PersistenceInterval;
    use crate::streams::ExplicitSimplexStream;
    use crate::topology::Simplex;

    fn z2() -> ModularField {
        ModularField::new(2).unwrap()
    }

    fn triangle(filled_at: Option<usize>) -> ExplicitSimplexStream {
        let mut stream = ExplicitSimplexStream::new();
        for v in 0..3 {
            stream.add_vertex(v, 0).unwrap();
        }
        stream.add_simplex(&[0, 1], 1).unwrap();
        stream.add_simplex(&[0, 2], 1).unwrap();
        stream.add_simplex(&[1, 2], 1).unwrap();
        if let Some(index) = filled_at {
            stream.add_simplex(&[0, 1, 2], index).unwrap();
        }
        stream.finalize().unwrap();
        stream
    }

    #[test]
    fn test_two_points() {
        let mut stream = ExplicitSimplexStream::new();
        stream.add_vertex(0, 0).unwrap();
        stream.add_vertex(1, 0).unwrap();
        stream.add_simplex(&[0, 1], 1).unwrap();
        stream.finalize().unwrap();

        let barcodes = compute_persistence(&stream, z2(), 1).unwrap();
        assert_eq!(barcodes.intervals(0), &[
            PersistenceInterval::finite(0, 1),
            PersistenceInterval::right_infinite(0),
        ]);
        assert!(barcodes.intervals(1).is_empty());
    }

    #[test]
    fn test_hollow_triangle() {
        let barcodes = compute_persistence(&triangle(None), z2(), 1).unwrap();
        assert_eq!(barcodes.intervals(0).len(), 3);
        assert_eq!(barcodes.intervals(0).iter().filter(|i| i.is_infinite()).count(), 1);
        assert_eq!(barcodes.intervals(1), &[PersistenceInterval::right_infinite(1)]);
    }

    #[test]
    fn test_filled_triangle() {
        // filled at the same index as its edges: the loop never persists
        let barcodes = compute_persistence(&triangle(Some(1)), z2(), 1).unwrap();
        assert!(barcodes.intervals(1).is_empty());

        let barcodes = compute_persistence(&triangle(Some(2)), z2(), 1).unwrap();
        assert_eq!(barcodes.intervals(1), &[PersistenceInterval::finite(1, 2)]);
        let finite_zero: Vec<_> = barcodes.intervals(0).iter().filter(|i| i.is_finite()).collect();
        assert_eq!(finite_zero.len(), 2);
        assert!(finite_zero.iter().all(|i| i.end() == Some(1)));
    }

    #[test]
    fn test_decomposition_is_reduced() {
        let stream = triangle(Some(2));
        let engine = PersistentHomology::new(RationalField::new(), PersistenceConfig::default()).unwrap();
        let decomposition = engine.decompose(&stream).unwrap();
        assert!(decomposition.is_reduced());
        assert_eq!(decomposition.num_columns(), 7);

        for generator in decomposition.columns() {
            let r = decomposition.reduced(generator).unwrap();
            let v = decomposition.change_of_basis(generator).unwrap();
            assert_eq!(engine.boundary_of(&stream, &v).unwrap(), r);
        }

        let edge = Simplex::new(vec![1, 2]);
        assert!(decomposition.reduced(&edge).unwrap().is_empty());
        assert_eq!(decomposition.low(&Simplex::new(vec![0, 1, 2])), Some(&edge));
    }

    #[test]
    fn test_generators_above_max_dimension_are_skipped() {
        let engine = PersistentHomology::with_max_dimension(z2(), 0);
        let decomposition = engine.decompose(&triangle(Some(2))).unwrap();
        assert_eq!(decomposition.num_columns(), 6);
        assert!(decomposition.reduced(&Simplex::new(vec![0, 1, 2])).is_none());

        let barcodes = engine.compute_intervals(&triangle(None)).unwrap();
        assert!(barcodes.intervals(1).is_empty());
        assert_eq!(barcodes.intervals(0).len(), 3);
    }

    #[test]
    fn test_granularity_filters_short_intervals() {
        let config = PersistenceConfig::default().with_min_granularity(2);
        let engine = PersistentHomology::new(z2(), config).unwrap();
        let barcodes = engine.compute_intervals(&triangle(Some(2))).unwrap();
        assert_eq!(barcodes.intervals(0), &[PersistenceInterval::right_infinite(0)]);
        assert!(barcodes.intervals(1).is_empty());

        let engine = PersistentHomology::new(z2(), PersistenceConfig::default().with_min_granularity(0)).unwrap();
        let mut stream = ExplicitSimplexStream::new();
        stream.add_vertex(0, 0).unwrap();
        stream.add_vertex(1, 0).unwrap();
        stream.add_simplex(&[0, 1], 0).unwrap();
        stream.finalize().unwrap();
        let barcodes = engine.compute_intervals(&stream).unwrap();
        assert_eq!(barcodes.intervals(0)[0], PersistenceInterval::finite(0, 0));
    }

    #[test]
    fn test_unbounded_granularity_keeps_only_essential_classes() {
        let mut stream = ExplicitSimplexStream::new();
        stream.add_vertex(0, 1).unwrap();
        stream.add_vertex(1, 1).unwrap();
        stream.add_simplex(&[0, 1], 3).unwrap();
        stream.finalize().unwrap();

        let config = PersistenceConfig::default().with_min_granularity(usize::MAX);
        let engine = PersistentHomology::new(z2(), config).unwrap();
        let barcodes = engine.compute_intervals(&stream).unwrap();
        assert_eq!(barcodes.intervals(0), &[PersistenceInterval::right_infinite(1)]);

        let engine = PersistentHomology::new(z2(), PersistenceConfig::new(usize::MAX)).unwrap();
        assert_eq!(engine.compute_intervals(&stream).unwrap().intervals(0).len(), 2);
    }

    #[test]
    fn test_augmented_representatives() {
        let engine = PersistentHomology::with_max_dimension(RationalField::new(), 1);
        let barcodes = engine.compute_augmented_intervals(&triangle(None)).unwrap();
        let loops = barcodes.intervals(1);
        assert_eq!(loops.len(), 1);
        let cycle = &loops[0].generator;
        assert_eq!(cycle.len(), 3);
        assert!(engine.boundary_of(&triangle(None), cycle).unwrap().is_empty());

        // finite dimension-0 intervals are represented by R[i] = ∂(edge combination)
        for augmented in barcodes.intervals(0).iter().filter(|a| a.interval.is_finite()) {
            assert_eq!(augmented.generator.len(), 2);
        }
    }

    #[test]
    fn test_relative_polarity() {
        let config = PersistenceConfig::default().with_polarity(Polarity::Relative);
        let engine = PersistentHomology::new(z2(), config).unwrap();
        let barcodes = engine.compute_intervals(&triangle(Some(2))).unwrap();
        // killing edges report in dimension 1, the filling triangle in dimension 2
        assert_eq!(barcodes.intervals(1).iter().filter(|i| i.is_finite()).count(), 2);
        assert_eq!(barcodes.intervals(2), &[PersistenceInterval::finite(1, 2)]);
        assert_eq!(barcodes.intervals(0), &[PersistenceInterval::left_infinite(0)]);
    }

    #[test]
    fn test_missing_face_is_reported() {
        let mut stream = ExplicitSimplexStream::new();
        stream.add_vertex(0, 0).unwrap();
        stream.add_simplex(&[0, 1], 1).unwrap();
        stream.finalize().unwrap();
        let err = compute_persistence(&stream, z2(), 1).unwrap_err();
        assert!(matches!(err, Error::UnknownGenerator(_)));
    }

    #[test]
    fn test_face_after_coface_is_reported() {
        let mut stream = ExplicitSimplexStream::new();
        stream.add_vertex(0, 0).unwrap();
        stream.add_vertex(1, 2).unwrap();
        stream.add_simplex(&[0, 1], 1).unwrap();
        stream.finalize().unwrap();
        let err = compute_persistence(&stream, z2(), 1).unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(_)));
    }

    #[test]
    fn test_unfinalized_stream() {
        let stream = ExplicitSimplexStream::new();
        assert_eq!(compute_persistence(&stream, z2(), 1).unwrap_err(), Error::NotFinalized);
    }

    #[test]
    fn test_empty_stream() {
        let mut stream = ExplicitSimplexStream::new();
        stream.finalize().unwrap();
        assert!(compute_persistence(&stream, z2(), 1).unwrap().is_empty());
    }

    #[test]
    fn test_boundary_columns() {
        let engine = PersistentHomology::with_max_dimension(RationalField::new(), 1);
        let stream = triangle(Some(2));
        let edges = engine.boundary_columns(&stream, 1).unwrap();
        assert_eq!(edges.len(), 3);
        assert!(edges.iter().all(|e| e.len() == 2));
        let faces = engine.boundary_columns(&stream, 2).unwrap();
        assert_eq!(faces.len(), 1);
        assert!(engine.boundary_of(&stream, &faces[0]).unwrap().is_empty());
    }
}
