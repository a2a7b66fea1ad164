//! Flag complexes: the maximal simplicial complex on a weighted graph.
//!
//! A simplex [v_0, ..., v_k] belongs to the flag complex of a graph iff every
//! pair (v_i, v_j) is an edge. Its filtration level is the largest edge weight
//! among those pairs, so only the 1-skeleton ever needs geometric work; the
//! higher simplices are enumerated combinatorially.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::storage::SortedStorage;
use super::{FilteredStream, StreamIter};
use crate::error::Result;
use crate::topology::{FiltrationConverter, IncreasingLinearConverter, Simplex};

/// Undirected graph on vertices `0..n` with real edge weights.
#[derive(Debug, Clone, Default)]
pub struct WeightedGraph {
    adjacency: Vec<BTreeMap<usize, f64>>,
}

impl WeightedGraph {
    pub fn new(num_vertices: usize) -> Self {
        Self {
            adjacency: vec![BTreeMap::new(); num_vertices],
        }
    }

    /// Adds or reweights the edge `{i, j}`. Self loops are ignored.
    ///
    /// # Panics
    /// Panics if either endpoint is out of range.
    pub fn add_edge(&mut self, i: usize, j: usize, weight: f64) {
        if i == j {
            return;
        }
        self.adjacency[i].insert(j, weight);
        self.adjacency[j].insert(i, weight);
    }

    pub fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    pub fn num_edges(&self) -> usize {
        self.adjacency.iter().map(BTreeMap::len).sum::<usize>() / 2
    }

    pub fn weight(&self, i: usize, j: usize) -> Option<f64> {
        self.adjacency.get(i)?.get(&j).copied()
    }

    pub fn contains_edge(&self, i: usize, j: usize) -> bool {
        self.weight(i, j).is_some()
    }

    /// Neighbors of `i` with larger index, ascending.
    pub fn upper_neighbors(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency[i].range(i + 1..).map(|(&j, _)| j)
    }
}

/// Something that can produce the weighted 1-skeleton of a flag complex.
pub trait SkeletonSource {
    fn construct_edges(&self) -> WeightedGraph;
}

impl SkeletonSource for WeightedGraph {
    fn construct_edges(&self) -> WeightedGraph {
        self.clone()
    }
}

/// Filtered flag complex up to a maximum dimension.
///
/// The 1-skeleton is requested from the [`SkeletonSource`] at finalization,
/// then expanded into cliques. Vertices enter at index 0; every other simplex
/// at the converter's index for its largest edge weight.
#[derive(Debug, Clone)]
pub struct FlagComplexStream<S, C = IncreasingLinearConverter> {
    source: S,
    converter: C,
    max_dimension: usize,
    storage: SortedStorage<Simplex>,
}

impl<S, C> FlagComplexStream<S, C>
where
    S: SkeletonSource,
    C: FiltrationConverter,
{
    pub fn from_skeleton(source: S, max_dimension: usize, converter: C) -> Self {
        Self {
            source,
            converter,
            max_dimension,
            storage: SortedStorage::new(),
        }
    }

    pub fn max_dimension(&self) -> usize {
        self.max_dimension
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn construct(&mut self) -> Result<()> {
        let graph = self.source.construct_edges();
        if graph.num_vertices() > 0 && graph.num_edges() == 0 && self.max_dimension > 0 {
            warn!(
                vertices = graph.num_vertices(),
                "flag complex skeleton has no edges; only vertices will be generated"
            );
        }

        for v in 0..graph.num_vertices() {
            self.storage.add_element(Simplex::vertex(v), 0)?;
            let candidates: Vec<usize> = graph.upper_neighbors(v).collect();
            self.expand(&graph, vec![v], 0.0, &candidates)?;
        }

        debug!(
            vertices = graph.num_vertices(),
            edges = graph.num_edges(),
            simplices = self.storage.len(),
            max_dimension = self.max_dimension,
            "expanded flag complex"
        );
        Ok(())
    }

    /// Adds every coface of `vertices` formed from `candidates`, each of which
    /// is adjacent to all of `vertices` and larger than its last vertex.
    fn expand(
        &mut self,
        graph: &WeightedGraph,
        vertices: Vec<usize>,
        weight: f64,
        candidates: &[usize],
    ) -> Result<()> {
        if vertices.len() > self.max_dimension {
            return Ok(());
        }

        for (k, &w) in candidates.iter().enumerate() {
            let coface_weight = vertices
                .iter()
                .filter_map(|&u| graph.weight(u, w))
                .fold(weight, f64::max);

            let mut coface = vertices.clone();
            coface.push(w);
            self.storage.add_element(
                Simplex::new(coface.clone()),
                self.converter.filtration_index(coface_weight),
            )?;

            let next: Vec<usize> = candidates[k + 1..]
                .iter()
                .copied()
                .filter(|&x| graph.contains_edge(w, x))
                .collect();
            self.expand(graph, coface, coface_weight, &next)?;
        }
        Ok(())
    }
}

impl<S, C> FilteredStream for FlagComplexStream<S, C>
where
    S: SkeletonSource,
    C: FiltrationConverter,
{
    type Basis = Simplex;

    fn finalize(&mut self) -> Result<()> {
        if self.storage.is_finalized() {
            return Ok(());
        }
        self.construct()?;
        self.storage.finalize_by(Simplex::cmp);
        Ok(())
    }

    fn is_finalized(&self) -> bool {
        self.storage.is_finalized()
    }

    fn iter(&self) -> Result<StreamIter<'_, Simplex>> {
        Ok(Box::new(self.storage.elements()?.iter()))
    }

    fn dimension(&self, element: &Simplex) -> usize {
        element.dimension()
    }

    fn filtration_index(&self, element: &Simplex) -> Result<usize> {
        self.storage.filtration_index(element)
    }

    fn boundary(&self, element: &Simplex) -> Result<Vec<Simplex>> {
        self.storage.ensure_finalized()?;
        Ok(element.faces())
    }

    fn boundary_coefficients(&self, element: &Simplex) -> Result<Vec<i64>> {
        self.storage.ensure_finalized()?;
        Ok(element.boundary_signs())
    }

    fn compare_basis(&self, a: &Simplex, b: &Simplex) -> Ordering {
        a.cmp(b)
    }

    fn size(&self) -> Result<usize> {
        self.storage.ensure_finalized()?;
        Ok(self.storage.len())
    }

    fn max_filtration_index(&self) -> Result<Option<usize>> {
        self.storage.max_filtration_index()
    }

    fn filtration_value(&self, element: &Simplex) -> Result<f64> {
        Ok(self.converter.filtration_value(self.filtration_index(element)?))
    }
}
