//! Vietoris-Rips filtrations of finite metric spaces.
//!
//! The Vietoris-Rips complex VR_r(X) contains [v_0, ..., v_k] iff
//! d(v_i, v_j) <= r for all i, j. Being the flag complex of its 1-skeleton,
//! it is built by thresholding pairwise distances and handing the weighted
//! graph to [`FlagComplexStream`].

use super::flag_complex::{FlagComplexStream, SkeletonSource, WeightedGraph};
use crate::error::{invalid, Result};
use crate::topology::{IncreasingLinearConverter, SearchableMetricSpace};

/// Number of filtration steps used when none is given.
pub const DEFAULT_NUM_DIVISIONS: usize = 20;

/// Parameters of a Vietoris-Rips construction.
#[derive(Debug, Clone, PartialEq)]
pub struct VietorisRipsConfig {
    /// Largest pairwise distance joined by an edge (inclusive).
    pub max_distance: f64,
    /// Largest simplex dimension generated.
    pub max_dimension: usize,
    /// Number of filtration steps over `[0, max_distance]`.
    pub num_divisions: usize,
}

impl Default for VietorisRipsConfig {
    fn default() -> Self {
        Self {
            max_distance: 1.0,
            max_dimension: 2,
            num_divisions: DEFAULT_NUM_DIVISIONS,
        }
    }
}

impl VietorisRipsConfig {
    pub fn new(max_distance: f64, max_dimension: usize) -> Self {
        Self {
            max_distance,
            max_dimension,
            ..Self::default()
        }
    }

    pub fn with_divisions(mut self, num_divisions: usize) -> Self {
        self.num_divisions = num_divisions;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.max_distance.is_finite() || self.max_distance < 0.0 {
            return Err(invalid(format!(
                "max_distance must be finite and non-negative, got {}",
                self.max_distance
            )));
        }
        if self.num_divisions == 0 {
            return Err(invalid("num_divisions must be positive"));
        }
        Ok(())
    }

    pub fn converter(&self) -> IncreasingLinearConverter {
        IncreasingLinearConverter::new(self.num_divisions, self.max_distance)
    }
}

/// 1-skeleton of VR_r(X): an edge for every pair at distance at most r,
/// weighted by that distance.
#[derive(Debug, Clone)]
pub struct RipsSkeleton<M> {
    metric: M,
    max_distance: f64,
}

impl<M: SearchableMetricSpace> RipsSkeleton<M> {
    pub fn new(metric: M, max_distance: f64) -> Self {
        Self {
            metric,
            max_distance,
        }
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }
}

impl<M: SearchableMetricSpace> SkeletonSource for RipsSkeleton<M> {
    fn construct_edges(&self) -> WeightedGraph {
        let n = self.metric.size();
        let mut graph = WeightedGraph::new(n);

        for i in 0..n {
            let point = self.metric.point(i);
            for j in self.metric.closed_neighborhood(&point, self.max_distance) {
                if i == j {
                    continue;
                }
                graph.add_edge(i, j, self.metric.distance(i, j));
            }
        }

        graph
    }
}

/// Vietoris-Rips stream over a metric space, discretised linearly.
pub type VietorisRipsStream<M> = FlagComplexStream<RipsSkeleton<M>, IncreasingLinearConverter>;

impl<M: SearchableMetricSpace> FlagComplexStream<RipsSkeleton<M>, IncreasingLinearConverter> {
    /// VR stream with [`DEFAULT_NUM_DIVISIONS`] filtration steps.
    pub fn new(metric: M, max_distance: f64, max_dimension: usize) -> Result<Self> {
        Self::from_config(metric, &VietorisRipsConfig::new(max_distance, max_dimension))
    }

    pub fn from_config(metric: M, config: &VietorisRipsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_skeleton(
            RipsSkeleton::new(metric, config.max_distance),
            config.max_dimension,
            config.converter(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streams::{skeleton_size, FilteredStream};
    use crate::topology::{point_cloud, DistanceMatrix, EuclideanMetricSpace, Simplex};
    use ndarray::array;

    #[test]
    fn collinear_points_below_endpoint_distance() {
        let space = EuclideanMetricSpace::new(point_cloud::line(3, 1.0));
        let mut stream = VietorisRipsStream::new(space, 1.5, 2).unwrap();
        stream.finalize().unwrap();

        assert_eq!(skeleton_size(&stream, 1).unwrap(), 2);
        assert_eq!(skeleton_size(&stream, 2).unwrap(), 0);
        assert!(stream.filtration_index(&Simplex::new(vec![0, 2])).is_err());
    }

    #[test]
    fn collinear_points_at_endpoint_distance() {
        let space = EuclideanMetricSpace::new(point_cloud::line(3, 1.0));
        let mut stream = VietorisRipsStream::new(space, 2.0, 2).unwrap();
        stream.finalize().unwrap();

        assert_eq!(skeleton_size(&stream, 1).unwrap(), 3);
        assert_eq!(skeleton_size(&stream, 2).unwrap(), 1);
        // 20 steps over [0, 2]: distance 1 enters at step 10, distance 2 at 20
        assert_eq!(stream.filtration_index(&Simplex::new(vec![0, 1])).unwrap(), 10);
        assert_eq!(stream.filtration_index(&Simplex::new(vec![0, 1, 2])).unwrap(), 20);
        assert!((stream.filtration_value(&Simplex::new(vec![0, 2])).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn distance_matrix_input() {
        let s2 = 2.0_f64.sqrt();
        let dm = DistanceMatrix::new(array![
            [0.0, 1.0, s2, 1.0],
            [1.0, 0.0, 1.0, s2],
            [s2, 1.0, 0.0, 1.0],
            [1.0, s2, 1.0, 0.0]
        ])
        .unwrap();
        let mut stream = VietorisRipsStream::new(dm, 1.2, 2).unwrap();
        stream.finalize().unwrap();
        assert_eq!(skeleton_size(&stream, 1).unwrap(), 4);
        assert_eq!(skeleton_size(&stream, 2).unwrap(), 0);
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let space = EuclideanMetricSpace::new(point_cloud::line(2, 1.0));
        assert!(VietorisRipsStream::new(space.clone(), -1.0, 1).is_err());
        let config = VietorisRipsConfig::new(1.0, 1).with_divisions(0);
        assert!(VietorisRipsStream::from_config(space, &config).is_err());
    }

    #[test]
    fn finalize_is_idempotent() {
        let space = EuclideanMetricSpace::new(point_cloud::line(4, 1.0));
        let mut stream = VietorisRipsStream::new(space, 3.0, 3).unwrap();
        stream.finalize().unwrap();
        let first: Vec<Simplex> = stream.iter().unwrap().cloned().collect();
        stream.finalize().unwrap();
        let second: Vec<Simplex> = stream.iter().unwrap().cloned().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 15);
    }
}
