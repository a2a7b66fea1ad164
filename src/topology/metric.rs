//! Finite metric spaces with closed-ball neighborhood search.
//!
//! The Vietoris-Rips construction only needs pairwise distances between
//! indexed points and the set of points within a radius of a given point.

use ndarray::{Array1, Array2, ArrayView1};

use crate::error::{invalid, Result};

/// A finite, indexed metric space supporting neighborhood queries.
pub trait SearchableMetricSpace {
    type Point;

    /// Number of points.
    fn size(&self) -> usize;

    fn point(&self, index: usize) -> Self::Point;

    /// Distance between the points at two indices.
    fn distance(&self, i: usize, j: usize) -> f64;

    /// Indices of every point `q` with `d(point, q) <= radius`.
    fn closed_neighborhood(&self, point: &Self::Point, radius: f64) -> Vec<usize>;
}

/// Point cloud in R^n, one point per row, under the Euclidean metric.
#[derive(Debug, Clone)]
pub struct EuclideanMetricSpace {
    points: Array2<f64>,
}

impl EuclideanMetricSpace {
    pub fn new(points: Array2<f64>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &Array2<f64> {
        &self.points
    }

    pub fn ambient_dimension(&self) -> usize {
        self.points.ncols()
    }

    /// Full pairwise distance matrix.
    pub fn distance_matrix(&self) -> Array2<f64> {
        let n = self.points.nrows();
        let mut dm = Array2::<f64>::zeros((n, n));

        for i in 0..n {
            for j in i + 1..n {
                let dist = euclidean(self.points.row(i), self.points.row(j));
                dm[[i, j]] = dist;
                dm[[j, i]] = dist;
            }
        }

        dm
    }
}

fn euclidean(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

impl SearchableMetricSpace for EuclideanMetricSpace {
    type Point = Array1<f64>;

    fn size(&self) -> usize {
        self.points.nrows()
    }

    fn point(&self, index: usize) -> Array1<f64> {
        self.points.row(index).to_owned()
    }

    fn distance(&self, i: usize, j: usize) -> f64 {
        euclidean(self.points.row(i), self.points.row(j))
    }

    fn closed_neighborhood(&self, point: &Array1<f64>, radius: f64) -> Vec<usize> {
        (0..self.points.nrows())
            .filter(|&j| euclidean(point.view(), self.points.row(j)) <= radius)
            .collect()
    }
}

/// Metric space given directly by a precomputed symmetric distance matrix.
///
/// Points are their own indices.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    distances: Array2<f64>,
}

impl DistanceMatrix {
    /// Validates that the matrix is square, symmetric, non-negative and has a
    /// zero diagonal.
    pub fn new(distances: Array2<f64>) -> Result<Self> {
        let n = distances.nrows();
        if distances.ncols() != n {
            return Err(invalid(format!(
                "distance matrix must be square, got {}x{}",
                n,
                distances.ncols()
            )));
        }
        for i in 0..n {
            if distances[[i, i]] != 0.0 {
                return Err(invalid(format!("nonzero diagonal entry at {i}")));
            }
            for j in i + 1..n {
                let d = distances[[i, j]];
                if d < 0.0 || d.is_nan() || d != distances[[j, i]] {
                    return Err(invalid(format!("entry ({i}, {j}) is not a symmetric distance")));
                }
            }
        }
        Ok(Self { distances })
    }

    pub fn from_points(points: &Array2<f64>) -> Self {
        Self {
            distances: EuclideanMetricSpace::new(points.clone()).distance_matrix(),
        }
    }

    pub fn matrix(&self) -> &Array2<f64> {
        &self.distances
    }
}

impl SearchableMetricSpace for DistanceMatrix {
    type Point = usize;

    fn size(&self) -> usize {
        self.distances.nrows()
    }

    fn point(&self, index: usize) -> usize {
        index
    }

    fn distance(&self, i: usize, j: usize) -> f64 {
        self.distances[[i, j]]
    }

    fn closed_neighborhood(&self, point: &usize, radius: f64) -> Vec<usize> {
        self.distances
            .row(*point)
            .iter()
            .enumerate()
            .filter(|(_, d)| **d <= radius)
            .map(|(j, _)| j)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn collinear_neighborhoods_are_closed_balls() {
        let space = EuclideanMetricSpace::new(array![[0.0], [1.0], [2.0]]);
        assert_eq!(space.closed_neighborhood(&space.point(0), 1.0), vec![0, 1]);
        assert_eq!(space.closed_neighborhood(&space.point(1), 1.0), vec![0, 1, 2]);
        assert_eq!(space.closed_neighborhood(&space.point(0), 0.99), vec![0]);
        assert!((space.distance(0, 2) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn distance_matrix_matches_pairwise_distances() {
        let points = array![[0.0, 0.0], [3.0, 4.0], [0.0, 1.0]];
        let space = EuclideanMetricSpace::new(points.clone());
        let dm = DistanceMatrix::from_points(&points);
        for i in 0..3 {
            for j in 0..3 {
                assert!((dm.distance(i, j) - space.distance(i, j)).abs() < 1e-12);
            }
        }
        assert!((dm.distance(0, 1) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_asymmetric_matrix() {
        let bad = array![[0.0, 1.0], [2.0, 0.0]];
        assert!(DistanceMatrix::new(bad).is_err());
        let not_square = array![[0.0, 1.0]];
        assert!(DistanceMatrix::new(not_square).is_err());
    }
}
