//! Geometric and combinatorial building blocks for filtered complexes.
//!
//! - `simplex`: oriented simplices with alternating-sign boundaries
//! - `filtration`: discretisation of distances into filtration indices
//! - `metric`: finite metric spaces with closed-ball queries
//! - `point_cloud`: seeded sample point clouds
//!
//! ## Mathematical Background
//!
//! For a point cloud X we build the filtration VR_ε(X) indexed by a scale
//! parameter ε. Only the 1-skeleton needs distance computations; higher
//! simplices follow combinatorially from it.

mod filtration;
mod metric;
pub mod point_cloud;
mod simplex;

pub use filtration::{FiltrationConverter, IncreasingLinearConverter, IntegerConverter};
pub use metric::{DistanceMatrix, EuclideanMetricSpace, SearchableMetricSpace};
pub use simplex::Simplex;
