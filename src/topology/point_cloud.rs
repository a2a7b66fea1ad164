//! Sample point clouds for experiments and tests.
//!
//! All generators take the random source explicitly so that results are
//! reproducible from a seed.

use std::f64::consts::PI;

use ndarray::Array2;
use rand::Rng;
use rand_distr::{Distribution, Normal, StandardNormal, Uniform};

/// `n` points evenly spaced on a circle of the given radius, each perturbed by
/// isotropic Gaussian noise with standard deviation `noise`.
pub fn circle<R: Rng + ?Sized>(n: usize, radius: f64, noise: f64, rng: &mut R) -> Array2<f64> {
    let jitter = Normal::new(0.0, noise.max(0.0)).ok();
    let mut points = Array2::<f64>::zeros((n, 2));

    for i in 0..n {
        let theta = 2.0 * PI * (i as f64) / (n.max(1) as f64);
        let (dx, dy) = match &jitter {
            Some(normal) => (normal.sample(rng), normal.sample(rng)),
            None => (0.0, 0.0),
        };
        points[[i, 0]] = radius * theta.cos() + dx;
        points[[i, 1]] = radius * theta.sin() + dy;
    }

    points
}

/// `n` points drawn uniformly from the unit sphere S^{dim - 1} in R^dim.
///
/// Uses normalised standard Gaussian vectors.
pub fn sphere<R: Rng + ?Sized>(n: usize, dim: usize, rng: &mut R) -> Array2<f64> {
    let mut points = Array2::<f64>::zeros((n, dim));

    for i in 0..n {
        let mut norm_sq = 0.0;
        for d in 0..dim {
            let x: f64 = StandardNormal.sample(rng);
            points[[i, d]] = x;
            norm_sq += x * x;
        }
        let norm = norm_sq.sqrt();
        if norm > 0.0 {
            for d in 0..dim {
                points[[i, d]] /= norm;
            }
        }
    }

    points
}

/// `n` points uniform in the box `[0, side]^dim`.
pub fn uniform_box<R: Rng + ?Sized>(n: usize, dim: usize, side: f64, rng: &mut R) -> Array2<f64> {
    let uniform = Uniform::new_inclusive(0.0, side);
    Array2::from_shape_fn((n, dim), |_| uniform.sample(rng))
}

/// The `n` vertices `0, 1, ..., n - 1` on the real line.
pub fn line(n: usize, spacing: f64) -> Array2<f64> {
    Array2::from_shape_fn((n, 1), |(i, _)| i as f64 * spacing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn noiseless_circle_lies_on_circle() {
        let mut rng = StdRng::seed_from_u64(7);
        let pts = circle(12, 2.0, 0.0, &mut rng);
        for row in pts.rows() {
            let r = (row[0] * row[0] + row[1] * row[1]).sqrt();
            assert!((r - 2.0).abs() < 1e-10);
        }
    }

    #[test]
    fn sphere_points_have_unit_norm() {
        let mut rng = StdRng::seed_from_u64(11);
        let pts = sphere(25, 3, &mut rng);
        assert_eq!(pts.dim(), (25, 3));
        for row in pts.rows() {
            let r: f64 = row.iter().map(|x| x * x).sum::<f64>().sqrt();
            assert!((r - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = uniform_box(10, 2, 1.0, &mut StdRng::seed_from_u64(3));
        let b = uniform_box(10, 2, 1.0, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
        assert!(a.iter().all(|&x| (0.0..=1.0).contains(&x)));
    }
}
