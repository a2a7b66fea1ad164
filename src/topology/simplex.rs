//! Simplices as chain basis elements.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{invalid, Error, Result};
use crate::streams::ChainBasisElement;

/// An oriented simplex `[v_0, ..., v_k]` with strictly increasing vertices.
///
/// Ordered first by dimension, then lexicographically by vertex list, which is
/// the tie-break used inside a filtration index.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct Simplex {
    vertices: Vec<usize>,
}

impl Simplex {
    /// Creates a simplex from any vertex list; vertices are sorted and deduplicated.
    ///
    /// # Panics
    /// Panics on an empty vertex list. Use [`Simplex::try_new`] for untrusted input.
    pub fn new(vertices: impl Into<Vec<usize>>) -> Self {
        let mut vertices = vertices.into();
        assert!(!vertices.is_empty(), "a simplex needs at least one vertex");
        vertices.sort_unstable();
        vertices.dedup();
        Self { vertices }
    }

    /// Like [`Simplex::new`], but an empty vertex list is an
    /// [`Error::InvalidArgument`].
    pub fn try_new(vertices: impl Into<Vec<usize>>) -> Result<Self> {
        let vertices = vertices.into();
        if vertices.is_empty() {
            return Err(invalid("a simplex needs at least one vertex"));
        }
        Ok(Self::new(vertices))
    }

    pub fn vertex(index: usize) -> Self {
        Self {
            vertices: vec![index],
        }
    }

    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    pub fn dimension(&self) -> usize {
        self.vertices.len() - 1
    }

    /// The face obtained by deleting the `i`-th vertex.
    pub fn face(&self, i: usize) -> Simplex {
        let mut vertices = self.vertices.clone();
        vertices.remove(i);
        Simplex { vertices }
    }

    /// Faces of codimension 1, in the order matching [`Simplex::boundary_signs`].
    pub fn faces(&self) -> Vec<Simplex> {
        if self.vertices.len() < 2 {
            return Vec::new();
        }
        (0..self.vertices.len()).map(|i| self.face(i)).collect()
    }

    /// Alternating incidence `(-1)^i` of the `i`-th face.
    pub fn boundary_signs(&self) -> Vec<i64> {
        if self.vertices.len() < 2 {
            return Vec::new();
        }
        (0..self.vertices.len())
            .map(|i| if i % 2 == 0 { 1 } else { -1 })
            .collect()
    }

    /// All nonempty faces, of every dimension, excluding the simplex itself.
    pub fn proper_faces(&self) -> Vec<Simplex> {
        let n = self.vertices.len();
        let mut faces = Vec::new();
        // bitmasks over the vertex list; the full mask is the simplex itself
        for mask in 1u64..((1u64 << n) - 1) {
            let vertices = (0..n)
                .filter(|bit| mask & (1 << bit) != 0)
                .map(|bit| self.vertices[bit])
                .collect();
            faces.push(Simplex { vertices });
        }
        faces
    }
}

impl ChainBasisElement for Simplex {
    fn dimension(&self) -> usize {
        Simplex::dimension(self)
    }

    fn boundary(&self) -> Vec<Self> {
        self.faces()
    }

    fn boundary_coefficients(&self) -> Vec<i64> {
        self.boundary_signs()
    }
}

impl Ord for Simplex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dimension()
            .cmp(&other.dimension())
            .then_with(|| self.vertices.cmp(&other.vertices))
    }
}

impl PartialOrd for Simplex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Simplex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.vertices.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

impl TryFrom<&[usize]> for Simplex {
    type Error = Error;

    fn try_from(vertices: &[usize]) -> Result<Self> {
        Simplex::try_new(vertices.to_vec())
    }
}
