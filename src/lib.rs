//! # tda-persistence
//!
//! Persistent homology of filtered chain complexes over arbitrary coefficient
//! fields, computed by boundary-matrix column reduction.
//!
//! ## Theoretical Framework
//!
//! A filtered complex is a nested sequence K₀ ⊆ K₁ ⊆ … ⊆ Kₙ. Homology classes
//! appear and disappear as the filtration grows; the barcode records each class
//! as an interval `[birth, death)` of filtration indices. Long bars are robust
//! topological features, short bars are noise.
//!
//! ### Layers
//!
//! 1. **Algebra** ([`algebra`]): fields (Z/pZ, Q) and sparse formal sums
//!    forming a free module
//! 2. **Streams** ([`streams`]): filtered complexes presented as ordered
//!    sequences of generators, built explicitly, as flag / Vietoris-Rips
//!    complexes, or as tensor products
//! 3. **Homology** ([`homology`]): the pHcol reduction `R = ∂·V`, barcode
//!    extraction in absolute or relative polarity, optional representative
//!    cycles, and local search over homology classes
//!
//! ## Example
//!
//! ```
//! use tda_persistence::prelude::*;
//!
//! let mut stream = ExplicitSimplexStream::new();
//! stream.add_vertex(0, 0)?;
//! stream.add_vertex(1, 0)?;
//! stream.add_simplex(&[0, 1], 1)?;
//! stream.finalize()?;
//!
//! let barcodes = compute_persistence(&stream, ModularField::new(2)?, 1)?;
//! assert_eq!(barcodes.intervals(0).len(), 2);
//! # Ok::<(), tda_persistence::Error>(())
//! ```
//!
//! ## References
//!
//! - Edelsbrunner & Harer, "Computational Topology" (2010)
//! - Zomorodian & Carlsson, "Computing Persistent Homology" (2005)
//! - de Silva, Morozov & Vejdemo-Johansson, "Dualities in persistent
//!   (co)homology" (2011)

pub mod algebra;
pub mod error;
pub mod homology;
pub mod streams;
pub mod topology;

pub use error::{Error, Result};

pub use algebra::{ChainModule, Field, FormalSum, ModularField, OrderedField, Rational, RationalField};
pub use homology::{
    compute_persistence, AugmentedBarcodeCollection, BarcodeCollection, PersistenceConfig, PersistenceInterval,
    PersistentHomology, Polarity,
};
pub use streams::{
    ExplicitSimplexStream, ExplicitStream, FilteredStream, FlagComplexStream, ImportedStream, TensorStream,
    VietorisRipsConfig, VietorisRipsStream,
};
pub use topology::{DistanceMatrix, EuclideanMetricSpace, FiltrationConverter, IncreasingLinearConverter, Simplex};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::algebra::{ChainModule, Field, FormalSum, ModularField, OrderedField, RationalField};
    pub use crate::error::{Error, Result};
    pub use crate::homology::{
        compute_persistence, BarcodeCollection, PersistenceConfig, PersistenceInterval, PersistentHomology,
        Polarity,
    };
    pub use crate::streams::{
        ChainBasisElement, ExplicitSimplexStream, FilteredStream, TensorStream, VietorisRipsStream,
    };
    pub use crate::topology::{EuclideanMetricSpace, FiltrationConverter, SearchableMetricSpace, Simplex};
}
