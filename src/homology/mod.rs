//! Persistent homology of filtered streams.
//!
//! - [`PersistentHomology`]: the pHcol reduction and barcode extraction
//! - [`BarcodeCollection`] / [`AugmentedBarcodeCollection`]: results, the
//!   latter carrying representative chains
//! - [`optimization`]: searching a homology class for a small representative

mod barcodes;
mod column_store;
mod config;
pub mod optimization;
mod persistence;

pub use barcodes::{AugmentedBarcodeCollection, AugmentedInterval, BarcodeCollection, PersistenceInterval};
pub use column_store::{Column, ColumnStore};
pub use config::{PersistenceConfig, Polarity};
pub use optimization::{greedy_optimization, randomized_optimization, OptimizationResult};
pub use persistence::{compute_persistence, BoundaryDecomposition, PersistentHomology};
