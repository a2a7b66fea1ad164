//! Algebraic layer: fields, formal sums and the free chain module.

mod chain_module;
mod field;
mod formal_sum;
mod modular;
mod rational;

pub use chain_module::ChainModule;
pub use field::{Field, OrderedField};
pub use formal_sum::FormalSum;
pub use modular::{ModularField, INVERSE_TABLE_LIMIT};
pub use rational::{Rational, RationalField};
