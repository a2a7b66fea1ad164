//! Error type shared by the algebra, stream and homology layers.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A query that needs a frozen stream was made while it was still building.
    #[error("stream is not finalized")]
    NotFinalized,
    /// An insertion was attempted after the stream was frozen.
    #[error("stream is already finalized")]
    AlreadyFinalized,
    #[error("division by zero")]
    DivisionByZero,
    /// Modular fields need a positive prime characteristic.
    #[error("invalid field characteristic: {0}")]
    InvalidCharacteristic(u64),
    #[error("length mismatch: {left} coefficients for {right} generators")]
    LengthMismatch { left: usize, right: usize },
    #[error("boundary element of dimension {found} for a generator of dimension {expected_parent}")]
    DimensionMismatch { expected_parent: usize, found: usize },
    #[error("generator not present in stream: {0}")]
    UnknownGenerator(String),
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub(crate) fn unknown<T: std::fmt::Debug>(generator: &T) -> Error {
    Error::UnknownGenerator(format!("{generator:?}"))
}

pub(crate) fn invariant(message: impl Into<String>) -> Error {
    Error::InvariantViolation(message.into())
}

pub(crate) fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidArgument(message.into())
}
