//! Error types for field, group and hashing operations.

use thiserror::Error;

/// Errors raised by the curve primitives.
///
/// All of them describe bad input; none indicate an internal fault.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CurveError {
    /// A scalar encoding had the wrong length or was not reduced below the group order.
    #[error("malformed scalar encoding")]
    Decode,
    /// A point encoding was off the curve, out of range, or used a non-canonical sign.
    #[error("invalid point encoding")]
    InvalidPoint,
    /// Inversion of zero without the zero-tolerant mode.
    #[error("division by zero")]
    DivisionByZero,
    /// Two sequences that must be parallel had different lengths.
    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    /// A Pippenger window width outside `1..=16`.
    #[error("invalid multiexp window width {0}")]
    InvalidWindow(usize),
    /// A hash input contained an absent value.
    #[error("missing hash input")]
    MissingHashInput,
}
