//! Error types for proving and verification.

use edwards::CurveError;
use thiserror::Error;

/// Errors that prevent a proof from being built, or that make an input
/// structurally unusable.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProofError {
    /// The decomposition base must be at least 2, the digit count at least 1,
    /// and `n^m` must not exceed [`MAX_RING_SIZE`](crate::MAX_RING_SIZE).
    #[error("invalid parameters: base {n}, digits {m}")]
    InvalidParameters { n: usize, m: usize },

    /// A ring, proof vector or byte string had the wrong length.
    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// The witness does not open the ring member at its claimed index, or a
    /// spend witness repeats an index or does not open its outputs.
    #[error("witness does not open the ring member at its index")]
    InvalidWitness,

    /// A spend needs between one and `ring_size` distinct inputs.
    #[error("invalid spend count {spends} for a ring of {ring_size}")]
    InvalidSpendCount { spends: usize, ring_size: usize },

    /// Input amounts do not sum to output amounts.
    #[error("input and output amounts do not balance")]
    Unbalanced,

    /// An encoding or arithmetic error from the curve layer.
    #[error(transparent)]
    Curve(#[from] CurveError),
}

/// Outcome of a rejected verification.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// At least one verification equation does not hold.
    #[error("proof verification failed")]
    Failed,

    /// The inputs could not be checked at all.
    #[error("malformed input: {0}")]
    Malformed(#[from] ProofError),
}

impl From<CurveError> for VerifyError {
    fn from(err: CurveError) -> Self {
        VerifyError::Malformed(ProofError::Curve(err))
    }
}
