//! Error types for curve and scalar-field operations.

use thiserror::Error;

/// Errors produced when decoding scalars or points from bytes, or when the
/// bounded rejection-sampling loop runs dry.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CurveError {
    /// A byte string had the wrong length for the value being decoded.
    #[error("expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    /// Scalar bytes encode an integer that is not reduced modulo the group
    /// order. Key and signature material is never reduced silently.
    #[error("scalar bytes are not canonical")]
    NonCanonicalScalar,

    /// The decoded base-field element is not the encoding of any point in
    /// the prime-order subgroup.
    #[error("bytes do not encode a valid curve point")]
    InvalidPoint,

    /// The zero-rejection loop exceeded its retry bound. With an honest
    /// entropy source this is unreachable.
    #[error("scalar sampling exhausted its retry bound")]
    SamplingFailed,
}
