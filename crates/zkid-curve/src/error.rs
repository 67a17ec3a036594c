//! # Curve Error Types
//!
//! Structured errors for registry lookup, point/scalar decoding, and group
//! arithmetic. Proof verifiers treat every variant here as "proof invalid",
//! never as a panic.

use thiserror::Error;

/// Error in curve registry lookup or group arithmetic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurveError {
    /// Curve name not present in the registry. Configuration must fail
    /// fast on this — substituting a different curve's parameters would
    /// change which group a caller is actually proving in.
    #[error("unknown curve: {0:?}")]
    UnknownCurve(String),

    /// A point that does not satisfy the curve equation was passed to a
    /// group operation.
    #[error("point not on curve {curve}: {point}")]
    PointNotOnCurve {
        /// Registry name of the active curve.
        curve: &'static str,
        /// Encoded form of the offending point.
        point: String,
    },

    /// A point encoding that could not be parsed.
    #[error("invalid point encoding: {0}")]
    InvalidPointEncoding(String),

    /// A scalar encoding that could not be parsed.
    #[error("invalid scalar encoding: {0}")]
    InvalidScalarEncoding(String),

    /// Try-and-increment ran out of candidates deriving a generator from
    /// a domain tag. Practically unreachable for the registry curves.
    #[error("hash-to-point failed for domain tag {0:?}")]
    HashToPointFailed(String),
}
