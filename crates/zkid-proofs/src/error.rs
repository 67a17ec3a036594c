//! # Generation Error Taxonomy
//!
//! Every way proof generation can abort. Verification never uses these —
//! a verifier reports `{is_valid: false, reason}` as a value, since a
//! malformed or forged proof is an expected input, not an exceptional
//! condition.

use thiserror::Error;

use zkid_core::CanonicalizationError;
use zkid_curve::CurveError;

use crate::provider::ProviderError;

/// Proof generation failed. Nothing is cached on any of these paths.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Statement type has no generator behind it.
    #[error("unsupported statement type: {0:?}")]
    UnsupportedStatementType(String),

    /// A required statement input was absent.
    #[error("missing required input {name:?}")]
    MissingInput {
        /// Input key the statement should have carried.
        name: String,
    },

    /// A statement input was present but unusable.
    #[error("invalid input {name:?}: {reason}")]
    InvalidInput {
        /// Input key.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Set-membership generation for a value outside the public set.
    /// A proof of a false statement must never exist, so this aborts
    /// generation rather than producing anything.
    #[error("value is not a member of the public set")]
    ValueNotInSet,

    /// Range-proof generation for a value at or above the claimed range:
    /// the bit decomposition would exceed the available bits. The value
    /// itself is secret and is not echoed.
    #[error("value does not fit range {range}: bit decomposition exceeds available bits")]
    ValueOutOfRange {
        /// The claimed exclusive upper bound.
        range: u64,
    },

    /// The randomness collaborator failed.
    #[error("randomness source failed: {0}")]
    Provider(#[from] ProviderError),

    /// Curve arithmetic rejected an operand.
    #[error("curve error: {0}")]
    Curve(#[from] CurveError),

    /// Challenge-binding material failed to canonicalize.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}
