//! # Engine Error Types
//!
//! Cache-import and configuration failures. Generation failures use
//! `zkid_proofs::GenerationError`; verification failures are values
//! (`VerificationOutcome`), never errors.

use thiserror::Error;

use zkid_curve::CurveError;

/// A cache import payload was rejected. The existing cache is untouched
/// on every one of these paths.
#[derive(Error, Debug)]
pub enum CacheImportError {
    /// Payload failed structural validation.
    #[error("malformed cache payload: {0}")]
    Malformed(String),

    /// Two entries in the payload share an id.
    #[error("duplicate proof id in payload: {0}")]
    DuplicateId(String),

    /// An entry's expiry is not after its issuance timestamp.
    #[error("proof {0} has expiry at or before issuance")]
    InvalidExpiry(String),
}

/// Engine configuration was rejected. Nothing is applied on failure —
/// a partial update never leaves the engine half-configured.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// Curve name not in the registry. No silent default substitution.
    #[error(transparent)]
    UnknownCurve(#[from] CurveError),

    /// A zero TTL would mint proofs that are expired at issuance.
    #[error("proof TTL must be at least 1 second")]
    InvalidTtl,

    /// A zero-capacity cache cannot hold the proof it just admitted.
    #[error("cache capacity must be at least 1")]
    InvalidCapacity,
}
