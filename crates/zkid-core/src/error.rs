//! # Error Types — Core Error Hierarchy
//!
//! Defines the error types shared across the ZKID Stack. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! Protocol-specific failures (curve arithmetic, proof generation, cache
//! import, configuration) live in the crates that own them; this module
//! covers only the foundational concerns of canonicalization, hashing,
//! and timestamps.

use thiserror::Error;

/// Top-level error type for foundational operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Canonicalization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// A hash algorithm name not present in the registry.
    #[error("unknown hash algorithm: {0:?}")]
    UnknownHashAlgorithm(String),

    /// Timestamp parsing or construction failure.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    /// Scalars and public inputs must be strings or integers.
    #[error("float values are not permitted in canonical representations; use string or integer: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
