//! # CryptoProvider — Randomness & Hashing Collaborator
//!
//! The engine requires exactly two primitives from its environment: a
//! uniform random scalar in the active group, and a digest under a named
//! algorithm. Both arrive through this trait, injected at engine
//! construction — protocol code never reaches for ambient entropy.
//!
//! ## Security Invariant
//!
//! `random_scalar` must be backed by a cryptographically secure source
//! and return values uniform in `[1, n-1]`. Zero is excluded: a zero
//! nonce would publish the commitment `g^0` and a zero secret scalar
//! proves nothing. The default implementation uses the operating system
//! RNG with rejection sampling — no modulo bias.

use num_bigint::RandBigInt;
use num_traits::Zero;
use thiserror::Error;

use zkid_core::{hash_bytes, HashAlgorithm};
use zkid_curve::{CurveParams, Scalar};

/// The randomness/hashing collaborator failed.
#[derive(Error, Debug, Clone)]
#[error("crypto provider failure: {0}")]
pub struct ProviderError(pub String);

/// Randomness and hashing, as supplied by the host environment.
///
/// `Send + Sync` so one provider can back concurrent proof generations.
pub trait CryptoProvider: Send + Sync {
    /// A uniform random scalar in `[1, n-1]` for the given curve.
    fn random_scalar(&self, params: &CurveParams) -> Result<Scalar, ProviderError>;

    /// Digest `data` under the named algorithm.
    fn hash(&self, algorithm: HashAlgorithm, data: &[u8]) -> Vec<u8>;
}

/// Default provider: operating-system RNG + the sha2 digest family.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRngProvider;

impl CryptoProvider for OsRngProvider {
    fn random_scalar(&self, params: &CurveParams) -> Result<Scalar, ProviderError> {
        let mut rng = rand::rngs::OsRng;
        // Rejection sampling: gen_biguint_below is uniform in [0, n);
        // retry the (negligible-probability) zero draw.
        loop {
            let candidate = rng.gen_biguint_below(&params.n);
            if !candidate.is_zero() {
                return Ok(Scalar::reduce(candidate, &params.n));
            }
        }
    }

    fn hash(&self, algorithm: HashAlgorithm, data: &[u8]) -> Vec<u8> {
        hash_bytes(algorithm, data)
    }
}
