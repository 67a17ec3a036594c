//! # Deterministic Test Provider
//!
//! A seeded `CryptoProvider` for unit and integration tests that need
//! reproducible transcripts. Not for production use — the seed is a
//! plain `u64`.

use std::sync::Mutex;

use num_bigint::RandBigInt;
use num_traits::Zero;
use rand::rngs::StdRng;
use rand::SeedableRng;

use zkid_core::{hash_bytes, HashAlgorithm};
use zkid_curve::{CurveParams, Scalar};

use crate::provider::{CryptoProvider, ProviderError};

/// Deterministic provider seeded from a `u64`. Hashing is the real sha2
/// family; only the randomness is reproducible.
#[derive(Debug)]
pub struct SeededProvider {
    rng: Mutex<StdRng>,
}

impl SeededProvider {
    /// Create a provider with a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl CryptoProvider for SeededProvider {
    fn random_scalar(&self, params: &CurveParams) -> Result<Scalar, ProviderError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| ProviderError("seeded rng poisoned".to_string()))?;
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
