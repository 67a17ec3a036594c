//! # Engine Configuration
//!
//! Owned, per-engine configuration: active curve, proof TTL, cache
//! behavior, and the operation-logging toggle. Partial updates are
//! validated in full before any field is applied — an update with an
//! unknown curve name fails fast and changes nothing.

use serde::{Deserialize, Serialize};

use zkid_curve::CurveId;

use crate::cache::DEFAULT_CACHE_CAPACITY;
use crate::error::ConfigurationError;

/// Default proof lifetime: 24 hours.
pub const DEFAULT_PROOF_TTL_SECS: u64 = 24 * 60 * 60;

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Active curve for newly generated proofs.
    pub curve: CurveId,
    /// Lifetime stamped onto new proofs, in seconds.
    pub proof_ttl_secs: u64,
    /// Whether generated proofs are cached.
    pub cache_enabled: bool,
    /// Cache capacity bound.
    pub cache_capacity: usize,
    /// Whether operation-level events (generation, verification) are
    /// logged at info level. Errors and evictions are always logged.
    pub verbose_logging: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            curve: CurveId::Secp256k1,
            proof_ttl_secs: DEFAULT_PROOF_TTL_SECS,
            cache_enabled: true,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            verbose_logging: false,
        }
    }
}

/// A partial configuration update. Unset fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigUpdate {
    /// New curve, by registry name.
    pub curve: Option<String>,
    /// New proof TTL in seconds.
    pub proof_ttl_secs: Option<u64>,
    /// Toggle proof caching.
    pub cache_enabled: Option<bool>,
    /// New cache capacity bound.
    pub cache_capacity: Option<usize>,
    /// Toggle operation-level logging.
    pub verbose_logging: Option<bool>,
}

impl EngineConfig {
    /// Apply a partial update.
    ///
    /// Every field is validated before any is written, so a rejected
    /// update leaves the configuration exactly as it was.
    ///
    /// # Errors
    ///
    /// - `ConfigurationError::UnknownCurve` — curve name not in the
    ///   registry. There is no fallback curve.
    /// - `ConfigurationError::InvalidTtl` — zero TTL.
    /// - `ConfigurationError::InvalidCapacity` — zero capacity.
    pub fn apply(&mut self, update: &ConfigUpdate) -> Result<(), ConfigurationError> {
        let curve = update
            .curve
            .as_deref()
            .map(CurveId::parse)
            .transpose()?;
        if update.proof_ttl_secs == Some(0) {
            return Err(ConfigurationError::InvalidTtl);
        }
        if update.cache_capacity == Some(0) {
            return Err(ConfigurationError::InvalidCapacity);
        }

        if let Some(curve) = curve {
            self.curve = curve;
        }
        if let Some(ttl) = update.proof_ttl_secs {
            self.proof_ttl_secs = ttl;
        }
        if let Some(enabled) = update.cache_enabled {
            self.cache_enabled = enabled;
        }
        if let Some(capacity) = update.cache_capacity {
            self.cache_capacity = capacity;
        }
        if let Some(verbose) = update.verbose_logging {
            self.verbose_logging = verbose;
        }
        Ok(())
    }
}
