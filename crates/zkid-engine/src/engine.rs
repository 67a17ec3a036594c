//! # ZkEngine — Orchestrator
//!
//! The engine validates a statement, dispatches it to the matching
//! generator, stamps identity and lifetime metadata, and optionally
//! caches the result. Verification runs the other direction: expiry
//! first, then every component relevant to the proof's statement type.
//!
//! ## Design Notes
//!
//! - No global state. The engine owns its cache and configuration, and
//!   receives its randomness/hashing collaborator at construction.
//! - A proof is valid only when **all** of its components validate:
//!   the algebraic equation(s) and the Fiat-Shamir re-check. Accepting
//!   "any component validates" would let a forger attach one honest
//!   record to an otherwise bogus proof.
//! - Nothing is cached on any failure path: a caller can never retrieve
//!   a proof that was not successfully generated.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use zkid_core::{digest_hex, CanonicalBytes, Timestamp};
use zkid_curve::{CurveGroup, Scalar};
use zkid_proofs::{
    CryptoProvider, GenerationError, OsRngProvider, PedersenGenerator, SchnorrGenerator,
};

use crate::cache::{CacheExport, CacheStats, ProofCache};
use crate::config::{ConfigUpdate, EngineConfig};
use crate::error::{CacheImportError, ConfigurationError};
use crate::proof::{ProofComponents, ProofId, SecurityLevel, ZkProof};
use crate::statement::{StatementType, ZkStatement};

/// Range bound used by the age claim factory: the age offset must fit
/// in seven bits, which covers every human age.
const AGE_OFFSET_RANGE: u64 = 128;

/// Per-call generation options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Override the engine's security level (and with it the curve).
    pub security_level: Option<SecurityLevel>,
    /// Override the configured proof TTL, in seconds.
    pub ttl_secs: Option<u64>,
}

/// The result of verifying a proof. Verification never throws — every
/// failure mode, including malformed input, lands here as a value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationOutcome {
    /// Whether every relevant component validated.
    pub is_valid: bool,
    /// Populated when invalid: why.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Per-component verdicts.
    pub components: BTreeMap<String, bool>,
}

impl VerificationOutcome {
    fn invalid(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            reason: Some(reason.into()),
            components: BTreeMap::new(),
        }
    }

    fn from_components(components: BTreeMap<String, bool>) -> Self {
        let failed: Vec<&str> = components
            .iter()
            .filter(|(_, ok)| !**ok)
            .map(|(name, _)| name.as_str())
            .collect();
        if components.is_empty() {
            Self::invalid("no verifiable components")
        } else if failed.is_empty() {
            Self {
                is_valid: true,
                reason: None,
                components,
            }
        } else {
            let reason = format!("component checks failed: {}", failed.join(", "));
            Self {
                is_valid: false,
                reason: Some(reason),
                components,
            }
        }
    }
}

/// The proof engine.
pub struct ZkEngine {
    config: RwLock<EngineConfig>,
    cache: ProofCache,
    provider: Arc<dyn CryptoProvider>,
}

impl ZkEngine {
    /// Construct an engine with an explicit configuration and provider.
    pub fn new(config: EngineConfig, provider: Arc<dyn CryptoProvider>) -> Self {
        let cache = ProofCache::new(config.cache_capacity);
        Self {
            config: RwLock::new(config),
            cache,
            provider,
        }
    }

    /// Construct an engine with defaults: secp256k1, 24 h TTL, caching
    /// on, OS randomness.
    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default(), Arc::new(OsRngProvider))
    }

    /// A snapshot of the current configuration.
    pub fn config(&self) -> EngineConfig {
        self.config
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Apply a partial configuration update, fail-fast on invalid input.
    pub fn update_config(&self, update: &ConfigUpdate) -> Result<(), ConfigurationError> {
        {
            let mut config = self.config.write().unwrap_or_else(|e| e.into_inner());
            config.apply(update)?;
        }
        if let Some(capacity) = update.cache_capacity {
            self.cache.set_capacity(capacity);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Generation
    // -----------------------------------------------------------------------

    /// Generate a proof for a statement.
    ///
    /// On any error nothing is cached and no partial record escapes.
    pub fn generate_proof(
        &self,
        statement: &ZkStatement,
        options: &GenerateOptions,
    ) -> Result<ZkProof, GenerationError> {
        let config = self.config();
        let (curve, security_level) = match options.security_level {
            Some(level) => (level.default_curve(), level),
            None => (config.curve, SecurityLevel::for_curve(config.curve)),
        };
        let ttl_secs = options.ttl_secs.unwrap_or(config.proof_ttl_secs);
        if ttl_secs == 0 {
            return Err(GenerationError::InvalidInput {
                name: "ttlSecs".to_string(),
                reason: "proof TTL must be at least 1 second".to_string(),
            });
        }

        let group = CurveGroup::new(curve.params());
        let timestamp = Timestamp::now();
        let expires_at = timestamp.plus_secs(ttl_secs);

        // The challenge binds the full public statement plus issuance
        // time, so a commitment cannot be replayed against a different
        // statement or a re-stamped proof.
        let binding_statement = serde_json::json!({
            "type": statement.statement_type.as_str(),
            "description": statement.description,
            "publicInputs": statement.public_inputs,
            "relation": statement.relation,
            "timestamp": timestamp.to_iso8601(),
        });

        let mut public_inputs = statement.public_inputs.clone();
        let components = match statement.statement_type {
            StatementType::DiscreteLog => {
                let secret = require_private_scalar(statement, "secret", &group)?;
                let bundle = SchnorrGenerator::new(group).generate(
                    self.provider.as_ref(),
                    &secret,
                    &binding_statement,
                )?;
                public_inputs.insert("publicKey".to_string(), bundle.schnorr.public_key.clone());
                public_inputs.insert("generator".to_string(), bundle.schnorr.generator.clone());
                ProofComponents::Schnorr(bundle)
            }
            StatementType::PedersenCommitment => {
                let value = require_private_scalar(statement, "value", &group)?;
                let blinding = match statement.private_inputs.get("blinding") {
                    Some(raw) => parse_scalar(raw, &group, "blinding")?,
                    None => self.provider.random_scalar(group.params())?,
                };
                let pedersen = PedersenGenerator::new(group)?;
                let bundle = pedersen.prove_opening(
                    self.provider.as_ref(),
                    &value,
                    &blinding,
                    &binding_statement,
                )?;
                public_inputs.insert("commitment".to_string(), bundle.pedersen.commitment.clone());
                ProofComponents::Pedersen(bundle)
            }
            StatementType::RangeProof => {
                let value = require_private_u64(statement, "value")?;
                let range = require_public_u64(statement, "range")?;
                let pedersen = PedersenGenerator::new(group)?;
                let bundle = pedersen.prove_range(
                    self.provider.as_ref(),
                    value,
                    range,
                    &binding_statement,
                )?;
                public_inputs.insert(
                    "commitment".to_string(),
                    bundle.range_proof.value_commitment.clone(),
                );
                ProofComponents::Range(bundle)
            }
            StatementType::SetMembership => {
                let value = require_private_scalar(statement, "value", &group)?;
                let set = require_public_set(statement, &group)?;
                let pedersen = PedersenGenerator::new(group)?;
                let bundle = pedersen.prove_membership(
                    self.provider.as_ref(),
                    &value,
                    &set,
                    &binding_statement,
                )?;
                public_inputs.insert(
                    "commitment".to_string(),
                    bundle.set_membership.commitment.clone(),
                );
                ProofComponents::SetMembership(bundle)
            }
            StatementType::Custom => {
                return Err(GenerationError::UnsupportedStatementType(
                    statement.statement_type.as_str().to_string(),
                ));
            }
        };

        let projection = statement.public_projection();
        let verification_key = {
            let material = CanonicalBytes::new(&serde_json::json!({
                "statement": projection,
                "securityLevel": security_level.as_str(),
                "timestamp": timestamp.to_iso8601(),
            }))?;
            digest_hex(curve.params().hash, &material)
        };

        let proof = ZkProof {
            id: ProofId::new_random(),
            statement_type: statement.statement_type,
            statement: projection,
            proof: components,
            public_inputs,
            timestamp,
            expires_at,
            verification_key,
            security_level,
            algorithm: curve,
            key_length: curve.params().key_bits,
            quantum_resistant: false,
        };

        if config.cache_enabled {
            self.cache.put(proof.clone());
        }
        if config.verbose_logging {
            tracing::info!(
                id = %proof.id,
                statement_type = %proof.statement_type,
                curve = %curve,
                "proof generated"
            );
        }
        Ok(proof)
    }

    // -----------------------------------------------------------------------
    // Verification
    // -----------------------------------------------------------------------

    /// Verify a proof.
    ///
    /// Expiry is checked first: an expired proof is invalid with reason
    /// `"expired"` before any algebra runs. Otherwise every component
    /// relevant to the statement type must validate.
    pub fn verify_proof(&self, proof: &ZkProof) -> VerificationOutcome {
        let outcome = self.verify_proof_inner(proof);
        if self.config().verbose_logging {
            tracing::info!(
                id = %proof.id,
                is_valid = outcome.is_valid,
                reason = outcome.reason.as_deref().unwrap_or(""),
                "proof verified"
            );
        }
        outcome
    }

    fn verify_proof_inner(&self, proof: &ZkProof) -> VerificationOutcome {
        if proof.is_expired(Timestamp::now()) {
            return VerificationOutcome::invalid("expired");
        }
        if proof.statement_type != proof.proof.statement_type()
            || proof.statement_type != proof.statement.statement_type
        {
            return VerificationOutcome::invalid("component mismatch: statement type disagrees with proof components");
        }

        let group = CurveGroup::new(proof.algorithm.params());
        let provider = self.provider.as_ref();
        let results = match &proof.proof {
            ProofComponents::Schnorr(bundle) => bundle.verify(group, provider),
            ProofComponents::Pedersen(bundle) => match PedersenGenerator::new(group) {
                Ok(pedersen) => bundle.verify(&pedersen, provider),
                Err(e) => return VerificationOutcome::invalid(e.to_string()),
            },
            ProofComponents::Range(bundle) => match PedersenGenerator::new(group) {
                Ok(pedersen) => bundle.verify(&pedersen, provider),
                Err(e) => return VerificationOutcome::invalid(e.to_string()),
            },
            ProofComponents::SetMembership(bundle) => match PedersenGenerator::new(group) {
                Ok(pedersen) => bundle.verify(&pedersen, provider),
                Err(e) => return VerificationOutcome::invalid(e.to_string()),
            },
        };
        VerificationOutcome::from_components(results)
    }

    // -----------------------------------------------------------------------
    // Cache operations
    // -----------------------------------------------------------------------

    /// Fetch a cached proof; expired entries read as absent.
    pub fn get_cached_proof(&self, id: &ProofId) -> Option<ZkProof> {
        self.cache.get(id, Timestamp::now())
    }

    /// Remove a cached proof.
    pub fn remove_cached_proof(&self, id: &ProofId) -> Option<ZkProof> {
        self.cache.remove(id)
    }

    /// Sweep expired proofs from the cache; returns how many were
    /// removed.
    pub fn cleanup_expired_proofs(&self) -> usize {
        self.cache.cleanup_expired(Timestamp::now())
    }

    /// Export the cache for persistence handoff.
    pub fn export_cache_data(&self) -> CacheExport {
        self.cache.export()
    }

    /// Import a cache snapshot; a rejected payload leaves the cache
    /// untouched.
    pub fn import_cache_data(&self, export: CacheExport) -> Result<usize, CacheImportError> {
        self.cache.import(export)
    }

    /// Aggregate statistics over cached proofs.
    pub fn proof_stats(&self) -> CacheStats {
        self.cache.stats(Timestamp::now())
    }

    // -----------------------------------------------------------------------
    // Claim factories — statement construction only, no new cryptography
    // -----------------------------------------------------------------------

    /// "Holder is at least `minimum_age` years old": a range proof over
    /// the age offset. The age itself stays private.
    pub fn age_verification_statement(
        &self,
        age: u64,
        minimum_age: u64,
    ) -> Result<ZkStatement, GenerationError> {
        if age < minimum_age {
            // There is no honest proof of a false claim.
            return Err(GenerationError::InvalidInput {
                name: "age".to_string(),
                reason: "age is below the claimed minimum".to_string(),
            });
        }
        Ok(
            ZkStatement::new(StatementType::RangeProof, format!("age is at least {minimum_age}"))
                .with_public("range", AGE_OFFSET_RANGE.to_string())
                .with_public("minimumAge", minimum_age.to_string())
                .with_private("value", (age - minimum_age).to_string())
                .with_relation("0 <= age - minimumAge < range"),
        )
    }

    /// "Holder possesses credential field `field` with a specific
    /// value": a Pedersen opening proof over the hashed field value.
    pub fn credential_verification_statement(&self, field: &str, value: &str) -> ZkStatement {
        let algorithm = self.config().curve.params().hash;
        let digest = self.provider.hash(algorithm, value.as_bytes());
        ZkStatement::new(
            StatementType::PedersenCommitment,
            format!("holds credential field {field}"),
        )
        .with_public("field", field)
        .with_private("value", format!("0x{}", hex_string(&digest)))
        .with_relation("C = g^H(value) h^r")
    }

    /// "Holder controls the key granting `action` on `scope`": a
    /// discrete-log knowledge proof over the permission key.
    pub fn permission_statement(
        &self,
        action: &str,
        scope: &str,
        permission_key: &str,
    ) -> ZkStatement {
        ZkStatement::new(
            StatementType::DiscreteLog,
            format!("authorized to {action} on {scope}"),
        )
        .with_public("action", action)
        .with_public("scope", scope)
        .with_private("secret", permission_key)
        .with_relation("y = g^x")
    }

    /// Selective disclosure: named fields become public inputs, the
    /// rest are folded into one committed digest.
    pub fn selective_disclosure_statement(
        &self,
        attributes: &BTreeMap<String, String>,
        disclosed: &[&str],
    ) -> Result<ZkStatement, GenerationError> {
        let hidden: BTreeMap<&String, &String> = attributes
            .iter()
            .filter(|(key, _)| !disclosed.contains(&key.as_str()))
            .collect();
        let material = CanonicalBytes::new(&hidden)?;
        let algorithm = self.config().curve.params().hash;
        let digest = self.provider.hash(algorithm, material.as_bytes());

        let mut statement = ZkStatement::new(
            StatementType::PedersenCommitment,
            "selective disclosure of credential attributes",
        )
        .with_public("disclosedFields", disclosed.join(","))
        .with_private("value", format!("0x{}", hex_string(&digest)))
        .with_relation("C = g^H(hidden attributes) h^r");
        for key in disclosed {
            if let Some(value) = attributes.get(*key) {
                statement = statement.with_public(format!("disclosed.{key}"), value.clone());
            }
        }
        Ok(statement)
    }

}

// ---------------------------------------------------------------------------
// Input helpers
// ---------------------------------------------------------------------------

fn require_private_scalar(
    statement: &ZkStatement,
    name: &str,
    group: &CurveGroup,
) -> Result<Scalar, GenerationError> {
    let raw = statement
        .private_inputs
        .get(name)
        .ok_or_else(|| GenerationError::MissingInput {
            name: name.to_string(),
        })?;
    parse_scalar(raw, group, name)
}

fn require_private_u64(statement: &ZkStatement, name: &str) -> Result<u64, GenerationError> {
    let raw = statement
        .private_inputs
        .get(name)
        .ok_or_else(|| GenerationError::MissingInput {
            name: name.to_string(),
        })?;
    // The raw value is secret; the error must not echo it.
    raw.trim()
        .parse::<u64>()
        .map_err(|_| GenerationError::InvalidInput {
            name: name.to_string(),
            reason: "expected an unsigned decimal integer".to_string(),
        })
}

/// Parse a scalar input without echoing the (possibly secret) raw text
/// into the error.
fn parse_scalar(raw: &str, group: &CurveGroup, name: &str) -> Result<Scalar, GenerationError> {
    Scalar::parse(raw, group.order()).map_err(|_| GenerationError::InvalidInput {
        name: name.to_string(),
        reason: "expected a decimal or 0x-prefixed hex scalar".to_string(),
    })
}

fn require_public_u64(statement: &ZkStatement, name: &str) -> Result<u64, GenerationError> {
    let raw = statement
        .public_inputs
        .get(name)
        .ok_or_else(|| GenerationError::MissingInput {
            name: name.to_string(),
        })?;
    raw.trim()
        .parse::<u64>()
        .map_err(|_| GenerationError::InvalidInput {
            name: name.to_string(),
            reason: format!("expected an unsigned decimal integer, got {raw:?}"),
        })
}

/// Parse the public `set` input: comma-separated decimal or
/// `0x`-prefixed hex members.
fn require_public_set(
    statement: &ZkStatement,
    group: &CurveGroup,
) -> Result<Vec<Scalar>, GenerationError> {
    let raw = statement
        .public_inputs
        .get("set")
        .ok_or_else(|| GenerationError::MissingInput {
            name: "set".to_string(),
        })?;
    let members: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|member| !member.is_empty())
        .collect();
    if members.is_empty() {
        return Err(GenerationError::InvalidInput {
            name: "set".to_string(),
            reason: "set must contain at least one member".to_string(),
        });
    }
    members
        .into_iter()
        .map(|member| {
            Scalar::parse(member, group.order()).map_err(|_| GenerationError::InvalidInput {
                name: "set".to_string(),
                reason: format!("member {member:?} is not a valid scalar"),
            })
        })
        .collect()
}

fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use zkid_curve::CurveId;
    use zkid_proofs::testing::SeededProvider;

    fn engine() -> ZkEngine {
        ZkEngine::with_defaults()
    }

    fn discrete_log_statement() -> ZkStatement {
        ZkStatement::new(StatementType::DiscreteLog, "knows the private key")
            .with_public("keyId", "did:zkid:abc#key-1")
            .with_private("secret", "7")
            .with_relation("y = g^x")
    }

    // ---- generation + verification ----

    #[test]
    fn test_discrete_log_generate_then_verify() {
        let engine = engine();
        let proof = engine
            .generate_proof(&discrete_log_statement(), &GenerateOptions::default())
            .unwrap();
        assert_eq!(proof.statement_type, StatementType::DiscreteLog);
        assert_eq!(proof.algorithm, CurveId::Secp256k1);
        assert_eq!(proof.key_length, 256);
        assert!(!proof.quantum_resistant);
        assert!(proof.expires_at > proof.timestamp);

        let outcome = engine.verify_proof(&proof);
        assert!(outcome.is_valid, "{outcome:?}");
        assert!(outcome.reason.is_none());
        assert!(outcome.components.values().all(|ok| *ok));
    }

    #[test]
    fn test_tampered_response_hex_char_fails_with_reason() {
        let engine = engine();
        let mut proof = engine
            .generate_proof(&discrete_log_statement(), &GenerateOptions::default())
            .unwrap();
        let ProofComponents::Schnorr(bundle) = &mut proof.proof else {
            panic!("expected schnorr components");
        };
        let mut chars: Vec<char> = bundle.schnorr.response.chars().collect();
        chars[0] = if chars[0] == '0' { '1' } else { '0' };
        bundle.schnorr.response = chars.into_iter().collect();

        let outcome = engine.verify_proof(&proof);
        assert!(!outcome.is_valid);
        assert!(outcome.reason.is_some());
        assert_eq!(outcome.components.get("schnorr"), Some(&false));
    }

    #[test]
    fn test_nonce_freshness_two_generations_differ() {
        let engine = engine();
        let statement = discrete_log_statement();
        let a = engine
            .generate_proof(&statement, &GenerateOptions::default())
            .unwrap();
        let b = engine
            .generate_proof(&statement, &GenerateOptions::default())
            .unwrap();
        let (ProofComponents::Schnorr(a), ProofComponents::Schnorr(b)) = (&a.proof, &b.proof)
        else {
            panic!("expected schnorr components");
        };
        assert_ne!(a.schnorr.commitment, b.schnorr.commitment);
        assert_ne!(a.schnorr.challenge, b.schnorr.challenge);
        assert_ne!(a.schnorr.response, b.schnorr.response);
    }

    #[test]
    fn test_expired_proof_fails_before_algebra() {
        let engine = engine();
        let mut proof = engine
            .generate_proof(&discrete_log_statement(), &GenerateOptions::default())
            .unwrap();
        proof.expires_at = proof.timestamp;

        let outcome = engine.verify_proof(&proof);
        assert!(!outcome.is_valid);
        assert_eq!(outcome.reason.as_deref(), Some("expired"));
        assert!(outcome.components.is_empty(), "no algebra on expired proofs");
    }

    #[test]
    fn test_pedersen_commitment_roundtrip() {
        let engine = engine();
        let statement = ZkStatement::new(StatementType::PedersenCommitment, "committed value")
            .with_private("value", "21")
            .with_relation("C = g^m h^r");
        let proof = engine
            .generate_proof(&statement, &GenerateOptions::default())
            .unwrap();
        assert!(proof.public_inputs.contains_key("commitment"));
        assert!(engine.verify_proof(&proof).is_valid);
    }

    #[test]
    fn test_range_proof_roundtrip_and_overflow() {
        let engine = engine();
        let in_range = ZkStatement::new(StatementType::RangeProof, "value within bound")
            .with_public("range", "16")
            .with_private("value", "5");
        let proof = engine
            .generate_proof(&in_range, &GenerateOptions::default())
            .unwrap();
        assert!(engine.verify_proof(&proof).is_valid);

        let out_of_range = ZkStatement::new(StatementType::RangeProof, "value within bound")
            .with_public("range", "16")
            .with_private("value", "20");
        let err = engine
            .generate_proof(&out_of_range, &GenerateOptions::default())
            .unwrap_err();
        assert!(matches!(err, GenerationError::ValueOutOfRange { range: 16 }));
    }

    #[test]
    fn test_set_membership_roundtrip() {
        let engine = engine();
        let statement = ZkStatement::new(StatementType::SetMembership, "age checkpoint")
            .with_public("set", "18,21,25,65")
            .with_private("value", "21");
        let proof = engine
            .generate_proof(&statement, &GenerateOptions::default())
            .unwrap();
        assert!(engine.verify_proof(&proof).is_valid);
    }

    #[test]
    fn test_set_membership_nonmember_fails_and_caches_nothing() {
        let engine = engine();
        let statement = ZkStatement::new(StatementType::SetMembership, "age checkpoint")
            .with_public("set", "18,21,25,65")
            .with_private("value", "17");
        let err = engine
            .generate_proof(&statement, &GenerateOptions::default())
            .unwrap_err();
        assert!(matches!(err, GenerationError::ValueNotInSet));
        assert_eq!(engine.proof_stats().total, 0);
    }

    #[test]
    fn test_custom_statement_type_unsupported() {
        let engine = engine();
        let statement = ZkStatement::new(StatementType::Custom, "bespoke claim");
        assert!(matches!(
            engine.generate_proof(&statement, &GenerateOptions::default()),
            Err(GenerationError::UnsupportedStatementType(_))
        ));
    }

    #[test]
    fn test_missing_secret_input() {
        let engine = engine();
        let statement = ZkStatement::new(StatementType::DiscreteLog, "knows the private key");
        assert!(matches!(
            engine.generate_proof(&statement, &GenerateOptions::default()),
            Err(GenerationError::MissingInput { .. })
        ));
    }

    #[test]
    fn test_invalid_secret_error_does_not_echo_it() {
        let engine = engine();
        let statement = ZkStatement::new(StatementType::DiscreteLog, "knows the private key")
            .with_private("secret", "hunter2-not-a-scalar");
        let err = engine
            .generate_proof(&statement, &GenerateOptions::default())
            .unwrap_err();
        assert!(!err.to_string().contains("hunter2"));
    }

    // ---- security levels / curves ----

    #[test]
    fn test_security_level_selects_curve() {
        let engine = engine();
        for (level, curve, bits) in [
            (SecurityLevel::Standard, CurveId::Secp256k1, 256),
            (SecurityLevel::High, CurveId::P384, 384),
            (SecurityLevel::Maximum, CurveId::P521, 521),
        ] {
            let proof = engine
                .generate_proof(
                    &discrete_log_statement(),
                    &GenerateOptions {
                        security_level: Some(level),
                        ttl_secs: None,
                    },
                )
                .unwrap();
            assert_eq!(proof.algorithm, curve);
            assert_eq!(proof.key_length, bits);
            assert!(engine.verify_proof(&proof).is_valid, "{curve}");
        }
    }

    #[test]
    fn test_verification_is_engine_independent() {
        // A proof is self-contained; a different engine instance (with a
        // different provider seed) verifies it.
        let issuing = ZkEngine::new(EngineConfig::default(), Arc::new(SeededProvider::new(1)));
        let verifying = ZkEngine::new(EngineConfig::default(), Arc::new(SeededProvider::new(2)));
        let proof = issuing
            .generate_proof(&discrete_log_statement(), &GenerateOptions::default())
            .unwrap();
        assert!(verifying.verify_proof(&proof).is_valid);
    }

    // ---- cache surface ----

    #[test]
    fn test_generated_proof_is_cached_and_removable() {
        let engine = engine();
        let proof = engine
            .generate_proof(&discrete_log_statement(), &GenerateOptions::default())
            .unwrap();
        assert_eq!(engine.get_cached_proof(&proof.id), Some(proof.clone()));
        assert!(engine.remove_cached_proof(&proof.id).is_some());
        assert!(engine.get_cached_proof(&proof.id).is_none());
    }

    #[test]
    fn test_cache_disabled_stores_nothing() {
        let engine = ZkEngine::new(
            EngineConfig {
                cache_enabled: false,
                ..EngineConfig::default()
            },
            Arc::new(OsRngProvider),
        );
        let proof = engine
            .generate_proof(&discrete_log_statement(), &GenerateOptions::default())
            .unwrap();
        assert!(engine.get_cached_proof(&proof.id).is_none());
        assert_eq!(engine.proof_stats().total, 0);
    }

    #[test]
    fn test_export_import_restores_proofs() {
        let engine = engine();
        let proofs: Vec<ZkProof> = (0..3)
            .map(|_| {
                engine
                    .generate_proof(&discrete_log_statement(), &GenerateOptions::default())
                    .unwrap()
            })
            .collect();

        let other = ZkEngine::with_defaults();
        let imported = other.import_cache_data(engine.export_cache_data()).unwrap();
        assert_eq!(imported, 3);
        for proof in &proofs {
            assert_eq!(other.get_cached_proof(&proof.id).as_ref(), Some(proof));
        }
    }

    // ---- configuration ----

    #[test]
    fn test_update_config_switches_curve() {
        let engine = engine();
        engine
            .update_config(&ConfigUpdate {
                curve: Some("P-384".to_string()),
                ..ConfigUpdate::default()
            })
            .unwrap();
        let proof = engine
            .generate_proof(&discrete_log_statement(), &GenerateOptions::default())
            .unwrap();
        assert_eq!(proof.algorithm, CurveId::P384);
        assert_eq!(proof.security_level, SecurityLevel::High);
    }

    #[test]
    fn test_update_config_unknown_curve_fails_fast() {
        let engine = engine();
        let before = engine.config();
        assert!(engine
            .update_config(&ConfigUpdate {
                curve: Some("brainpool256".to_string()),
                ..ConfigUpdate::default()
            })
            .is_err());
        assert_eq!(engine.config(), before);
    }

    #[test]
    fn test_zero_ttl_option_rejected() {
        let engine = engine();
        assert!(matches!(
            engine.generate_proof(
                &discrete_log_statement(),
                &GenerateOptions {
                    security_level: None,
                    ttl_secs: Some(0),
                },
            ),
            Err(GenerationError::InvalidInput { .. })
        ));
    }

    // ---- claim factories ----

    #[test]
    fn test_age_verification_claim_end_to_end() {
        let engine = engine();
        let statement = engine.age_verification_statement(42, 18).unwrap();
        assert_eq!(statement.statement_type, StatementType::RangeProof);
        let proof = engine
            .generate_proof(&statement, &GenerateOptions::default())
            .unwrap();
        assert!(engine.verify_proof(&proof).is_valid);
        // The age never appears in the record.
        let json = serde_json::to_string(&proof).unwrap();
        assert!(!json.contains("\"42\""));
    }

    #[test]
    fn test_age_below_minimum_rejected_at_statement_construction() {
        let engine = engine();
        assert!(engine.age_verification_statement(16, 18).is_err());
    }

    #[test]
    fn test_credential_verification_claim() {
        let engine = engine();
        let statement = engine.credential_verification_statement("nationality", "NL");
        let proof = engine
            .generate_proof(&statement, &GenerateOptions::default())
            .unwrap();
        assert!(engine.verify_proof(&proof).is_valid);
        assert_eq!(
            proof.statement.public_inputs.get("field").map(String::as_str),
            Some("nationality")
        );
    }

    #[test]
    fn test_permission_claim() {
        let engine = engine();
        let statement = engine.permission_statement("sign", "corridor:eu-west", "0x1f3a9c");
        let proof = engine
            .generate_proof(&statement, &GenerateOptions::default())
            .unwrap();
        assert!(engine.verify_proof(&proof).is_valid);
    }

    #[test]
    fn test_selective_disclosure_claim() {
        let engine = engine();
        let attributes: BTreeMap<String, String> = [
            ("name".to_string(), "A. Holder".to_string()),
            ("nationality".to_string(), "NL".to_string()),
            ("dateOfBirth".to_string(), "1990-01-01".to_string()),
        ]
        .into();
        let statement = engine
            .selective_disclosure_statement(&attributes, &["nationality"])
            .unwrap();
        let proof = engine
            .generate_proof(&statement, &GenerateOptions::default())
            .unwrap();
        assert!(engine.verify_proof(&proof).is_valid);

        let json = serde_json::to_string(&proof).unwrap();
        assert!(json.contains("NL"), "disclosed field is public");
        assert!(!json.contains("1990-01-01"), "hidden field stays hidden");
        assert!(!json.contains("A. Holder"), "hidden field stays hidden");
    }
}
