//! # Sigma Manager — Commit, Challenge, Response
//!
//! Generic execution of the three-move Sigma protocol and its
//! non-interactive Fiat-Shamir transform.
//!
//! ## Security Invariants
//!
//! - **Single-use nonces.** `SigmaCommit` owns its nonce privately and is
//!   consumed by value in [`compute_response`]. Computing two responses
//!   from one commitment — the classic key-recovery mistake — is a move
//!   error at compile time.
//! - **Full-statement binding.** The challenge hashes every commitment
//!   *and* the canonical public statement, so a commitment cannot be
//!   replayed against a different statement. The exact binding string is
//!   carried in the `FiatShamirTransform` record, which any verifier can
//!   re-check without protocol context.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use zkid_core::CanonicalBytes;
use zkid_curve::{CurveGroup, CurveId, CurveParams, Point, Scalar};

use crate::error::GenerationError;
use crate::provider::CryptoProvider;

/// A pending first move: nonce `k` and commitment `A = base^k`.
///
/// The nonce is private to this type and leaves it exactly once, through
/// [`compute_response`].
#[derive(Debug)]
pub struct SigmaCommit {
    nonce: Scalar,
    commitment: Point,
}

impl SigmaCommit {
    /// The public commitment `A`.
    pub fn commitment(&self) -> &Point {
        &self.commitment
    }
}

/// Run the commit move: draw a fresh nonce and commit to it.
pub fn sigma_commit(
    group: &CurveGroup,
    base: &Point,
    provider: &dyn CryptoProvider,
) -> Result<SigmaCommit, GenerationError> {
    let nonce = provider.random_scalar(group.params())?;
    let commitment = group.scalar_mul(base, &nonce)?;
    Ok(SigmaCommit { nonce, commitment })
}

/// Run the response move: `z = (k + c·secret) mod n`.
///
/// Consumes the commit — the nonce is gone after this call. Returns the
/// public commitment alongside the response for record assembly.
pub fn compute_response(
    commit: SigmaCommit,
    challenge: &Scalar,
    secret: &Scalar,
    order: &BigUint,
) -> (Point, Scalar) {
    let z = commit.nonce.add(&challenge.mul(secret, order), order);
    (commit.commitment, z)
}

/// Derive the Fiat-Shamir challenge:
/// `c = H(A1 || A2 || ... || binding) mod n`.
///
/// `binding` must be the canonical serialization of the full public
/// statement (type, public inputs, relation, timestamp, generators).
pub fn derive_challenge(
    provider: &dyn CryptoProvider,
    params: &CurveParams,
    commitment_encodings: &[String],
    binding: &CanonicalBytes,
) -> Scalar {
    let digest = provider.hash(
        params.hash,
        &challenge_material(commitment_encodings, binding.as_bytes()),
    );
    Scalar::reduce(BigUint::from_bytes_be(&digest), &params.n)
}

/// The byte layout hashed for a challenge. Shared by derivation and
/// re-checking so the two can never drift apart.
fn challenge_material(commitment_encodings: &[String], binding: &[u8]) -> Vec<u8> {
    let mut material = Vec::new();
    for encoding in commitment_encodings {
        material.extend_from_slice(encoding.as_bytes());
        material.push(b'|');
    }
    material.extend_from_slice(binding);
    material
}

// ---------------------------------------------------------------------------
// Public transcript records
// ---------------------------------------------------------------------------

/// The public three-move transcript of one Sigma execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigmaTranscript {
    /// Commitment `A`, encoded.
    pub commitment: String,
    /// Challenge `c`, hex.
    pub challenge: String,
    /// Response `z`, hex.
    pub response: String,
    /// The base the commitment was computed against, encoded.
    pub generator: String,
    /// Curve the transcript lives on.
    pub curve: CurveId,
}

/// The standalone Fiat-Shamir record: everything needed to re-derive the
/// challenge without knowing which protocol produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiatShamirTransform {
    /// Commitment encodings, in hash order.
    pub commitments: Vec<String>,
    /// The derived challenge, hex.
    pub challenge: String,
    /// Response scalars, hex, one per secret.
    pub responses: Vec<String>,
    /// Name of the hash algorithm (`"sha256"`, ...).
    pub hash_algorithm: String,
    /// The exact canonical statement string the challenge hashed.
    pub binding: String,
}

impl FiatShamirTransform {
    /// Assemble the record from a completed protocol run.
    pub fn assemble(
        params: &CurveParams,
        commitments: Vec<String>,
        challenge: &Scalar,
        responses: Vec<String>,
        binding: &CanonicalBytes,
    ) -> Self {
        Self {
            commitments,
            challenge: challenge.to_hex(),
            responses,
            hash_algorithm: params.hash.as_str().to_string(),
            binding: String::from_utf8_lossy(binding.as_bytes()).into_owned(),
        }
    }

    /// Re-derive the challenge from the stored commitments and binding
    /// and compare against the stored challenge.
    ///
    /// Returns `false` for any malformed field, and for a hash algorithm
    /// that is not the one paired with the curve — accepting a
    /// record-chosen algorithm would let a forger downgrade the hash.
    pub fn recheck(&self, provider: &dyn CryptoProvider, params: &CurveParams) -> bool {
        let algorithm = match zkid_core::HashAlgorithm::parse(&self.hash_algorithm) {
            Ok(a) => a,
            Err(_) => return false,
        };
        if algorithm != params.hash {
            return false;
        }
        let stored = match Scalar::from_hex(&self.challenge, &params.n) {
            Ok(c) => c,
            Err(_) => return false,
        };
        let digest = provider.hash(
            algorithm,
            &challenge_material(&self.commitments, self.binding.as_bytes()),
        );
        let expected = Scalar::reduce(BigUint::from_bytes_be(&digest), &params.n);
        stored == expected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zkid_core::CanonicalBytes;
    use zkid_curve::CurveId;

    use crate::provider::OsRngProvider;
    use crate::testing::SeededProvider;

    fn group() -> CurveGroup {
        CurveGroup::new(CurveId::Secp256k1.params())
    }

    fn binding() -> CanonicalBytes {
        CanonicalBytes::new(&serde_json::json!({
            "type": "discrete_log",
            "publicInputs": {"claim": "knows x"},
        }))
        .unwrap()
    }

    #[test]
    fn test_commit_is_base_to_nonce() {
        let group = group();
        let commit = sigma_commit(&group, &group.generator(), &OsRngProvider).unwrap();
        let expected = group.generator_mul(&commit.nonce).unwrap();
        assert_eq!(commit.commitment, expected);
    }

    #[test]
    fn test_response_satisfies_verification_equation() {
        let group = group();
        let n = group.order();
        let provider = OsRngProvider;
        let secret = Scalar::from_u64(7, n);
        let y = group.generator_mul(&secret).unwrap();

        let commit = sigma_commit(&group, &group.generator(), &provider).unwrap();
        let c = derive_challenge(
            &provider,
            group.params(),
            &[commit.commitment().to_encoded()],
            &binding(),
        );
        let (a, z) = compute_response(commit, &c, &secret, n);

        // g^z == A + c*y
        let lhs = group.generator_mul(&z).unwrap();
        let cy = group.scalar_mul(&y, &c).unwrap();
        let rhs = group.add(&a, &cy).unwrap();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_challenge_depends_on_binding() {
        let provider = OsRngProvider;
        let params = CurveId::Secp256k1.params();
        let commitments = vec!["aa:bb".to_string()];
        let b1 = CanonicalBytes::new(&serde_json::json!({"claim": "over 18"})).unwrap();
        let b2 = CanonicalBytes::new(&serde_json::json!({"claim": "over 21"})).unwrap();
        let c1 = derive_challenge(&provider, params, &commitments, &b1);
        let c2 = derive_challenge(&provider, params, &commitments, &b2);
        assert_ne!(c1, c2);
    }

    #[test]
    fn test_challenge_depends_on_commitments() {
        let provider = OsRngProvider;
        let params = CurveId::Secp256k1.params();
        let b = binding();
        let c1 = derive_challenge(&provider, params, &["11:22".to_string()], &b);
        let c2 = derive_challenge(&provider, params, &["11:23".to_string()], &b);
        assert_ne!(c1, c2);
    }

    #[test]
    fn test_fiat_shamir_recheck_roundtrip() {
        let provider = SeededProvider::new(42);
        let group = group();
        let b = binding();
        let commit = sigma_commit(&group, &group.generator(), &provider).unwrap();
        let encodings = vec![commit.commitment().to_encoded()];
        let c = derive_challenge(&provider, group.params(), &encodings, &b);
        let (_, z) = compute_response(commit, &c, &Scalar::from_u64(5, group.order()), group.order());

        let fs = FiatShamirTransform::assemble(
            group.params(),
            encodings,
            &c,
            vec![z.to_hex()],
            &b,
        );
        assert!(fs.recheck(&provider, group.params()));
    }

    #[test]
    fn test_fiat_shamir_recheck_rejects_tampering() {
        let provider = SeededProvider::new(42);
        let group = group();
        let b = binding();
        let commit = sigma_commit(&group, &group.generator(), &provider).unwrap();
        let encodings = vec![commit.commitment().to_encoded()];
        let c = derive_challenge(&provider, group.params(), &encodings, &b);
        let fs = FiatShamirTransform::assemble(group.params(), encodings, &c, vec![], &b);

        let mut tampered_binding = fs.clone();
        tampered_binding.binding = tampered_binding.binding.replace("knows x", "knows w");
        assert!(!tampered_binding.recheck(&provider, group.params()));

        let mut tampered_commitment = fs.clone();
        tampered_commitment.commitments[0].push('0');
        assert!(!tampered_commitment.recheck(&provider, group.params()));

        let mut tampered_challenge = fs.clone();
        tampered_challenge.challenge = flip_first_hex_char(&tampered_challenge.challenge);
        assert!(!tampered_challenge.recheck(&provider, group.params()));

        let mut wrong_algorithm = fs;
        wrong_algorithm.hash_algorithm = "sha512".to_string();
        assert!(!wrong_algorithm.recheck(&provider, group.params()));
    }

    #[test]
    fn test_recheck_rejects_unknown_algorithm() {
        let provider = OsRngProvider;
        let params = CurveId::Secp256k1.params();
        let fs = FiatShamirTransform {
            commitments: vec!["aa:bb".to_string()],
            challenge: "1f".to_string(),
            responses: vec![],
            hash_algorithm: "md5".to_string(),
            binding: "{}".to_string(),
        };
        assert!(!fs.recheck(&provider, params));
    }

    pub(crate) fn flip_first_hex_char(hex: &str) -> String {
        let mut chars: Vec<char> = hex.chars().collect();
        chars[0] = if chars[0] == '0' { '1' } else { '0' };
        chars.into_iter().collect()
    }
}
