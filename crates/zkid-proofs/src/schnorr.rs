//! # Schnorr Generator — Discrete-Log Knowledge Proofs
//!
//! Proves knowledge of `x` with `y = g^x` without revealing `x`:
//!
//! 1. Fresh nonce `k`, commitment `R = g^k`.
//! 2. Challenge `c = H(R || canonical(statement, g, y, timestamp)) mod n`.
//! 3. Response `s = (k + c·x) mod n`.
//!
//! Verification accepts iff `g^s == R + c·y` as a point equation — no
//! secret is recomputed, and the check is pure.
//!
//! ## Security Invariant
//!
//! The nonce is drawn fresh from the provider for every proof and
//! consumed exactly once (`SigmaCommit` move semantics). Reuse across two
//! proofs for the same key recovers the key from two responses; the type
//! system forbids it here.

use serde::{Deserialize, Serialize};

use zkid_core::CanonicalBytes;
use zkid_curve::{CurveGroup, CurveId, Point, Scalar};

use crate::error::GenerationError;
use crate::provider::CryptoProvider;
use crate::sigma::{
    compute_response, derive_challenge, sigma_commit, FiatShamirTransform, SigmaTranscript,
};

/// A Schnorr discrete-log proof. Public values only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchnorrProof {
    /// Commitment `R = g^k`, encoded.
    pub commitment: String,
    /// Challenge `c`, hex.
    pub challenge: String,
    /// Response `s = k + c·x mod n`, hex.
    pub response: String,
    /// Public key `y = g^x`, encoded.
    pub public_key: String,
    /// Generator `g`, encoded.
    pub generator: String,
    /// Curve of the proof.
    pub curve: CurveId,
    /// Group order `n`, hex. Carried for record completeness; verifiers
    /// use the registry order for the named curve.
    pub order: String,
}

/// The discrete-log component set stored in a proof record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchnorrBundle {
    /// The Schnorr proof itself.
    pub schnorr: SchnorrProof,
    /// The protocol-level transcript record.
    pub sigma_protocol: SigmaTranscript,
    /// The independently re-checkable Fiat-Shamir record.
    pub fiat_shamir: FiatShamirTransform,
}

/// Generates and verifies Schnorr proofs on one curve.
#[derive(Debug, Clone, Copy)]
pub struct SchnorrGenerator {
    group: CurveGroup,
}

impl SchnorrGenerator {
    /// Bind to a curve.
    pub fn new(group: CurveGroup) -> Self {
        Self { group }
    }

    /// Generate a proof of knowledge of `secret` for `y = g^secret`.
    ///
    /// `statement` is the public statement projection (type, description,
    /// public inputs, relation, timestamp); the challenge binds it
    /// together with `g` and `y`.
    pub fn generate(
        &self,
        provider: &dyn CryptoProvider,
        secret: &Scalar,
        statement: &serde_json::Value,
    ) -> Result<SchnorrBundle, GenerationError> {
        let group = &self.group;
        let g = group.generator();
        let y = group.generator_mul(secret)?;

        let commit = sigma_commit(group, &g, provider)?;
        let binding = CanonicalBytes::new(&serde_json::json!({
            "context": "zkid/schnorr/v1",
            "curve": group.params().id.as_str(),
            "generator": g.to_encoded(),
            "publicKey": y.to_encoded(),
            "statement": statement,
        }))?;
        let encodings = vec![commit.commitment().to_encoded()];
        let challenge = derive_challenge(provider, group.params(), &encodings, &binding);
        let (r, s) = compute_response(commit, &challenge, secret, group.order());

        let proof = SchnorrProof {
            commitment: r.to_encoded(),
            challenge: challenge.to_hex(),
            response: s.to_hex(),
            public_key: y.to_encoded(),
            generator: g.to_encoded(),
            curve: group.params().id,
            order: group.order().to_str_radix(16),
        };
        let sigma_protocol = SigmaTranscript {
            commitment: proof.commitment.clone(),
            challenge: proof.challenge.clone(),
            response: proof.response.clone(),
            generator: proof.generator.clone(),
            curve: proof.curve,
        };
        let fiat_shamir =
            FiatShamirTransform::assemble(group.params(), encodings, &challenge, vec![s.to_hex()], &binding);

        Ok(SchnorrBundle {
            schnorr: proof,
            sigma_protocol,
            fiat_shamir,
        })
    }

    /// Verify the point equation `g^s == R + c·y`.
    ///
    /// Pure and side-effect-free; never needs the secret. Any malformed
    /// encoding or off-curve point yields `false`, never an error.
    pub fn verify(&self, proof: &SchnorrProof) -> bool {
        let group = &self.group;
        let n = group.order();

        let (g, r, y) = match (
            Point::from_encoded(&proof.generator),
            Point::from_encoded(&proof.commitment),
            Point::from_encoded(&proof.public_key),
        ) {
            (Ok(g), Ok(r), Ok(y)) => (g, r, y),
            _ => return false,
        };
        let (c, s) = match (
            Scalar::from_hex(&proof.challenge, n),
            Scalar::from_hex(&proof.response, n),
        ) {
            (Ok(c), Ok(s)) => (c, s),
            _ => return false,
        };

        let lhs = match group.scalar_mul(&g, &s) {
            Ok(p) => p,
            Err(_) => return false,
        };
        let cy = match group.scalar_mul(&y, &c) {
            Ok(p) => p,
            Err(_) => return false,
        };
        match group.add(&r, &cy) {
            Ok(rhs) => lhs == rhs,
            Err(_) => false,
        }
    }
}

impl SchnorrBundle {
    /// Verify every component: the Schnorr equation, the Fiat-Shamir
    /// re-check, and cross-record consistency. Returns one flag per
    /// component; the proof is valid only if all are true.
    pub fn verify(
        &self,
        group: CurveGroup,
        provider: &dyn CryptoProvider,
    ) -> std::collections::BTreeMap<String, bool> {
        let mut results = std::collections::BTreeMap::new();
        results.insert(
            "schnorr".to_string(),
            SchnorrGenerator::new(group).verify(&self.schnorr),
        );
        results.insert(
            "fiatShamir".to_string(),
            self.fiat_shamir.recheck(provider, group.params()),
        );
        let consistent = self.sigma_protocol.commitment == self.schnorr.commitment
            && self.sigma_protocol.challenge == self.schnorr.challenge
            && self.sigma_protocol.response == self.schnorr.response
            && self.fiat_shamir.challenge == self.schnorr.challenge
            && self.fiat_shamir.commitments == vec![self.schnorr.commitment.clone()];
        results.insert("sigmaProtocol".to_string(), consistent);
        results
    }
}
