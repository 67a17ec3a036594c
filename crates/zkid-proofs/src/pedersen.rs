//! # Pedersen Generator — Commitment-Opening Proofs
//!
//! A Pedersen commitment `C = g^m h^r` is perfectly hiding and
//! computationally binding provided nobody knows `log_g(h)`. The opening
//! proof demonstrates knowledge of `(m, r)` without revealing either:
//!
//! 1. Sample `w, v`; commit `A = g^w h^v`.
//! 2. Challenge `c = H(A || canonical(C, g, h, statement)) mod n`.
//! 3. Responses `z1 = (w + c·m) mod n`, `z2 = (v + c·r) mod n`.
//!
//! Verification: `g^z1 + h^z2 == A + c·C`.
//!
//! ## Security Invariant
//!
//! `h` is derived by try-and-increment hashing of a fixed domain tag, so
//! its discrete log relative to `g` is unknown to every party — including
//! this module.

use serde::{Deserialize, Serialize};

use zkid_core::CanonicalBytes;
use zkid_curve::{CurveError, CurveGroup, CurveId, Point, Scalar};

use crate::error::GenerationError;
use crate::provider::CryptoProvider;
use crate::sigma::{derive_challenge, FiatShamirTransform};

/// Domain tag for deriving the blinding generator `h`.
pub(crate) const PEDERSEN_H_TAG: &str = "zkid/pedersen/h/v1";

/// A Pedersen commitment-opening proof. Public values only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PedersenOpeningProof {
    /// The commitment `C = g^m h^r`, encoded.
    pub commitment: String,
    /// The blinding commitment `A = g^w h^v`, encoded.
    pub blinding_commitment: String,
    /// Challenge `c`, hex.
    pub challenge: String,
    /// Response for the committed value, `z1`, hex.
    pub response_value: String,
    /// Response for the blinding factor, `z2`, hex.
    pub response_blinding: String,
    /// Generator `g`, encoded.
    pub generator: String,
    /// Blinding generator `h`, encoded.
    pub blinding_generator: String,
    /// Curve of the proof.
    pub curve: CurveId,
}

/// The Pedersen component set stored in a proof record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PedersenBundle {
    /// The opening proof.
    pub pedersen: PedersenOpeningProof,
    /// The independently re-checkable Fiat-Shamir record.
    pub fiat_shamir: FiatShamirTransform,
}

/// Generates and verifies Pedersen proofs on one curve.
#[derive(Debug, Clone)]
pub struct PedersenGenerator {
    group: CurveGroup,
    h: Point,
}

impl PedersenGenerator {
    /// Bind to a curve, deriving the blinding generator `h`.
    pub fn new(group: CurveGroup) -> Result<Self, CurveError> {
        let h = group.hash_to_point(PEDERSEN_H_TAG)?;
        Ok(Self { group, h })
    }

    /// The bound group.
    pub fn group(&self) -> &CurveGroup {
        &self.group
    }

    /// The blinding generator `h`.
    pub fn blinding_generator(&self) -> &Point {
        &self.h
    }

    /// Commit: `C = g^m h^r`.
    pub fn commit(&self, m: &Scalar, r: &Scalar) -> Result<Point, CurveError> {
        let gm = self.group.generator_mul(m)?;
        let hr = self.group.scalar_mul(&self.h, r)?;
        self.group.add(&gm, &hr)
    }

    /// Generate an opening proof for `C = g^m h^r`.
    pub fn prove_opening(
        &self,
        provider: &dyn CryptoProvider,
        m: &Scalar,
        r: &Scalar,
        statement: &serde_json::Value,
    ) -> Result<PedersenBundle, GenerationError> {
        let group = &self.group;
        let n = group.order();
        let commitment = self.commit(m, r)?;

        let w = provider.random_scalar(group.params())?;
        let v = provider.random_scalar(group.params())?;
        let gw = group.generator_mul(&w)?;
        let hv = group.scalar_mul(&self.h, &v)?;
        let a = group.add(&gw, &hv)?;

        let binding = CanonicalBytes::new(&serde_json::json!({
            "context": "zkid/pedersen/opening/v1",
            "curve": group.params().id.as_str(),
            "commitment": commitment.to_encoded(),
            "generator": group.generator().to_encoded(),
            "blindingGenerator": self.h.to_encoded(),
            "statement": statement,
        }))?;
        let encodings = vec![a.to_encoded()];
        let c = derive_challenge(provider, group.params(), &encodings, &binding);

        let z1 = w.add(&c.mul(m, n), n);
        let z2 = v.add(&c.mul(r, n), n);

        let proof = PedersenOpeningProof {
            commitment: commitment.to_encoded(),
            blinding_commitment: a.to_encoded(),
            challenge: c.to_hex(),
            response_value: z1.to_hex(),
            response_blinding: z2.to_hex(),
            generator: group.generator().to_encoded(),
            blinding_generator: self.h.to_encoded(),
            curve: group.params().id,
        };
        let fiat_shamir = FiatShamirTransform::assemble(
            group.params(),
            encodings,
            &c,
            vec![z1.to_hex(), z2.to_hex()],
            &binding,
        );

        Ok(PedersenBundle {
            pedersen: proof,
            fiat_shamir,
        })
    }

    /// Verify `g^z1 + h^z2 == A + c·C`.
    ///
    /// Pure; malformed encodings and off-curve points yield `false`.
    pub fn verify_opening(&self, proof: &PedersenOpeningProof) -> bool {
        let group = &self.group;
        let n = group.order();

        // Generators are pinned: a record carrying substitute generators
        // (for which a forger could know discrete-log relations) is
        // rejected outright.
        if proof.generator != group.generator().to_encoded()
            || proof.blinding_generator != self.h.to_encoded()
        {
            return false;
        }

        let parsed = (
            Point::from_encoded(&proof.generator),
            Point::from_encoded(&proof.blinding_generator),
            Point::from_encoded(&proof.commitment),
            Point::from_encoded(&proof.blinding_commitment),
            Scalar::from_hex(&proof.challenge, n),
            Scalar::from_hex(&proof.response_value, n),
            Scalar::from_hex(&proof.response_blinding, n),
        );
        let (Ok(g), Ok(h), Ok(c_point), Ok(a), Ok(c), Ok(z1), Ok(z2)) = parsed else {
            return false;
        };

        let lhs = match (group.scalar_mul(&g, &z1), group.scalar_mul(&h, &z2)) {
            (Ok(gz1), Ok(hz2)) => match group.add(&gz1, &hz2) {
                Ok(p) => p,
                Err(_) => return false,
            },
            _ => return false,
        };
        let rhs = match group.scalar_mul(&c_point, &c) {
            Ok(cc) => match group.add(&a, &cc) {
                Ok(p) => p,
                Err(_) => return false,
            },
            Err(_) => return false,
        };
        lhs == rhs
    }
}

impl PedersenBundle {
    /// Verify every component: the opening equation, the Fiat-Shamir
    /// re-check, and cross-record consistency.
    pub fn verify(
        &self,
        generator: &PedersenGenerator,
        provider: &dyn CryptoProvider,
    ) -> std::collections::BTreeMap<String, bool> {
        let mut results = std::collections::BTreeMap::new();
        results.insert(
            "pedersen".to_string(),
            generator.verify_opening(&self.pedersen),
        );
        results.insert(
            "fiatShamir".to_string(),
            self.fiat_shamir.recheck(provider, generator.group().params()),
        );
        let consistent = self.fiat_shamir.challenge == self.pedersen.challenge
            && self.fiat_shamir.commitments
                == vec![self.pedersen.blinding_commitment.clone()];
        results.insert("binding".to_string(), consistent);
        results
    }
}
