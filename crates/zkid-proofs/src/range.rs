//! # Range Proofs — Bitwise Pedersen Decomposition
//!
//! Proves `0 <= value < range` without revealing `value`. The value is
//! decomposed into `ceil(log2(range))` bits; each bit position `i` gets
//! an independent Pedersen commitment against the weighted generator
//! `Gi = g^(2^i)` with its own blinding, and a single Fiat-Shamir
//! challenge binds every per-bit commitment so transcripts cannot be
//! mixed across proofs.
//!
//! A value at or above the claimed range fails **at generation** — the
//! decomposition would need more bits than the range provides, and a
//! proof of a false statement must never be produced. Verification
//! independently re-checks every per-bit equation and the aggregate
//! commitment, so the bound is enforced on both sides.

use num_bigint::BigUint;
use num_traits::One;
use serde::{Deserialize, Serialize};

use zkid_core::CanonicalBytes;
use zkid_curve::{CurveId, Point, Scalar};

use crate::error::GenerationError;
use crate::pedersen::PedersenGenerator;
use crate::provider::CryptoProvider;
use crate::sigma::{derive_challenge, FiatShamirTransform};

/// Per-bit transcript of a range proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeBit {
    /// Commitment to the weighted bit: `Ci = Gi^bi h^ri`, encoded.
    pub bit_commitment: String,
    /// Blinding commitment `Ai = Gi^wi h^vi`, encoded.
    pub blinding_commitment: String,
    /// Response for the bit, `z1i = wi + c·bi`, hex.
    pub response_bit: String,
    /// Response for the blinding, `z2i = vi + c·ri`, hex.
    pub response_blinding: String,
}

/// A bitwise range proof. Public values only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeProof {
    /// Aggregate commitment `C = g^value h^R`, encoded.
    pub value_commitment: String,
    /// One transcript per bit position, least significant first.
    pub bits: Vec<RangeBit>,
    /// The shared challenge binding all bits, hex.
    pub challenge: String,
    /// The exclusive upper bound being claimed.
    pub range: u64,
    /// Generator `g`, encoded.
    pub generator: String,
    /// Blinding generator `h`, encoded.
    pub blinding_generator: String,
    /// Curve of the proof.
    pub curve: CurveId,
}

/// The range-proof component set stored in a proof record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeBundle {
    /// The range proof itself.
    pub range_proof: RangeProof,
    /// The independently re-checkable Fiat-Shamir record.
    pub fiat_shamir: FiatShamirTransform,
}

/// Bits needed to represent values in `[0, range)`.
fn bits_needed(range: u64) -> usize {
    // range >= 2 is validated by callers; range - 1 is the largest value.
    (64 - (range - 1).leading_zeros()) as usize
}

impl PedersenGenerator {
    /// Generate a range proof for `value` under the bound `range`.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for `range < 2` (no representable interval).
    /// - `ValueOutOfRange` for `value >= range`.
    pub fn prove_range(
        &self,
        provider: &dyn CryptoProvider,
        value: u64,
        range: u64,
        statement: &serde_json::Value,
    ) -> Result<RangeBundle, GenerationError> {
        if range < 2 {
            return Err(GenerationError::InvalidInput {
                name: "range".to_string(),
                reason: format!("range must be at least 2, got {range}"),
            });
        }
        if value >= range {
            return Err(GenerationError::ValueOutOfRange { range });
        }

        let group = self.group();
        let n = group.order();
        let h = self.blinding_generator().clone();
        let bit_count = bits_needed(range);

        // Per-bit blindings and nonces, then the aggregate commitment.
        let mut blindings = Vec::with_capacity(bit_count);
        let mut nonces = Vec::with_capacity(bit_count);
        for _ in 0..bit_count {
            blindings.push(provider.random_scalar(group.params())?);
            nonces.push((
                provider.random_scalar(group.params())?,
                provider.random_scalar(group.params())?,
            ));
        }
        let total_blinding = blindings
            .iter()
            .fold(Scalar::from_u64(0, n), |acc, r| acc.add(r, n));
        let value_commitment = self.commit(&Scalar::from_u64(value, n), &total_blinding)?;

        let mut bit_commitments = Vec::with_capacity(bit_count);
        let mut blinding_commitments = Vec::with_capacity(bit_count);
        let mut encodings = Vec::with_capacity(bit_count * 2);
        for i in 0..bit_count {
            let weighted = self.weighted_generator(i)?;
            let bit_set = (value >> i) & 1 == 1;
            let h_r = group.scalar_mul(&h, &blindings[i])?;
            let ci = if bit_set {
                group.add(&weighted, &h_r)?
            } else {
                h_r
            };

            let (w, v) = &nonces[i];
            let gw = group.scalar_mul(&weighted, w)?;
            let hv = group.scalar_mul(&h, v)?;
            let ai = group.add(&gw, &hv)?;

            encodings.push(ai.to_encoded());
            encodings.push(ci.to_encoded());
            bit_commitments.push(ci);
            blinding_commitments.push(ai);
        }

        let binding = CanonicalBytes::new(&serde_json::json!({
            "context": "zkid/pedersen/range/v1",
            "curve": group.params().id.as_str(),
            "commitment": value_commitment.to_encoded(),
            "generator": group.generator().to_encoded(),
            "blindingGenerator": h.to_encoded(),
            "range": range,
            "statement": statement,
        }))?;
        let c = derive_challenge(provider, group.params(), &encodings, &binding);

        let mut bits = Vec::with_capacity(bit_count);
        let mut responses = Vec::with_capacity(bit_count * 2);
        for i in 0..bit_count {
            let bit_scalar = Scalar::from_u64((value >> i) & 1, n);
            let (w, v) = &nonces[i];
            let z1 = w.add(&c.mul(&bit_scalar, n), n);
            let z2 = v.add(&c.mul(&blindings[i], n), n);
            responses.push(z1.to_hex());
            responses.push(z2.to_hex());
            bits.push(RangeBit {
                bit_commitment: bit_commitments[i].to_encoded(),
                blinding_commitment: blinding_commitments[i].to_encoded(),
                response_bit: z1.to_hex(),
                response_blinding: z2.to_hex(),
            });
        }

        let proof = RangeProof {
            value_commitment: value_commitment.to_encoded(),
            bits,
            challenge: c.to_hex(),
            range,
            generator: group.generator().to_encoded(),
            blinding_generator: h.to_encoded(),
            curve: group.params().id,
        };
        let fiat_shamir =
            FiatShamirTransform::assemble(group.params(), encodings, &c, responses, &binding);

        Ok(RangeBundle {
            range_proof: proof,
            fiat_shamir,
        })
    }

    /// Verify every per-bit equation `Gi^z1i h^z2i == Ai + c·Ci` and the
    /// aggregate `sum(Ci) == C`. Any failing bit fails the whole proof.
    pub fn verify_range(&self, proof: &RangeProof) -> bool {
        let group = self.group();
        let n = group.order();

        if proof.range < 2 || proof.bits.len() != bits_needed(proof.range) {
            return false;
        }
        // Generators are pinned: a record carrying substitute generators
        // (for which a forger could know discrete-log relations) is
        // rejected outright.
        if proof.generator != group.generator().to_encoded()
            || proof.blinding_generator != self.blinding_generator().to_encoded()
        {
            return false;
        }

        let (Ok(value_commitment), Ok(c)) = (
            Point::from_encoded(&proof.value_commitment),
            Scalar::from_hex(&proof.challenge, n),
        ) else {
            return false;
        };
        let h = self.blinding_generator();

        let mut commitment_sum = Point::Identity;
        for (i, bit) in proof.bits.iter().enumerate() {
            let parsed = (
                Point::from_encoded(&bit.bit_commitment),
                Point::from_encoded(&bit.blinding_commitment),
                Scalar::from_hex(&bit.response_bit, n),
                Scalar::from_hex(&bit.response_blinding, n),
            );
            let (Ok(ci), Ok(ai), Ok(z1), Ok(z2)) = parsed else {
                return false;
            };

            let weighted = match self.weighted_generator(i) {
                Ok(p) => p,
                Err(_) => return false,
            };
            let lhs = match (group.scalar_mul(&weighted, &z1), group.scalar_mul(h, &z2)) {
                (Ok(gz), Ok(hz)) => match group.add(&gz, &hz) {
                    Ok(p) => p,
                    Err(_) => return false,
                },
                _ => return false,
            };
            let rhs = match group.scalar_mul(&ci, &c) {
                Ok(cc) => match group.add(&ai, &cc) {
                    Ok(p) => p,
                    Err(_) => return false,
                },
                Err(_) => return false,
            };
            if lhs != rhs {
                return false;
            }

            commitment_sum = match group.add(&commitment_sum, &ci) {
                Ok(p) => p,
                Err(_) => return false,
            };
        }

        commitment_sum == value_commitment
    }

    /// The weighted generator `Gi = g^(2^i)`.
    fn weighted_generator(&self, i: usize) -> Result<Point, zkid_curve::CurveError> {
        let group = self.group();
        let weight = Scalar::reduce(BigUint::one() << i, group.order());
        group.generator_mul(&weight)
    }
}

impl RangeBundle {
    /// Verify every component: per-bit equations + aggregate, the
    /// Fiat-Shamir re-check, and cross-record consistency.
    pub fn verify(
        &self,
        generator: &PedersenGenerator,
        provider: &dyn CryptoProvider,
    ) -> std::collections::BTreeMap<String, bool> {
        let mut results = std::collections::BTreeMap::new();
        results.insert(
            "rangeProof".to_string(),
            generator.verify_range(&self.range_proof),
        );
        results.insert(
            "fiatShamir".to_string(),
            self.fiat_shamir.recheck(provider, generator.group().params()),
        );
        let expected_encodings: Vec<String> = self
            .range_proof
            .bits
            .iter()
            .flat_map(|b| [b.blinding_commitment.clone(), b.bit_commitment.clone()])
            .collect();
        let consistent = self.fiat_shamir.challenge == self.range_proof.challenge
            && self.fiat_shamir.commitments == expected_encodings;
        results.insert("binding".to_string(), consistent);
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zkid_curve::{CurveGroup, CurveId};

    use crate::provider::OsRngProvider;

    fn pedersen() -> PedersenGenerator {
        PedersenGenerator::new(CurveGroup::new(CurveId::Secp256k1.params())).unwrap()
    }

    fn statement() -> serde_json::Value {
        serde_json::json!({
            "type": "range_proof",
            "description": "age offset within bound",
            "publicInputs": {"range": "16"},
        })
    }

    #[test]
    fn test_value_five_range_sixteen_verifies() {
        let ped = pedersen();
        let bundle = ped
            .prove_range(&OsRngProvider, 5, 16, &statement())
            .unwrap();
        assert_eq!(bundle.range_proof.bits.len(), 4);
        assert!(ped.verify_range(&bundle.range_proof));
        let results = bundle.verify(&ped, &OsRngProvider);
        assert!(results.values().all(|ok| *ok), "{results:?}");
    }

    #[test]
    fn test_value_twenty_range_sixteen_fails_at_generation() {
        let ped = pedersen();
        let err = ped
            .prove_range(&OsRngProvider, 20, 16, &statement())
            .unwrap_err();
        assert!(matches!(err, GenerationError::ValueOutOfRange { range: 16 }));
    }

    #[test]
    fn test_boundary_values() {
        let ped = pedersen();
        // 0 and range-1 are both provable.
        assert!(ped.prove_range(&OsRngProvider, 0, 16, &statement()).is_ok());
        assert!(ped.prove_range(&OsRngProvider, 15, 16, &statement()).is_ok());
        // range itself is not.
        assert!(ped.prove_range(&OsRngProvider, 16, 16, &statement()).is_err());
    }

    #[test]
    fn test_degenerate_range_rejected() {
        let ped = pedersen();
        assert!(matches!(
            ped.prove_range(&OsRngProvider, 0, 1, &statement()),
            Err(GenerationError::InvalidInput { .. })
        ));
        assert!(ped.prove_range(&OsRngProvider, 0, 0, &statement()).is_err());
    }

    #[test]
    fn test_non_power_of_two_range() {
        let ped = pedersen();
        // range 100 -> 7 bits.
        let bundle = ped
            .prove_range(&OsRngProvider, 63, 100, &statement())
            .unwrap();
        assert_eq!(bundle.range_proof.bits.len(), 7);
        assert!(ped.verify_range(&bundle.range_proof));
    }

    #[test]
    fn test_tampered_bit_response_fails_whole_proof() {
        let ped = pedersen();
        let bundle = ped
            .prove_range(&OsRngProvider, 5, 16, &statement())
            .unwrap();
        let mut proof = bundle.range_proof;
        proof.bits[2].response_bit = flip_first_hex_char(&proof.bits[2].response_bit);
        assert!(!ped.verify_range(&proof));
    }

    #[test]
    fn test_tampered_challenge_fails() {
        let ped = pedersen();
        let bundle = ped
            .prove_range(&OsRngProvider, 5, 16, &statement())
            .unwrap();
        let mut proof = bundle.range_proof;
        proof.challenge = flip_first_hex_char(&proof.challenge);
        assert!(!ped.verify_range(&proof));
    }

    #[test]
    fn test_dropped_bit_fails() {
        let ped = pedersen();
        let bundle = ped
            .prove_range(&OsRngProvider, 5, 16, &statement())
            .unwrap();
        let mut proof = bundle.range_proof;
        proof.bits.pop();
        assert!(!ped.verify_range(&proof));
    }

    #[test]
    fn test_substituted_generator_rejected() {
        let ped = pedersen();
        let bundle = ped
            .prove_range(&OsRngProvider, 5, 16, &statement())
            .unwrap();
        let mut proof = bundle.range_proof;
        proof.blinding_generator = proof.generator.clone();
        assert!(!ped.verify_range(&proof));
    }

    #[test]
    fn test_mismatched_aggregate_commitment_fails() {
        let ped = pedersen();
        let bundle = ped
            .prove_range(&OsRngProvider, 5, 16, &statement())
            .unwrap();
        let other = ped
            .prove_range(&OsRngProvider, 6, 16, &statement())
            .unwrap();
        let mut proof = bundle.range_proof;
        proof.value_commitment = other.range_proof.value_commitment;
        assert!(!ped.verify_range(&proof));
    }

    fn flip_first_hex_char(hex: &str) -> String {
        let mut chars: Vec<char> = hex.chars().collect();
        chars[0] = if chars[0] == '0' { '1' } else { '0' };
        chars.into_iter().collect()
    }
}
