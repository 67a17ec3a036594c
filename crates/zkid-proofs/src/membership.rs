//! # Set-Membership Proofs — Disjunctive Sigma (OR) Protocol
//!
//! Proves a committed value is one of a public set without revealing
//! which member. For commitment `C = g^v h^r` and set `{s_0..s_m}`, each
//! branch states knowledge of `r` with `C - g^{s_j} = h^r`. The branch
//! for the true member runs a real Sigma transcript; every other branch
//! is simulated by choosing its response and challenge first and solving
//! backward for a commitment that satisfies the equation. One shared
//! Fiat-Shamir challenge is split across branches (`sum(c_j) = c_total`),
//! so a verifier checks all branches but cannot tell which was real.
//!
//! ## Security Invariant
//!
//! If the value is not in the set there is no branch to run honestly,
//! and generation fails with `GenerationError::ValueNotInSet`. A "proof"
//! of a false membership must never exist — this is a correctness
//! requirement, not an optimization.

use serde::{Deserialize, Serialize};

use zkid_core::CanonicalBytes;
use zkid_curve::{CurveId, Point, Scalar};

use crate::error::GenerationError;
use crate::pedersen::PedersenGenerator;
use crate::provider::CryptoProvider;
use crate::sigma::{compute_response, derive_challenge, sigma_commit, FiatShamirTransform};

/// One branch of the disjunction. Real and simulated branches are
/// indistinguishable by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipBranch {
    /// The set member this branch covers, hex.
    pub member: String,
    /// Branch commitment `A_j`, encoded.
    pub blinding_commitment: String,
    /// Branch challenge `c_j`, hex.
    pub challenge: String,
    /// Branch response `z_j`, hex.
    pub response: String,
}

/// A disjunctive set-membership proof. Public values only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetMembershipProof {
    /// The value commitment `C = g^v h^r`, encoded.
    pub commitment: String,
    /// One branch per set member, in set order.
    pub branches: Vec<MembershipBranch>,
    /// The shared challenge the branch challenges must sum to, hex.
    pub total_challenge: String,
    /// Generator `g`, encoded.
    pub generator: String,
    /// Blinding generator `h`, encoded.
    pub blinding_generator: String,
    /// Curve of the proof.
    pub curve: CurveId,
}

/// The set-membership component set stored in a proof record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipBundle {
    /// The disjunctive proof itself.
    pub set_membership: SetMembershipProof,
    /// The independently re-checkable Fiat-Shamir record.
    pub fiat_shamir: FiatShamirTransform,
}

/// Alias kept for discoverability next to the other generators; the
/// methods live on [`PedersenGenerator`] since the commitment scheme is
/// shared.
pub type SetMembershipGenerator = PedersenGenerator;

impl PedersenGenerator {
    /// Generate a membership proof for `value` within `set`.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for an empty set.
    /// - `ValueNotInSet` when `value` is not a member — generation fails
    ///   hard; nothing resembling a proof is produced.
    pub fn prove_membership(
        &self,
        provider: &dyn CryptoProvider,
        value: &Scalar,
        set: &[Scalar],
        statement: &serde_json::Value,
    ) -> Result<MembershipBundle, GenerationError> {
        if set.is_empty() {
            return Err(GenerationError::InvalidInput {
                name: "set".to_string(),
                reason: "set must not be empty".to_string(),
            });
        }
        let real_index = set
            .iter()
            .position(|member| member == value)
            .ok_or(GenerationError::ValueNotInSet)?;

        let group = self.group();
        let n = group.order();
        let h = self.blinding_generator().clone();

        let blinding = provider.random_scalar(group.params())?;
        let commitment = self.commit(value, &blinding)?;

        // Branch targets: T_j = C - g^{s_j}. For the real branch this is
        // exactly h^blinding.
        let mut targets = Vec::with_capacity(set.len());
        for member in set {
            let g_s = group.generator_mul(member)?;
            targets.push(group.sub(&commitment, &g_s)?);
        }

        // Simulate every branch except the real one: pick (c_j, z_j),
        // solve A_j = h^{z_j} - c_j·T_j.
        let mut simulated: Vec<Option<(Scalar, Scalar, Point)>> = Vec::with_capacity(set.len());
        for (j, target) in targets.iter().enumerate() {
            if j == real_index {
                simulated.push(None);
                continue;
            }
            let c_j = provider.random_scalar(group.params())?;
            let z_j = provider.random_scalar(group.params())?;
            let h_z = group.scalar_mul(&h, &z_j)?;
            let c_t = group.scalar_mul(target, &c_j)?;
            let a_j = group.sub(&h_z, &c_t)?;
            simulated.push(Some((c_j, z_j, a_j)));
        }

        // Real branch commit move.
        let real_commit = sigma_commit(group, &h, provider)?;

        let encodings: Vec<String> = simulated
            .iter()
            .map(|slot| match slot {
                Some((_, _, a_j)) => a_j.to_encoded(),
                None => real_commit.commitment().to_encoded(),
            })
            .collect();

        let binding = CanonicalBytes::new(&serde_json::json!({
            "context": "zkid/pedersen/membership/v1",
            "curve": group.params().id.as_str(),
            "commitment": commitment.to_encoded(),
            "generator": group.generator().to_encoded(),
            "blindingGenerator": h.to_encoded(),
            "set": set.iter().map(Scalar::to_hex).collect::<Vec<_>>(),
            "statement": statement,
        }))?;
        let total_challenge = derive_challenge(provider, group.params(), &encodings, &binding);

        // The real branch absorbs whatever challenge mass the simulated
        // branches did not claim: c_i = c_total - sum(c_j).
        let simulated_sum = simulated
            .iter()
            .flatten()
            .fold(Scalar::from_u64(0, n), |acc, (c_j, _, _)| acc.add(c_j, n));
        let real_challenge = total_challenge.sub(&simulated_sum, n);
        let (real_a, real_z) = compute_response(real_commit, &real_challenge, &blinding, n);

        let mut branches = Vec::with_capacity(set.len());
        let mut responses = Vec::with_capacity(set.len());
        for (j, member) in set.iter().enumerate() {
            let (c_j, z_j, a_j) = match &simulated[j] {
                Some((c_j, z_j, a_j)) => (c_j.clone(), z_j.clone(), a_j.clone()),
                None => (real_challenge.clone(), real_z.clone(), real_a.clone()),
            };
            responses.push(z_j.to_hex());
            branches.push(MembershipBranch {
                member: member.to_hex(),
                blinding_commitment: a_j.to_encoded(),
                challenge: c_j.to_hex(),
                response: z_j.to_hex(),
            });
        }

        let proof = SetMembershipProof {
            commitment: commitment.to_encoded(),
            branches,
            total_challenge: total_challenge.to_hex(),
            generator: group.generator().to_encoded(),
            blinding_generator: h.to_encoded(),
            curve: group.params().id,
        };
        let fiat_shamir = FiatShamirTransform::assemble(
            group.params(),
            encodings,
            &total_challenge,
            responses,
            &binding,
        );

        Ok(MembershipBundle {
            set_membership: proof,
            fiat_shamir,
        })
    }

    /// Verify the challenge split and every branch equation
    /// `h^{z_j} == A_j + c_j·(C - g^{s_j})`.
    pub fn verify_membership(&self, proof: &SetMembershipProof) -> bool {
        let group = self.group();
        let n = group.order();

        if proof.branches.is_empty() {
            return false;
        }
        if proof.generator != group.generator().to_encoded()
            || proof.blinding_generator != self.blinding_generator().to_encoded()
        {
            return false;
        }

        let (Ok(commitment), Ok(total_challenge)) = (
            Point::from_encoded(&proof.commitment),
            Scalar::from_hex(&proof.total_challenge, n),
        ) else {
            return false;
        };
        let h = self.blinding_generator();

        let mut challenge_sum = Scalar::from_u64(0, n);
        for branch in &proof.branches {
            let parsed = (
                Scalar::from_hex(&branch.member, n),
                Point::from_encoded(&branch.blinding_commitment),
                Scalar::from_hex(&branch.challenge, n),
                Scalar::from_hex(&branch.response, n),
            );
            let (Ok(member), Ok(a_j), Ok(c_j), Ok(z_j)) = parsed else {
                return false;
            };

            let target = match group
                .generator_mul(&member)
                .and_then(|g_s| group.sub(&commitment, &g_s))
            {
                Ok(t) => t,
                Err(_) => return false,
            };
            let lhs = match group.scalar_mul(h, &z_j) {
                Ok(p) => p,
                Err(_) => return false,
            };
            let rhs = match group
                .scalar_mul(&target, &c_j)
                .and_then(|ct| group.add(&a_j, &ct))
            {
                Ok(p) => p,
                Err(_) => return false,
            };
            if lhs != rhs {
                return false;
            }

            challenge_sum = challenge_sum.add(&c_j, n);
        }

        challenge_sum == total_challenge
    }
}

impl MembershipBundle {
    /// Verify every component: branch equations + challenge split, the
    /// Fiat-Shamir re-check, and cross-record consistency.
    pub fn verify(
        &self,
        generator: &PedersenGenerator,
        provider: &dyn CryptoProvider,
    ) -> std::collections::BTreeMap<String, bool> {
        let mut results = std::collections::BTreeMap::new();
        results.insert(
            "setMembership".to_string(),
            generator.verify_membership(&self.set_membership),
        );
        results.insert(
            "fiatShamir".to_string(),
            self.fiat_shamir.recheck(provider, generator.group().params()),
        );
        let expected_encodings: Vec<String> = self
            .set_membership
            .branches
            .iter()
            .map(|b| b.blinding_commitment.clone())
            .collect();
        let consistent = self.fiat_shamir.challenge == self.set_membership.total_challenge
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

    fn scalar(v: u64) -> Scalar {
        Scalar::from_u64(v, &CurveId::Secp256k1.params().n)
    }

    fn ages() -> Vec<Scalar> {
        vec![scalar(18), scalar(21), scalar(25), scalar(65)]
    }

    fn statement() -> serde_json::Value {
        serde_json::json!({
            "type": "set_membership",
            "description": "age is an approved checkpoint",
            "publicInputs": {"set": "18,21,25,65"},
        })
    }

    #[test]
    fn test_member_proves_and_verifies() {
        let ped = pedersen();
        let bundle = ped
            .prove_membership(&OsRngProvider, &scalar(21), &ages(), &statement())
            .unwrap();
        assert_eq!(bundle.set_membership.branches.len(), 4);
        assert!(ped.verify_membership(&bundle.set_membership));
        let results = bundle.verify(&ped, &OsRngProvider);
        assert!(results.values().all(|ok| *ok), "{results:?}");
    }

    #[test]
    fn test_every_position_in_set_works() {
        let ped = pedersen();
        for v in [18, 21, 25, 65] {
            let bundle = ped
                .prove_membership(&OsRngProvider, &scalar(v), &ages(), &statement())
                .unwrap();
            assert!(ped.verify_membership(&bundle.set_membership), "member {v}");
        }
    }

    #[test]
    fn test_non_member_fails_at_generation() {
        let ped = pedersen();
        let err = ped
            .prove_membership(&OsRngProvider, &scalar(17), &ages(), &statement())
            .unwrap_err();
        assert!(matches!(err, GenerationError::ValueNotInSet));
    }

    #[test]
    fn test_empty_set_rejected() {
        let ped = pedersen();
        assert!(matches!(
            ped.prove_membership(&OsRngProvider, &scalar(18), &[], &statement()),
            Err(GenerationError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_singleton_set() {
        let ped = pedersen();
        let bundle = ped
            .prove_membership(&OsRngProvider, &scalar(42), &[scalar(42)], &statement())
            .unwrap();
        assert!(ped.verify_membership(&bundle.set_membership));
    }

    #[test]
    fn test_tampered_branch_response_fails() {
        let ped = pedersen();
        let bundle = ped
            .prove_membership(&OsRngProvider, &scalar(21), &ages(), &statement())
            .unwrap();
        let mut proof = bundle.set_membership;
        proof.branches[0].response = flip_first_hex_char(&proof.branches[0].response);
        assert!(!ped.verify_membership(&proof));
    }

    #[test]
    fn test_tampered_total_challenge_fails() {
        let ped = pedersen();
        let bundle = ped
            .prove_membership(&OsRngProvider, &scalar(21), &ages(), &statement())
            .unwrap();
        let mut proof = bundle.set_membership;
        proof.total_challenge = flip_first_hex_char(&proof.total_challenge);
        assert!(!ped.verify_membership(&proof));
    }

    #[test]
    fn test_dropped_branch_fails() {
        // Removing a branch breaks the challenge split.
        let ped = pedersen();
        let bundle = ped
            .prove_membership(&OsRngProvider, &scalar(21), &ages(), &statement())
            .unwrap();
        let mut proof = bundle.set_membership;
        proof.branches.pop();
        assert!(!ped.verify_membership(&proof));
    }

    #[test]
    fn test_swapped_member_fails() {
        // Rewriting a branch's member changes its target T_j.
        let ped = pedersen();
        let bundle = ped
            .prove_membership(&OsRngProvider, &scalar(21), &ages(), &statement())
            .unwrap();
        let mut proof = bundle.set_membership;
        proof.branches[0].member = scalar(19).to_hex();
        assert!(!ped.verify_membership(&proof));
    }

    #[test]
    fn test_real_branch_is_not_identifiable_by_shape() {
        // All branches carry the same field set; nothing marks the real
        // index. This is a structural check, not a distinguishing attack.
        let ped = pedersen();
        let bundle = ped
            .prove_membership(&OsRngProvider, &scalar(25), &ages(), &statement())
            .unwrap();
        for branch in &bundle.set_membership.branches {
            assert!(!branch.blinding_commitment.is_empty());
            assert!(!branch.challenge.is_empty());
            assert!(!branch.response.is_empty());
        }
    }

    fn flip_first_hex_char(hex: &str) -> String {
        let mut chars: Vec<char> = hex.chars().collect();
        chars[0] = if chars[0] == '0' { '1' } else { '0' };
        chars.into_iter().collect()
    }
}
