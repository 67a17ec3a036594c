//! # Proof Records
//!
//! The externally visible `ZkProof` shape: identity, the public
//! statement, the proof components for the statement's type, and
//! issuance/expiry metadata. Serialized keys are camelCase and
//! timestamps ISO8601, matching the persistence record shape consumed
//! by the identity layer.
//!
//! Components are a tagged union selected by statement type: a
//! discrete-log proof cannot carry (or be judged by) Pedersen
//! components, and vice versa — the invalid states are unrepresentable
//! rather than checked.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use zkid_core::Timestamp;
use zkid_curve::CurveId;
use zkid_proofs::{MembershipBundle, PedersenBundle, RangeBundle, SchnorrBundle};

use crate::statement::{PublicStatement, StatementType};

/// Unique identifier of an issued proof.
///
/// Random UUID v4 — collisions are not a practical concern, which is
/// also why id allocation needs no coordination between engines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProofId(String);

impl ProofId {
    /// Allocate a fresh random id.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// View as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProofId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProofId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Claimed strength of a proof, mapping to a default curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecurityLevel {
    /// secp256k1 / SHA-256.
    #[serde(rename = "standard")]
    Standard,
    /// P-384 / SHA-384.
    #[serde(rename = "high")]
    High,
    /// P-521 / SHA-512.
    #[serde(rename = "maximum")]
    Maximum,
}

impl SecurityLevel {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::High => "high",
            Self::Maximum => "maximum",
        }
    }

    /// The curve this level selects by default.
    pub fn default_curve(&self) -> CurveId {
        match self {
            Self::Standard => CurveId::Secp256k1,
            Self::High => CurveId::P384,
            Self::Maximum => CurveId::P521,
        }
    }

    /// The level a given curve reports.
    pub fn for_curve(curve: CurveId) -> Self {
        match curve {
            CurveId::Secp256k1 => Self::Standard,
            CurveId::P384 => Self::High,
            CurveId::P521 => Self::Maximum,
        }
    }
}

impl std::fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The proof components for one statement type.
///
/// Adjacently tagged: `{"scheme": "discrete_log", "records": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scheme", content = "records")]
pub enum ProofComponents {
    /// Schnorr proof + sigma transcript + Fiat-Shamir record.
    #[serde(rename = "discrete_log")]
    Schnorr(SchnorrBundle),
    /// Pedersen opening proof + Fiat-Shamir record.
    #[serde(rename = "pedersen_commitment")]
    Pedersen(PedersenBundle),
    /// Bitwise range proof + Fiat-Shamir record.
    #[serde(rename = "range_proof")]
    Range(RangeBundle),
    /// Disjunctive membership proof + Fiat-Shamir record.
    #[serde(rename = "set_membership")]
    SetMembership(MembershipBundle),
}

impl ProofComponents {
    /// The statement type these components belong to.
    pub fn statement_type(&self) -> StatementType {
        match self {
            Self::Schnorr(_) => StatementType::DiscreteLog,
            Self::Pedersen(_) => StatementType::PedersenCommitment,
            Self::Range(_) => StatementType::RangeProof,
            Self::SetMembership(_) => StatementType::SetMembership,
        }
    }
}

/// An issued proof. Created once by the engine, immutable thereafter —
/// a cached proof is only ever replaced by eviction, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZkProof {
    /// Unique proof id.
    pub id: ProofId,
    /// Statement type, duplicated at the top level for dispatch without
    /// descending into the statement.
    #[serde(rename = "type")]
    pub statement_type: StatementType,
    /// The public statement (private inputs stripped at construction).
    pub statement: PublicStatement,
    /// The proof components for this statement type.
    pub proof: ProofComponents,
    /// Public inputs, including engine-added values such as the
    /// commitment or public key encodings.
    pub public_inputs: BTreeMap<String, String>,
    /// Issuance instant.
    pub timestamp: Timestamp,
    /// Expiry instant; always after `timestamp`.
    pub expires_at: Timestamp,
    /// Reference digest of statement + security level + issuance time.
    /// An audit handle — NOT a substitute for cryptographic
    /// verification of the components.
    pub verification_key: String,
    /// Claimed strength.
    pub security_level: SecurityLevel,
    /// Curve name.
    pub algorithm: CurveId,
    /// Group-order width in bits.
    pub key_length: u16,
    /// Always `false`: discrete-log constructions are not post-quantum,
    /// and the record says so honestly.
    pub quantum_resistant: bool,
}

impl ZkProof {
    /// Whether the proof is expired at `now`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at <= now
    }
}
