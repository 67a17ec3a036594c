//! # Statement Model
//!
//! A `ZkStatement` describes what a caller wants to prove: the statement
//! type, human-readable description, public inputs, private inputs, and
//! the relation text. Statements are built by the identity/session layer
//! for a single proof request and discarded after generation.
//!
//! ## Security Invariant
//!
//! `PrivateInputs` does not implement `Serialize`. The statement embedded
//! in a proof record is the [`PublicStatement`] projection, produced by
//! [`ZkStatement::public_projection`] with the private map stripped — so
//! no private input can leak into a serialized proof, a cache export, or
//! a challenge binding by construction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The kind of statement being proven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementType {
    /// Knowledge of `x` with `y = g^x`.
    #[serde(rename = "discrete_log")]
    DiscreteLog,
    /// Knowledge of an opening `(m, r)` of `C = g^m h^r`.
    #[serde(rename = "pedersen_commitment")]
    PedersenCommitment,
    /// A committed value lies in `[0, range)`.
    #[serde(rename = "range_proof")]
    RangeProof,
    /// A committed value is a member of a public set.
    #[serde(rename = "set_membership")]
    SetMembership,
    /// Caller-defined statement — accepted in the model, rejected by the
    /// engine's generators.
    #[serde(rename = "custom")]
    Custom,
}

impl StatementType {
    /// Wire name of this statement type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DiscreteLog => "discrete_log",
            Self::PedersenCommitment => "pedersen_commitment",
            Self::RangeProof => "range_proof",
            Self::SetMembership => "set_membership",
            Self::Custom => "custom",
        }
    }
}

impl std::fmt::Display for StatementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Secret inputs to a proof request.
///
/// Deliberately does **not** implement `Serialize`, and its `Debug`
/// output is redacted — private inputs exist in memory for the duration
/// of one generation call and nowhere else.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PrivateInputs(BTreeMap<String, String>);

impl PrivateInputs {
    /// An empty private-input map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an existing map.
    pub fn from_map(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }

    /// Insert a secret input.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a secret input.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Whether any secret inputs are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for PrivateInputs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PrivateInputs(<{} redacted>)", self.0.len())
    }
}

/// A proof request: what to prove, with which inputs.
#[derive(Debug, Clone)]
pub struct ZkStatement {
    /// The statement type, selecting the generator.
    pub statement_type: StatementType,
    /// Human-readable description of the claim.
    pub description: String,
    /// Public inputs, visible in the proof record.
    pub public_inputs: BTreeMap<String, String>,
    /// Secret inputs, never serialized.
    pub private_inputs: PrivateInputs,
    /// The relation being proven, as text (e.g. `"y = g^x"`).
    pub relation: String,
}

impl ZkStatement {
    /// Start a statement of the given type.
    pub fn new(statement_type: StatementType, description: impl Into<String>) -> Self {
        Self {
            statement_type,
            description: description.into(),
            public_inputs: BTreeMap::new(),
            private_inputs: PrivateInputs::new(),
            relation: String::new(),
        }
    }

    /// Add a public input.
    pub fn with_public(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.public_inputs.insert(key.into(), value.into());
        self
    }

    /// Add a private input.
    pub fn with_private(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.private_inputs.insert(key, value);
        self
    }

    /// Set the relation text.
    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.relation = relation.into();
        self
    }

    /// The serializable projection: everything except private inputs.
    pub fn public_projection(&self) -> PublicStatement {
        PublicStatement {
            statement_type: self.statement_type,
            description: self.description.clone(),
            public_inputs: self.public_inputs.clone(),
            relation: self.relation.clone(),
        }
    }
}

/// The statement as it appears inside a proof record — private inputs
/// stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicStatement {
    /// The statement type.
    #[serde(rename = "type")]
    pub statement_type: StatementType,
    /// Human-readable description of the claim.
    pub description: String,
    /// Public inputs.
    pub public_inputs: BTreeMap<String, String>,
    /// The relation being proven.
    pub relation: String,
}
