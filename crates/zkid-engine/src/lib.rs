//! # zkid-engine — Proof Orchestration
//!
//! The public surface of the ZKID Stack: callers build a `ZkStatement`,
//! the `ZkEngine` dispatches it to the matching generator, stamps
//! metadata, optionally caches the resulting `ZkProof`, and later
//! verifies proofs presented back to it.
//!
//! ## Architecture
//!
//! - **Statements** (`statement.rs`): typed statement model with a
//!   non-serializable `PrivateInputs` holder — a private input
//!   structurally cannot appear in a serialized proof.
//! - **Proof records** (`proof.rs`): the externally visible `ZkProof`
//!   shape with a tagged `ProofComponents` union, so components
//!   irrelevant to a statement type are unrepresentable.
//! - **Cache** (`cache.rs`): time-bounded store with capacity eviction,
//!   statistics, and export/import for persistence handoff.
//! - **Config** (`config.rs`): owned engine configuration; unknown curve
//!   names fail fast.
//! - **Engine** (`engine.rs`): the orchestrator plus the claim factories
//!   (age, credential, permission, selective disclosure).
//!
//! ## Design Notes
//!
//! There is no global state: each `ZkEngine` owns its cache and
//! configuration and is handed its randomness/hashing collaborator at
//! construction. Two engines with different curves coexist in one
//! process, and tests construct engines with deterministic providers.
//!
//! A proof is valid only if **all** components relevant to its statement
//! type validate — the algebraic equations and the Fiat-Shamir re-check
//! together.

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod proof;
pub mod statement;

pub use cache::{CacheExport, CacheStats, ProofCache};
pub use config::{ConfigUpdate, EngineConfig};
pub use engine::{GenerateOptions, VerificationOutcome, ZkEngine};
pub use error::{CacheImportError, ConfigurationError};
pub use proof::{ProofComponents, ProofId, SecurityLevel, ZkProof};
pub use statement::{PrivateInputs, PublicStatement, StatementType, ZkStatement};
