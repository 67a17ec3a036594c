//! # zkid-core — Foundational Types for the ZKID Stack
//!
//! This crate is the bedrock of the ZKID Stack. It defines the primitives
//! every proof flows through: canonical byte production for hash inputs,
//! the hash-algorithm registry, content digests, and UTC-only timestamps.
//! Every other crate in the workspace depends on `zkid-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalBytes` newtype.** ALL hash-input bytes — Fiat-Shamir
//!    challenge material, verification-key digests — flow through
//!    `CanonicalBytes::new()`. No raw `serde_json::to_vec()` for hashing.
//!    Two provers serializing the same public statement always hash the
//!    same bytes.
//!
//! 2. **Algorithm-tagged digests.** `ContentDigest` carries its
//!    `HashAlgorithm` so a digest is self-describing; unknown algorithm
//!    names fail at parse time instead of being silently mapped.
//!
//! 3. **UTC-only timestamps.** The `Timestamp` type enforces UTC with Z
//!    suffix and seconds precision, so proof issuance and expiry instants
//!    serialize identically everywhere.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `zkid-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use digest::{digest, digest_hex, hash_bytes, ContentDigest, HashAlgorithm};
pub use error::{CanonicalizationError, CoreError};
pub use temporal::Timestamp;
