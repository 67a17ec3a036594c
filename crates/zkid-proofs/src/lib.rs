//! # zkid-proofs — Sigma Protocols & Fiat-Shamir
//!
//! The protocol layer of the ZKID Stack: generic three-move Sigma
//! execution made non-interactive via Fiat-Shamir, and the two proof
//! families built on it.
//!
//! ## Architecture
//!
//! - **Provider** (`provider.rs`): the randomness/hashing collaborator
//!   boundary. The protocol code never touches an RNG or a hash function
//!   directly; everything flows through an injected `CryptoProvider`.
//! - **Sigma manager** (`sigma.rs`): commit → challenge → response with
//!   move-consumed nonces, plus the standalone `FiatShamirTransform`
//!   record a verifier can re-check independently.
//! - **Schnorr** (`schnorr.rs`): discrete-log knowledge proofs.
//! - **Pedersen** (`pedersen.rs`, `range.rs`, `membership.rs`):
//!   commitment-opening proofs, bitwise range proofs, and disjunctive
//!   set-membership proofs.
//!
//! ## Security Invariants
//!
//! - A nonce is consumed exactly once: `SigmaCommit` is taken by value
//!   when the response is computed, so reusing a nonce for a second
//!   response does not compile.
//! - Challenge inputs always include the full public statement through
//!   `CanonicalBytes`, never just the commitment.
//! - Verification is pure: no provider randomness, no secrets, and a
//!   malformed record yields `false` rather than an error.

pub mod error;
pub mod membership;
pub mod pedersen;
pub mod provider;
pub mod range;
pub mod schnorr;
pub mod sigma;
pub mod testing;

pub use error::GenerationError;
pub use membership::{MembershipBundle, SetMembershipGenerator, SetMembershipProof};
pub use pedersen::{PedersenBundle, PedersenGenerator, PedersenOpeningProof};
pub use provider::{CryptoProvider, OsRngProvider, ProviderError};
pub use range::{RangeBundle, RangeProof};
pub use schnorr::{SchnorrBundle, SchnorrGenerator, SchnorrProof};
pub use sigma::{
    compute_response, derive_challenge, sigma_commit, FiatShamirTransform, SigmaCommit,
    SigmaTranscript,
};
