//! # Canonical Serialization — Deterministic Hash-Input Bytes
//!
//! This module defines `CanonicalBytes`, the sole construction path for
//! bytes entering any digest in the ZKID Stack: Fiat-Shamir challenge
//! material, verification-key digests, statement bindings.
//!
//! ## Security Invariant
//!
//! A Fiat-Shamir challenge is only as strong as the bytes it hashes. If a
//! prover and verifier serialize the same public statement differently, the
//! verifier recomputes a different challenge and sound proofs fail — or
//! worse, an attacker finds two statements with colliding serializations.
//! `CanonicalBytes` has a private inner field; the only way to construct it
//! is `CanonicalBytes::new()`, which rejects floats and serializes via
//! RFC 8785 (JSON Canonicalization Scheme): sorted keys, compact
//! separators, deterministic byte sequence.
//!
//! Any function hashing challenge material accepts `&CanonicalBytes`, never
//! raw `&[u8]`, so a non-canonical hash input is a compile error.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by JCS-compatible canonicalization.
///
/// # Invariants
///
/// - The only constructor is `CanonicalBytes::new()`.
/// - No float values anywhere in the serialized tree.
/// - Object keys are sorted with compact separators (RFC 8785).
///
/// These invariants are enforced by the constructor and cannot be violated
/// by downstream code because the inner `Vec<u8>` is private.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::FloatRejected` if the value contains
    /// a float anywhere in its tree. Floats have non-deterministic JCS
    /// number-serialization edge cases; scalar values must travel as
    /// strings or integers. Returns `SerializationFailed` if JCS
    /// serialization fails.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        reject_floats(&value)?;
        let s = serde_jcs::to_string(&value)?;
        Ok(Self(s.into_bytes()))
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Walk a JSON value tree and reject any float leaf.
///
/// Integers representable as `i64`/`u64` pass; everything `serde_json`
/// classifies as f64-only is refused. Key coercion is unnecessary here —
/// `serde_json::Map` keys are already strings — and key ordering is
/// handled by `serde_jcs` at serialization time.
fn reject_floats(value: &Value) -> Result<(), CanonicalizationError> {
    match value {
        Value::Number(n) if n.is_f64() && !n.is_i64() && !n.is_u64() => {
            // as_f64 cannot fail for a number serde_json stored as f64.
            Err(CanonicalizationError::FloatRejected(
                n.as_f64().unwrap_or(f64::NAN),
            ))
        }
        Value::Object(map) => map.values().try_for_each(reject_floats),
        Value::Array(arr) => arr.iter().try_for_each(reject_floats),
        _ => Ok(()),
    }
}
