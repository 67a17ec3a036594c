//! # Hash Algorithm Registry & Content Digests
//!
//! Defines `HashAlgorithm` — the closed set of digest functions the proof
//! engine may use — and `ContentDigest`, an algorithm-tagged digest value.
//!
//! Each supported curve pairs with a digest of matching width (secp256k1 →
//! SHA-256, P-384 → SHA-384, P-521 → SHA-512), so challenge entropy is
//! never narrower than the group order it is reduced into.
//!
//! ## Security Invariant
//!
//! `digest()` accepts only `&CanonicalBytes`, ensuring every digest in the
//! system is computed over canonicalized input. The raw-byte entry point
//! `hash_bytes()` exists for the randomness/hashing collaborator boundary,
//! where inputs are already fixed-width protocol encodings rather than
//! JSON documents.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::canonical::CanonicalBytes;
use crate::error::CoreError;

/// The hash function used for challenges and digests.
///
/// A closed registry: parsing an unknown name is an error, never a silent
/// substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    /// SHA-256 — paired with secp256k1.
    #[serde(rename = "sha256")]
    Sha256,
    /// SHA-384 — paired with P-384.
    #[serde(rename = "sha384")]
    Sha384,
    /// SHA-512 — paired with P-521.
    #[serde(rename = "sha512")]
    Sha512,
}

impl HashAlgorithm {
    /// Returns the algorithm identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    /// Parse an algorithm name.
    ///
    /// # Errors
    ///
    /// `CoreError::UnknownHashAlgorithm` for any name outside the registry.
    pub fn parse(name: &str) -> Result<Self, CoreError> {
        match name.trim().to_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "sha384" | "sha-384" => Ok(Self::Sha384),
            "sha512" | "sha-512" => Ok(Self::Sha512),
            other => Err(CoreError::UnknownHashAlgorithm(other.to_string())),
        }
    }

    /// Digest output length in bytes.
    pub fn digest_len(&self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An algorithm-tagged digest value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest {
    /// The hash algorithm that produced this digest.
    pub algorithm: HashAlgorithm,
    /// The raw digest bytes (32, 48, or 64 depending on algorithm).
    pub bytes: Vec<u8>,
}

impl ContentDigest {
    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.to_hex())
    }
}

/// Hash raw bytes with the named algorithm.
///
/// This is the primitive behind the randomness/hashing collaborator. For
/// JSON-shaped material prefer [`digest()`], which enforces
/// canonicalization at the type level.
pub fn hash_bytes(algorithm: HashAlgorithm, data: &[u8]) -> Vec<u8> {
    match algorithm {
        HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
        HashAlgorithm::Sha384 => Sha384::digest(data).to_vec(),
        HashAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
    }
}

/// Compute an algorithm-tagged digest from canonical bytes.
pub fn digest(algorithm: HashAlgorithm, data: &CanonicalBytes) -> ContentDigest {
    ContentDigest {
        algorithm,
        bytes: hash_bytes(algorithm, data.as_bytes()),
    }
}

/// Compute a digest hex string from canonical bytes.
pub fn digest_hex(algorithm: HashAlgorithm, data: &CanonicalBytes) -> String {
    digest(algorithm, data).to_hex()
}
