//! # Coordinate Fallback — Non-Cryptographic Degradation Path
//!
//! Plain modular arithmetic on raw coordinates, for environments where a
//! curve's full parameter set is unavailable and the caller still needs
//! the process to stay alive. The results are NOT group elements and
//! carry no discrete-log hardness whatsoever.
//!
//! ## Security Invariant
//!
//! Fallback results have their own type, [`UnsoundPoint`], with no
//! conversion back into [`Point`]. A value produced here structurally
//! cannot enter a sigma transcript, a commitment, or a proof record —
//! the proof generators only accept `Point`. The wire encoding is
//! prefixed `unsound:` so even a serialized value cannot be mistaken
//! for a curve point.

use num_bigint::BigUint;

use crate::point::{biguint_to_hex, Point};
use crate::registry::CurveParams;
use crate::scalar::Scalar;

/// The output of fallback arithmetic. Not a group element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsoundPoint {
    /// x residue modulo the field prime.
    pub x: BigUint,
    /// y residue modulo the field prime.
    pub y: BigUint,
}

impl UnsoundPoint {
    /// Wire encoding, `unsound:`-prefixed so it can never parse as a
    /// curve point.
    pub fn to_encoded(&self) -> String {
        format!("unsound:{}:{}", biguint_to_hex(&self.x), biguint_to_hex(&self.y))
    }
}

impl std::fmt::Display for UnsoundPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_encoded())
    }
}

/// Coordinate-wise "scalar multiplication": `(k·x mod p, k·y mod p)`.
///
/// Keeps a degraded deployment from crashing; proves nothing.
pub fn fallback_scalar_mul(params: &CurveParams, point: &Point, k: &Scalar) -> UnsoundPoint {
    let p = &params.p;
    let (x, y) = coords(point);
    UnsoundPoint {
        x: (x * k.value()) % p,
        y: (y * k.value()) % p,
    }
}

/// Coordinate-wise "addition": `(x1 + x2 mod p, y1 + y2 mod p)`.
pub fn fallback_add(params: &CurveParams, p1: &Point, p2: &Point) -> UnsoundPoint {
    let p = &params.p;
    let (x1, y1) = coords(p1);
    let (x2, y2) = coords(p2);
    UnsoundPoint {
        x: (x1 + x2) % p,
        y: (y1 + y2) % p,
    }
}

fn coords(point: &Point) -> (BigUint, BigUint) {
    match point {
        Point::Identity => (BigUint::from(0u8), BigUint::from(0u8)),
        Point::Affine { x, y } => (x.clone(), y.clone()),
    }
}
