//! # Curve Points — Affine Coordinates with Explicit Identity
//!
//! A `Point` is either the group identity or an affine `(x, y)` pair over
//! the active curve's field. The identity is explicit so the group law is
//! total — `n·G` is representable, and chord addition of inverse points
//! has a value to return.
//!
//! ## Encoding
//!
//! Points travel in proof records as strings: `"<x-hex>:<y-hex>"` with
//! lowercase hex, or the literal `"identity"`. Verifiers parse these with
//! [`Point::from_encoded`]; a malformed encoding is a verification
//! failure, never a panic.

use num_bigint::BigUint;

use crate::error::CurveError;

/// A point on (or off — callers must validate) a short-Weierstrass curve.
///
/// Equality is coordinate equality. Whether the coordinates satisfy the
/// active curve equation is checked by `CurveGroup`, not here: a `Point`
/// is a value, the group is the authority.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Point {
    /// The group identity (point at infinity).
    Identity,
    /// An affine point.
    Affine {
        /// x coordinate, reduced modulo the field prime.
        x: BigUint,
        /// y coordinate, reduced modulo the field prime.
        y: BigUint,
    },
}

impl Point {
    /// Construct an affine point from coordinates.
    pub fn affine(x: BigUint, y: BigUint) -> Self {
        Self::Affine { x, y }
    }

    /// Whether this is the group identity.
    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Identity)
    }

    /// The x coordinate, if affine.
    pub fn x(&self) -> Option<&BigUint> {
        match self {
            Self::Identity => None,
            Self::Affine { x, .. } => Some(x),
        }
    }

    /// The y coordinate, if affine.
    pub fn y(&self) -> Option<&BigUint> {
        match self {
            Self::Identity => None,
            Self::Affine { y, .. } => Some(y),
        }
    }

    /// Render as the wire encoding: `"<x-hex>:<y-hex>"` or `"identity"`.
    pub fn to_encoded(&self) -> String {
        match self {
            Self::Identity => "identity".to_string(),
            Self::Affine { x, y } => {
                format!("{}:{}", biguint_to_hex(x), biguint_to_hex(y))
            }
        }
    }

    /// Parse the wire encoding.
    ///
    /// # Errors
    ///
    /// `CurveError::InvalidPointEncoding` for anything that is not
    /// `"identity"` or two `:`-separated lowercase-hex coordinates.
    pub fn from_encoded(s: &str) -> Result<Self, CurveError> {
        let s = s.trim();
        if s == "identity" {
            return Ok(Self::Identity);
        }
        let (xs, ys) = s
            .split_once(':')
            .ok_or_else(|| CurveError::InvalidPointEncoding(s.to_string()))?;
        let x = biguint_from_hex(xs)
            .ok_or_else(|| CurveError::InvalidPointEncoding(s.to_string()))?;
        let y = biguint_from_hex(ys)
            .ok_or_else(|| CurveError::InvalidPointEncoding(s.to_string()))?;
        Ok(Self::Affine { x, y })
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_encoded())
    }
}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identity => f.write_str("Point(identity)"),
            Self::Affine { x, .. } => {
                let hex = biguint_to_hex(x);
                write!(f, "Point({}...)", &hex[..hex.len().min(8)])
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Hex helpers (shared with scalar encoding; no external hex crate)
// ---------------------------------------------------------------------------

/// Lowercase hex, no leading zeros beyond a single `"0"`.
pub(crate) fn biguint_to_hex(v: &BigUint) -> String {
    v.to_str_radix(16)
}

/// Parse lowercase/uppercase hex; empty or non-hex input is `None`.
pub(crate) fn biguint_from_hex(s: &str) -> Option<BigUint> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    BigUint::parse_bytes(s.as_bytes(), 16)
}
