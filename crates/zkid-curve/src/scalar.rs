//! # Scalars — Group-Order Residues
//!
//! A `Scalar` is an unsigned big integer reduced modulo the active curve's
//! group order `n` at construction. There is no constructor that skips the
//! reduction, so every scalar stored in a proof is in `[0, n)` by
//! construction.
//!
//! Scalars travel in proof records as lowercase hex strings; statement
//! inputs may also supply them in decimal (or `0x`-prefixed hex), which
//! [`Scalar::parse`] accepts.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::CurveError;
use crate::point::{biguint_from_hex, biguint_to_hex};

/// A residue modulo a curve's group order.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Scalar(BigUint);

impl Scalar {
    /// Reduce an arbitrary big integer into `[0, n)`.
    pub fn reduce(value: BigUint, order: &BigUint) -> Self {
        Self(value % order)
    }

    /// Reduce a small constant. Test and factory convenience.
    pub fn from_u64(value: u64, order: &BigUint) -> Self {
        Self::reduce(BigUint::from(value), order)
    }

    /// Parse a statement-input scalar: decimal digits, or hex with a
    /// `0x` prefix. Reduced modulo `order`.
    ///
    /// # Errors
    ///
    /// `CurveError::InvalidScalarEncoding` when the string is neither.
    pub fn parse(s: &str, order: &BigUint) -> Result<Self, CurveError> {
        let s = s.trim();
        let value = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            biguint_from_hex(hex)
        } else if s.is_empty() {
            None
        } else {
            BigUint::parse_bytes(s.as_bytes(), 10)
        };
        value
            .map(|v| Self::reduce(v, order))
            .ok_or_else(|| CurveError::InvalidScalarEncoding(s.to_string()))
    }

    /// Parse a proof-record scalar: bare lowercase hex. Reduced modulo
    /// `order` — a verifier re-reduces rather than trusting the record.
    pub fn from_hex(s: &str, order: &BigUint) -> Result<Self, CurveError> {
        biguint_from_hex(s)
            .map(|v| Self::reduce(v, order))
            .ok_or_else(|| CurveError::InvalidScalarEncoding(s.to_string()))
    }

    /// Render as lowercase hex.
    pub fn to_hex(&self) -> String {
        biguint_to_hex(&self.0)
    }

    /// The underlying residue.
    pub fn value(&self) -> &BigUint {
        &self.0
    }

    /// Whether this is the zero residue.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// `(self + other) mod n`.
    pub fn add(&self, other: &Scalar, order: &BigUint) -> Scalar {
        Self((&self.0 + &other.0) % order)
    }

    /// `(self - other) mod n`.
    pub fn sub(&self, other: &Scalar, order: &BigUint) -> Scalar {
        Self(((&self.0 + order) - &other.0) % order)
    }

    /// `(self * other) mod n`.
    pub fn mul(&self, other: &Scalar, order: &BigUint) -> Scalar {
        Self((&self.0 * &other.0) % order)
    }

    /// `(-self) mod n`.
    pub fn neg(&self, order: &BigUint) -> Scalar {
        Self((order - &self.0) % order)
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::fmt::Debug for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hex = self.to_hex();
        write!(f, "Scalar({}...)", &hex[..hex.len().min(8)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> BigUint {
        BigUint::from(97u8)
    }

    #[test]
    fn test_reduction_at_construction() {
        let s = Scalar::reduce(BigUint::from(200u8), &order());
        assert_eq!(s.value(), &BigUint::from(6u8));
    }

    #[test]
    fn test_parse_decimal_and_hex() {
        let n = order();
        assert_eq!(Scalar::parse("42", &n).unwrap().value(), &BigUint::from(42u8));
        assert_eq!(Scalar::parse("0x2a", &n).unwrap().value(), &BigUint::from(42u8));
        assert_eq!(Scalar::parse(" 0X2A ", &n).unwrap().value(), &BigUint::from(42u8));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let n = order();
        assert!(Scalar::parse("", &n).is_err());
        assert!(Scalar::parse("12.5", &n).is_err());
        assert!(Scalar::parse("0x", &n).is_err());
        assert!(Scalar::parse("forty-two", &n).is_err());
    }

    #[test]
    fn test_hex_roundtrip() {
        let n = order();
        let s = Scalar::from_u64(77, &n);
        assert_eq!(Scalar::from_hex(&s.to_hex(), &n).unwrap(), s);
    }

    #[test]
    fn test_modular_arithmetic() {
        let n = order();
        let a = Scalar::from_u64(90, &n);
        let b = Scalar::from_u64(10, &n);
        assert_eq!(a.add(&b, &n).value(), &BigUint::from(3u8));
        assert_eq!(b.sub(&a, &n).value(), &BigUint::from(17u8));
        assert_eq!(a.mul(&b, &n).value(), &BigUint::from((90u32 * 10) % 97));
        assert_eq!(a.neg(&n).value(), &BigUint::from(7u8));
        assert!(Scalar::from_u64(0, &n).neg(&n).is_zero());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    use crate::registry::CurveId;

    proptest! {
        /// Construction always lands in [0, n).
        #[test]
        fn reduced_below_order(v in any::<u128>()) {
            let n = &CurveId::Secp256k1.params().n;
            let s = Scalar::reduce(BigUint::from(v), n);
            prop_assert!(s.value() < n);
        }

        /// a + (-a) == 0 (mod n).
        #[test]
        fn additive_inverse(v in any::<u64>()) {
            let n = &CurveId::Secp256k1.params().n;
            let a = Scalar::from_u64(v, n);
            prop_assert!(a.add(&a.neg(n), n).is_zero());
        }

        /// Subtraction agrees with adding the negation.
        #[test]
        fn sub_is_add_neg(x in any::<u64>(), y in any::<u64>()) {
            let n = &CurveId::Secp256k1.params().n;
            let a = Scalar::from_u64(x, n);
            let b = Scalar::from_u64(y, n);
            prop_assert_eq!(a.sub(&b, n), a.add(&b.neg(n), n));
        }

        /// Hex rendering roundtrips.
        #[test]
        fn hex_roundtrip(v in any::<u128>()) {
            let n = &CurveId::Secp256k1.params().n;
            let s = Scalar::reduce(BigUint::from(v), n);
            prop_assert_eq!(Scalar::from_hex(&s.to_hex(), n).unwrap(), s);
        }
    }
}
