//! # Group Law — Affine Short-Weierstrass Arithmetic
//!
//! Chord-tangent point addition and binary double-and-add scalar
//! multiplication over a registry curve, with field inversion by Fermat
//! (`v^(p-2) mod p`, `p` prime).
//!
//! ## Security Invariant
//!
//! Public entry points validate that affine operands satisfy the curve
//! equation before computing. A point that parses but lies off the curve
//! is rejected with `CurveError::PointNotOnCurve` — small-subgroup and
//! invalid-curve inputs never reach the arithmetic. Internal steps operate
//! on points already proven valid (the curve is closed under its own
//! group law).
//!
//! Everything here is computed in variable time over `BigUint`. Secrets
//! that flow through (nonces, private scalars) live only for the duration
//! of one proof generation; verification handles public values
//! exclusively.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use zkid_core::hash_bytes;

use crate::error::CurveError;
use crate::point::Point;
use crate::registry::CurveParams;
use crate::scalar::Scalar;

/// Group operations bound to one registry curve.
#[derive(Debug, Clone, Copy)]
pub struct CurveGroup {
    params: &'static CurveParams,
}

impl CurveGroup {
    /// Bind to a curve's parameter set.
    pub fn new(params: &'static CurveParams) -> Self {
        Self { params }
    }

    /// The bound parameter set.
    pub fn params(&self) -> &'static CurveParams {
        self.params
    }

    /// The group order `n`.
    pub fn order(&self) -> &'static BigUint {
        &self.params.n
    }

    /// The base point `G`.
    pub fn generator(&self) -> Point {
        self.params.generator()
    }

    /// Whether a point satisfies `y^2 = x^3 + ax + b` over the bound
    /// field. The identity is on every curve.
    pub fn is_on_curve(&self, point: &Point) -> bool {
        match point {
            Point::Identity => true,
            Point::Affine { x, y } => {
                let p = &self.params.p;
                if x >= p || y >= p {
                    return false;
                }
                let lhs = (y * y) % p;
                let rhs = ((x * x * x) + (&self.params.a * x) + &self.params.b) % p;
                lhs == rhs
            }
        }
    }

    fn check_on_curve(&self, point: &Point) -> Result<(), CurveError> {
        if self.is_on_curve(point) {
            Ok(())
        } else {
            Err(CurveError::PointNotOnCurve {
                curve: self.params.id.as_str(),
                point: point.to_encoded(),
            })
        }
    }

    /// Group addition. Validates both operands.
    pub fn add(&self, p1: &Point, p2: &Point) -> Result<Point, CurveError> {
        self.check_on_curve(p1)?;
        self.check_on_curve(p2)?;
        Ok(self.raw_add(p1, p2))
    }

    /// Group subtraction: `p1 + (-p2)`. Validates both operands.
    pub fn sub(&self, p1: &Point, p2: &Point) -> Result<Point, CurveError> {
        self.add(p1, &self.neg(p2))
    }

    /// Additive inverse: `(x, p - y)`.
    pub fn neg(&self, point: &Point) -> Point {
        match point {
            Point::Identity => Point::Identity,
            Point::Affine { x, y } => {
                if y.is_zero() {
                    Point::affine(x.clone(), y.clone())
                } else {
                    Point::affine(x.clone(), &self.params.p - y)
                }
            }
        }
    }

    /// Scalar multiplication `k·P` by binary double-and-add. Validates the
    /// point operand; the scalar is already a reduced residue.
    pub fn scalar_mul(&self, point: &Point, k: &Scalar) -> Result<Point, CurveError> {
        self.check_on_curve(point)?;
        let mut acc = Point::Identity;
        for byte in k.value().to_bytes_be() {
            for shift in (0..8).rev() {
                acc = self.raw_add(&acc, &acc);
                if (byte >> shift) & 1 == 1 {
                    acc = self.raw_add(&acc, point);
                }
            }
        }
        Ok(acc)
    }

    /// Convenience: `k·G`.
    pub fn generator_mul(&self, k: &Scalar) -> Result<Point, CurveError> {
        self.scalar_mul(&self.generator(), k)
    }

    /// Derive an independent generator from a domain tag by
    /// try-and-increment: hash `tag || curve || counter` to an x
    /// candidate and solve for y.
    ///
    /// All registry curves have `p = 3 (mod 4)`, so the square root is a
    /// single exponentiation by `(p+1)/4`. Nobody learns a discrete log
    /// relative to `G` this way, which is exactly the point — the result
    /// serves as the Pedersen `h`.
    pub fn hash_to_point(&self, tag: &str) -> Result<Point, CurveError> {
        let p = &self.params.p;
        let sqrt_exp = (p + BigUint::one()) >> 2u32;
        for counter in 0u8..=255 {
            let mut material = Vec::with_capacity(tag.len() + 16);
            material.extend_from_slice(tag.as_bytes());
            material.extend_from_slice(self.params.id.as_str().as_bytes());
            material.push(counter);
            let digest = hash_bytes(self.params.hash, &material);
            let x = BigUint::from_bytes_be(&digest) % p;
            let rhs = ((&x * &x * &x) + (&self.params.a * &x) + &self.params.b) % p;
            let y = rhs.modpow(&sqrt_exp, p);
            if (&y * &y) % p == rhs {
                return Ok(Point::affine(x, y));
            }
        }
        Err(CurveError::HashToPointFailed(tag.to_string()))
    }

    // -----------------------------------------------------------------------
    // Internal arithmetic (operands already validated)
    // -----------------------------------------------------------------------

    fn raw_add(&self, p1: &Point, p2: &Point) -> Point {
        let p = &self.params.p;
        let (x1, y1, x2, y2) = match (p1, p2) {
            (Point::Identity, q) => return q.clone(),
            (q, Point::Identity) => return q.clone(),
            (Point::Affine { x: x1, y: y1 }, Point::Affine { x: x2, y: y2 }) => (x1, y1, x2, y2),
        };

        let lambda = if x1 == x2 {
            if (y1 + y2) % p == BigUint::zero() {
                // Inverse points (or a 2-torsion point doubling to O).
                return Point::Identity;
            }
            // Tangent: (3*x1^2 + a) / (2*y1)
            let num = ((BigUint::from(3u8) * x1 * x1) + &self.params.a) % p;
            let den = (BigUint::from(2u8) * y1) % p;
            (num * self.field_inv(&den)) % p
        } else {
            // Chord: (y2 - y1) / (x2 - x1)
            let num = ((y2 + p) - y1) % p;
            let den = ((x2 + p) - x1) % p;
            (num * self.field_inv(&den)) % p
        };

        let lambda_sq = (&lambda * &lambda) % p;
        let x3 = ((lambda_sq + p + p) - x1 - x2) % p;
        let y3 = ((lambda * ((x1 + p) - &x3)) % p + p - y1) % p;
        Point::affine(x3, y3)
    }

    /// Field inversion by Fermat's little theorem. The modulus is prime,
    /// so `v^(p-2)` is the inverse of any nonzero `v`.
    fn field_inv(&self, v: &BigUint) -> BigUint {
        let p = &self.params.p;
        v.modpow(&(p - BigUint::from(2u8)), p)
    }
}
