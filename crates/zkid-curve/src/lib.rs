//! # zkid-curve — Curve Registry & Group Arithmetic
//!
//! Defines the read-only curve parameter registry (secp256k1, P-384,
//! P-521), the `Point` and `Scalar` value types, and the affine
//! short-Weierstrass group law used by every proof in the ZKID Stack.
//!
//! ## Architecture
//!
//! - **Registry** (`registry.rs`): named curve → `{p, a, b, n, G}` with the
//!   curve's paired hash algorithm and key length. Lookup of an unknown
//!   name is an error — there is no silent substitution of a default
//!   curve.
//! - **Points & scalars** (`point.rs`, `scalar.rs`): affine coordinates
//!   over `BigUint` with an explicit identity element; scalars are reduced
//!   modulo the group order `n` at construction, so any scalar reaching a
//!   protocol step is in `[0, n)`.
//! - **Group law** (`group.rs`): chord-tangent addition and double-and-add
//!   scalar multiplication with Fermat inversion, validating that operands
//!   lie on the curve.
//! - **Fallback** (`fallback.rs`): plain coordinate arithmetic producing a
//!   distinct `UnsoundPoint` type that cannot enter a proof. A liveness
//!   degradation path only.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests and registry constants
//!   (which are fixed published values covered by tests).

pub mod error;
pub mod fallback;
pub mod group;
pub mod point;
pub mod registry;
pub mod scalar;

pub use error::CurveError;
pub use group::CurveGroup;
pub use point::Point;
pub use registry::{CurveId, CurveParams};
pub use scalar::Scalar;
