//! Finite fields of large prime characteristic.
//!
//! This crate provides the prime field [`Fp`] and its quadratic extension
//! [`Fp2`] (`Fp[i]/(i^2 + 1)`). Curve code is written against the [`Field`]
//! trait: a field is a context object owning the modulus, and its elements
//! are plain canonical values that can be compared structurally.

mod encoding;
mod errors;
mod field;
mod fp;
mod fp2;

pub use encoding::{from_hex, to_hex};
pub use errors::FieldError;
pub use field::{Coeff, Field, FieldElement};
pub use fp::{Fp, FpElt};
pub use fp2::{Fp2, Fp2Elt};
pub use num_bigint::{BigInt, BigUint};
