use core::fmt::{Debug, Display};

use num_bigint::{BigInt, BigUint};
use rand::Rng;

use crate::FieldError;

/// Integer literal used to build field elements.
///
/// Prime-field elements are built from a `Scalar`; elements of the quadratic
/// extension from a `Pair` `(c0, c1)` meaning `c0 + c1 * i`. Literals may be
/// negative and are reduced modulo the characteristic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Coeff {
    Scalar(BigInt),
    Pair(BigInt, BigInt),
}

impl Coeff {
    /// Number of base-field components carried by the literal.
    pub fn components(&self) -> usize {
        match self {
            Coeff::Scalar(_) => 1,
            Coeff::Pair(..) => 2,
        }
    }
}

impl From<i64> for Coeff {
    fn from(v: i64) -> Self {
        Coeff::Scalar(BigInt::from(v))
    }
}

impl From<BigInt> for Coeff {
    fn from(v: BigInt) -> Self {
        Coeff::Scalar(v)
    }
}

impl From<BigUint> for Coeff {
    fn from(v: BigUint) -> Self {
        Coeff::Scalar(BigInt::from(v))
    }
}

impl From<(BigInt, BigInt)> for Coeff {
    fn from((c0, c1): (BigInt, BigInt)) -> Self {
        Coeff::Pair(c0, c1)
    }
}

/// An element of a finite field.
///
/// Elements are always kept in canonical form, so `==` is field equality.
pub trait FieldElement: Clone + Debug + Display + PartialEq + Eq {
    fn is_zero(&self) -> bool;
    fn is_one(&self) -> bool;

    /// Coefficients over the prime field, lowest degree first.
    fn polynomial(&self) -> Vec<BigUint>;
}

/// A finite field of characteristic `p` and extension degree `ext`.
///
/// The field owns the modulus and performs all arithmetic on its elements.
pub trait Field: Clone + Debug + PartialEq + Eq {
    type Elt: FieldElement;

    fn name(&self) -> &str;

    /// Characteristic of the field.
    fn p(&self) -> &BigUint;

    /// Extension degree over the prime field.
    fn ext(&self) -> usize;

    /// Number of elements, `p^ext`.
    fn order(&self) -> BigUint {
        self.p().pow(self.ext() as u32)
    }

    /// Bytes needed to hold one base-field coefficient.
    fn byte_len(&self) -> usize {
        ((self.p().bits() + 7) / 8) as usize
    }

    fn elt(&self, c: &Coeff) -> Result<Self::Elt, FieldError>;
    fn from_u64(&self, v: u64) -> Self::Elt;

    fn zero(&self) -> Self::Elt {
        self.from_u64(0)
    }

    fn one(&self) -> Self::Elt {
        self.from_u64(1)
    }

    /// Builds an element from canonical coefficients, lowest degree first.
    fn from_polynomial(&self, coeffs: &[BigUint]) -> Result<Self::Elt, FieldError>;

    /// Whether `a` is a canonical element of this field.
    fn contains(&self, a: &Self::Elt) -> bool {
        a.polynomial().len() == self.ext() && a.polynomial().iter().all(|c| c < self.p())
    }

    fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Elt;

    fn neg(&self, a: &Self::Elt) -> Self::Elt;
    fn add(&self, a: &Self::Elt, b: &Self::Elt) -> Self::Elt;
    fn sub(&self, a: &Self::Elt, b: &Self::Elt) -> Self::Elt;
    fn mul(&self, a: &Self::Elt, b: &Self::Elt) -> Self::Elt;

    fn sqr(&self, a: &Self::Elt) -> Self::Elt {
        self.mul(a, a)
    }

    /// Multiplicative inverse. The inverse of zero is zero.
    fn inv(&self, a: &Self::Elt) -> Self::Elt;

    fn div(&self, a: &Self::Elt, b: &Self::Elt) -> Self::Elt {
        self.mul(a, &self.inv(b))
    }

    /// Square-and-multiply exponentiation, scanning `e` from the top bit.
    fn pow(&self, a: &Self::Elt, e: &BigUint) -> Self::Elt {
        let mut result = self.one();
        for i in (0..e.bits()).rev() {
            result = self.sqr(&result);
            if e.bit(i) {
                result = self.mul(&result, a);
            }
        }
        result
    }

    fn is_square(&self, a: &Self::Elt) -> bool;

    /// Some square root of `a`, or `None` when `a` is not a square.
    fn sqrt(&self, a: &Self::Elt) -> Option<Self::Elt>;

    fn is_equal(&self, a: &Self::Elt, b: &Self::Elt) -> bool {
        a == b
    }
}
