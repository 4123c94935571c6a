//! Quadratic extension `GF(p^2) = GF(p)[i] / (i^2 + 1)`.

use core::fmt::{self, Display, Formatter};

use num_bigint::BigUint;
use num_traits::One;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Coeff, Field, FieldElement, FieldError, Fp, FpElt};

/// Element `re + im * i` of the quadratic extension.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fp2Elt {
    re: FpElt,
    im: FpElt,
}

impl Fp2Elt {
    pub fn re(&self) -> &FpElt {
        &self.re
    }

    pub fn im(&self) -> &FpElt {
        &self.im
    }
}

impl FieldElement for Fp2Elt {
    #[inline]
    fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    #[inline]
    fn is_one(&self) -> bool {
        self.re.is_one() && self.im.is_zero()
    }

    fn polynomial(&self) -> Vec<BigUint> {
        vec![self.re.value().clone(), self.im.value().clone()]
    }
}

impl Display for Fp2Elt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {} * i", self.re, self.im)
    }
}

/// The field `GF(p^2)` with `i^2 = -1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fp2 {
    base: Fp,
    /// `(p - 3) / 4`
    exp_p3_4: BigUint,
    /// `(p - 1) / 2`
    exp_p1_2: BigUint,
}

impl Fp2 {
    /// Builds `GF(p^2)`. `i^2 + 1` is irreducible only when `p = 3 mod 4`.
    pub fn new(name: impl Into<String>, p: BigUint) -> Result<Self, FieldError> {
        let base = Fp::new(name, p)?;
        let p = base.p();
        if (p & BigUint::from(3u32)) != BigUint::from(3u32) {
            return Err(FieldError::InvalidModulus(format!(
                "0x{p:x} is not 3 mod 4, i^2 + 1 splits"
            )));
        }
        let exp_p3_4 = (p - 3u32) >> 2u32;
        let exp_p1_2 = (p - BigUint::one()) >> 1u32;
        Ok(Fp2 {
            base,
            exp_p3_4,
            exp_p1_2,
        })
    }

    /// The prime subfield.
    pub fn base(&self) -> &Fp {
        &self.base
    }

    pub fn new_elt(&self, re: FpElt, im: FpElt) -> Fp2Elt {
        Fp2Elt { re, im }
    }

    /// The imaginary unit.
    pub fn i(&self) -> Fp2Elt {
        Fp2Elt {
            re: self.base.zero(),
            im: self.base.one(),
        }
    }

    /// `re^2 + im^2`, the norm down to the base field.
    pub fn norm(&self, a: &Fp2Elt) -> FpElt {
        let f = &self.base;
        f.add(&f.sqr(&a.re), &f.sqr(&a.im))
    }
}

impl Display for Fp2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "GF(0x{:x}^2)", self.base.p())
    }
}

impl Field for Fp2 {
    type Elt = Fp2Elt;

    fn name(&self) -> &str {
        self.base.name()
    }

    fn p(&self) -> &BigUint {
        self.base.p()
    }

    fn ext(&self) -> usize {
        2
    }

    fn elt(&self, c: &Coeff) -> Result<Fp2Elt, FieldError> {
        let f = &self.base;
        match c {
            Coeff::Scalar(v) => Ok(Fp2Elt {
                re: f.from_bigint(v),
                im: f.zero(),
            }),
            Coeff::Pair(re, im) => Ok(Fp2Elt {
                re: f.from_bigint(re),
                im: f.from_bigint(im),
            }),
        }
    }

    fn from_u64(&self, v: u64) -> Fp2Elt {
        Fp2Elt {
            re: self.base.from_u64(v),
            im: self.base.zero(),
        }
    }

    fn from_polynomial(&self, coeffs: &[BigUint]) -> Result<Fp2Elt, FieldError> {
        match coeffs {
            [re, im] => Ok(Fp2Elt {
                re: self.base.from_polynomial(core::slice::from_ref(re))?,
                im: self.base.from_polynomial(core::slice::from_ref(im))?,
            }),
            _ => Err(FieldError::CoefficientShape {
                expected: 2,
                found: coeffs.len(),
            }),
        }
    }

    fn contains(&self, a: &Fp2Elt) -> bool {
        self.base.contains(&a.re) && self.base.contains(&a.im)
    }

    fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Fp2Elt {
        Fp2Elt {
            re: self.base.random(rng),
            im: self.base.random(rng),
        }
    }

    fn neg(&self, a: &Fp2Elt) -> Fp2Elt {
        Fp2Elt {
            re: self.base.neg(&a.re),
            im: self.base.neg(&a.im),
        }
    }

    fn add(&self, a: &Fp2Elt, b: &Fp2Elt) -> Fp2Elt {
        Fp2Elt {
            re: self.base.add(&a.re, &b.re),
            im: self.base.add(&a.im, &b.im),
        }
    }

    fn sub(&self, a: &Fp2Elt, b: &Fp2Elt) -> Fp2Elt {
        Fp2Elt {
            re: self.base.sub(&a.re, &b.re),
            im: self.base.sub(&a.im, &b.im),
        }
    }

    fn mul(&self, a: &Fp2Elt, b: &Fp2Elt) -> Fp2Elt {
        let f = &self.base;
        // Karatsuba: (a0 + a1)(b0 + b1) - a0b0 - a1b1 = a0b1 + a1b0
        let v0 = f.mul(&a.re, &b.re);
        let v1 = f.mul(&a.im, &b.im);
        let cross = f.mul(&f.add(&a.re, &a.im), &f.add(&b.re, &b.im));
        Fp2Elt {
            re: f.sub(&v0, &v1),
            im: f.sub(&f.sub(&cross, &v0), &v1),
        }
    }

    fn sqr(&self, a: &Fp2Elt) -> Fp2Elt {
        let f = &self.base;
        // (a0 + a1)(a0 - a1) + 2 a0 a1 i
        let re = f.mul(&f.add(&a.re, &a.im), &f.sub(&a.re, &a.im));
        let t = f.mul(&a.re, &a.im);
        Fp2Elt {
            re,
            im: f.add(&t, &t),
        }
    }

    fn inv(&self, a: &Fp2Elt) -> Fp2Elt {
        let f = &self.base;
        let n_inv = f.inv(&self.norm(a));
        Fp2Elt {
            re: f.mul(&a.re, &n_inv),
            im: f.neg(&f.mul(&a.im, &n_inv)),
        }
    }

    fn is_square(&self, a: &Fp2Elt) -> bool {
        self.base.is_square(&self.norm(a))
    }

    fn sqrt(&self, a: &Fp2Elt) -> Option<Fp2Elt> {
        if a.is_zero() {
            return Some(a.clone());
        }

        // complex method for p = 3 mod 4
        let a1 = self.pow(a, &self.exp_p3_4);
        let alpha = self.mul(&self.sqr(&a1), a);
        let x0 = self.mul(&a1, a);
        let minus_one = self.neg(&self.one());

        let root = if alpha == minus_one {
            self.mul(&self.i(), &x0)
        } else {
            let b = self.pow(&self.add(&self.one(), &alpha), &self.exp_p1_2);
            self.mul(&b, &x0)
        };
        (self.sqr(&root) == *a).then_some(root)
    }
}
