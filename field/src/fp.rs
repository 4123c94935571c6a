//! Prime field `GF(p)` over arbitrary-precision integers.

use core::fmt::{self, Display, Formatter};

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Coeff, Field, FieldElement, FieldError};

/// Bases for the Miller-Rabin test run on every new modulus.
const WITNESSES: [u32; 16] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53];

/// Element of a prime field, kept fully reduced.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FpElt(BigUint);

impl FpElt {
    /// Canonical representative in `[0, p)`.
    pub fn value(&self) -> &BigUint {
        &self.0
    }
}

impl FieldElement for FpElt {
    #[inline]
    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    fn is_one(&self) -> bool {
        self.0.is_one()
    }

    fn polynomial(&self) -> Vec<BigUint> {
        vec![self.0.clone()]
    }
}

impl Display for FpElt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

#[derive(Clone, Debug)]
enum SqrtParams {
    /// `p = 3 mod 4`: a root is `a^((p + 1) / 4)`.
    ThreeModFour { exp: BigUint },
    /// Tonelli-Shanks with `p - 1 = q * 2^s` and `c = z^q` for a non-residue `z`.
    TonelliShanks { s: u64, q: BigUint, c: BigUint },
}

/// The prime field `GF(p)`.
#[derive(Clone, Debug)]
pub struct Fp {
    name: String,
    p: BigUint,
    /// `(p - 1) / 2`, the Legendre exponent.
    half: BigUint,
    sqrt: SqrtParams,
}

impl Fp {
    /// Builds `GF(p)`. The modulus must be an odd prime.
    pub fn new(name: impl Into<String>, p: BigUint) -> Result<Self, FieldError> {
        if p < BigUint::from(3u32) || p.is_even() {
            return Err(FieldError::InvalidModulus(format!("0x{p:x} is not an odd prime")));
        }
        if !is_probable_prime(&p) {
            return Err(FieldError::InvalidModulus(format!("0x{p:x} is composite")));
        }

        let one = BigUint::one();
        let p_minus_1 = &p - &one;
        let half = &p_minus_1 >> 1u32;

        let sqrt = if (&p & BigUint::from(3u32)) == BigUint::from(3u32) {
            SqrtParams::ThreeModFour {
                exp: (&p + &one) >> 2u32,
            }
        } else {
            let s = p_minus_1.trailing_zeros().unwrap_or(0);
            let q = &p_minus_1 >> s;
            let mut z = BigUint::from(2u32);
            while z.modpow(&half, &p) != p_minus_1 {
                z += 1u32;
            }
            let c = z.modpow(&q, &p);
            SqrtParams::TonelliShanks { s, q, c }
        };

        Ok(Fp {
            name: name.into(),
            p,
            half,
            sqrt,
        })
    }

    /// Reduces an arbitrary unsigned integer into the field.
    pub fn reduce(&self, v: &BigUint) -> FpElt {
        FpElt(v % &self.p)
    }

    /// Reduces an arbitrary signed integer into the field.
    pub fn from_bigint(&self, v: &BigInt) -> FpElt {
        let p = BigInt::from(self.p.clone());
        FpElt(v.mod_floor(&p).magnitude().clone())
    }

    fn legendre_is_one(&self, a: &BigUint) -> bool {
        a.modpow(&self.half, &self.p).is_one()
    }

    fn tonelli_shanks(&self, a: &BigUint, s: u64, q: &BigUint, c: &BigUint) -> BigUint {
        let p = &self.p;
        let mut m = s;
        let mut c = c.clone();
        let mut t = a.modpow(q, p);
        let mut r = a.modpow(&((q + 1u32) >> 1u32), p);

        while !t.is_one() {
            // least i in (0, m) with t^(2^i) = 1
            let mut i = 1u64;
            let mut t2i = (&t * &t) % p;
            while !t2i.is_one() && i < m {
                t2i = (&t2i * &t2i) % p;
                i += 1;
            }
            if i == m {
                // not a residue; the caller's final check rejects r
                return r;
            }

            let mut b = c.clone();
            for _ in 0..(m - i - 1) {
                b = (&b * &b) % p;
            }

            r = (&r * &b) % p;
            c = (&b * &b) % p;
            t = (&t * &c) % p;
            m = i;
        }
        r
    }
}

impl PartialEq for Fp {
    fn eq(&self, other: &Self) -> bool {
        self.p == other.p
    }
}

impl Eq for Fp {}

impl Display for Fp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "GF(0x{:x})", self.p)
    }
}

impl Field for Fp {
    type Elt = FpElt;

    fn name(&self) -> &str {
        &self.name
    }

    fn p(&self) -> &BigUint {
        &self.p
    }

    fn ext(&self) -> usize {
        1
    }

    fn elt(&self, c: &Coeff) -> Result<FpElt, FieldError> {
        match c {
            Coeff::Scalar(v) => Ok(self.from_bigint(v)),
            Coeff::Pair(..) => Err(FieldError::CoefficientShape {
                expected: 1,
                found: c.components(),
            }),
        }
    }

    fn from_u64(&self, v: u64) -> FpElt {
        self.reduce(&BigUint::from(v))
    }

    fn from_polynomial(&self, coeffs: &[BigUint]) -> Result<FpElt, FieldError> {
        match coeffs {
            [c] if c < &self.p => Ok(FpElt(c.clone())),
            [_] => Err(FieldError::OutOfRange),
            _ => Err(FieldError::CoefficientShape {
                expected: 1,
                found: coeffs.len(),
            }),
        }
    }

    fn contains(&self, a: &FpElt) -> bool {
        a.0 < self.p
    }

    fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> FpElt {
        // 128 extra bits keep the modular bias negligible
        let mut bytes = vec![0u8; self.byte_len() + 16];
        rng.fill(&mut bytes[..]);
        self.reduce(&BigUint::from_bytes_be(&bytes))
    }

    fn neg(&self, a: &FpElt) -> FpElt {
        if a.0.is_zero() {
            return a.clone();
        }
        FpElt(&self.p - &a.0)
    }

    fn add(&self, a: &FpElt, b: &FpElt) -> FpElt {
        let sum = &a.0 + &b.0;
        if sum >= self.p {
            FpElt(sum - &self.p)
        } else {
            FpElt(sum)
        }
    }

    fn sub(&self, a: &FpElt, b: &FpElt) -> FpElt {
        if a.0 >= b.0 {
            FpElt(&a.0 - &b.0)
        } else {
            FpElt(&a.0 + &self.p - &b.0)
        }
    }

    fn mul(&self, a: &FpElt, b: &FpElt) -> FpElt {
        FpElt((&a.0 * &b.0) % &self.p)
    }

    fn inv(&self, a: &FpElt) -> FpElt {
        let exp = &self.p - 2u32;
        FpElt(a.0.modpow(&exp, &self.p))
    }

    fn pow(&self, a: &FpElt, e: &BigUint) -> FpElt {
        FpElt(a.0.modpow(e, &self.p))
    }

    fn is_square(&self, a: &FpElt) -> bool {
        a.0.is_zero() || self.legendre_is_one(&a.0)
    }

    fn sqrt(&self, a: &FpElt) -> Option<FpElt> {
        if a.0.is_zero() {
            return Some(a.clone());
        }
        if !self.legendre_is_one(&a.0) {
            return None;
        }

        let root = match &self.sqrt {
            SqrtParams::ThreeModFour { exp } => a.0.modpow(exp, &self.p),
            SqrtParams::TonelliShanks { s, q, c } => self.tonelli_shanks(&a.0, *s, q, c),
        };
        let root = FpElt(root);
        (self.sqr(&root) == *a).then_some(root)
    }
}

/// Miller-Rabin over a fixed set of small prime bases.
fn is_probable_prime(n: &BigUint) -> bool {
    let one = BigUint::one();
    let n_minus_1 = n - &one;
    let s = n_minus_1.trailing_zeros().unwrap_or(0);
    let d = &n_minus_1 >> s;

    'witness: for w in WITNESSES {
        let a = BigUint::from(w);
        if &a >= n {
            // only reached for tiny moduli, which are prime iff they are a witness
            return WITNESSES.contains(&u32::try_from(n).unwrap_or(0));
        }
        let mut x = a.modpow(&d, n);
        if x.is_one() || x == n_minus_1 {
            continue;
        }
        for _ in 1..s {
            x = (&x * &x) % n;
            if x == n_minus_1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}
