use ellcurve_field::{BigInt, BigUint, Field};
use num_bigint::Sign;

use crate::{CurveError, Point};

/// Group law of an elliptic curve over the field `F`.
///
/// Implementors supply the model-specific formulas; scalar multiplication
/// and cofactor clearing are derived from them.
pub trait Group<F: Field> {
    fn field(&self) -> &F;

    /// Order of the prime-order subgroup of interest.
    fn order(&self) -> &BigUint;

    /// Index of that subgroup in the full group of points.
    fn cofactor(&self) -> &BigUint;

    fn identity(&self) -> Point<F::Elt>;

    /// Wraps coordinates as a point of this curve without checking the equation.
    fn new_point(&self, x: F::Elt, y: F::Elt) -> Point<F::Elt>;

    fn is_on_curve(&self, p: &Point<F::Elt>) -> bool;

    /// Check that the coefficients define a non-singular curve.
    fn is_valid(&self) -> bool;

    fn neg(&self, p: &Point<F::Elt>) -> Point<F::Elt>;
    fn add(&self, p: &Point<F::Elt>, q: &Point<F::Elt>) -> Point<F::Elt>;
    fn double(&self, p: &Point<F::Elt>) -> Point<F::Elt>;

    fn sub(&self, p: &Point<F::Elt>, q: &Point<F::Elt>) -> Point<F::Elt> {
        self.add(p, &self.neg(q))
    }

    /// Computes `[k]P`. Negative scalars multiply `-P` by `|k|`.
    fn scalar_mult(&self, p: &Point<F::Elt>, k: &BigInt) -> Point<F::Elt> {
        if k.sign() == Sign::Minus {
            self.mul_unsigned(&self.neg(p), k.magnitude())
        } else {
            self.mul_unsigned(p, k.magnitude())
        }
    }

    /// Left-to-right double-and-add. Not constant time.
    fn mul_unsigned(&self, p: &Point<F::Elt>, k: &BigUint) -> Point<F::Elt> {
        let mut result = self.identity();
        for i in (0..k.bits()).rev() {
            result = self.double(&result);
            if k.bit(i) {
                result = self.add(&result, p);
            }
        }
        result
    }

    fn mul_u64(&self, p: &Point<F::Elt>, n: u64) -> Point<F::Elt> {
        match n {
            0 => self.identity(),
            1 => p.clone(),
            _ => self.mul_unsigned(p, &BigUint::from(n)),
        }
    }

    /// Fixed 4-bit window variant of [`Group::mul_unsigned`].
    fn scalar_mult_windowed(&self, p: &Point<F::Elt>, k: &BigUint) -> Point<F::Elt> {
        if p.is_identity() {
            return self.identity();
        }

        let mut table = vec![self.identity(); 16];
        table[1] = p.clone();
        for i in 2..16 {
            table[i] = if i % 2 == 0 {
                self.double(&table[i / 2])
            } else {
                self.add(&table[i - 1], &table[1])
            };
        }

        let mut result = self.identity();
        for &limb in k.to_u64_digits().iter().rev() {
            for shift in (0..64).step_by(4).rev() {
                for _ in 0..4 {
                    result = self.double(&result);
                }

                let window = ((limb >> shift) & 0xF) as usize;
                if window != 0 {
                    result = self.add(&result, &table[window]);
                }
            }
        }

        result
    }

    /// Computes `sum [k_i] P_i`.
    fn multi_scalar_mult(
        &self,
        points: &[Point<F::Elt>],
        scalars: &[BigInt],
    ) -> Result<Point<F::Elt>, CurveError> {
        if points.len() != scalars.len() {
            return Err(CurveError::LengthMismatch {
                points: points.len(),
                scalars: scalars.len(),
            });
        }

        let mut result = self.identity();
        for (point, scalar) in points.iter().zip(scalars) {
            result = self.add(&result, &self.scalar_mult(point, scalar));
        }
        Ok(result)
    }

    /// Projects `P` into the prime-order subgroup by multiplying by the cofactor.
    fn clear_cofactor(&self, p: &Point<F::Elt>) -> Point<F::Elt> {
        self.mul_unsigned(p, self.cofactor())
    }
}
