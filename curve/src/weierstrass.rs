//! Short Weierstrass curves `y^2 = x^3 + a*x + b`.

use core::fmt::{self, Display, Formatter};

use ellcurve_field::{BigUint, Field, FieldElement};

use crate::{Group, Model, Point};

/// A short Weierstrass curve `y^2 = x^3 + a*x + b` over `F`.
#[derive(Clone, Debug)]
pub struct Weierstrass<F: Field> {
    name: String,
    field: F,
    a: F::Elt,
    b: F::Elt,
    order: BigUint,
    cofactor: BigUint,
}

impl<F: Field> Weierstrass<F> {
    pub fn new(
        name: impl Into<String>,
        field: F,
        a: F::Elt,
        b: F::Elt,
        order: BigUint,
        cofactor: BigUint,
    ) -> Self {
        Weierstrass {
            name: name.into(),
            field,
            a,
            b,
            order,
            cofactor,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn a(&self) -> &F::Elt {
        &self.a
    }

    pub fn b(&self) -> &F::Elt {
        &self.b
    }

    /// `x^3 + a*x + b`
    fn rhs(&self, x: &F::Elt) -> F::Elt {
        let f = &self.field;
        let x3 = f.mul(&f.sqr(x), x);
        f.add(&f.add(&x3, &f.mul(&self.a, x)), &self.b)
    }

    /// `4a^3 + 27b^2`, zero exactly when the curve is singular.
    pub fn discriminant(&self) -> F::Elt {
        let f = &self.field;
        let a3 = f.mul(&f.sqr(&self.a), &self.a);
        let b2 = f.sqr(&self.b);
        f.add(&f.mul(&f.from_u64(4), &a3), &f.mul(&f.from_u64(27), &b2))
    }

    /// Recovers some `y` with `y^2 = x^3 + a*x + b`, or `None` if `x` is not
    /// the abscissa of a point.
    pub fn point_x2y(&self, x: &F::Elt) -> Option<F::Elt> {
        self.field.sqrt(&self.rhs(x))
    }

    /// Same field and coefficients.
    pub fn is_equal(&self, other: &Self) -> bool {
        self.field == other.field && self.a == other.a && self.b == other.b
    }

    #[inline]
    fn affine<'a>(&self, p: &'a Point<F::Elt>) -> Option<(&'a F::Elt, &'a F::Elt)> {
        debug_assert_eq!(p.model(), Model::Weierstrass, "point of another curve model");
        p.coordinates()
    }

    /// x3 = l^2 - x1 - x2, y3 = l(x1 - x3) - y1
    fn chord(&self, lambda: &F::Elt, x1: &F::Elt, y1: &F::Elt, x2: &F::Elt) -> Point<F::Elt> {
        let f = &self.field;
        let x3 = f.sub(&f.sub(&f.sqr(lambda), x1), x2);
        let y3 = f.sub(&f.mul(lambda, &f.sub(x1, &x3)), y1);
        Point::Weierstrass { x: x3, y: y3 }
    }
}

impl<F: Field> Group<F> for Weierstrass<F> {
    fn field(&self) -> &F {
        &self.field
    }

    fn order(&self) -> &BigUint {
        &self.order
    }

    fn cofactor(&self) -> &BigUint {
        &self.cofactor
    }

    #[inline]
    fn identity(&self) -> Point<F::Elt> {
        Point::Infinity
    }

    fn new_point(&self, x: F::Elt, y: F::Elt) -> Point<F::Elt> {
        Point::Weierstrass { x, y }
    }

    fn is_on_curve(&self, p: &Point<F::Elt>) -> bool {
        match p {
            Point::Infinity => true,
            Point::Weierstrass { x, y } => {
                let f = &self.field;
                f.contains(x) && f.contains(y) && f.sqr(y) == self.rhs(x)
            }
            Point::Edwards { .. } => false,
        }
    }

    fn is_valid(&self) -> bool {
        let f = &self.field;
        f.contains(&self.a) && f.contains(&self.b) && !self.discriminant().is_zero()
    }

    fn neg(&self, p: &Point<F::Elt>) -> Point<F::Elt> {
        match self.affine(p) {
            None => Point::Infinity,
            Some((x, y)) => Point::Weierstrass {
                x: x.clone(),
                y: self.field.neg(y),
            },
        }
    }

    fn add(&self, p: &Point<F::Elt>, q: &Point<F::Elt>) -> Point<F::Elt> {
        let (x1, y1) = match self.affine(p) {
            None => return q.clone(),
            Some(c) => c,
        };
        let (x2, y2) = match self.affine(q) {
            None => return p.clone(),
            Some(c) => c,
        };

        // x1 = x2 leaves only Q = P or Q = -P; resolve both before dividing
        if x1 == x2 {
            return if y1 == y2 {
                self.double(p)
            } else {
                Point::Infinity
            };
        }

        let f = &self.field;
        let lambda = f.div(&f.sub(y2, y1), &f.sub(x2, x1));
        self.chord(&lambda, x1, y1, x2)
    }

    fn double(&self, p: &Point<F::Elt>) -> Point<F::Elt> {
        let (x, y) = match self.affine(p) {
            None => return Point::Infinity,
            Some(c) => c,
        };

        // the tangent at a 2-torsion point is vertical
        if y.is_zero() {
            return Point::Infinity;
        }

        let f = &self.field;
        let x2 = f.sqr(x);
        let numerator = f.add(&f.add(&f.add(&x2, &x2), &x2), &self.a);
        let lambda = f.div(&numerator, &f.add(y, y));
        self.chord(&lambda, x, y, x)
    }
}

impl<F: Field> Display for Weierstrass<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Weierstrass curve {}: y^2 = x^3 + a*x + b", self.name)?;
        writeln!(f, "p: 0x{:x} (degree {})", self.field.p(), self.field.ext())?;
        writeln!(f, "a: {}", self.a)?;
        write!(f, "b: {}", self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ellcurve_field::Fp;
    use num_traits::One;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::RandomPoint;

    /// y^2 = x^3 + 2x + 3 over GF(97)
    fn small_curve() -> Weierstrass<Fp> {
        let f = Fp::new("f97", BigUint::from(97u32)).unwrap();
        let a = f.from_u64(2);
        let b = f.from_u64(3);
        Weierstrass::new("toy", f, a, b, BigUint::from(5u32), BigUint::from(20u32))
    }

    fn point(c: &Weierstrass<Fp>, x: u64, y: u64) -> Point<ellcurve_field::FpElt> {
        c.new_point(c.field().from_u64(x), c.field().from_u64(y))
    }

    #[test]
    fn test_infinity() {
        let c = small_curve();
        let inf = c.identity();
        assert!(inf.is_identity());
        assert!(c.is_on_curve(&inf));
        assert_eq!(c.neg(&inf), inf);
        assert_eq!(c.double(&inf), inf);
    }

    #[test]
    fn test_valid_and_singular() {
        assert!(small_curve().is_valid());

        // y^2 = x^3 - 3x + 2 = (x - 1)^2 (x + 2)
        let f = Fp::new("f97", BigUint::from(97u32)).unwrap();
        let a = f.neg(&f.from_u64(3));
        let b = f.from_u64(2);
        let c = Weierstrass::new("node", f, a, b, BigUint::one(), BigUint::one());
        assert!(c.discriminant().is_zero());
        assert!(!c.is_valid());
    }

    #[test]
    fn test_known_multiples() {
        let c = small_curve();
        let p = point(&c, 3, 6);
        assert!(c.is_on_curve(&p));
        assert_eq!(c.neg(&p), point(&c, 3, 91));
        assert_eq!(c.double(&p), point(&c, 80, 10));
        assert_eq!(c.add(&p, &point(&c, 80, 10)), point(&c, 80, 87));
        assert_eq!(c.mul_u64(&p, 4), point(&c, 3, 91));
        // P has order 5
        assert!(c.mul_u64(&p, 5).is_identity());
    }

    #[test]
    fn test_addition_with_infinity() {
        let c = small_curve();
        let p = point(&c, 3, 6);
        assert_eq!(c.add(&p, &Point::Infinity), p);
        assert_eq!(c.add(&Point::Infinity, &p), p);
        assert_eq!(c.add(&Point::Infinity, &Point::Infinity), Point::Infinity);
    }

    #[test]
    fn test_add_inverse_and_self() {
        let c = small_curve();
        let p = point(&c, 3, 6);
        assert_eq!(c.add(&p, &c.neg(&p)), Point::Infinity);
        assert_eq!(c.add(&p, &p), c.double(&p));
        assert_eq!(c.sub(&p, &p), Point::Infinity);
    }

    #[test]
    fn test_two_torsion_doubles_to_infinity() {
        // y^2 = x^3 + 2x - 135 has the root x = 5 over GF(10007)
        let f = Fp::new("f10007", BigUint::from(10007u32)).unwrap();
        let a = f.from_u64(2);
        let b = f.neg(&f.from_u64(135));
        let c = Weierstrass::new("t", f, a, b, BigUint::one(), BigUint::one());
        let t = c.new_point(c.field().from_u64(5), c.field().zero());
        assert!(c.is_on_curve(&t));
        assert!(t.is_two_torsion());
        assert_eq!(c.double(&t), Point::Infinity);
        assert_eq!(c.add(&t, &t), Point::Infinity);
        assert_eq!(c.neg(&t), t);
    }

    #[test]
    fn test_point_x2y() {
        let c = small_curve();
        let y = c.point_x2y(&c.field().from_u64(3)).unwrap();
        assert!(y == c.field().from_u64(6) || y == c.field().from_u64(91));

        let mut rng = StdRng::seed_from_u64(9);
        let mut misses = 0;
        for x in 0..97 {
            let x = c.field().from_u64(x);
            match c.point_x2y(&x) {
                Some(y) => assert!(c.is_on_curve(&c.new_point(x, y))),
                None => misses += 1,
            }
        }
        assert!(misses > 0);
        let r = c.random_point(&mut rng);
        assert!(c.is_on_curve(&r));
    }

    #[test]
    fn test_off_curve_and_foreign_points() {
        let c = small_curve();
        assert!(!c.is_on_curve(&point(&c, 3, 7)));
        let f = c.field();
        let edwards = Point::Edwards {
            x: f.from_u64(3),
            y: f.from_u64(6),
        };
        assert!(!c.is_on_curve(&edwards));
    }

    #[test]
    fn test_scalar_multiplication() {
        let c = small_curve();
        let p = point(&c, 3, 6);
        let expected = c.add(&c.add(&c.add(&p, &p), &p), &p);
        assert_eq!(c.mul_u64(&p, 4), expected);
        assert_eq!(c.mul_u64(&p, 0), Point::Infinity);
        assert_eq!(c.mul_u64(&p, 1), p);
    }

    #[test]
    fn test_windowed_matches_double_and_add() {
        let c = small_curve();
        let p = point(&c, 3, 6);
        for k in [0u64, 1, 2, 15, 16, 17, 123456] {
            let k = BigUint::from(k);
            assert_eq!(c.scalar_mult_windowed(&p, &k), c.mul_unsigned(&p, &k));
        }
    }
}
