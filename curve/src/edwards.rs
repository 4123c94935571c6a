//! Twisted Edwards curves `a*x^2 + y^2 = 1 + d*x^2*y^2`.

use core::fmt::{self, Display, Formatter};

use ellcurve_field::{BigUint, Field, FieldElement};
use tracing::warn;

use crate::{CurveError, Group, Model, Point};

/// A twisted Edwards curve `a*x^2 + y^2 = 1 + d*x^2*y^2` over `F`.
///
/// `d` is the coefficient called `b` in the model-agnostic `(a, b)` pair.
/// The neutral element is `(0, 1)`.
#[derive(Clone, Debug)]
pub struct TwistedEdwards<F: Field> {
    name: String,
    field: F,
    a: F::Elt,
    d: F::Elt,
    order: BigUint,
    cofactor: BigUint,
}

impl<F: Field> TwistedEdwards<F> {
    pub fn new(
        name: impl Into<String>,
        field: F,
        a: F::Elt,
        d: F::Elt,
        order: BigUint,
        cofactor: BigUint,
    ) -> Self {
        TwistedEdwards {
            name: name.into(),
            field,
            a,
            d,
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

    pub fn d(&self) -> &F::Elt {
        &self.d
    }

    /// Whether the unified addition law is complete: `a` square, `d` not.
    pub fn is_complete(&self) -> bool {
        self.field.is_square(&self.a) && !self.field.is_square(&self.d)
    }

    /// Recovers some `x` with `a*x^2 + y^2 = 1 + d*x^2*y^2`, or `None` if `y`
    /// is not the ordinate of a point.
    pub fn point_y2x(&self, y: &F::Elt) -> Option<F::Elt> {
        let f = &self.field;
        let y2 = f.sqr(y);
        let num = f.sub(&f.one(), &y2);
        let den = f.sub(&self.a, &f.mul(&self.d, &y2));
        if den.is_zero() {
            return None;
        }
        f.sqrt(&f.div(&num, &den))
    }

    /// Same field and coefficients.
    pub fn is_equal(&self, other: &Self) -> bool {
        self.field == other.field && self.a == other.a && self.d == other.d
    }

    /// Coordinates of `p`, reading `Infinity` as the neutral element.
    #[inline]
    fn affine<'a>(&self, p: &'a Point<F::Elt>) -> Option<(&'a F::Elt, &'a F::Elt)> {
        debug_assert!(
            p.model() == Model::TwistedEdwards || p.coordinates().is_none(),
            "point of another curve model"
        );
        p.coordinates()
    }

    /// Reads `Infinity` as the neutral element.
    fn normalize(&self, p: &Point<F::Elt>) -> Point<F::Elt> {
        match p {
            Point::Infinity => self.identity(),
            _ => p.clone(),
        }
    }

    /// Sum of `p` and `q` by the unified law.
    ///
    /// Fails with [`CurveError::NotAffine`] when `1 + d*x1*x2*y1*y2` or
    /// `1 - d*x1*x2*y1*y2` vanishes, which cannot happen when
    /// [`is_complete`](Self::is_complete) holds.
    pub fn checked_add(
        &self,
        p: &Point<F::Elt>,
        q: &Point<F::Elt>,
    ) -> Result<Point<F::Elt>, CurveError> {
        if p.is_identity() {
            return Ok(self.normalize(q));
        }
        if q.is_identity() {
            return Ok(self.normalize(p));
        }
        let ((x1, y1), (x2, y2)) = match (self.affine(p), self.affine(q)) {
            (Some(c1), Some(c2)) => (c1, c2),
            _ => return Ok(self.identity()),
        };

        // x3 = (x1 y2 + y1 x2) / (1 + d x1 x2 y1 y2)
        // y3 = (y1 y2 - a x1 x2) / (1 - d x1 x2 y1 y2)
        let f = &self.field;
        let x1x2 = f.mul(x1, x2);
        let y1y2 = f.mul(y1, y2);
        let t = f.mul(&self.d, &f.mul(&x1x2, &y1y2));
        let one = f.one();
        let x_den = f.add(&one, &t);
        let y_den = f.sub(&one, &t);
        if x_den.is_zero() || y_den.is_zero() {
            return Err(CurveError::NotAffine(self.name.clone()));
        }

        let x_num = f.add(&f.mul(x1, y2), &f.mul(y1, x2));
        let y_num = f.sub(&y1y2, &f.mul(&self.a, &x1x2));
        Ok(Point::Edwards {
            x: f.div(&x_num, &x_den),
            y: f.div(&y_num, &y_den),
        })
    }

    /// `2p`, failing like [`checked_add`](Self::checked_add) when `p + p` is
    /// exceptional.
    pub fn checked_double(&self, p: &Point<F::Elt>) -> Result<Point<F::Elt>, CurveError> {
        let (x, y) = match self.affine(p) {
            None => return Ok(self.identity()),
            Some(c) => c,
        };

        // on the curve a x^2 + y^2 = 1 + d x^2 y^2, which turns the unified
        // denominators into t and 2 - t
        let f = &self.field;
        let ax2 = f.mul(&self.a, &f.sqr(x));
        let y2 = f.sqr(y);
        let t = f.add(&ax2, &y2);
        let y_den = f.sub(&f.from_u64(2), &t);
        if t.is_zero() || y_den.is_zero() {
            return Err(CurveError::NotAffine(self.name.clone()));
        }
        let xy = f.mul(x, y);

        Ok(Point::Edwards {
            x: f.div(&f.add(&xy, &xy), &t),
            y: f.div(&f.sub(&y2, &ax2), &y_den),
        })
    }
}

impl<F: Field> Group<F> for TwistedEdwards<F> {
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
        Point::Edwards {
            x: self.field.zero(),
            y: self.field.one(),
        }
    }

    fn new_point(&self, x: F::Elt, y: F::Elt) -> Point<F::Elt> {
        Point::Edwards { x, y }
    }

    fn is_on_curve(&self, p: &Point<F::Elt>) -> bool {
        match p {
            Point::Edwards { x, y } => {
                let f = &self.field;
                let x2 = f.sqr(x);
                let y2 = f.sqr(y);
                let lhs = f.add(&f.mul(&self.a, &x2), &y2);
                let rhs = f.add(&f.one(), &f.mul(&self.d, &f.mul(&x2, &y2)));
                f.contains(x) && f.contains(y) && lhs == rhs
            }
            Point::Infinity | Point::Weierstrass { .. } => false,
        }
    }

    fn is_valid(&self) -> bool {
        let f = &self.field;
        f.contains(&self.a)
            && f.contains(&self.d)
            && !self.a.is_zero()
            && !self.d.is_zero()
            && self.a != self.d
    }

    fn neg(&self, p: &Point<F::Elt>) -> Point<F::Elt> {
        match self.affine(p) {
            None => self.identity(),
            Some((x, y)) => Point::Edwards {
                x: self.field.neg(x),
                y: y.clone(),
            },
        }
    }

    /// Unified addition.
    ///
    /// On an incomplete curve some pairs sum to a point with no affine
    /// representative. Those are logged and mapped to the identity; use
    /// [`TwistedEdwards::checked_add`] to detect them.
    fn add(&self, p: &Point<F::Elt>, q: &Point<F::Elt>) -> Point<F::Elt> {
        self.checked_add(p, q).unwrap_or_else(|err| {
            warn!(%err, "unified addition left the affine curve");
            self.identity()
        })
    }

    /// Doubling, with the same exceptional contract as [`Group::add`].
    fn double(&self, p: &Point<F::Elt>) -> Point<F::Elt> {
        self.checked_double(p).unwrap_or_else(|err| {
            warn!(%err, "doubling left the affine curve");
            self.identity()
        })
    }
}

impl<F: Field> Display for TwistedEdwards<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Twisted Edwards curve {}: a*x^2 + y^2 = 1 + d*x^2*y^2",
            self.name
        )?;
        writeln!(f, "p: 0x{:x} (degree {})", self.field.p(), self.field.ext())?;
        writeln!(f, "a: {}", self.a)?;
        write!(f, "d: {}", self.d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ellcurve_field::{Fp, FpElt};
    use num_traits::One;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::RandomPoint;

    /// x^2 + y^2 = 1 + 3 x^2 y^2 over GF(103): 92 points, subgroup of order 23.
    fn small_curve() -> TwistedEdwards<Fp> {
        let f = Fp::new("f103", BigUint::from(103u32)).unwrap();
        let a = f.one();
        let d = f.from_u64(3);
        TwistedEdwards::new("toy", f, a, d, BigUint::from(23u32), BigUint::from(4u32))
    }

    /// x^2 + y^2 = 1 + 4 x^2 y^2 over GF(103): valid but d is a square.
    fn incomplete_curve() -> TwistedEdwards<Fp> {
        let f = Fp::new("f103", BigUint::from(103u32)).unwrap();
        let a = f.one();
        let d = f.from_u64(4);
        TwistedEdwards::new("toy4", f, a, d, BigUint::one(), BigUint::one())
    }

    fn all_points(c: &TwistedEdwards<Fp>) -> Vec<Point<FpElt>> {
        let mut points = Vec::new();
        for x in 0..103 {
            for y in 0..103 {
                let p = point(c, x, y);
                if c.is_on_curve(&p) {
                    points.push(p);
                }
            }
        }
        points
    }

    fn point(c: &TwistedEdwards<Fp>, x: u64, y: u64) -> Point<FpElt> {
        c.new_point(c.field().from_u64(x), c.field().from_u64(y))
    }

    #[test]
    fn test_identity() {
        let c = small_curve();
        let id = c.identity();
        assert!(id.is_identity());
        assert!(c.is_on_curve(&id));
        assert_eq!(id, point(&c, 0, 1));
        assert_eq!(c.neg(&id), id);
        assert_eq!(c.double(&id), id);
    }

    #[test]
    fn test_valid_and_complete() {
        let c = small_curve();
        assert!(c.is_valid());
        assert!(c.is_complete());

        let f = c.field().clone();
        let same = TwistedEdwards::new(
            "bad",
            f.clone(),
            f.from_u64(3),
            f.from_u64(3),
            BigUint::one(),
            BigUint::one(),
        );
        assert!(!same.is_valid());
        let zero_d = TwistedEdwards::new(
            "bad",
            f.clone(),
            f.one(),
            f.zero(),
            BigUint::one(),
            BigUint::one(),
        );
        assert!(!zero_d.is_valid());
    }

    #[test]
    fn test_known_multiples() {
        let c = small_curve();
        let p = point(&c, 3, 49);
        assert!(c.is_on_curve(&p));
        assert_eq!(c.double(&p), point(&c, 75, 76));
        assert_eq!(c.add(&p, &p), point(&c, 75, 76));
        assert_eq!(c.mul_u64(&p, 3), point(&c, 67, 32));
        assert_eq!(c.neg(&p), point(&c, 100, 49));
        assert!(c.mul_u64(&p, 92).is_identity());
        assert!(!c.mul_u64(&p, 46).is_identity());
    }

    #[test]
    fn test_add_identity_and_inverse() {
        let c = small_curve();
        let p = point(&c, 3, 49);
        assert_eq!(c.add(&p, &c.identity()), p);
        assert_eq!(c.add(&c.identity(), &p), p);
        assert_eq!(c.add(&p, &c.neg(&p)), c.identity());
        assert_eq!(c.add(&Point::Infinity, &p), p);
    }

    #[test]
    fn test_torsion_points() {
        let c = small_curve();
        let t2 = point(&c, 0, 102);
        assert!(t2.is_two_torsion());
        assert_eq!(c.double(&t2), c.identity());
        assert_eq!(c.neg(&t2), t2);

        let t4 = point(&c, 1, 0);
        assert!(!t4.is_two_torsion());
        assert_eq!(c.double(&t4), t2);
        assert!(c.mul_u64(&t4, 4).is_identity());
    }

    #[test]
    fn test_clear_cofactor() {
        let c = small_curve();
        let p = point(&c, 3, 49);
        let q = c.clear_cofactor(&p);
        assert!(!q.is_identity());
        assert!(c.mul_unsigned(&q, c.order()).is_identity());
        // torsion is killed entirely
        assert!(c.clear_cofactor(&point(&c, 1, 0)).is_identity());
    }

    #[test]
    fn test_point_y2x() {
        let c = small_curve();
        let x = c.point_y2x(&c.field().from_u64(49)).unwrap();
        assert!(x == c.field().from_u64(3) || x == c.field().from_u64(100));

        let mut misses = 0;
        for y in 0..103 {
            let y = c.field().from_u64(y);
            match c.point_y2x(&y) {
                Some(x) => assert!(c.is_on_curve(&c.new_point(x, y))),
                None => misses += 1,
            }
        }
        assert!(misses > 0);

        let mut rng = StdRng::seed_from_u64(5);
        assert!(c.is_on_curve(&c.random_point(&mut rng)));
    }

    #[test]
    fn test_foreign_points_rejected() {
        let c = small_curve();
        assert!(!c.is_on_curve(&Point::Infinity));
        let f = c.field();
        let w = Point::Weierstrass {
            x: f.from_u64(3),
            y: f.from_u64(49),
        };
        assert!(!c.is_on_curve(&w));
        assert!(!c.is_on_curve(&point(&c, 3, 50)));
    }

    #[test]
    fn test_complete_curve_has_no_exceptions() {
        let c = small_curve();
        let points = all_points(&c);
        assert_eq!(points.len(), 92);
        for p in &points {
            for q in &points {
                let r = c.checked_add(p, q).unwrap();
                assert!(c.is_on_curve(&r));
            }
            assert_eq!(c.checked_double(p).unwrap(), c.add(p, p));
        }
    }

    #[test]
    fn test_incomplete_curve_exceptional_sums() {
        let c = incomplete_curve();
        assert!(c.is_valid());
        assert!(!c.is_complete());

        let p = point(&c, 8, 4);
        let q = point(&c, 58, 13);
        assert!(c.is_on_curve(&p) && c.is_on_curve(&q));
        assert_eq!(
            c.checked_add(&p, &q),
            Err(CurveError::NotAffine("toy4".into()))
        );
        // never an off-curve point through the group trait
        let r = c.add(&p, &q);
        assert!(c.is_on_curve(&r));
        assert!(r.is_identity());

        let points = all_points(&c);
        assert_eq!(points.len(), 116);
        let mut exceptional = 0;
        for p in &points {
            for q in &points {
                match c.checked_add(p, q) {
                    Ok(r) => {
                        assert!(c.is_on_curve(&r));
                        assert_eq!(r, c.add(p, q));
                    }
                    Err(err) => {
                        assert!(matches!(err, CurveError::NotAffine(_)));
                        exceptional += 1;
                    }
                }
            }
            assert!(c.is_on_curve(&c.double(p)));
        }
        assert_eq!(exceptional, 896);
    }
}
