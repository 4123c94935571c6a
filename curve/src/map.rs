//! Birational maps between curves.

use ellcurve_field::{Field, FieldElement};
use tracing::debug;

use crate::{CurveError, EllCurve, Group, Model, Point, TwistedEdwards, Weierstrass};

/// An invertible change of coordinates between two curves.
///
/// `pull(push(P)) == P` holds for every point outside the map's documented
/// exceptional set.
pub trait RationalMap<F: Field> {
    fn domain(&self) -> &EllCurve<F>;
    fn codomain(&self) -> &EllCurve<F>;

    /// Domain to codomain.
    fn push(&self, p: &Point<F::Elt>) -> Point<F::Elt>;

    /// Codomain to domain.
    fn pull(&self, q: &Point<F::Elt>) -> Point<F::Elt>;
}

/// Maps a twisted Edwards curve to a short Weierstrass curve, going through
/// the Montgomery form `B*v^2 = u^3 + A*u^2 + u` with
/// `A = 2(a + d)/(a - d)` and `B = 4/(a - d)`.
///
/// The neutral elements correspond, and so do `(0, -1)` and `(A/3B, 0)`.
/// On an incomplete Edwards curve some Weierstrass points have no affine
/// preimage; `pull` sends those to the Edwards identity.
#[derive(Clone, Debug)]
pub struct EdwardsToWeierstrass<F: Field> {
    domain: EllCurve<F>,
    codomain: EllCurve<F>,
    /// Montgomery `A`
    mont_a: F::Elt,
    /// Montgomery `B`
    mont_b: F::Elt,
    inv_b: F::Elt,
    /// `A / 3`
    shift: F::Elt,
}

impl<F: Field> EdwardsToWeierstrass<F> {
    pub fn new(curve: &TwistedEdwards<F>) -> Result<Self, CurveError> {
        if !curve.is_valid() {
            debug!(curve = curve.name(), "refusing map from a degenerate curve");
            return Err(CurveError::InvalidCurve(format!(
                "{} is not a twisted Edwards curve",
                curve.name()
            )));
        }
        let f = curve.field();
        let three = f.from_u64(3);
        if three.is_zero() {
            return Err(CurveError::InvalidCurve(
                "characteristic 3 has no short Weierstrass form".into(),
            ));
        }

        let two = f.from_u64(2);
        let a_minus_d = f.sub(curve.a(), curve.d());
        let mont_a = f.div(&f.mul(&two, &f.add(curve.a(), curve.d())), &a_minus_d);
        let mont_b = f.div(&f.from_u64(4), &a_minus_d);
        let inv_b = f.inv(&mont_b);
        let shift = f.div(&mont_a, &three);

        // a_w = (3 - A^2) / (3 B^2),  b_w = (2A^3 - 9A) / (27 B^3)
        let a2 = f.sqr(&mont_a);
        let b2 = f.sqr(&mont_b);
        let a_w = f.div(&f.sub(&three, &a2), &f.mul(&three, &b2));
        let b_w = f.div(
            &f.sub(
                &f.mul(&two, &f.mul(&a2, &mont_a)),
                &f.mul(&f.from_u64(9), &mont_a),
            ),
            &f.mul(&f.from_u64(27), &f.mul(&b2, &mont_b)),
        );

        let codomain = Weierstrass::new(
            format!("{}-weierstrass", curve.name()),
            f.clone(),
            a_w,
            b_w,
            curve.order().clone(),
            curve.cofactor().clone(),
        );

        Ok(EdwardsToWeierstrass {
            domain: EllCurve::TwistedEdwards(curve.clone()),
            codomain: EllCurve::Weierstrass(codomain),
            mont_a,
            mont_b,
            inv_b,
            shift,
        })
    }

    /// Same as [`EdwardsToWeierstrass::new`] for a curve of unknown model.
    pub fn from_curve(curve: &EllCurve<F>) -> Result<Self, CurveError> {
        match curve.as_twisted_edwards() {
            Some(c) => Self::new(c),
            None => Err(CurveError::UnsupportedModel {
                op: "EdwardsToWeierstrass",
                model: Model::Weierstrass,
            }),
        }
    }

    /// The Montgomery coefficients `(A, B)`.
    pub fn montgomery(&self) -> (&F::Elt, &F::Elt) {
        (&self.mont_a, &self.mont_b)
    }

    fn field(&self) -> &F {
        self.domain.field()
    }

    fn edwards(&self, x: F::Elt, y: F::Elt) -> Point<F::Elt> {
        Point::Edwards { x, y }
    }
}

impl<F: Field> RationalMap<F> for EdwardsToWeierstrass<F> {
    fn domain(&self) -> &EllCurve<F> {
        &self.domain
    }

    fn codomain(&self) -> &EllCurve<F> {
        &self.codomain
    }

    fn push(&self, p: &Point<F::Elt>) -> Point<F::Elt> {
        debug_assert!(p.model() == Model::TwistedEdwards || p.coordinates().is_none());
        let f = self.field();
        let (x, y) = match p.coordinates() {
            Some(c) if !p.is_identity() => c,
            _ => return Point::Infinity,
        };

        // (0, -1) is the 2-torsion point sent to Montgomery (0, 0)
        if x.is_zero() {
            return Point::Weierstrass {
                x: f.mul(&self.shift, &self.inv_b),
                y: f.zero(),
            };
        }

        let one = f.one();
        let u = f.div(&f.add(&one, y), &f.sub(&one, y));
        let v = f.div(&u, x);
        Point::Weierstrass {
            x: f.add(&f.mul(&u, &self.inv_b), &f.mul(&self.shift, &self.inv_b)),
            y: f.mul(&v, &self.inv_b),
        }
    }

    fn pull(&self, q: &Point<F::Elt>) -> Point<F::Elt> {
        debug_assert_eq!(q.model(), Model::Weierstrass);
        let f = self.field();
        let identity = self.domain.identity();
        let (xw, yw) = match q.coordinates() {
            Some(c) => c,
            None => return identity,
        };

        let u = f.sub(&f.mul(&self.mont_b, xw), &self.shift);
        let v = f.mul(&self.mont_b, yw);
        let one = f.one();
        let u_plus_one = f.add(&u, &one);

        if v.is_zero() {
            return if u.is_zero() {
                self.edwards(f.zero(), f.neg(&one))
            } else {
                // 2-torsion at infinity on the Edwards side
                identity
            };
        }
        if u_plus_one.is_zero() {
            return identity;
        }

        self.edwards(f.div(&u, &v), f.div(&f.sub(&u, &one), &u_plus_one))
    }
}

/// The inverse of a rational map: pushes through `pull` and pulls through
/// `push`.
#[derive(Clone, Debug)]
pub struct Inverse<M>(M);

impl<M> Inverse<M> {
    pub fn new(map: M) -> Self {
        Inverse(map)
    }

    pub fn into_inner(self) -> M {
        self.0
    }
}

impl<F: Field, M: RationalMap<F>> RationalMap<F> for Inverse<M> {
    fn domain(&self) -> &EllCurve<F> {
        self.0.codomain()
    }

    fn codomain(&self) -> &EllCurve<F> {
        self.0.domain()
    }

    fn push(&self, p: &Point<F::Elt>) -> Point<F::Elt> {
        self.0.pull(p)
    }

    fn pull(&self, q: &Point<F::Elt>) -> Point<F::Elt> {
        self.0.push(q)
    }
}
