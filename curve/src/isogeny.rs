//! Isogenies between short Weierstrass curves.

use ellcurve_field::{Field, FieldElement};
use tracing::debug;

use crate::{CurveError, EllCurve, Group, Model, Point, Weierstrass};

/// A one-way group homomorphism from `domain` onto `codomain`.
///
/// Every point of the kernel, the domain identity included, is sent to the
/// codomain identity.
pub trait Isogeny<F: Field> {
    fn domain(&self) -> &EllCurve<F>;
    fn codomain(&self) -> &EllCurve<F>;
    fn push(&self, p: &Point<F::Elt>) -> Point<F::Elt>;
}

/// An isogeny given by its rational functions
/// `(x, y) -> (x_num(x) / x_den(x), y * y_num(x) / y_den(x))`.
///
/// Polynomials are coefficient lists, constant term first.
#[derive(Clone, Debug)]
pub struct RationalIsogeny<F: Field> {
    domain: EllCurve<F>,
    codomain: EllCurve<F>,
    x_num: Vec<F::Elt>,
    x_den: Vec<F::Elt>,
    y_num: Vec<F::Elt>,
    y_den: Vec<F::Elt>,
}

impl<F: Field> RationalIsogeny<F> {
    pub fn new(
        domain: EllCurve<F>,
        codomain: EllCurve<F>,
        x_num: Vec<F::Elt>,
        x_den: Vec<F::Elt>,
        y_num: Vec<F::Elt>,
        y_den: Vec<F::Elt>,
    ) -> Result<Self, CurveError> {
        for curve in [&domain, &codomain] {
            if curve.model() != Model::Weierstrass {
                debug!(curve = curve.name(), "isogeny endpoint is not Weierstrass");
                return Err(CurveError::UnsupportedModel {
                    op: "RationalIsogeny",
                    model: curve.model(),
                });
            }
        }
        if domain.field() != codomain.field() {
            debug!(
                domain = domain.name(),
                codomain = codomain.name(),
                "isogeny endpoints over different fields"
            );
            return Err(CurveError::MismatchedCurves(format!(
                "{} and {} are defined over different fields",
                domain.name(),
                codomain.name()
            )));
        }
        if [&x_num, &x_den, &y_num, &y_den].iter().any(|c| c.is_empty()) {
            return Err(CurveError::Parameter("isogeny polynomial"));
        }

        Ok(RationalIsogeny {
            domain,
            codomain,
            x_num,
            x_den,
            y_num,
            y_den,
        })
    }

    /// The 2-isogeny with kernel `{O, (x0, 0)}` (Vélu's formulas).
    pub fn two_isogeny(curve: &Weierstrass<F>, kernel: &Point<F::Elt>) -> Result<Self, CurveError> {
        let x0 = match kernel {
            Point::Weierstrass { x, y } if y.is_zero() && curve.is_on_curve(kernel) => x,
            _ => {
                debug!(curve = curve.name(), %kernel, "not a 2-torsion point");
                return Err(CurveError::InvalidKernel(format!(
                    "{kernel} is not a point of order 2 on {}",
                    curve.name()
                )));
            }
        };

        let f = curve.field();
        let x0_sq = f.sqr(x0);
        let t = f.add(&f.mul(&f.from_u64(3), &x0_sq), curve.a());
        let w = f.mul(x0, &t);
        let codomain = Weierstrass::new(
            format!("{}/2", curve.name()),
            f.clone(),
            f.sub(curve.a(), &f.mul(&f.from_u64(5), &t)),
            f.sub(curve.b(), &f.mul(&f.from_u64(7), &w)),
            curve.order().clone(),
            curve.cofactor().clone(),
        );

        // X = x + t / (x - x0)
        // Y = y * (1 - t / (x - x0)^2)
        let minus_x0 = f.neg(x0);
        let minus_2x0 = f.add(&minus_x0, &minus_x0);
        let x_num = vec![t.clone(), minus_x0.clone(), f.one()];
        let x_den = vec![minus_x0, f.one()];
        let y_num = vec![f.sub(&x0_sq, &t), minus_2x0.clone(), f.one()];
        let y_den = vec![x0_sq, minus_2x0, f.one()];

        Self::new(
            EllCurve::Weierstrass(curve.clone()),
            EllCurve::Weierstrass(codomain),
            x_num,
            x_den,
            y_num,
            y_den,
        )
    }

    /// Horner evaluation.
    fn eval(&self, coeffs: &[F::Elt], x: &F::Elt) -> F::Elt {
        let f = self.domain.field();
        coeffs
            .iter()
            .rev()
            .fold(f.zero(), |acc, c| f.add(&f.mul(&acc, x), c))
    }
}

impl<F: Field> Isogeny<F> for RationalIsogeny<F> {
    fn domain(&self) -> &EllCurve<F> {
        &self.domain
    }

    fn codomain(&self) -> &EllCurve<F> {
        &self.codomain
    }

    fn push(&self, p: &Point<F::Elt>) -> Point<F::Elt> {
        debug_assert_eq!(p.model(), Model::Weierstrass);
        let (x, y) = match p.coordinates() {
            None => return Point::Infinity,
            Some(c) => c,
        };

        let xd = self.eval(&self.x_den, x);
        let yd = self.eval(&self.y_den, x);
        if xd.is_zero() || yd.is_zero() {
            return Point::Infinity;
        }

        let f = self.domain.field();
        let xn = self.eval(&self.x_num, x);
        let yn = self.eval(&self.y_num, x);
        Point::Weierstrass {
            x: f.div(&xn, &xd),
            y: f.div(&f.mul(y, &yn), &yd),
        }
    }
}
