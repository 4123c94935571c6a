//! The closed set of curve models and the curve type dispatching over them.

use core::fmt::{self, Display, Formatter};

use ellcurve_field::{BigUint, Field};
use serde::{Deserialize, Serialize};

use crate::{CurveError, Group, Point, TwistedEdwards, Weierstrass};

/// Shape of the defining equation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Model {
    /// `y^2 = x^3 + a*x + b`
    Weierstrass,
    /// `a*x^2 + y^2 = 1 + b*x^2*y^2`
    TwistedEdwards,
}

impl Model {
    /// Builds a curve of this model. For twisted Edwards curves `b` is the
    /// coefficient `d`.
    pub fn curve<F: Field>(
        self,
        name: impl Into<String>,
        field: F,
        a: F::Elt,
        b: F::Elt,
        order: BigUint,
        cofactor: BigUint,
    ) -> EllCurve<F> {
        match self {
            Model::Weierstrass => {
                EllCurve::Weierstrass(Weierstrass::new(name, field, a, b, order, cofactor))
            }
            Model::TwistedEdwards => {
                EllCurve::TwistedEdwards(TwistedEdwards::new(name, field, a, b, order, cofactor))
            }
        }
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Model::Weierstrass => write!(f, "Weierstrass"),
            Model::TwistedEdwards => write!(f, "twisted Edwards"),
        }
    }
}

/// An elliptic curve of either supported model.
#[derive(Clone, Debug)]
pub enum EllCurve<F: Field> {
    Weierstrass(Weierstrass<F>),
    TwistedEdwards(TwistedEdwards<F>),
}

macro_rules! dispatch {
    ($self:expr, $c:ident => $body:expr) => {
        match $self {
            EllCurve::Weierstrass($c) => $body,
            EllCurve::TwistedEdwards($c) => $body,
        }
    };
}

impl<F: Field> EllCurve<F> {
    pub fn model(&self) -> Model {
        match self {
            EllCurve::Weierstrass(_) => Model::Weierstrass,
            EllCurve::TwistedEdwards(_) => Model::TwistedEdwards,
        }
    }

    pub fn name(&self) -> &str {
        dispatch!(self, c => c.name())
    }

    pub fn a(&self) -> &F::Elt {
        dispatch!(self, c => c.a())
    }

    /// `b` for Weierstrass curves, `d` for twisted Edwards curves.
    pub fn b(&self) -> &F::Elt {
        match self {
            EllCurve::Weierstrass(c) => c.b(),
            EllCurve::TwistedEdwards(c) => c.d(),
        }
    }

    /// Same model, field and coefficients.
    pub fn is_equal(&self, other: &Self) -> bool {
        match (self, other) {
            (EllCurve::Weierstrass(c1), EllCurve::Weierstrass(c2)) => c1.is_equal(c2),
            (EllCurve::TwistedEdwards(c1), EllCurve::TwistedEdwards(c2)) => c1.is_equal(c2),
            _ => false,
        }
    }

    /// `y` with `(x, y)` on a Weierstrass curve.
    pub fn point_x2y(&self, x: &F::Elt) -> Result<F::Elt, CurveError> {
        match self {
            EllCurve::Weierstrass(c) => c.point_x2y(x).ok_or(CurveError::NoSquareRoot),
            EllCurve::TwistedEdwards(_) => Err(CurveError::UnsupportedModel {
                op: "point_x2y",
                model: Model::TwistedEdwards,
            }),
        }
    }

    /// `x` with `(x, y)` on a twisted Edwards curve.
    pub fn point_y2x(&self, y: &F::Elt) -> Result<F::Elt, CurveError> {
        match self {
            EllCurve::TwistedEdwards(c) => c.point_y2x(y).ok_or(CurveError::NoSquareRoot),
            EllCurve::Weierstrass(_) => Err(CurveError::UnsupportedModel {
                op: "point_y2x",
                model: Model::Weierstrass,
            }),
        }
    }

    pub fn as_weierstrass(&self) -> Option<&Weierstrass<F>> {
        match self {
            EllCurve::Weierstrass(c) => Some(c),
            EllCurve::TwistedEdwards(_) => None,
        }
    }

    pub fn as_twisted_edwards(&self) -> Option<&TwistedEdwards<F>> {
        match self {
            EllCurve::TwistedEdwards(c) => Some(c),
            EllCurve::Weierstrass(_) => None,
        }
    }
}

impl<F: Field> From<Weierstrass<F>> for EllCurve<F> {
    fn from(c: Weierstrass<F>) -> Self {
        EllCurve::Weierstrass(c)
    }
}

impl<F: Field> From<TwistedEdwards<F>> for EllCurve<F> {
    fn from(c: TwistedEdwards<F>) -> Self {
        EllCurve::TwistedEdwards(c)
    }
}

impl<F: Field> Group<F> for EllCurve<F> {
    fn field(&self) -> &F {
        dispatch!(self, c => c.field())
    }

    fn order(&self) -> &BigUint {
        dispatch!(self, c => c.order())
    }

    fn cofactor(&self) -> &BigUint {
        dispatch!(self, c => c.cofactor())
    }

    fn identity(&self) -> Point<F::Elt> {
        dispatch!(self, c => c.identity())
    }

    fn new_point(&self, x: F::Elt, y: F::Elt) -> Point<F::Elt> {
        dispatch!(self, c => c.new_point(x, y))
    }

    fn is_on_curve(&self, p: &Point<F::Elt>) -> bool {
        dispatch!(self, c => c.is_on_curve(p))
    }

    fn is_valid(&self) -> bool {
        dispatch!(self, c => c.is_valid())
    }

    fn neg(&self, p: &Point<F::Elt>) -> Point<F::Elt> {
        dispatch!(self, c => c.neg(p))
    }

    fn add(&self, p: &Point<F::Elt>, q: &Point<F::Elt>) -> Point<F::Elt> {
        dispatch!(self, c => c.add(p, q))
    }

    fn double(&self, p: &Point<F::Elt>) -> Point<F::Elt> {
        dispatch!(self, c => c.double(p))
    }
}

impl<F: Field> PartialEq for EllCurve<F> {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

impl<F: Field> Display for EllCurve<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        dispatch!(self, c => Display::fmt(c, f))
    }
}
