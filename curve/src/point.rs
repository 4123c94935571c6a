use core::fmt::{self, Display, Formatter};

use ellcurve_field::FieldElement;
use serde::{Deserialize, Serialize};

use crate::Model;

/// A point of an elliptic curve in affine coordinates.
///
/// Points do not reference their curve: every operation takes the curve
/// explicitly. The variant records which model the coordinates belong to,
/// since the neutral element is represented differently in each:
/// `Infinity` for short Weierstrass curves and `(0, 1)` for twisted Edwards
/// curves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Point<E> {
    /// The point at infinity of a short Weierstrass curve.
    Infinity,
    /// An affine point of a short Weierstrass curve.
    Weierstrass { x: E, y: E },
    /// An affine point of a twisted Edwards curve.
    Edwards { x: E, y: E },
}

impl<E: FieldElement> Point<E> {
    /// The model whose coordinates this point carries.
    pub fn model(&self) -> Model {
        match self {
            Point::Infinity | Point::Weierstrass { .. } => Model::Weierstrass,
            Point::Edwards { .. } => Model::TwistedEdwards,
        }
    }

    /// Check if this point is the neutral element of its group.
    pub fn is_identity(&self) -> bool {
        match self {
            Point::Infinity => true,
            Point::Weierstrass { .. } => false,
            Point::Edwards { x, y } => x.is_zero() && y.is_one(),
        }
    }

    /// Equality of group elements.
    ///
    /// `Infinity` and the Edwards `(0, 1)` both denote the neutral element
    /// and compare equal; otherwise coordinates are canonical so structural
    /// equality is field equality.
    pub fn is_equal(&self, other: &Self) -> bool {
        match (self.is_identity(), other.is_identity()) {
            (true, true) => true,
            (false, false) => self == other,
            _ => false,
        }
    }

    /// Check if this point has order exactly two.
    ///
    /// On a Weierstrass curve these are the points with `y = 0`. On a twisted
    /// Edwards curve the only affine one is `(0, -1)`: any point with `x = 0`
    /// has `y = ±1`.
    pub fn is_two_torsion(&self) -> bool {
        match self {
            Point::Infinity => false,
            Point::Weierstrass { y, .. } => y.is_zero(),
            Point::Edwards { x, y } => x.is_zero() && !y.is_one(),
        }
    }

    /// The x-coordinate, `None` at infinity.
    pub fn x(&self) -> Option<&E> {
        self.coordinates().map(|(x, _)| x)
    }

    /// The y-coordinate, `None` at infinity.
    pub fn y(&self) -> Option<&E> {
        self.coordinates().map(|(_, y)| y)
    }

    pub fn coordinates(&self) -> Option<(&E, &E)> {
        match self {
            Point::Infinity => None,
            Point::Weierstrass { x, y } | Point::Edwards { x, y } => Some((x, y)),
        }
    }
}

impl<E: FieldElement> Display for Point<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.coordinates() {
            None => write!(f, "(inf)"),
            Some((x, y)) => write!(f, "({x}, {y})"),
        }
    }
}
