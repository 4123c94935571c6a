use ellcurve_field::Field;
use rand::Rng;

use crate::{EllCurve, Group, Point, TwistedEdwards, Weierstrass};

/// Helper trait for sampling random curve points.
///
/// Samples are uniform over the recoverable coordinate, not over the group,
/// and are not projected into the prime-order subgroup.
pub trait RandomPoint<F: Field> {
    fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point<F::Elt>;
}

impl<F: Field> RandomPoint<F> for Weierstrass<F> {
    fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point<F::Elt> {
        let f = self.field();
        loop {
            let x = f.random(rng);
            if let Some(y) = self.point_x2y(&x) {
                let y = if rng.random::<bool>() { f.neg(&y) } else { y };
                return self.new_point(x, y);
            }
        }
    }
}

impl<F: Field> RandomPoint<F> for TwistedEdwards<F> {
    fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point<F::Elt> {
        let f = self.field();
        loop {
            let y = f.random(rng);
            if let Some(x) = self.point_y2x(&y) {
                let x = if rng.random::<bool>() { f.neg(&x) } else { x };
                return self.new_point(x, y);
            }
        }
    }
}

impl<F: Field> RandomPoint<F> for EllCurve<F> {
    #[inline]
    fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point<F::Elt> {
        match self {
            EllCurve::Weierstrass(c) => c.random_point(rng),
            EllCurve::TwistedEdwards(c) => c.random_point(rng),
        }
    }
}
