//! Elliptic curve groups over large-characteristic finite fields.
//!
//! Curves come in two models, short Weierstrass and twisted Edwards, over
//! any field implementing [`ellcurve_field::Field`]: prime fields and the
//! quadratic extension used by FourQ. Points are plain affine values tagged
//! with their model; every operation takes the curve explicitly through the
//! [`Group`] trait. Birational maps and isogenies move points between
//! related curves, and [`CurveId`] instantiates the registered standard
//! curves together with their generators.

mod edwards;
mod ellcurve;
mod errors;
mod group;
mod isogeny;
mod map;
mod point;
mod random;
mod standard;
mod weierstrass;

pub use edwards::TwistedEdwards;
pub use ellcurve::{EllCurve, Model};
pub use errors::CurveError;
pub use group::Group;
pub use isogeny::{Isogeny, RationalIsogeny};
pub use map::{EdwardsToWeierstrass, Inverse, RationalMap};
pub use point::Point;
pub use random::RandomPoint;
pub use standard::{new_curve, CurveId, StdCurve, Standard};
pub use weierstrass::Weierstrass;
