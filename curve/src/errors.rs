//! Error types for curve construction, registry lookup and coordinate recovery.

use ellcurve_field::FieldError;
use thiserror::Error;

use crate::Model;

/// Errors reported by curve operations.
///
/// Structural cases of the group law (identity, negation, doubling) are
/// never errors; only conditions the caller must act on are reported here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    /// The registry has no curve under this identifier.
    #[error("curve not supported: {0}")]
    UnsupportedCurve(String),

    /// The operation is only meaningful on the other curve model.
    #[error("{op} is not supported on {model} curves")]
    UnsupportedModel { op: &'static str, model: Model },

    /// Coordinate recovery has no solution in the field.
    #[error("no square root: the coordinate does not belong to a curve point")]
    NoSquareRoot,

    /// A twisted Edwards sum lies at infinity on the projective closure.
    /// Only incomplete curves have such exceptional pairs.
    #[error("exceptional sum: no affine point on the incomplete curve {0}")]
    NotAffine(String),

    /// The coefficients do not define a non-singular curve of the expected model.
    #[error("invalid curve: {0}")]
    InvalidCurve(String),

    /// The point cannot generate the kernel of the requested isogeny.
    #[error("invalid isogeny kernel: {0}")]
    InvalidKernel(String),

    /// Two curves that must share a field and model do not.
    #[error("curves do not match: {0}")]
    MismatchedCurves(String),

    /// Points and scalars of a multi-scalar multiplication differ in number.
    #[error("expected {points} scalars, found {scalars}")]
    LengthMismatch { points: usize, scalars: usize },

    /// A registry literal could not be parsed.
    #[error("malformed curve parameter {0:?}")]
    Parameter(&'static str),

    #[error(transparent)]
    Field(#[from] FieldError),
}
