//! Error types for field construction and element decoding.

use thiserror::Error;

/// Errors that can occur while building fields or their elements.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    /// The modulus cannot define the requested field.
    #[error("invalid modulus: {0}")]
    InvalidModulus(String),

    /// A literal has the wrong number of components for the field degree.
    #[error("expected a literal with {expected} component(s), found {found}")]
    CoefficientShape { expected: usize, found: usize },

    /// A canonical representative was expected but the value is not below `p`.
    #[error("value is not a canonical element of the field")]
    OutOfRange,

    /// Malformed textual encoding.
    #[error("malformed encoding: {0}")]
    Encoding(String),

    #[error(transparent)]
    Hex(#[from] hex::FromHexError),
}
