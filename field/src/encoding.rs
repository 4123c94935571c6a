//! Fixed-width hexadecimal coordinate encoding.
//!
//! Each base-field coefficient is written as big-endian hex padded to
//! [`Field::byte_len`] bytes. Elements of a quadratic extension are written
//! as `"<c0> + <c1> * i"`.

use num_bigint::BigUint;

use crate::{Field, FieldElement, FieldError};

const SEPARATOR: &str = " + ";
const IMAGINARY: &str = " * i";

/// Renders `e` as fixed-width hexadecimal.
pub fn to_hex<F: Field>(field: &F, e: &F::Elt) -> String {
    let width = 2 * field.byte_len();
    let coeffs = e.polynomial();
    let mut out = String::with_capacity(coeffs.len() * (width + SEPARATOR.len() + IMAGINARY.len()));
    for (k, c) in coeffs.iter().enumerate() {
        if k > 0 {
            out.push_str(SEPARATOR);
        }
        out.push_str(&format!("{:0>width$}", hex::encode(c.to_bytes_be())));
        if k == 1 {
            out.push_str(IMAGINARY);
        }
    }
    out
}

/// Parses the output of [`to_hex`] back into a canonical field element.
pub fn from_hex<F: Field>(field: &F, s: &str) -> Result<F::Elt, FieldError> {
    let width = 2 * field.byte_len();
    let mut coeffs = Vec::with_capacity(field.ext());

    for (k, part) in s.trim().split(SEPARATOR).enumerate() {
        let digits = match k {
            0 => part,
            1 => part.strip_suffix(IMAGINARY).ok_or_else(|| {
                FieldError::Encoding(format!("missing imaginary unit in {part:?}"))
            })?,
            _ => return Err(FieldError::Encoding(format!("too many components in {s:?}"))),
        };
        if digits.len() != width {
            return Err(FieldError::Encoding(format!(
                "expected {width} hex digits, found {}",
                digits.len()
            )));
        }
        coeffs.push(BigUint::from_bytes_be(&hex::decode(digits)?));
    }

    field.from_polynomial(&coeffs)
}
