//! sd-rational: exact rational arithmetic for symdim.
//!
//! Contains:
//! - exponent (reduced-fraction unit powers)
//! - matrix (exact Gauss-Jordan inversion over rational matrices)

pub mod exponent;
pub mod matrix;

// Re-exports: nice ergonomics for downstream crates
pub use exponent::{Exponent, ParseExponentError};
pub use matrix::{MatrixError, RationalMatrix, RationalVector, invert};
pub use num_rational::Rational64;
