//! Exact matrix inversion over rationals.
//!
//! Gauss-Jordan elimination with rational pivots. Floating-point
//! factorizations are useless here: the caller needs to distinguish
//! "singular" from "nearly singular" exactly, and to verify candidate
//! solutions with equality rather than tolerance.

use nalgebra::{DMatrix, DVector};
use num_rational::Rational64;
use num_traits::Zero;
use thiserror::Error;

/// Dynamically-sized matrix of exact rationals.
pub type RationalMatrix = DMatrix<Rational64>;

/// Dynamically-sized column vector of exact rationals.
pub type RationalVector = DVector<Rational64>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// No exact inverse exists.
    #[error("matrix is singular")]
    Singular,

    /// Inversion is only defined for square matrices.
    #[error("matrix is not square ({rows}x{cols})")]
    NotSquare { rows: usize, cols: usize },
}

/// Invert a square rational matrix exactly.
///
/// Row-reduces an augmented copy to the identity. Pivot selection takes the
/// first nonzero entry in the column; with exact arithmetic there is no
/// stability reason to prefer larger pivots.
pub fn invert(m: &RationalMatrix) -> Result<RationalMatrix, MatrixError> {
    let n = m.nrows();
    if m.ncols() != n {
        return Err(MatrixError::NotSquare {
            rows: m.nrows(),
            cols: m.ncols(),
        });
    }

    let mut work = m.clone();
    let mut inv = RationalMatrix::identity(n, n);

    for col in 0..n {
        let pivot_row = (col..n)
            .find(|&r| !work[(r, col)].is_zero())
            .ok_or(MatrixError::Singular)?;
        if pivot_row != col {
            work.swap_rows(pivot_row, col);
            inv.swap_rows(pivot_row, col);
        }

        let pivot = work[(col, col)];
        for j in 0..n {
            work[(col, j)] /= pivot;
            inv[(col, j)] /= pivot;
        }

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = work[(row, col)];
            if factor.is_zero() {
                continue;
            }
            for j in 0..n {
                let w = work[(col, j)] * factor;
                work[(row, j)] -= w;
                let v = inv[(col, j)] * factor;
                inv[(row, j)] -= v;
            }
        }
    }

    Ok(inv)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64, d: i64) -> Rational64 {
        Rational64::new(n, d)
    }

    fn int(n: i64) -> Rational64 {
        Rational64::from_integer(n)
    }

    #[test]
    fn inverts_identity() {
        let id = RationalMatrix::identity(3, 3);
        assert_eq!(invert(&id).unwrap(), id);
    }

    #[test]
    fn inverts_2x2_exactly() {
        let m = RationalMatrix::from_row_slice(2, 2, &[int(1), int(2), int(3), int(4)]);
        let inv = invert(&m).unwrap();
        // det = -2, inverse = [-2, 1; 3/2, -1/2]
        assert_eq!(inv[(0, 0)], int(-2));
        assert_eq!(inv[(0, 1)], int(1));
        assert_eq!(inv[(1, 0)], r(3, 2));
        assert_eq!(inv[(1, 1)], r(-1, 2));
        assert_eq!(&m * &inv, RationalMatrix::identity(2, 2));
    }

    #[test]
    fn inverts_with_zero_leading_pivot() {
        let m = RationalMatrix::from_row_slice(2, 2, &[int(0), int(1), int(1), int(0)]);
        let inv = invert(&m).unwrap();
        assert_eq!(&m * &inv, RationalMatrix::identity(2, 2));
    }

    #[test]
    fn fractional_entries_stay_exact() {
        let m = RationalMatrix::from_row_slice(2, 2, &[r(1, 3), int(0), int(0), r(2, 7)]);
        let inv = invert(&m).unwrap();
        assert_eq!(inv[(0, 0)], int(3));
        assert_eq!(inv[(1, 1)], r(7, 2));
    }

    #[test]
    fn singular_is_detected() {
        let m = RationalMatrix::from_row_slice(2, 2, &[int(1), int(2), int(2), int(4)]);
        assert_eq!(invert(&m), Err(MatrixError::Singular));
    }

    #[test]
    fn non_square_is_rejected() {
        let m = RationalMatrix::zeros(2, 3);
        assert_eq!(
            invert(&m),
            Err(MatrixError::NotSquare { rows: 2, cols: 3 })
        );
    }

    #[test]
    fn empty_matrix_inverts_to_empty() {
        let m = RationalMatrix::zeros(0, 0);
        assert_eq!(invert(&m).unwrap().nrows(), 0);
    }
}
