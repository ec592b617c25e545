//! Exact rational exponents for unit powers.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg};
use std::str::FromStr;

use num_rational::Rational64;
use num_traits::{ToPrimitive, Zero};
use thiserror::Error;

/// A unit power as a reduced fraction.
///
/// Always stored reduced with a positive denominator (the `num-rational`
/// invariant). Integral values display as plain integers, everything else
/// as `numerator/denominator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Exponent(Rational64);

/// A string did not parse as an integer or `numerator/denominator` literal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid rational exponent '{text}'")]
pub struct ParseExponentError {
    pub text: String,
}

impl Exponent {
    /// Build `numer/denom`, reduced.
    ///
    /// Panics if `denom` is zero; parse paths reject that case before
    /// reaching here.
    pub fn new(numer: i64, denom: i64) -> Self {
        Self(Rational64::new(numer, denom))
    }

    /// The exponent 1.
    pub fn one() -> Self {
        Self(Rational64::from_integer(1))
    }

    /// The exponent 0.
    pub fn zero() -> Self {
        Self(Rational64::from_integer(0))
    }

    pub fn numer(&self) -> i64 {
        *self.0.numer()
    }

    pub fn denom(&self) -> i64 {
        *self.0.denom()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// True when the denominator is 1.
    pub fn is_integral(&self) -> bool {
        self.0.is_integer()
    }

    /// Nearest floating-point value, for folding into composite scales.
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }

    pub fn as_ratio(&self) -> Rational64 {
        self.0
    }
}

impl From<Rational64> for Exponent {
    fn from(r: Rational64) -> Self {
        Self(r)
    }
}

impl From<i64> for Exponent {
    fn from(n: i64) -> Self {
        Self(Rational64::from_integer(n))
    }
}

impl From<(i64, i64)> for Exponent {
    /// Panics if the denominator is zero.
    fn from((n, d): (i64, i64)) -> Self {
        Self::new(n, d)
    }
}

impl Add for Exponent {
    type Output = Exponent;

    fn add(self, rhs: Exponent) -> Exponent {
        Exponent(self.0 + rhs.0)
    }
}

impl AddAssign for Exponent {
    fn add_assign(&mut self, rhs: Exponent) {
        self.0 += rhs.0;
    }
}

impl Mul for Exponent {
    type Output = Exponent;

    fn mul(self, rhs: Exponent) -> Exponent {
        Exponent(self.0 * rhs.0)
    }
}

impl Neg for Exponent {
    type Output = Exponent;

    fn neg(self) -> Exponent {
        Exponent(-self.0)
    }
}

impl fmt::Display for Exponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Exponent {
    type Err = ParseExponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseExponentError {
            text: s.to_string(),
        };
        let (numer, denom) = match s.split_once('/') {
            Some((n, d)) => (n, d),
            None => (s, "1"),
        };
        let numer: i64 = numer.parse().map_err(|_| err())?;
        let denom: i64 = denom.parse().map_err(|_| err())?;
        if denom == 0 {
            return Err(err());
        }
        Ok(Self(Rational64::new(numer, denom)))
    }
}
