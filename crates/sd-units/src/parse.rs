//! Unit string parsing.
//!
//! Grammar (whitespace-delimited tokens):
//!
//! ```text
//! [<scale>] [<name>[**<power> | ^<power>]] ...
//! ```
//!
//! The optional leading `<scale>` is a float literal (default 1.0); each
//! `<power>` is an integer or `numerator/denominator` rational; every
//! `<name>` must already be registered. Examples: `"1.e30 kg"`,
//! `"kpc**2"`, `"26.2 m s**-1"`, `"2.1e12 m_p cm**-2/3"`.

use std::str::FromStr;

use sd_rational::Exponent;

use crate::error::{UnitsError, UnitsResult};
use crate::registry;
use crate::unit::{CompositeUnit, Unit};

impl FromStr for Unit {
    type Err = UnitsError;

    fn from_str(s: &str) -> UnitsResult<Unit> {
        parse_unit(s)
    }
}

impl Unit {
    /// Build a unit from a description string; see the module docs for the
    /// grammar.
    pub fn parse(s: &str) -> UnitsResult<Unit> {
        parse_unit(s)
    }
}

/// Anything that can stand for a unit in an API argument: a [`Unit`] value
/// or a grammar string (parsed on use).
pub trait ToUnit {
    fn to_unit(&self) -> UnitsResult<Unit>;
}

impl ToUnit for Unit {
    fn to_unit(&self) -> UnitsResult<Unit> {
        Ok(self.clone())
    }
}

impl ToUnit for str {
    fn to_unit(&self) -> UnitsResult<Unit> {
        parse_unit(self)
    }
}

impl ToUnit for String {
    fn to_unit(&self) -> UnitsResult<Unit> {
        parse_unit(self)
    }
}

impl<T: ToUnit + ?Sized> ToUnit for &T {
    fn to_unit(&self) -> UnitsResult<Unit> {
        (**self).to_unit()
    }
}

/// The result is left unsimplified: base order follows the input, and
/// later operators (or an explicit `simplify`) canonicalize it.
fn parse_unit(s: &str) -> UnitsResult<Unit> {
    let mut tokens = s.split_whitespace().peekable();

    let mut scale = 1.0;
    if let Some(tok) = tokens.peek() {
        if let Ok(value) = tok.parse::<f64>() {
            scale = value;
            tokens.next();
        }
    }

    let mut bases = Vec::new();
    let mut powers = Vec::new();
    for tok in tokens {
        let (name, power) = match tok.split_once("**").or_else(|| tok.split_once('^')) {
            Some((name, suffix)) => {
                let power =
                    suffix
                        .parse::<Exponent>()
                        .map_err(|_| UnitsError::InvalidExponent {
                            text: suffix.to_string(),
                        })?;
                (name, power)
            }
            None => (tok, Exponent::one()),
        };
        bases.push(registry::lookup(name)?);
        powers.push(power);
    }

    Ok(Unit::Composite(CompositeUnit::new(scale, bases, powers)))
}
