//! sd-units: symbolic, dimensionally-correct unit algebra.
//!
//! Units are built from strings or composed with operators; arithmetic
//! tracks composite dimensions exactly with rational exponents, conversion
//! ratios substitute free parameters (the cosmological scale factor `a`,
//! the dimensionless Hubble parameter `h`), and a unit's dimensions
//! project onto arbitrary bases through exact rational linear algebra.
//!
//! ```
//! use sd_units::Unit;
//!
//! let rho = Unit::parse("Msol kpc**-3")?;
//! let in_protons = rho.ratio("m_p cm**-3")?;
//! assert!(in_protons > 0.0);
//!
//! // Comoving distances need a value for the scale factor:
//! let comoving = Unit::parse("kpc a")?;
//! let physical = comoving.ratio_with("kpc", &[("a", 0.5)])?;
//! assert!((physical - 0.5).abs() < 1e-12);
//! # Ok::<(), sd_units::UnitsError>(())
//! ```
//!
//! Contains:
//! - unit (variants, operators, expand/gather simplifier)
//! - registry (process-wide name table + standard units + constants)
//! - parse (the unit string grammar)
//! - convert, render, project (ratios, Display/LaTeX, dimensional projection)

pub mod error;
pub mod parse;
pub mod registry;
pub mod unit;

mod convert;
mod project;
mod render;

#[cfg(feature = "serde")]
mod serde_impl;

// Re-exports: nice ergonomics for downstream crates
pub use error::{UnitsError, UnitsResult};
pub use parse::ToUnit;
pub use registry::{constants, is_registered, lookup};
pub use sd_rational::Exponent;
pub use unit::{CompositeUnit, IrreducibleUnit, NamedUnit, Unit};
