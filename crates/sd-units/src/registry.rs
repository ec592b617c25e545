//! Process-wide unit registry.
//!
//! Maps unit names to their [`Unit`] values. The standard table is
//! installed on first access; user code extends the registry at any time
//! through [`Unit::irreducible`] and [`Unit::named`]. Registration takes
//! the write lock, lookups take the read lock, entries are never removed
//! or overwritten.

use std::collections::HashMap;
use std::sync::OnceLock;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::error::{UnitsError, UnitsResult};
use crate::unit::Unit;

static REGISTRY: OnceLock<RwLock<HashMap<String, Unit>>> = OnceLock::new();

fn registry() -> &'static RwLock<HashMap<String, Unit>> {
    REGISTRY.get_or_init(|| {
        let table = standard_units();
        debug!(count = table.len(), "installed standard unit table");
        RwLock::new(table)
    })
}

/// Look up a registered unit by name.
pub fn lookup(name: &str) -> UnitsResult<Unit> {
    registry()
        .read()
        .get(name)
        .cloned()
        .ok_or_else(|| UnitsError::UnknownUnit {
            name: name.to_string(),
        })
}

pub fn is_registered(name: &str) -> bool {
    registry().read().contains_key(name)
}

/// Register `unit` under `name`. Never overwrites an existing entry.
pub(crate) fn register(name: &str, unit: Unit) -> UnitsResult<()> {
    validate_name(name)?;
    let mut table = registry().write();
    if table.contains_key(name) {
        return Err(UnitsError::DuplicateName {
            name: name.to_string(),
        });
    }
    table.insert(name.to_string(), unit);
    trace!(name, "registered unit");
    Ok(())
}

/// Names must survive the whitespace-delimited string grammar.
fn validate_name(name: &str) -> UnitsResult<()> {
    if name.is_empty()
        || name.contains(char::is_whitespace)
        || name.contains("**")
        || name.contains('^')
    {
        return Err(UnitsError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

fn irreducible(table: &mut HashMap<String, Unit>, name: &str) -> Unit {
    let unit = Unit::raw_irreducible(name);
    table.insert(name.to_string(), unit.clone());
    unit
}

fn named(table: &mut HashMap<String, Unit>, name: &str, represents: Unit) -> Unit {
    let unit = Unit::raw_named(name, None, represents);
    table.insert(name.to_string(), unit.clone());
    unit
}

fn named_latex(
    table: &mut HashMap<String, Unit>,
    name: &str,
    latex: &str,
    represents: Unit,
) -> Unit {
    let unit = Unit::raw_named(name, Some(latex), represents);
    table.insert(name.to_string(), unit.clone());
    unit
}

/// The standard unit table: SI-ish base dimensions, the substitutable
/// cosmological parameters, and the usual astrophysical derived units.
fn standard_units() -> HashMap<String, Unit> {
    let mut t = HashMap::new();

    let m = irreducible(&mut t, "m");
    let s = irreducible(&mut t, "s");
    let kg = irreducible(&mut t, "kg");
    irreducible(&mut t, "K");

    // Cosmological quantities that can be substituted later
    let a = irreducible(&mut t, "a");
    irreducible(&mut t, "h");

    // Times
    let yr = named(&mut t, "yr", 3.1556926e7 * &s);
    let kyr = named(&mut t, "kyr", 1000.0 * &yr);
    let myr = named(&mut t, "Myr", 1000.0 * &kyr);
    named(&mut t, "Gyr", 1000.0 * &myr);

    // Distances
    let cm = named(&mut t, "cm", 0.01 * &m);
    named(&mut t, "km", 1000.0 * &m);
    named(&mut t, "au", 1.49598e11 * &m);
    let pc = named(&mut t, "pc", 3.08568025e16 * &m);
    let kpc = named(&mut t, "kpc", 1000.0 * &pc);
    let mpc = named(&mut t, "Mpc", 1000.0 * &kpc);
    named(&mut t, "Gpc", 1000.0 * &mpc);

    // Masses
    named_latex(&mut t, "Msol", r"M_{\odot}", 1.98892e30 * &kg);
    named(&mut t, "g", 1.0e-3 * &kg);
    named_latex(&mut t, "m_p", "m_p", 1.67262158e-27 * &kg);
    named_latex(&mut t, "m_e", "m_e", 9.10938188e-31 * &kg);

    // Forces
    let newton = named(&mut t, "N", &(&kg * &m) * &s.pow(-2));

    // Energies
    let joule = named(&mut t, "J", &newton * &m);
    let erg = named(&mut t, "erg", 1.0e-7 * &joule);
    let ev = named(&mut t, "eV", 1.60217646e-19 * &joule);
    let kev = named(&mut t, "keV", 1.0e3 * &ev);
    named(&mut t, "MeV", 1.0e3 * &kev);

    // Pressures
    named(&mut t, "Pa", &joule / &m);
    named(&mut t, "dyn", &erg / &cm);

    // Redshift
    named(&mut t, "(1+z)", 1.0 / &a);

    t
}

/// Helpful physical quantities, as composite units over the standard table.
pub mod constants {
    use super::lookup;
    use crate::error::UnitsResult;
    use crate::unit::Unit;

    /// Boltzmann constant, 1.3806503e-23 J/K.
    pub fn boltzmann() -> UnitsResult<Unit> {
        Ok(1.3806503e-23 * &(&lookup("J")? / &lookup("K")?))
    }

    /// Speed of light, 299792458 m/s.
    pub fn speed_of_light() -> UnitsResult<Unit> {
        Ok(299792458.0 * &(&lookup("m")? / &lookup("s")?))
    }

    /// Gravitational constant, 6.67300e-11 m^3 kg^-1 s^-2.
    pub fn gravitational() -> UnitsResult<Unit> {
        let m = lookup("m")?;
        let kg = lookup("kg")?;
        let s = lookup("s")?;
        Ok(6.67300e-11 * &(&(&m.pow(3) * &kg.pow(-1)) * &s.pow(-2)))
    }
}
