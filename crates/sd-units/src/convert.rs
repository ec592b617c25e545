//! Conversion ratios, dimensionless constants, and comparisons.

use std::cmp::Ordering;

use crate::error::{UnitsError, UnitsResult};
use crate::parse::ToUnit;
use crate::unit::Unit;

impl Unit {
    /// The pure numeric factor left once every dimension surviving
    /// [`Unit::irrep`] has been eliminated by a substitution.
    ///
    /// Substitutions map irreducible names to values, e.g.
    /// `&[("a", 0.5), ("h", 0.7)]`. Any leftover dimension without a
    /// substitution fails with
    /// [`NotDimensionless`](UnitsError::NotDimensionless).
    pub fn dimensionless_constant(&self, substitutions: &[(&str, f64)]) -> UnitsResult<f64> {
        match self.irrep() {
            Unit::NoUnit => Ok(1.0),
            Unit::Composite(c) => {
                let mut constant = c.scale();
                for (base, power) in c.bases().iter().zip(c.powers()) {
                    match substitutions.iter().find(|(name, _)| Some(*name) == base.name()) {
                        Some((_, value)) => constant *= value.powf(power.to_f64()),
                        None => {
                            return Err(UnitsError::NotDimensionless {
                                dim: base.to_string(),
                            });
                        }
                    }
                }
                Ok(constant)
            }
            // irrep() only yields NoUnit or a composite
            _ => Err(UnitsError::NotConvertible),
        }
    }

    /// Conversion ratio between this unit and another, substituting values
    /// for free parameters.
    ///
    /// `other` may be a `Unit` or a grammar string. Incompatible dimensions
    /// fail with [`NotConvertible`](UnitsError::NotConvertible). The
    /// dimensionless sentinel only converts to itself.
    pub fn ratio_with<T: ToUnit>(
        &self,
        other: T,
        substitutions: &[(&str, f64)],
    ) -> UnitsResult<f64> {
        let other = other.to_unit()?;
        if self.is_no_unit() || other.is_no_unit() {
            return if self.is_no_unit() && other.is_no_unit() {
                Ok(1.0)
            } else {
                Err(UnitsError::NotConvertible)
            };
        }
        (self / &other)
            .dimensionless_constant(substitutions)
            .map_err(|_| UnitsError::NotConvertible)
    }

    /// [`Unit::ratio_with`] without substitutions.
    pub fn ratio<T: ToUnit>(&self, other: T) -> UnitsResult<f64> {
        self.ratio_with(other, &[])
    }

    /// Compare magnitudes of compatible units, propagating
    /// [`NotConvertible`](UnitsError::NotConvertible) for incompatible
    /// dimensions. The `PartialOrd` impl reports those as unordered
    /// instead.
    pub fn try_cmp(&self, other: &Unit) -> UnitsResult<Ordering> {
        let ratio = self.ratio(other)?;
        ratio.partial_cmp(&1.0).ok_or(UnitsError::NotConvertible)
    }
}

impl PartialEq for Unit {
    /// Units are equal when their conversion ratio is exactly 1.
    /// Incompatible dimensions compare unequal.
    fn eq(&self, other: &Unit) -> bool {
        matches!(self.ratio(other), Ok(ratio) if ratio == 1.0)
    }
}

impl PartialOrd for Unit {
    /// Incompatible dimensions are unordered; use [`Unit::try_cmp`] when
    /// the error matters.
    fn partial_cmp(&self, other: &Unit) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::lookup;

    #[test]
    fn msol_to_kg() {
        let msol = lookup("Msol").unwrap();
        let r = msol.ratio("kg").unwrap();
        assert!((r - 1.98892e30).abs() / 1.98892e30 < 1e-12);
    }

    #[test]
    fn density_conversion_across_systems() {
        let r = Unit::parse("Msol kpc**-3")
            .unwrap()
            .ratio("m_p cm**-3")
            .unwrap();
        // known value ~4.04e-8
        assert!(r > 4.0e-8 && r < 4.1e-8);
    }

    #[test]
    fn incompatible_dimensions_are_not_convertible() {
        let msol = lookup("Msol").unwrap();
        assert_eq!(msol.ratio("kpc"), Err(UnitsError::NotConvertible));
    }

    #[test]
    fn comoving_distance_needs_a_substitution() {
        let comoving = Unit::parse("kpc a").unwrap();
        assert!(!comoving.is_dimensionless());
        assert_eq!(comoving.ratio("kpc"), Err(UnitsError::NotConvertible));
        let r = comoving.ratio_with("kpc", &[("a", 0.5)]).unwrap();
        assert!((r - 0.5).abs() < 1e-12);
    }

    #[test]
    fn substitutions_respect_powers() {
        let u = Unit::parse("kpc a**2 h**-1").unwrap();
        let r = u
            .ratio_with("kpc", &[("a", 0.5), ("h", 0.7)])
            .unwrap();
        assert!((r - 0.25 / 0.7).abs() < 1e-12);
    }

    #[test]
    fn unresolved_dimension_is_named() {
        let comoving = Unit::parse("kpc a").unwrap();
        let err = (&comoving / &lookup("kpc").unwrap())
            .dimensionless_constant(&[])
            .unwrap_err();
        assert_eq!(
            err,
            UnitsError::NotDimensionless {
                dim: "a".to_string()
            }
        );
    }

    #[test]
    fn no_unit_only_converts_to_itself() {
        assert_eq!(Unit::NoUnit.ratio(&Unit::NoUnit).unwrap(), 1.0);
        let m = lookup("m").unwrap();
        assert_eq!(Unit::NoUnit.ratio(&m), Err(UnitsError::NotConvertible));
        assert_eq!(m.ratio(&Unit::NoUnit), Err(UnitsError::NotConvertible));
    }

    #[test]
    fn ratio_accepts_strings_and_units() {
        let kpc = lookup("kpc").unwrap();
        let pc = lookup("pc").unwrap();
        let close = |r: f64| (r - 1000.0).abs() / 1000.0 < 1e-12;
        assert!(close(kpc.ratio("pc").unwrap()));
        assert!(close(kpc.ratio(&pc).unwrap()));
        assert!(close(kpc.ratio(pc).unwrap()));
    }

    #[test]
    fn reciprocal_ratios_multiply_to_one() {
        let kev = lookup("keV").unwrap();
        let erg = lookup("erg").unwrap();
        let forward = kev.ratio(&erg).unwrap();
        let back = erg.ratio(&kev).unwrap();
        assert!((forward * back - 1.0).abs() < 1e-12);
    }

    #[test]
    fn equality_is_ratio_one() {
        let m = lookup("m").unwrap();
        let cm = lookup("cm").unwrap();
        assert_eq!(100.0 * &cm, m);
        assert_ne!(cm, m);
        assert_ne!(m, lookup("s").unwrap());
    }

    #[test]
    fn ordering_compares_magnitudes() {
        let m = lookup("m").unwrap();
        let km = lookup("km").unwrap();
        let cm = lookup("cm").unwrap();
        assert!(cm < m);
        assert!(km > m);
        assert!(cm <= m && m <= m);
    }

    #[test]
    fn incompatible_ordering_is_unordered_but_try_cmp_errors() {
        let m = lookup("m").unwrap();
        let s = lookup("s").unwrap();
        assert_eq!(m.partial_cmp(&s), None);
        assert!(!(m < s) && !(m > s));
        assert_eq!(m.try_cmp(&s), Err(UnitsError::NotConvertible));
    }

    #[test]
    fn ordering_with_substituted_parameters() {
        let m = lookup("m").unwrap();
        let km = lookup("km").unwrap();
        assert_eq!(m.try_cmp(&km).unwrap(), Ordering::Less);
        assert_eq!(km.try_cmp(&m).unwrap(), Ordering::Greater);
        assert_eq!(m.try_cmp(&m).unwrap(), Ordering::Equal);
    }
}
