//! Dimensional projection onto a caller-supplied basis.

use nalgebra::{DMatrix, DVector};
use sd_rational::{Exponent, MatrixError, invert};
use tracing::debug;

use crate::error::{UnitsError, UnitsResult};
use crate::parse::ToUnit;
use crate::unit::{CompositeUnit, Unit};

impl Unit {
    /// Express this unit's dimensions as a linear combination of `basis`
    /// units, returning one rational coefficient per basis entry.
    ///
    /// With the irreducible dimensions of this unit and the basis as axes,
    /// the basis spans a matrix M such that `v = M·d`, where `v` is this
    /// unit's power vector and `d` the sought coefficients. M is possibly
    /// rectangular, so we take the least-squares solution
    /// `d = (MᵗM)⁻¹ Mᵗv` — in exact rational arithmetic, which keeps
    /// "singular" and "does not satisfy the original system" exact
    /// questions rather than tolerance calls.
    ///
    /// Fails with [`DependentBasis`](UnitsError::DependentBasis) when the
    /// basis vectors are linearly dependent (MᵗM singular), and with
    /// [`NonSpanningBasis`](UnitsError::NonSpanningBasis) when the
    /// recovered `d` does not solve `v = M·d` (the multiplication by Mᵗ
    /// lost information, so the basis cannot express this unit).
    pub fn dimensional_project<T: ToUnit>(&self, basis: &[T]) -> UnitsResult<Vec<Exponent>> {
        let basis_irreps = basis
            .iter()
            .map(|b| Ok(b.to_unit()?.irrep_parts()))
            .collect::<UnitsResult<Vec<CompositeUnit>>>()?;
        let me = self.irrep_parts();

        // Union of every irreducible dimension involved, in first-seen order.
        let mut dims: Vec<String> = Vec::new();
        collect_dims(&me, &mut dims);
        for vec in &basis_irreps {
            collect_dims(vec, &mut dims);
        }

        let n = dims.len();
        let k = basis_irreps.len();
        let matrix = DMatrix::from_fn(n, k, |i, j| basis_irreps[j].power_of(&dims[i]).as_ratio());
        let powers = DVector::from_fn(n, |i, _| me.power_of(&dims[i]).as_ratio());

        let transposed = matrix.transpose();
        let normal = &transposed * &matrix;
        let inverse = invert(&normal).map_err(|err| match err {
            MatrixError::Singular | MatrixError::NotSquare { .. } => UnitsError::DependentBasis,
        })?;
        let candidate = inverse * (&transposed * &powers);

        if &matrix * &candidate != powers {
            return Err(UnitsError::NonSpanningBasis);
        }

        debug!(dimensions = n, basis = k, "dimensional projection solved");
        Ok(candidate.iter().map(|r| Exponent::from(*r)).collect())
    }

    /// Irreducible expansion as raw composite parts; the dimensionless
    /// sentinel becomes the empty composite.
    pub(crate) fn irrep_parts(&self) -> CompositeUnit {
        match self.irrep() {
            Unit::Composite(c) => c,
            _ => CompositeUnit::new(1.0, Vec::new(), Vec::new()),
        }
    }
}

fn collect_dims(c: &CompositeUnit, dims: &mut Vec<String>) {
    for base in c.bases() {
        if let Some(name) = base.name() {
            if !dims.iter().any(|d| d == name) {
                dims.push(name.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::lookup;

    fn ints(coeffs: &[i64]) -> Vec<Exponent> {
        coeffs.iter().map(|&c| Exponent::from(c)).collect()
    }

    #[test]
    fn projects_onto_its_own_dimensions() {
        let u = Unit::parse("m**3 kg**-1 s**-2").unwrap();
        let coeffs = u.dimensional_project(&["m", "kg", "s"]).unwrap();
        assert_eq!(coeffs, ints(&[3, -1, -2]));
    }

    #[test]
    fn projects_onto_derived_units() {
        // J = kg m^2 s^-2, so  m^2 s^-2 = J / kg
        let u = Unit::parse("m**2 s**-2").unwrap();
        let coeffs = u.dimensional_project(&["J", "kg"]).unwrap();
        assert_eq!(coeffs, ints(&[1, -1]));
    }

    #[test]
    fn rational_coefficients_come_out_exact() {
        let u = Unit::parse("m").unwrap();
        let coeffs = u.dimensional_project(&["m**2"]).unwrap();
        assert_eq!(coeffs, vec![Exponent::new(1, 2)]);
    }

    #[test]
    fn non_spanning_basis_is_rejected() {
        let u = Unit::parse("m").unwrap();
        assert_eq!(
            u.dimensional_project(&["kg", "s"]),
            Err(UnitsError::NonSpanningBasis)
        );
    }

    #[test]
    fn dependent_basis_is_rejected() {
        let u = Unit::parse("m").unwrap();
        assert_eq!(
            u.dimensional_project(&["m", "km"]),
            Err(UnitsError::DependentBasis)
        );
    }

    #[test]
    fn mixed_unit_and_string_basis() {
        let u = Unit::parse("kpc s**-1").unwrap();
        let kpc = lookup("kpc").unwrap();
        let coeffs = u.dimensional_project(&[kpc, lookup("s").unwrap()]).unwrap();
        assert_eq!(coeffs, ints(&[1, -1]));
    }

    #[test]
    fn projection_reconstructs_the_unit() {
        let u = Unit::parse("Msol kpc**-3").unwrap();
        let basis = ["kg", "m"];
        let coeffs = u.dimensional_project(&basis).unwrap();

        let mut rebuilt = Unit::parse("").unwrap();
        for (name, coeff) in basis.iter().zip(&coeffs) {
            rebuilt = &rebuilt * &lookup(name).unwrap().pow(*coeff);
        }
        // dimensionally equal: the ratio is a pure number
        assert!((&u / &rebuilt).is_dimensionless());
    }

    #[test]
    fn dimensionless_unit_projects_to_zeros() {
        let u = Unit::parse("").unwrap();
        let coeffs = u.dimensional_project(&["m", "s"]).unwrap();
        assert_eq!(coeffs, ints(&[0, 0]));
    }
}
