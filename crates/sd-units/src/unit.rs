//! Unit variants, operators, and the expand/gather simplifier.

use std::ops::{Div, Mul};
use std::sync::Arc;

use sd_rational::Exponent;

use crate::error::UnitsResult;
use crate::registry;

/// A named atomic dimension: length, time, mass, or a substitutable free
/// parameter such as the cosmological scale factor.
///
/// Identity is the name; the registry guarantees there is at most one
/// irreducible unit per name.
#[derive(Debug)]
pub struct IrreducibleUnit {
    name: String,
}

impl IrreducibleUnit {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A unit with its own display name, defined in terms of other units
/// (`kpc` = 1000 pc, `N` = kg m s^-2, ...).
#[derive(Debug)]
pub struct NamedUnit {
    name: String,
    latex: Option<String>,
    represents: Unit,
}

impl NamedUnit {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The definition this name stands for; shared, never mutated.
    pub fn represents(&self) -> &Unit {
        &self.represents
    }

    pub(crate) fn latex_label(&self) -> Option<&str> {
        self.latex.as_deref()
    }
}

/// A numeric scale times a product of base units raised to rational powers.
///
/// After [`Unit::simplify`] each base appears once, no power is zero, and
/// entries are sorted by descending power (ties keep insertion order).
/// Before simplification nothing is guaranteed: operators nest composites
/// lazily.
#[derive(Debug, Clone)]
pub struct CompositeUnit {
    scale: f64,
    bases: Vec<Unit>,
    powers: Vec<Exponent>,
}

impl CompositeUnit {
    pub fn new(scale: f64, bases: Vec<Unit>, powers: Vec<Exponent>) -> Self {
        debug_assert_eq!(bases.len(), powers.len());
        Self {
            scale,
            bases,
            powers,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn bases(&self) -> &[Unit] {
        &self.bases
    }

    pub fn powers(&self) -> &[Exponent] {
        &self.powers
    }

    /// Exponent of the base registered under `name`; zero if absent.
    pub fn power_of(&self, name: &str) -> Exponent {
        for (base, power) in self.bases.iter().zip(&self.powers) {
            if base.name() == Some(name) {
                return *power;
            }
        }
        Exponent::zero()
    }

    /// Flatten until no base is itself a composite. Each inlined composite
    /// contributes its scale (raised to the entry's power) to ours and its
    /// sub-bases with multiplied-through powers. With `to_irrep` set, named
    /// bases are first replaced by their irreducible expansion.
    ///
    /// Inlined sub-bases are appended and revisited, so arbitrarily nested
    /// composites flatten in one call.
    fn expand(&mut self, to_irrep: bool) {
        let mut i = 0;
        while i < self.bases.len() {
            if to_irrep {
                let replacement = match &self.bases[i] {
                    Unit::Named(n) => Some(n.represents().irrep()),
                    _ => None,
                };
                if let Some(unit) = replacement {
                    self.bases[i] = unit;
                }
            }

            if matches!(self.bases[i], Unit::Composite(_)) {
                let power = self.powers.remove(i);
                if let Unit::Composite(sub) = self.bases.remove(i) {
                    self.scale *= sub.scale.powf(power.to_f64());
                    for (base, sub_power) in sub.bases.into_iter().zip(sub.powers) {
                        self.bases.push(base);
                        self.powers.push(sub_power * power);
                    }
                }
            } else if matches!(self.bases[i], Unit::NoUnit) {
                // a named unit may resolve to the dimensionless sentinel
                self.bases.remove(i);
                self.powers.remove(i);
            } else {
                i += 1;
            }
        }
    }

    /// Merge duplicate bases (keyed by name), drop zero powers, sort by
    /// descending power.
    fn gather(&mut self) {
        let mut merged: Vec<(Unit, Exponent)> = Vec::new();
        for (base, power) in self.bases.drain(..).zip(self.powers.drain(..)) {
            let slot = match base.name() {
                Some(name) => merged.iter().position(|(b, _)| b.name() == Some(name)),
                None => None,
            };
            match slot {
                Some(idx) => merged[idx].1 += power,
                None => merged.push((base, power)),
            }
        }
        merged.retain(|(_, power)| !power.is_zero());
        merged.sort_by(|a, b| b.1.cmp(&a.1));
        for (base, power) in merged {
            self.bases.push(base);
            self.powers.push(power);
        }
    }
}

/// A physical unit.
///
/// A closed family of four variants; operators dispatch on the variant tag.
/// Values are immutable once canonicalized, except that [`Unit::simplify`]
/// rewrites a composite's own lists in place. Named and irreducible units
/// are shared through `Arc`, so clones are cheap and a named unit's
/// definition is never duplicated.
#[derive(Debug, Clone)]
pub enum Unit {
    /// Dimensionless sentinel; absorbs multiply, divide, and power.
    NoUnit,
    Irreducible(Arc<IrreducibleUnit>),
    Named(Arc<NamedUnit>),
    Composite(CompositeUnit),
}

impl Unit {
    pub(crate) fn raw_irreducible(name: &str) -> Unit {
        Unit::Irreducible(Arc::new(IrreducibleUnit {
            name: name.to_string(),
        }))
    }

    pub(crate) fn raw_named(name: &str, latex: Option<&str>, represents: Unit) -> Unit {
        Unit::Named(Arc::new(NamedUnit {
            name: name.to_string(),
            latex: latex.map(str::to_string),
            represents,
        }))
    }

    /// Define a completely new atomic dimension and register it.
    ///
    /// Fails with [`DuplicateName`](crate::UnitsError::DuplicateName) if the
    /// name is taken, [`InvalidName`](crate::UnitsError::InvalidName) if it
    /// contains parser-reserved tokens.
    pub fn irreducible(name: &str) -> UnitsResult<Unit> {
        let unit = Unit::raw_irreducible(name);
        registry::register(name, unit.clone())?;
        Ok(unit)
    }

    /// Define and register a named unit in terms of existing units.
    pub fn named(name: &str, represents: Unit) -> UnitsResult<Unit> {
        let unit = Unit::raw_named(name, None, represents);
        registry::register(name, unit.clone())?;
        Ok(unit)
    }

    /// [`Unit::named`] with a custom LaTeX label, e.g. `M_{\odot}`.
    pub fn named_with_latex(name: &str, latex: &str, represents: Unit) -> UnitsResult<Unit> {
        let unit = Unit::raw_named(name, Some(latex), represents);
        registry::register(name, unit.clone())?;
        Ok(unit)
    }

    /// Registered display name, if this is a named or irreducible unit.
    pub fn name(&self) -> Option<&str> {
        match self {
            Unit::Irreducible(u) => Some(u.name()),
            Unit::Named(u) => Some(u.name()),
            _ => None,
        }
    }

    pub fn is_no_unit(&self) -> bool {
        matches!(self, Unit::NoUnit)
    }

    /// Raise to an integer, `(numer, denom)`, or [`Exponent`] power.
    pub fn pow<E: Into<Exponent>>(&self, power: E) -> Unit {
        if self.is_no_unit() {
            return Unit::NoUnit;
        }
        Unit::Composite(CompositeUnit::new(
            1.0,
            vec![self.clone()],
            vec![power.into()],
        ))
        .simplified()
    }

    /// Canonicalize a composite in place: flatten nested composites, merge
    /// duplicate bases, drop zero powers, sort by descending power.
    /// A no-op on the other variants.
    pub fn simplify(&mut self) {
        if let Unit::Composite(c) = self {
            c.expand(false);
            c.gather();
        }
    }

    /// Owned form of [`Unit::simplify`], for chaining.
    pub fn simplified(mut self) -> Unit {
        self.simplify();
        self
    }

    /// An equivalent unit expressed purely in irreducible units.
    ///
    /// Always works on a copy; the receiver is never mutated, so callers
    /// holding references to `self` see no side effects.
    pub fn irrep(&self) -> Unit {
        match self {
            Unit::NoUnit => Unit::NoUnit,
            Unit::Irreducible(_) => Unit::Composite(CompositeUnit::new(
                1.0,
                vec![self.clone()],
                vec![Exponent::one()],
            )),
            Unit::Named(n) => n.represents().irrep(),
            Unit::Composite(c) => {
                let mut copy = c.clone();
                copy.expand(true);
                copy.gather();
                Unit::Composite(copy)
            }
        }
    }

    /// True iff nothing survives irreducible expansion.
    pub fn is_dimensionless(&self) -> bool {
        match self.irrep() {
            Unit::NoUnit => true,
            Unit::Composite(c) => c.bases().is_empty(),
            _ => false,
        }
    }

    fn mul_unit(&self, other: &Unit) -> Unit {
        if self.is_no_unit() || other.is_no_unit() {
            return Unit::NoUnit;
        }
        Unit::Composite(CompositeUnit::new(
            1.0,
            vec![self.clone(), other.clone()],
            vec![Exponent::one(), Exponent::one()],
        ))
        .simplified()
    }

    fn div_unit(&self, other: &Unit) -> Unit {
        if self.is_no_unit() || other.is_no_unit() {
            return Unit::NoUnit;
        }
        Unit::Composite(CompositeUnit::new(
            1.0,
            vec![self.clone(), other.clone()],
            vec![Exponent::one(), Exponent::from(-1)],
        ))
        .simplified()
    }

    fn scale_mul(&self, factor: f64) -> Unit {
        if self.is_no_unit() {
            return Unit::NoUnit;
        }
        Unit::Composite(CompositeUnit::new(
            factor,
            vec![self.clone()],
            vec![Exponent::one()],
        ))
        .simplified()
    }

    fn scale_recip(&self, numerator: f64) -> Unit {
        if self.is_no_unit() {
            return Unit::NoUnit;
        }
        Unit::Composite(CompositeUnit::new(
            numerator,
            vec![self.clone()],
            vec![Exponent::from(-1)],
        ))
        .simplified()
    }
}

impl Mul for &Unit {
    type Output = Unit;

    fn mul(self, rhs: &Unit) -> Unit {
        self.mul_unit(rhs)
    }
}

impl Mul for Unit {
    type Output = Unit;

    fn mul(self, rhs: Unit) -> Unit {
        self.mul_unit(&rhs)
    }
}

impl Div for &Unit {
    type Output = Unit;

    fn div(self, rhs: &Unit) -> Unit {
        self.div_unit(rhs)
    }
}

impl Div for Unit {
    type Output = Unit;

    fn div(self, rhs: Unit) -> Unit {
        self.div_unit(&rhs)
    }
}

impl Mul<f64> for &Unit {
    type Output = Unit;

    fn mul(self, factor: f64) -> Unit {
        self.scale_mul(factor)
    }
}

impl Mul<f64> for Unit {
    type Output = Unit;

    fn mul(self, factor: f64) -> Unit {
        self.scale_mul(factor)
    }
}

impl Mul<&Unit> for f64 {
    type Output = Unit;

    fn mul(self, unit: &Unit) -> Unit {
        unit.scale_mul(self)
    }
}

impl Mul<Unit> for f64 {
    type Output = Unit;

    fn mul(self, unit: Unit) -> Unit {
        unit.scale_mul(self)
    }
}

impl Div<f64> for &Unit {
    type Output = Unit;

    fn div(self, divisor: f64) -> Unit {
        self.scale_mul(1.0 / divisor)
    }
}

impl Div<f64> for Unit {
    type Output = Unit;

    fn div(self, divisor: f64) -> Unit {
        self.scale_mul(1.0 / divisor)
    }
}

impl Div<&Unit> for f64 {
    type Output = Unit;

    fn div(self, unit: &Unit) -> Unit {
        unit.scale_recip(self)
    }
}

impl Div<Unit> for f64 {
    type Output = Unit;

    fn div(self, unit: Unit) -> Unit {
        unit.scale_recip(self)
    }
}
