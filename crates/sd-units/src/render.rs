//! Human-readable and LaTeX rendering.

use std::fmt;

use sd_rational::Exponent;

use crate::unit::{CompositeUnit, Unit};

impl fmt::Display for Unit {
    /// Scale (when not 1) in scientific notation, then each base name with
    /// a `**power` suffix, omitted for power 1. The output re-parses under
    /// the string grammar; the scale uses shortest round-trip notation so
    /// nothing is lost on the way back in.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::NoUnit => Ok(()),
            Unit::Irreducible(u) => write!(f, "{}", u.name()),
            Unit::Named(u) => write!(f, "{}", u.name()),
            Unit::Composite(c) => write_composite(f, c),
        }
    }
}

fn write_composite(f: &mut fmt::Formatter<'_>, c: &CompositeUnit) -> fmt::Result {
    if c.bases().is_empty() {
        return write!(f, "{:e}", c.scale());
    }

    let mut first = true;
    if c.scale() != 1.0 {
        write!(f, "{:e}", c.scale())?;
        first = false;
    }
    for (base, power) in c.bases().iter().zip(c.powers()) {
        if !first {
            write!(f, " ")?;
        }
        first = false;
        write!(f, "{}", base)?;
        if *power != Exponent::one() {
            write!(f, "**{}", power)?;
        }
    }
    Ok(())
}

impl Unit {
    /// LaTeX rendering: `\mathrm{...}` names (or a unit's custom label),
    /// `\times 10^{...}` scales with a two-decimal mantissa, `^{...}`
    /// power superscripts, `\,` separators.
    pub fn latex(&self) -> String {
        match self {
            Unit::NoUnit => String::new(),
            Unit::Irreducible(u) => format!(r"\mathrm{{{}}}", u.name()),
            Unit::Named(u) => match u.latex_label() {
                Some(label) => label.to_string(),
                None => format!(r"\mathrm{{{}}}", u.name()),
            },
            Unit::Composite(c) => composite_latex(c),
        }
    }
}

fn composite_latex(c: &CompositeUnit) -> String {
    let mut out = if c.scale() != 1.0 {
        scale_latex(c.scale())
    } else {
        String::new()
    };

    for (base, power) in c.bases().iter().zip(c.powers()) {
        if out.is_empty() {
            out = base.latex();
        } else {
            out.push_str(r"\,");
            out.push_str(&base.latex());
        }
        if *power != Exponent::one() {
            out.push_str(&format!("^{{{}}}", power));
        }
    }
    out
}

/// `1.99e30` becomes `1.99\times 10^{30}`; an exponent of zero leaves just
/// the mantissa.
fn scale_latex(scale: f64) -> String {
    let formatted = format!("{:.2e}", scale);
    let (mantissa, exp) = formatted.split_once('e').unwrap_or((&formatted, "0"));
    if exp == "0" {
        mantissa.to_string()
    } else {
        format!(r"{}\times 10^{{{}}}", mantissa, exp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::lookup;

    #[test]
    fn names_render_bare() {
        assert_eq!(lookup("kpc").unwrap().to_string(), "kpc");
        assert_eq!(lookup("m").unwrap().to_string(), "m");
    }

    #[test]
    fn powers_render_with_double_star() {
        let u = Unit::parse("Msol kpc**-3").unwrap().simplified();
        assert_eq!(u.to_string(), "Msol kpc**-3");
    }

    #[test]
    fn unit_power_suffix_is_omitted() {
        let u = Unit::parse("26.2 m s**-1").unwrap();
        assert_eq!(u.to_string(), "2.62e1 m s**-1");
    }

    #[test]
    fn fractional_powers_render_as_fractions() {
        let m = lookup("m").unwrap();
        assert_eq!(m.pow((-2, 3)).to_string(), "m**-2/3");
    }

    #[test]
    fn bare_scale_renders_in_scientific_notation() {
        let u = Unit::parse("1e30").unwrap();
        assert_eq!(u.to_string(), "1e30");
    }

    #[test]
    fn no_unit_renders_empty() {
        assert_eq!(Unit::NoUnit.to_string(), "");
        assert_eq!(Unit::NoUnit.latex(), "");
    }

    #[test]
    fn display_round_trips_through_the_parser() {
        for text in [
            "kpc",
            "Msol kpc**-3",
            "2.1e12 m_p cm**-2/3",
            "1.98892e30 kg",
            "m**3 kg**-1 s**-2",
        ] {
            let original = Unit::parse(text).unwrap();
            let reparsed = Unit::parse(&original.to_string()).unwrap();
            let r = reparsed.ratio(&original).unwrap();
            assert!((r - 1.0).abs() < 1e-12, "round trip failed for '{text}'");
        }
    }

    #[test]
    fn latex_names_and_custom_labels() {
        assert_eq!(lookup("m").unwrap().latex(), r"\mathrm{m}");
        assert_eq!(lookup("kpc").unwrap().latex(), r"\mathrm{kpc}");
        assert_eq!(lookup("Msol").unwrap().latex(), r"M_{\odot}");
    }

    #[test]
    fn latex_composite_with_scale_and_powers() {
        let u = Unit::parse("1.99e30 kg m**2").unwrap();
        assert_eq!(
            u.latex(),
            r"1.99\times 10^{30}\,\mathrm{kg}\,\mathrm{m}^{2}"
        );
    }

    #[test]
    fn latex_scale_without_exponent_keeps_mantissa_only() {
        let u = Unit::parse("5 m").unwrap();
        assert_eq!(u.latex(), r"5.00\,\mathrm{m}");
    }
}
