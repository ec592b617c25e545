//! Walk through the unit-algebra surface: parsing, conversion with free
//! parameters, and dimensional projection.

use sd_units::{Unit, UnitsError, lookup};

fn main() -> Result<(), UnitsError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // String construction and conversion
    let rho = Unit::parse("Msol kpc**-3")?;
    println!("{} = {} m_p cm**-3", rho, rho.ratio("m_p cm**-3")?);

    // Comoving lengths carry the scale factor until a value is supplied
    let comoving = Unit::parse("kpc a")?;
    println!(
        "{} at a=0.5 = {} kpc",
        comoving,
        comoving.ratio_with("kpc", &[("a", 0.5)])?
    );

    // Programmatic construction
    let kpc = lookup("kpc")?;
    let gyr = lookup("Gyr")?;
    let velocity = &kpc / &gyr;
    println!("{} = {} km s**-1", velocity, velocity.ratio("km s**-1")?);

    // Dimensional projection onto an SI basis
    let grav = Unit::parse("m**3 kg**-1 s**-2")?;
    let coeffs = grav.dimensional_project(&["m", "kg", "s"])?;
    let rendered: Vec<String> = coeffs.iter().map(|c| c.to_string()).collect();
    println!("{} over [m, kg, s]: [{}]", grav, rendered.join(", "));

    Ok(())
}
