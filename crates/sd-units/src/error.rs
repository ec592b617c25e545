use thiserror::Error;

pub type UnitsResult<T> = Result<T, UnitsError>;

/// Everything that can go wrong in unit algebra.
///
/// All failures are synchronous and caller-recoverable; no operation
/// returns a partial result alongside an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitsError {
    /// Registering a name that is already taken.
    #[error("unit name '{name}' is already registered")]
    DuplicateName { name: String },

    /// Registering a name containing parser-reserved tokens.
    #[error("invalid unit name '{name}': names cannot contain whitespace, '**' or '^'")]
    InvalidName { name: String },

    /// Parsing referenced a name missing from the registry.
    #[error("unknown unit '{name}'")]
    UnknownUnit { name: String },

    /// A power suffix was not an integer or `n/d` rational literal.
    #[error("invalid exponent '{text}' in unit string")]
    InvalidExponent { text: String },

    /// `ratio` or an ordering comparison between incompatible dimensions.
    #[error("not convertible")]
    NotConvertible,

    /// A dimension survived `irrep()` with no substitution to eliminate it.
    #[error("not dimensionless: unresolved dimension '{dim}'")]
    NotDimensionless { dim: String },

    /// Projection basis vectors are linearly dependent.
    #[error("basis units are not linearly independent")]
    DependentBasis,

    /// Projection basis does not span the unit's dimensions.
    #[error("basis units do not span the dimensions of this unit")]
    NonSpanningBasis,
}
