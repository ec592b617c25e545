//! Serde support: units travel as their grammar strings.
//!
//! Deserialization goes through the parser, so only units whose names are
//! registered in the receiving process round-trip.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::unit::Unit;

impl Serialize for Unit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Unit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Unit::parse(&text).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use crate::unit::Unit;

    #[test]
    fn unit_round_trips_as_a_string() {
        let u = Unit::parse("2.1e12 m_p cm**-2/3").unwrap();
        let json = serde_json::to_string(&u).unwrap();
        assert_eq!(json, "\"2.1e12 m_p cm**-2/3\"");
        let back: Unit = serde_json::from_str(&json).unwrap();
        assert!((back.ratio(&u).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_units_fail_to_deserialize() {
        let result: Result<Unit, _> = serde_json::from_str("\"florbs\"");
        assert!(result.is_err());
    }
}
