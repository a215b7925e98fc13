//! On-wire form of a [`Literal`], per spec §6 "Literal on-wire form": used by
//! persistence and the picker cache, never by the solver itself.
//!
//! - Numeric intervals: a JSON array of `[low, high]` pairs plus a unit
//!   string in SI format.
//! - Enum sets: the enum type name plus an array of member names.
//! - Bool sets: one of `"true"`, `"false"`, `"any"`, `"none"`.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::literal::{BoolSet, EnumSet, Interval, Literal, QuantitySet};
use crate::units::Unit;

use super::error::InterchangeError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LiteralWire {
    Quantity {
        intervals: Vec<[f64; 2]>,
        unit: String,
    },
    Enum {
        domain: String,
        members: Vec<String>,
    },
    Bool(String),
}

impl Literal {
    /// Serialize to the on-wire form spec §6 describes. Units round-trip
    /// through [`Unit::from_symbol`]'s fixed symbol set — a unit produced by
    /// `mul`/`pow` (a compound display symbol) cannot be read back and this
    /// will still serialize it, but `LiteralWire::to_literal` will reject it.
    pub fn to_wire(&self) -> LiteralWire {
        match self {
            Literal::Quantity(q) => LiteralWire::Quantity {
                intervals: q.intervals().iter().map(|i| [i.min, i.max]).collect(),
                unit: q.unit.symbol.to_string(),
            },
            Literal::Enum(e) => LiteralWire::Enum {
                domain: e.domain.to_string(),
                members: e.members().map(SmolStr::to_string).collect(),
            },
            Literal::Bool(b) => LiteralWire::Bool(Literal::bool_wire_string(b).to_string()),
        }
    }

    fn bool_wire_string(b: &BoolSet) -> &'static str {
        match (b.has_true, b.has_false) {
            (true, true) => "any",
            (true, false) => "true",
            (false, true) => "false",
            (false, false) => "none",
        }
    }
}

impl LiteralWire {
    pub fn to_literal(&self) -> Result<Literal, InterchangeError> {
        match self {
            LiteralWire::Quantity { intervals, unit } => {
                let unit = Unit::from_symbol(unit)
                    .ok_or_else(|| InterchangeError::UnrecognizedUnit(unit.clone()))?;
                let set = QuantitySet::from_intervals(
                    unit,
                    intervals.iter().map(|[min, max]| Interval::new(*min, *max)),
                );
                Ok(Literal::Quantity(set))
            }
            LiteralWire::Enum { domain, members } => {
                if domain.is_empty() {
                    return Err(InterchangeError::MissingEnumDomain);
                }
                Ok(Literal::Enum(EnumSet::from_members(domain.clone(), members.clone())))
            }
            LiteralWire::Bool(s) => {
                let set = match s.as_str() {
                    "true" => BoolSet::single(true),
                    "false" => BoolSet::single(false),
                    "any" => BoolSet::both(),
                    "none" => BoolSet::empty(),
                    other => return Err(InterchangeError::InvalidBoolSet(other.to_string())),
                };
                Ok(Literal::Bool(set))
            }
        }
    }

    pub fn to_json(&self) -> Result<String, InterchangeError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, InterchangeError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_round_trips_through_json() {
        let lit = Literal::Quantity(QuantitySet::from_intervals(
            Unit::ohm(),
            [Interval::new(0.0, 5.0), Interval::new(10.0, 20.0)],
        ));
        let wire = lit.to_wire();
        let json = wire.to_json().unwrap();
        let back = LiteralWire::from_json(&json).unwrap();
        assert_eq!(back.to_literal().unwrap(), lit);
    }

    #[test]
    fn enum_round_trips() {
        let lit = Literal::Enum(EnumSet::from_members("Package", ["SOIC", "QFN"]));
        let wire = lit.to_wire();
        let back = wire.to_literal().unwrap();
        assert_eq!(back, lit);
    }

    #[test]
    fn bool_wire_strings_match_spec() {
        assert_eq!(Literal::Bool(BoolSet::both()).to_wire(), LiteralWire::Bool("any".into()));
        assert_eq!(Literal::Bool(BoolSet::empty()).to_wire(), LiteralWire::Bool("none".into()));
        assert_eq!(Literal::Bool(BoolSet::single(true)).to_wire(), LiteralWire::Bool("true".into()));
    }

    #[test]
    fn invalid_bool_wire_string_errors() {
        let wire = LiteralWire::Bool("maybe".into());
        assert!(matches!(wire.to_literal(), Err(InterchangeError::InvalidBoolSet(_))));
    }

    #[test]
    fn unrecognized_unit_errors() {
        let wire = LiteralWire::Quantity { intervals: vec![[0.0, 1.0]], unit: "furlong".into() };
        assert!(matches!(wire.to_literal(), Err(InterchangeError::UnrecognizedUnit(_))));
    }
}
