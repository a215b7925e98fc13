use smol_str::SmolStr;

use crate::units::Unit;

/// The value space a [`super::Parameter`] ranges over (spec §3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Domain {
    /// A quantity in the given unit.
    Numbers(Unit),
    /// A member of the named enum type; the member universe itself lives on
    /// the enum's `TypeNode` in the type graph, not here.
    Enum(SmolStr),
    Boolean,
}

impl Domain {
    pub fn is_compatible(&self, other: &Domain) -> bool {
        match (self, other) {
            (Domain::Numbers(a), Domain::Numbers(b)) => a.is_compatible(b),
            (Domain::Enum(a), Domain::Enum(b)) => a == b,
            (Domain::Boolean, Domain::Boolean) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Domain::Numbers(unit) if unit.dimension.is_dimensionless() => write!(f, "number"),
            Domain::Numbers(unit) => write!(f, "number[{unit}]"),
            Domain::Enum(name) => write!(f, "enum {name}"),
            Domain::Boolean => write!(f, "bool"),
        }
    }
}
