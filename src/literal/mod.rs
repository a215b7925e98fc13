//! Literal values a parameter can be bound or narrowed to (spec §3): disjoint
//! quantity intervals, enum subsets, and boolean subsets, unified under one
//! [`Literal`] so expressions and the solver can stay generic over which kind
//! they're folding.

mod bool_set;
mod enum_set;
mod interval;
mod quantity;

pub use bool_set::BoolSet;
pub use enum_set::EnumSet;
pub use interval::Interval;
pub use quantity::QuantitySet;

use crate::core::CoreError;

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Quantity(QuantitySet),
    Enum(EnumSet),
    Bool(BoolSet),
}

impl Literal {
    pub fn is_empty(&self) -> bool {
        match self {
            Literal::Quantity(q) => q.is_empty(),
            Literal::Enum(e) => e.is_empty(),
            Literal::Bool(b) => b.is_empty(),
        }
    }

    pub fn union(&self, other: &Literal) -> Result<Literal, CoreError> {
        match (self, other) {
            (Literal::Quantity(a), Literal::Quantity(b)) => Ok(Literal::Quantity(a.union(b)?)),
            (Literal::Enum(a), Literal::Enum(b)) => Ok(Literal::Enum(a.union(b)?)),
            (Literal::Bool(a), Literal::Bool(b)) => Ok(Literal::Bool(a.union(b))),
            _ => Err(mismatched_kinds(self, other)),
        }
    }

    pub fn intersect(&self, other: &Literal) -> Result<Literal, CoreError> {
        match (self, other) {
            (Literal::Quantity(a), Literal::Quantity(b)) => Ok(Literal::Quantity(a.intersect(b)?)),
            (Literal::Enum(a), Literal::Enum(b)) => Ok(Literal::Enum(a.intersect(b)?)),
            (Literal::Bool(a), Literal::Bool(b)) => Ok(Literal::Bool(a.intersect(b))),
            _ => Err(mismatched_kinds(self, other)),
        }
    }

    pub fn is_subset_of(&self, other: &Literal) -> Result<bool, CoreError> {
        match (self, other) {
            (Literal::Quantity(a), Literal::Quantity(b)) => a.is_subset_of(b),
            (Literal::Enum(a), Literal::Enum(b)) => a.is_subset_of(b),
            (Literal::Bool(a), Literal::Bool(b)) => Ok(a.is_subset_of(b)),
            _ => Err(mismatched_kinds(self, other)),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Literal::Quantity(_) => "quantity",
            Literal::Enum(_) => "enum",
            Literal::Bool(_) => "bool",
        }
    }

    /// The [`crate::param::Domain`] a parameter bound to this literal would
    /// carry. Used by expression creation to type-check bare literal
    /// operands against node operands (spec §4.3).
    pub fn domain(&self) -> crate::param::Domain {
        match self {
            Literal::Quantity(q) => crate::param::Domain::Numbers(q.unit.clone()),
            Literal::Enum(e) => crate::param::Domain::Enum(e.domain.clone()),
            Literal::Bool(_) => crate::param::Domain::Boolean,
        }
    }

    /// The integer value of this literal, when it's a single-point
    /// `Quantity` whose value has no fractional part. Used wherever an
    /// expression operand needs to be read as a plain exponent or count
    /// rather than folded as a quantity (e.g. `Power`'s domain inference and
    /// its `expression_wise` folding).
    pub fn as_int_scalar(&self) -> Option<i32> {
        match self {
            Literal::Quantity(q) if q.intervals().len() == 1 && q.intervals()[0].min == q.intervals()[0].max => {
                let v = q.intervals()[0].min;
                (v.fract() == 0.0).then_some(v as i32)
            }
            _ => None,
        }
    }

    pub fn is_singleton(&self) -> bool {
        match self {
            Literal::Quantity(q) => {
                q.intervals().len() == 1 && q.intervals()[0].min == q.intervals()[0].max
            }
            Literal::Enum(e) => e.members().count() == 1,
            Literal::Bool(b) => b.is_single().is_some(),
        }
    }
}

fn mismatched_kinds(a: &Literal, b: &Literal) -> CoreError {
    CoreError::unit(format!(
        "cannot combine {} literal with {} literal",
        a.kind_name(),
        b.kind_name()
    ))
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Quantity(q) => write!(f, "{q}"),
            Literal::Enum(e) => write!(f, "{e}"),
            Literal::Bool(b) => write!(f, "{b}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Unit;

    #[test]
    fn mismatched_kind_union_errors() {
        let q = Literal::Quantity(QuantitySet::point(Unit::ohm(), 1.0));
        let b = Literal::Bool(BoolSet::single(true));
        assert!(q.union(&b).is_err());
    }

    #[test]
    fn same_kind_union_succeeds() {
        let a = Literal::Bool(BoolSet::single(true));
        let b = Literal::Bool(BoolSet::single(false));
        let union = a.union(&b).unwrap();
        assert_eq!(union, Literal::Bool(BoolSet::both()));
    }
}
