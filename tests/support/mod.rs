//! Shared helpers for the per-scenario end-to-end tests (spec §8), pulled in
//! via `#[path = "support/mod.rs"] mod support;` the same way the teacher's
//! `tests/helpers/mod.rs` is shared across its own split test binaries.
#![allow(dead_code)]

use faebryk_core::literal::{Interval, Literal, QuantitySet};
use faebryk_core::units::Unit;
use faebryk_core::Solver;

pub fn tolerance(center: f64, pct: f64) -> Interval {
    let delta = center * pct;
    Interval::new(center - delta, center + delta)
}

pub fn run_to_fixpoint(solver: &mut Solver) {
    loop {
        let outcome = solver.simplify().unwrap();
        if outcome.is_fixpoint() {
            return;
        }
    }
}

pub fn as_quantity(literal: Literal) -> QuantitySet {
    match literal {
        Literal::Quantity(q) => q,
        other => panic!("expected a quantity literal, got {other:?}"),
    }
}

pub fn literal_exponent(value: f64) -> Literal {
    Literal::Quantity(QuantitySet::point(Unit::dimensionless(), value))
}
