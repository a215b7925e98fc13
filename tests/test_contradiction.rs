//! Scenario 3 (spec §8): contradiction. `A ⊆ [0,5], A ⊆ [10,20]` raises a
//! literal contradiction involving `A` with both literals.

#[path = "support/mod.rs"]
mod support;

use faebryk_core::core::SolverConfig;
use faebryk_core::expr::{create_predicate, ExprKind, Operand};
use faebryk_core::literal::{Interval, Literal, QuantitySet};
use faebryk_core::param::{Domain, Parameter};
use faebryk_core::units::Unit;
use faebryk_core::{InstanceGraph, Solver};

#[test]
fn disjoint_subset_bounds_raise_contradiction() {
    let mut ig = InstanceGraph::new();
    let a = ig.add_param(Parameter::new(
        Domain::Numbers(Unit::ohm()),
        Literal::Quantity(QuantitySet::single(Unit::ohm(), Interval::new(f64::NEG_INFINITY, f64::INFINITY))),
    ));
    let graph = ig.graph_mut();
    create_predicate(graph, ExprKind::IsSubset, Operand::Node(a), Operand::Literal(Literal::Quantity(QuantitySet::single(Unit::ohm(), Interval::new(0.0, 5.0)))), true).unwrap();
    create_predicate(graph, ExprKind::IsSubset, Operand::Node(a), Operand::Literal(Literal::Quantity(QuantitySet::single(Unit::ohm(), Interval::new(10.0, 20.0)))), true).unwrap();

    let mut solver = Solver::new(ig, SolverConfig::default());
    let err = loop {
        match solver.simplify() {
            Ok(outcome) if outcome.is_fixpoint() => panic!("expected a contradiction, reached fixpoint instead"),
            Ok(_) => continue,
            Err(err) => break err,
        }
    };
    match err {
        faebryk_core::core::SolveError::ContradictionByLiteral(info) => {
            assert!(info.involved.contains(&a));
            assert_eq!(info.literals.len(), 2);
        }
        other => panic!("expected ContradictionByLiteral, got {other:?}"),
    }
}
