//! Scenario 5 (spec §8): associative fold. `((a + 1) + 2) + (b + 3) + a`
//! flattens and collects like terms into one `Add` with a's coefficient,
//! `b`, and the folded literal `6`.

#[path = "support/mod.rs"]
mod support;

use faebryk_core::core::SolverConfig;
use faebryk_core::expr::{create_expression, ExprKind, Operand};
use faebryk_core::literal::{Interval, Literal, QuantitySet};
use faebryk_core::param::{Domain, Parameter};
use faebryk_core::units::Unit;
use faebryk_core::{InstanceGraph, Solver};

use support::run_to_fixpoint;

#[test]
fn nested_additions_flatten_and_collect_like_terms() {
    let mut ig = InstanceGraph::new();
    let full_range = || Literal::Quantity(QuantitySet::single(Unit::dimensionless(), Interval::new(f64::NEG_INFINITY, f64::INFINITY)));
    let a = ig.add_param(Parameter::new(Domain::Numbers(Unit::dimensionless()), full_range()));
    let b = ig.add_param(Parameter::new(Domain::Numbers(Unit::dimensionless()), full_range()));

    let graph = ig.graph_mut();
    let one = Operand::Literal(Literal::Quantity(QuantitySet::point(Unit::dimensionless(), 1.0)));
    let two = Operand::Literal(Literal::Quantity(QuantitySet::point(Unit::dimensionless(), 2.0)));
    let three = Operand::Literal(Literal::Quantity(QuantitySet::point(Unit::dimensionless(), 3.0)));

    let a_plus_1 = create_expression(graph, ExprKind::Add, vec![Operand::Node(a), one], false).unwrap();
    let inner_left = create_expression(graph, ExprKind::Add, vec![Operand::Node(a_plus_1), two], false).unwrap();
    let b_plus_3 = create_expression(graph, ExprKind::Add, vec![Operand::Node(b), three], false).unwrap();
    let outer = create_expression(
        graph,
        ExprKind::Add,
        vec![Operand::Node(inner_left), Operand::Node(b_plus_3), Operand::Node(a)],
        true,
    )
    .unwrap();

    let mut solver = Solver::new(ig, SolverConfig::default());
    run_to_fixpoint(&mut solver);

    assert!(!solver.instance().graph().contains(outer), "original nested Add should be rewritten away");
    let surviving: Vec<_> = solver
        .instance()
        .graph()
        .node_ids()
        .filter(|&id| {
            solver
                .instance()
                .graph()
                .get(id)
                .and_then(faebryk_core::instance::InstanceNode::as_expr)
                .is_some_and(|e| e.kind == ExprKind::Add && e.constrained)
        })
        .collect();
    assert_eq!(surviving.len(), 1, "exactly one constrained Add should survive folding");
}
