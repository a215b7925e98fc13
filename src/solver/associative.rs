//! Item 7: `compress_associative` (spec §3 "Associativity", §4.5 item 7).
//! One call flattens one nesting level of a fully-associative expression
//! whose operand is another expression of the same kind, e.g.
//! `Add(Add(a, b), c)` -> `Add(a, b, c)`. The pipeline repeats it to
//! fixpoint, so deeply nested trees flatten over successive passes; the
//! inner, now-unreferenced node is left for `remove_unconstrained` (item 2)
//! to reclaim rather than removed here.

use crate::core::SolveError;
use crate::expr::Operand;
use crate::graph::NodeId;
use crate::instance::InstanceNode;
use crate::mutator::Mutator;

pub fn compress_associative(mutator: &mut Mutator) -> Result<bool, SolveError> {
    let ids: Vec<NodeId> = mutator
        .graph()
        .node_ids()
        .filter(|&id| {
            mutator
                .graph()
                .get(id)
                .and_then(InstanceNode::as_expr)
                .is_some_and(|e| e.kind.is_fully_associative())
        })
        .collect();
    let mut mutated = false;
    for id in ids {
        if !mutator.graph().contains(id) {
            continue;
        }
        let expr = mutator.graph().get(id).and_then(InstanceNode::as_expr).cloned().unwrap();
        let has_nested = expr.operands.iter().any(|op| match op {
            Operand::Node(n) => mutator
                .graph()
                .get(*n)
                .and_then(InstanceNode::as_expr)
                .is_some_and(|inner| inner.kind == expr.kind),
            Operand::Literal(_) => false,
        });
        if !has_nested {
            continue;
        }
        let mut flattened = Vec::with_capacity(expr.operands.len());
        for op in &expr.operands {
            match op {
                Operand::Node(n) => {
                    let inner = mutator.graph().get(*n).and_then(InstanceNode::as_expr).cloned();
                    match inner {
                        Some(inner) if inner.kind == expr.kind => flattened.extend(inner.operands),
                        _ => flattened.push(op.clone()),
                    }
                }
                Operand::Literal(_) => flattened.push(op.clone()),
            }
        }
        let new_id = mutator.create_expression(expr.kind, flattened, expr.constrained)?;
        mutator.redirect_operand(id, new_id);
        mutator.remove_node(id);
        mutated = true;
    }
    Ok(mutated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{create_expression, ExprKind};
    use crate::graph::Graph;
    use crate::literal::{Interval, Literal, QuantitySet};
    use crate::param::{Domain, Parameter};
    use crate::units::Unit;

    #[test]
    fn flattens_one_nesting_level() {
        let mut graph: Graph<InstanceNode> = Graph::new();
        let mk_param = |graph: &mut Graph<InstanceNode>| {
            graph.add_node(InstanceNode::Param(Parameter::new(
                Domain::Numbers(Unit::volt()),
                Literal::Quantity(QuantitySet::single(Unit::volt(), Interval::new(0.0, 10.0))),
            )))
        };
        let a = mk_param(&mut graph);
        let b = mk_param(&mut graph);
        let c = mk_param(&mut graph);
        let inner = create_expression(&mut graph, ExprKind::Add, vec![Operand::Node(a), Operand::Node(b)], false).unwrap();
        let outer = create_expression(&mut graph, ExprKind::Add, vec![Operand::Node(inner), Operand::Node(c)], true).unwrap();
        let mut mutator = Mutator::new(&mut graph);
        assert!(compress_associative(&mut mutator).unwrap());
        assert!(!mutator.graph().contains(outer));
        let surviving: Vec<NodeId> = mutator
            .graph()
            .node_ids()
            .filter(|&id| {
                mutator
                    .graph()
                    .get(id)
                    .and_then(InstanceNode::as_expr)
                    .is_some_and(|e| e.kind == ExprKind::Add && e.constrained)
            })
            .collect();
        assert_eq!(surviving.len(), 1);
        let flattened = mutator.graph().get(surviving[0]).and_then(InstanceNode::as_expr).unwrap();
        assert_eq!(flattened.operands.len(), 3);
    }
}
