//! Literal-bound evaluation for arbitrary arithmetic expressions, used by
//! `upper_estimation_of_expressions_with_subsets` (spec §4.5 item 9) and by
//! the inspection API. Grounded on
//! `original_source/.../solver/symbolic/expression_wise.py`'s numeric
//! evaluation path: each operand's best known literal (a parameter's
//! `within`, a bare literal, or another expression's own derived bound) is
//! combined operand-wise through the expression's operator.
//!
//! Operand-wise substitution like this is only sound when the operands
//! aren't asserted to co-vary (spec §3 "Correlation": "absence permits
//! operand-wise literal substitution"); `has_correlated_operands` guards
//! against the unsound case by abstaining (returning `None`) whenever two
//! distinct operand nodes of the same expression are linked by a
//! `Correlated` predicate. A parameter is always self-correlated, so the
//! *same* node repeated within one expression is never flagged here — that
//! case is instead handled symbolically by `expression_wise`'s multiplicity
//! folding, which cancels exact repeats algebraically rather than by
//! interval arithmetic.

use std::collections::HashSet;

use crate::expr::{ExprKind, Operand};
use crate::graph::{Graph, NodeId};
use crate::instance::InstanceNode;
use crate::literal::{EnumSet, Literal, QuantitySet};

fn literal_add(a: &Literal, b: &Literal) -> Option<Literal> {
    match (a, b) {
        (Literal::Quantity(a), Literal::Quantity(b)) => a.add(b).ok().map(Literal::Quantity),
        _ => None,
    }
}

fn literal_mul(a: &Literal, b: &Literal) -> Option<Literal> {
    match (a, b) {
        (Literal::Quantity(a), Literal::Quantity(b)) => Some(Literal::Quantity(a.mul(b))),
        _ => None,
    }
}

fn literal_pow(base: &Literal, exponent: i32) -> Option<Literal> {
    match base {
        Literal::Quantity(q) => Some(Literal::Quantity(q.pow(exponent))),
        _ => None,
    }
}

fn literal_recip(base: &Literal) -> Option<Literal> {
    match base {
        Literal::Quantity(q) => q.recip().map(Literal::Quantity),
        _ => None,
    }
}

fn literal_log(base: &Literal) -> Option<Literal> {
    match base {
        Literal::Quantity(q) => q.log().map(Literal::Quantity),
        _ => None,
    }
}

fn literal_abs(base: &Literal) -> Option<Literal> {
    match base {
        Literal::Quantity(q) => Some(Literal::Quantity(q.abs())),
        _ => None,
    }
}

fn literal_round(base: &Literal) -> Option<Literal> {
    match base {
        Literal::Quantity(q) => Some(Literal::Quantity(q.round())),
        _ => None,
    }
}

/// The exponent of a `Power(_, Literal)` operand, when the exponent is a
/// literal singleton integer.
pub fn literal_int_exponent(lit: &Literal) -> Option<i32> {
    lit.as_int_scalar()
}

fn node_operands(operands: &[Operand]) -> Vec<NodeId> {
    operands.iter().filter_map(Operand::as_node).collect()
}

/// True if any two *distinct* node operands of this expression are linked by
/// a constrained `Correlated` predicate anywhere in the graph.
pub fn has_correlated_operands(graph: &Graph<InstanceNode>, operands: &[Operand]) -> bool {
    let nodes = node_operands(operands);
    if nodes.len() < 2 {
        return false;
    }
    for id in graph.node_ids() {
        let Some(expr) = graph.get(id).and_then(InstanceNode::as_expr) else {
            continue;
        };
        if expr.kind != ExprKind::Correlated {
            continue;
        }
        let correlated_set: HashSet<NodeId> = expr.node_operands().collect();
        let hits = nodes.iter().filter(|n| correlated_set.contains(n)).count();
        if hits >= 2 {
            return true;
        }
    }
    false
}

/// Evaluate the tightest literal bound derivable for `id` from its operands'
/// own best-known bounds. `Param`s contribute their `within`; `Expr`s
/// recurse; bare literal operands contribute themselves. Returns `None` when
/// any operand's bound is unknown, when the expression kind has no numeric
/// evaluation (predicates, boolean connectives), or when two operands are
/// asserted correlated.
pub fn literal_bound_of(graph: &Graph<InstanceNode>, id: NodeId, visiting: &mut HashSet<NodeId>) -> Option<Literal> {
    match graph.get(id)? {
        InstanceNode::Param(p) => Some(p.within.clone()),
        InstanceNode::Object(_) => None,
        InstanceNode::Expr(expr) => {
            if expr.kind.is_boolean_valued() || expr.kind == ExprKind::Correlated {
                return None;
            }
            if has_correlated_operands(graph, &expr.operands) {
                return None;
            }
            if !visiting.insert(id) {
                return None;
            }
            let operand_literals: Option<Vec<Literal>> = expr
                .operands
                .iter()
                .map(|op| match op {
                    Operand::Literal(lit) => Some(lit.clone()),
                    Operand::Node(n) => literal_bound_of(graph, *n, visiting),
                })
                .collect();
            visiting.remove(&id);
            let operand_literals = operand_literals?;

            match expr.kind {
                ExprKind::Add => operand_literals.into_iter().reduce(|a, b| match literal_add(&a, &b) {
                    Some(sum) => sum,
                    None => a,
                }),
                ExprKind::Multiply => operand_literals.into_iter().reduce(|a, b| match literal_mul(&a, &b) {
                    Some(product) => product,
                    None => a,
                }),
                ExprKind::Power => {
                    let base = operand_literals.first()?;
                    let exponent = literal_int_exponent(operand_literals.get(1)?)?;
                    if exponent == -1 {
                        literal_recip(base)
                    } else {
                        literal_pow(base, exponent)
                    }
                }
                ExprKind::Log => literal_log(operand_literals.first()?),
                ExprKind::Abs => literal_abs(operand_literals.first()?),
                ExprKind::Round => literal_round(operand_literals.first()?),
                ExprKind::Intersection => operand_literals.into_iter().reduce(|a, b| a.intersect(&b).unwrap_or(a)),
                ExprKind::Union => operand_literals.into_iter().reduce(|a, b| a.union(&b).unwrap_or(a)),
                _ => None,
            }
        }
    }
}

/// The empty literal matching `lit`'s kind, used when a fold needs to
/// produce an empty result of the same domain (e.g. absorbing `0` into a
/// `Multiply`).
pub fn empty_like(lit: &Literal) -> Literal {
    match lit {
        Literal::Quantity(q) => Literal::Quantity(QuantitySet::empty(q.unit.clone())),
        Literal::Enum(e) => Literal::Enum(EnumSet::empty(e.domain.clone())),
        Literal::Bool(_) => Literal::Bool(crate::literal::BoolSet::empty()),
    }
}
