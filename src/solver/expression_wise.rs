//! Per-expression-kind algebraic folds, dispatched from one pipeline stage
//! rather than one stage per arithmetic kind, mirroring
//! `original_source/.../solver/symbolic/expression_wise.py`'s single
//! `expr_wise_algos` dispatch table. Covers `Add`/`Multiply` multiplicity
//! collection, `Power` identities, and `Or`/`And` boolean absorption.
//!
//! Each fold first checks whether its expression is already in normal form
//! (`is_add_canonical`/`is_multiply_canonical`) before doing any rewriting.
//! Without that check, rebuilding would recreate an operand's sub-expression
//! (e.g. `Multiply(x, 2)`) under a fresh [`NodeId`] every pass even when its
//! *shape* hasn't changed, and the pipeline would never reach the fixpoint
//! spec §8 requires (idempotence).

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::expr::{ExprKind, Expression, Operand};
use crate::graph::{Graph, NodeId};
use crate::instance::InstanceNode;
use crate::literal::{BoolSet, Literal, QuantitySet};
use crate::mutator::Mutator;
use crate::param::Domain;
use crate::units::Unit;

use super::bound::literal_int_exponent;

const EPS: f64 = 1e-12;

fn is_zero_quantity(lit: &Literal) -> bool {
    matches!(lit, Literal::Quantity(q) if q.intervals().len() == 1
        && (q.intervals()[0].min).abs() < EPS && (q.intervals()[0].max).abs() < EPS)
}

fn quantity_scalar(lit: &Literal) -> Option<f64> {
    match lit {
        Literal::Quantity(q) if q.intervals().len() == 1 && q.intervals()[0].min == q.intervals()[0].max => {
            Some(q.intervals()[0].min)
        }
        _ => None,
    }
}

fn unit_of(domain: &Domain) -> Unit {
    match domain {
        Domain::Numbers(unit) => unit.clone(),
        _ => Unit::dimensionless(),
    }
}

/// Shape-check for a `Multiply(base, literal_coeff)` or
/// `Multiply(literal_coeff, base)` node: the exact form `Add` terms fold
/// into. Returns `(base, coeff)` when it matches.
fn multiply_coeff_shape(graph: &Graph<InstanceNode>, id: NodeId) -> Option<(NodeId, f64)> {
    let expr = graph.get(id).and_then(InstanceNode::as_expr)?;
    if expr.kind != ExprKind::Multiply || expr.operands.len() != 2 {
        return None;
    }
    match (&expr.operands[0], &expr.operands[1]) {
        (Operand::Node(base), Operand::Literal(lit)) | (Operand::Literal(lit), Operand::Node(base)) => {
            quantity_scalar(lit).map(|c| (*base, c))
        }
        _ => None,
    }
}

enum AddTerm {
    Const(Literal),
    Var(NodeId, f64),
}

fn decompose_add_operand(graph: &Graph<InstanceNode>, op: &Operand) -> AddTerm {
    match op {
        Operand::Literal(l) => AddTerm::Const(l.clone()),
        Operand::Node(id) => match multiply_coeff_shape(graph, *id) {
            Some((base, coeff)) => AddTerm::Var(base, coeff),
            None => AddTerm::Var(*id, 1.0),
        },
    }
}

fn is_add_canonical(graph: &Graph<InstanceNode>, expr: &Expression) -> bool {
    let mut seen_bases: HashSet<NodeId> = HashSet::new();
    let mut literal_count = 0;
    for op in &expr.operands {
        match op {
            Operand::Literal(l) => {
                literal_count += 1;
                if literal_count > 1 || is_zero_quantity(l) {
                    return false;
                }
            }
            Operand::Node(id) => {
                if let Some(inner) = graph.get(*id).and_then(InstanceNode::as_expr) {
                    if inner.kind == ExprKind::Add {
                        return false;
                    }
                    if let Some((base, coeff)) = multiply_coeff_shape(graph, *id) {
                        if coeff == 1.0 || coeff == 0.0 || !seen_bases.insert(base) {
                            return false;
                        }
                        continue;
                    }
                }
                if !seen_bases.insert(*id) {
                    return false;
                }
            }
        }
    }
    true
}

/// `Add`: multiplicity-counted term collection (spec §4.5 item 16: "collect
/// like terms via multiplicity counting").
pub fn fold_add(mutator: &mut Mutator, id: NodeId) -> Result<bool, crate::core::SolveError> {
    let expr = mutator.graph().get(id).and_then(InstanceNode::as_expr).cloned();
    let Some(expr) = expr else { return Ok(false) };
    if expr.kind != ExprKind::Add || is_add_canonical(mutator.graph(), &expr) {
        return Ok(false);
    }
    let unit = unit_of(&expr.domain);
    let mut coeffs: IndexMap<NodeId, f64> = IndexMap::new();
    let mut const_sum = QuantitySet::point(unit.clone(), 0.0);
    for op in &expr.operands {
        match decompose_add_operand(mutator.graph(), op) {
            AddTerm::Const(Literal::Quantity(q)) => {
                const_sum = const_sum.add(&q).unwrap_or(const_sum);
            }
            AddTerm::Const(_) => return Ok(false),
            AddTerm::Var(base, coeff) => {
                *coeffs.entry(base).or_insert(0.0) += coeff;
            }
        }
    }

    let mut new_operands = Vec::new();
    for (&base, &coeff) in coeffs.iter() {
        if coeff.abs() < EPS {
            continue;
        }
        if (coeff - 1.0).abs() < EPS {
            new_operands.push(Operand::Node(base));
        } else {
            let coeff_lit = Operand::Literal(Literal::Quantity(QuantitySet::point(Unit::dimensionless(), coeff)));
            let mul_id = mutator.create_expression(ExprKind::Multiply, vec![Operand::Node(base), coeff_lit], false)?;
            new_operands.push(Operand::Node(mul_id));
        }
    }
    let const_is_zero = is_zero_quantity(&Literal::Quantity(const_sum.clone()));

    if new_operands.is_empty() {
        mutator.replace_node_with_literal(id, &Literal::Quantity(const_sum));
        mutator.remove_node(id);
        return Ok(true);
    }
    if !const_is_zero {
        new_operands.push(Operand::Literal(Literal::Quantity(const_sum)));
    }
    if new_operands.len() == 1 {
        if let Operand::Node(single) = new_operands[0] {
            mutator.redirect_operand(id, single);
            mutator.remove_node(id);
            return Ok(true);
        }
    }
    let new_id = mutator.create_expression(ExprKind::Add, new_operands, expr.constrained)?;
    mutator.redirect_operand(id, new_id);
    mutator.remove_node(id);
    Ok(true)
}

fn power_exponent_shape(graph: &Graph<InstanceNode>, id: NodeId) -> Option<(NodeId, i32)> {
    let expr = graph.get(id).and_then(InstanceNode::as_expr)?;
    if expr.kind != ExprKind::Power || expr.operands.len() != 2 {
        return None;
    }
    let Operand::Node(base) = &expr.operands[0] else {
        return None;
    };
    let Operand::Literal(exp_lit) = &expr.operands[1] else {
        return None;
    };
    literal_int_exponent(exp_lit).map(|e| (*base, e))
}

fn decompose_multiply_operand(graph: &Graph<InstanceNode>, op: &Operand) -> Result<(NodeId, i32), Literal> {
    match op {
        Operand::Literal(l) => Err(l.clone()),
        Operand::Node(id) => match power_exponent_shape(graph, *id) {
            Some((base, exp)) => Ok((base, exp)),
            None => Ok((*id, 1)),
        },
    }
}

fn is_multiply_canonical(graph: &Graph<InstanceNode>, expr: &Expression) -> bool {
    let mut seen_bases: HashSet<NodeId> = HashSet::new();
    let mut literal_count = 0;
    for op in &expr.operands {
        if let Operand::Literal(l) = op {
            literal_count += 1;
            if literal_count > 1 {
                return false;
            }
            if let Some(v) = quantity_scalar(l) {
                if (v - 1.0).abs() < EPS {
                    return false;
                }
            }
            continue;
        }
        let Operand::Node(id) = op else { unreachable!() };
        if let Some(inner) = graph.get(*id).and_then(InstanceNode::as_expr) {
            if inner.kind == ExprKind::Multiply {
                return false;
            }
            if let Some((base, exp)) = power_exponent_shape(graph, *id) {
                if exp == 1 || exp == 0 || !seen_bases.insert(base) {
                    return false;
                }
                continue;
            }
        }
        if !seen_bases.insert(*id) {
            return false;
        }
    }
    true
}

/// `Multiply`: power collection, absorbing `0` and neutralizing `1` (spec
/// §4.5 item 16).
pub fn fold_multiply(mutator: &mut Mutator, id: NodeId) -> Result<bool, crate::core::SolveError> {
    let expr = mutator.graph().get(id).and_then(InstanceNode::as_expr).cloned();
    let Some(expr) = expr else { return Ok(false) };
    if expr.kind != ExprKind::Multiply || is_multiply_canonical(mutator.graph(), &expr) {
        return Ok(false);
    }
    let unit = unit_of(&expr.domain);
    let mut exponents: IndexMap<NodeId, i32> = IndexMap::new();
    let mut const_product = 1.0f64;
    for op in &expr.operands {
        match decompose_multiply_operand(mutator.graph(), op) {
            Err(lit) => match quantity_scalar(&lit) {
                Some(v) => const_product *= v,
                None => return Ok(false),
            },
            Ok((base, exp)) => {
                *exponents.entry(base).or_insert(0) += exp;
            }
        }
    }

    if const_product.abs() < EPS {
        mutator.replace_node_with_literal(id, &Literal::Quantity(QuantitySet::point(unit, 0.0)));
        mutator.remove_node(id);
        return Ok(true);
    }

    let mut new_operands = Vec::new();
    for (&base, &exp) in exponents.iter() {
        if exp == 0 {
            continue;
        }
        if exp == 1 {
            new_operands.push(Operand::Node(base));
        } else {
            let exp_lit = Operand::Literal(Literal::Quantity(QuantitySet::point(Unit::dimensionless(), exp as f64)));
            let pow_id = mutator.create_expression(ExprKind::Power, vec![Operand::Node(base), exp_lit], false)?;
            new_operands.push(Operand::Node(pow_id));
        }
    }
    let const_is_one = (const_product - 1.0).abs() < EPS;

    if new_operands.is_empty() {
        mutator.replace_node_with_literal(id, &Literal::Quantity(QuantitySet::point(unit, const_product)));
        mutator.remove_node(id);
        return Ok(true);
    }
    if !const_is_one {
        new_operands.push(Operand::Literal(Literal::Quantity(QuantitySet::point(unit, const_product))));
    }
    if new_operands.len() == 1 {
        if let Operand::Node(single) = new_operands[0] {
            mutator.redirect_operand(id, single);
            mutator.remove_node(id);
            return Ok(true);
        }
    }
    let new_id = mutator.create_expression(ExprKind::Multiply, new_operands, expr.constrained)?;
    mutator.redirect_operand(id, new_id);
    mutator.remove_node(id);
    Ok(true)
}

/// `Power`: `A^0 -> 1`, `A^1 -> A`, `0^A -> 0` (A>0), `1^A -> 1`.
pub fn fold_power(mutator: &mut Mutator, id: NodeId) -> Result<bool, crate::core::SolveError> {
    let expr = mutator.graph().get(id).and_then(InstanceNode::as_expr).cloned();
    let Some(expr) = expr else { return Ok(false) };
    if expr.kind != ExprKind::Power {
        return Ok(false);
    }
    let base = expr.operands[0].clone();
    let exponent = expr.operands[1].clone();
    let unit = unit_of(&expr.domain);

    if let Operand::Literal(exp_lit) = &exponent {
        if let Some(v) = quantity_scalar(exp_lit) {
            if v == 0.0 {
                mutator.replace_node_with_literal(id, &Literal::Quantity(QuantitySet::point(Unit::dimensionless(), 1.0)));
                mutator.remove_node(id);
                return Ok(true);
            }
            if v == 1.0 {
                match base {
                    Operand::Node(n) => {
                        mutator.redirect_operand(id, n);
                        mutator.remove_node(id);
                    }
                    Operand::Literal(l) => {
                        mutator.replace_node_with_literal(id, &l);
                        mutator.remove_node(id);
                    }
                }
                return Ok(true);
            }
        }
    }
    if let Operand::Literal(base_lit) = &base {
        if let Some(b) = quantity_scalar(base_lit) {
            if b == 0.0 {
                let exponent_positive = matches!(&exponent, Operand::Literal(e) if quantity_scalar(e).is_some_and(|v| v > 0.0));
                if exponent_positive {
                    mutator.replace_node_with_literal(id, &Literal::Quantity(QuantitySet::point(unit, 0.0)));
                    mutator.remove_node(id);
                    return Ok(true);
                }
            }
            if b == 1.0 {
                mutator.replace_node_with_literal(id, &Literal::Quantity(QuantitySet::point(Unit::dimensionless(), 1.0)));
                mutator.remove_node(id);
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// `And`/`Or`: boolean absorption; empty `Or` -> False, empty `And` -> True.
pub fn fold_boolean(mutator: &mut Mutator, id: NodeId) -> Result<bool, crate::core::SolveError> {
    let expr = mutator.graph().get(id).and_then(InstanceNode::as_expr).cloned();
    let Some(expr) = expr else { return Ok(false) };
    if !matches!(expr.kind, ExprKind::And | ExprKind::Or) {
        return Ok(false);
    }
    let absorbing = expr.kind == ExprKind::And; // And short-circuits on False, Or on True
    let absorbing_value = !absorbing;
    let identity_value = absorbing;

    let mut kept = Vec::new();
    let mut touched = false;
    for op in &expr.operands {
        if let Operand::Literal(Literal::Bool(b)) = op {
            if let Some(v) = b.is_single() {
                touched = true;
                if v == absorbing_value {
                    mutator.replace_node_with_literal(id, &Literal::Bool(BoolSet::single(absorbing_value)));
                    mutator.remove_node(id);
                    return Ok(true);
                }
                if v == identity_value {
                    continue;
                }
            }
        }
        kept.push(op.clone());
    }
    if !touched {
        return Ok(false);
    }
    if kept.is_empty() {
        mutator.replace_node_with_literal(id, &Literal::Bool(BoolSet::single(identity_value)));
        mutator.remove_node(id);
        return Ok(true);
    }
    if kept.len() == 1 {
        match &kept[0] {
            Operand::Node(n) => {
                mutator.redirect_operand(id, *n);
                mutator.remove_node(id);
            }
            Operand::Literal(l) => {
                mutator.replace_node_with_literal(id, l);
                mutator.remove_node(id);
            }
        }
        return Ok(true);
    }
    let new_id = mutator.create_expression(expr.kind, kept, expr.constrained)?;
    mutator.redirect_operand(id, new_id);
    mutator.remove_node(id);
    Ok(true)
}

/// `Not(Literal(bool))` folds to the negated literal directly.
pub fn fold_not(mutator: &mut Mutator, id: NodeId) -> Result<bool, crate::core::SolveError> {
    let expr = mutator.graph().get(id).and_then(InstanceNode::as_expr).cloned();
    let Some(expr) = expr else { return Ok(false) };
    if expr.kind != ExprKind::Not {
        return Ok(false);
    }
    if let Operand::Literal(Literal::Bool(b)) = &expr.operands[0] {
        mutator.replace_node_with_literal(id, &Literal::Bool(b.not()));
        mutator.remove_node(id);
        return Ok(true);
    }
    Ok(false)
}

/// Run every per-kind fold over every live expression, in insertion order,
/// to one full pass (spec §4.5 item 16 "expression-wise folds").
pub fn run(mutator: &mut Mutator) -> Result<bool, crate::core::SolveError> {
    let ids: Vec<NodeId> = mutator
        .graph()
        .node_ids()
        .filter(|&id| mutator.graph().get(id).and_then(InstanceNode::as_expr).is_some())
        .collect();
    let mut mutated = false;
    for id in ids {
        if !mutator.graph().contains(id) {
            continue;
        }
        let kind = mutator.graph().get(id).and_then(InstanceNode::as_expr).map(|e| e.kind);
        let Some(kind) = kind else { continue };
        let changed = match kind {
            ExprKind::Add => fold_add(mutator, id)?,
            ExprKind::Multiply => fold_multiply(mutator, id)?,
            ExprKind::Power => fold_power(mutator, id)?,
            ExprKind::And | ExprKind::Or => fold_boolean(mutator, id)?,
            ExprKind::Not => fold_not(mutator, id)?,
            _ => false,
        };
        mutated |= changed;
    }
    Ok(mutated)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::expr::create_expression;
    use crate::literal::Interval;
    use crate::param::{Domain, Parameter};

    fn volt_param(graph: &mut Graph<InstanceNode>, min: f64, max: f64) -> NodeId {
        graph.add_node(InstanceNode::Param(Parameter::new(
            Domain::Numbers(Unit::volt()),
            Literal::Quantity(QuantitySet::single(Unit::volt(), Interval::new(min, max))),
        )))
    }

    #[test]
    fn add_x_0_folds_to_x() {
        let mut graph: Graph<InstanceNode> = Graph::new();
        let x = volt_param(&mut graph, 0.0, 10.0);
        let zero = Operand::Literal(Literal::Quantity(QuantitySet::point(Unit::volt(), 0.0)));
        let add_id = create_expression(&mut graph, ExprKind::Add, vec![Operand::Node(x), zero], false).unwrap();
        let holder = create_expression(&mut graph, ExprKind::Abs, vec![Operand::Node(add_id)], false).unwrap();
        let mut mutator = Mutator::new(&mut graph);
        assert!(fold_add(&mut mutator, add_id).unwrap());
        let holder_expr = mutator.graph().get(holder).unwrap().as_expr().unwrap();
        assert_eq!(holder_expr.operands[0].as_node(), Some(x));
    }

    #[test]
    fn add_like_terms_collect_multiplicity() {
        let mut graph: Graph<InstanceNode> = Graph::new();
        let x = volt_param(&mut graph, 0.0, 10.0);
        let five = Operand::Literal(Literal::Quantity(QuantitySet::point(Unit::volt(), 5.0)));
        let ten = Operand::Literal(Literal::Quantity(QuantitySet::point(Unit::volt(), 10.0)));
        let add_id = create_expression(
            &mut graph,
            ExprKind::Add,
            vec![Operand::Node(x), Operand::Node(x), five, ten],
            false,
        )
        .unwrap();
        let mut mutator = Mutator::new(&mut graph);
        assert!(fold_add(&mut mutator, add_id).unwrap());
    }

    #[test]
    fn power_zero_folds_to_one() {
        let mut graph: Graph<InstanceNode> = Graph::new();
        let x = volt_param(&mut graph, 1.0, 10.0);
        let zero = Operand::Literal(Literal::Quantity(QuantitySet::point(Unit::dimensionless(), 0.0)));
        let pow_id = create_expression(&mut graph, ExprKind::Power, vec![Operand::Node(x), zero], false).unwrap();
        let mut mutator = Mutator::new(&mut graph);
        assert!(fold_power(&mut mutator, pow_id).unwrap());
        let node = mutator.graph().get(pow_id);
        assert!(node.is_none());
    }

    /// Round-trip laws from spec §8: `Power(x, 1) -> x`, `Power(x, 0) -> 1`.
    #[rstest]
    #[case::exponent_one_folds_to_base(1.0)]
    #[case::exponent_zero_folds_to_one(0.0)]
    fn power_literal_exponent_identities(#[case] exponent_value: f64) {
        let mut graph: Graph<InstanceNode> = Graph::new();
        let x = volt_param(&mut graph, 1.0, 10.0);
        let exponent = Operand::Literal(Literal::Quantity(QuantitySet::point(Unit::dimensionless(), exponent_value)));
        let pow_id = create_expression(&mut graph, ExprKind::Power, vec![Operand::Node(x), exponent], false).unwrap();
        let mut mutator = Mutator::new(&mut graph);
        assert!(fold_power(&mut mutator, pow_id).unwrap());
        assert!(mutator.graph().get(pow_id).is_none());
    }

    /// `Power(0, x) -> 0` (x positive), `Power(1, x) -> 1`.
    #[rstest]
    #[case::zero_base_positive_exponent_folds_to_zero(0.0, 2.0)]
    #[case::one_base_folds_to_one(1.0, 7.0)]
    fn power_literal_base_identities(#[case] base_value: f64, #[case] exponent_value: f64) {
        let mut graph: Graph<InstanceNode> = Graph::new();
        let base = Operand::Literal(Literal::Quantity(QuantitySet::point(Unit::dimensionless(), base_value)));
        let exponent = Operand::Literal(Literal::Quantity(QuantitySet::point(Unit::dimensionless(), exponent_value)));
        let pow_id = create_expression(&mut graph, ExprKind::Power, vec![base, exponent], false).unwrap();
        let mut mutator = Mutator::new(&mut graph);
        assert!(fold_power(&mut mutator, pow_id).unwrap());
        assert!(mutator.graph().get(pow_id).is_none());
    }
}
