//! The fixed pipeline of rewrite steps (spec §4.5 items 1–6, 8–10, 12–15).
//! Item 7 (`compress_associative`) lives in [`super::associative`]; item 11
//! (`predicate_literal_deduce`) and the two other source algorithms marked
//! "FIXME: rethink" are deliberately not implemented (see DESIGN.md's open
//! question decision); item 16 (per-kind algebraic folds) lives in
//! [`super::expression_wise`].
//!
//! Each function runs one full scan of the graph and returns whether it
//! mutated anything; [`super::pipeline::run`] calls them in the fixed order
//! below, repeating the whole list until one pass leaves every function
//! returning `false`.

use std::collections::HashSet;

use crate::core::SolveError;
use crate::expr::{ExprKind, Operand};
use crate::graph::{Graph, NodeId};
use crate::instance::InstanceNode;
use crate::literal::{BoolSet, Interval, Literal, QuantitySet};
use crate::mutator::{EquivalenceClasses, Mutator};
use crate::units::Unit;

use super::bound;

fn live_expr_ids(graph: &Graph<InstanceNode>) -> Vec<NodeId> {
    graph
        .node_ids()
        .filter(|&id| graph.get(id).and_then(InstanceNode::as_expr).is_some())
        .collect()
}

fn is_param(graph: &Graph<InstanceNode>, id: NodeId) -> bool {
    graph.get(id).and_then(InstanceNode::as_param).is_some()
}

/// Item 1: `A ≥ k` -> `A ⊆ [k, ∞)`; `k ≥ A` -> `A ⊆ (-∞, k]`.
pub fn convert_inequality_with_literal_to_subset(mutator: &mut Mutator) -> Result<bool, SolveError> {
    let ids = live_expr_ids(mutator.graph());
    let mut mutated = false;
    for id in ids {
        if !mutator.graph().contains(id) {
            continue;
        }
        let expr = mutator.graph().get(id).and_then(InstanceNode::as_expr).cloned().unwrap();
        if expr.kind != ExprKind::GreaterOrEqual {
            continue;
        }
        let new_id = match (&expr.operands[0], &expr.operands[1]) {
            (Operand::Node(p), Operand::Literal(Literal::Quantity(k))) if is_param(mutator.graph(), *p) => k
                .min()
                .map(|min| Literal::Quantity(QuantitySet::single(k.unit.clone(), Interval::new(min, f64::INFINITY)))),
            (Operand::Literal(Literal::Quantity(k)), Operand::Node(p)) if is_param(mutator.graph(), *p) => k
                .max()
                .map(|max| Literal::Quantity(QuantitySet::single(k.unit.clone(), Interval::new(f64::NEG_INFINITY, max)))),
            _ => None,
        }
        .map(|bound| {
            let p = match (&expr.operands[0], &expr.operands[1]) {
                (Operand::Node(p), _) | (_, Operand::Node(p)) => *p,
                _ => unreachable!(),
            };
            (p, bound)
        });
        if let Some((p, bound)) = new_id {
            let new_expr = mutator.create_expression(ExprKind::IsSubset, vec![Operand::Node(p), Operand::Literal(bound)], expr.constrained)?;
            mutator.redirect_operand(id, new_expr);
            mutator.remove_node(id);
            mutated = true;
        }
    }
    Ok(mutated)
}

/// Item 2: drop expression nodes not reachable from any constrained
/// predicate.
pub fn remove_unconstrained(mutator: &mut Mutator) -> Result<bool, SolveError> {
    let graph = mutator.graph();
    let mut keep: HashSet<NodeId> = HashSet::new();
    let mut stack: Vec<NodeId> = graph
        .node_ids()
        .filter(|&id| graph.get(id).and_then(InstanceNode::as_expr).is_some_and(|e| e.constrained))
        .collect();
    while let Some(id) = stack.pop() {
        if !keep.insert(id) {
            continue;
        }
        if let Some(expr) = graph.get(id).and_then(InstanceNode::as_expr) {
            for op in expr.node_operands() {
                if graph.get(op).and_then(InstanceNode::as_expr).is_some() {
                    stack.push(op);
                }
            }
        }
    }
    let to_remove: Vec<NodeId> = graph
        .node_ids()
        .filter(|&id| graph.get(id).and_then(InstanceNode::as_expr).is_some_and(|e| !e.constrained) && !keep.contains(&id))
        .collect();
    let mutated = !to_remove.is_empty();
    for id in to_remove {
        mutator.remove_node(id);
    }
    Ok(mutated)
}

/// Item 3: merge structurally-identical expressions, OR-ing `constrained`.
pub fn remove_congruent_expressions(mutator: &mut Mutator) -> Result<bool, SolveError> {
    let ids = live_expr_ids(mutator.graph());
    let mut mutated = false;
    let mut seen = Vec::new();
    'outer: for id in ids {
        if !mutator.graph().contains(id) {
            continue;
        }
        let expr = mutator.graph().get(id).and_then(InstanceNode::as_expr).cloned().unwrap();
        for (rep_id, rep_expr) in &seen {
            if !rep_expr_congruent(&expr, rep_expr) {
                continue;
            }
            if expr.constrained {
                if let Some(rep_mut) = mutator.graph_mut().get_mut(*rep_id).and_then(InstanceNode::as_expr_mut) {
                    rep_mut.constrained = true;
                }
            }
            mutator.redirect_operand(id, *rep_id);
            mutator.remove_node(id);
            mutated = true;
            continue 'outer;
        }
        seen.push((id, expr));
    }
    Ok(mutated)
}

fn rep_expr_congruent(a: &crate::expr::Expression, b: &crate::expr::Expression) -> bool {
    a.is_congruent_to(b)
}

/// Item 4: collapse `Is(Parameter, Parameter)` classes to one representative
/// (scoped to parameter-parameter pairs; see DESIGN.md).
pub fn resolve_alias_classes(mutator: &mut Mutator) -> Result<bool, SolveError> {
    let ids = live_expr_ids(mutator.graph());
    let mut classes: EquivalenceClasses<NodeId> = EquivalenceClasses::new();
    let mut any_pair = false;
    for id in &ids {
        let expr = mutator.graph().get(*id).and_then(InstanceNode::as_expr).unwrap();
        if expr.kind != ExprKind::Is || !expr.constrained {
            continue;
        }
        let (Operand::Node(a), Operand::Node(b)) = (&expr.operands[0], &expr.operands[1]) else {
            continue;
        };
        if a == b || !is_param(mutator.graph(), *a) || !is_param(mutator.graph(), *b) {
            continue;
        }
        classes.union(*a, *b);
        any_pair = true;
    }
    if !any_pair {
        return Ok(false);
    }
    let mut mutated = false;
    for class in classes.classes() {
        if class.len() < 2 {
            continue;
        }
        let rep = class[0];
        // `guess` merges as the *median* of every present guess across the
        // whole alias class (`defaultsolver.py`: `guess = median({p.guess
        // for p in alias_class if p.guess is not None})`), not a pairwise
        // fold -- unlike `within`/`tolerance_guess`/`likely_constrained`,
        // median isn't associative, so folding it two-at-a-time through
        // `Parameter::merge` would give the wrong answer for classes of
        // three or more. Collected before the merge loop removes anything.
        let guess_median = median(class.iter().filter_map(|&id| {
            mutator.graph().get(id).and_then(InstanceNode::as_param).and_then(|p| p.guess)
        }));
        for &other in &class[1..] {
            if !mutator.graph().contains(other) || !mutator.graph().contains(rep) {
                continue;
            }
            mutator.alias_parameters(rep, other)?;
            mutated = true;
        }
        if let Some(g) = guess_median {
            if let Some(p) = mutator.graph_mut().get_mut(rep).and_then(InstanceNode::as_param_mut) {
                p.guess = Some(g);
            }
        }
    }
    Ok(mutated)
}

/// The median of an unordered collection of `f64`s, `None` on empty input.
/// Grounded on `defaultsolver.py`'s `median(guesses)` over a `set[float]`.
fn median(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut values: Vec<f64> = values.into_iter().collect();
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// Item 5: `A is Lit` (directly, or via a representative item 4 already
/// merged) narrows the parameter's `within`.
pub fn distribute_literals_across_alias_classes(mutator: &mut Mutator) -> Result<bool, SolveError> {
    let ids = live_expr_ids(mutator.graph());
    let mut mutated = false;
    for id in ids {
        if !mutator.graph().contains(id) {
            continue;
        }
        let expr = mutator.graph().get(id).and_then(InstanceNode::as_expr).cloned().unwrap();
        if expr.kind != ExprKind::Is || !expr.constrained {
            continue;
        }
        for (node_op, lit_op) in [(&expr.operands[0], &expr.operands[1]), (&expr.operands[1], &expr.operands[0])] {
            if let (Operand::Node(p), Operand::Literal(l)) = (node_op, lit_op) {
                if is_param(mutator.graph(), *p) && mutator.narrow_param(*p, l)? {
                    mutated = true;
                }
            }
        }
    }
    Ok(mutated)
}

/// Item 6: `A ⊆ L1` and `A ⊆ L2` intersect into one bound.
pub fn merge_intersect_subsets(mutator: &mut Mutator) -> Result<bool, SolveError> {
    let ids = live_expr_ids(mutator.graph());
    let mut mutated = false;
    for id in ids {
        if !mutator.graph().contains(id) {
            continue;
        }
        let expr = mutator.graph().get(id).and_then(InstanceNode::as_expr).cloned().unwrap();
        if expr.kind != ExprKind::IsSubset || !expr.constrained {
            continue;
        }
        if let (Operand::Node(p), Operand::Literal(l)) = (&expr.operands[0], &expr.operands[1]) {
            if is_param(mutator.graph(), *p) && mutator.narrow_param(*p, l)? {
                mutated = true;
            }
        }
    }
    Ok(mutated)
}

/// Item 8: a constrained `Is`/`IsSubset` naming an empty literal directly is
/// a proved-false predicate.
pub fn empty_set(mutator: &mut Mutator) -> Result<bool, SolveError> {
    let ids = live_expr_ids(mutator.graph());
    for id in ids {
        if !mutator.graph().contains(id) {
            continue;
        }
        let expr = mutator.graph().get(id).and_then(InstanceNode::as_expr).cloned().unwrap();
        if !matches!(expr.kind, ExprKind::Is | ExprKind::IsSubset) || !expr.constrained || expr.solver_true {
            continue;
        }
        if expr.operands.iter().any(|op| matches!(op, Operand::Literal(l) if l.is_empty())) {
            return Err(SolveError::PredicateContradiction(id));
        }
    }
    Ok(false)
}

/// Item 9: `A ⊆ f(...)` narrows `A` by `f`'s derived literal bound.
pub fn upper_estimation_of_expressions_with_subsets(mutator: &mut Mutator) -> Result<bool, SolveError> {
    let ids = live_expr_ids(mutator.graph());
    let mut mutated = false;
    for id in ids {
        if !mutator.graph().contains(id) {
            continue;
        }
        let expr = mutator.graph().get(id).and_then(InstanceNode::as_expr).cloned().unwrap();
        if expr.kind != ExprKind::IsSubset || !expr.constrained {
            continue;
        }
        let (Operand::Node(p), Operand::Node(e)) = (&expr.operands[0], &expr.operands[1]) else {
            continue;
        };
        if !is_param(mutator.graph(), *p) || mutator.graph().get(*e).and_then(InstanceNode::as_expr).is_none() {
            continue;
        }
        if let Some(found) = bound::literal_bound_of(mutator.graph(), *e, &mut HashSet::new()) {
            if mutator.narrow_param(*p, &found)? {
                mutated = true;
            }
        }
    }
    Ok(mutated)
}

/// Item 10: `A ⊆ B` narrows `A` by `B`'s own `within` (covers both `A ⊆ B ⊆
/// C` transitivity and `A ⊆ B, B is L`, since earlier items already fold
/// `B`'s own knowledge into `B.within`).
pub fn transitive_subset(mutator: &mut Mutator) -> Result<bool, SolveError> {
    let ids = live_expr_ids(mutator.graph());
    let pairs: Vec<(NodeId, NodeId)> = ids
        .iter()
        .filter_map(|&id| {
            let expr = mutator.graph().get(id).and_then(InstanceNode::as_expr)?;
            if expr.kind != ExprKind::IsSubset || !expr.constrained {
                return None;
            }
            match (&expr.operands[0], &expr.operands[1]) {
                (Operand::Node(a), Operand::Node(b)) => Some((*a, *b)),
                _ => None,
            }
        })
        .collect();
    let mut mutated = false;
    for (a, b) in pairs {
        if !is_param(mutator.graph(), a) {
            continue;
        }
        let Some(b_within) = mutator.graph().get(b).and_then(InstanceNode::as_param).map(|p| p.within.clone()) else {
            continue;
        };
        if mutator.narrow_param(a, &b_within)? {
            mutated = true;
        }
    }
    Ok(mutated)
}

/// Item 12: replace every operand occurrence of a parameter whose `within`
/// has narrowed to a singleton with that literal, except inside a bare
/// `Is(p, p)` self-predicate (left for `remove_tautologies` to catch by node
/// identity, per spec §4.5 item 12's stated exception).
pub fn convert_operable_aliased_to_single_into_literal(mutator: &mut Mutator) -> Result<bool, SolveError> {
    let param_ids: Vec<NodeId> = mutator
        .graph()
        .node_ids()
        .filter(|&id| {
            mutator
                .graph()
                .get(id)
                .and_then(InstanceNode::as_param)
                .is_some_and(|p| p.within.is_singleton())
        })
        .collect();
    let mut mutated = false;
    for p in param_ids {
        let literal = mutator.graph().get(p).and_then(InstanceNode::as_param).unwrap().within.clone();
        let ids: Vec<NodeId> = mutator.graph().node_ids().collect();
        for id in ids {
            if id == p || !mutator.graph().contains(id) {
                continue;
            }
            let Some(expr) = mutator.graph().get(id).and_then(InstanceNode::as_expr).cloned() else {
                continue;
            };
            if expr.kind == ExprKind::Is && expr.operands.iter().all(|op| op.as_node() == Some(p)) {
                continue;
            }
            if !expr.operands.iter().any(|op| op.as_node() == Some(p)) {
                continue;
            }
            let new_operands: Vec<Operand> = expr
                .operands
                .iter()
                .map(|op| {
                    if op.as_node() == Some(p) {
                        Operand::Literal(literal.clone())
                    } else {
                        op.clone()
                    }
                })
                .collect();
            let new_id = mutator.create_expression(expr.kind, new_operands, expr.constrained)?;
            mutator.redirect_operand(id, new_id);
            mutator.remove_node(id);
            mutated = true;
        }
    }
    Ok(mutated)
}

/// Item 13: invert `f(A, lit...) is Lit` (`f` in `{Add, Multiply}`) to
/// isolate its one non-literal parameter operand.
pub fn isolate_lone_params(mutator: &mut Mutator) -> Result<bool, SolveError> {
    let ids = live_expr_ids(mutator.graph());
    let mut mutated = false;
    for id in ids {
        if !mutator.graph().contains(id) {
            continue;
        }
        let expr = mutator.graph().get(id).and_then(InstanceNode::as_expr).cloned().unwrap();
        if expr.kind != ExprKind::Is || !expr.constrained {
            continue;
        }
        for (expr_op, lit_op) in [(&expr.operands[0], &expr.operands[1]), (&expr.operands[1], &expr.operands[0])] {
            let (Operand::Node(e), Operand::Literal(target)) = (expr_op, lit_op) else {
                continue;
            };
            let Literal::Quantity(target_q) = target else { continue };
            let Some(inner) = mutator.graph().get(*e).and_then(InstanceNode::as_expr).cloned() else {
                continue;
            };
            if !matches!(inner.kind, ExprKind::Add | ExprKind::Multiply) {
                continue;
            }
            let mut lone_param = None;
            let mut others: Vec<QuantitySet> = Vec::new();
            let mut ok = true;
            for op in &inner.operands {
                match op {
                    Operand::Literal(Literal::Quantity(q)) => others.push(q.clone()),
                    Operand::Literal(_) => {
                        ok = false;
                        break;
                    }
                    Operand::Node(n) => {
                        if is_param(mutator.graph(), *n) && lone_param.is_none() {
                            lone_param = Some(*n);
                        } else {
                            ok = false;
                            break;
                        }
                    }
                }
            }
            if !ok {
                continue;
            }
            let Some(param_id) = lone_param else { continue };
            let others_combined = match inner.kind {
                ExprKind::Add => others.into_iter().reduce(|a, b| a.add(&b).unwrap_or(a)),
                ExprKind::Multiply => others.into_iter().reduce(|a, b| a.mul(&b)),
                _ => unreachable!(),
            };
            let inverted: Result<QuantitySet, crate::core::CoreError> = match (inner.kind, others_combined) {
                (ExprKind::Add, Some(others)) => target_q.add(&others.neg()),
                (ExprKind::Add, None) => Ok(target_q.clone()),
                (ExprKind::Multiply, Some(others)) => match others.recip() {
                    Some(r) => Ok(target_q.mul(&r)),
                    None => continue,
                },
                (ExprKind::Multiply, None) => Ok(target_q.clone()),
                _ => unreachable!(),
            };
            let Ok(inverted) = inverted else { continue };
            if mutator.narrow_param(param_id, &Literal::Quantity(inverted))? {
                mutated = true;
            }
        }
    }
    Ok(mutated)
}

/// Item 14: inside an expression whose operands carry no pairwise
/// `Correlated` predicate, substitute each parameter operand already
/// narrowed to a singleton with that literal.
pub fn uncorrelated_alias_fold(mutator: &mut Mutator) -> Result<bool, SolveError> {
    let ids = live_expr_ids(mutator.graph());
    let mut mutated = false;
    for id in ids {
        if !mutator.graph().contains(id) {
            continue;
        }
        let expr = mutator.graph().get(id).and_then(InstanceNode::as_expr).cloned().unwrap();
        if expr.kind == ExprKind::Correlated || bound::has_correlated_operands(mutator.graph(), &expr.operands) {
            continue;
        }
        let mut changed = false;
        let new_operands: Vec<Operand> = expr
            .operands
            .iter()
            .map(|op| {
                if let Operand::Node(n) = op {
                    if let Some(param) = mutator.graph().get(*n).and_then(InstanceNode::as_param) {
                        if param.within.is_singleton() {
                            changed = true;
                            return Operand::Literal(param.within.clone());
                        }
                    }
                }
                op.clone()
            })
            .collect();
        if !changed {
            continue;
        }
        let new_id = mutator.create_expression(expr.kind, new_operands, expr.constrained)?;
        mutator.redirect_operand(id, new_id);
        mutator.remove_node(id);
        mutated = true;
    }
    Ok(mutated)
}

/// Item 15: `A is A`, `A ⊆ A`, and non-literal `A ≥ A` fold to `True`.
pub fn remove_tautologies(mutator: &mut Mutator) -> Result<bool, SolveError> {
    let ids = live_expr_ids(mutator.graph());
    let mut mutated = false;
    for id in ids {
        if !mutator.graph().contains(id) {
            continue;
        }
        let expr = mutator.graph().get(id).and_then(InstanceNode::as_expr).cloned().unwrap();
        if !matches!(expr.kind, ExprKind::Is | ExprKind::IsSubset | ExprKind::GreaterOrEqual) {
            continue;
        }
        let (Operand::Node(a), Operand::Node(b)) = (&expr.operands[0], &expr.operands[1]) else {
            continue;
        };
        if a != b {
            continue;
        }
        mutator.replace_node_with_literal(id, &Literal::Bool(BoolSet::single(true)));
        mutator.remove_node(id);
        mutated = true;
    }
    Ok(mutated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::create_predicate;
    use crate::param::{Domain, Parameter};

    fn ohm_param(graph: &mut Graph<InstanceNode>, min: f64, max: f64) -> NodeId {
        let within = Literal::Quantity(QuantitySet::single(Unit::ohm(), Interval::new(min, max)));
        graph.add_node(InstanceNode::Param(Parameter::new(Domain::Numbers(Unit::ohm()), within)))
    }

    #[test]
    fn ge_with_literal_becomes_subset() {
        let mut graph: Graph<InstanceNode> = Graph::new();
        let a = ohm_param(&mut graph, 0.0, 100.0);
        let lit = Literal::Quantity(QuantitySet::point(Unit::ohm(), 5.0));
        create_predicate(&mut graph, ExprKind::GreaterOrEqual, Operand::Node(a), Operand::Literal(lit), true).unwrap();
        let mut mutator = Mutator::new(&mut graph);
        assert!(convert_inequality_with_literal_to_subset(&mut mutator).unwrap());
        assert!(merge_intersect_subsets(&mut mutator).unwrap());
        let merged = mutator.graph().get(a).unwrap().as_param().unwrap();
        let Literal::Quantity(q) = &merged.within else { panic!() };
        assert_eq!(q.intervals(), &[Interval::new(5.0, 100.0)]);
    }

    #[test]
    fn alias_chain_propagates_literal() {
        let mut graph: Graph<InstanceNode> = Graph::new();
        let a = ohm_param(&mut graph, 0.0, 100.0);
        let b = ohm_param(&mut graph, 0.0, 100.0);
        let c = ohm_param(&mut graph, 0.0, 100.0);
        create_predicate(&mut graph, ExprKind::Is, Operand::Node(a), Operand::Node(b), true).unwrap();
        create_predicate(&mut graph, ExprKind::Is, Operand::Node(b), Operand::Node(c), true).unwrap();
        let literal = Literal::Quantity(QuantitySet::single(Unit::ohm(), Interval::new(5.0, 10.0)));
        create_predicate(&mut graph, ExprKind::Is, Operand::Node(c), Operand::Literal(literal), true).unwrap();
        let mut mutator = Mutator::new(&mut graph);
        resolve_alias_classes(&mut mutator).unwrap();
        distribute_literals_across_alias_classes(&mut mutator).unwrap();
        let rep = mutator.graph().get(a);
        let rep = if rep.is_some() { a } else if mutator.graph().contains(b) { b } else { c };
        let p = mutator.graph().get(rep).unwrap().as_param().unwrap();
        let Literal::Quantity(q) = &p.within else { panic!() };
        assert_eq!(q.intervals(), &[Interval::new(5.0, 10.0)]);
    }

    #[test]
    fn alias_class_guess_is_true_median_not_pairwise_mean() {
        // {1, 2, 100}: true median is 2; a naive sequential pairwise mean
        // ((1+2)/2 then (.../2 + 100)/2) gives 50.75 instead.
        let mut graph: Graph<InstanceNode> = Graph::new();
        let a = ohm_param(&mut graph, 0.0, 200.0);
        let b = ohm_param(&mut graph, 0.0, 200.0);
        let c = ohm_param(&mut graph, 0.0, 200.0);
        graph.get_mut(a).unwrap().as_param_mut().unwrap().guess = Some(1.0);
        graph.get_mut(b).unwrap().as_param_mut().unwrap().guess = Some(2.0);
        graph.get_mut(c).unwrap().as_param_mut().unwrap().guess = Some(100.0);
        create_predicate(&mut graph, ExprKind::Is, Operand::Node(a), Operand::Node(b), true).unwrap();
        create_predicate(&mut graph, ExprKind::Is, Operand::Node(b), Operand::Node(c), true).unwrap();

        let mut mutator = Mutator::new(&mut graph);
        resolve_alias_classes(&mut mutator).unwrap();

        let rep = [a, b, c].into_iter().find(|&id| mutator.graph().contains(id)).unwrap();
        let p = mutator.graph().get(rep).unwrap().as_param().unwrap();
        assert_eq!(p.guess, Some(2.0));
    }

    #[test]
    fn self_is_predicate_removed_as_tautology() {
        let mut graph: Graph<InstanceNode> = Graph::new();
        let a = ohm_param(&mut graph, 0.0, 100.0);
        let pred = create_predicate(&mut graph, ExprKind::Is, Operand::Node(a), Operand::Node(a), true).unwrap();
        let mut mutator = Mutator::new(&mut graph);
        assert!(remove_tautologies(&mut mutator).unwrap());
        assert!(!mutator.graph().contains(pred));
    }

    #[test]
    fn contradictory_subsets_raise_error() {
        let mut graph: Graph<InstanceNode> = Graph::new();
        let a = ohm_param(&mut graph, 0.0, 100.0);
        let lit1 = Literal::Quantity(QuantitySet::single(Unit::ohm(), Interval::new(0.0, 5.0)));
        let lit2 = Literal::Quantity(QuantitySet::single(Unit::ohm(), Interval::new(10.0, 20.0)));
        create_predicate(&mut graph, ExprKind::IsSubset, Operand::Node(a), Operand::Literal(lit1), true).unwrap();
        create_predicate(&mut graph, ExprKind::IsSubset, Operand::Node(a), Operand::Literal(lit2), true).unwrap();
        let mut mutator = Mutator::new(&mut graph);
        merge_intersect_subsets(&mut mutator).unwrap();
        let err = merge_intersect_subsets(&mut mutator).unwrap_err();
        assert!(matches!(err, SolveError::ContradictionByLiteral(_)));
    }
}
