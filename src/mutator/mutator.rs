use rustc_hash::FxHashSet;

use crate::core::{CoreError, SolveError};
use crate::expr::{ExprKind, Operand};
use crate::graph::{EdgeType, Graph, NodeId};
use crate::instance::InstanceNode;
use crate::literal::Literal;
use crate::param::Parameter;

/// The transactional rewriter one solver pass runs its algorithms against
/// (spec §4.4). Rather than literally building a second "output" graph (the
/// source's Python object-graph shape), this wraps the existing tombstoning
/// arena in-place: a rewrite redirects every reference to the old node at
/// the new one (`redirect_operand`/`replace_node_with_literal`) before
/// tombstoning it, so the invariant "a node is never referenced by both its
/// old and new form" holds by construction — the old id simply stops
/// appearing anywhere live. This is the same arena+index substitution spec
/// §9 prescribes for the source's cyclic object graphs, applied one level up
/// to the mutator itself.
pub struct Mutator<'g> {
    graph: &'g mut Graph<InstanceNode>,
    new_this_pass: FxHashSet<NodeId>,
    mutated: bool,
}

impl<'g> Mutator<'g> {
    pub fn new(graph: &'g mut Graph<InstanceNode>) -> Self {
        Self {
            graph,
            new_this_pass: FxHashSet::default(),
            mutated: false,
        }
    }

    pub fn graph(&self) -> &Graph<InstanceNode> {
        self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph<InstanceNode> {
        self.graph
    }

    pub fn mutated(&self) -> bool {
        self.mutated
    }

    pub fn mark_mutated(&mut self) {
        self.mutated = true;
    }

    /// Reset per-pass bookkeeping (spec §4.4 "tracks which nodes were
    /// created/changed in the current pass").
    pub fn begin_pass(&mut self) {
        self.new_this_pass.clear();
        self.mutated = false;
    }

    pub fn is_new_this_pass(&self, id: NodeId) -> bool {
        self.new_this_pass.contains(&id)
    }

    pub fn create_expression(
        &mut self,
        kind: ExprKind,
        operands: Vec<Operand>,
        constrained: bool,
    ) -> Result<NodeId, CoreError> {
        let id = crate::expr::create_expression(self.graph, kind, operands, constrained)?;
        self.new_this_pass.insert(id);
        self.mutated = true;
        Ok(id)
    }

    pub fn mark_predicate_true(&mut self, id: NodeId) -> Result<(), SolveError> {
        let expr = self
            .graph
            .get_mut(id)
            .and_then(InstanceNode::as_expr_mut)
            .ok_or_else(|| SolveError::NotImplemented(format!("mark_predicate_true: {id} is not a predicate")))?;
        if !expr.solver_true {
            expr.solver_true = true;
            self.mutated = true;
        }
        Ok(())
    }

    pub fn remove_node(&mut self, id: NodeId) {
        if self.graph.remove_node(id).is_some() {
            self.mutated = true;
        }
    }

    /// Replace every occurrence of `old` as an operand anywhere in the graph
    /// with `new`, rewiring `Operand` edges to match, then the caller is
    /// free to tombstone `old`.
    pub fn redirect_operand(&mut self, old: NodeId, new: NodeId) {
        if old == new {
            return;
        }
        let ids: Vec<NodeId> = self.graph.node_ids().collect();
        let mut changed = false;
        for id in ids {
            if let Some(expr) = self.graph.get_mut(id).and_then(InstanceNode::as_expr_mut) {
                for operand in expr.operands.iter_mut() {
                    if operand.as_node() == Some(old) {
                        *operand = Operand::Node(new);
                        changed = true;
                    }
                }
            }
        }
        self.graph.retarget_edges(EdgeType::Operand, old, new);
        if changed {
            self.mutated = true;
        }
    }

    /// Replace every occurrence of `old` as an operand with the bare literal
    /// `value`, dropping the now-meaningless `Operand` edges. Used when a
    /// node's whole value collapses to a literal (a singleton alias, a fully
    /// literal-folded expression) instead of another live node.
    pub fn replace_node_with_literal(&mut self, old: NodeId, value: &Literal) {
        let ids: Vec<NodeId> = self.graph.node_ids().collect();
        let mut changed = false;
        for id in ids {
            if id == old {
                continue;
            }
            if let Some(expr) = self.graph.get_mut(id).and_then(InstanceNode::as_expr_mut) {
                let mut touched = false;
                for operand in expr.operands.iter_mut() {
                    if operand.as_node() == Some(old) {
                        *operand = Operand::Literal(value.clone());
                        touched = true;
                    }
                }
                if touched {
                    changed = true;
                    self.graph.remove_edges_between(id, old, EdgeType::Operand);
                }
            }
        }
        if changed {
            self.mutated = true;
        }
    }

    /// Intersect `param`'s `within` bound with `bound`, raising a typed
    /// contradiction if the result is empty (spec §4.4 "the solver evaluates
    /// whether any existing predicate on p contradicts Lit"). Returns
    /// whether the bound actually narrowed (used by callers to decide
    /// whether they mutated anything).
    pub fn narrow_param(&mut self, param: NodeId, bound: &Literal) -> Result<bool, SolveError> {
        let current = self
            .graph
            .get(param)
            .and_then(InstanceNode::as_param)
            .map(|p| p.within.clone())
            .ok_or_else(|| SolveError::NotImplemented(format!("narrow_param: {param} is not a parameter")))?;
        let narrowed = current.intersect(bound).map_err(|e| SolveError::NotImplemented(e.to_string()))?;
        if narrowed.is_empty() {
            return Err(SolveError::from(crate::core::ContradictionByLiteralInfo {
                involved: vec![param],
                literals: vec![current, bound.clone()],
                message: format!("parameter {param} has no value satisfying all constraints"),
            }));
        }
        if narrowed == current {
            return Ok(false);
        }
        let p = self.graph.get_mut(param).and_then(InstanceNode::as_param_mut).unwrap();
        p.within = narrowed;
        self.mutated = true;
        Ok(true)
    }

    /// Merge `other`'s `Parameter` data into `rep` (spec §4.4 alias-class
    /// merge, via `Parameter::merge`), redirect every reference to `other`
    /// at `rep`, then tombstone `other`.
    pub fn alias_parameters(&mut self, rep: NodeId, other: NodeId) -> Result<(), SolveError> {
        if rep == other {
            return Ok(());
        }
        let rep_param = self
            .graph
            .get(rep)
            .and_then(InstanceNode::as_param)
            .cloned()
            .ok_or_else(|| SolveError::NotImplemented(format!("alias_parameters: {rep} is not a parameter")))?;
        let other_param = self
            .graph
            .get(other)
            .and_then(InstanceNode::as_param)
            .cloned()
            .ok_or_else(|| SolveError::NotImplemented(format!("alias_parameters: {other} is not a parameter")))?;
        let merged = rep_param.merge(&other_param).map_err(|e| match e {
            CoreError::Domain { message, .. } => SolveError::NotImplemented(message),
            other => SolveError::NotImplemented(other.to_string()),
        })?;
        if merged.within.is_empty() {
            return Err(SolveError::from(crate::core::ContradictionByLiteralInfo {
                involved: vec![rep, other],
                literals: vec![rep_param.within, other_param.within],
                message: format!("aliasing {rep} and {other} has no satisfying value"),
            }));
        }
        *self.graph.get_mut(rep).and_then(InstanceNode::as_param_mut).unwrap() = merged;
        self.redirect_operand(other, rep);
        self.remove_node(other);
        self.mutated = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::create_predicate;
    use crate::literal::{BoolSet, EnumSet, Interval, QuantitySet};
    use crate::param::Domain;
    use crate::units::Unit;

    fn ohm_param(graph: &mut Graph<InstanceNode>, min: f64, max: f64) -> NodeId {
        let within = Literal::Quantity(QuantitySet::single(Unit::ohm(), Interval::new(min, max)));
        graph.add_node(InstanceNode::Param(Parameter::new(Domain::Numbers(Unit::ohm()), within)))
    }

    #[test]
    fn redirect_operand_rewrites_expression_operands_and_edges() {
        let mut graph: Graph<InstanceNode> = Graph::new();
        let a = ohm_param(&mut graph, 0.0, 10.0);
        let b = ohm_param(&mut graph, 0.0, 10.0);
        let expr_id = create_predicate(
            &mut graph,
            ExprKind::IsSubset,
            Operand::Node(a),
            Operand::Literal(Literal::Quantity(QuantitySet::single(Unit::ohm(), Interval::new(0.0, 5.0)))),
            true,
        )
        .unwrap();
        let mut mutator = Mutator::new(&mut graph);
        mutator.redirect_operand(a, b);
        let expr = mutator.graph().get(expr_id).unwrap().as_expr().unwrap();
        assert_eq!(expr.operands[0].as_node(), Some(b));
    }

    #[test]
    fn narrow_param_detects_contradiction() {
        let mut graph: Graph<InstanceNode> = Graph::new();
        let a = ohm_param(&mut graph, 0.0, 5.0);
        let mut mutator = Mutator::new(&mut graph);
        let bound = Literal::Quantity(QuantitySet::single(Unit::ohm(), Interval::new(10.0, 20.0)));
        let err = mutator.narrow_param(a, &bound).unwrap_err();
        assert!(matches!(err, SolveError::ContradictionByLiteral(_)));
    }

    #[test]
    fn alias_parameters_merges_and_removes_other() {
        let mut graph: Graph<InstanceNode> = Graph::new();
        let a = ohm_param(&mut graph, 0.0, 10.0);
        let b = ohm_param(&mut graph, 5.0, 15.0);
        let mut mutator = Mutator::new(&mut graph);
        mutator.alias_parameters(a, b).unwrap();
        assert!(!mutator.graph().contains(b));
        let merged = mutator.graph().get(a).unwrap().as_param().unwrap();
        let Literal::Quantity(q) = &merged.within else {
            panic!("expected quantity literal");
        };
        assert_eq!(q.intervals(), &[Interval::new(5.0, 10.0)]);
    }

    #[test]
    fn replace_node_with_literal_drops_operand_edges() {
        let mut graph: Graph<InstanceNode> = Graph::new();
        let a = graph.add_node(InstanceNode::Param(Parameter::new(Domain::Boolean, Literal::Bool(BoolSet::both()))));
        let and_id =
            crate::expr::create_expression(&mut graph, ExprKind::And, vec![Operand::Node(a)], false).unwrap();
        let mut mutator = Mutator::new(&mut graph);
        mutator.replace_node_with_literal(a, &Literal::Bool(BoolSet::single(true)));
        let expr = mutator.graph().get(and_id).unwrap().as_expr().unwrap();
        assert!(matches!(expr.operands[0], Operand::Literal(Literal::Bool(_))));
        assert_eq!(mutator.graph().edges_of(and_id, Some(EdgeType::Operand)).count(), 0);
    }

    #[test]
    fn enum_domain_parameter_round_trips() {
        let mut graph: Graph<InstanceNode> = Graph::new();
        let within = Literal::Enum(EnumSet::from_members("Package", ["SOIC", "QFN"]));
        let id = graph.add_node(InstanceNode::Param(Parameter::new(Domain::Enum("Package".into()), within)));
        let mut mutator = Mutator::new(&mut graph);
        let bound = Literal::Enum(EnumSet::single("Package", "SOIC"));
        assert!(mutator.narrow_param(id, &bound).unwrap());
    }
}
