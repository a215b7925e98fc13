//! Public solver surface: owns an [`InstanceGraph`] and runs the fixed
//! algorithm pipeline over it to fixpoint (spec §4.4, §4.5 "Inspection API",
//! §5 "fork").

use crate::core::{SolveError, SolverConfig};
use crate::graph::NodeId;
use crate::instance::{InstanceGraph, InstanceNode};
use crate::literal::Literal;
use crate::mutator::Mutator;

use super::outcome::SolveOutcome;
use super::pipeline;

/// Control-flow wrapper spec §3 describes as: "external code builds a type
/// graph, instantiates a root, attaches parameters and predicates, calls
/// `solver.simplify()` repeatedly until a fixpoint or contradiction, then
/// queries known supersets per parameter."
#[derive(Debug, Clone)]
pub struct Solver {
    instance: InstanceGraph,
    config: SolverConfig,
}

impl Solver {
    pub fn new(instance: InstanceGraph, config: SolverConfig) -> Self {
        Self { instance, config }
    }

    pub fn instance(&self) -> &InstanceGraph {
        &self.instance
    }

    pub fn instance_mut(&mut self) -> &mut InstanceGraph {
        &mut self.instance
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Run the algorithm pipeline to fixpoint, a pass cap, or a timeout
    /// (spec §4.5, §5 "Cancellation and timeouts").
    pub fn simplify(&mut self) -> Result<SolveOutcome, SolveError> {
        let mut mutator = Mutator::new(self.instance.graph_mut());
        pipeline::run(&mut mutator, &self.config)
    }

    /// A full logical copy for speculative queries (spec §5 "A solver fork
    /// creates a full logical copy of the graph so speculative queries...
    /// don't mutate the caller's state").
    pub fn fork(&self) -> Solver {
        Solver {
            instance: self.instance.clone(),
            config: self.config.clone(),
        }
    }

    /// The tightest known upper bound for `param` (spec §4.5 inspection
    /// API). `None` iff `param` isn't a live parameter node.
    pub fn inspect_get_known_supersets(&self, param: NodeId) -> Option<Literal> {
        self.instance.graph().get(param).and_then(InstanceNode::as_param).map(|p| p.within.clone())
    }

    /// `inspect_get_known_supersets`, but `None` when `param` hasn't
    /// actually narrowed below its declared domain's full range — a picker
    /// uses this to skip filtering an unconstrained parameter (spec §6
    /// egress: "used by a picker to filter catalog rows").
    pub fn extract_superset(&self, param: NodeId) -> Option<Literal> {
        let lit = self.inspect_get_known_supersets(param)?;
        let is_full_range = match &lit {
            Literal::Quantity(q) => {
                let intervals = q.intervals();
                intervals.len() == 1 && intervals[0].min == f64::NEG_INFINITY && intervals[0].max == f64::INFINITY
            }
            Literal::Bool(b) => b.is_single().is_none(),
            Literal::Enum(_) => false,
        };
        if is_full_range {
            None
        } else {
            Some(lit)
        }
    }

    pub fn is_predicate_true(&self, predicate: NodeId) -> bool {
        self.instance
            .graph()
            .get(predicate)
            .and_then(InstanceNode::as_expr)
            .is_some_and(|e| e.solver_true)
    }

    /// Try each of `predicates` by asserting it `constrained` on a fork and
    /// re-simplifying; a predicate survives without raising a contradiction
    /// is "provable true" under item 11's exclusion (spec §4.5
    /// `assert_any_predicate`; see DESIGN.md for why literal-truth deduction
    /// itself isn't implemented). When `lock` is set, provable predicates
    /// are committed onto `self` and `self` is re-simplified once.
    pub fn assert_any_predicate(&mut self, predicates: &[NodeId], lock: bool) -> Result<Vec<NodeId>, SolveError> {
        let mut proven = Vec::new();
        for &id in predicates {
            let mut trial = self.fork();
            let Some(expr) = trial.instance.graph_mut().get_mut(id).and_then(InstanceNode::as_expr_mut) else {
                continue;
            };
            expr.constrained = true;
            if trial.simplify().is_ok() {
                proven.push(id);
                if lock {
                    if let Some(expr) = self.instance.graph_mut().get_mut(id).and_then(InstanceNode::as_expr_mut) {
                        expr.constrained = true;
                        expr.solver_true = true;
                    }
                }
            }
        }
        if lock && !proven.is_empty() {
            self.simplify()?;
        }
        Ok(proven)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{create_predicate, ExprKind, Operand};
    use crate::literal::{Interval, QuantitySet};
    use crate::param::{Domain, Parameter};
    use crate::units::Unit;

    fn divider_instance() -> (InstanceGraph, NodeId, NodeId) {
        let mut ig = InstanceGraph::new();
        let v_in = ig.add_param(Parameter::new(
            Domain::Numbers(Unit::volt()),
            Literal::Quantity(QuantitySet::single(Unit::volt(), Interval::new(5.0, 5.0))),
        ));
        let v_out = ig.add_param(Parameter::new(
            Domain::Numbers(Unit::volt()),
            Literal::Quantity(QuantitySet::single(Unit::volt(), Interval::new(f64::NEG_INFINITY, f64::INFINITY))),
        ));
        (ig, v_in, v_out)
    }

    #[test]
    fn simplify_reaches_fixpoint_on_empty_graph() {
        let (ig, _, _) = divider_instance();
        let mut solver = Solver::new(ig, SolverConfig::default());
        let outcome = solver.simplify().unwrap();
        assert!(outcome.is_fixpoint());
    }

    #[test]
    fn extract_superset_is_none_for_unconstrained_parameter() {
        let (ig, _, v_out) = divider_instance();
        let solver = Solver::new(ig, SolverConfig::default());
        assert!(solver.extract_superset(v_out).is_none());
    }

    #[test]
    fn fork_does_not_mutate_original() {
        let (ig, _, v_out) = divider_instance();
        let solver = Solver::new(ig, SolverConfig::default());
        let mut fork = solver.fork();
        let bound = Literal::Quantity(QuantitySet::single(Unit::volt(), Interval::new(1.0, 2.0)));
        create_predicate(fork.instance_mut().graph_mut(), ExprKind::IsSubset, Operand::Node(v_out), Operand::Literal(bound), true).unwrap();
        fork.simplify().unwrap();
        assert!(solver.extract_superset(v_out).is_none());
        assert!(fork.extract_superset(v_out).is_some());
    }
}
