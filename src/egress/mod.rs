//! Egress surface: the boundary between a solved instance graph and an
//! external part-picker or exporter (spec §6 "Egress").

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::core::{CoreError, SolveError};
use crate::expr::{create_predicate, ExprKind, Operand};
use crate::graph::NodeId;
use crate::instance::{InstanceGraph, InstanceNode};
use crate::literal::Literal;
use crate::solver::Solver;

/// A catalog part's fixed parameter values, as committed by a picker (spec
/// §6 "`attach_chosen_part` ... creates literal-alias predicates for each
/// parameter the part fixes").
#[derive(Debug, Clone)]
pub struct PartDescriptor {
    pub part_number: SmolStr,
    pub fixed_params: IndexMap<SmolStr, Literal>,
}

impl PartDescriptor {
    pub fn new(part_number: impl Into<SmolStr>) -> Self {
        Self {
            part_number: part_number.into(),
            fixed_params: IndexMap::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<SmolStr>, value: Literal) -> Self {
        self.fixed_params.insert(name.into(), value);
        self
    }
}

/// Errors `attach_chosen_part` can raise.
#[derive(Debug, thiserror::Error)]
pub enum AttachError {
    #[error("instance has no parameter named {0}")]
    UnknownParameter(SmolStr),
    #[error(transparent)]
    Solve(#[from] SolveError),
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Composition-DFS instances carrying a trait named `trait_name`, in
/// deterministic topological order (spec §6: "`iter_pickable(root)` yields
/// instances with a pickable trait in a deterministic topological order").
pub fn iter_pickable(instance: &InstanceGraph, root: NodeId, trait_name: &str) -> Vec<NodeId> {
    instance
        .composition_dfs(root)
        .into_iter()
        .filter(|&id| instance.trait_instance(id, trait_name).is_some())
        .collect()
}

/// Filter-ready bound for `parameter`, or `None` when it hasn't narrowed
/// below its full declared range (spec §6: "used by a picker to filter
/// catalog rows").
pub fn extract_superset(solver: &Solver, parameter: NodeId) -> Option<Literal> {
    solver.extract_superset(parameter)
}

/// The picker's commit point: assert `part`'s fixed values as literal-alias
/// predicates on `instance_node`'s matching child parameters, then
/// re-simplify (spec §6 "the solver re-runs simplification").
pub fn attach_chosen_part(solver: &mut Solver, instance_node: NodeId, part: &PartDescriptor) -> Result<(), AttachError> {
    for (name, value) in &part.fixed_params {
        let param = solver
            .instance()
            .composition_child(instance_node, name)
            .filter(|&id| solver.instance().graph().get(id).and_then(InstanceNode::as_param).is_some())
            .ok_or_else(|| AttachError::UnknownParameter(name.clone()))?;
        create_predicate(
            solver.instance_mut().graph_mut(),
            ExprKind::Is,
            Operand::Node(param),
            Operand::Literal(value.clone()),
            true,
        )?;
    }
    solver.simplify()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SolverConfig;
    use crate::literal::{Interval, QuantitySet};
    use crate::param::{Domain, Parameter};
    use crate::typegraph::{SlotArity, TypeGraph, TypeKind, TypeRef};
    use crate::units::Unit;

    fn resistor_instance() -> (InstanceGraph, NodeId) {
        let mut tg = TypeGraph::new();
        let ohms = tg.add_type("Ohms", TypeKind::Parameter { domain: Domain::Numbers(Unit::ohm()) }).unwrap();
        let pickable = tg.add_type("Pickable", TypeKind::Trait).unwrap();
        let resistor = tg.add_type("Resistor", TypeKind::Module).unwrap();
        tg.add_make_child(resistor, "resistance", TypeRef::Resolved(ohms), SlotArity::Single).unwrap();
        tg.add_make_trait(resistor, "pickable", TypeRef::Resolved(pickable)).unwrap();
        let mut ig = InstanceGraph::new();
        let root = ig.instantiate_node(&tg, resistor, indexmap::IndexMap::new()).unwrap();
        (ig, root)
    }

    #[test]
    fn iter_pickable_finds_trait_carrying_instance() {
        let (ig, root) = resistor_instance();
        let found = iter_pickable(&ig, root, "pickable");
        assert_eq!(found, vec![root]);
    }

    #[test]
    fn attach_chosen_part_narrows_matching_parameter() {
        let (ig, root) = resistor_instance();
        let mut solver = Solver::new(ig, SolverConfig::default());
        let part = PartDescriptor::new("RC0603-10K").with_param(
            "resistance",
            Literal::Quantity(QuantitySet::single(Unit::ohm(), Interval::new(10_000.0, 10_000.0))),
        );
        attach_chosen_part(&mut solver, root, &part).unwrap();
        let resistance = solver.instance().composition_child(root, "resistance").unwrap();
        let known = solver.extract_superset(resistance).unwrap();
        let Literal::Quantity(q) = known else { panic!() };
        assert_eq!(q.intervals(), &[Interval::new(10_000.0, 10_000.0)]);
    }

    #[test]
    fn attach_chosen_part_rejects_unknown_parameter_name() {
        let (ig, root) = resistor_instance();
        let mut solver = Solver::new(ig, SolverConfig::default());
        let part = PartDescriptor::new("RC0603-10K").with_param(
            "nonexistent",
            Literal::Quantity(QuantitySet::single(Unit::ohm(), Interval::new(10_000.0, 10_000.0))),
        );
        let err = attach_chosen_part(&mut solver, root, &part).unwrap_err();
        assert!(matches!(err, AttachError::UnknownParameter(_)));
    }
}
