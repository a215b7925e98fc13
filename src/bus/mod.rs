//! Bus-parameter trait resolution (spec §4.6): parameters on connected
//! module interfaces get one spanning predicate per bus per parameter name,
//! either `Is`-aliasing every member (`alias`) or bounding a sum (`sum`).

use std::collections::HashSet;

use smol_str::SmolStr;

use crate::core::CoreError;
use crate::expr::{create_expression, create_predicate, ExprKind, Operand};
use crate::graph::{Edge, EdgeType, NodeId};
use crate::instance::{AttrValue, InstanceGraph, InstanceNode};

/// How a bus parameter's members relate to each other (spec §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusStrategy {
    /// All connected interfaces' parameters with this name are constrained
    /// `Is` equal.
    Alias,
    /// `Σ sinks.param ≤ Σ sources.param`, split by each interface's `"role"`
    /// attribute (`"source"` or `"sink"`; interfaces without a recognized
    /// role are skipped for this parameter).
    Sum,
}

/// One parameter name a bus resolves.
#[derive(Debug, Clone)]
pub struct BusParameter {
    pub name: SmolStr,
    pub strategy: BusStrategy,
}

impl BusParameter {
    pub fn new(name: impl Into<SmolStr>, strategy: BusStrategy) -> Self {
        Self { name: name.into(), strategy }
    }
}

/// Connect two interface instances into the same electrical bus (spec §4.6
/// step 2's "connected" relation), recorded as a symmetric pair of
/// `Sibling` edges.
pub fn connect(instance: &mut InstanceGraph, a: NodeId, b: NodeId) {
    let graph = instance.graph_mut();
    graph.add_edge(Edge::new(EdgeType::Sibling, a, b));
    graph.add_edge(Edge::new(EdgeType::Sibling, b, a));
}

/// Reflexive-symmetric-transitive closure over `Sibling` edges starting at
/// `seed` (spec §4.6 step 2 "connected-to relation is reflexive, symmetric,
/// transitive over connected edges").
fn bus_of(instance: &InstanceGraph, seed: NodeId) -> Vec<NodeId> {
    let graph = instance.graph();
    let mut seen = HashSet::new();
    let mut stack = vec![seed];
    let mut members = Vec::new();
    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        members.push(id);
        for edge in graph.edges_of(id, Some(EdgeType::Sibling)) {
            if !seen.contains(&edge.target) {
                stack.push(edge.target);
            }
        }
    }
    members.sort();
    members
}

/// Every distinct bus among `interfaces` (spec §4.6 step 2), in the order
/// each bus's first-seen member appears in `interfaces`.
fn distinct_buses(instance: &InstanceGraph, interfaces: &[NodeId]) -> Vec<Vec<NodeId>> {
    let mut seen = HashSet::new();
    let mut buses = Vec::new();
    for &id in interfaces {
        if seen.contains(&id) {
            continue;
        }
        let bus = bus_of(instance, id);
        seen.extend(bus.iter().copied());
        buses.push(bus);
    }
    buses
}

fn named_child_param(instance: &InstanceGraph, interface: NodeId, name: &str) -> Option<NodeId> {
    let child = instance.composition_child(interface, name)?;
    instance.graph().get(child).and_then(InstanceNode::as_param)?;
    Some(child)
}

fn interface_role(instance: &InstanceGraph, interface: NodeId) -> Option<SmolStr> {
    let obj = instance.graph().get(interface).and_then(InstanceNode::as_object)?;
    match obj.attrs.get("role") {
        Some(AttrValue::Str(s)) => Some(s.clone()),
        _ => None,
    }
}

/// Run bus resolution (spec §4.6 steps 1–4) over `interfaces`, creating one
/// spanning predicate per bus per entry in `params`. Fails with
/// [`CoreError::not_implemented`] ("specialization on the same bus") if a
/// bus mixes incompatible domains on the same parameter name.
pub fn resolve_buses(instance: &mut InstanceGraph, interfaces: &[NodeId], params: &[BusParameter]) -> Result<Vec<NodeId>, CoreError> {
    let buses = distinct_buses(instance, interfaces);
    let mut predicates = Vec::new();
    for bus in &buses {
        for param in params {
            let members: Vec<(NodeId, NodeId)> = bus
                .iter()
                .filter_map(|&iface| named_child_param(instance, iface, &param.name).map(|p| (iface, p)))
                .collect();
            if members.len() < 2 {
                continue;
            }
            let first_domain = instance
                .graph()
                .get(members[0].1)
                .and_then(InstanceNode::as_param)
                .unwrap()
                .domain
                .clone();
            for &(_, p) in &members[1..] {
                let domain = &instance.graph().get(p).and_then(InstanceNode::as_param).unwrap().domain;
                if !domain.is_compatible(&first_domain) {
                    return Err(CoreError::not_implemented(format!(
                        "bus parameter {} mixes incompatible domains across its members",
                        param.name
                    )));
                }
            }
            match param.strategy {
                BusStrategy::Alias => {
                    let rep = members[0].1;
                    for &(_, other) in &members[1..] {
                        predicates.push(create_predicate(instance.graph_mut(), ExprKind::Is, Operand::Node(rep), Operand::Node(other), true)?);
                    }
                }
                BusStrategy::Sum => {
                    let sinks: Vec<NodeId> = members
                        .iter()
                        .filter(|(iface, _)| interface_role(instance, *iface).as_deref() == Some("sink"))
                        .map(|(_, p)| *p)
                        .collect();
                    let sources: Vec<NodeId> = members
                        .iter()
                        .filter(|(iface, _)| interface_role(instance, *iface).as_deref() == Some("source"))
                        .map(|(_, p)| *p)
                        .collect();
                    if sinks.is_empty() || sources.is_empty() {
                        continue;
                    }
                    let sink_sum = create_expression(instance.graph_mut(), ExprKind::Add, sinks.into_iter().map(Operand::Node).collect(), false)?;
                    let source_sum = create_expression(instance.graph_mut(), ExprKind::Add, sources.into_iter().map(Operand::Node).collect(), false)?;
                    predicates.push(create_predicate(
                        instance.graph_mut(),
                        ExprKind::GreaterOrEqual,
                        Operand::Node(source_sum),
                        Operand::Node(sink_sum),
                        true,
                    )?);
                }
            }
        }
    }
    Ok(predicates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param::Domain;
    use crate::typegraph::{SlotArity, TypeGraph, TypeKind, TypeRef};
    use crate::units::Unit;
    use indexmap::IndexMap;

    fn power_interface_type(tg: &mut TypeGraph) -> NodeId {
        let volts = tg.add_type("Volts", TypeKind::Parameter { domain: Domain::Numbers(Unit::volt()) }).unwrap();
        let iface = tg.add_type("Power", TypeKind::Interface).unwrap();
        tg.add_make_child(iface, "voltage", TypeRef::Resolved(volts), SlotArity::Single).unwrap();
        iface
    }

    #[test]
    fn alias_strategy_constrains_all_members_equal() {
        let mut tg = TypeGraph::new();
        let iface = power_interface_type(&mut tg);
        let mut ig = InstanceGraph::new();
        let a = ig.instantiate_node(&tg, iface, IndexMap::new()).unwrap();
        let b = ig.instantiate_node(&tg, iface, IndexMap::new()).unwrap();
        let c = ig.instantiate_node(&tg, iface, IndexMap::new()).unwrap();
        connect(&mut ig, a, b);
        connect(&mut ig, b, c);
        let predicates = resolve_buses(&mut ig, &[a, b, c], &[BusParameter::new("voltage", BusStrategy::Alias)]).unwrap();
        assert_eq!(predicates.len(), 2);
        for id in predicates {
            let expr = ig.graph().get(id).and_then(InstanceNode::as_expr).unwrap();
            assert_eq!(expr.kind, ExprKind::Is);
            assert!(expr.constrained);
        }
    }

    #[test]
    fn mismatched_domain_on_same_bus_is_rejected() {
        let mut tg = TypeGraph::new();
        let volts = tg.add_type("Volts", TypeKind::Parameter { domain: Domain::Numbers(Unit::volt()) }).unwrap();
        let ohms = tg.add_type("Ohms", TypeKind::Parameter { domain: Domain::Numbers(Unit::ohm()) }).unwrap();
        let iface_a = tg.add_type("PowerA", TypeKind::Interface).unwrap();
        tg.add_make_child(iface_a, "voltage", TypeRef::Resolved(volts), SlotArity::Single).unwrap();
        let iface_b = tg.add_type("PowerB", TypeKind::Interface).unwrap();
        tg.add_make_child(iface_b, "voltage", TypeRef::Resolved(ohms), SlotArity::Single).unwrap();
        let mut ig = InstanceGraph::new();
        let a = ig.instantiate_node(&tg, iface_a, IndexMap::new()).unwrap();
        let b = ig.instantiate_node(&tg, iface_b, IndexMap::new()).unwrap();
        connect(&mut ig, a, b);
        let err = resolve_buses(&mut ig, &[a, b], &[BusParameter::new("voltage", BusStrategy::Alias)]).unwrap_err();
        assert!(matches!(err, CoreError::NotImplemented { .. }));
    }

    #[test]
    fn unconnected_interfaces_form_separate_buses() {
        let mut tg = TypeGraph::new();
        let iface = power_interface_type(&mut tg);
        let mut ig = InstanceGraph::new();
        let a = ig.instantiate_node(&tg, iface, IndexMap::new()).unwrap();
        let b = ig.instantiate_node(&tg, iface, IndexMap::new()).unwrap();
        let predicates = resolve_buses(&mut ig, &[a, b], &[BusParameter::new("voltage", BusStrategy::Alias)]).unwrap();
        assert!(predicates.is_empty());
    }
}
