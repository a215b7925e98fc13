use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::core::{CoreError, PathErrorKind};
use crate::graph::{Edge, EdgeType, Graph, NodeId};
use crate::literal::{BoolSet, Interval, Literal, QuantitySet};
use crate::param::{Domain, Parameter};
use crate::typegraph::{ReferencePath, SlotArity, TraversalStep, TypeGraph, TypeKind};

use super::node::{AttrValue, InstanceNode, ObjectInstance};

/// The realized, per-design graph (spec §2 "Instance nodes"): objects,
/// parameters, and expressions created from a [`TypeGraph`] by
/// [`InstanceGraph::instantiate_node`].
#[derive(Debug, Default, Clone)]
pub struct InstanceGraph {
    graph: Graph<InstanceNode>,
}

fn full_range_literal(type_graph: &TypeGraph, domain: &Domain) -> Literal {
    match domain {
        Domain::Numbers(unit) => Literal::Quantity(QuantitySet::single(
            unit.clone(),
            Interval::new(f64::NEG_INFINITY, f64::INFINITY),
        )),
        Domain::Enum(name) => {
            let members = type_graph
                .resolve_by_name(name)
                .and_then(|id| type_graph.node(id))
                .and_then(|node| match &node.kind {
                    TypeKind::Enum { members } => Some(members.clone()),
                    _ => None,
                })
                .unwrap_or_default();
            Literal::Enum(crate::literal::EnumSet::from_members(name.clone(), members))
        }
        Domain::Boolean => Literal::Bool(BoolSet::both()),
    }
}

fn path_segment_names(steps: &[TraversalStep]) -> Vec<SmolStr> {
    steps
        .iter()
        .map(|step| match step {
            TraversalStep::Parent => SmolStr::new("^"),
            TraversalStep::Child(name) => name.clone(),
            TraversalStep::Index(idx) => SmolStr::new(format!("[{idx}]")),
            TraversalStep::Trait(name) => SmolStr::new(format!("#{name}")),
        })
        .collect()
}

impl InstanceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn graph(&self) -> &Graph<InstanceNode> {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph<InstanceNode> {
        &mut self.graph
    }

    /// Instantiate `type_id` recursively: composition children, then trait
    /// instances (spec §4.2 "Instantiation recursively creates composition
    /// children and trait instances"). `Parameter`-kind types become bare
    /// [`Parameter`] nodes instead of objects; `attrs` only applies to the
    /// root object being created (children get an empty attribute bag —
    /// callers attach attributes to children post-hoc via their returned
    /// [`NodeId`]).
    pub fn instantiate_node(
        &mut self,
        type_graph: &TypeGraph,
        type_id: NodeId,
        attrs: IndexMap<SmolStr, AttrValue>,
    ) -> Result<NodeId, CoreError> {
        let type_node = type_graph
            .node(type_id)
            .ok_or_else(|| CoreError::graph(format!("instantiate_node: unknown type {type_id}")))?;

        match &type_node.kind {
            TypeKind::Parameter { domain } => {
                let within = full_range_literal(type_graph, domain);
                Ok(self.graph.add_node(InstanceNode::Param(Parameter::new(domain.clone(), within))))
            }
            TypeKind::Enum { .. } => Err(CoreError::graph(format!(
                "cannot instantiate enum type {} directly",
                type_node.name
            ))),
            TypeKind::Module | TypeKind::Interface | TypeKind::Trait => {
                let mut object = ObjectInstance::new(type_id);
                object.attrs = attrs;
                let children = type_node.children.clone();
                let traits = type_node.traits.clone();
                let link_templates = type_node.link_templates.clone();
                let id = self.graph.add_node(InstanceNode::Object(object));

                for slot in &children {
                    let child_type = slot.type_ref.resolved().ok_or_else(|| {
                        CoreError::path(PathErrorKind::MissingChild, vec![slot.name.clone()], 0)
                    })?;
                    match &slot.arity {
                        SlotArity::Single => {
                            let child = self.instantiate_node(type_graph, child_type, IndexMap::new())?;
                            self.graph.add_edge(
                                Edge::new(EdgeType::Composition, id, child).with_label(slot.name.clone()),
                            );
                        }
                        SlotArity::Count(count) => {
                            for i in 0..*count {
                                let child = self.instantiate_node(type_graph, child_type, IndexMap::new())?;
                                let label = format!("{}[{i}]", slot.name);
                                self.graph.add_edge(
                                    Edge::new(EdgeType::Composition, id, child).with_label(label),
                                );
                            }
                        }
                        SlotArity::Indexed(names) => {
                            for name in names {
                                let child = self.instantiate_node(type_graph, child_type, IndexMap::new())?;
                                let label = format!("{}[{name}]", slot.name);
                                self.graph.add_edge(
                                    Edge::new(EdgeType::Composition, id, child).with_label(label),
                                );
                            }
                        }
                    }
                }

                for trait_slot in &traits {
                    let trait_type = trait_slot.trait_ref.resolved().ok_or_else(|| {
                        CoreError::path(PathErrorKind::MissingTrait, vec![trait_slot.name.clone()], 0)
                    })?;
                    let trait_instance = self.instantiate_node(type_graph, trait_type, IndexMap::new())?;
                    self.graph.add_edge(
                        Edge::new(EdgeType::Trait, id, trait_instance).with_label(trait_slot.name.clone()),
                    );
                }

                // Link templates are realized last, once every composition
                // child and trait instance this type declares actually
                // exists, so both reference paths resolve against `id`
                // (spec §4.2 "Instantiation recursively creates composition
                // children and trait instances, then realizes link
                // templates").
                for link in &link_templates {
                    let lhs = self.reference_resolve(&link.lhs, id)?;
                    let rhs = self.reference_resolve(&link.rhs, id)?;
                    self.graph.add_edge(Edge::new(link.edge_kind, lhs, rhs));
                }

                Ok(id)
            }
        }
    }

    pub fn add_param(&mut self, param: Parameter) -> NodeId {
        self.graph.add_node(InstanceNode::Param(param))
    }

    /// The composition parent of `node`, if any (spec §4.1 "A node's parent
    /// edge (composition inbound) is O(1)").
    pub fn composition_parent(&self, node: NodeId) -> Option<NodeId> {
        self.graph
            .in_edges_of(node, Some(EdgeType::Composition))
            .next()
            .map(|edge| edge.source)
    }

    pub fn composition_child(&self, node: NodeId, label: &str) -> Option<NodeId> {
        self.graph
            .edges_of(node, Some(EdgeType::Composition))
            .find(|edge| edge.label.as_deref() == Some(label))
            .map(|edge| edge.target)
    }

    pub fn trait_instance(&self, node: NodeId, trait_name: &str) -> Option<NodeId> {
        self.graph
            .edges_of(node, Some(EdgeType::Trait))
            .find(|edge| edge.label.as_deref() == Some(trait_name))
            .map(|edge| edge.target)
    }

    /// Traverse a [`ReferencePath`] from `base` (spec §4.2
    /// `reference_resolve`), failing fast with the segment that couldn't be
    /// traversed.
    pub fn reference_resolve(&self, path: &ReferencePath, base: NodeId) -> Result<NodeId, CoreError> {
        let steps = path.steps();
        let names = path_segment_names(steps);
        let mut current = base;
        let mut i = 0;
        while i < steps.len() {
            match &steps[i] {
                TraversalStep::Parent => {
                    current = self.composition_parent(current).ok_or_else(|| {
                        CoreError::path(PathErrorKind::MissingParent, names.clone(), i)
                    })?;
                }
                TraversalStep::Child(name) => {
                    let mut label = name.to_string();
                    if let Some(TraversalStep::Index(idx)) = steps.get(i + 1) {
                        label = format!("{name}[{idx}]");
                        i += 1;
                    }
                    current = self.composition_child(current, &label).ok_or_else(|| {
                        CoreError::path(PathErrorKind::MissingChild, names.clone(), i)
                    })?;
                }
                TraversalStep::Index(_) => {
                    return Err(CoreError::path(PathErrorKind::InvalidIndex, names.clone(), i));
                }
                TraversalStep::Trait(name) => {
                    current = self.trait_instance(current, name).ok_or_else(|| {
                        CoreError::path(PathErrorKind::MissingTrait, names.clone(), i)
                    })?;
                }
            }
            i += 1;
        }
        Ok(current)
    }

    /// The hierarchical dotted name of `node` relative to `root` (spec §3
    /// "This defines hierarchical names like `a.b[2].c`"), by walking
    /// composition-parent edges from `node` up to `root`.
    pub fn dotted_path(&self, root: NodeId, node: NodeId) -> Option<String> {
        let mut segments = Vec::new();
        let mut current = node;
        while current != root {
            let parent = self.composition_parent(current)?;
            let label = self
                .graph
                .edges_of(parent, Some(EdgeType::Composition))
                .find(|edge| edge.target == current)
                .and_then(|edge| edge.label.clone())?;
            segments.push(label.to_string());
            current = parent;
        }
        segments.reverse();
        Some(segments.join("."))
    }

    /// Composition-DFS node order starting at `root`, the deterministic
    /// iteration order the solver and egress layer rely on (spec §6).
    pub fn composition_dfs(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            out.push(node);
            let children: Vec<NodeId> = self
                .graph
                .edges_of(node, Some(EdgeType::Composition))
                .map(|edge| edge.target)
                .collect();
            stack.extend(children.into_iter().rev());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typegraph::{SlotArity, TypeRef};
    use crate::units::Unit;

    fn build_divider() -> (TypeGraph, NodeId) {
        let mut tg = TypeGraph::new();
        let ohms = tg
            .add_type("Ohms", TypeKind::Parameter { domain: Domain::Numbers(Unit::ohm()) })
            .unwrap();
        let resistor = tg.add_type("Resistor", TypeKind::Module).unwrap();
        tg.add_make_child(resistor, "resistance", TypeRef::Resolved(ohms), SlotArity::Single)
            .unwrap();
        let divider = tg.add_type("VoltageDivider", TypeKind::Module).unwrap();
        tg.add_make_child(divider, "r_top", TypeRef::Resolved(resistor), SlotArity::Single)
            .unwrap();
        tg.add_make_child(divider, "r_bottom", TypeRef::Resolved(resistor), SlotArity::Single)
            .unwrap();
        (tg, divider)
    }

    #[test]
    fn instantiate_recurses_into_children_and_params() {
        let (tg, divider) = build_divider();
        let mut ig = InstanceGraph::new();
        let root = ig.instantiate_node(&tg, divider, IndexMap::new()).unwrap();
        let r_top = ig.composition_child(root, "r_top").unwrap();
        let resistance = ig.composition_child(r_top, "resistance").unwrap();
        assert!(ig.graph().get(resistance).unwrap().as_param().is_some());
        assert_eq!(ig.dotted_path(root, resistance).as_deref(), Some("r_top.resistance"));
    }

    #[test]
    fn reference_resolve_walks_child_then_parent() {
        let (tg, divider) = build_divider();
        let mut ig = InstanceGraph::new();
        let root = ig.instantiate_node(&tg, divider, IndexMap::new()).unwrap();
        let path = ReferencePath::new([
            TraversalStep::Child(SmolStr::new("r_top")),
            TraversalStep::Parent,
        ]);
        let resolved = ig.reference_resolve(&path, root).unwrap();
        assert_eq!(resolved, root);
    }

    #[test]
    fn missing_child_is_path_error() {
        let (tg, divider) = build_divider();
        let mut ig = InstanceGraph::new();
        let root = ig.instantiate_node(&tg, divider, IndexMap::new()).unwrap();
        let path = ReferencePath::new([TraversalStep::Child(SmolStr::new("nonexistent"))]);
        let err = ig.reference_resolve(&path, root).unwrap_err();
        assert!(matches!(err, CoreError::Path { kind: PathErrorKind::MissingChild, .. }));
    }

    /// Mirrors `examples/original_source/src/faebryk/core/fabll.py`'s
    /// `TestNodeWithChildren` (two plain children, `_add_link`ed pointer to
    /// pointer): a link template between two siblings materializes once
    /// instantiation has built both children.
    #[test]
    fn instantiate_realizes_link_templates_between_children() {
        let mut tg = TypeGraph::new();
        let leaf = tg.add_type("Leaf", TypeKind::Module).unwrap();
        let owner = tg.add_type("TestNodeWithChildren", TypeKind::Module).unwrap();
        tg.add_make_child(owner, "tnwa1", TypeRef::Resolved(leaf), SlotArity::Single)
            .unwrap();
        tg.add_make_child(owner, "tnwa2", TypeRef::Resolved(leaf), SlotArity::Single)
            .unwrap();
        tg.add_make_link(
            owner,
            ReferencePath::new([TraversalStep::Child(SmolStr::new("tnwa1"))]),
            ReferencePath::new([TraversalStep::Child(SmolStr::new("tnwa2"))]),
            EdgeType::Pointer,
        )
        .unwrap();

        let mut ig = InstanceGraph::new();
        let root = ig.instantiate_node(&tg, owner, IndexMap::new()).unwrap();
        let tnwa1 = ig.composition_child(root, "tnwa1").unwrap();
        let tnwa2 = ig.composition_child(root, "tnwa2").unwrap();

        let pointer = ig
            .graph()
            .edges_of(tnwa1, Some(EdgeType::Pointer))
            .next()
            .expect("link template should have materialized a Pointer edge");
        assert_eq!(pointer.target, tnwa2);
    }
}
