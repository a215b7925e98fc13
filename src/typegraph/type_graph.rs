use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::core::CoreError;
use crate::graph::{Edge, EdgeType, Graph, NodeId};

use super::linker::{self, UnresolvedRefSite};
use super::reference::{ReferencePath, TypeRef};
use super::slot::{ChildSlot, SlotArity, TraitSlot};
use super::type_node::{LinkTemplate, TypeKind, TypeNode};

/// The declared type universe: one arena of [`TypeNode`]s plus the
/// name-to-id namespace and the backlog of not-yet-resolved [`TypeRef`]s
/// accumulated while types were declared (spec §2, §4.2).
///
/// Declaration (`add_type`/`add_make_child`/`add_make_trait`/`add_reference`/
/// `add_make_link`) and resolution (`reference_resolve`) are deliberately two
/// separate passes, so types can refer to each other regardless of
/// declaration order — the same two-pass shape as
/// `examples/jade-codes-syster-base/src/semantic/resolver/name_resolver.rs`.
#[derive(Debug, Default)]
pub struct TypeGraph {
    graph: Graph<TypeNode>,
    namespace: IndexMap<SmolStr, NodeId>,
    unresolved: Vec<UnresolvedRefSite>,
}

impl TypeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: NodeId) -> Option<&TypeNode> {
        self.graph.get(id)
    }

    pub fn graph(&self) -> &Graph<TypeNode> {
        &self.graph
    }

    pub fn resolve_by_name(&self, name: &str) -> Option<NodeId> {
        self.namespace.get(name).copied()
    }

    /// Declare a new named type. Errors if the name is already taken — the
    /// type graph never allows ambiguous declarations (spec §4.2 linker
    /// invariant: every name resolves to at most one node).
    pub fn add_type(&mut self, name: impl Into<SmolStr>, kind: TypeKind) -> Result<NodeId, CoreError> {
        let name = name.into();
        if self.namespace.contains_key(&name) {
            return Err(CoreError::graph(format!("duplicate type declaration: {name}")));
        }
        let id = self.graph.add_node(TypeNode::new(name.clone(), kind));
        self.namespace.insert(name, id);
        Ok(id)
    }

    /// Declare a composition child slot on `owner`. If `type_ref` is already
    /// resolved, also materializes the `Composition` edge immediately;
    /// otherwise the edge is added once `reference_resolve` resolves it.
    ///
    /// Fails when `name` is already used by a sibling slot on `owner` (spec
    /// §4.1 "Fails when: ... duplicate identifiers in the same composition
    /// parent").
    pub fn add_make_child(
        &mut self,
        owner: NodeId,
        name: impl Into<SmolStr>,
        type_ref: TypeRef,
        arity: SlotArity,
    ) -> Result<(), CoreError> {
        let name = name.into();
        let resolved = type_ref.resolved();
        let slot = ChildSlot {
            name: name.clone(),
            type_ref,
            arity,
        };
        let node = self
            .graph
            .get_mut(owner)
            .ok_or_else(|| CoreError::graph(format!("add_make_child: unknown owner {owner}")))?;
        if node.children.iter().any(|existing| existing.name == name) {
            return Err(CoreError::graph(format!(
                "add_make_child: duplicate child slot name {name:?} on {owner}"
            )));
        }
        let slot_index = node.children.len();
        node.children.push(slot);
        match resolved {
            Some(target) => {
                self.graph
                    .add_edge(Edge::new(EdgeType::Composition, owner, target));
            }
            None => self
                .unresolved
                .push(UnresolvedRefSite::Child { owner, slot_index }),
        }
        Ok(())
    }

    /// Errors unless `target` names a `TypeKind::Trait` node (spec §4.1
    /// "Fails when: edge types disagree with endpoint kinds (e.g., trait
    /// edge to non-trait target)").
    fn require_trait_kind(&self, target: NodeId) -> Result<(), CoreError> {
        match self.graph.get(target).map(|node| &node.kind) {
            Some(TypeKind::Trait) => Ok(()),
            Some(_) => Err(CoreError::graph(format!(
                "trait edge to non-trait target {target}"
            ))),
            None => Err(CoreError::graph(format!("unknown trait target {target}"))),
        }
    }

    /// Declare a trait slot on `owner`, symmetric to `add_make_child`.
    pub fn add_make_trait(
        &mut self,
        owner: NodeId,
        name: impl Into<SmolStr>,
        trait_ref: TypeRef,
    ) -> Result<(), CoreError> {
        let resolved = trait_ref.resolved();
        if let Some(target) = resolved {
            self.require_trait_kind(target)?;
        }
        let slot = TraitSlot::new(name, trait_ref);
        let node = self
            .graph
            .get_mut(owner)
            .ok_or_else(|| CoreError::graph(format!("add_make_trait: unknown owner {owner}")))?;
        let slot_index = node.traits.len();
        node.traits.push(slot);
        match resolved {
            Some(target) => {
                self.graph.add_edge(Edge::new(EdgeType::Trait, owner, target));
            }
            None => self
                .unresolved
                .push(UnresolvedRefSite::Trait { owner, slot_index }),
        }
        Ok(())
    }

    /// Record a reference path (spec §4.2) on `owner` under `name`, e.g. an
    /// alias exposing a nested child's attribute at the parent's level.
    pub fn add_reference(
        &mut self,
        owner: NodeId,
        name: impl Into<SmolStr>,
        _path: ReferencePath,
        target: TypeRef,
    ) -> Result<(), CoreError> {
        let resolved = target.resolved();
        let node = self
            .graph
            .get_mut(owner)
            .ok_or_else(|| CoreError::graph(format!("add_reference: unknown owner {owner}")))?;
        let ref_index = node.references.len();
        node.references.push((name.into(), target));
        if resolved.is_none() {
            self.unresolved
                .push(UnresolvedRefSite::Reference { owner, ref_index });
        }
        Ok(())
    }

    /// Declare a direct `Pointer` edge from `owner` to `target` once
    /// Declare a link template on `owner` (spec §4.2 `add_make_link(type_node,
    /// lhs_ref, rhs_ref, edge_kind)`): two reference paths, resolved relative
    /// to the same instantiated object and materialized as one `edge_kind`
    /// edge once `InstanceGraph::instantiate_node` realizes this type ("...
    /// then realizes link templates"). Grounded on
    /// `examples/original_source/src/faebryk/core/fabll.py`'s `_add_link`.
    pub fn add_make_link(
        &mut self,
        owner: NodeId,
        lhs: ReferencePath,
        rhs: ReferencePath,
        edge_kind: EdgeType,
    ) -> Result<(), CoreError> {
        let node = self
            .graph
            .get_mut(owner)
            .ok_or_else(|| CoreError::graph(format!("add_make_link: unknown owner {owner}")))?;
        node.link_templates.push(LinkTemplate { lhs, rhs, edge_kind });
        Ok(())
    }

    /// Resolve every outstanding [`TypeRef`], using `aliases` (import-alias
    /// name -> fully qualified name) for names not directly in the
    /// namespace. Materializes the `Composition`/`Trait`/`Pointer` edges that
    /// were deferred at declaration time. Same two-pass resolve shape as
    /// `import_resolver.rs`.
    pub fn reference_resolve(&mut self, aliases: &IndexMap<SmolStr, SmolStr>) -> Result<(), CoreError> {
        let pending = std::mem::take(&mut self.unresolved);
        for site in pending {
            match site {
                UnresolvedRefSite::Child { owner, slot_index } => {
                    let name = match &self.graph.get(owner).unwrap().children[slot_index].type_ref {
                        TypeRef::Unresolved(name) => name.clone(),
                        TypeRef::Resolved(_) => continue,
                    };
                    let target = linker::resolve_name(&self.namespace, aliases, &name)?;
                    self.graph.get_mut(owner).unwrap().children[slot_index].type_ref =
                        TypeRef::Resolved(target);
                    self.graph.add_edge(Edge::new(EdgeType::Composition, owner, target));
                }
                UnresolvedRefSite::Trait { owner, slot_index } => {
                    let name = match &self.graph.get(owner).unwrap().traits[slot_index].trait_ref {
                        TypeRef::Unresolved(name) => name.clone(),
                        TypeRef::Resolved(_) => continue,
                    };
                    let target = linker::resolve_name(&self.namespace, aliases, &name)?;
                    self.require_trait_kind(target)?;
                    self.graph.get_mut(owner).unwrap().traits[slot_index].trait_ref =
                        TypeRef::Resolved(target);
                    self.graph.add_edge(Edge::new(EdgeType::Trait, owner, target));
                }
                UnresolvedRefSite::Reference { owner, ref_index } => {
                    let name = match &self.graph.get(owner).unwrap().references[ref_index].1 {
                        TypeRef::Unresolved(name) => name.clone(),
                        TypeRef::Resolved(_) => continue,
                    };
                    let target = linker::resolve_name(&self.namespace, aliases, &name)?;
                    self.graph.get_mut(owner).unwrap().references[ref_index].1 =
                        TypeRef::Resolved(target);
                    self.graph.add_edge(Edge::new(EdgeType::Pointer, owner, target));
                }
            }
        }
        Ok(())
    }

    pub fn has_unresolved(&self) -> bool {
        !self.unresolved.is_empty()
    }
}
