use smol_str::SmolStr;

use crate::graph::EdgeType;
use crate::param::Domain;

use super::reference::{ReferencePath, TypeRef};
use super::slot::{ChildSlot, TraitSlot};

/// What kind of thing a `TypeNode` declares. `Module`/`Interface` both carry
/// composition children and traits; `Trait` and `Enum` are leaf declarations
/// (a `Trait` type may still extend other traits via `traits`; an `Enum`
/// carries its member list directly instead of child slots); `Parameter` is a
/// leaf declaration instantiated directly into a `param::Parameter` node,
/// bound to the given domain with no constraint beyond the domain's full
/// range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Module,
    Interface,
    Trait,
    Enum { members: Vec<SmolStr> },
    Parameter { domain: Domain },
}

/// A pair of reference paths plus the edge kind to materialize between
/// whatever they resolve to on an instantiated instance (spec §4.2
/// `add_make_link(type_node, lhs_ref, rhs_ref, edge_kind)`). Realized by
/// `InstanceGraph::instantiate_node` after composition children and trait
/// instances exist, since both paths are resolved relative to the instance
/// being built. Grounded on
/// `examples/original_source/src/faebryk/core/fabll.py`'s `_add_link`
/// (`lhs_reference_path`/`rhs_reference_path`/`edge`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTemplate {
    pub lhs: ReferencePath,
    pub rhs: ReferencePath,
    pub edge_kind: EdgeType,
}

/// A declared type: a name, its kind, and the composition/trait slots it
/// carries (spec §2). One `TypeNode` lives at each [`crate::graph::NodeId`]
/// in a [`super::TypeGraph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNode {
    pub name: SmolStr,
    pub kind: TypeKind,
    pub children: Vec<ChildSlot>,
    pub traits: Vec<TraitSlot>,
    /// Reference-path declarations owned by this type (e.g. aliasing a
    /// nested child's pin to a parent-level name). Resolved in place by
    /// `TypeGraph::reference_resolve`.
    pub references: Vec<(SmolStr, TypeRef)>,
    /// Link templates (spec §4.2 "Link templates"), realized as edges
    /// between this type's own children once `InstanceGraph::instantiate_node`
    /// has built them.
    pub link_templates: Vec<LinkTemplate>,
}

impl TypeNode {
    pub fn new(name: impl Into<SmolStr>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            children: Vec::new(),
            traits: Vec::new(),
            references: Vec::new(),
            link_templates: Vec::new(),
        }
    }
}
