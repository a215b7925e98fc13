use smol_str::SmolStr;

use crate::graph::NodeId;

/// A name that resolves to a type-graph node, in one of two states: declared
/// by name before linking, or resolved to an arena id after
/// [`super::TypeGraph::reference_resolve`] runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Unresolved(SmolStr),
    Resolved(NodeId),
}

impl TypeRef {
    pub fn unresolved(name: impl Into<SmolStr>) -> Self {
        Self::Unresolved(name.into())
    }

    pub fn resolved(&self) -> Option<NodeId> {
        match self {
            TypeRef::Resolved(id) => Some(*id),
            TypeRef::Unresolved(_) => None,
        }
    }
}

/// One step of a reference path (spec §4.2): `parent.child[2].trait_name`
/// traverses as `[Child("parent"), Child("child"), Index(2), Trait("trait_name")]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraversalStep {
    Parent,
    Child(SmolStr),
    Index(usize),
    Trait(SmolStr),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReferencePath(pub Vec<TraversalStep>);

impl ReferencePath {
    pub fn new(steps: impl IntoIterator<Item = TraversalStep>) -> Self {
        Self(steps.into_iter().collect())
    }

    pub fn steps(&self) -> &[TraversalStep] {
        &self.0
    }
}
