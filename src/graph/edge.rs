use smol_str::SmolStr;

use super::node::NodeId;

/// The six structural edge kinds the type/instance graphs are built from
/// (spec §2, §4.1). `Composition` and `Trait` are the only kinds that form a
/// tree (the composition forest invariant only constrains `Composition`);
/// the rest are cross-cutting references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeType {
    /// Parent owns child (child count toward the composition forest).
    Composition,
    /// Node implements/carries a trait.
    Trait,
    /// Reference-path target after linking (e.g. a resolved import).
    Pointer,
    /// Expression node to one of its ordered operands.
    Operand,
    /// A node referring to itself in a predicate or alias (e.g. `a.alias(a)`).
    SelfRef,
    /// Sibling link between interface instances (e.g. bus member pairing).
    Sibling,
}

#[derive(Debug, Clone)]
pub struct Edge {
    pub kind: EdgeType,
    pub source: NodeId,
    pub target: NodeId,
    /// Slot name for `Composition`/`Trait` edges (child attribute name, trait
    /// name); unused (`None`) for the other kinds.
    pub label: Option<SmolStr>,
}

impl Edge {
    pub fn new(kind: EdgeType, source: NodeId, target: NodeId) -> Self {
        Self {
            kind,
            source,
            target,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<SmolStr>) -> Self {
        self.label = Some(label.into());
        self
    }
}
