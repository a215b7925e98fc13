use std::fmt;

/// Arena index into a [`super::Graph`]. Stable for the lifetime of the node:
/// `remove_node` tombstones the slot rather than shifting indices, so a
/// `NodeId` captured before a removal never silently refers to a different
/// node afterwards (spec §4.1 determinism requirement).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// A node together with the arena-assigned id it was handed back. Returned by
/// `Graph::add_node` and by lookups so callers never have to re-derive the id
/// from a linear scan.
#[derive(Debug, Clone)]
pub struct BoundNode<T> {
    pub id: NodeId,
    pub payload: T,
}

impl<T> BoundNode<T> {
    pub fn new(id: NodeId, payload: T) -> Self {
        Self { id, payload }
    }
}
