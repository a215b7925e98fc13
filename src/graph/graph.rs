use super::edge::{Edge, EdgeType};
use super::node::{BoundNode, NodeId};

/// Generic arena-backed graph shared by the type graph and the instance graph
/// (spec §2: "the same graph machinery backs both"). `T` is the per-node
/// payload — `typegraph` and `instance` each supply their own node enum.
///
/// Nodes are stored by index and never physically removed: `remove_node`
/// tombstones the slot so previously issued `NodeId`s never alias a different
/// node, and iteration order over live nodes stays insertion order (spec
/// determinism invariant).
#[derive(Debug, Clone)]
pub struct Graph<T> {
    nodes: Vec<Option<T>>,
    edges: Vec<Option<Edge>>,
    out_adj: Vec<Vec<usize>>,
    in_adj: Vec<Vec<usize>>,
}

impl<T> Default for Graph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Graph<T> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            out_adj: Vec::new(),
            in_adj: Vec::new(),
        }
    }

    pub fn add_node(&mut self, payload: T) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Some(payload));
        self.out_adj.push(Vec::new());
        self.in_adj.push(Vec::new());
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id.index()).and_then(|slot| slot.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id.index()).and_then(|slot| slot.as_mut())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn bind(&self, id: NodeId) -> Option<BoundNode<&T>> {
        self.get(id).map(|payload| BoundNode::new(id, payload))
    }

    /// Tombstones `id` and drops every edge touching it. Returns the payload
    /// if the node was live.
    pub fn remove_node(&mut self, id: NodeId) -> Option<T> {
        let removed = self.nodes.get_mut(id.index())?.take()?;
        let touching: Vec<usize> = self.out_adj[id.index()]
            .iter()
            .chain(self.in_adj[id.index()].iter())
            .copied()
            .collect();
        for edge_idx in touching {
            self.remove_edge_index(edge_idx);
        }
        self.out_adj[id.index()].clear();
        self.in_adj[id.index()].clear();
        Some(removed)
    }

    pub fn add_edge(&mut self, edge: Edge) -> usize {
        let idx = self.edges.len();
        let (source, target) = (edge.source, edge.target);
        self.edges.push(Some(edge));
        self.out_adj[source.index()].push(idx);
        self.in_adj[target.index()].push(idx);
        idx
    }

    fn remove_edge_index(&mut self, idx: usize) {
        if let Some(edge) = self.edges[idx].take() {
            self.out_adj[edge.source.index()].retain(|&e| e != idx);
            self.in_adj[edge.target.index()].retain(|&e| e != idx);
        }
    }

    /// Outgoing edges from `id`, optionally filtered to one [`EdgeType`], in
    /// insertion order.
    pub fn edges_of(&self, id: NodeId, kind: Option<EdgeType>) -> impl Iterator<Item = &Edge> {
        self.out_adj
            .get(id.index())
            .into_iter()
            .flatten()
            .filter_map(move |&idx| self.edges[idx].as_ref())
            .filter(move |edge| kind.is_none_or(|k| edge.kind == k))
    }

    /// Incoming edges into `id`, optionally filtered to one [`EdgeType`].
    pub fn in_edges_of(&self, id: NodeId, kind: Option<EdgeType>) -> impl Iterator<Item = &Edge> {
        self.in_adj
            .get(id.index())
            .into_iter()
            .flatten()
            .filter_map(move |&idx| self.edges[idx].as_ref())
            .filter(move |edge| kind.is_none_or(|k| edge.kind == k))
    }

    /// All live node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(idx, _)| NodeId(idx as u32))
    }

    /// Live node ids whose payload matches `pred`, in insertion order. The
    /// type graph and instance graph use this to look up nodes by their own
    /// per-payload notion of "kind" (e.g. all `TypeNode::Interface`s).
    pub fn nodes_of_type(&self, pred: impl Fn(&T) -> bool) -> Vec<NodeId> {
        self.node_ids().filter(|&id| pred(self.get(id).unwrap())).collect()
    }

    pub fn len(&self) -> usize {
        self.node_ids().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Retarget every `kind`-typed edge pointing at `old_target` to point at
    /// `new_target` instead, used by the mutator to redirect references
    /// before tombstoning a node (spec §4.4 "redirect aliases").
    pub fn retarget_edges(&mut self, kind: EdgeType, old_target: NodeId, new_target: NodeId) {
        if old_target == new_target {
            return;
        }
        let old_idx = old_target.index();
        let matching: Vec<usize> = self.in_adj[old_idx]
            .iter()
            .copied()
            .filter(|&idx| self.edges[idx].as_ref().is_some_and(|e| e.kind == kind))
            .collect();
        if matching.is_empty() {
            return;
        }
        self.in_adj[old_idx].retain(|idx| !matching.contains(idx));
        for &idx in &matching {
            if let Some(edge) = self.edges[idx].as_mut() {
                edge.target = new_target;
            }
        }
        self.in_adj[new_target.index()].extend(matching);
    }

    /// Remove every `kind`-typed edge directly between `source` and
    /// `target`, used when an operand reference is replaced by a bare
    /// literal (the edge no longer corresponds to any live operand).
    pub fn remove_edges_between(&mut self, source: NodeId, target: NodeId, kind: EdgeType) {
        let matching: Vec<usize> = self.out_adj[source.index()]
            .iter()
            .copied()
            .filter(|&idx| {
                self.edges[idx]
                    .as_ref()
                    .is_some_and(|e| e.kind == kind && e.target == target)
            })
            .collect();
        for idx in matching {
            self.remove_edge_index(idx);
        }
    }
}
