//! Arena-backed graph primitives shared by [`crate::typegraph`] and
//! [`crate::instance`] (spec §2, §4.1).

mod edge;
mod graph;
mod node;

pub use edge::{Edge, EdgeType};
pub use graph::Graph;
pub use node::{BoundNode, NodeId};
