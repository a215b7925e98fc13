//! The realized, per-design instance graph (spec §2 "Instance model", §4.2
//! "Instance nodes").

mod instance_graph;
mod node;

pub use instance_graph::InstanceGraph;
pub use node::{AttrValue, InstanceNode, ObjectInstance};
