//! Type declarations: named types, their composition/trait slots, and the
//! linker that resolves cross-type references (spec §2, §4.2).

mod linker;
mod reference;
mod slot;
mod type_graph;
mod type_node;

pub use reference::{ReferencePath, TraversalStep, TypeRef};
pub use slot::{ChildSlot, SlotArity, TraitSlot};
pub use type_graph::TypeGraph;
pub use type_node::{LinkTemplate, TypeKind, TypeNode};
