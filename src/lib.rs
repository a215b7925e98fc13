//! Core symbolic engine for a hardware-description-language compiler: a
//! type/instance graph and the parameter constraint solver that narrows it.
//!
//! Module layout follows the data's own dependency order: `base` and `units`
//! have no crate-internal dependencies; `graph` builds on nothing but `base`;
//! `literal` and `param` build on `units` and `graph`'s `NodeId`; `typegraph`
//! and `instance` build the two graphs proper on top of those; `expr`,
//! `mutator`, and `solver` are the constraint engine; `bus` and `egress` are
//! the two build-time/output-facing layers on top of a solved instance graph.

pub mod base;
pub mod bus;
pub mod core;
pub mod egress;
pub mod expr;
pub mod graph;
pub mod instance;
#[cfg(feature = "interchange")]
pub mod interchange;
pub mod literal;
pub mod mutator;
pub mod param;
pub mod solver;
pub mod typegraph;
pub mod units;

pub use core::{CoreError, SolveError, SolverConfig};
pub use egress::PartDescriptor;
pub use expr::{ExprKind, Expression, Operand};
pub use graph::{Graph, NodeId};
pub use instance::InstanceGraph;
pub use literal::Literal;
pub use param::{Domain, Parameter};
pub use solver::{Solver, SolveOutcome};
pub use typegraph::TypeGraph;
