//! The parameter constraint solver (spec §4.4 "Mutator", §4.5 "Solver
//! pipeline"): a fixed, ordered list of rewrite algorithms run to fixpoint
//! over a [`mutator::Mutator`](crate::mutator::Mutator), plus the public
//! [`Solver`] surface and inspection API.

mod algorithms;
mod associative;
mod bound;
mod expression_wise;
mod outcome;
mod pipeline;
mod solver;

pub use bound::literal_bound_of;
pub use outcome::SolveOutcome;
pub use solver::Solver;
