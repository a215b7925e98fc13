//! The transactional rewriter a solver pass runs its algorithms against
//! (spec §4.4).

mod mutator;
mod union_find;

pub use mutator::Mutator;
pub use union_find::EquivalenceClasses;
