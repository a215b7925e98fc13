//! Runs the fixed algorithm list (spec §4.5) to fixpoint, honoring
//! `SolverConfig`'s timeout and pass cap (spec §5 "Cancellation and
//! timeouts").

use std::time::Instant;

use crate::core::{SolveError, SolverConfig};
use crate::mutator::Mutator;

use super::algorithms::{
    convert_inequality_with_literal_to_subset, convert_operable_aliased_to_single_into_literal,
    distribute_literals_across_alias_classes, empty_set, isolate_lone_params, merge_intersect_subsets,
    remove_congruent_expressions, remove_tautologies, remove_unconstrained, resolve_alias_classes, transitive_subset,
    uncorrelated_alias_fold, upper_estimation_of_expressions_with_subsets,
};
use super::associative::compress_associative;
use super::expression_wise;
use super::outcome::SolveOutcome;

type Algorithm = fn(&mut Mutator) -> Result<bool, SolveError>;

/// Canonical pipeline order (spec §4.5 items 1–10, 12–16; item 11 and the
/// other FIXME-marked source algorithms are not implemented, per
/// DESIGN.md's open-question decision; item 7 is `compress_associative`,
/// item 16 is the `expression_wise` dispatch).
const PIPELINE: &[(&str, Algorithm)] = &[
    ("convert_inequality_with_literal_to_subset", convert_inequality_with_literal_to_subset),
    ("remove_unconstrained", remove_unconstrained),
    ("remove_congruent_expressions", remove_congruent_expressions),
    ("resolve_alias_classes", resolve_alias_classes),
    ("distribute_literals_across_alias_classes", distribute_literals_across_alias_classes),
    ("merge_intersect_subsets", merge_intersect_subsets),
    ("compress_associative", compress_associative),
    ("empty_set", empty_set),
    ("upper_estimation_of_expressions_with_subsets", upper_estimation_of_expressions_with_subsets),
    ("transitive_subset", transitive_subset),
    ("convert_operable_aliased_to_single_into_literal", convert_operable_aliased_to_single_into_literal),
    ("isolate_lone_params", isolate_lone_params),
    ("uncorrelated_alias_fold", uncorrelated_alias_fold),
    ("remove_tautologies", remove_tautologies),
    ("expression_wise", expression_wise::run),
];

pub fn run(mutator: &mut Mutator, config: &SolverConfig) -> Result<SolveOutcome, SolveError> {
    let start = Instant::now();
    let mut passes: u32 = 0;
    loop {
        mutator.begin_pass();
        let mut elapsed_per_algorithm = Vec::with_capacity(PIPELINE.len());
        let mut last_algorithm = "";
        for (name, algorithm) in PIPELINE {
            if start.elapsed() > config.rewrite_timeout {
                return Ok(SolveOutcome::TimedOut {
                    passes,
                    last_algorithm,
                    elapsed_per_algorithm,
                });
            }
            let step_start = Instant::now();
            let changed = algorithm(mutator)?;
            elapsed_per_algorithm.push((*name, step_start.elapsed()));
            last_algorithm = name;
            if config.log_solving {
                tracing::debug!(algorithm = name, mutated = changed, "solver pipeline step");
            }
        }
        passes += 1;
        let mutated = mutator.mutated();
        if config.log_solving {
            tracing::info!(passes, mutated, "solver pipeline pass complete");
        }
        if !mutated {
            return Ok(SolveOutcome::Fixpoint { passes });
        }
        if config.max_passes.is_some_and(|max| passes >= max) {
            return Ok(SolveOutcome::MaxPassesReached { passes });
        }
    }
}
