//! Explicit solver configuration (spec §9 "Design Notes": global configuration
//! via env flags is replaced with an explicit struct).

use std::time::Duration;

/// Options controlling one `Solver::simplify` run.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Emit a `tracing::debug!` per algorithm pass reporting whether it mutated
    /// the graph, and a `tracing::info!` summarizing the whole run.
    pub log_solving: bool,
    /// Retain every intermediate mutator output graph instead of only the last
    /// one. Useful for debugging a solve that contradicts partway through.
    pub keep_intermediate_graphs: bool,
    /// Wall-clock budget for the whole pipeline. Polled between algorithms, not
    /// preemptive — an individual algorithm always finishes its current pass.
    pub rewrite_timeout: Duration,
    /// Hard cap on the number of full pipeline passes, independent of the
    /// timeout. `None` means uncapped (run to fixpoint or contradiction).
    pub max_passes: Option<u32>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            log_solving: false,
            keep_intermediate_graphs: false,
            rewrite_timeout: Duration::from_secs(5),
            max_passes: None,
        }
    }
}
