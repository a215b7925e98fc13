use crate::core::CoreError;
use crate::literal::Literal;

use super::domain::Domain;

/// A parameter node's constraint state (spec §3, §4.4 alias-class merge).
///
/// `within` is the hard, provable bound — narrowing it can only shrink the
/// solution space, never invalidate a previously proved fact. The remaining
/// fields are heuristic annotations carried across alias-class merges so a
/// downstream part-picker has something to rank by even when the solver
/// can't narrow `within` to a point (`original_source/.../defaultsolver.py`
/// attaches exactly this heuristic bundle to merged aliases).
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub domain: Domain,
    pub within: Literal,
    /// A narrower, non-provable estimate of where the real value will land.
    pub soft_set: Option<Literal>,
    /// A single representative value for e.g. default simulation.
    pub guess: Option<f64>,
    /// Expected relative spread of `guess`, as a fraction (0.05 = ±5%).
    pub tolerance_guess: Option<f64>,
    /// Set once a predicate folds to provably constrain this parameter, so a
    /// part-picker can prefer it over unconstrained siblings.
    pub likely_constrained: bool,
}

impl Parameter {
    pub fn new(domain: Domain, within: Literal) -> Self {
        Self {
            domain,
            within,
            soft_set: None,
            guess: None,
            tolerance_guess: None,
            likely_constrained: false,
        }
    }

    /// Merge two parameters known to be in the same alias class. `within` is
    /// intersected (both facts must hold); `soft_set` is intersected when
    /// both sides have one; `tolerance_guess` is the max (the more
    /// pessimistic estimate wins); `likely_constrained` is true if either
    /// side is.
    ///
    /// `guess` is *not* folded pairwise here: unlike the other fields,
    /// taking the class-wide median is not associative (a sequential
    /// pairwise mean over an alias class of three or more gives a different
    /// answer than the true median of all of them at once), so
    /// `solver::algorithms::resolve_alias_classes` computes it once over
    /// the whole class and overwrites the representative's `guess`
    /// afterward. This just carries whichever side already has one through
    /// so it's never silently dropped in between.
    pub fn merge(&self, other: &Parameter) -> Result<Parameter, CoreError> {
        if !self.domain.is_compatible(&other.domain) {
            return Err(CoreError::domain(
                self.domain.clone(),
                other.domain.clone(),
                "cannot merge parameters in the same alias class with incompatible domains",
            ));
        }
        let within = self.within.intersect(&other.within)?;
        let soft_set = match (&self.soft_set, &other.soft_set) {
            (Some(a), Some(b)) => Some(a.intersect(b)?),
            (Some(a), None) => Some(a.clone()),
            (None, Some(b)) => Some(b.clone()),
            (None, None) => None,
        };
        let guess = self.guess.or(other.guess);
        let tolerance_guess = match (self.tolerance_guess, other.tolerance_guess) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        };
        Ok(Parameter {
            domain: self.domain.clone(),
            within,
            soft_set,
            guess,
            tolerance_guess,
            likely_constrained: self.likely_constrained || other.likely_constrained,
        })
    }
}
