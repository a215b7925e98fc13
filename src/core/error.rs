//! Error taxonomy for the core symbolic engine (spec §7).
//!
//! Build-time operations (graph mutation, type-graph declaration, linking)
//! return `Result<T, CoreError>`. The solver pipeline returns the narrower
//! `SolveError`, since only a subset of `CoreError` can occur mid-solve.

use smol_str::SmolStr;
use thiserror::Error;

use crate::literal::Literal;
use crate::param::Domain;

/// Segment kinds a reference path can fail to traverse (spec §4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathErrorKind {
    InvalidIndex,
    MissingParent,
    MissingChild,
    MissingTrait,
}

impl PathErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidIndex => "invalid_index",
            Self::MissingParent => "missing_parent",
            Self::MissingChild => "missing_child",
            Self::MissingTrait => "missing_trait",
        }
    }
}

/// Errors raised while declaring a type graph or building/mutating a graph.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Incompatible units in a numeric operation or alias class.
    #[error("unit error: {message}")]
    Unit { message: String },

    /// Incompatible domains in an alias class or expression.
    #[error("domain error: cannot unify {a:?} with {b:?}: {message}")]
    Domain {
        a: Domain,
        b: Domain,
        message: String,
    },

    /// Reference path traversal failed (spec §4.2).
    #[error("path error ({kind:?}) at segment {failing_segment_index} of {path:?}")]
    Path {
        kind: PathErrorKind,
        path: Vec<SmolStr>,
        failing_segment: SmolStr,
        failing_segment_index: usize,
    },

    /// Unresolved or ambiguous type reference during linking.
    #[error("linker error: {message}")]
    Linker { message: String },

    /// Provable literal incompatibility (e.g. disjoint subset bounds).
    #[error("contradiction: {message}")]
    ContradictionByLiteral {
        involved: Vec<crate::graph::NodeId>,
        literals: Vec<Literal>,
        message: String,
    },

    /// A constrained predicate was proved False by folding.
    #[error("predicate contradiction on node {predicate:?}")]
    PredicateContradiction { predicate: crate::graph::NodeId },

    /// Graph structural violation: duplicate identifier, edge to wrong kind, etc.
    #[error("graph error: {message}")]
    Graph { message: String },

    /// A combination the solver explicitly refuses to handle.
    #[error("not implemented: {message}")]
    NotImplemented { message: String },
}

impl CoreError {
    pub fn unit(message: impl Into<String>) -> Self {
        Self::Unit {
            message: message.into(),
        }
    }

    pub fn domain(a: Domain, b: Domain, message: impl Into<String>) -> Self {
        Self::Domain {
            a,
            b,
            message: message.into(),
        }
    }

    pub fn path(
        kind: PathErrorKind,
        path: Vec<SmolStr>,
        failing_segment_index: usize,
    ) -> Self {
        let failing_segment = path
            .get(failing_segment_index)
            .cloned()
            .unwrap_or_default();
        Self::Path {
            kind,
            path,
            failing_segment,
            failing_segment_index,
        }
    }

    pub fn linker(message: impl Into<String>) -> Self {
        Self::Linker {
            message: message.into(),
        }
    }

    pub fn graph(message: impl Into<String>) -> Self {
        Self::Graph {
            message: message.into(),
        }
    }

    pub fn not_implemented(message: impl Into<String>) -> Self {
        Self::NotImplemented {
            message: message.into(),
        }
    }
}

/// Errors a solver pass can raise (spec §4.5, §7 propagation policy).
///
/// `TimedOut` is deliberately not a variant here: the pipeline reports timeout
/// via `SolveOutcome`, not by raising, per spec §5.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error(transparent)]
    ContradictionByLiteral(#[from] ContradictionByLiteralInfo),

    #[error("predicate contradiction on node {0:?}")]
    PredicateContradiction(crate::graph::NodeId),

    #[error("not implemented: {0}")]
    NotImplemented(String),
}

/// Structured payload for a literal-level contradiction, carrying everything
/// spec §7 requires for a user-visible failure report.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ContradictionByLiteralInfo {
    pub involved: Vec<crate::graph::NodeId>,
    pub literals: Vec<Literal>,
    pub message: String,
}

impl From<CoreError> for SolveError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ContradictionByLiteral {
                involved,
                literals,
                message,
            } => SolveError::ContradictionByLiteral(ContradictionByLiteralInfo {
                involved,
                literals,
                message,
            }),
            CoreError::PredicateContradiction { predicate } => {
                SolveError::PredicateContradiction(predicate)
            }
            CoreError::NotImplemented { message } => SolveError::NotImplemented(message),
            other => SolveError::NotImplemented(other.to_string()),
        }
    }
}
