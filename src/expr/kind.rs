use std::fmt;

/// Tagged expression kinds (spec §3 "Expressions"). Each kind fixes the
/// shape checked by [`super::infer_result_domain`] when the expression is
/// created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExprKind {
    // Canonical arithmetic.
    Add,
    Multiply,
    Power,
    Log,
    Abs,
    Round,
    // Predicates.
    Is,
    IsSubset,
    GreaterOrEqual,
    // Set algebra.
    Intersection,
    Union,
    Correlated,
    // Boolean.
    And,
    Or,
    Not,
}

impl ExprKind {
    /// `Add`, `Multiply`, `And`, `Or`, `Union`, `Intersection` are fully
    /// associative and commutative (spec §3 "Associativity").
    pub fn is_fully_associative(self) -> bool {
        matches!(
            self,
            ExprKind::Add | ExprKind::Multiply | ExprKind::And | ExprKind::Or | ExprKind::Union | ExprKind::Intersection
        )
    }

    pub fn is_predicate(self) -> bool {
        matches!(self, ExprKind::Is | ExprKind::IsSubset | ExprKind::GreaterOrEqual)
    }

    /// Expressions whose result domain is always [`crate::param::Domain::Boolean`],
    /// regardless of operand domain (predicates and boolean connectives).
    pub fn is_boolean_valued(self) -> bool {
        self.is_predicate()
            || matches!(self, ExprKind::And | ExprKind::Or | ExprKind::Not | ExprKind::Correlated)
    }

    /// Fixed operand count, when the kind isn't N-ary. `None` means
    /// variadic (the fully-associative kinds, plus `Correlated` which takes
    /// 2+ operands).
    pub fn fixed_arity(self) -> Option<usize> {
        match self {
            ExprKind::Power | ExprKind::Is | ExprKind::IsSubset | ExprKind::GreaterOrEqual => Some(2),
            ExprKind::Log | ExprKind::Abs | ExprKind::Round | ExprKind::Not => Some(1),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ExprKind::Add => "Add",
            ExprKind::Multiply => "Multiply",
            ExprKind::Power => "Power",
            ExprKind::Log => "Log",
            ExprKind::Abs => "Abs",
            ExprKind::Round => "Round",
            ExprKind::Is => "Is",
            ExprKind::IsSubset => "IsSubset",
            ExprKind::GreaterOrEqual => "GreaterOrEqual",
            ExprKind::Intersection => "Intersection",
            ExprKind::Union => "Union",
            ExprKind::Correlated => "Correlated",
            ExprKind::And => "And",
            ExprKind::Or => "Or",
            ExprKind::Not => "Not",
        }
    }
}

impl fmt::Display for ExprKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
