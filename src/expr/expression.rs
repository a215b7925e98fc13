use super::kind::ExprKind;
use super::operand::Operand;
use crate::param::Domain;

/// An expression node (spec §3 "Expressions", §4.3 "Expression creation").
///
/// `constrained` is the user/algorithm assertion flag; `solver_true` is set
/// once folding proves the expression's value (for predicates: proves it
/// true). The solver never mutates an `Expression` in place (spec §3
/// "Expression lifecycle") — [`crate::mutator::Mutator`] always produces a
/// new node and redirects references instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExprKind,
    pub operands: Vec<Operand>,
    pub domain: Domain,
    pub constrained: bool,
    pub solver_true: bool,
}

impl Expression {
    pub fn new(kind: ExprKind, operands: Vec<Operand>, domain: Domain) -> Self {
        Self {
            kind,
            operands,
            domain,
            constrained: false,
            solver_true: false,
        }
    }

    /// Structural equality used by `remove_congruent_expressions` (spec
    /// §4.5 item 3): same kind, same operand list (literal operands compared
    /// by value, node operands by identity — identity comparison is the
    /// caller's job since operands only hold [`crate::graph::NodeId`]s here).
    pub fn is_congruent_to(&self, other: &Expression) -> bool {
        self.kind == other.kind && self.operands == other.operands
    }

    pub fn literal_operand_count(&self) -> usize {
        self.operands.iter().filter(|op| op.is_literal()).count()
    }

    pub fn node_operands(&self) -> impl Iterator<Item = crate::graph::NodeId> + '_ {
        self.operands.iter().filter_map(Operand::as_node)
    }
}
