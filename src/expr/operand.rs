use crate::graph::NodeId;
use crate::literal::Literal;

/// One entry in an [`super::Expression`]'s ordered operand list: either a
/// live graph node (a parameter or another expression, linked by an
/// `Operand` edge so adjacency queries see it) or a bare literal value
/// (spec §3: "operands (parameters, literals, or other expressions)").
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Node(NodeId),
    Literal(Literal),
}

impl Operand {
    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Operand::Node(id) => Some(*id),
            Operand::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Operand::Literal(lit) => Some(lit),
            Operand::Node(_) => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Operand::Literal(_))
    }
}

impl From<NodeId> for Operand {
    fn from(id: NodeId) -> Self {
        Operand::Node(id)
    }
}

impl From<Literal> for Operand {
    fn from(lit: Literal) -> Self {
        Operand::Literal(lit)
    }
}
