use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::expr::Expression;
use crate::graph::NodeId;
use crate::literal::Literal;
use crate::param::Parameter;

/// A scalar or literal value stored in an [`ObjectInstance`]'s attribute bag
/// (spec §3: "attribute bag (keys are strings; values are scalars or literal
/// values)").
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Str(SmolStr),
    Int(i64),
    Float(f64),
    Bool(bool),
    Literal(Literal),
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(SmolStr::new(value))
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

/// A bound instance node: a module/interface/trait realized from a
/// [`crate::typegraph::TypeNode`] by
/// [`super::InstanceGraph::instantiate_node`].
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectInstance {
    pub type_id: NodeId,
    pub attrs: IndexMap<SmolStr, AttrValue>,
}

impl ObjectInstance {
    pub fn new(type_id: NodeId) -> Self {
        Self {
            type_id,
            attrs: IndexMap::new(),
        }
    }
}

/// The one node payload type backing the instance graph (spec §2, §3): a
/// realized object, a parameter, or an expression. Parameters and
/// expressions share the same arena as objects so `Operand`/`Trait`/
/// `Composition` edges can cross freely between them, matching spec §2's
/// single untyped directed multigraph underneath both graph "views".
#[derive(Debug, Clone, PartialEq)]
pub enum InstanceNode {
    Object(ObjectInstance),
    Param(Parameter),
    Expr(Expression),
}

impl InstanceNode {
    pub fn as_object(&self) -> Option<&ObjectInstance> {
        match self {
            InstanceNode::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_param(&self) -> Option<&Parameter> {
        match self {
            InstanceNode::Param(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_param_mut(&mut self) -> Option<&mut Parameter> {
        match self {
            InstanceNode::Param(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_expr(&self) -> Option<&Expression> {
        match self {
            InstanceNode::Expr(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_expr_mut(&mut self) -> Option<&mut Expression> {
        match self {
            InstanceNode::Expr(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_operatable(&self) -> bool {
        matches!(self, InstanceNode::Param(_) | InstanceNode::Expr(_))
    }
}
