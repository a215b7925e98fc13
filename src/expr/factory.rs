use crate::core::CoreError;
use crate::graph::{Edge, EdgeType, Graph, NodeId};
use crate::instance::InstanceNode;
use crate::param::Domain;

use super::domain::infer_result_domain;
use super::expression::Expression;
use super::kind::ExprKind;
use super::operand::Operand;

fn operand_domain(graph: &Graph<InstanceNode>, operand: &Operand) -> Result<Domain, CoreError> {
    match operand {
        Operand::Literal(lit) => Ok(lit.domain()),
        Operand::Node(id) => {
            let node = graph
                .get(*id)
                .ok_or_else(|| CoreError::graph(format!("operand references unknown node {id}")))?;
            match node {
                InstanceNode::Param(p) => Ok(p.domain.clone()),
                InstanceNode::Expr(e) => Ok(e.domain.clone()),
                InstanceNode::Object(_) => {
                    Err(CoreError::graph(format!("node {id} is an object, not an operatable")))
                }
            }
        }
    }
}

/// Create a new expression node, checking unit/domain compatibility
/// up-front (spec §4.3) and materializing an `Operand` edge for every
/// node-valued operand, in order (spec §3 "position is stable and
/// ordered").
pub fn create_expression(
    graph: &mut Graph<InstanceNode>,
    kind: ExprKind,
    operands: Vec<Operand>,
    constrained: bool,
) -> Result<NodeId, CoreError> {
    let operand_domains = operands
        .iter()
        .map(|op| operand_domain(graph, op))
        .collect::<Result<Vec<_>, _>>()?;
    let domain = infer_result_domain(kind, &operands, &operand_domains)?;

    let mut expr = Expression::new(kind, operands, domain);
    expr.constrained = constrained;
    let node_operands: Vec<NodeId> = expr.node_operands().collect();
    let id = graph.add_node(InstanceNode::Expr(expr));
    for target in node_operands {
        graph.add_edge(Edge::new(EdgeType::Operand, id, target));
    }
    Ok(id)
}

/// Convenience for the common binary-predicate shape (`Is`, `IsSubset`,
/// `GreaterOrEqual`).
pub fn create_predicate(
    graph: &mut Graph<InstanceNode>,
    kind: ExprKind,
    lhs: Operand,
    rhs: Operand,
    constrained: bool,
) -> Result<NodeId, CoreError> {
    create_expression(graph, kind, vec![lhs, rhs], constrained)
}
