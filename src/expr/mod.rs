//! The symbolic expression algebra over parameters (spec §3 "Expressions",
//! §4.3). An [`Expression`] is a node with an ordered list of [`Operand`]s
//! (parameters, literals, or other expressions); [`ExprKind`] tags which
//! algebraic or predicate shape it is.

mod domain;
mod expression;
mod factory;
mod kind;
mod operand;

pub use domain::infer_result_domain;
pub use expression::Expression;
pub use factory::{create_expression, create_predicate};
pub use kind::ExprKind;
pub use operand::Operand;
