//! Runtime: values and tree-walking evaluation

mod arith;
mod evaluator;
mod value;

pub use evaluator::{EvalContext, Evaluator};
pub use value::{TypeKind, Value};

use crate::error::EvalError;
use crate::parser::Ast;

/// Evaluates a tree with the default configuration
pub fn eval(ast: &Ast) -> Result<Value, EvalError> {
    Evaluator::new().eval(ast)
}
