//! Binary arithmetic on runtime values

use super::value::{TypeKind, Value};
use crate::config::ArithmeticMode;
use crate::error::{EvalErrorKind, TypeError};
use crate::parser::NodeKind;

/// Operator failure, attributed to a node by the evaluator
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OpError {
    pub kind: EvalErrorKind,
    pub message: String,
}

impl OpError {
    fn new(kind: EvalErrorKind, message: impl Into<String>) -> Self {
        OpError {
            kind,
            message: message.into(),
        }
    }

    /// Prefixes the message with the operator and both operand kinds
    fn in_operation(mut self, op: &str, lhs: &Value, rhs: &Value) -> Self {
        self.message = format!(
            "cannot apply `{}` to {} and {}: {}",
            op,
            lhs.type_name(),
            rhs.type_name(),
            self.message
        );
        self
    }

    fn mismatch(op: &str, lhs: &Value, rhs: &Value) -> Self {
        OpError::new(
            EvalErrorKind::TypeMismatch,
            format!(
                "cannot apply `{}` to {} and {}",
                op,
                lhs.type_name(),
                rhs.type_name()
            ),
        )
    }
}

impl From<TypeError> for OpError {
    fn from(err: TypeError) -> Self {
        OpError::new(EvalErrorKind::TypeMismatch, err.to_string())
    }
}

/// Applies the binary operator `op` under `mode`
pub(crate) fn apply(
    mode: ArithmeticMode,
    op: NodeKind,
    lhs: &Value,
    rhs: &Value,
) -> Result<Value, OpError> {
    match mode {
        ArithmeticMode::Numeric => numeric(op, lhs, rhs),
        ArithmeticMode::Legacy => legacy(op, lhs, rhs),
    }
}

fn numeric(op: NodeKind, lhs: &Value, rhs: &Value) -> Result<Value, OpError> {
    let spelling = op.operator().unwrap_or("?");
    let read = |v: &Value| {
        operand(v).map_err(|err| OpError::from(err).in_operation(spelling, lhs, rhs))
    };

    match (read(lhs)?, read(rhs)?) {
        (Operand::Int(a), Operand::Int(b)) => int_op(op, a, b),
        (a, b) => float_op(op, a.to_f32(), b.to_f32()),
    }
}

/// A numeric operand read through the typed accessors
#[derive(Debug, Clone, Copy, PartialEq)]
enum Operand {
    Int(i32),
    Float(f32),
}

impl Operand {
    fn to_f32(self) -> f32 {
        match self {
            Operand::Int(n) => n as f32,
            Operand::Float(f) => f,
        }
    }
}

/// Floats read as floats; every other kind must read as an int
fn operand(v: &Value) -> Result<Operand, TypeError> {
    match v.kind() {
        TypeKind::Float => v.as_float().map(Operand::Float),
        _ => v.as_int().map(Operand::Int),
    }
}

fn int_op(op: NodeKind, a: i32, b: i32) -> Result<Value, OpError> {
    let n = match op {
        NodeKind::Add => a.wrapping_add(b),
        NodeKind::Sub => a.wrapping_sub(b),
        NodeKind::Mul => a.wrapping_mul(b),
        NodeKind::Div => {
            if b == 0 {
                return Err(OpError::new(
                    EvalErrorKind::DivisionByZero,
                    format!("{} / 0", a),
                ));
            }
            a.wrapping_div(b)
        }
        other => return Err(not_an_operator(other)),
    };
    Ok(Value::Int(n))
}

fn float_op(op: NodeKind, a: f32, b: f32) -> Result<Value, OpError> {
    let f = match op {
        NodeKind::Add => a + b,
        NodeKind::Sub => a - b,
        NodeKind::Mul => a * b,
        NodeKind::Div => a / b,
        other => return Err(not_an_operator(other)),
    };
    Ok(Value::Float(f))
}

fn legacy(op: NodeKind, lhs: &Value, rhs: &Value) -> Result<Value, OpError> {
    match op {
        NodeKind::Add => {
            let (a, b) = projections("+", lhs, rhs)?;
            Ok(Value::Int(a.wrapping_add(b)))
        }
        NodeKind::Mul => {
            if !lhs.is_numeric() || !rhs.is_numeric() {
                return Err(OpError::mismatch("*", lhs, rhs));
            }
            let (a, b) = projections("*", lhs, rhs)?;
            Ok(Value::Int(a.wrapping_mul(b)))
        }
        NodeKind::Sub | NodeKind::Div => Err(OpError::new(
            EvalErrorKind::Unimplemented,
            format!(
                "`{}` has no legacy evaluation",
                op.operator().unwrap_or("?")
            ),
        )),
        other => Err(not_an_operator(other)),
    }
}

/// Raw 32-bit integer reads of both operands
fn projections(op: &str, lhs: &Value, rhs: &Value) -> Result<(i32, i32), OpError> {
    match (lhs.int_projection(), rhs.int_projection()) {
        (Some(a), Some(b)) => {
            if !matches!(lhs, Value::Int(_)) || !matches!(rhs, Value::Int(_)) {
                tracing::warn!(
                    op,
                    lhs = lhs.type_name(),
                    rhs = rhs.type_name(),
                    "legacy arithmetic reading non-int operand as int"
                );
            }
            Ok((a, b))
        }
        _ => Err(OpError::mismatch(op, lhs, rhs)),
    }
}

fn not_an_operator(kind: NodeKind) -> OpError {
    OpError::new(
        EvalErrorKind::Unimplemented,
        format!("{:?} is not an arithmetic operator", kind),
    )
}
