//! Error types for the script engine
//!
//! Every stage fails fast on its first error. Nothing is recovered internally and
//! no partial result is produced; the failure is returned to the caller of
//! [`Engine::run`](crate::Engine::run) tagged with the stage that raised it.

use std::fmt;

use thiserror::Error;

use crate::parser::NodeKind;
use crate::runtime::TypeKind;

/// Pipeline stage that produced an [`EngineError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Source text to tokens
    Lex,
    /// Tokens to syntax tree
    Parse,
    /// Syntax tree to value
    Eval,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Stage::Lex => write!(f, "lex"),
            Stage::Parse => write!(f, "parse"),
            Stage::Eval => write!(f, "eval"),
        }
    }
}

/// No digit run and no punctuator matches at `position`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid token {found:?} at byte {position}")]
pub struct LexError {
    /// Byte offset of the offending character
    pub position: usize,
    /// The character no lexeme starts with
    pub found: char,
}

/// A structural expectation of the grammar was not met
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("syntax error at byte {position}: expected {expected}, found {found}")]
pub struct ParseError {
    /// Byte offset of the offending token, or of the end of input
    pub position: usize,
    /// Human-readable description of what the grammar required
    pub expected: String,
    /// Text of the token found instead, or `end of input`
    pub found: String,
}

impl ParseError {
    pub(crate) fn new(position: usize, expected: impl Into<String>, found: impl Into<String>) -> Self {
        ParseError {
            position,
            expected: expected.into(),
            found: found.into(),
        }
    }
}

/// Classification of evaluation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvalErrorKind {
    /// Operand kinds the operator cannot combine
    TypeMismatch,
    /// Node kind or operator without evaluation semantics
    Unimplemented,
    /// Integer division with a zero divisor
    DivisionByZero,
    /// Node shape does not match its kind (wrong arity, missing literal)
    MalformedNode,
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EvalErrorKind::TypeMismatch => write!(f, "type mismatch"),
            EvalErrorKind::Unimplemented => write!(f, "not implemented"),
            EvalErrorKind::DivisionByZero => write!(f, "division by zero"),
            EvalErrorKind::MalformedNode => write!(f, "malformed node"),
        }
    }
}

/// Evaluation failed at a specific node
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} in {node:?} node at byte {position}: {message}")]
pub struct EvalError {
    /// What went wrong
    pub kind: EvalErrorKind,
    /// Kind of the node being evaluated when the failure occurred
    pub node: NodeKind,
    /// Byte offset of the token that produced that node
    pub position: usize,
    /// Human-readable detail
    pub message: String,
}

/// A value accessor was used on a value of another kind
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("expected {expected}, got {found}")]
pub struct TypeError {
    /// Kind the accessor requires
    pub expected: TypeKind,
    /// Kind the value actually holds
    pub found: TypeKind,
}

/// Error returned by [`Engine::run`](crate::Engine::run)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Lexing failed
    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    /// Parsing failed
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Evaluation failed
    #[error("eval error: {0}")]
    Eval(#[from] EvalError),
}

impl EngineError {
    /// The stage that raised this error
    pub fn stage(&self) -> Stage {
        match self {
            EngineError::Lex(_) => Stage::Lex,
            EngineError::Parse(_) => Stage::Parse,
            EngineError::Eval(_) => Stage::Eval,
        }
    }

    /// Byte offset into the source the error refers to
    pub fn position(&self) -> Option<usize> {
        match self {
            EngineError::Lex(e) => Some(e.position),
            EngineError::Parse(e) => Some(e.position),
            EngineError::Eval(e) => Some(e.position),
        }
    }
}

/// Result type for engine operations
pub type Result<T, E = EngineError> = std::result::Result<T, E>;
