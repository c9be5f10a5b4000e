//! # script-engine - A minimal embeddable expression engine
//!
//! A small interpreter for integer arithmetic meant to be hosted inside another
//! program: the host hands over source text and gets back a [`Value`] or a
//! structured [`EngineError`].
//!
//! ## Quick Start
//!
//! ```rust
//! use script_engine::{Engine, Value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = Engine::new();
//! let result = engine.run("1 + 2 * 3")?;
//!
//! assert_eq!(result, Value::Int(7));
//! # Ok(())
//! # }
//! ```
//!
//! ## Language
//!
//! Decimal integer literals combined with `+ - * /`, left-associative, with
//! `*` and `/` binding tighter than `+` and `-`. The lexer also recognizes the
//! full punctuator set (`<<=`, `->`, `&&`, `[`, ...) and the token and syntax
//! tree types carry reserved kinds for identifiers, keywords, variables and
//! control flow, but nothing produces them yet.
//!
//! ## Architecture
//!
//! ```text
//! Source Code → Lexer → Tokens → Parser → Ast → Evaluator → Value
//! ```
//!
//! - [`Lexer`] - scans source text into [`Token`]s borrowing the source
//! - [`Parser`] - precedence climbing over the token slice into an [`Ast`]
//! - [`Evaluator`] - walks the tree and returns a fresh [`Value`]
//! - [`Engine`] - runs all three stages and tags failures with their [`Stage`]
//!
//! The stages can also be driven one at a time:
//!
//! ```rust
//! use script_engine::{eval, lex, parse, NodeKind, Value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let tokens = lex("2 * 3 * 4")?;
//! let ast = parse(&tokens)?;
//!
//! assert_eq!(ast.root().kind(), NodeKind::Mul);
//! assert_eq!(ast.to_string(), "(* (* 2 3) 4)");
//! assert_eq!(eval(&ast)?, Value::Int(24));
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every stage stops at its first error and nothing is recovered:
//!
//! ```rust
//! use script_engine::{Engine, Stage};
//!
//! let err = Engine::new().run("1 + @").unwrap_err();
//! assert_eq!(err.stage(), Stage::Lex);
//! assert_eq!(err.position(), Some(4));
//! ```
//!
//! ## Configuration
//!
//! [`EngineConfig`] selects the operator semantics. The default
//! [`ArithmeticMode::Numeric`] dispatches on operand kinds;
//! [`ArithmeticMode::Legacy`] keeps the earlier raw-bit semantics, where `+` and `*`
//! read every operand as a raw 32-bit integer and `-`/`/` are unimplemented.

pub mod config;
pub mod engine;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod runtime;

// Re-export main types
pub use config::{ArithmeticMode, EngineConfig};
pub use engine::Engine;
pub use error::{
    EngineError, EvalError, EvalErrorKind, LexError, ParseError, Result, Stage, TypeError,
};
pub use lexer::{lex, KeywordKind, Lexeme, Lexer, Token, TokenKind};
pub use parser::{parse, Ast, Matcher, Node, NodeKind, Parser, TokenId};
pub use runtime::{eval, EvalContext, Evaluator, TypeKind, Value};
