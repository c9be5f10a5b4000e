//! Parser
//!
//! Builds a syntax tree from a token sequence by precedence climbing. The tree
//! borrows the tokens instead of copying them.

mod ast;
mod expr_parser;

pub use ast::{Ast, Node, NodeKind, TokenId};
pub use expr_parser::{Matcher, Parser};

use crate::error::ParseError;
use crate::lexer::Token;

/// Parses a complete token sequence into a tree
pub fn parse<'t, 'src>(tokens: &'t [Token<'src>]) -> Result<Ast<'t, 'src>, ParseError> {
    Parser::new(tokens).parse()
}
