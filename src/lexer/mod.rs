//! Lexical analysis
//!
//! Converts source text into an ordered sequence of tokens in a single eager
//! left-to-right pass.

mod scanner;
mod token;

pub use scanner::{Lexer, PUNCTUATORS};
pub use token::{KeywordKind, Lexeme, Token, TokenKind};

use crate::error::LexError;

/// Scans `source` into tokens
pub fn lex(source: &str) -> Result<Vec<Token<'_>>, LexError> {
    Lexer::new(source).scan_tokens()
}
