use serde::{Deserialize, Serialize};
use std::fmt;

use crate::runtime::Value;

/// Kind tag of a [`Token`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Literal carrying an owned value
    Value,
    /// Identifier (reserved, never produced by the lexer)
    Ident,
    /// Keyword (reserved, never produced by the lexer)
    Keyword,
    /// Punctuator
    Punct,
    /// End of input (reserved, never produced by the lexer)
    End,
}

/// Reserved keywords, matched by exact text equality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeywordKind {
    /// `if`
    If,
    /// `else`
    Else,
    /// `for`
    For,
    /// `loop`
    Loop,
    /// `do`
    Do,
    /// `while`
    While,
    /// `switch`
    Switch,
    /// `var`
    Var,
    /// `func`
    Func,
}

const KEYWORDS: [(KeywordKind, &str); 9] = [
    (KeywordKind::If, "if"),
    (KeywordKind::Else, "else"),
    (KeywordKind::For, "for"),
    (KeywordKind::Loop, "loop"),
    (KeywordKind::Do, "do"),
    (KeywordKind::While, "while"),
    (KeywordKind::Switch, "switch"),
    (KeywordKind::Var, "var"),
    (KeywordKind::Func, "func"),
];

impl KeywordKind {
    /// Looks `text` up in the keyword table
    pub fn from_text(text: &str) -> Option<KeywordKind> {
        KEYWORDS
            .iter()
            .find(|(_, kw)| *kw == text)
            .map(|(kind, _)| *kind)
    }

    /// Source spelling of the keyword
    pub fn as_str(self) -> &'static str {
        KEYWORDS
            .iter()
            .find(|(kind, _)| *kind == self)
            .map_or("", |(_, kw)| kw)
    }
}

/// Payload of a token, selected by its kind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Lexeme {
    /// Literal; the token owns the value
    Value(Value),
    /// Identifier
    Ident,
    /// Keyword
    Keyword(KeywordKind),
    /// Punctuator; the spelling is the token text
    Punct,
    /// End of input
    End,
}

/// A single lexical unit
///
/// The text span is borrowed from the source, so the source must outlive every
/// token scanned from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token<'src> {
    lexeme: Lexeme,
    position: usize,
    text: &'src str,
}

impl<'src> Token<'src> {
    /// Creates a token from its parts
    pub fn new(lexeme: Lexeme, position: usize, text: &'src str) -> Self {
        Token {
            lexeme,
            position,
            text,
        }
    }

    /// Literal token owning `value`
    pub fn literal(value: Value, position: usize, text: &'src str) -> Self {
        Token::new(Lexeme::Value(value), position, text)
    }

    /// Punctuator token
    pub fn punct(position: usize, text: &'src str) -> Self {
        Token::new(Lexeme::Punct, position, text)
    }

    /// Identifier token
    pub fn ident(position: usize, text: &'src str) -> Self {
        Token::new(Lexeme::Ident, position, text)
    }

    /// Keyword token, if `text` is in the keyword table
    pub fn keyword(position: usize, text: &'src str) -> Option<Self> {
        KeywordKind::from_text(text).map(|kw| Token::new(Lexeme::Keyword(kw), position, text))
    }

    /// End-of-input marker
    pub fn end(position: usize) -> Self {
        Token::new(Lexeme::End, position, "")
    }

    /// Kind tag
    pub fn kind(&self) -> TokenKind {
        match self.lexeme {
            Lexeme::Value(_) => TokenKind::Value,
            Lexeme::Ident => TokenKind::Ident,
            Lexeme::Keyword(_) => TokenKind::Keyword,
            Lexeme::Punct => TokenKind::Punct,
            Lexeme::End => TokenKind::End,
        }
    }

    /// Payload
    pub fn lexeme(&self) -> &Lexeme {
        &self.lexeme
    }

    /// The owned value of a literal token
    pub fn value(&self) -> Option<&Value> {
        match &self.lexeme {
            Lexeme::Value(v) => Some(v),
            _ => None,
        }
    }

    /// The keyword of a keyword token
    pub fn keyword_kind(&self) -> Option<KeywordKind> {
        match self.lexeme {
            Lexeme::Keyword(kw) => Some(kw),
            _ => None,
        }
    }

    /// Byte offset of the first character
    pub fn position(&self) -> usize {
        self.position
    }

    /// Byte offset one past the last character
    pub fn end_position(&self) -> usize {
        self.position + self.text.len()
    }

    /// Source text of the token
    pub fn text(&self) -> &'src str {
        self.text
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.lexeme {
            Lexeme::End => write!(f, "end of input"),
            Lexeme::Value(_) => write!(f, "value `{}`", self.text),
            Lexeme::Ident => write!(f, "identifier `{}`", self.text),
            Lexeme::Keyword(_) => write!(f, "keyword `{}`", self.text),
            Lexeme::Punct => write!(f, "`{}`", self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_table() {
        assert_eq!(KeywordKind::from_text("if"), Some(KeywordKind::If));
        assert_eq!(KeywordKind::from_text("func"), Some(KeywordKind::Func));
        assert_eq!(KeywordKind::from_text("iff"), None);
        assert_eq!(KeywordKind::from_text("If"), None);
        assert_eq!(KeywordKind::from_text(""), None);
        assert_eq!(KeywordKind::While.as_str(), "while");
    }

    #[test]
    fn test_token_kinds() {
        let tok = Token::literal(Value::Int(12), 3, "12");
        assert_eq!(tok.kind(), TokenKind::Value);
        assert_eq!(tok.value(), Some(&Value::Int(12)));
        assert_eq!(tok.end_position(), 5);

        let tok = Token::punct(0, "<<=");
        assert_eq!(tok.kind(), TokenKind::Punct);
        assert!(tok.value().is_none());

        let tok = Token::keyword(0, "var").unwrap();
        assert_eq!(tok.kind(), TokenKind::Keyword);
        assert_eq!(tok.keyword_kind(), Some(KeywordKind::Var));
        assert!(Token::keyword(0, "x").is_none());

        assert_eq!(Token::ident(1, "x").kind(), TokenKind::Ident);
        assert_eq!(Token::end(7).kind(), TokenKind::End);
    }

    #[test]
    fn test_display() {
        assert_eq!(Token::punct(0, "+").to_string(), "`+`");
        assert_eq!(
            Token::literal(Value::Int(1), 0, "1").to_string(),
            "value `1`"
        );
        assert_eq!(Token::end(0).to_string(), "end of input");
    }
}
