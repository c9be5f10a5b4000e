use super::token::Token;
use crate::error::LexError;
use crate::runtime::Value;

/// Punctuators in match priority order
///
/// Longer spellings precede every shorter spelling they start with, so the
/// first hit at a position is the longest one. `<<=` must be tried before `<<`,
/// and `<<` before `<`.
pub const PUNCTUATORS: [&str; 35] = [
    "<<=", ">>=", "->", "<<", ">>", "<=", ">=", "==", "!=", "..", "&&", "||", "<", ">", "+",
    "-", "/", "*", "%", "=", ";", ":", ",", ".", "[", "]", "(", ")", "{", "}", "!", "?", "&",
    "^", "|",
];

/// Single-pass scanner turning source text into tokens
pub struct Lexer<'src> {
    /// Source text being scanned
    source: &'src str,
    /// Accumulated tokens
    tokens: Vec<Token<'src>>,
    /// Byte offset of the cursor
    current: usize,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer over `source`
    pub fn new(source: &'src str) -> Self {
        Lexer {
            source,
            tokens: Vec::new(),
            current: 0,
        }
    }

    /// Scans the whole input
    ///
    /// Whitespace between lexemes is skipped. The first character that starts
    /// neither a digit run nor a punctuator aborts the scan.
    pub fn scan_tokens(mut self) -> Result<Vec<Token<'src>>, LexError> {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.current += c.len_utf8();
            } else if c.is_ascii_digit() {
                self.scan_number();
            } else if let Some(punct) = self.match_punct() {
                self.tokens.push(Token::punct(self.current, punct));
                self.current += punct.len();
            } else {
                return Err(LexError {
                    position: self.current,
                    found: c,
                });
            }
        }

        tracing::trace!(count = self.tokens.len(), "scanned tokens");
        Ok(self.tokens)
    }

    /// Consumes a maximal run of decimal digits
    ///
    /// The run is accumulated as `value * 10 + digit` in wrapping 32-bit
    /// arithmetic: there is no sign and no overflow check, so runs beyond
    /// `i32::MAX` wrap around (`2147483648` becomes `i32::MIN`).
    fn scan_number(&mut self) {
        let start = self.current;
        let len = self.source.as_bytes()[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        self.current += len;

        let text = &self.source[start..self.current];
        let value = text.bytes().fold(0i32, |acc, digit| {
            acc.wrapping_mul(10).wrapping_add(i32::from(digit - b'0'))
        });

        self.tokens.push(Token::literal(Value::Int(value), start, text));
    }

    fn match_punct(&self) -> Option<&'static str> {
        let rest = &self.source[self.current..];
        PUNCTUATORS.iter().copied().find(|p| rest.starts_with(p))
    }

    fn peek(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }
}
