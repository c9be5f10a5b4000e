use super::ast::{Ast, Node, NodeKind, TokenId};
use crate::error::ParseError;
use crate::lexer::{KeywordKind, Token, TokenKind};

/// One test applied to the token at the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher<'a> {
    /// Exact token text
    Text(&'a str),
    /// Token kind
    Kind(TokenKind),
    /// Keyword token of the given keyword
    Keyword(KeywordKind),
}

/// Precedence-climbing recursive-descent parser
///
/// Grammar (left-associative):
///
/// ```text
/// expr   := term   (("+" | "-") term)*
/// term   := factor (("*" | "/") factor)*
/// factor := value
/// ```
pub struct Parser<'t, 'src> {
    tokens: &'t [Token<'src>],
    current: usize,
}

impl<'t, 'src> Parser<'t, 'src> {
    /// Creates a parser with the cursor on the first token
    pub fn new(tokens: &'t [Token<'src>]) -> Self {
        Parser { tokens, current: 0 }
    }

    /// Parses one expression spanning the whole token sequence
    ///
    /// An `End` token may close the sequence; anything after the expression
    /// other than a final `End` is reported as a trailing token.
    pub fn parse(mut self) -> Result<Ast<'t, 'src>, ParseError> {
        let root = self.parse_expr()?;

        self.eat_kind(TokenKind::End);
        if self.peek().is_some() {
            return Err(self.error("end of input"));
        }

        tracing::trace!(tokens = self.tokens.len(), "parsed expression");
        Ok(Ast::new(self.tokens, root))
    }

    /// Index of the token under the cursor
    pub fn cursor(&self) -> usize {
        self.current
    }

    fn parse_expr(&mut self) -> Result<Node, ParseError> {
        let mut lhs = self.parse_term()?;

        loop {
            let op = TokenId(self.current);
            let kind = if self.eat_text("+") {
                NodeKind::Add
            } else if self.eat_text("-") {
                NodeKind::Sub
            } else {
                break;
            };
            let rhs = self.parse_term()?;
            lhs = Node::binary(kind, op, lhs, rhs);
        }

        Ok(lhs)
    }

    fn parse_term(&mut self) -> Result<Node, ParseError> {
        let mut lhs = self.parse_factor()?;

        loop {
            let op = TokenId(self.current);
            let kind = if self.eat_text("*") {
                NodeKind::Mul
            } else if self.eat_text("/") {
                NodeKind::Div
            } else {
                break;
            };
            let rhs = self.parse_factor()?;
            lhs = Node::binary(kind, op, lhs, rhs);
        }

        Ok(lhs)
    }

    fn parse_factor(&mut self) -> Result<Node, ParseError> {
        let at = TokenId(self.current);
        if self.eat_kind(TokenKind::Value) {
            Ok(Node::value(at))
        } else {
            Err(self.error("value"))
        }
    }

    // Primitive matchers. Each tests the token under the cursor and advances
    // by exactly one token on success only.

    /// Matches a token whose text is exactly `text`
    pub fn eat_text(&mut self, text: &str) -> bool {
        self.eat(Matcher::Text(text))
    }

    /// Matches a token of kind `kind`
    pub fn eat_kind(&mut self, kind: TokenKind) -> bool {
        self.eat(Matcher::Kind(kind))
    }

    /// Matches a keyword token carrying `keyword`
    pub fn eat_keyword(&mut self, keyword: KeywordKind) -> bool {
        self.eat(Matcher::Keyword(keyword))
    }

    /// Applies a single matcher
    pub fn eat(&mut self, matcher: Matcher) -> bool {
        let hit = match (self.peek(), matcher) {
            (Some(token), Matcher::Text(text)) => token.text() == text,
            (Some(token), Matcher::Kind(kind)) => token.kind() == kind,
            (Some(token), Matcher::Keyword(kw)) => token.keyword_kind() == Some(kw),
            (None, _) => false,
        };
        if hit {
            self.current += 1;
        }
        hit
    }

    /// Matches every matcher in order, or nothing at all
    ///
    /// On any failure the cursor is restored to where it was before the call,
    /// including advances made by earlier matchers in the same sequence.
    pub fn eat_all(&mut self, matchers: &[Matcher]) -> bool {
        let saved = self.current;
        if matchers.iter().all(|m| self.eat(*m)) {
            true
        } else {
            self.current = saved;
            false
        }
    }

    fn peek(&self) -> Option<&'t Token<'src>> {
        self.tokens.get(self.current)
    }

    fn end_position(&self) -> usize {
        self.tokens.last().map_or(0, Token::end_position)
    }

    fn error(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::new(token.position(), expected, token.to_string()),
            None => ParseError::new(self.end_position(), expected, "end of input"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::runtime::Value;

    fn check(source: &str, expected: &str) {
        let tokens = Lexer::new(source).scan_tokens().unwrap();
        let ast = Parser::new(&tokens).parse().unwrap();
        assert_eq!(ast.to_string(), expected, "source: {}", source);
    }

    fn parse_err(source: &str) -> ParseError {
        let tokens = Lexer::new(source).scan_tokens().unwrap();
        Parser::new(&tokens).parse().unwrap_err()
    }

    #[test]
    fn test_mul_binds_tighter_than_add() {
        let tokens = Lexer::new("1 + 2 * 3").scan_tokens().unwrap();
        let ast = Parser::new(&tokens).parse().unwrap();

        let root = ast.root();
        assert_eq!(root.kind(), NodeKind::Add);
        assert_eq!(root.token(), TokenId(1));
        assert_eq!(root.children().len(), 2);

        let lhs = root.lhs().unwrap();
        assert_eq!(lhs.kind(), NodeKind::Value);
        assert_eq!(ast.value(lhs), Some(&Value::Int(1)));

        let rhs = root.rhs().unwrap();
        assert_eq!(rhs.kind(), NodeKind::Mul);
        assert_eq!(ast.value(rhs.lhs().unwrap()), Some(&Value::Int(2)));
        assert_eq!(ast.value(rhs.rhs().unwrap()), Some(&Value::Int(3)));
    }

    #[test]
    fn test_precedence_shapes() {
        check("7", "7");
        check("1 + 2 * 3", "(+ 1 (* 2 3))");
        check("1 * 2 + 3", "(+ (* 1 2) 3)");
        check("2 * 3 * 4", "(* (* 2 3) 4)");
        check("1 - 2 - 3", "(- (- 1 2) 3)");
        check("8 / 4 / 2", "(/ (/ 8 4) 2)");
        check("1 + 2 * 3 - 4 / 5", "(- (+ 1 (* 2 3)) (/ 4 5))");
    }

    #[test]
    fn test_missing_factor_at_end() {
        let err = parse_err("1 +");
        assert_eq!(err.position, 3);
        assert_eq!(err.expected, "value");
        assert_eq!(err.found, "end of input");
    }

    #[test]
    fn test_empty_input() {
        let err = parse_err("");
        assert_eq!(err.position, 0);
        assert_eq!(err.found, "end of input");
    }

    #[test]
    fn test_operator_in_factor_position() {
        let err = parse_err("+ 1");
        assert_eq!(err.position, 0);
        assert_eq!(err.expected, "value");
        assert_eq!(err.found, "`+`");

        let err = parse_err("1 * * 2");
        assert_eq!(err.position, 4);
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        let err = parse_err("1 2");
        assert_eq!(err.position, 2);
        assert_eq!(err.expected, "end of input");

        let err = parse_err("(1)");
        assert_eq!(err.position, 0);
    }

    #[test]
    fn test_end_token_terminates() {
        let tokens = vec![Token::literal(Value::Int(5), 0, "5"), Token::end(1)];
        let ast = Parser::new(&tokens).parse().unwrap();
        assert_eq!(ast.to_string(), "5");
    }

    #[test]
    fn test_tokens_after_end_are_trailing() {
        let tokens = vec![
            Token::literal(Value::Int(1), 0, "1"),
            Token::end(1),
            Token::literal(Value::Int(2), 2, "2"),
        ];
        let err = Parser::new(&tokens).parse().unwrap_err();
        assert_eq!(err.position, 2);
        assert_eq!(err.expected, "end of input");
        assert_eq!(err.found, "value `2`");

        let tokens = vec![
            Token::literal(Value::Int(1), 0, "1"),
            Token::end(1),
            Token::end(1),
        ];
        let err = Parser::new(&tokens).parse().unwrap_err();
        assert_eq!(err.found, "end of input");
    }

    #[test]
    fn test_end_in_factor_position() {
        let tokens = vec![
            Token::literal(Value::Int(1), 0, "1"),
            Token::punct(2, "+"),
            Token::end(3),
        ];
        let err = Parser::new(&tokens).parse().unwrap_err();
        assert_eq!(err.position, 3);
        assert_eq!(err.expected, "value");
        assert_eq!(err.found, "end of input");
    }

    #[test]
    fn test_long_chain_parses_left_deep() {
        let source = format!("1{}", "-1".repeat(100_000));
        let tokens = Lexer::new(&source).scan_tokens().unwrap();
        let ast = Parser::new(&tokens).parse().unwrap();

        let mut depth = 0;
        let mut node = ast.root();
        while let Some(lhs) = node.lhs() {
            assert_eq!(node.kind(), NodeKind::Sub);
            depth += 1;
            node = lhs;
        }
        assert_eq!(depth, 100_000);
        assert_eq!(ast.value(node), Some(&Value::Int(1)));
    }

    #[test]
    fn test_primitive_matchers() {
        let tokens = vec![
            Token::keyword(0, "var").unwrap(),
            Token::ident(4, "x"),
            Token::punct(6, "="),
            Token::literal(Value::Int(1), 8, "1"),
        ];
        let mut parser = Parser::new(&tokens);

        assert!(!parser.eat_keyword(KeywordKind::If));
        assert_eq!(parser.cursor(), 0);
        assert!(parser.eat_keyword(KeywordKind::Var));
        assert!(!parser.eat_text("y"));
        assert!(parser.eat_kind(TokenKind::Ident));
        assert!(parser.eat_text("="));
        assert!(parser.eat_kind(TokenKind::Value));
        assert_eq!(parser.cursor(), 4);
        assert!(!parser.eat_kind(TokenKind::Value));
        assert_eq!(parser.cursor(), 4);
    }

    #[test]
    fn test_eat_all_is_atomic() {
        let tokens = vec![
            Token::keyword(0, "var").unwrap(),
            Token::ident(4, "x"),
            Token::punct(6, "="),
        ];
        let mut parser = Parser::new(&tokens);

        let failing = [
            Matcher::Keyword(KeywordKind::Var),
            Matcher::Kind(TokenKind::Ident),
            Matcher::Text(";"),
        ];
        assert!(!parser.eat_all(&failing));
        assert_eq!(parser.cursor(), 0);

        let matching = [
            Matcher::Keyword(KeywordKind::Var),
            Matcher::Kind(TokenKind::Ident),
            Matcher::Text("="),
        ];
        assert!(parser.eat_all(&matching));
        assert_eq!(parser.cursor(), 3);
        assert!(parser.eat_all(&[]));
    }
}
