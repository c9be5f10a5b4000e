use serde::{Deserialize, Serialize};
use std::fmt;

use crate::lexer::Token;
use crate::runtime::Value;

/// Kind of a syntax tree node
///
/// `Variable`, `If`, `For` and `Func` are reserved: the parser never builds
/// them and the evaluator rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Literal value
    Value,
    /// Variable reference
    Variable,
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Conditional
    If,
    /// Loop
    For,
    /// Function definition
    Func,
}

impl NodeKind {
    /// Operator spelling of binary kinds
    pub fn operator(self) -> Option<&'static str> {
        match self {
            NodeKind::Add => Some("+"),
            NodeKind::Sub => Some("-"),
            NodeKind::Mul => Some("*"),
            NodeKind::Div => Some("/"),
            NodeKind::Value
            | NodeKind::Variable
            | NodeKind::If
            | NodeKind::For
            | NodeKind::Func => None,
        }
    }

    /// True for the four arithmetic operators
    pub fn is_binary(self) -> bool {
        self.operator().is_some()
    }
}

/// Index of a token in the sequence a tree was parsed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenId(pub usize);

impl TokenId {
    /// Position in the token slice
    pub fn index(self) -> usize {
        self.0
    }
}

/// A syntax tree node
///
/// Nodes own their children but none of the tokens or values they refer to;
/// the originating token (and for `Value` nodes, the literal it owns) is
/// addressed by index.
///
/// Operator chains parse into left-deep trees as deep as the chain is long, so
/// cloning, comparing, formatting and dropping all walk the tree with an
/// explicit stack instead of recursing.
pub struct Node {
    kind: NodeKind,
    token: TokenId,
    children: Vec<Node>,
}

impl Node {
    /// Creates a node from its parts
    pub fn new(kind: NodeKind, token: TokenId, children: Vec<Node>) -> Self {
        Node {
            kind,
            token,
            children,
        }
    }

    /// Literal leaf referencing the value owned by `token`
    pub fn value(token: TokenId) -> Self {
        Node::new(NodeKind::Value, token, Vec::new())
    }

    /// Binary operator node; children are kept in evaluation order
    pub fn binary(kind: NodeKind, token: TokenId, lhs: Node, rhs: Node) -> Self {
        Node::new(kind, token, vec![lhs, rhs])
    }

    /// Node kind
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Token that produced this node
    pub fn token(&self) -> TokenId {
        self.token
    }

    /// Children in evaluation order
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Left operand of a binary node
    pub fn lhs(&self) -> Option<&Node> {
        self.children.first()
    }

    /// Right operand of a binary node
    pub fn rhs(&self) -> Option<&Node> {
        self.children.get(1)
    }
}

impl Clone for Node {
    fn clone(&self) -> Self {
        enum Step<'a> {
            Enter(&'a Node),
            Build(&'a Node),
        }

        let mut steps: Vec<Step> = self.children.iter().rev().map(Step::Enter).collect();
        let mut built: Vec<Node> = Vec::with_capacity(self.children.len());

        while let Some(step) = steps.pop() {
            match step {
                Step::Enter(node) => {
                    steps.push(Step::Build(node));
                    steps.extend(node.children.iter().rev().map(Step::Enter));
                }
                Step::Build(node) => {
                    let children = built.split_off(built.len() - node.children.len());
                    built.push(Node::new(node.kind, node.token, children));
                }
            }
        }

        Node::new(self.kind, self.token, built)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        let mut pairs = vec![(self, other)];
        while let Some((a, b)) = pairs.pop() {
            if a.kind != b.kind || a.token != b.token || a.children.len() != b.children.len() {
                return false;
            }
            pairs.extend(a.children.iter().zip(&b.children));
        }
        true
    }
}

impl Eq for Node {}

impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Output queued while formatting a tree
enum Piece<'a> {
    Node(&'a Node),
    Text(&'static str),
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut pieces = vec![Piece::Node(self)];
        while let Some(piece) = pieces.pop() {
            match piece {
                Piece::Text(text) => f.write_str(text)?,
                Piece::Node(node) => {
                    write!(
                        f,
                        "Node {{ kind: {:?}, token: {:?}, children: [",
                        node.kind, node.token
                    )?;
                    pieces.push(Piece::Text("] }"));
                    for (i, child) in node.children.iter().enumerate().rev() {
                        pieces.push(Piece::Node(child));
                        if i > 0 {
                            pieces.push(Piece::Text(", "));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// A parsed expression together with the tokens it refers to
///
/// Borrowing the token slice ties the tree's lifetime to the tokens, so a node
/// can never outlive the literal it references.
#[derive(Debug, Clone)]
pub struct Ast<'t, 'src> {
    tokens: &'t [Token<'src>],
    root: Node,
}

impl<'t, 'src> Ast<'t, 'src> {
    /// Pairs a tree with the token sequence its ids index into
    pub fn new(tokens: &'t [Token<'src>], root: Node) -> Self {
        Ast { tokens, root }
    }

    /// Root node
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Backing token sequence
    pub fn tokens(&self) -> &'t [Token<'src>] {
        self.tokens
    }

    /// Token that produced `node`
    pub fn token(&self, node: &Node) -> Option<&'t Token<'src>> {
        self.tokens.get(node.token.index())
    }

    /// Literal referenced by a `Value` node
    pub fn value(&self, node: &Node) -> Option<&'t Value> {
        match node.kind {
            NodeKind::Value => self.token(node).and_then(Token::value),
            _ => None,
        }
    }

    /// Byte offset of the token that produced `node`
    pub fn position(&self, node: &Node) -> usize {
        self.token(node).map_or(0, Token::position)
    }
}

impl fmt::Display for Ast<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut pieces = vec![Piece::Node(&self.root)];
        while let Some(piece) = pieces.pop() {
            let node = match piece {
                Piece::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Piece::Node(node) => node,
            };

            if node.kind == NodeKind::Value {
                match self.token(node) {
                    Some(token) => f.write_str(token.text())?,
                    None => f.write_str("?")?,
                }
                continue;
            }

            match node.kind.operator() {
                Some(op) => write!(f, "({}", op)?,
                None => write!(f, "({:?}", node.kind)?,
            }
            pieces.push(Piece::Text(")"));
            for child in node.children.iter().rev() {
                pieces.push(Piece::Node(child));
                pieces.push(Piece::Text(" "));
            }
        }
        Ok(())
    }
}
