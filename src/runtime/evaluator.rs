use super::arith::{self, OpError};
use super::value::Value;
use crate::config::EngineConfig;
use crate::error::{EvalError, EvalErrorKind};
use crate::parser::{Ast, Node, NodeKind};

/// Diagnostic context threaded through one evaluation
///
/// Holds the node currently being evaluated so errors can name it. Entering a
/// node hands back the previous occupant, which is restored when the node
/// finishes, whether it succeeded or failed.
#[derive(Debug, Default)]
pub struct EvalContext<'n> {
    current: Option<&'n Node>,
    depth: usize,
}

impl<'n> EvalContext<'n> {
    /// Context with no current node
    pub fn new() -> Self {
        EvalContext::default()
    }

    /// Node currently being evaluated
    pub fn current(&self) -> Option<&'n Node> {
        self.current
    }

    /// Number of nested evaluations in progress
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn enter(&mut self, node: &'n Node) -> Option<&'n Node> {
        self.depth += 1;
        self.current.replace(node)
    }

    fn leave(&mut self, previous: Option<&'n Node>) {
        self.depth -= 1;
        self.current = previous;
    }
}

/// Pending work on the evaluation stack
enum Task<'n> {
    /// Evaluate a node, scheduling its operands first
    Visit(&'n Node),
    /// Combine the two topmost operands, then leave `node`
    Apply {
        node: &'n Node,
        previous: Option<&'n Node>,
    },
}

/// Tree-walking evaluator
///
/// Reads the tree and its tokens without mutating either; every call returns
/// a fresh value owned by the caller. Nodes are walked with an explicit work
/// stack, so tree depth is bounded by memory rather than the native stack.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EngineConfig,
}

impl Evaluator {
    /// Creates an evaluator with the default configuration
    pub fn new() -> Self {
        Evaluator::default()
    }

    /// Creates an evaluator with a custom configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Evaluator { config }
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluates the whole tree
    pub fn eval(&self, ast: &Ast) -> Result<Value, EvalError> {
        let mut ctx = EvalContext::new();
        self.eval_node(ast, ast.root(), &mut ctx)
    }

    /// Evaluates `node` inside an existing context
    ///
    /// On return the context is back to the state it was passed in with.
    pub fn eval_node<'n>(
        &self,
        ast: &Ast,
        node: &'n Node,
        ctx: &mut EvalContext<'n>,
    ) -> Result<Value, EvalError> {
        let mut tasks = vec![Task::Visit(node)];
        let mut operands = Vec::new();

        while let Some(task) = tasks.pop() {
            if let Err(err) = self.step(ast, task, &mut tasks, &mut operands, ctx) {
                // Leave every operator still waiting on its operands, innermost first
                while let Some(task) = tasks.pop() {
                    if let Task::Apply { previous, .. } = task {
                        ctx.leave(previous);
                    }
                }
                return Err(err);
            }
        }

        match (operands.pop(), operands.is_empty()) {
            (Some(value), true) => Ok(value),
            _ => Err(fail(
                ast,
                ctx,
                EvalErrorKind::MalformedNode,
                "evaluation did not produce exactly one value",
            )),
        }
    }

    /// Runs one task; on error the context is left as it was before the task
    fn step<'n>(
        &self,
        ast: &Ast,
        task: Task<'n>,
        tasks: &mut Vec<Task<'n>>,
        operands: &mut Vec<Value>,
        ctx: &mut EvalContext<'n>,
    ) -> Result<(), EvalError> {
        match task {
            Task::Visit(node) => {
                let previous = ctx.enter(node);
                tracing::trace!(kind = ?node.kind(), depth = ctx.depth(), "eval");

                match self.schedule(ast, node, previous, tasks, operands, ctx) {
                    Ok(true) => Ok(()),
                    Ok(false) => {
                        ctx.leave(previous);
                        Ok(())
                    }
                    Err(err) => {
                        ctx.leave(previous);
                        Err(err)
                    }
                }
            }

            Task::Apply { node, previous } => {
                let result = match (operands.pop(), operands.pop()) {
                    (Some(b), Some(a)) => arith::apply(self.config.arithmetic, node.kind(), &a, &b)
                        .map_err(|OpError { kind, message }| fail(ast, ctx, kind, message)),
                    _ => Err(fail(
                        ast,
                        ctx,
                        EvalErrorKind::MalformedNode,
                        "missing operand",
                    )),
                };
                ctx.leave(previous);
                operands.push(result?);
                Ok(())
            }
        }
    }

    /// Handles a freshly entered node
    ///
    /// Leaves produce their value immediately and return `false`. Operators
    /// schedule their own application below visits of both operands and return
    /// `true`: they stay entered until that application runs.
    fn schedule<'n>(
        &self,
        ast: &Ast,
        node: &'n Node,
        previous: Option<&'n Node>,
        tasks: &mut Vec<Task<'n>>,
        operands: &mut Vec<Value>,
        ctx: &EvalContext<'n>,
    ) -> Result<bool, EvalError> {
        match node.kind() {
            NodeKind::Value => {
                let value = ast.value(node).cloned().ok_or_else(|| {
                    fail(
                        ast,
                        ctx,
                        EvalErrorKind::MalformedNode,
                        "value node does not reference a literal token",
                    )
                })?;
                operands.push(value);
                Ok(false)
            }

            NodeKind::Add | NodeKind::Sub | NodeKind::Mul | NodeKind::Div => match node.children() {
                [lhs, rhs] => {
                    tasks.push(Task::Apply { node, previous });
                    tasks.push(Task::Visit(rhs));
                    tasks.push(Task::Visit(lhs));
                    Ok(true)
                }
                children => Err(fail(
                    ast,
                    ctx,
                    EvalErrorKind::MalformedNode,
                    format!("expected 2 operands, found {}", children.len()),
                )),
            },

            NodeKind::Variable | NodeKind::If | NodeKind::For | NodeKind::Func => Err(fail(
                ast,
                ctx,
                EvalErrorKind::Unimplemented,
                format!("{:?} nodes cannot be evaluated", node.kind()),
            )),
        }
    }
}

/// Builds an error attributed to the context's current node
fn fail(ast: &Ast, ctx: &EvalContext, kind: EvalErrorKind, message: impl Into<String>) -> EvalError {
    let (node, position) = match ctx.current() {
        Some(node) => (node.kind(), ast.position(node)),
        None => (ast.root().kind(), ast.position(ast.root())),
    };
    EvalError {
        kind,
        node,
        position,
        message: message.into(),
    }
}
