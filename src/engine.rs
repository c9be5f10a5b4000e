//! Embedding entry point

use crate::config::EngineConfig;
use crate::error::Result;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::runtime::{Evaluator, Value};

/// Runs source text through lex, parse and eval
///
/// An engine keeps no state between runs besides its configuration, so one
/// instance can serve any number of independent [`run`](Engine::run) calls.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    evaluator: Evaluator,
}

impl Engine {
    /// Creates an engine with the default configuration
    pub fn new() -> Self {
        Engine::default()
    }

    /// Creates an engine with a custom configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Engine {
            evaluator: Evaluator::with_config(config),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        self.evaluator.config()
    }

    /// Evaluates `source` and returns the resulting value
    ///
    /// The first failing stage ends the run; its error is returned tagged with
    /// the stage and source position.
    pub fn run(&self, source: &str) -> Result<Value> {
        let tokens = Lexer::new(source).scan_tokens()?;
        tracing::debug!(tokens = tokens.len(), "lexed source");

        let ast = Parser::new(&tokens).parse()?;
        tracing::debug!(ast = %ast, "parsed expression");

        let value = self.evaluator.eval(&ast)?;
        tracing::debug!(result = %value, "evaluated expression");

        Ok(value)
    }
}
