//! Engine configuration

use serde::{Deserialize, Serialize};

/// How the arithmetic operators treat their operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArithmeticMode {
    /// `+ - * /` dispatch on operand kinds
    ///
    /// Two `Int`s give an `Int` (wrapping on overflow), a `Float` on either side
    /// gives a `Float`, anything non-numeric is a type mismatch. Integer
    /// division by zero is an error.
    #[default]
    Numeric,
    /// Raw-bit semantics of earlier releases
    ///
    /// `+` adds the 32-bit integer projections of its operands without looking
    /// at their kinds. `*` rejects non-numeric operands, then multiplies the
    /// integer projections too, so a `Float` operand contributes its raw IEEE
    /// bits. `-` and `/` have no evaluation and fail as unimplemented.
    Legacy,
}

/// Evaluation settings shared by every run of an [`Engine`](crate::Engine)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Operator semantics
    pub arithmetic: ArithmeticMode,
}

impl EngineConfig {
    /// Default configuration
    pub fn new() -> Self {
        EngineConfig::default()
    }

    /// Replaces the arithmetic mode
    pub fn with_arithmetic(mut self, arithmetic: ArithmeticMode) -> Self {
        self.arithmetic = arithmetic;
        self
    }

    /// Reads a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
