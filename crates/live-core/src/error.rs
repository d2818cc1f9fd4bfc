#![forbid(unsafe_code)]

//! Error types for live value evaluation and configuration.

use thiserror::Error;

pub type Result<T, E = EvalError> = std::result::Result<T, E>;

/// A fault raised while evaluating a cell.
///
/// Faults propagate through composite cells unchanged: the outermost
/// [`try_resolve`](crate::Live::try_resolve) sees the first fault raised by
/// any operand. [`resolve`](crate::Live::resolve) turns a fault into a panic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("integer division by zero in `{operation}`")]
    DivisionByZero { operation: &'static str },

    #[error("integer overflow in `{operation}`")]
    Overflow { operation: &'static str },
}

impl EvalError {
    /// Name of the operation that faulted.
    #[must_use]
    pub fn operation(&self) -> &'static str {
        match self {
            Self::DivisionByZero { operation } | Self::Overflow { operation } => operation,
        }
    }
}

/// Invalid configuration input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid evaluation mode: {value:?} (expected \"live\" or \"frozen\")")]
    InvalidMode { value: String },

    #[error("invalid random seed: {value:?}")]
    InvalidSeed { value: String },
}
