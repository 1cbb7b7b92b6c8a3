//! Error types for calcpad-engine

use thiserror::Error;

/// Calculation errors
///
/// Every variant is raised before the engine mutates its state, so a caller
/// that catches one can keep rendering the previous display as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Right operand of `/` or `%` is exactly zero
    #[error("Cannot divide by zero")]
    DivisionByZero,

    /// Square root requested for a negative display value
    #[error("Cannot take the square root of a negative number")]
    NegativeSquareRoot,

    /// Display text is not a number (e.g. a lone `-` left over after backspace)
    #[error("Invalid operand: {0:?}")]
    InvalidOperand(String),
}

impl CalcError {
    pub fn invalid_operand(text: impl Into<String>) -> Self {
        Self::InvalidOperand(text.into())
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
