//! Calculator state and operators
//!
//! The pending left operand and its operator live together in [`Pending`],
//! so an operator without an operand cannot be represented.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CalcError, Result};

/// Display text on construction and after `clear`
pub const INITIAL_DISPLAY: &str = "0";

/// Operators available on the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
    #[serde(rename = "^")]
    Power,
    #[serde(rename = "%")]
    Remainder,
    /// Unary, applied in place and never left pending
    #[serde(rename = "√")]
    SquareRoot,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
        Operation::Power,
        Operation::Remainder,
        Operation::SquareRoot,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Power => "^",
            Self::Remainder => "%",
            Self::SquareRoot => "√",
        }
    }

    /// Apply a binary operator to `lhs` and `rhs`
    ///
    /// `/` and `%` reject an exact zero divisor. `%` keeps the sign of the
    /// dividend. A pending `√` passes `rhs` through unchanged.
    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64> {
        match self {
            Self::Add => Ok(lhs + rhs),
            Self::Subtract => Ok(lhs - rhs),
            Self::Multiply => Ok(lhs * rhs),
            Self::Divide => {
                if rhs == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                Ok(lhs / rhs)
            },
            Self::Power => Ok(lhs.powf(rhs)),
            Self::Remainder => {
                if rhs == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                Ok(lhs % rhs)
            },
            Self::SquareRoot => Ok(rhs),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unknown operator symbol
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown operator: {0:?}")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "+" => Ok(Self::Add),
            "-" => Ok(Self::Subtract),
            "*" => Ok(Self::Multiply),
            "/" => Ok(Self::Divide),
            "^" => Ok(Self::Power),
            "%" => Ok(Self::Remainder),
            "√" | "sqrt" => Ok(Self::SquareRoot),
            other => Err(UnknownOperation(other.to_string())),
        }
    }
}

/// Left operand captured when an operator was selected
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pending {
    pub value: f64,
    pub operation: Operation,
}

/// Logical position in the operator-entry state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing typed yet, or a result is shown with nothing pending
    Idle,
    /// An operand is being typed
    OperandPending,
    /// An operator was selected and awaits its right operand
    OperatorPending,
}

/// Mutable engine state, owned by a single [`Calculator`](crate::Calculator)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    pub display: String,
    pub pending: Option<Pending>,
    /// Next digit starts a fresh operand instead of extending `display`
    pub waiting_for_new_value: bool,
}

impl CalculatorState {
    pub fn phase(&self) -> Phase {
        match (self.pending, self.waiting_for_new_value) {
            (Some(_), true) => Phase::OperatorPending,
            (Some(_), false) => Phase::OperandPending,
            (None, false) if self.display != INITIAL_DISPLAY => Phase::OperandPending,
            (None, _) => Phase::Idle,
        }
    }
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            display: INITIAL_DISPLAY.to_string(),
            pending: None,
            waiting_for_new_value: false,
        }
    }
}
