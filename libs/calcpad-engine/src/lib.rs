//! calcpad-engine - Keypad calculator engine
//!
//! Tracks the pending operand and operator across key presses and formats
//! results for display.
//!
//! # Features
//!
//! - **Binary operators**: `+`, `-`, `*`, `/`, `^`, `%`, chained left to right
//! - **Unary square root**: applied in place, pending operator untouched
//! - **Display editing**: decimal point, backspace, clear
//! - **Result formatting**: 10-place rounding, exponential notation at the extremes
//!
//! # Example
//!
//! ```rust
//! use calcpad_engine::{parse_keys, CalcError, Calculator};
//!
//! let mut calc = Calculator::new();
//! for key in parse_keys("15 / 3 =").unwrap() {
//!     calc.press(key).unwrap();
//! }
//! assert_eq!(calc.display(), "5");
//!
//! // Errors leave the display untouched
//! for key in parse_keys("/ 0").unwrap() {
//!     calc.press(key).unwrap();
//! }
//! assert_eq!(calc.equals(), Err(CalcError::DivisionByZero));
//! assert_eq!(calc.display(), "0");
//! ```
//!
//! # Operators
//!
//! | Key | Operation | Fails when |
//! |-----|-----------|------------|
//! | `+` `-` `*` | arithmetic | - |
//! | `/` | division | divisor is `0` |
//! | `^` | power | - |
//! | `%` | remainder, sign of dividend | divisor is `0` |
//! | `√` | square root of the display | display is negative |

pub mod engine;
pub mod error;
pub mod keypad;
pub mod numfmt;
pub mod state;

// Re-exports for convenience
pub use engine::Calculator;
pub use error::{CalcError, Result};
pub use keypad::{parse_keys, Key, KeyVariant, UnknownKey, KEYPAD_ROWS};
pub use numfmt::format_result;
pub use state::{CalculatorState, Operation, Pending, Phase};
