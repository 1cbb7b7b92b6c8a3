//! Calculator - keypad-driven arithmetic engine
//!
//! Binary operators chain left to right with no precedence: selecting a new
//! operator while one is pending (and a fresh operand was typed) evaluates the
//! pending one first, so `5 + 3 * 2 =` shows `16`.

use tracing::debug;

use crate::error::{CalcError, Result};
use crate::keypad::Key;
use crate::numfmt::format_result;
use crate::state::{CalculatorState, Operation, Pending, Phase, INITIAL_DISPLAY};

/// Calculator - stateful engine behind a keypad
///
/// # Example
/// ```rust
/// use calcpad_engine::{Calculator, Operation};
///
/// let mut calc = Calculator::new();
/// calc.input_number("5");
/// calc.set_operation(Operation::Add)?;
/// calc.input_number("3");
/// calc.set_operation(Operation::Multiply)?;
/// calc.input_number("2");
/// calc.equals()?;
/// assert_eq!(calc.display(), "16");
/// # Ok::<(), calcpad_engine::CalcError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    state: CalculatorState,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current display text
    pub fn display(&self) -> &str {
        &self.state.display
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Pending left operand and operator, if any
    pub fn pending(&self) -> Option<Pending> {
        self.state.pending
    }

    pub fn is_waiting_for_new_value(&self) -> bool {
        self.state.waiting_for_new_value
    }

    /// Enter a digit
    ///
    /// Multi-character input is concatenated literally.
    pub fn input_number(&mut self, digit: &str) {
        if self.state.waiting_for_new_value {
            self.state.display = digit.to_string();
            self.state.waiting_for_new_value = false;
        } else if self.state.display == INITIAL_DISPLAY {
            self.state.display = digit.to_string();
        } else {
            self.state.display.push_str(digit);
        }

        debug!(digit, display = %self.state.display, "input_number");
    }

    /// Enter a decimal point; ignored when the display already has one
    pub fn input_decimal(&mut self) {
        if self.state.waiting_for_new_value {
            self.state.display = "0.".to_string();
            self.state.waiting_for_new_value = false;
        } else if !self.state.display.contains('.') {
            self.state.display.push('.');
        }

        debug!(display = %self.state.display, "input_decimal");
    }

    /// Select an operator
    ///
    /// Captures the display as the left operand, or, if an operator is
    /// already pending and a new operand has been typed since, evaluates the
    /// pending one and carries its result forward. Pressing an operator twice
    /// in a row just replaces it.
    ///
    /// `√` is stored like any other operator; evaluating it yields the right
    /// operand unchanged. The square root itself is `calculate_square_root`.
    pub fn set_operation(&mut self, operation: Operation) -> Result<()> {
        let current = self.parse_display()?;
        let value = match self.state.pending {
            Some(_) if !self.state.waiting_for_new_value => {
                let result = self.calculate()?;
                self.state.display = format_result(result);
                result
            },
            _ => current,
        };

        self.state.pending = Some(Pending { value, operation });
        self.state.waiting_for_new_value = true;

        debug!(
            operation = %operation,
            previous = value,
            display = %self.state.display,
            "set_operation"
        );
        Ok(())
    }

    /// Evaluate the pending operator against the display, without mutating state
    ///
    /// Returns the display value unchanged when nothing is pending.
    pub fn calculate(&self) -> Result<f64> {
        let current = self.parse_display()?;
        match self.state.pending {
            Some(Pending { value, operation }) => operation.apply(value, current),
            None => Ok(current),
        }
    }

    /// Replace the display with its square root
    ///
    /// Leaves any pending operator in place.
    pub fn calculate_square_root(&mut self) -> Result<()> {
        let value = self.parse_display()?;
        if value < 0.0 {
            return Err(CalcError::NegativeSquareRoot);
        }

        self.state.display = format_result(value.sqrt());
        self.state.waiting_for_new_value = true;

        debug!(value, display = %self.state.display, "square_root");
        Ok(())
    }

    /// Apply the pending operator; no-op when nothing is pending
    pub fn equals(&mut self) -> Result<()> {
        if self.state.pending.is_none() {
            return Ok(());
        }

        let result = self.calculate()?;
        self.state.display = format_result(result);
        self.state.pending = None;
        self.state.waiting_for_new_value = true;

        debug!(result, display = %self.state.display, "equals");
        Ok(())
    }

    pub fn clear(&mut self) {
        self.state = CalculatorState::default();
        debug!("clear");
    }

    /// Drop the last display character, falling back to `0`
    ///
    /// Only the display text changes; pending state and the waiting flag stay.
    pub fn backspace(&mut self) {
        if self.state.display.chars().count() > 1 {
            self.state.display.pop();
        } else {
            self.state.display = INITIAL_DISPLAY.to_string();
        }

        debug!(display = %self.state.display, "backspace");
    }

    /// Dispatch a keypad key onto the matching operation
    pub fn press(&mut self, key: Key) -> Result<()> {
        match key {
            Key::Digit(digit) => {
                let mut buf = [0u8; 4];
                self.input_number(digit.encode_utf8(&mut buf));
            },
            Key::Decimal => self.input_decimal(),
            Key::Operator(operation) => self.set_operation(operation)?,
            Key::SquareRoot => self.calculate_square_root()?,
            Key::Equals => self.equals()?,
            Key::Clear => self.clear(),
            Key::Backspace => self.backspace(),
        }
        Ok(())
    }

    fn parse_display(&self) -> Result<f64> {
        self.state
            .display
            .parse::<f64>()
            .map_err(|_| CalcError::invalid_operand(self.state.display.as_str()))
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn enter(calc: &mut Calculator, digits: &str) {
        for d in digits.chars() {
            calc.press(Key::Digit(d)).unwrap();
        }
    }

    #[test]
    fn test_initial_display() {
        let calc = Calculator::new();
        assert_eq!(calc.display(), "0");
        assert_eq!(calc.phase(), Phase::Idle);
        assert!(calc.pending().is_none());
        assert!(!calc.is_waiting_for_new_value());
    }

    #[test]
    fn test_digits_concatenate() {
        let mut calc = Calculator::new();
        calc.input_number("1");
        calc.input_number("2");
        calc.input_number("3");
        assert_eq!(calc.display(), "123");
    }

    #[test]
    fn test_leading_zero_replaced() {
        let mut calc = Calculator::new();
        calc.input_number("0");
        calc.input_number("5");
        assert_eq!(calc.display(), "5");
    }

    #[test]
    fn test_multi_character_input_is_literal() {
        let mut calc = Calculator::new();
        calc.input_number("12");
        calc.input_number("34");
        assert_eq!(calc.display(), "1234");
    }

    #[test]
    fn test_decimal_once() {
        let mut calc = Calculator::new();
        calc.input_number("1");
        calc.input_decimal();
        calc.input_decimal();
        assert_eq!(calc.display(), "1.");
    }

    #[test]
    fn test_decimal_on_zero_keeps_zero() {
        let mut calc = Calculator::new();
        calc.input_decimal();
        calc.input_number("5");
        assert_eq!(calc.display(), "0.5");
    }

    #[test]
    fn test_decimal_starts_new_operand() {
        let mut calc = Calculator::new();
        calc.input_number("5");
        calc.set_operation(Operation::Add).unwrap();
        calc.input_decimal();
        assert_eq!(calc.display(), "0.");
        assert!(!calc.is_waiting_for_new_value());
    }

    #[test]
    fn test_set_operation_captures_operand() {
        let mut calc = Calculator::new();
        enter(&mut calc, "42");
        calc.set_operation(Operation::Subtract).unwrap();

        assert_eq!(
            calc.pending(),
            Some(Pending {
                value: 42.0,
                operation: Operation::Subtract
            })
        );
        assert!(calc.is_waiting_for_new_value());
        assert_eq!(calc.phase(), Phase::OperatorPending);
        assert_eq!(calc.display(), "42");
    }

    #[test]
    fn test_operator_substitution() {
        let mut calc = Calculator::new();
        enter(&mut calc, "6");
        calc.set_operation(Operation::Add).unwrap();
        calc.set_operation(Operation::Multiply).unwrap();
        enter(&mut calc, "7");
        calc.equals().unwrap();
        assert_eq!(calc.display(), "42");
    }

    #[test]
    fn test_chaining_evaluates_left_to_right() {
        let mut calc = Calculator::new();
        enter(&mut calc, "5");
        calc.set_operation(Operation::Add).unwrap();
        enter(&mut calc, "3");
        calc.set_operation(Operation::Multiply).unwrap();

        // intermediate result is shown immediately
        assert_eq!(calc.display(), "8");
        assert_eq!(calc.pending().map(|p| p.value), Some(8.0));

        enter(&mut calc, "2");
        calc.equals().unwrap();
        assert_eq!(calc.display(), "16");
    }

    #[test]
    fn test_calculate_is_pure() {
        let mut calc = Calculator::new();
        enter(&mut calc, "9");
        calc.set_operation(Operation::Divide).unwrap();
        enter(&mut calc, "3");

        let before = calc.state().clone();
        assert_eq!(calc.calculate().unwrap(), 3.0);
        assert_eq!(calc.state(), &before);
    }

    #[test]
    fn test_calculate_without_pending_returns_display() {
        let mut calc = Calculator::new();
        enter(&mut calc, "17");
        assert_eq!(calc.calculate().unwrap(), 17.0);
    }

    #[test]
    fn test_equals_clears_pending() {
        let mut calc = Calculator::new();
        enter(&mut calc, "2");
        calc.set_operation(Operation::Power).unwrap();
        enter(&mut calc, "3");
        calc.equals().unwrap();

        assert_eq!(calc.display(), "8");
        assert!(calc.pending().is_none());
        assert!(calc.is_waiting_for_new_value());
        assert_eq!(calc.phase(), Phase::Idle);
    }

    #[test]
    fn test_equals_without_pending_is_noop() {
        let mut calc = Calculator::new();
        enter(&mut calc, "12");
        calc.equals().unwrap();
        assert_eq!(calc.display(), "12");
        assert!(!calc.is_waiting_for_new_value());
    }

    #[test]
    fn test_digit_after_equals_starts_fresh() {
        let mut calc = Calculator::new();
        enter(&mut calc, "1");
        calc.set_operation(Operation::Add).unwrap();
        enter(&mut calc, "1");
        calc.equals().unwrap();
        enter(&mut calc, "7");
        assert_eq!(calc.display(), "7");
    }

    #[test]
    fn test_square_root_keeps_pending() {
        let mut calc = Calculator::new();
        enter(&mut calc, "10");
        calc.set_operation(Operation::Add).unwrap();
        enter(&mut calc, "16");
        calc.calculate_square_root().unwrap();
        assert_eq!(calc.display(), "4");
        assert_eq!(calc.pending().map(|p| p.operation), Some(Operation::Add));

        calc.equals().unwrap();
        assert_eq!(calc.display(), "14");
    }

    #[test]
    fn test_square_root_operator_chains_like_binary() {
        let mut calc = Calculator::new();
        enter(&mut calc, "5");
        calc.set_operation(Operation::Add).unwrap();
        enter(&mut calc, "3");
        calc.set_operation(Operation::SquareRoot).unwrap();

        assert_eq!(calc.display(), "8");
        assert_eq!(
            calc.pending(),
            Some(Pending {
                value: 8.0,
                operation: Operation::SquareRoot
            })
        );
        assert!(calc.is_waiting_for_new_value());

        // evaluating √ returns the right operand
        enter(&mut calc, "9");
        calc.equals().unwrap();
        assert_eq!(calc.display(), "9");
    }

    #[test]
    fn test_square_root_operator_accepts_negative_display() {
        let mut calc = Calculator::new();
        calc.input_number("-4");
        calc.set_operation(Operation::SquareRoot).unwrap();

        assert_eq!(calc.display(), "-4");
        assert_eq!(calc.pending().map(|p| p.value), Some(-4.0));
    }

    #[test]
    fn test_negative_square_root_leaves_state() {
        let mut calc = Calculator::new();
        calc.input_number("-4");
        let before = calc.state().clone();

        assert_eq!(
            calc.calculate_square_root(),
            Err(CalcError::NegativeSquareRoot)
        );
        assert_eq!(calc.state(), &before);
    }

    #[test]
    fn test_division_by_zero_leaves_state() {
        let mut calc = Calculator::new();
        enter(&mut calc, "5");
        calc.set_operation(Operation::Divide).unwrap();
        enter(&mut calc, "0");
        let before = calc.state().clone();

        assert_eq!(calc.equals(), Err(CalcError::DivisionByZero));
        assert_eq!(calc.state(), &before);
    }

    #[test]
    fn test_division_by_zero_while_chaining() {
        let mut calc = Calculator::new();
        enter(&mut calc, "5");
        calc.set_operation(Operation::Remainder).unwrap();
        enter(&mut calc, "0");
        let before = calc.state().clone();

        assert_eq!(
            calc.set_operation(Operation::Add),
            Err(CalcError::DivisionByZero)
        );
        assert_eq!(calc.state(), &before);
    }

    #[test]
    fn test_invalid_operand() {
        let mut calc = Calculator::new();
        calc.input_number("-4");
        calc.backspace();
        assert_eq!(calc.display(), "-");

        let before = calc.state().clone();
        assert_eq!(
            calc.set_operation(Operation::Add),
            Err(CalcError::InvalidOperand("-".to_string()))
        );
        assert_eq!(calc.state(), &before);
    }

    #[test]
    fn test_backspace() {
        let mut calc = Calculator::new();
        enter(&mut calc, "123");
        calc.backspace();
        assert_eq!(calc.display(), "12");
        calc.backspace();
        calc.backspace();
        assert_eq!(calc.display(), "0");
        calc.backspace();
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn test_backspace_keeps_pending_and_waiting() {
        let mut calc = Calculator::new();
        enter(&mut calc, "25");
        calc.set_operation(Operation::Add).unwrap();
        calc.backspace();

        assert_eq!(calc.display(), "2");
        assert!(calc.is_waiting_for_new_value());
        assert_eq!(calc.pending().map(|p| p.value), Some(25.0));
    }

    #[test]
    fn test_clear_resets() {
        let mut calc = Calculator::new();
        enter(&mut calc, "123");
        calc.set_operation(Operation::Add).unwrap();
        enter(&mut calc, "456");
        calc.clear();

        assert_eq!(calc.display(), "0");
        assert_eq!(calc.state(), &CalculatorState::default());
    }

    #[test]
    fn test_press_dispatch() {
        let mut calc = Calculator::new();
        for key in [
            Key::Digit('1'),
            Key::Decimal,
            Key::Digit('5'),
            Key::Operator(Operation::Add),
            Key::Digit('2'),
            Key::Decimal,
            Key::Digit('3'),
            Key::Equals,
        ] {
            calc.press(key).unwrap();
        }
        assert_eq!(calc.display(), "3.8");

        calc.press(Key::Clear).unwrap();
        assert_eq!(calc.display(), "0");
    }

    #[test]
    #[traced_test]
    fn test_transitions_are_logged() {
        let mut calc = Calculator::new();
        enter(&mut calc, "4");
        calc.set_operation(Operation::Multiply).unwrap();
        enter(&mut calc, "4");
        calc.equals().unwrap();

        assert!(logs_contain("set_operation"));
        assert!(logs_contain("equals"));
        assert!(logs_contain("display=16"));
    }
}
