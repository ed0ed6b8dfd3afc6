//! Calculator engine
//!
//! Classic four-function calculator with memory. The engine is a plain
//! state machine over a display string; the web layer binds keypad buttons
//! and keyboard input to these methods. Chained operators evaluate the
//! pending operation first, so `2 + 3 +` shows 5 before the next operand.
//!
//! Division by zero puts "Error" on the display and resets the pending
//! operation rather than propagating anything.

use tracing::warn;

/// Binary operator keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// Calculator state: display text plus the pending operation.
#[derive(Debug)]
pub struct Calculator {
    display: String,
    current_value: Option<f64>,
    operator: Option<Operator>,
    waiting_for_operand: bool,
    memory: f64,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Display length cap, keeps entries from overflowing the readout.
const MAX_DISPLAY_LEN: usize = 12;

impl Calculator {
    pub fn new() -> Self {
        Self {
            display: "0".to_string(),
            current_value: None,
            operator: None,
            waiting_for_operand: false,
            memory: 0.0,
        }
    }

    /// Current display text.
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn memory(&self) -> f64 {
        self.memory
    }

    fn display_value(&self) -> f64 {
        self.display.parse().unwrap_or(0.0)
    }

    /// Append a digit. Starts a fresh entry after an operator or result;
    /// a leading zero is replaced rather than extended.
    pub fn press_digit(&mut self, digit: char) {
        debug_assert!(digit.is_ascii_digit());
        if self.waiting_for_operand {
            self.display.clear();
            self.waiting_for_operand = false;
        }
        if self.display == "0" {
            self.display.clear();
        }
        if self.display.len() < MAX_DISPLAY_LEN {
            self.display.push(digit);
        }
    }

    /// Append the decimal point, at most once per entry.
    pub fn press_decimal(&mut self) {
        if self.waiting_for_operand {
            self.display = "0".to_string();
            self.waiting_for_operand = false;
        }
        if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    /// Select an operator. A pending operation with a fresh operand is
    /// evaluated first, which is what makes `2 + 3 + 4 =` read as
    /// left-to-right chaining.
    pub fn set_operator(&mut self, op: Operator) {
        if self.operator.is_some() && !self.waiting_for_operand {
            self.equals();
        } else if self.current_value.is_none() {
            self.current_value = Some(self.display_value());
        }
        self.operator = Some(op);
        self.waiting_for_operand = true;
    }

    /// Evaluate the pending operation. No-op without an operator.
    pub fn equals(&mut self) {
        let Some(op) = self.operator else {
            return;
        };
        let lhs = self.current_value.unwrap_or(0.0);
        let rhs = self.display_value();

        let result = match op {
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
            Operator::Multiply => lhs * rhs,
            Operator::Divide => {
                if rhs == 0.0 {
                    warn!("division by zero");
                    self.display = "Error".to_string();
                    self.current_value = None;
                    self.operator = None;
                    self.waiting_for_operand = true;
                    return;
                }
                lhs / rhs
            }
        };

        self.display = format_result(result);
        self.current_value = Some(self.display_value());
        self.operator = None;
        self.waiting_for_operand = true;
    }

    /// Reset everything except memory.
    pub fn clear(&mut self) {
        self.display = "0".to_string();
        self.current_value = None;
        self.operator = None;
        self.waiting_for_operand = false;
    }

    /// Reset only the current entry.
    pub fn clear_entry(&mut self) {
        self.display = "0".to_string();
    }

    /// Flip the sign of the current entry. Zero stays zero.
    pub fn negate(&mut self) {
        let value = self.display_value();
        if value != 0.0 {
            self.display = format_result(-value);
        }
    }

    pub fn memory_clear(&mut self) {
        self.memory = 0.0;
    }

    /// Recall memory onto the display; the next digit starts a new entry.
    pub fn memory_recall(&mut self) {
        self.display = format_result(self.memory);
        self.waiting_for_operand = true;
    }

    pub fn memory_add(&mut self) {
        self.memory += self.display_value();
    }

    pub fn memory_subtract(&mut self) {
        self.memory -= self.display_value();
    }
}

/// Format a result for the 12-character display: very large or very small
/// magnitudes go exponential, over-long decimals are rounded to fit, and
/// everything else prints plainly.
fn format_result(result: f64) -> String {
    let magnitude = result.abs();
    if magnitude > 1e12 || (magnitude < 1e-12 && result != 0.0) {
        return to_exponential(result, 6);
    }

    let plain = result.to_string();
    if plain.len() <= MAX_DISPLAY_LEN {
        return plain;
    }
    if let Some(decimal_pos) = plain.find('.') {
        let max_fraction_digits = (MAX_DISPLAY_LEN - 1).saturating_sub(decimal_pos);
        let rounded = format!("{result:.max_fraction_digits$}");
        // Reparse to drop trailing zeros
        return rounded.parse::<f64>().map_or(rounded, |v| v.to_string());
    }
    to_exponential(result, 6)
}

/// Exponential notation with an explicit exponent sign, `1.000000e+13`.
fn to_exponential(value: f64, digits: usize) -> String {
    let formatted = format!("{value:.digits$e}");
    match formatted.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn enter(calc: &mut Calculator, digits: &str) {
        for c in digits.chars() {
            if c == '.' {
                calc.press_decimal();
            } else {
                calc.press_digit(c);
            }
        }
    }

    #[test]
    fn test_digit_entry_replaces_leading_zero() {
        let mut calc = Calculator::new();
        assert_eq!(calc.display(), "0");
        calc.press_digit('7');
        assert_eq!(calc.display(), "7");
        calc.press_digit('2');
        assert_eq!(calc.display(), "72");
    }

    #[test]
    fn test_decimal_point_only_once() {
        let mut calc = Calculator::new();
        enter(&mut calc, "3.1.4");
        assert_eq!(calc.display(), "3.14");
    }

    #[test]
    fn test_entry_capped_at_twelve_chars() {
        let mut calc = Calculator::new();
        enter(&mut calc, "1234567890123456");
        assert_eq!(calc.display(), "123456789012");
    }

    #[test]
    fn test_simple_addition() {
        let mut calc = Calculator::new();
        enter(&mut calc, "2");
        calc.set_operator(Operator::Add);
        enter(&mut calc, "3");
        calc.equals();
        assert_eq!(calc.display(), "5");
    }

    #[test]
    fn test_operator_chaining_evaluates_left_to_right() {
        let mut calc = Calculator::new();
        enter(&mut calc, "2");
        calc.set_operator(Operator::Add);
        enter(&mut calc, "3");
        calc.set_operator(Operator::Multiply);
        // Pending addition evaluated before the multiply
        assert_eq!(calc.display(), "5");
        enter(&mut calc, "4");
        calc.equals();
        assert_eq!(calc.display(), "20");
    }

    #[test]
    fn test_divide_by_zero_shows_error_and_recovers() {
        let mut calc = Calculator::new();
        enter(&mut calc, "8");
        calc.set_operator(Operator::Divide);
        enter(&mut calc, "0");
        calc.equals();
        assert_eq!(calc.display(), "Error");

        // Fresh entry starts cleanly after the error
        enter(&mut calc, "6");
        calc.set_operator(Operator::Subtract);
        enter(&mut calc, "2");
        calc.equals();
        assert_eq!(calc.display(), "4");
    }

    #[test]
    fn test_float_noise_is_rounded_away() {
        let mut calc = Calculator::new();
        enter(&mut calc, "0.1");
        calc.set_operator(Operator::Add);
        enter(&mut calc, "0.2");
        calc.equals();
        assert_eq!(calc.display(), "0.3");
    }

    #[test]
    fn test_huge_results_go_exponential() {
        let mut calc = Calculator::new();
        enter(&mut calc, "2000000");
        calc.set_operator(Operator::Multiply);
        enter(&mut calc, "10000000");
        calc.equals();
        assert_eq!(calc.display(), "2.000000e+13");
    }

    #[test]
    fn test_tiny_results_go_exponential() {
        let mut calc = Calculator::new();
        enter(&mut calc, "0.000001");
        calc.set_operator(Operator::Multiply);
        enter(&mut calc, "0.0000001");
        calc.equals();
        assert_eq!(calc.display(), "1.000000e-13");
    }

    #[test]
    fn test_negate_and_clear_entry() {
        let mut calc = Calculator::new();
        enter(&mut calc, "42");
        calc.negate();
        assert_eq!(calc.display(), "-42");
        calc.negate();
        assert_eq!(calc.display(), "42");

        calc.set_operator(Operator::Add);
        enter(&mut calc, "99");
        calc.clear_entry();
        assert_eq!(calc.display(), "0");
        enter(&mut calc, "8");
        calc.equals();
        assert_eq!(calc.display(), "50");
    }

    #[test]
    fn test_negate_zero_is_noop() {
        let mut calc = Calculator::new();
        calc.negate();
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn test_memory_cycle() {
        let mut calc = Calculator::new();
        enter(&mut calc, "25");
        calc.memory_add();
        calc.clear_entry();
        enter(&mut calc, "5");
        calc.memory_subtract();
        assert_eq!(calc.memory(), 20.0);

        calc.memory_recall();
        assert_eq!(calc.display(), "20");
        calc.memory_clear();
        assert_eq!(calc.memory(), 0.0);
    }

    #[test]
    fn test_memory_recall_starts_fresh_entry() {
        let mut calc = Calculator::new();
        enter(&mut calc, "12");
        calc.memory_add();
        calc.clear();

        calc.memory_recall();
        assert_eq!(calc.display(), "12");
        calc.press_digit('9');
        assert_eq!(calc.display(), "9");
    }

    proptest! {
        #[test]
        fn display_never_overflows(digits in "[0-9]{1,40}") {
            let mut calc = Calculator::new();
            for c in digits.chars() {
                calc.press_digit(c);
            }
            prop_assert!(calc.display().len() <= MAX_DISPLAY_LEN);
            prop_assert!(calc.display().parse::<f64>().is_ok());
        }

        #[test]
        fn integer_addition_is_exact(a in 0u32..1_000_000, b in 0u32..1_000_000) {
            let mut calc = Calculator::new();
            enter(&mut calc, &a.to_string());
            calc.set_operator(Operator::Add);
            enter(&mut calc, &b.to_string());
            calc.equals();
            prop_assert_eq!(calc.display(), (a + b).to_string());
        }
    }

    #[test]
    fn test_clear_resets_pending_operation_but_not_memory() {
        let mut calc = Calculator::new();
        enter(&mut calc, "7");
        calc.memory_add();
        calc.set_operator(Operator::Add);
        calc.clear();

        enter(&mut calc, "3");
        calc.equals(); // no operator pending: no-op
        assert_eq!(calc.display(), "3");
        assert_eq!(calc.memory(), 7.0);
    }
}
