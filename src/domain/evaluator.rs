//! Arithmetic evaluation for a single attempt.
//!
//! The evaluator supports exactly five binary operators on `f64` operands.
//! [`evaluate_attempt`] runs the full pipeline on raw user text: operand
//! format checks, numeric parsing, operator lookup, then the arithmetic.

use super::errors::{CalcError, CalcResult, OperandPosition};
use super::models::Equation;
use super::validator::{is_valid_number, trim_input};
use std::fmt;
use std::str::FromStr;

/// A supported binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl Operator {
    pub const ALL: [Operator; 5] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
        Operator::Modulo,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Modulo => "%",
        }
    }

    /// Applies the operator.
    ///
    /// Division and modulus by exactly zero are errors. `%` is the truncated
    /// remainder, so the result takes the sign of `x`.
    pub fn apply(self, x: f64, y: f64) -> CalcResult<f64> {
        match self {
            Operator::Add => Ok(x + y),
            Operator::Subtract => Ok(x - y),
            Operator::Multiply => Ok(x * y),
            Operator::Divide if y == 0.0 => Err(CalcError::DivisionByZero),
            Operator::Divide => Ok(x / y),
            Operator::Modulo if y == 0.0 => Err(CalcError::ModulusByZero),
            Operator::Modulo => Ok(x % y),
        }
    }
}

impl FromStr for Operator {
    type Err = CalcError;

    /// The symbol must match exactly; surrounding whitespace is not stripped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.symbol() == s)
            .ok_or_else(|| CalcError::UnsupportedOperator(s.to_string()))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Evaluates `x op y` where `op` is an operator symbol.
///
/// # Examples
///
/// ```
/// use tcalc::domain::{evaluate, CalcError};
///
/// assert_eq!(evaluate(6.0, 3.0, "*"), Ok(18.0));
/// assert_eq!(evaluate(1.0, 0.0, "/"), Err(CalcError::DivisionByZero));
/// ```
pub fn evaluate(x: f64, y: f64, op: &str) -> CalcResult<f64> {
    op.parse::<Operator>()?.apply(x, y)
}

/// Validates raw operand and operator text and computes the result.
///
/// Checks run in a fixed order and stop at the first failure: first operand
/// format, second operand format, numeric parse of both, operator, then the
/// arithmetic itself.
pub fn evaluate_attempt(first: &str, second: &str, operator: &str) -> CalcResult<Equation> {
    if !is_valid_number(first) {
        return Err(CalcError::InvalidOperandFormat { position: OperandPosition::First });
    }
    if !is_valid_number(second) {
        return Err(CalcError::InvalidOperandFormat { position: OperandPosition::Second });
    }

    let x = parse_operand(first, OperandPosition::First)?;
    let y = parse_operand(second, OperandPosition::Second)?;
    let operator = operator.parse::<Operator>()?;
    let value = operator.apply(x, y)?;

    Ok(Equation { x, operator, y, value })
}

fn parse_operand(text: &str, position: OperandPosition) -> CalcResult<f64> {
    match trim_input(text).parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CalcError::NonFiniteOperand { position }),
    }
}
