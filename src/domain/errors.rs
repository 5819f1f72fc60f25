use thiserror::Error;

/// Which of the two operands an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandPosition {
    First,
    Second,
}

impl OperandPosition {
    /// Label used in user-facing messages, e.g. `#1 (x)`.
    pub fn label(self) -> &'static str {
        match self {
            OperandPosition::First => "#1 (x)",
            OperandPosition::Second => "#2 (y)",
        }
    }
}

/// Everything that can go wrong with a single attempt.
///
/// None of these end a session; they only mark the attempt as failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Value {} is not a valid number", .position.label())]
    InvalidOperandFormat { position: OperandPosition },
    #[error("Value {} is not numeric", .position.label())]
    NonFiniteOperand { position: OperandPosition },
    #[error("Operator must be +, -, *, /, or %")]
    UnsupportedOperator(String),
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Modulus by zero")]
    ModulusByZero,
}

pub type CalcResult<T> = Result<T, CalcError>;
