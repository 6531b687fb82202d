use crate::Operator;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EquationError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("invalid expression: {0}")]
    InvalidExpression(String),
}

/// Applies a single binary operator.
pub fn apply(left: f64, op: Operator, right: f64) -> Result<f64, EquationError> {
    match op {
        Operator::Add => Ok(left + right),
        Operator::Sub => Ok(left - right),
        Operator::Mul => Ok(left * right),
        Operator::Div => {
            if right == 0.0 {
                return Err(EquationError::DivisionByZero);
            }
            Ok(left / right)
        }
    }
}

/// Renders a value the way it appears in keys and messages: integers
/// without a fractional part, and never `-0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

pub fn is_valid_game_result(result: f64) -> bool {
    result.is_finite() && result.fract() == 0.0
}
