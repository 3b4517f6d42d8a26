//! Formula error types
//!
//! Compilation and evaluation fail differently: [`CompileError`] is returned
//! from [`compile`](crate::compile) and stored once at the column level,
//! while [`EvalError`] is folded into every row's
//! [`EvaluationResult`](crate::EvaluationResult); evaluation itself never
//! returns `Err`.

use serde::Serialize;
use thiserror::Error;

/// Sentinel shown in a cell whenever evaluation fails
///
/// Distinguishable from any legitimate computed text; the diagnostic message
/// travels separately (tooltip channel).
pub const ERROR_VALUE: &str = "#ERR";

/// Errors raised while compiling a formula source string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Formula text is empty or whitespace
    #[error("formula is empty")]
    EmptyFormula,

    /// Character with no meaning in the formula grammar
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),

    /// Field reference opened with `{` but never closed
    #[error("missing closing '}}' in field reference")]
    UnmatchedBrace,

    /// Field reference with a blank name, `{}` or `{  }`
    #[error("empty field reference")]
    EmptyField,

    /// Parenthesis without a partner
    #[error("unmatched parenthesis")]
    UnmatchedParen,

    /// Numeric literal that does not fit a finite f64
    #[error("numeric literal out of range: {0}")]
    NumericOutOfRange(String),

    /// `*` or `/` used as a prefix operator
    #[error("operator '{0}' cannot be used as a prefix")]
    UnaryNotSupported(char),

    /// String literal opened with `"` but never closed
    #[error("unterminated string literal")]
    UnterminatedString,
}

/// Errors caught while evaluating a compiled formula against a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvalError {
    /// An operator had fewer than two operands, or the final stack did not
    /// hold exactly one value
    #[error("malformed formula: operator is missing an operand")]
    StackUnderflow,

    /// Divisor within epsilon of zero
    #[error("division by zero")]
    DivideByZero,

    /// Arithmetic produced NaN or an infinity
    #[error("result is not a finite number")]
    NonFiniteResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        assert_eq!(
            CompileError::UnexpectedChar('%').to_string(),
            "unexpected character '%'"
        );
        assert_eq!(
            CompileError::UnaryNotSupported('*').to_string(),
            "operator '*' cannot be used as a prefix"
        );
        assert_eq!(
            CompileError::NumericOutOfRange("1e999".into()).to_string(),
            "numeric literal out of range: 1e999"
        );
    }

    #[test]
    fn test_eval_error_serializes_as_tag() {
        let json = serde_json::to_string(&EvalError::DivideByZero).unwrap();
        assert_eq!(json, "\"divide_by_zero\"");
    }
}
