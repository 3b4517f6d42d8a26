//! Formula evaluator
//!
//! Reduces a compiled postfix form against one row's field values. The
//! evaluator is a plain stack machine: literals and resolved fields push,
//! operators pop two and push one. It never panics and never returns `Err`:
//! every runtime failure becomes a sentinel-valued [`EvaluationResult`].

use crate::coerce::{field_to_number, field_to_text, number_to_text, text_to_number};
use crate::compiler::CompiledFormula;
use crate::error::{EvalError, ERROR_VALUE};
use crate::token::{BinOp, RpnToken};
use serde::Serialize;
use vault_sheets_core::{FieldValue, Row};

/// Whether a result came out of the numeric or the text path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Number,
    String,
}

/// The outcome of evaluating one formula against one row
///
/// `value` is always displayable: the computed text on success, the `"#ERR"`
/// sentinel on failure. The diagnostic itself rides in `error` so the grid
/// can surface it through a tooltip without blocking the rest of the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    /// Display text for the cell
    pub value: String,
    /// Runtime failure, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<EvalError>,
    /// Result kind
    pub kind: ResultKind,
    /// The numeric value when `kind` is [`ResultKind::Number`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric: Option<f64>,
}

impl EvaluationResult {
    /// Successful numeric result, canonically formatted
    pub fn number(n: f64) -> Self {
        Self {
            value: number_to_text(n),
            error: None,
            kind: ResultKind::Number,
            numeric: Some(n),
        }
    }

    /// Successful text result
    pub fn text<S: Into<String>>(s: S) -> Self {
        Self {
            value: s.into(),
            error: None,
            kind: ResultKind::String,
            numeric: None,
        }
    }

    /// Failed result carrying the sentinel value
    pub fn failure(error: EvalError) -> Self {
        Self {
            value: ERROR_VALUE.to_string(),
            error: Some(error),
            kind: ResultKind::String,
            numeric: None,
        }
    }

    /// Check if this result is a failure
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Diagnostic message for the tooltip channel, if failed
    pub fn message(&self) -> Option<String> {
        self.error.map(|e| e.to_string())
    }
}

/// Value types on the evaluation stack
///
/// The `Field` variant keeps the raw row value untyped until an operator
/// actually consumes it: only an explicit string literal (or a concatenation
/// result) carries the `Text` tag that switches `+` into string mode.
enum StackValue {
    Number(f64),
    Text(String),
    Field(FieldValue),
}

impl StackValue {
    fn is_text(&self) -> bool {
        matches!(self, StackValue::Text(_))
    }

    fn to_number(&self) -> f64 {
        match self {
            StackValue::Number(n) => *n,
            StackValue::Text(s) => text_to_number(s),
            StackValue::Field(v) => field_to_number(v),
        }
    }

    fn into_text(self) -> String {
        match self {
            StackValue::Number(n) => number_to_text(n),
            StackValue::Text(s) => s,
            StackValue::Field(v) => field_to_text(&v),
        }
    }
}

/// Evaluate a compiled formula against a row
///
/// Fields resolve by direct row lookup; a missing field reads as
/// [`FieldValue::Empty`].
pub fn evaluate(formula: &CompiledFormula, row: &Row) -> EvaluationResult {
    evaluate_with(formula, |name| {
        row.get(name).cloned().unwrap_or(FieldValue::Empty)
    })
}

/// Evaluate a compiled formula with a custom field resolver
///
/// The resolver is consulted for every field token, replacing row lookup
/// entirely; [`evaluate`] is this function with the row-lookup resolver.
pub fn evaluate_with<F>(formula: &CompiledFormula, mut resolve: F) -> EvaluationResult
where
    F: FnMut(&str) -> FieldValue,
{
    // Single-token fast path: no stack machine needed
    if let [token] = formula.rpn() {
        return match token {
            RpnToken::Number(n) => EvaluationResult::number(*n),
            RpnToken::String(s) => EvaluationResult::text(s.clone()),
            RpnToken::Field(name) => EvaluationResult::text(field_to_text(&resolve(name))),
            RpnToken::Op(_) => EvaluationResult::failure(EvalError::StackUnderflow),
        };
    }

    run(formula.rpn(), &mut resolve)
}

fn run<F>(rpn: &[RpnToken], resolve: &mut F) -> EvaluationResult
where
    F: FnMut(&str) -> FieldValue,
{
    let mut stack: Vec<StackValue> = Vec::new();

    for token in rpn {
        match token {
            RpnToken::Number(n) => stack.push(StackValue::Number(*n)),
            RpnToken::String(s) => stack.push(StackValue::Text(s.clone())),
            RpnToken::Field(name) => stack.push(StackValue::Field(resolve(name))),
            RpnToken::Op(op) => {
                let (right, left) = match (stack.pop(), stack.pop()) {
                    (Some(r), Some(l)) => (r, l),
                    _ => return EvaluationResult::failure(EvalError::StackUnderflow),
                };
                match apply(*op, left, right) {
                    Ok(value) => stack.push(value),
                    Err(e) => return EvaluationResult::failure(e),
                }
            }
        }
    }

    // Exactly one value must remain
    let result = match stack.pop() {
        Some(value) if stack.is_empty() => value,
        _ => return EvaluationResult::failure(EvalError::StackUnderflow),
    };

    match result {
        StackValue::Number(n) if !n.is_finite() => {
            // Catches overflow combinations no single operator guards against
            EvaluationResult::failure(EvalError::NonFiniteResult)
        }
        StackValue::Number(n) => EvaluationResult::number(n),
        StackValue::Text(s) => EvaluationResult::text(s),
        StackValue::Field(v) => EvaluationResult::text(field_to_text(&v)),
    }
}

fn apply(op: BinOp, left: StackValue, right: StackValue) -> Result<StackValue, EvalError> {
    match op {
        BinOp::Add => {
            // String mode only on an explicit text tag; a field holding text
            // still adds numerically
            if left.is_text() || right.is_text() {
                let mut text = left.into_text();
                text.push_str(&right.into_text());
                Ok(StackValue::Text(text))
            } else {
                Ok(StackValue::Number(left.to_number() + right.to_number()))
            }
        }
        BinOp::Sub => Ok(StackValue::Number(left.to_number() - right.to_number())),
        BinOp::Mul => Ok(StackValue::Number(left.to_number() * right.to_number())),
        BinOp::Div => {
            let divisor = right.to_number();
            if divisor.abs() < f64::EPSILON {
                return Err(EvalError::DivideByZero);
            }
            Ok(StackValue::Number(left.to_number() / divisor))
        }
    }
}
