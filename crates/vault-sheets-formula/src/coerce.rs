//! Coercion and canonical formatting
//!
//! Every number↔text conversion the engine performs lives here, so the rules
//! can be tested on their own and cannot drift between the evaluator and the
//! single-token fast path.

use vault_sheets_core::FieldValue;

/// Coerce text to a number: trimmed, empty means zero, and anything that
/// fails to parse to a finite value means zero. Never fails.
pub fn text_to_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Coerce a field value to a number
///
/// Non-text, non-number values are stringified first and then follow the
/// text rule.
pub fn field_to_number(value: &FieldValue) -> f64 {
    match value {
        FieldValue::Number(n) => *n,
        FieldValue::Text(s) => text_to_number(s),
        other => text_to_number(&field_to_text(other)),
    }
}

/// Canonical text form of a number
///
/// Integers render without a decimal point; everything else renders to six
/// fractional digits with trailing zeros and a trailing bare dot stripped.
pub fn number_to_text(n: f64) -> String {
    if !n.is_finite() {
        return n.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    if n.fract() == 0.0 {
        return format!("{:.0}", n);
    }
    let rendered = format!("{:.6}", n);
    rendered
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Canonical text form of a field value
pub fn field_to_text(value: &FieldValue) -> String {
    match value {
        FieldValue::Empty => String::new(),
        FieldValue::Number(n) => number_to_text(*n),
        FieldValue::Text(s) => s.to_string(),
        FieldValue::Bool(b) => b.to_string(),
        FieldValue::List(items) => items
            .iter()
            .map(field_to_text)
            .collect::<Vec<_>>()
            .join(", "),
    }
}
