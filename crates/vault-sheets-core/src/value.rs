//! Field value types

use ahash::AHashSet;
use std::fmt;
use std::sync::Arc;

/// Represents the value stored in a row field
///
/// Field values come from note properties, so the variants mirror the
/// property kinds a vault exposes: text, numbers, checkboxes and lists.
/// `Empty` models a missing or null property.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Missing or null field
    Empty,

    /// Numeric value (all numbers stored as f64)
    Number(f64),

    /// Text value (shared so repeated cell text is stored once)
    Text(Arc<str>),

    /// Checkbox value
    Bool(bool),

    /// List property (tags, aliases, multi-value fields)
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Create a new text value
    pub fn text<S: AsRef<str>>(s: S) -> Self {
        FieldValue::Text(Arc::from(s.as_ref()))
    }

    /// Check if the field is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Empty)
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Bool(true) => Some(1.0),
            FieldValue::Bool(false) => Some(0.0),
            _ => None,
        }
    }

    /// Try to get the value as a text slice
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Empty => "empty",
            FieldValue::Number(_) => "number",
            FieldValue::Text(_) => "text",
            FieldValue::Bool(_) => "bool",
            FieldValue::List(_) => "list",
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Empty
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Empty => write!(f, ""),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::text(s)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::text(s)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FieldValue::Empty,
            serde_json::Value::Bool(b) => FieldValue::Bool(b),
            serde_json::Value::Number(n) => {
                FieldValue::Number(n.as_f64().unwrap_or(f64::NAN))
            }
            serde_json::Value::String(s) => FieldValue::text(s),
            serde_json::Value::Array(items) => {
                FieldValue::List(items.into_iter().map(FieldValue::from).collect())
            }
            // Nested objects have no cell representation; render as text
            object @ serde_json::Value::Object(_) => FieldValue::text(object.to_string()),
        }
    }
}

/// Interning pool for repeated cell text
///
/// Vault tables repeat the same text across thousands of rows ("Yes", "No",
/// tag names). The pool hands out shared `Arc<str>` handles so each unique
/// string is stored only once.
#[derive(Debug, Default)]
pub struct TextPool {
    strings: AHashSet<Arc<str>>,
}

impl TextPool {
    /// Create a new empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create a shared handle for `s`
    pub fn intern(&mut self, s: &str) -> Arc<str> {
        if let Some(existing) = self.strings.get(s) {
            existing.clone()
        } else {
            let arc: Arc<str> = Arc::from(s);
            self.strings.insert(arc.clone());
            arc
        }
    }

    /// Intern text directly into a [`FieldValue`]
    pub fn text_value(&mut self, s: &str) -> FieldValue {
        FieldValue::Text(self.intern(s))
    }

    /// Number of unique strings in the pool
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the pool is empty
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Clear all strings from the pool
    pub fn clear(&mut self) {
        self.strings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_value_conversions() {
        assert_eq!(FieldValue::from(42), FieldValue::Number(42.0));
        assert_eq!(FieldValue::from(3.14), FieldValue::Number(3.14));
        assert_eq!(FieldValue::from(true), FieldValue::Bool(true));

        let s = FieldValue::from("hello");
        assert_eq!(s.as_text(), Some("hello"));
    }

    #[test]
    fn test_field_value_as_number() {
        assert_eq!(FieldValue::Number(42.0).as_number(), Some(42.0));
        assert_eq!(FieldValue::Bool(true).as_number(), Some(1.0));
        assert_eq!(FieldValue::Bool(false).as_number(), Some(0.0));
        assert_eq!(FieldValue::text("hello").as_number(), None);
        assert_eq!(FieldValue::Empty.as_number(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::Empty.to_string(), "");
        assert_eq!(FieldValue::text("abc").to_string(), "abc");
        assert_eq!(FieldValue::Bool(true).to_string(), "true");

        let list = FieldValue::List(vec![FieldValue::text("a"), FieldValue::text("b")]);
        assert_eq!(list.to_string(), "a, b");
    }

    #[test]
    fn test_from_json() {
        let v: FieldValue = serde_json::json!(2.5).into();
        assert_eq!(v, FieldValue::Number(2.5));

        let v: FieldValue = serde_json::json!(null).into();
        assert_eq!(v, FieldValue::Empty);

        let v: FieldValue = serde_json::json!(["x", 1]).into();
        assert_eq!(
            v,
            FieldValue::List(vec![FieldValue::text("x"), FieldValue::Number(1.0)])
        );
    }

    #[test]
    fn test_text_pool() {
        let mut pool = TextPool::new();

        let s1 = pool.intern("hello");
        let s2 = pool.intern("hello");
        let s3 = pool.intern("world");

        // Same string should return the same allocation
        assert!(Arc::ptr_eq(&s1, &s2));
        assert!(!Arc::ptr_eq(&s1, &s3));

        assert_eq!(pool.len(), 2);
    }
}
