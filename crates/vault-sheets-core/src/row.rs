//! Row types

use crate::value::FieldValue;
use ahash::AHashMap;

/// One note's field map: the per-row context formulas evaluate against
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: AHashMap<String, FieldValue>,
}

impl Row {
    /// Create a new empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a field value
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Set a field value, returning the previous value if any
    pub fn set<S: Into<String>, V: Into<FieldValue>>(
        &mut self,
        field: S,
        value: V,
    ) -> Option<FieldValue> {
        self.values.insert(field.into(), value.into())
    }

    /// Remove a field, returning its value if present
    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.values.remove(field)
    }

    /// Check whether the row has a value for `field`
    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Number of fields set on this row
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no fields are set
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(field, value)` pairs (unordered)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<S: Into<String>, V: Into<FieldValue>> FromIterator<(S, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (field, value) in iter {
            row.set(field, value);
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get() {
        let mut row = Row::new();
        assert!(row.is_empty());

        row.set("title", "Espresso");
        row.set("price", 2.5);

        assert_eq!(row.get("title"), Some(&FieldValue::text("Espresso")));
        assert_eq!(row.get("price"), Some(&FieldValue::Number(2.5)));
        assert_eq!(row.get("missing"), None);
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_from_iter() {
        let row: Row = [("a", 1.0), ("b", 2.0)].into_iter().collect();
        assert!(row.contains("a"));
        assert!(row.contains("b"));
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_overwrite_returns_previous() {
        let mut row = Row::new();
        assert_eq!(row.set("x", 1.0), None);
        assert_eq!(row.set("x", 2.0), Some(FieldValue::Number(1.0)));
    }
}
