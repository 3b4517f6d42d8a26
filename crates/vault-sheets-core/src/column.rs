//! Column types

/// What a column holds and how its cells are produced
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnKind {
    /// Free text
    Text,
    /// Numeric input
    Number,
    /// Checkbox
    Checkbox,
    /// Multi-value field (tags, aliases)
    List,
    /// Derived column: cells are computed from a formula over other columns
    Formula {
        /// Formula source text, e.g. `{price} * {qty}`
        source: String,
    },
}

/// Column metadata
#[derive(Debug, Clone)]
pub struct ColumnDef {
    /// Field name this column binds to
    pub name: String,
    /// Column kind
    pub kind: ColumnKind,
    /// Column is hidden in the grid
    pub hidden: bool,
    /// Custom width (None = default)
    pub width: Option<f64>,
}

impl ColumnDef {
    /// Create a new column with default settings
    pub fn new<S: Into<String>>(name: S, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
            hidden: false,
            width: None,
        }
    }

    /// Create a formula column
    pub fn formula<S: Into<String>, F: Into<String>>(name: S, source: F) -> Self {
        Self::new(
            name,
            ColumnKind::Formula {
                source: source.into(),
            },
        )
    }

    /// Set hidden
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Set width
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Check if this is a formula column
    pub fn is_formula(&self) -> bool {
        matches!(self.kind, ColumnKind::Formula { .. })
    }

    /// Get the formula source if this is a formula column
    pub fn formula_source(&self) -> Option<&str> {
        match &self.kind {
            ColumnKind::Formula { source } => Some(source),
            _ => None,
        }
    }
}
