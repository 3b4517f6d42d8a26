//! The flat table model

use crate::column::ColumnDef;
use crate::error::{Error, Result};
use crate::row::Row;
use crate::value::FieldValue;
use crate::MAX_COLUMN_NAME_LEN;

/// A table: ordered column definitions plus the rows they describe
///
/// Column order is the grid's display order. Rows are keyed by field name
/// rather than position, so adding or reordering columns never touches row
/// data.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<ColumnDef>,
    rows: Vec<Row>,
}

impl Table {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    // === Columns ===

    /// Add a column; fails on an empty, oversized or duplicate name
    pub fn add_column(&mut self, column: ColumnDef) -> Result<()> {
        if column.name.trim().is_empty() || column.name.len() > MAX_COLUMN_NAME_LEN {
            return Err(Error::InvalidColumnName(column.name));
        }
        if self.column(&column.name).is_some() {
            return Err(Error::DuplicateColumn(column.name));
        }
        self.columns.push(column);
        Ok(())
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get a mutable column by name
    pub fn column_mut(&mut self, name: &str) -> Option<&mut ColumnDef> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    /// Remove a column definition; row data for the field is kept
    pub fn remove_column(&mut self, name: &str) -> Result<ColumnDef> {
        let idx = self
            .columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))?;
        Ok(self.columns.remove(idx))
    }

    /// All column definitions, in display order
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Formula columns, in display order
    pub fn formula_columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().filter(|c| c.is_formula())
    }

    // === Rows ===

    /// Append a row
    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Get a row by index
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Get a mutable row by index
    pub fn row_mut(&mut self, index: usize) -> Option<&mut Row> {
        self.rows.get_mut(index)
    }

    /// All rows
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// All rows, mutable
    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    // === Values ===

    /// Get a single cell value
    pub fn value(&self, row: usize, field: &str) -> Option<&FieldValue> {
        self.rows.get(row).and_then(|r| r.get(field))
    }

    /// Set a single cell value; the column must exist
    pub fn set_value<V: Into<FieldValue>>(
        &mut self,
        row: usize,
        field: &str,
        value: V,
    ) -> Result<()> {
        if self.column(field).is_none() {
            return Err(Error::UnknownColumn(field.to_string()));
        }
        let count = self.rows.len();
        let row = self
            .rows
            .get_mut(row)
            .ok_or(Error::RowOutOfBounds(row, count))?;
        row.set(field, value);
        Ok(())
    }
}
