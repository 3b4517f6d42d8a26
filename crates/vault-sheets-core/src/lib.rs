//! # vault-sheets-core
//!
//! Core data structures for the vault-sheets note-table library.
//!
//! This crate provides the fundamental types used throughout vault-sheets:
//! - [`FieldValue`] - Represents field values (numbers, text, booleans, lists)
//! - [`ColumnDef`] and [`ColumnKind`] - Column definitions, including formula columns
//! - [`Row`] and [`Table`] - The flat table model a note collection renders into
//!
//! ## Example
//!
//! ```rust
//! use vault_sheets_core::{ColumnDef, ColumnKind, FieldValue, Row, Table};
//!
//! let mut table = Table::new();
//! table.add_column(ColumnDef::new("title", ColumnKind::Text)).unwrap();
//! table.add_column(ColumnDef::new("price", ColumnKind::Number)).unwrap();
//!
//! let mut row = Row::new();
//! row.set("title", "Espresso");
//! row.set("price", 2.5);
//! table.add_row(row);
//!
//! assert_eq!(table.value(0, "price"), Some(&FieldValue::Number(2.5)));
//! ```

pub mod column;
pub mod error;
pub mod row;
pub mod table;
pub mod value;

// Re-exports for convenience
pub use column::{ColumnDef, ColumnKind};
pub use error::{Error, Result};
pub use row::Row;
pub use table::Table;
pub use value::{FieldValue, TextPool};

/// Default ceiling on the number of rows a single formula pass will evaluate
pub const MAX_FORMULA_ROWS: usize = 10_000;

/// Maximum length of a column name
pub const MAX_COLUMN_NAME_LEN: usize = 255;
