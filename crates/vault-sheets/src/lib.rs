//! # vault-sheets
//!
//! A Rust library for rendering collections of notes as spreadsheet-like
//! tables with formula-derived columns.
//!
//! Vault-sheets provides the data and compute layer of a note-table plugin:
//! the table model (columns, rows, field values), a small formula engine
//! (`{field} + {other} * 2`), and the recalculation layer that applies
//! formula columns across a table with compile caching, a self-reference
//! guard and a row ceiling.
//!
//! ## Example
//!
//! ```rust
//! use vault_sheets::prelude::*;
//!
//! let mut table = Table::new();
//! table.add_column(ColumnDef::new("price", ColumnKind::Number)).unwrap();
//! table.add_column(ColumnDef::new("qty", ColumnKind::Number)).unwrap();
//! table.add_column(ColumnDef::formula("total", "{price} * {qty}")).unwrap();
//!
//! table.add_row([("price", 2.5), ("qty", 4.0)].into_iter().collect());
//!
//! let report = table.recalculate();
//! assert_eq!(report.stats.cells_evaluated, 1);
//! assert_eq!(table.value(0, "total"), Some(&FieldValue::Number(10.0)));
//! ```

pub mod prelude;
pub mod recalc;

// Re-export recalculation types
pub use recalc::{
    Diagnostic, FormulaCache, RecalcOptions, RecalcReport, RecalcStats, TableRecalcExt,
};

// Re-export core types
pub use vault_sheets_core::{
    ColumnDef, ColumnKind, Error, FieldValue, Result, Row, Table, TextPool, MAX_COLUMN_NAME_LEN,
    MAX_FORMULA_ROWS,
};

// Re-export formula engine types
pub use vault_sheets_formula::{
    compile, evaluate, evaluate_with, BinOp, CompileError, CompiledFormula, EvalError,
    EvaluationResult, ResultKind, RpnToken, Token, ERROR_VALUE,
};
