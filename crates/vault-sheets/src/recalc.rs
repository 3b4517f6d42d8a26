//! Table recalculation
//!
//! Applies every formula column of a table across its rows, with the
//! data-layer duties the engine itself stays out of: one compiled formula
//! per distinct source string, a guard against columns that reference
//! themselves, and a row ceiling that keeps huge tables responsive.
//!
//! # Example
//!
//! ```rust
//! use vault_sheets::prelude::*;
//!
//! let mut table = Table::new();
//! table.add_column(ColumnDef::new("price", ColumnKind::Number)).unwrap();
//! table.add_column(ColumnDef::formula("with_tax", "{price} * 1.21")).unwrap();
//! table.add_row([("price", 10.0)].into_iter().collect());
//!
//! let report = table.recalculate();
//! assert!(report.diagnostics.is_empty());
//! ```

use ahash::AHashMap;
use std::sync::Arc;
use vault_sheets_core::{FieldValue, Table, MAX_FORMULA_ROWS};
use vault_sheets_formula::{compile, evaluate, CompileError, CompiledFormula, ERROR_VALUE};

/// Options for a recalculation pass
#[derive(Debug, Clone)]
pub struct RecalcOptions {
    /// Skip formula evaluation entirely when the table has more rows than
    /// this (default: [`MAX_FORMULA_ROWS`])
    pub row_limit: usize,
}

impl Default for RecalcOptions {
    fn default() -> Self {
        Self {
            row_limit: MAX_FORMULA_ROWS,
        }
    }
}

/// Statistics from a recalculation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecalcStats {
    /// Number of formula columns in the table
    pub formula_columns: usize,
    /// Number of cells evaluated
    pub cells_evaluated: usize,
    /// Number of columns whose formula failed to compile
    pub compile_errors: usize,
    /// Number of cells whose evaluation failed
    pub eval_errors: usize,
    /// Number of columns refused for referencing themselves
    pub self_references: usize,
    /// Whether the pass was skipped because the table exceeds the row limit
    pub row_limit_hit: bool,
}

/// One entry of the tooltip channel: a message tied to a column, and to a
/// row when the failure is per-cell
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Column the message belongs to
    pub column: String,
    /// Row index for evaluation failures; `None` for column-level failures
    pub row: Option<usize>,
    /// Human-readable message
    pub message: String,
}

/// Outcome of a recalculation pass
#[derive(Debug, Clone, Default)]
pub struct RecalcReport {
    /// Pass statistics
    pub stats: RecalcStats,
    /// Messages for the grid to surface per column/cell
    pub diagnostics: Vec<Diagnostic>,
}

/// Compile cache: one [`CompiledFormula`] (or its compile error) per
/// distinct formula source string
///
/// Hold one of these across render passes; column edits only recompile the
/// sources that actually changed.
#[derive(Debug, Default)]
pub struct FormulaCache {
    compiled: AHashMap<String, Result<Arc<CompiledFormula>, CompileError>>,
}

impl FormulaCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the compiled form of `source`, compiling on first sight
    ///
    /// Failures are cached too: a column whose formula does not compile
    /// reports the stored error on every pass without re-running the
    /// compiler.
    pub fn get_or_compile(&mut self, source: &str) -> Result<Arc<CompiledFormula>, CompileError> {
        if let Some(entry) = self.compiled.get(source) {
            return entry.clone();
        }
        let entry = compile(source).map(Arc::new);
        self.compiled.insert(source.to_string(), entry.clone());
        entry
    }

    /// Number of cached sources
    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    /// Drop all cached formulas
    pub fn clear(&mut self) {
        self.compiled.clear();
    }
}

/// Extension trait adding recalculation to [`Table`]
pub trait TableRecalcExt {
    /// Recalculate all formula columns with default options and a throwaway
    /// cache
    fn recalculate(&mut self) -> RecalcReport;

    /// Recalculate all formula columns, reusing `cache` across passes
    fn recalculate_with(&mut self, cache: &mut FormulaCache, options: &RecalcOptions)
        -> RecalcReport;
}

impl TableRecalcExt for Table {
    fn recalculate(&mut self) -> RecalcReport {
        let mut cache = FormulaCache::new();
        self.recalculate_with(&mut cache, &RecalcOptions::default())
    }

    fn recalculate_with(
        &mut self,
        cache: &mut FormulaCache,
        options: &RecalcOptions,
    ) -> RecalcReport {
        let mut report = RecalcReport::default();

        let columns: Vec<(String, String)> = self
            .formula_columns()
            .map(|c| {
                let source = c.formula_source().unwrap_or_default().to_string();
                (c.name.clone(), source)
            })
            .collect();

        report.stats.formula_columns = columns.len();
        if columns.is_empty() {
            return report;
        }

        if self.row_count() > options.row_limit {
            log::warn!(
                "table has {} rows, above the {}-row formula ceiling; skipping evaluation",
                self.row_count(),
                options.row_limit
            );
            report.stats.row_limit_hit = true;
            for (name, _) in &columns {
                report.diagnostics.push(Diagnostic {
                    column: name.clone(),
                    row: None,
                    message: format!(
                        "formula evaluation skipped: table exceeds {} rows",
                        options.row_limit
                    ),
                });
            }
            return report;
        }

        // Columns run in display order: a formula that reads a later formula
        // column sees that column's previous value
        for (name, source) in columns {
            let compiled = match cache.get_or_compile(&source) {
                Ok(compiled) => compiled,
                Err(e) => {
                    log::debug!("column '{}' failed to compile: {}", name, e);
                    report.stats.compile_errors += 1;
                    report.diagnostics.push(Diagnostic {
                        column: name.clone(),
                        row: None,
                        message: e.to_string(),
                    });
                    fill_sentinel(self, &name);
                    continue;
                }
            };

            if compiled.references(&name) {
                report.stats.self_references += 1;
                report.diagnostics.push(Diagnostic {
                    column: name.clone(),
                    row: None,
                    message: format!("formula references its own column '{}'", name),
                });
                fill_sentinel(self, &name);
                continue;
            }

            for idx in 0..self.row_count() {
                let result = match self.row(idx) {
                    Some(row) => evaluate(&compiled, row),
                    None => continue,
                };
                report.stats.cells_evaluated += 1;

                if let Some(message) = result.message() {
                    report.stats.eval_errors += 1;
                    report.diagnostics.push(Diagnostic {
                        column: name.clone(),
                        row: Some(idx),
                        message,
                    });
                }

                let value = if result.is_error() {
                    FieldValue::text(ERROR_VALUE)
                } else if let Some(n) = result.numeric {
                    FieldValue::Number(n)
                } else {
                    FieldValue::text(result.value)
                };
                if let Some(row) = self.row_mut(idx) {
                    row.set(name.as_str(), value);
                }
            }
        }

        report
    }
}

/// Write the sentinel into every row of a failed column
fn fill_sentinel(table: &mut Table, column: &str) {
    for row in table.rows_mut() {
        row.set(column, FieldValue::text(ERROR_VALUE));
    }
}
