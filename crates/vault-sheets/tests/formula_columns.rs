//! Tests for formula columns recalculated over a table

use vault_sheets::prelude::*;

fn menu_table() -> Table {
    let mut table = Table::new();
    table
        .add_column(ColumnDef::new("item", ColumnKind::Text))
        .unwrap();
    table
        .add_column(ColumnDef::new("price", ColumnKind::Number))
        .unwrap();
    table
        .add_column(ColumnDef::new("qty", ColumnKind::Number))
        .unwrap();

    table.add_row([("item", "espresso"), ("price", "2.5"), ("qty", "4")].into_iter().collect());
    table.add_row([("item", "flat white"), ("price", "3.5"), ("qty", "2")].into_iter().collect());
    table.add_row([("item", "water"), ("price", "0"), ("qty", "10")].into_iter().collect());
    table
}

/// A derived column computes across every row of the table
#[test]
fn test_derived_column_over_rows() {
    let mut table = menu_table();
    table
        .add_column(ColumnDef::formula("total", "{price} * {qty}"))
        .unwrap();

    let report = table.recalculate();
    assert_eq!(report.stats.formula_columns, 1);
    assert_eq!(report.stats.cells_evaluated, 3);
    assert_eq!(report.stats.eval_errors, 0);

    assert_eq!(table.value(0, "total"), Some(&FieldValue::Number(10.0)));
    assert_eq!(table.value(1, "total"), Some(&FieldValue::Number(7.0)));
    assert_eq!(table.value(2, "total"), Some(&FieldValue::Number(0.0)));
}

/// String-mode formulas store text results
#[test]
fn test_text_formula_column() {
    let mut table = menu_table();
    table
        .add_column(ColumnDef::formula("label", "{item} + \" x\" + {qty}"))
        .unwrap();

    table.recalculate();
    assert_eq!(table.value(0, "label"), Some(&FieldValue::text("espresso x4")));
    assert_eq!(table.value(2, "label"), Some(&FieldValue::text("water x10")));
}

/// A column whose formula fails to compile shows the sentinel in every row
/// while other formula columns still compute
#[test]
fn test_compile_error_isolated_to_its_column() {
    let mut table = menu_table();
    table
        .add_column(ColumnDef::formula("broken", "(1 + 2"))
        .unwrap();
    table
        .add_column(ColumnDef::formula("total", "{price} * {qty}"))
        .unwrap();

    let report = table.recalculate();
    assert_eq!(report.stats.compile_errors, 1);

    for idx in 0..table.row_count() {
        assert_eq!(table.value(idx, "broken"), Some(&FieldValue::text(ERROR_VALUE)));
    }
    assert_eq!(table.value(0, "total"), Some(&FieldValue::Number(10.0)));

    // The diagnostic is column-level, not per row
    let diag = report
        .diagnostics
        .iter()
        .find(|d| d.column == "broken")
        .unwrap();
    assert_eq!(diag.row, None);
    assert_eq!(diag.message, "unmatched parenthesis");
}

/// A per-cell failure flags only the failing rows
#[test]
fn test_eval_error_flags_failing_rows_only() {
    let mut table = menu_table();
    table
        .add_column(ColumnDef::formula("unit", "{price} / {qty}"))
        .unwrap();
    // Row with qty 0 divides by zero
    table.add_row([("item", "tea"), ("price", "2"), ("qty", "0")].into_iter().collect());

    let report = table.recalculate();
    assert_eq!(report.stats.eval_errors, 1);
    assert_eq!(table.value(3, "unit"), Some(&FieldValue::text(ERROR_VALUE)));
    assert_eq!(table.value(0, "unit"), Some(&FieldValue::Number(0.625)));

    let diag = &report.diagnostics[0];
    assert_eq!(diag.column, "unit");
    assert_eq!(diag.row, Some(3));
    assert_eq!(diag.message, "division by zero");
}

/// A column referencing itself is never evaluated and shows the sentinel
#[test]
fn test_self_reference_guard() {
    let mut table = menu_table();
    table
        .add_column(ColumnDef::formula("echo", "{echo} + 1"))
        .unwrap();

    let report = table.recalculate();
    assert_eq!(report.stats.self_references, 1);
    assert_eq!(report.stats.cells_evaluated, 0);
    for idx in 0..table.row_count() {
        assert_eq!(table.value(idx, "echo"), Some(&FieldValue::text(ERROR_VALUE)));
    }

    // Still refused on a second pass
    let report = table.recalculate();
    assert_eq!(report.stats.self_references, 1);
}

/// Tables above the row ceiling evaluate nothing
#[test]
fn test_row_ceiling_skips_the_pass() {
    let mut table = Table::new();
    table
        .add_column(ColumnDef::new("n", ColumnKind::Number))
        .unwrap();
    table
        .add_column(ColumnDef::formula("double", "{n} * 2"))
        .unwrap();
    for i in 0..5 {
        table.add_row([("n", i as f64)].into_iter().collect());
    }

    let mut cache = FormulaCache::new();
    let options = RecalcOptions { row_limit: 3 };
    let report = table.recalculate_with(&mut cache, &options);

    assert!(report.stats.row_limit_hit);
    assert_eq!(report.stats.cells_evaluated, 0);
    assert_eq!(table.value(0, "double"), None);
    assert_eq!(report.diagnostics.len(), 1);

    // Raising the limit lets the same table compute
    let options = RecalcOptions { row_limit: 100 };
    let report = table.recalculate_with(&mut cache, &options);
    assert!(!report.stats.row_limit_hit);
    assert_eq!(table.value(4, "double"), Some(&FieldValue::Number(8.0)));
}

/// Formula columns run in display order, so chains that point forward in
/// the column list read fresh values
#[test]
fn test_chained_formula_columns() {
    let mut table = Table::new();
    table
        .add_column(ColumnDef::new("base", ColumnKind::Number))
        .unwrap();
    table
        .add_column(ColumnDef::formula("double", "{base} * 2"))
        .unwrap();
    table
        .add_column(ColumnDef::formula("quad", "{double} * 2"))
        .unwrap();
    table.add_row([("base", 3.0)].into_iter().collect());

    table.recalculate();
    assert_eq!(table.value(0, "quad"), Some(&FieldValue::Number(12.0)));
}

/// The cache carries compiled formulas across passes and tables
#[test]
fn test_cache_reused_across_passes() {
    let mut table = menu_table();
    table
        .add_column(ColumnDef::formula("total", "{price} * {qty}"))
        .unwrap();

    let mut cache = FormulaCache::new();
    let options = RecalcOptions::default();
    table.recalculate_with(&mut cache, &options);
    assert_eq!(cache.len(), 1);

    table.recalculate_with(&mut cache, &options);
    assert_eq!(cache.len(), 1);
}

/// Two columns with the same source share one compiled formula
#[test]
fn test_identical_sources_compile_once() {
    let mut table = menu_table();
    table
        .add_column(ColumnDef::formula("a", "{price} * {qty}"))
        .unwrap();
    table
        .add_column(ColumnDef::formula("b", "{price} * {qty}"))
        .unwrap();

    let mut cache = FormulaCache::new();
    table.recalculate_with(&mut cache, &RecalcOptions::default());
    assert_eq!(cache.len(), 1);
    assert_eq!(table.value(0, "a"), table.value(0, "b"));
}

/// A formula over a field no other column declares reads as empty
#[test]
fn test_missing_field_evaluates_to_empty() {
    let mut table = menu_table();
    table
        .add_column(ColumnDef::formula("note", "{missing}"))
        .unwrap();

    let report = table.recalculate();
    assert_eq!(report.stats.eval_errors, 0);
    assert_eq!(table.value(0, "note"), Some(&FieldValue::text("")));
}
