//! Vault Sheets CLI - formula evaluation and inspection tool

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use vault_sheets::prelude::*;

#[derive(Parser)]
#[command(name = "vsheets")]
#[command(
    author,
    version,
    about = "Evaluate vault-sheets formulas from the command line"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile and evaluate a formula against an ad-hoc row
    Eval {
        /// Formula text, e.g. '{a} + {b} * 2'
        formula: String,

        /// Field values as name=value pairs; override --json fields
        #[arg(short, long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,

        /// Field values as a JSON object
        #[arg(long, value_name = "JSON")]
        json: Option<String>,
    },

    /// Show the compiled form of a formula
    #[command(alias = "rpn")]
    Compile {
        /// Formula text
        formula: String,
    },

    /// Apply formula columns to a CSV table
    Table {
        /// Input CSV file with a header row
        input: PathBuf,

        /// Formula columns as name=expression pairs (repeatable)
        #[arg(short, long = "formula", value_name = "NAME=EXPR")]
        formula: Vec<String>,

        /// Output CSV file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum row count before evaluation is skipped
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Eval { formula, set, json } => eval_formula(&formula, &set, json.as_deref()),
        Commands::Compile { formula } => show_compiled(&formula),
        Commands::Table {
            input,
            formula,
            output,
            limit,
        } => apply_to_table(&input, &formula, output.as_deref(), limit),
    }
}

fn eval_formula(formula: &str, set: &[String], json: Option<&str>) -> Result<()> {
    let compiled =
        compile(formula).with_context(|| format!("Failed to compile '{}'", formula))?;

    let mut row = Row::new();
    if let Some(json) = json {
        let value: serde_json::Value =
            serde_json::from_str(json).context("Failed to parse --json")?;
        let object = value.as_object().context("--json must be an object")?;
        for (field, value) in object {
            row.set(field.as_str(), FieldValue::from(value.clone()));
        }
    }
    for pair in set {
        let (field, value) = parse_pair(pair)?;
        row.set(field, parse_value(value));
    }

    let result = evaluate(&compiled, &row);
    if let Some(message) = result.message() {
        eprintln!("Warning: {}", message);
    }
    println!("{}", result.value);
    Ok(())
}

fn show_compiled(formula: &str) -> Result<()> {
    let compiled =
        compile(formula).with_context(|| format!("Failed to compile '{}'", formula))?;

    println!("source:  {}", compiled.source());
    println!("fields:  {}", compiled.dependencies().join(", "));
    let postfix: Vec<String> = compiled.rpn().iter().map(|t| t.to_string()).collect();
    println!("postfix: {}", postfix.join(" "));
    Ok(())
}

fn apply_to_table(
    input: &Path,
    formulas: &[String],
    output: Option<&Path>,
    limit: Option<usize>,
) -> Result<()> {
    let mut reader = csv::Reader::from_path(input)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read CSV header")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut table = Table::new();
    for header in &headers {
        table
            .add_column(ColumnDef::new(header, ColumnKind::Text))
            .with_context(|| format!("Bad CSV header '{}'", header))?;
    }

    let mut formula_names = Vec::new();
    for pair in formulas {
        let (name, expr) = parse_pair(pair)?;
        table
            .add_column(ColumnDef::formula(name, expr))
            .with_context(|| format!("Bad formula column '{}'", name))?;
        formula_names.push(name.to_string());
    }

    // Intern cell text; CSV columns repeat the same values constantly
    let mut pool = TextPool::new();
    for record in reader.records() {
        let record = record.context("Failed to read CSV record")?;
        let mut row = Row::new();
        for (field, value) in headers.iter().zip(record.iter()) {
            row.set(field.as_str(), pool.text_value(value));
        }
        table.add_row(row);
    }

    let mut cache = FormulaCache::new();
    let mut options = RecalcOptions::default();
    if let Some(limit) = limit {
        options.row_limit = limit;
    }
    let report = table.recalculate_with(&mut cache, &options);

    for diag in &report.diagnostics {
        match diag.row {
            Some(row) => eprintln!(
                "Warning: {} (column '{}', row {})",
                diag.message, diag.column, row
            ),
            None => eprintln!("Warning: {} (column '{}')", diag.message, diag.column),
        }
    }

    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create '{}'", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };
    let mut writer = csv::Writer::from_writer(sink);

    let all_names: Vec<&str> = headers
        .iter()
        .map(|s| s.as_str())
        .chain(formula_names.iter().map(|s| s.as_str()))
        .collect();
    writer.write_record(&all_names)?;

    for row in table.rows() {
        let record: Vec<String> = all_names
            .iter()
            .map(|name| row.get(name).map(|v| v.to_string()).unwrap_or_default())
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;

    eprintln!(
        "Computed {} columns over {} rows ({} errors)",
        formula_names.len(),
        table.row_count(),
        report.stats.compile_errors + report.stats.eval_errors
    );
    Ok(())
}

/// Split a `name=rest` argument
fn parse_pair(pair: &str) -> Result<(&str, &str)> {
    match pair.split_once('=') {
        Some((name, rest)) if !name.trim().is_empty() => Ok((name.trim(), rest)),
        _ => bail!("Expected NAME=VALUE, got '{}'", pair),
    }
}

/// Interpret a --set value: number, boolean, or text
fn parse_value(raw: &str) -> FieldValue {
    if let Ok(n) = raw.trim().parse::<f64>() {
        return FieldValue::Number(n);
    }
    match raw.trim() {
        "true" => FieldValue::Bool(true),
        "false" => FieldValue::Bool(false),
        _ => FieldValue::text(raw),
    }
}
