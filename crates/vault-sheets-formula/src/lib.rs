//! # vault-sheets-formula
//!
//! Formula compiler and evaluator for vault-sheets derived columns.
//!
//! A formula column computes each cell from the other fields of its row,
//! using spreadsheet-style expressions over `{field}` references:
//!
//! ```text
//! {price} * {qty}
//! {first} + " " + {last}
//! ({subtotal} + {tax}) / {count}
//! ```
//!
//! The pipeline has two phases. [`compile`] runs once per distinct formula
//! text and produces an immutable [`CompiledFormula`] (a postfix token list
//! plus the referenced field names). [`evaluate`] runs once per row and
//! reduces the postfix form against that row's values, returning an
//! [`EvaluationResult`]. It never panics and never returns `Err`; runtime
//! failures surface as the `"#ERR"` sentinel with a diagnostic attached.
//!
//! ## Example
//!
//! ```rust
//! use vault_sheets_core::Row;
//! use vault_sheets_formula::{compile, evaluate};
//!
//! let formula = compile("{a} + {b} * 2").unwrap();
//! assert_eq!(formula.dependencies(), ["a", "b"]);
//!
//! let row: Row = [("a", 1.0), ("b", 3.0)].into_iter().collect();
//! assert_eq!(evaluate(&formula, &row).value, "7");
//! ```

pub mod coerce;
pub mod compiler;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod token;

pub use compiler::{compile, CompiledFormula};
pub use error::{CompileError, EvalError, ERROR_VALUE};
pub use evaluator::{evaluate, evaluate_with, EvaluationResult, ResultKind};
pub use token::{BinOp, RpnToken, Token};
