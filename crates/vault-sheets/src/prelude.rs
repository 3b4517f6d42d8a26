//! Prelude module - common imports for vault-sheets users
//!
//! ```rust
//! use vault_sheets::prelude::*;
//! ```

pub use crate::{
    // Formula engine
    compile,
    evaluate,
    // Table model
    ColumnDef,
    ColumnKind,
    CompileError,
    CompiledFormula,

    Diagnostic,
    // Error types
    Error,
    EvalError,
    EvaluationResult,
    FieldValue,
    // Recalculation
    FormulaCache,
    RecalcOptions,
    RecalcReport,
    RecalcStats,
    Result,
    ResultKind,
    Row,
    Table,
    TableRecalcExt,
    TextPool,
    ERROR_VALUE,
};
