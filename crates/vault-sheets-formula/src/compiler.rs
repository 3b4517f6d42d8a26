//! Formula compiler
//!
//! Converts infix formula text into an immutable postfix form via the
//! shunting-yard algorithm, collecting the referenced field names along the
//! way.

use crate::error::CompileError;
use crate::lexer;
use crate::token::{BinOp, RpnToken, Token};
use ahash::AHashSet;

/// The compiled form of a formula: postfix tokens plus referenced fields
///
/// Built once per distinct formula source and reused for every row of every
/// render pass. Immutable after construction.
///
/// # Example
/// ```rust
/// use vault_sheets_formula::compile;
///
/// let formula = compile("= {a} + {b} * 2").unwrap();
/// assert_eq!(formula.dependencies(), ["a", "b"]);
/// assert!(formula.references("a"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFormula {
    source: String,
    rpn: Vec<RpnToken>,
    dependencies: Vec<String>,
}

impl CompiledFormula {
    /// The original formula text, as the user wrote it
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The postfix token sequence
    pub fn rpn(&self) -> &[RpnToken] {
        &self.rpn
    }

    /// Every referenced field name, deduplicated, in order of first use
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// Check whether the formula references `field`
    ///
    /// Callers use this to refuse a formula column that references itself.
    pub fn references(&self, field: &str) -> bool {
        self.dependencies.iter().any(|d| d == field)
    }
}

/// Compile a formula string into a [`CompiledFormula`]
///
/// Strips one leading `=` and normalizes curly smart quotes to `"` before
/// tokenizing.
pub fn compile(raw: &str) -> Result<CompiledFormula, CompileError> {
    let normalized = normalize(raw);
    let tokens = lexer::tokenize(&normalized)?;
    if tokens.is_empty() {
        return Err(CompileError::EmptyFormula);
    }

    let (rpn, dependencies) = to_rpn(tokens)?;
    Ok(CompiledFormula {
        source: raw.to_string(),
        rpn,
        dependencies,
    })
}

fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('=').unwrap_or(trimmed);
    trimmed
        .chars()
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' => '"',
            _ => c,
        })
        .collect()
}

/// Operator-stack entries; a left paren is a marker, not an operator
enum StackEntry {
    Op(BinOp),
    LeftParen,
}

/// Kind of the previously consumed token, for unary detection
#[derive(Clone, Copy)]
enum Prev {
    Start,
    Value,
    Operator,
    LeftParen,
    RightParen,
}

fn to_rpn(tokens: Vec<Token>) -> Result<(Vec<RpnToken>, Vec<String>), CompileError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<StackEntry> = Vec::new();
    let mut dependencies = Vec::new();
    let mut seen = AHashSet::new();
    let mut prev = Prev::Start;

    for token in tokens {
        match token {
            Token::Number(n) => {
                output.push(RpnToken::Number(n));
                prev = Prev::Value;
            }
            Token::String(s) => {
                output.push(RpnToken::String(s));
                prev = Prev::Value;
            }
            Token::Field(name) => {
                if seen.insert(name.clone()) {
                    dependencies.push(name.clone());
                }
                output.push(RpnToken::Field(name));
                prev = Prev::Value;
            }
            Token::Op(op) => {
                if matches!(prev, Prev::Start | Prev::Operator | Prev::LeftParen) {
                    // Unary position: `-5` compiles as `0 - 5`
                    match op {
                        BinOp::Add | BinOp::Sub => output.push(RpnToken::Number(0.0)),
                        BinOp::Mul | BinOp::Div => {
                            return Err(CompileError::UnaryNotSupported(op.symbol()))
                        }
                    }
                }
                // The >= comparison makes equal-precedence operators
                // left-associative
                while let Some(StackEntry::Op(top)) = stack.last() {
                    let top = *top;
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    stack.pop();
                    output.push(RpnToken::Op(top));
                }
                stack.push(StackEntry::Op(op));
                prev = Prev::Operator;
            }
            Token::LeftParen => {
                stack.push(StackEntry::LeftParen);
                prev = Prev::LeftParen;
            }
            Token::RightParen => {
                loop {
                    match stack.pop() {
                        Some(StackEntry::Op(op)) => output.push(RpnToken::Op(op)),
                        Some(StackEntry::LeftParen) => break,
                        None => return Err(CompileError::UnmatchedParen),
                    }
                }
                prev = Prev::RightParen;
            }
        }
    }

    while let Some(entry) = stack.pop() {
        match entry {
            StackEntry::Op(op) => output.push(RpnToken::Op(op)),
            StackEntry::LeftParen => return Err(CompileError::UnmatchedParen),
        }
    }

    Ok((output, dependencies))
}
