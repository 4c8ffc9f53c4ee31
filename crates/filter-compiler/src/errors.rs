use predicate_syntax::errors::BuildError;
use thiserror::Error;

/// One variant per violated compilation rule. Every failure aborts the
/// whole predicate; no partial filter document is ever produced.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("{0}")]
    Parse(#[from] BuildError),

    #[error("Unsupported expression at line {line}, column {column}: {expression}")]
    UnsupportedExpression {
        expression: String,
        line: usize,
        column: usize,
    },

    #[error(
        "Path must be an identifier or property access at line {line}, column {column}: {expression}"
    )]
    UnsupportedPath {
        expression: String,
        line: usize,
        column: usize,
    },

    #[error("Array index can only be -1 at line {line}, column {column}: {expression}")]
    UnsupportedArrayIndex {
        expression: String,
        line: usize,
        column: usize,
    },

    #[error("Invalid literal at line {line}, column {column}: {expression}")]
    InvalidLiteral {
        expression: String,
        line: usize,
        column: usize,
    },

    #[error("Only some() calls with a single lambda argument are supported at line {line}, column {column}: {expression}")]
    MalformedCall {
        expression: String,
        line: usize,
        column: usize,
    },

    #[error(
        "some() over a captured array must compare the element against a field at line {line}, column {column}: {expression}"
    )]
    UnsupportedSomeForm {
        expression: String,
        line: usize,
        column: usize,
    },

    #[error("Malformed comparison at line {line}, column {column}: {expression}")]
    MalformedComparison {
        expression: String,
        line: usize,
        column: usize,
    },

    #[error("Operand of '!' must be a complete filter condition at line {line}, column {column}: {expression}")]
    MalformedUnary {
        expression: String,
        line: usize,
        column: usize,
    },

    #[error("No captured value bound for '{name}' at line {line}, column {column}")]
    UnboundCapture {
        name: String,
        line: usize,
        column: usize,
    },
}
