use filter_compiler::CompileError;
use predicate_syntax::BuildError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read the predicate file: {0}")]
    PredicateFileRead(#[from] std::io::Error),

    #[error("Failed to compile the predicate: {0}")]
    Compile(#[from] CompileError),

    #[error("Failed to parse the predicate: {0}")]
    Parse(#[from] BuildError),

    #[error("Failed to parse captures as JSON: {0}")]
    CapturesParse(serde_json::Error),

    #[error("Captures must be a JSON object, got: {0}")]
    CapturesNotObject(String),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),

    #[error("Provide a predicate via --predicate or --file")]
    MissingPredicate,
}
