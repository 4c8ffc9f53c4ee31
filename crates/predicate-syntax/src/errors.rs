/// Error type for AST building
#[derive(Debug, Clone)]
pub struct BuildError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for BuildError {}
