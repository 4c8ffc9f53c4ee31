use serde::{Deserialize, Serialize};

/// Source location of an AST node (byte offsets plus line/column of the start)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Span {
            start,
            end,
            line,
            column,
        }
    }

    /// Span covering both `self` and `other`, anchored at `self`'s position
    pub fn merge(&self, other: &Span) -> Span {
        Span::new(self.start, other.end, self.line, self.column)
    }
}
