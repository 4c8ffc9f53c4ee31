use crate::ast::{expr::Expression, span::Span};
use serde::{Deserialize, Serialize};

/// A single-expression arrow lambda, e.g. `a => a.email == 'hi'` or
/// `(a, params) => a.age >= params.minAge`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lambda {
    pub params: Vec<String>,
    pub body: Box<Expression>,
    pub span: Span,
}

impl Lambda {
    /// The bound parameter a predicate body is queried against
    pub fn parameter(&self) -> &str {
        &self.params[0]
    }
}
