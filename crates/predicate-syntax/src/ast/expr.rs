use crate::ast::{
    lambda::Lambda,
    literal::Literal,
    operator::{BinaryOperator, UnaryOperator},
    span::Span,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: Span,
}

impl Expression {
    pub fn new(kind: ExpressionKind, span: Span) -> Self {
        Expression { kind, span }
    }
}

/// Expression types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExpressionKind {
    Literal(Literal),
    Identifier(String),
    /// Property access, e.g. `a.email` or `a.address.city`
    Member {
        object: Box<Expression>,
        property: String,
    },
    /// Bracket indexing, e.g. `a.notes[-1]`. Only a negative numeric
    /// index survives compilation (the array-element marker).
    ArrayIndex {
        object: Box<Expression>,
        index: Box<Expression>,
    },
    Binary {
        left: Box<Expression>,
        operator: BinaryOperator,
        right: Box<Expression>,
    },
    Unary {
        operator: UnaryOperator,
        operand: Box<Expression>,
    },
    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
    /// A nested lambda, the single argument of `.some(...)`
    Lambda(Lambda),
    /// Ternary, recognized so it can be rejected with a tagged diagnostic
    Conditional {
        condition: Box<Expression>,
        consequent: Box<Expression>,
        alternate: Box<Expression>,
    },
}
