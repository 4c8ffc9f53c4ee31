//! Recursive lowering of a predicate lambda body into the tagged
//! `FilterNode` intermediate.

use crate::{
    errors::CompileError,
    scope::Scope,
    side::Side,
};
use predicate_syntax::ast::{
    expr::{Expression, ExpressionKind},
    operator::BinaryOperator,
    span::Span,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Intermediate filter tree, built bottom-up and rendered once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterNode {
    FieldEquals {
        field: String,
        value: FilterValue,
    },
    FieldOp {
        field: String,
        op: CompareOp,
        value: FilterValue,
    },
    /// Strictly binary; chained `&&`/`||` stay nested left-to-right
    And(Box<FilterNode>, Box<FilterNode>),
    Or(Box<FilterNode>, Box<FilterNode>),
    ElemMatch {
        field: String,
        inner: Box<FilterNode>,
    },
    Size {
        field: String,
        value: FilterValue,
    },
    /// `field` is the inner field path, `value` the captured array's
    /// path text
    In {
        field: String,
        value: String,
    },
}

/// A value in comparison position: an embedded literal or a field
/// reference appearing as a value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterValue {
    Literal(Value),
    Path(String),
}

/// Non-equality comparison operators and their document-store tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOp::Ne => write!(f, "$ne"),
            CompareOp::Gt => write!(f, "$gt"),
            CompareOp::Gte => write!(f, "$gte"),
            CompareOp::Lt => write!(f, "$lt"),
            CompareOp::Lte => write!(f, "$lte"),
        }
    }
}

/// One compilation pass over a single lambda body. Holds the source for
/// error snippets and the caller-supplied captured values.
pub struct Compiler<'a> {
    source: &'a str,
    captures: &'a Map<String, Value>,
    /// Second lambda parameter, if declared; namespaces the captures
    namespace: Option<&'a str>,
}

impl<'a> Compiler<'a> {
    pub fn new(
        source: &'a str,
        captures: &'a Map<String, Value>,
        namespace: Option<&'a str>,
    ) -> Self {
        Compiler {
            source,
            captures,
            namespace,
        }
    }

    pub fn compile_body(&self, body: &Expression, scope: &Scope) -> Result<FilterNode, CompileError> {
        match &body.kind {
            ExpressionKind::Binary {
                left,
                operator,
                right,
            } if operator.is_logical() => {
                let lhs = self.compile_body(left, scope)?;
                let rhs = self.compile_body(right, scope)?;
                Ok(match operator {
                    BinaryOperator::And => FilterNode::And(Box::new(lhs), Box::new(rhs)),
                    _ => FilterNode::Or(Box::new(lhs), Box::new(rhs)),
                })
            }
            ExpressionKind::Binary {
                left,
                operator,
                right,
            } => self.compile_comparison(left, *operator, right, scope, &body.span),
            ExpressionKind::Unary { operand, .. } => {
                let side = self.evaluate_side(operand, scope)?;
                match side {
                    Side::Filter(node) => Ok(node),
                    _ => Err(CompileError::MalformedUnary {
                        expression: self.snippet(&operand.span),
                        line: operand.span.line,
                        column: operand.span.column,
                    }),
                }
            }
            ExpressionKind::Call { .. } => match self.evaluate_side(body, scope)? {
                Side::Filter(node) => Ok(node),
                _ => Err(CompileError::UnsupportedExpression {
                    expression: self.snippet(&body.span),
                    line: body.span.line,
                    column: body.span.column,
                }),
            },
            _ => Err(CompileError::UnsupportedExpression {
                expression: self.snippet(&body.span),
                line: body.span.line,
                column: body.span.column,
            }),
        }
    }

    fn compile_comparison(
        &self,
        left: &Expression,
        operator: BinaryOperator,
        right: &Expression,
        scope: &Scope,
        span: &Span,
    ) -> Result<FilterNode, CompileError> {
        let left_side = self.evaluate_side(left, scope)?;
        let right_side = self.evaluate_side(right, scope)?;

        if left_side.is_unary_only() || right_side.is_unary_only() {
            return Err(CompileError::MalformedComparison {
                expression: self.snippet(span),
                line: span.line,
                column: span.column,
            });
        }

        // The field key must be a path: either a bound path with its
        // root stripped, or a captured reference's full path
        let (field, bound) = match left_side {
            Side::Field { path, .. } => (path, true),
            Side::Captured { path } => (path, false),
            _ => {
                return Err(CompileError::MalformedComparison {
                    expression: self.snippet(&left.span),
                    line: left.span.line,
                    column: left.span.column,
                });
            }
        };

        let value = match right_side {
            Side::Literal(value) => FilterValue::Literal(value),
            Side::Field { path, .. } => FilterValue::Path(path),
            Side::Captured { path } => {
                FilterValue::Literal(self.resolve_capture(&path, &right.span)?)
            }
            Side::Filter(_) => {
                return Err(CompileError::MalformedComparison {
                    expression: self.snippet(&right.span),
                    line: right.span.line,
                    column: right.span.column,
                });
            }
        };

        // `.length` on a bound path collapses to a size query; the
        // operator is discarded, matching reference behavior
        if bound {
            if let Some(stripped) = field.strip_suffix(".length") {
                return Ok(FilterNode::Size {
                    field: stripped.to_string(),
                    value,
                });
            }
        }

        match operator {
            BinaryOperator::Equal | BinaryOperator::StrictEqual => {
                Ok(FilterNode::FieldEquals { field, value })
            }
            BinaryOperator::NotEqual | BinaryOperator::StrictNotEqual => Ok(FilterNode::FieldOp {
                field,
                op: CompareOp::Ne,
                value,
            }),
            BinaryOperator::GreaterThan => Ok(FilterNode::FieldOp {
                field,
                op: CompareOp::Gt,
                value,
            }),
            BinaryOperator::GreaterOrEqual => Ok(FilterNode::FieldOp {
                field,
                op: CompareOp::Gte,
                value,
            }),
            BinaryOperator::LessThan => Ok(FilterNode::FieldOp {
                field,
                op: CompareOp::Lt,
                value,
            }),
            BinaryOperator::LessOrEqual => Ok(FilterNode::FieldOp {
                field,
                op: CompareOp::Lte,
                value,
            }),
            _ => Err(CompileError::UnsupportedExpression {
                expression: self.snippet(span),
                line: span.line,
                column: span.column,
            }),
        }
    }

    /// Look up a captured reference in the caller-supplied bindings,
    /// descending into nested objects segment by segment
    pub(crate) fn resolve_capture(&self, path: &str, span: &Span) -> Result<Value, CompileError> {
        let mut segments: Vec<&str> = path.split('.').collect();
        if segments.len() > 1 && self.namespace == segments.first().copied() {
            segments.remove(0);
        }

        let unbound = || CompileError::UnboundCapture {
            name: path.to_string(),
            line: span.line,
            column: span.column,
        };

        let mut iter = segments.into_iter();
        let root = iter.next().unwrap_or("");
        let mut current = self.captures.get(root).ok_or_else(unbound)?;
        for segment in iter {
            current = current.get(segment).ok_or_else(unbound)?;
        }
        Ok(current.clone())
    }

    /// The offending sub-expression's text, for diagnostics
    pub(crate) fn snippet(&self, span: &Span) -> String {
        self.source
            .get(span.start..span.end)
            .unwrap_or_default()
            .trim()
            .to_string()
    }
}
