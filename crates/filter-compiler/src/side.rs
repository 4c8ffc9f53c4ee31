//! Operand classification: flattening property chains into dotted paths
//! and tagging each side of a comparison as a field, captured reference,
//! literal, or complete sub-filter.

use crate::{
    compile::{Compiler, FilterNode, FilterValue},
    errors::CompileError,
    scope::{RootKind, Scope},
};
use predicate_syntax::ast::{
    expr::{Expression, ExpressionKind},
    literal::Literal,
    span::Span,
};
use serde_json::Value;

/// Classification of one comparison operand
#[derive(Debug, Clone, PartialEq)]
pub enum Side {
    /// Dotted path rooted at a bound name, with that root stripped.
    /// Transiently empty for a bare inner binding; only the `$in`
    /// detection consumes that shape.
    Field { path: String, root: RootKind },
    /// Full dotted path of an externally captured reference
    Captured { path: String },
    Literal(Value),
    /// A compiled `some()` call: already a complete filter condition,
    /// not combinable via comparison
    Filter(FilterNode),
}

impl Side {
    pub fn is_unary_only(&self) -> bool {
        matches!(self, Side::Filter(_))
    }
}

impl<'a> Compiler<'a> {
    pub(crate) fn evaluate_side(
        &self,
        expr: &Expression,
        scope: &Scope,
    ) -> Result<Side, CompileError> {
        match &expr.kind {
            ExpressionKind::Identifier(_)
            | ExpressionKind::Member { .. }
            | ExpressionKind::ArrayIndex { .. } => {
                let path = self.flatten_path(expr)?;
                let (root, rest) = split_root(&path);
                match scope.classify(root) {
                    RootKind::Captured => Ok(Side::Captured { path }),
                    kind => Ok(Side::Field {
                        path: rest.to_string(),
                        root: kind,
                    }),
                }
            }
            ExpressionKind::Literal(literal) => {
                Ok(Side::Literal(self.literal_value(literal, &expr.span)?))
            }
            ExpressionKind::Call { callee, arguments } => {
                self.compile_some_call(callee, arguments, scope, &expr.span)
            }
            _ => Err(CompileError::UnsupportedExpression {
                expression: self.snippet(&expr.span),
                line: expr.span.line,
                column: expr.span.column,
            }),
        }
    }

    fn literal_value(&self, literal: &Literal, span: &Span) -> Result<Value, CompileError> {
        Ok(match literal {
            Literal::String(s) => Value::String(s.clone()),
            Literal::Number(n) => {
                number_value(*n).ok_or_else(|| CompileError::InvalidLiteral {
                    expression: self.snippet(span),
                    line: span.line,
                    column: span.column,
                })?
            }
            Literal::Boolean(b) => Value::Bool(*b),
            // JSON has no undefined; both absent kinds render as null
            Literal::Null | Literal::Undefined => Value::Null,
        })
    }

    /// Join identifier/property-access chains with dots. A bracket index
    /// holding a negative numeric literal is the array-element marker
    /// (it exists only to type-check against an array field) and is
    /// silently elided.
    pub(crate) fn flatten_path(&self, expr: &Expression) -> Result<String, CompileError> {
        match &expr.kind {
            ExpressionKind::Identifier(name) => Ok(name.clone()),
            ExpressionKind::Member { object, property } => {
                let base = self.flatten_path(object)?;
                Ok(format!("{}.{}", base, property))
            }
            ExpressionKind::ArrayIndex { object, index } => match &index.kind {
                ExpressionKind::Literal(Literal::Number(n)) if *n < 0.0 => {
                    self.flatten_path(object)
                }
                _ => Err(CompileError::UnsupportedArrayIndex {
                    expression: self.snippet(&index.span),
                    line: index.span.line,
                    column: index.span.column,
                }),
            },
            _ => Err(CompileError::UnsupportedPath {
                expression: self.snippet(&expr.span),
                line: expr.span.line,
                column: expr.span.column,
            }),
        }
    }

    /// The only legal call form: `<path>.some(<lambda>)`. A bound callee
    /// compiles to an element match over the array field; a captured
    /// callee to a membership test against the captured array.
    fn compile_some_call(
        &self,
        callee: &Expression,
        arguments: &[Expression],
        scope: &Scope,
        span: &Span,
    ) -> Result<Side, CompileError> {
        let callee_path = match &callee.kind {
            ExpressionKind::Identifier(_)
            | ExpressionKind::Member { .. }
            | ExpressionKind::ArrayIndex { .. } => self.flatten_path(callee)?,
            _ => {
                return Err(CompileError::MalformedCall {
                    expression: self.snippet(&callee.span),
                    line: callee.span.line,
                    column: callee.span.column,
                });
            }
        };

        let Some(property_path) = callee_path.strip_suffix(".some") else {
            return Err(CompileError::MalformedCall {
                expression: self.snippet(span),
                line: span.line,
                column: span.column,
            });
        };

        if arguments.len() != 1 {
            return Err(CompileError::MalformedCall {
                expression: self.snippet(span),
                line: span.line,
                column: span.column,
            });
        }
        let ExpressionKind::Lambda(lambda) = &arguments[0].kind else {
            return Err(CompileError::MalformedCall {
                expression: self.snippet(&arguments[0].span),
                line: arguments[0].span.line,
                column: arguments[0].span.column,
            });
        };

        let inner_scope = scope.child(lambda.parameter());
        let inner = self.compile_body(&lambda.body, &inner_scope)?;

        let (root, local_path) = split_root(property_path);
        match scope.classify(root) {
            RootKind::Param | RootKind::Local => Ok(Side::Filter(FilterNode::ElemMatch {
                field: local_path.to_string(),
                inner: Box::new(inner),
            })),
            RootKind::Captured => match inner {
                // The only legal inner shape: the bare element binding on
                // the left, a field reference on the right
                FilterNode::FieldEquals {
                    field,
                    value: FilterValue::Path(path),
                } if field.is_empty() => Ok(Side::Filter(FilterNode::In {
                    field: path,
                    value: property_path.to_string(),
                })),
                _ => Err(CompileError::UnsupportedSomeForm {
                    expression: self.snippet(span),
                    line: span.line,
                    column: span.column,
                }),
            },
        }
    }
}

fn split_root(path: &str) -> (&str, &str) {
    match path.split_once('.') {
        Some((root, rest)) => (root, rest),
        None => (path, ""),
    }
}

fn number_value(n: f64) -> Option<Value> {
    // Integral values embed as integers, mirroring how the source
    // language prints them
    if n.fract() == 0.0 && (i64::MIN as f64..=i64::MAX as f64).contains(&n) {
        Some(Value::from(n as i64))
    } else {
        serde_json::Number::from_f64(n).map(Value::Number)
    }
}
