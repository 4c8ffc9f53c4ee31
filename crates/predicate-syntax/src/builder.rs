use crate::{
    ast::{
        expr::{Expression, ExpressionKind},
        lambda::Lambda,
        literal::Literal,
        operator::{BinaryOperator, UnaryOperator},
        span::Span,
    },
    errors::BuildError,
    parser::{PredicateParser, Rule},
};
use pest::{
    Parser,
    iterators::{Pair, Pairs},
};

pub type BuildResult<T> = Result<T, BuildError>;

/// Parse a predicate lambda into a typed AST
pub fn parse(input: &str) -> BuildResult<Lambda> {
    tracing::debug!(source = input, "parsing predicate lambda");

    let pairs = PredicateParser::parse(Rule::program, input).map_err(|e| BuildError {
        message: format!("Syntax error: {}", e),
        line: 1,
        column: 1,
    })?;

    build_program(pairs)
}

fn build_program(mut pairs: Pairs<Rule>) -> BuildResult<Lambda> {
    let program = pairs.next().ok_or_else(|| BuildError {
        message: "Empty input".to_string(),
        line: 1,
        column: 1,
    })?;

    for pair in program.into_inner() {
        match pair.as_rule() {
            Rule::lambda => return build_lambda(pair),
            Rule::EOI => {}
            _ => {}
        }
    }

    Err(BuildError {
        message: "Expected a lambda expression".to_string(),
        line: 1,
        column: 1,
    })
}

fn pair_to_span(pair: &Pair<Rule>) -> Span {
    let (line, col) = pair.line_col();
    let span_pest = pair.as_span();
    Span::new(span_pest.start(), span_pest.end(), line, col)
}

fn build_lambda(pair: Pair<Rule>) -> BuildResult<Lambda> {
    let span = pair_to_span(&pair);
    let mut params = Vec::new();
    let mut body = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::param_list => {
                for param in inner.into_inner() {
                    if param.as_rule() == Rule::ident {
                        params.push(param.as_str().to_string());
                    }
                }
            }
            Rule::expression => {
                body = Some(build_expression(inner)?);
            }
            _ => {}
        }
    }

    let body = body.ok_or_else(|| BuildError {
        message: "Lambda has no body".to_string(),
        line: span.line,
        column: span.column,
    })?;

    if params.is_empty() {
        return Err(BuildError {
            message: "Lambda must bind at least one parameter".to_string(),
            line: span.line,
            column: span.column,
        });
    }

    Ok(Lambda {
        params,
        body: Box::new(body),
        span,
    })
}

fn build_expression(pair: Pair<Rule>) -> BuildResult<Expression> {
    match pair.as_rule() {
        Rule::expression => {
            // Unwrap the top-level expression rule
            let inner = pair.into_inner().next().unwrap();
            build_expression(inner)
        }
        Rule::conditional => build_conditional(pair),
        Rule::logical_or
        | Rule::logical_and
        | Rule::equality
        | Rule::comparison
        | Rule::additive
        | Rule::multiplicative => build_binary_chain(pair),
        Rule::unary => build_unary(pair),
        Rule::postfix => build_postfix(pair),
        Rule::primary => build_primary(pair),
        _ => {
            let span = pair_to_span(&pair);
            Err(BuildError {
                message: format!("Unexpected rule in expression: {:?}", pair.as_rule()),
                line: span.line,
                column: span.column,
            })
        }
    }
}

fn build_conditional(pair: Pair<Rule>) -> BuildResult<Expression> {
    let span = pair_to_span(&pair);
    let mut inner = pair.into_inner();

    let condition = build_expression(inner.next().unwrap())?;

    match (inner.next(), inner.next()) {
        (Some(consequent), Some(alternate)) => Ok(Expression::new(
            ExpressionKind::Conditional {
                condition: Box::new(condition),
                consequent: Box::new(build_expression(consequent)?),
                alternate: Box::new(build_expression(alternate)?),
            },
            span,
        )),
        _ => Ok(condition),
    }
}

/// Fold `operand (op operand)*` chains left-to-right into nested binary
/// nodes, preserving source associativity
fn build_binary_chain(pair: Pair<Rule>) -> BuildResult<Expression> {
    let span = pair_to_span(&pair);
    let mut inner = pair.into_inner();

    let mut left = build_expression(inner.next().unwrap())?;

    while let Some(op_pair) = inner.next() {
        let operator = binary_operator(op_pair.as_str(), &span)?;
        let right_pair = inner.next().ok_or_else(|| BuildError {
            message: format!("Operator '{}' is missing a right operand", operator),
            line: span.line,
            column: span.column,
        })?;
        let right = build_expression(right_pair)?;

        let combined = left.span.merge(&right.span);
        left = Expression::new(
            ExpressionKind::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            },
            combined,
        );
    }

    Ok(left)
}

fn binary_operator(op: &str, span: &Span) -> BuildResult<BinaryOperator> {
    match op {
        "===" => Ok(BinaryOperator::StrictEqual),
        "==" => Ok(BinaryOperator::Equal),
        "!==" => Ok(BinaryOperator::StrictNotEqual),
        "!=" => Ok(BinaryOperator::NotEqual),
        ">=" => Ok(BinaryOperator::GreaterOrEqual),
        "<=" => Ok(BinaryOperator::LessOrEqual),
        ">" => Ok(BinaryOperator::GreaterThan),
        "<" => Ok(BinaryOperator::LessThan),
        "&&" => Ok(BinaryOperator::And),
        "||" => Ok(BinaryOperator::Or),
        "+" => Ok(BinaryOperator::Add),
        "-" => Ok(BinaryOperator::Subtract),
        "*" => Ok(BinaryOperator::Multiply),
        "/" => Ok(BinaryOperator::Divide),
        "%" => Ok(BinaryOperator::Modulo),
        other => Err(BuildError {
            message: format!("Unknown operator: {}", other),
            line: span.line,
            column: span.column,
        }),
    }
}

fn build_unary(pair: Pair<Rule>) -> BuildResult<Expression> {
    let span = pair_to_span(&pair);
    let mut inner = pair.into_inner();
    let first = inner.next().unwrap();

    match first.as_rule() {
        Rule::op_not => {
            let operand = build_expression(inner.next().unwrap())?;
            Ok(Expression::new(
                ExpressionKind::Unary {
                    operator: UnaryOperator::Not,
                    operand: Box::new(operand),
                },
                span,
            ))
        }
        _ => build_expression(first),
    }
}

fn build_postfix(pair: Pair<Rule>) -> BuildResult<Expression> {
    let mut inner = pair.into_inner();
    let mut expr = build_expression(inner.next().unwrap())?;

    for trailer in inner {
        let trailer_span = pair_to_span(&trailer);
        let span = expr.span.merge(&trailer_span);

        match trailer.as_rule() {
            Rule::member => {
                let property = trailer.into_inner().next().unwrap().as_str().to_string();
                expr = Expression::new(
                    ExpressionKind::Member {
                        object: Box::new(expr),
                        property,
                    },
                    span,
                );
            }
            Rule::index => {
                let index = build_expression(trailer.into_inner().next().unwrap())?;
                expr = Expression::new(
                    ExpressionKind::ArrayIndex {
                        object: Box::new(expr),
                        index: Box::new(index),
                    },
                    span,
                );
            }
            Rule::call_args => {
                let mut arguments = Vec::new();
                for arg in trailer.into_inner() {
                    arguments.push(build_call_arg(arg)?);
                }
                expr = Expression::new(
                    ExpressionKind::Call {
                        callee: Box::new(expr),
                        arguments,
                    },
                    span,
                );
            }
            _ => {}
        }
    }

    Ok(expr)
}

fn build_call_arg(pair: Pair<Rule>) -> BuildResult<Expression> {
    let span = pair_to_span(&pair);
    let inner = pair.into_inner().next().unwrap();

    match inner.as_rule() {
        Rule::lambda => {
            let lambda = build_lambda(inner)?;
            Ok(Expression::new(ExpressionKind::Lambda(lambda), span))
        }
        _ => build_expression(inner),
    }
}

fn build_primary(pair: Pair<Rule>) -> BuildResult<Expression> {
    let span = pair_to_span(&pair);
    let inner = pair.into_inner().next().unwrap();

    match inner.as_rule() {
        Rule::literal => build_literal(inner),
        Rule::ident => Ok(Expression::new(
            ExpressionKind::Identifier(inner.as_str().to_string()),
            span,
        )),
        // Parenthesized expression: parens only affect grouping
        _ => build_expression(inner),
    }
}

fn build_literal(pair: Pair<Rule>) -> BuildResult<Expression> {
    let span = pair_to_span(&pair);
    let inner = pair.into_inner().next().unwrap();

    let literal = match inner.as_rule() {
        Rule::lit_string => Literal::String(parse_string_literal(inner.as_str())),
        Rule::lit_number => {
            let text = inner.as_str();
            let value = text.parse::<f64>().map_err(|_| BuildError {
                message: format!("Invalid numeric literal: {}", text),
                line: span.line,
                column: span.column,
            })?;
            Literal::Number(value)
        }
        Rule::lit_boolean => Literal::Boolean(inner.as_str() == "true"),
        Rule::lit_null => Literal::Null,
        Rule::lit_undefined => Literal::Undefined,
        other => {
            return Err(BuildError {
                message: format!("Unexpected literal rule: {:?}", other),
                line: span.line,
                column: span.column,
            });
        }
    };

    Ok(Expression::new(ExpressionKind::Literal(literal), span))
}

fn parse_string_literal(s: &str) -> String {
    // Remove quotes and unescape in a single left-to-right scan, so a
    // decoded backslash is never re-read as the start of a new escape
    let inner = &s[1..s.len() - 1];
    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }

    result
}
