//! Every rejected form fails with the matching error kind and never
//! produces a partial document

use filter_compiler::{CompileError, compile_predicate, compile_predicate_with_captures};

#[test]
fn arithmetic_operand_is_unsupported() {
    let err = compile_predicate("a => a.x + 1 > 2").unwrap_err();
    assert!(matches!(err, CompileError::UnsupportedExpression { .. }));
}

#[test]
fn top_level_arithmetic_is_unsupported() {
    let err = compile_predicate("a => a.x * 2").unwrap_err();
    assert!(matches!(err, CompileError::UnsupportedExpression { .. }));
}

#[test]
fn ternary_is_unsupported() {
    let err = compile_predicate("a => a.x == 1 ? a.y == 2 : a.z == 3").unwrap_err();
    assert!(matches!(err, CompileError::UnsupportedExpression { .. }));
}

#[test]
fn bare_path_body_is_unsupported() {
    let err = compile_predicate("a => a.active").unwrap_err();
    assert!(matches!(err, CompileError::UnsupportedExpression { .. }));
}

#[test]
fn non_some_calls_are_malformed() {
    let err = compile_predicate("a => a.notes.map(b => b.note == 'x')").unwrap_err();
    assert!(matches!(err, CompileError::MalformedCall { .. }));
}

#[test]
fn some_requires_exactly_one_argument() {
    let err = compile_predicate("a => a.notes.some(b => b.note == 'x', 2)").unwrap_err();
    assert!(matches!(err, CompileError::MalformedCall { .. }));
}

#[test]
fn some_requires_a_lambda_argument() {
    let err = compile_predicate("a => a.notes.some(1)").unwrap_err();
    assert!(matches!(err, CompileError::MalformedCall { .. }));
}

#[test]
fn array_index_other_than_negative_is_unsupported() {
    let err = compile_predicate("a => a.notes[0].note == 'x'").unwrap_err();
    assert!(matches!(err, CompileError::UnsupportedArrayIndex { .. }));

    let err = compile_predicate("a => a.notes[a.i].note == 'x'").unwrap_err();
    assert!(matches!(err, CompileError::UnsupportedArrayIndex { .. }));
}

#[test]
fn property_access_on_a_call_is_not_a_path() {
    let err = compile_predicate("a => a.notes.some(b => b.x == 1).y == 1").unwrap_err();
    assert!(matches!(err, CompileError::UnsupportedPath { .. }));
}

#[test]
fn non_finite_number_is_an_invalid_literal() {
    // 1e999 overflows f64 to infinity, which has no JSON representation
    let err = compile_predicate("a => a.x == 1e999").unwrap_err();
    assert!(matches!(err, CompileError::InvalidLiteral { .. }));
}

#[test]
fn literal_left_side_is_malformed() {
    let err = compile_predicate("a => 1 == a.x").unwrap_err();
    assert!(matches!(err, CompileError::MalformedComparison { .. }));
}

#[test]
fn some_call_cannot_be_a_comparison_operand() {
    let err = compile_predicate("a => a.notes.some(b => b.note == 'x') == true").unwrap_err();
    assert!(matches!(err, CompileError::MalformedComparison { .. }));

    let err = compile_predicate("a => a.flag == a.notes.some(b => b.note == 'x')").unwrap_err();
    assert!(matches!(err, CompileError::MalformedComparison { .. }));
}

#[test]
fn negation_of_a_plain_path_is_malformed() {
    let err = compile_predicate("a => !a.active").unwrap_err();
    assert!(matches!(err, CompileError::MalformedUnary { .. }));
}

#[test]
fn captured_some_with_wrong_inner_shape_is_rejected() {
    let err = compile_predicate("a => ids.some(b => b.x == 1)").unwrap_err();
    assert!(matches!(err, CompileError::UnsupportedSomeForm { .. }));

    let err = compile_predicate("a => ids.some(b => b === 5)").unwrap_err();
    assert!(matches!(err, CompileError::UnsupportedSomeForm { .. }));
}

#[test]
fn unresolved_capture_is_reported_by_name() {
    let err = compile_predicate("a => a.hubspotId === b").unwrap_err();
    match err {
        CompileError::UnboundCapture { name, .. } => assert_eq!(name, "b"),
        other => panic!("Expected UnboundCapture, got {:?}", other),
    }

    let captures = serde_json::Map::new();
    let err =
        compile_predicate_with_captures("(a, params) => a.age >= params.minAge", &captures)
            .unwrap_err();
    assert!(matches!(err, CompileError::UnboundCapture { .. }));
}

#[test]
fn syntax_errors_surface_as_parse_failures() {
    let err = compile_predicate("a => a.x ==").unwrap_err();
    assert!(matches!(err, CompileError::Parse(_)));
}

#[test]
fn errors_carry_the_offending_expression_text() {
    let err = compile_predicate("a => a.x == 1 ? a.y == 2 : a.z == 3").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("a.x == 1 ? a.y == 2 : a.z == 3"), "{message}");
    assert!(message.contains("line 1"), "{message}");
}
