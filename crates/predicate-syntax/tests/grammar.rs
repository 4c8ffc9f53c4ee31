//! Grammar tests for predicate lambda parsing (literals, operators, calls)

use pest::Parser;
use predicate_syntax::parser::{PredicateParser, Rule};

#[test]
fn test_parse_simple_comparisons() {
    let inputs = vec![
        "a => a.email == 'hi'",
        "a => a.email === \"hi\"",
        "a => a.age != 21",
        "a => a.age !== 21",
        "a => a.age > 21",
        "a => a.age >= 21",
        "a => a.age < 21",
        "a => a.age <= 21",
    ];

    for input in inputs {
        let result = PredicateParser::parse(Rule::program, input);
        assert!(result.is_ok(), "Failed to parse: {}", input);
    }
}

#[test]
fn test_parse_literals() {
    let inputs = vec![
        "a => a.name == 'single'",
        "a => a.name == \"double\"",
        "a => a.count == 42",
        "a => a.ratio == 3.14",
        "a => a.delta == -1",
        "a => a.big == 1e6",
        "a => a.active == true",
        "a => a.active == false",
        "a => a.deleted == null",
        "a => a.deleted == undefined",
    ];

    for input in inputs {
        let result = PredicateParser::parse(Rule::program, input);
        assert!(result.is_ok(), "Failed to parse: {}", input);
    }
}

#[test]
fn test_parse_property_chains() {
    let inputs = vec![
        "a => a.address.city == 'NYC'",
        "a => a.address.geo.lat > 40",
        "a => a.notes[-1].note == 'x'",
        "a => a.notes.length == 3",
    ];

    for input in inputs {
        let result = PredicateParser::parse(Rule::program, input);
        assert!(result.is_ok(), "Failed to parse: {}", input);
    }
}

#[test]
fn test_parse_logical_combinations() {
    let inputs = vec![
        "a => a.x == 1 && a.y == 2",
        "a => a.x == 1 || a.y == 2",
        "a => a.x == 1 && a.y == 2 && a.z == 3",
        "a => (a.x == 1 || a.y == 2) && a.z == 3",
    ];

    for input in inputs {
        let result = PredicateParser::parse(Rule::program, input);
        assert!(result.is_ok(), "Failed to parse: {}", input);
    }
}

#[test]
fn test_parse_some_calls() {
    let inputs = vec![
        "a => a.notes.some(b => b.note == 'x')",
        "a => ids.some(b => b === a.id)",
        "a => !a.notes.some(b => b.note == 'x')",
        "a => a.rows.some(b => b.cells.some(c => c.v == 1))",
    ];

    for input in inputs {
        let result = PredicateParser::parse(Rule::program, input);
        assert!(result.is_ok(), "Failed to parse: {}", input);
    }
}

#[test]
fn test_parse_two_parameter_lambda() {
    let result = PredicateParser::parse(Rule::program, "(a, params) => a.age >= params.minAge");
    assert!(result.is_ok());
}

#[test]
fn test_parse_rejected_forms_still_recognized() {
    // Arithmetic and ternary parse; rejection is the compiler's job
    let inputs = vec![
        "a => a.x + 1 > 2",
        "a => a.x * 2 == 4",
        "a => a.x == 1 ? a.y == 2 : a.z == 3",
    ];

    for input in inputs {
        let result = PredicateParser::parse(Rule::program, input);
        assert!(result.is_ok(), "Failed to parse: {}", input);
    }
}

#[test]
fn test_parse_rejects_garbage() {
    let inputs = vec![
        "a =>",
        "=> a.x == 1",
        "a => a.x ==",
        "a => a.x = 1",
        "a => {a.x: 1}",
        "",
    ];

    for input in inputs {
        let result = PredicateParser::parse(Rule::program, input);
        assert!(result.is_err(), "Should not parse: {}", input);
    }
}

#[test]
fn test_keywords_are_not_identifiers() {
    let result = PredicateParser::parse(Rule::program, "true => a.x == 1");
    assert!(result.is_err());
}
