//! Tokenizing and parsing the calculator language end to end.

mod common;

use arbor_parser::ParseError;
use arbor_token::{SyntaxError, TokenError};
use common::{parse, parser, render};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case::precedence("1 + 2 * 3", "(1 + (2 * 3))")]
#[case::left_associative("8 - 4 - 2", "((8 - 4) - 2)")]
#[case::parentheses("(1 + 2) * 3", "((1 + 2) * 3)")]
#[case::names("x / (y - 1)", "(x / (y - 1))")]
#[case::statements("let x = 1; x + 1;", "let x = 1; (x + 1)")]
#[case::comments("1 + 2 # three\n* 3", "(1 + (2 * 3))")]
#[case::keyword_prefix("letter + let_x", "(letter + let_x)")]
fn parses_source(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(render(&parse(source)), expected);
}

#[test]
fn multiline_positions() {
    let stream = parser()
        .tokenizer()
        .tokenize_file("calc.txt", "let x = 1;\n  x * 2")
        .unwrap();

    let located: Vec<_> = stream
        .iter()
        .map(|token| format!("{} {}", token.kind, token.location()))
        .collect();
    assert_eq!(
        located,
        vec![
            "keyword calc.txt:1:1",
            "name calc.txt:1:5",
            "op calc.txt:1:7",
            "number calc.txt:1:9",
            "op calc.txt:1:10",
            "name calc.txt:2:3",
            "op calc.txt:2:5",
            "number calc.txt:2:7",
        ]
    );
}

#[test]
fn leftover_tokens_are_incomplete() {
    let err = parser().parse("1 2").unwrap_err();

    assert!(matches!(err, ParseError::Incomplete { .. }));
    assert_eq!(
        err.to_string(),
        "There are still tokens to be processed, starting with `2` at 1:3"
    );
}

#[test]
fn unclosed_group_ends_early() {
    let err = parser().parse("(1 + 2").unwrap_err();
    assert!(matches!(err, ParseError::Token(TokenError::UnexpectedEnd)));
}

#[test]
fn let_without_name() {
    let err = parser().parse("let = 3").unwrap_err();

    assert!(matches!(err, ParseError::Token(TokenError::UnexpectedToken(_))));
    assert_eq!(err.token().unwrap().value, "=");
    assert_eq!(err.to_string(), "Unexpected token `=` at 1:5");
}

#[test]
fn unknown_character() {
    let err = parser().parse("1 $ 2").unwrap_err();

    assert!(matches!(err, ParseError::Syntax(SyntaxError::NoMatch { .. })));
    assert_eq!(err.to_string(), "Unable to match a token at 1:3");
}

#[test]
fn number_out_of_range() {
    let err = parser().parse("99999999999999999999 + 1").unwrap_err();

    assert_eq!(err.to_string(), "Number out of range");
    assert_eq!(err.token().unwrap().kind, "number");
}
