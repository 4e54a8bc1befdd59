//! Integration tests for the lexer
//!
//! Tests tokenization of JavaScript-like source.

use respell_syntax::{Lexer, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::tokenize_all(source)
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

// =============================================================================
// Names and Keywords
// =============================================================================

#[test]
fn lex_identifiers_and_keywords() {
    assert_eq!(
        kinds("var x = foo"),
        [
            TokenKind::Var,
            TokenKind::Ident("x".into()),
            TokenKind::Assign,
            TokenKind::Ident("foo".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn lex_dollar_and_underscore_names() {
    assert_eq!(
        kinds("$ _x $el"),
        [
            TokenKind::Ident("$".into()),
            TokenKind::Ident("_x".into()),
            TokenKind::Ident("$el".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn keyword_prefix_is_still_identifier() {
    assert_eq!(
        kinds("variable newish"),
        [
            TokenKind::Ident("variable".into()),
            TokenKind::Ident("newish".into()),
            TokenKind::Eof,
        ]
    );
}

// =============================================================================
// Literals
// =============================================================================

#[test]
fn lex_numbers() {
    assert_eq!(
        kinds("1 3.14 .5 2e3"),
        [
            TokenKind::Number(1.0),
            TokenKind::Number(3.14),
            TokenKind::Number(0.5),
            TokenKind::Number(2000.0),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn lex_strings_both_quote_styles() {
    assert_eq!(
        kinds(r#"'ga' "script""#),
        [
            TokenKind::Str("ga".into()),
            TokenKind::Str("script".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn lex_string_escapes() {
    assert_eq!(
        kinds(r#""a\"b\n""#),
        [TokenKind::Str("a\"b\n".into()), TokenKind::Eof]
    );
}

#[test]
fn unterminated_string_is_error_token() {
    let all = kinds("'oops");
    assert!(matches!(all[0], TokenKind::Error(_)));
}

// =============================================================================
// Operators
// =============================================================================

#[test]
fn lex_compound_operators() {
    assert_eq!(
        kinds("a === b !== c >>> d"),
        [
            TokenKind::Ident("a".into()),
            TokenKind::EqEqEq,
            TokenKind::Ident("b".into()),
            TokenKind::NotEqEq,
            TokenKind::Ident("c".into()),
            TokenKind::UShr,
            TokenKind::Ident("d".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn lex_increment_vs_plus_assign() {
    assert_eq!(
        kinds("i++ + j += 1"),
        [
            TokenKind::Ident("i".into()),
            TokenKind::PlusPlus,
            TokenKind::Plus,
            TokenKind::Ident("j".into()),
            TokenKind::PlusAssign,
            TokenKind::Number(1.0),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn lex_logical_vs_bitwise() {
    assert_eq!(
        kinds("a || b | c && d & e"),
        [
            TokenKind::Ident("a".into()),
            TokenKind::OrOr,
            TokenKind::Ident("b".into()),
            TokenKind::Pipe,
            TokenKind::Ident("c".into()),
            TokenKind::AndAnd,
            TokenKind::Ident("d".into()),
            TokenKind::Amp,
            TokenKind::Ident("e".into()),
            TokenKind::Eof,
        ]
    );
}

// =============================================================================
// Trivia
// =============================================================================

#[test]
fn comments_are_skipped() {
    assert_eq!(
        kinds("a // line\n/* block\nstill */ b"),
        [
            TokenKind::Ident("a".into()),
            TokenKind::Ident("b".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn spans_track_lines_and_columns() {
    let tokens = Lexer::tokenize_all("a\n  b");
    assert_eq!((tokens[0].span.line, tokens[0].span.column), (1, 1));
    assert_eq!((tokens[1].span.line, tokens[1].span.column), (2, 3));
}

// =============================================================================
// Realistic Input
// =============================================================================

#[test]
fn lex_minified_snippet_fragment() {
    let all = kinds("i[r].l=1*new Date();");
    assert_eq!(
        all,
        [
            TokenKind::Ident("i".into()),
            TokenKind::LBracket,
            TokenKind::Ident("r".into()),
            TokenKind::RBracket,
            TokenKind::Dot,
            TokenKind::Ident("l".into()),
            TokenKind::Assign,
            TokenKind::Number(1.0),
            TokenKind::Star,
            TokenKind::New,
            TokenKind::Ident("Date".into()),
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}
