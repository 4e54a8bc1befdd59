//! Integration tests for the renamer
//!
//! End-to-end rename behavior over realistic sources.

use respell_foundation::ErrorKind;
use respell_rename::{collect_locals, rename, rename_program, respell_locals};
use respell_scope::analyze;
use respell_syntax::parse;

// =============================================================================
// Basic Renames
// =============================================================================

#[test]
fn spells_word_across_params() {
    let out = rename("function(e, t, n) { return e + t + n; }", "xyz").unwrap();
    assert_eq!(out, "function(x,y,z){return x+y+z}");
}

#[test]
fn spells_word_across_scopes() {
    let out = rename(
        "var u; function f(v) { var w = v; return w; }",
        "abcd",
    )
    .unwrap();
    assert_eq!(out, "var a;function b(c){var d=c;return d}");
}

#[test]
fn shorter_word_leaves_tail_untouched() {
    let out = rename("function(e, t, n) { return e + t + n; }", "x").unwrap();
    assert_eq!(out, "function(x,t,n){return x+t+n}");
}

#[test]
fn renames_var_write_sites() {
    let out = rename("function(e) { var t = 0; t = e; t += e; t++; }", "pq").unwrap();
    assert_eq!(out, "function(p){var q=0;q=p;q+=p;q++}");
}

// =============================================================================
// Collisions and Displacement
// =============================================================================

#[test]
fn displaced_variable_moves_everywhere() {
    let out = rename("function(t, x) { return t + x + x; }", "x").unwrap();
    assert_eq!(out, "function(x,a){return x+a+a}");
}

#[test]
fn swap_via_two_rounds() {
    let out = rename("function(b, a) { return b * a; }", "ab").unwrap();
    assert_eq!(out, "function(a,b){return a*b}");
}

#[test]
fn displacement_avoids_globals_and_target() {
    // `a` and `b` are implicit globals, and `c` is a later target letter:
    // the displaced variable must skip all of them.
    let out = rename(
        "function(t, x) { return t + x + a + b; }",
        "xc",
    )
    .unwrap();
    assert_eq!(out, "function(x,c){return x+c+a+b}");
}

// =============================================================================
// Failure Modes
// =============================================================================

#[test]
fn rejects_single_letter_global_in_word() {
    let err = rename("function(e) { return e + q; }", "pq").unwrap_err();
    assert_eq!(err.to_string(), "cannot replace global variable \"q\"");
}

#[test]
fn rejects_word_longer_than_locals() {
    let err = rename("function(e) { return e; }", "word").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::InsufficientLocals {
            available: 1,
            requested: 4
        }
    ));
}

#[test]
fn rejects_malformed_source() {
    let err = rename("function( { return; }", "a").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ParseError { .. }));
}

// =============================================================================
// Realistic Input
// =============================================================================

const ANALYTICS: &str = concat!(
    "(function(i,s,o,g,r,a,m){i[\"GoogleAnalyticsObject\"]=r;",
    "i[r]=i[r]||function(){(i[r].q=i[r].q||[]).push(arguments)},",
    "i[r].l=1*new Date();a=s.createElement(o),m=s.getElementsByTagName(o)[0];",
    "a.async=1;a.src=g;m.parentNode.insertBefore(a,m)})",
    "(window,document,\"script\",\"//www.google-analytics.com/analytics.js\",\"ga\");"
);

#[test]
fn analytics_snippet_spells_new_word() {
    let out = rename(ANALYTICS, "clifton").unwrap();
    let expected = concat!(
        "(function(c,l,i,f,t,o,n){c[\"GoogleAnalyticsObject\"]=t;",
        "c[t]=c[t]||function(){(c[t].q=c[t].q||[]).push(arguments)},",
        "c[t].l=1*new Date();o=l.createElement(i),n=l.getElementsByTagName(i)[0];",
        "o.async=1;o.src=f;n.parentNode.insertBefore(o,n)}",
        "(window,document,\"script\",\"//www.google-analytics.com/analytics.js\",\"ga\"))"
    );
    assert_eq!(out, expected);
}

#[test]
fn analytics_snippet_keeps_its_own_word() {
    // The params already spell the word: nothing is displaced.
    let out = rename(ANALYTICS, "isogram").unwrap();
    assert!(out.contains("function(i,s,o,g,r,a,m)"));
}

#[test]
fn renamed_tree_locals_spell_the_word() {
    let mut program = parse(ANALYTICS).unwrap();
    let mut analysis = analyze(&program);
    respell_locals(&mut program, &mut analysis, "clifton").unwrap();

    let spelled: String = collect_locals(&analysis)
        .into_iter()
        .map(|v| analysis.variable(v).name.clone())
        .collect();
    assert_eq!(spelled, "clifton");
}

#[test]
fn output_parses_and_renames_again() {
    let first = rename(ANALYTICS, "clifton").unwrap();
    let second = rename(&first, "isogram").unwrap();
    assert!(second.contains("function(i,s,o,g,r,a,m)"));
}

#[test]
fn tree_api_matches_text_api() {
    let program = rename_program(ANALYTICS, "clifton").unwrap();
    assert_eq!(
        respell_syntax::generate(&program),
        rename(ANALYTICS, "clifton").unwrap()
    );
}
