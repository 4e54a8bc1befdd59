//! Integration tests for the scope analyzer
//!
//! Tests resolution over whole programs, including the minified-snippet
//! shapes the renamer works on.

use respell_scope::{ScopeKind, analyze};
use respell_syntax::parse;

fn scope_names(source: &str) -> Vec<Vec<String>> {
    let program = parse(source).unwrap();
    let analysis = analyze(&program);
    analysis
        .scopes
        .iter()
        .map(|scope| {
            scope
                .variables
                .iter()
                .map(|&v| analysis.variable(v).name.clone())
                .collect()
        })
        .collect()
}

// =============================================================================
// Scope Construction
// =============================================================================

#[test]
fn global_scope_always_exists() {
    let program = parse("").unwrap();
    let analysis = analyze(&program);
    assert_eq!(analysis.scopes.len(), 1);
    assert_eq!(analysis.scopes[0].kind, ScopeKind::Global);
}

#[test]
fn function_scopes_in_visitation_order() {
    let names = scope_names("function f(a) { function g(b) {} } function h(c) {}");
    assert_eq!(
        names,
        [
            vec!["f".to_string(), "h".to_string()],
            vec!["arguments".to_string(), "a".to_string(), "g".to_string()],
            vec!["arguments".to_string(), "b".to_string()],
            vec!["arguments".to_string(), "c".to_string()],
        ]
    );
}

#[test]
fn blocks_do_not_create_scopes() {
    let names = scope_names("function f() { if (1) { var x; } while (0) { var y; } }");
    assert_eq!(names.len(), 2);
    assert_eq!(names[1], ["arguments", "x", "y"]);
}

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn references_resolve_through_nesting() {
    let source = "function f(e) { return function () { return e; }; }";
    let program = parse(source).unwrap();
    let analysis = analyze(&program);
    let e = analysis
        .variables()
        .find(|v| v.name == "e")
        .expect("e is declared");
    // One declaration (the param) and one reference from the inner function.
    assert_eq!(e.declarations.len(), 1);
    assert_eq!(e.references.len(), 1);
    assert!(analysis.implicit_globals.is_empty());
}

#[test]
fn member_properties_are_not_references() {
    let program = parse("function f(e) { e.e = e[e].e; }").unwrap();
    let analysis = analyze(&program);
    let e = analysis.variables().find(|v| v.name == "e").unwrap();
    // Param declaration plus three real references: `e.e`, `e[e]` object,
    // and the computed `[e]`; the two `.e` properties don't count.
    assert_eq!(e.declarations.len(), 1);
    assert_eq!(e.references.len(), 3);
}

#[test]
fn arguments_resolves_to_implicit_object() {
    let program = parse("function f() { return arguments; }").unwrap();
    let analysis = analyze(&program);
    let args = analysis.variables().find(|v| v.name == "arguments").unwrap();
    assert!(args.is_arguments());
    assert_eq!(args.references.len(), 1);
    assert!(analysis.implicit_globals.is_empty());
}

#[test]
fn implicit_globals_in_first_encounter_order() {
    let source = "(function(i) { i.l = 1 * new Date(); })(window, document);";
    let program = parse(source).unwrap();
    let analysis = analyze(&program);
    assert_eq!(analysis.implicit_globals, ["Date", "window", "document"]);
}

#[test]
fn var_hoisting_wins_over_use_order() {
    let source = "function f() { g = x; var x; }";
    let program = parse(source).unwrap();
    let analysis = analyze(&program);
    // `x` is hoisted, so only `g` leaks.
    assert_eq!(analysis.implicit_globals, ["g"]);
}

#[test]
fn shadowing_keeps_variables_distinct() {
    let source = "var x; function f(x) { return x; }";
    let program = parse(source).unwrap();
    let analysis = analyze(&program);
    let xs: Vec<_> = analysis.variables().filter(|v| v.name == "x").collect();
    assert_eq!(xs.len(), 2);
    // The inner reference belongs to the param, not the global.
    let param = xs.iter().find(|v| !v.declarations.is_empty() && v.references.len() == 1);
    assert!(param.is_some());
}

// =============================================================================
// Realistic Input
// =============================================================================

#[test]
fn analytics_snippet_locals_are_the_seven_params() {
    let source = concat!(
        "(function(i,s,o,g,r,a,m){i[\"GoogleAnalyticsObject\"]=r;",
        "i[r]=i[r]||function(){(i[r].q=i[r].q||[]).push(arguments)},",
        "i[r].l=1*new Date();a=s.createElement(o),m=s.getElementsByTagName(o)[0];",
        "a.async=1;a.src=g;m.parentNode.insertBefore(a,m)})",
        "(window,document,\"script\",\"//www.google-analytics.com/analytics.js\",\"ga\");"
    );
    let program = parse(source).unwrap();
    let analysis = analyze(&program);

    let named: Vec<_> = analysis
        .variables()
        .filter(|v| !v.is_arguments())
        .map(|v| v.name.clone())
        .collect();
    assert_eq!(named, ["i", "s", "o", "g", "r", "a", "m"]);
    assert_eq!(analysis.implicit_globals, ["Date", "window", "document"]);
}
