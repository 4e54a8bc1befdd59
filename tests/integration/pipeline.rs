//! Whole-pipeline integration tests
//!
//! Drives source text through parse, analyze, rename, and generate, the
//! way the library entry points and the CLI do.

use respell_rename::{collect_locals, rename};
use respell_scope::analyze;
use respell_syntax::{generate, parse};

const ANALYTICS: &str = concat!(
    "(function(i,s,o,g,r,a,m){i[\"GoogleAnalyticsObject\"]=r;",
    "i[r]=i[r]||function(){(i[r].q=i[r].q||[]).push(arguments)},",
    "i[r].l=1*new Date();a=s.createElement(o),m=s.getElementsByTagName(o)[0];",
    "a.async=1;a.src=g;m.parentNode.insertBefore(a,m)})",
    "(window,document,\"script\",\"//www.google-analytics.com/analytics.js\",\"ga\");"
);

#[test]
fn analytics_snippet_full_pipeline() {
    let out = rename(ANALYTICS, "clifton").unwrap();

    // The renamed output still has the same shape and globals.
    let program = parse(&out).unwrap();
    let analysis = analyze(&program);
    assert_eq!(analysis.implicit_globals, ["Date", "window", "document"]);

    // And its locals now spell the word.
    let spelled: String = collect_locals(&analysis)
        .into_iter()
        .map(|v| analysis.variable(v).name.clone())
        .collect();
    assert_eq!(spelled, "clifton");
}

#[test]
fn renaming_preserves_structure() {
    let source = "var count = 0; function tick(step) { count += step; return count; }";
    let out = rename(source, "abc").unwrap();
    assert_eq!(out, "var a=0;function b(c){a+=c;return a}");

    // Structure before and after renaming matches node for node.
    let before = parse(source).unwrap();
    let after = parse(&out).unwrap();
    assert_eq!(before.len(), after.len());
}

#[test]
fn renaming_is_repeatable() {
    // A renamed program can be renamed again to any other fitting word.
    let first = rename(ANALYTICS, "clifton").unwrap();
    let second = rename(&first, "dogcart").unwrap();
    let third = rename(&second, "clifton").unwrap();
    assert_eq!(third, first);
}

#[test]
fn untouched_program_is_only_reformatted() {
    let source = "function(e, t) {\n  // sum\n  return e + t;\n}";
    let out = rename(source, "").unwrap();
    assert_eq!(out, generate(&parse(source).unwrap()));
    assert_eq!(out, "function(e,t){return e+t}");
}

#[test]
fn errors_leave_no_output() {
    // Any stage's failure surfaces as an error from the one entry point.
    assert!(rename("var", "a").is_err());
    assert!(rename("function(e){return e+x;}", "x").is_err());
    assert!(rename("function(e){return e;}", "ab").is_err());
}
