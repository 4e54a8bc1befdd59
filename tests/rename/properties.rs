//! Property-based tests for the rename pipeline.
//!
//! Verifies the renamer's invariants over generated programs and target
//! words rather than hand-picked cases.

use proptest::prelude::*;

use respell_rename::{collect_locals, rename, respell_locals};
use respell_scope::analyze;
use respell_syntax::{generate, parse};

/// Strategy for a target word of distinct lowercase letters.
fn isogram_word() -> impl Strategy<Value = String> {
    prop::sample::subsequence("abcdefghijklmnopqrstuvwxyz".chars().collect::<Vec<_>>(), 1..=6)
        .prop_shuffle()
        .prop_map(|letters| letters.into_iter().collect())
}

/// Strategy for distinct starting parameter names.
fn param_names() -> impl Strategy<Value = Vec<String>> {
    prop::sample::subsequence(
        ["e", "t", "n", "r", "i", "o", "u", "s", "qq", "fn0", "$", "_x"]
            .map(String::from)
            .to_vec(),
        6..=12,
    )
    .prop_shuffle()
}

/// Builds a function whose parameters are all referenced once.
fn source_with_params(params: &[String]) -> String {
    format!(
        "function({}){{return {};}}",
        params.join(","),
        params.join("+")
    )
}

/// Strategy for completely random input text.
fn arbitrary_source() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 0..200).prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    /// Positions of the locals sequence end up spelling the word.
    #[test]
    fn locals_spell_the_word(params in param_names(), word in isogram_word()) {
        prop_assume!(word.len() <= params.len());
        let source = source_with_params(&params);
        let mut program = parse(&source).unwrap();
        let mut analysis = analyze(&program);
        respell_locals(&mut program, &mut analysis, &word).unwrap();

        let spelled: String = collect_locals(&analysis)
            .into_iter()
            .take(word.chars().count())
            .map(|v| analysis.variable(v).name.clone())
            .collect();
        prop_assert_eq!(spelled, word);
    }

    /// No two locals ever share a name after renaming.
    #[test]
    fn locals_stay_distinct(params in param_names(), word in isogram_word()) {
        prop_assume!(word.len() <= params.len());
        let source = source_with_params(&params);
        let mut program = parse(&source).unwrap();
        let mut analysis = analyze(&program);
        respell_locals(&mut program, &mut analysis, &word).unwrap();

        let mut names: Vec<String> = collect_locals(&analysis)
            .into_iter()
            .map(|v| analysis.variable(v).name.clone())
            .collect();
        let before = names.len();
        names.sort();
        names.dedup();
        prop_assert_eq!(names.len(), before);
    }

    /// The renamed output is itself valid input, and regenerating it is
    /// a fixed point.
    #[test]
    fn output_reparses_cleanly(params in param_names(), word in isogram_word()) {
        prop_assume!(word.len() <= params.len());
        let source = source_with_params(&params);
        let out = rename(&source, &word).unwrap();
        let reparsed = parse(&out).unwrap();
        prop_assert_eq!(generate(&reparsed), out);
    }

    /// A word longer than the locals sequence always fails the same way.
    #[test]
    fn oversized_word_errors(count in 0usize..4) {
        let params: Vec<String> = (0..count).map(|i| format!("p{i}")).collect();
        let source = if params.is_empty() {
            "window.x = 1;".to_string()
        } else {
            source_with_params(&params)
        };
        let err = rename(&source, "vwxyz").unwrap_err();
        let is_insufficient_locals = matches!(
            err.kind,
            respell_foundation::ErrorKind::InsufficientLocals { .. }
        );
        prop_assert!(is_insufficient_locals);
    }

    /// The pipeline never panics on arbitrary input text.
    #[test]
    fn never_panics_on_garbage(source in arbitrary_source(), word in isogram_word()) {
        let _ = rename(&source, &word);
    }
}
