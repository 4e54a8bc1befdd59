//! The sequential renamer and the public pipeline.
//!
//! For each position `i` of the target word, the variable at position `i`
//! of the collected locals is renamed to the word's `i`-th letter. Any
//! other local that already held that letter is displaced onto a free
//! letter; the taken set is recomputed for every displacement, so two
//! variables displaced in the same round never land on the same name.

use std::collections::HashSet;

use respell_foundation::{Error, Result};
use respell_scope::{ScopeAnalysis, VariableId, analyze};
use respell_syntax::{Program, generate, parse};

use crate::allocator::free_letter;
use crate::collector::collect_locals;
use crate::guard::check_global_collisions;

/// Renames the program's locals to spell `target` and returns the
/// regenerated compact source text.
///
/// # Errors
/// - `ParseError` if `source` is malformed
/// - `UnsafeGlobalCollision` if a single-letter global appears in `target`
/// - `InsufficientLocals` if `target` is longer than the locals sequence
/// - `NoFreeNameAvailable` if a displacement exhausts the alphabet
pub fn rename(source: &str, target: &str) -> Result<String> {
    let program = rename_program(source, target)?;
    Ok(generate(&program))
}

/// Like [`rename`], but returns the mutated tree instead of text.
///
/// # Errors
/// Same conditions as [`rename`].
pub fn rename_program(source: &str, target: &str) -> Result<Program> {
    let mut program = parse(source)?;
    let mut analysis = analyze(&program);
    respell_locals(&mut program, &mut analysis, target)?;
    Ok(program)
}

/// The core loop: binds collected locals to target letters in order,
/// displacing colliding locals onto free letters.
///
/// On error the program may already be partially renamed; callers must
/// discard it (the public entry points do so by dropping it).
///
/// # Errors
/// Same conditions as [`rename`], minus parsing.
pub fn respell_locals(
    program: &mut Program,
    analysis: &mut ScopeAnalysis,
    target: &str,
) -> Result<()> {
    let target: Vec<char> = target.chars().collect();

    // Reject unsafe globals before touching anything.
    check_global_collisions(&analysis.implicit_globals, &target)?;

    let locals = collect_locals(analysis);

    for (i, &letter) in target.iter().enumerate() {
        let Some(&candidate) = locals.get(i) else {
            return Err(Error::insufficient_locals(locals.len(), target.len()));
        };

        let letter_name = letter.to_string();
        if analysis.variable(candidate).name == letter_name {
            // Already spelled right; nothing to displace either.
            continue;
        }

        rename_variable(program, analysis, candidate, &letter_name)?;

        // One free letter is computed up front; each further displaced
        // variable in this round gets a freshly computed one.
        let mut reserved = Some(free_letter(&taken_names(analysis, &locals, &target))?);
        for &other in &locals {
            if other == candidate || analysis.variable(other).name != letter_name {
                continue;
            }
            let free = match reserved.take() {
                Some(letter) => letter,
                None => free_letter(&taken_names(analysis, &locals, &target))?,
            };
            rename_variable(program, analysis, other, &free.to_string())?;
        }
    }
    Ok(())
}

/// Renames one variable, updating every declaration and reference node
/// in the program together with the variable's own name field.
fn rename_variable(
    program: &mut Program,
    analysis: &mut ScopeAnalysis,
    id: VariableId,
    new_name: &str,
) -> Result<()> {
    if analysis.variable(id).name == new_name {
        return Ok(());
    }
    let occurrences: Vec<_> = analysis.variable(id).occurrences().collect();
    for node in occurrences {
        program.set_ident_name(node, new_name)?;
    }
    analysis.variable_mut(id).name = new_name.to_string();
    Ok(())
}

/// The names no displaced variable may take: every local's current name,
/// every implicit global, and every target letter.
fn taken_names(
    analysis: &ScopeAnalysis,
    locals: &[VariableId],
    target: &[char],
) -> HashSet<String> {
    let mut taken: HashSet<String> = locals
        .iter()
        .map(|&v| analysis.variable(v).name.clone())
        .collect();
    taken.extend(analysis.implicit_globals.iter().cloned());
    taken.extend(target.iter().map(ToString::to_string));
    taken
}
