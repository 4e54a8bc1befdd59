//! The local-variable collector.
//!
//! Produces the ordered sequence of renameable variables. Position in
//! this sequence decides which target letter a variable receives, so the
//! order must follow the scope analysis exactly: scopes in visitation
//! order, variables in declaration order within each scope.

use std::collections::HashSet;

use respell_scope::{ScopeAnalysis, VariableId};

/// Collects renameable locals in stable order.
///
/// The implicit `arguments` object is excluded, and a variable already
/// collected (by identity, not by name) is not collected twice.
#[must_use]
pub fn collect_locals(analysis: &ScopeAnalysis) -> Vec<VariableId> {
    let mut seen = HashSet::new();
    let mut locals = Vec::new();

    for scope in &analysis.scopes {
        for &variable in &scope.variables {
            if analysis.variable(variable).is_arguments() {
                continue;
            }
            if seen.insert(variable) {
                locals.push(variable);
            }
        }
    }
    locals
}
