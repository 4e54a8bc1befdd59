//! Scopes and the analysis result container.

use crate::variable::{Variable, VariableId};

/// Index of a scope in a [`ScopeAnalysis`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub(crate) u32);

impl ScopeId {
    /// Returns the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// What kind of lexical region a scope is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    /// The outermost scope of the program.
    Global,
    /// A function body (declaration or expression).
    Function,
}

/// A lexical region and the variables declared in it.
#[derive(Clone, Debug)]
pub struct Scope {
    /// What kind of region this is.
    pub kind: ScopeKind,
    /// Variables declared in this scope, in declaration order
    /// (`arguments` first for function scopes, then parameters, then
    /// body declarations in source order).
    pub variables: Vec<VariableId>,
}

impl Scope {
    /// Creates an empty scope.
    #[must_use]
    pub fn new(kind: ScopeKind) -> Self {
        Self {
            kind,
            variables: Vec::new(),
        }
    }
}

/// The result of scope analysis: scopes in visitation order, the variable
/// arena, and the implicit globals.
///
/// Scope order is load-bearing: the renamer assigns target letters by the
/// position a variable has when scopes are walked in this order.
#[derive(Clone, Debug, Default)]
pub struct ScopeAnalysis {
    /// Scopes, global first, then functions in pre-order source order.
    pub scopes: Vec<Scope>,
    /// All variables, in creation order.
    variables: Vec<Variable>,
    /// Names read or written without any declaration in scope, in
    /// first-encounter order.
    pub implicit_globals: Vec<String>,
}

impl ScopeAnalysis {
    /// Creates an empty analysis.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable to the arena and returns its id.
    ///
    /// # Panics
    /// Panics if the arena exceeds `u32::MAX` variables.
    pub fn alloc_variable(&mut self, variable: Variable) -> VariableId {
        let id = u32::try_from(self.variables.len()).expect("variable arena overflow");
        self.variables.push(variable);
        VariableId(id)
    }

    /// Adds a scope and returns its id.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` scopes are created.
    pub fn alloc_scope(&mut self, scope: Scope) -> ScopeId {
        let id = u32::try_from(self.scopes.len()).expect("scope arena overflow");
        self.scopes.push(scope);
        ScopeId(id)
    }

    /// Returns the variable with the given id.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this analysis.
    #[must_use]
    pub fn variable(&self, id: VariableId) -> &Variable {
        &self.variables[id.index()]
    }

    /// Returns a mutable reference to the variable with the given id.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this analysis.
    pub fn variable_mut(&mut self, id: VariableId) -> &mut Variable {
        &mut self.variables[id.index()]
    }

    /// Returns the scope with the given id.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this analysis.
    #[must_use]
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    /// Returns a mutable reference to the scope with the given id.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this analysis.
    pub fn scope_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id.index()]
    }

    /// Number of variables in the arena.
    #[must_use]
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Iterates over all variables in creation order.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }
}
