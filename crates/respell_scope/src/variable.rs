//! Variables: logical bindings and their identifier occurrences.

use respell_syntax::NodeId;

/// Index of a variable in a [`ScopeAnalysis`](crate::ScopeAnalysis) arena.
///
/// Variable identity is this index, not the name: the same binding found
/// through different scope lookups is the same `VariableId`, and renaming
/// never changes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(pub(crate) u32);

impl VariableId {
    /// Returns the raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// How a variable entered its scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VariableKind {
    /// A function parameter.
    Param,
    /// A `var` declaration.
    Var,
    /// A function name binding.
    Function,
    /// The implicit `arguments` object of a function scope.
    ///
    /// It has no identifier node of its own and is never a renaming
    /// candidate, but references to it still resolve here so they are
    /// not mistaken for an implicit global.
    ArgumentsObject,
}

/// A logical binding: a current name plus every identifier occurrence.
#[derive(Clone, Debug)]
pub struct Variable {
    /// Current identifier text. Mutated by renaming.
    pub name: String,
    /// How this variable entered its scope.
    pub kind: VariableKind,
    /// Declaration-site identifier nodes (parameter, declarator, or
    /// function name positions).
    pub declarations: Vec<NodeId>,
    /// Reference-site identifier nodes (reads and writes).
    pub references: Vec<NodeId>,
}

impl Variable {
    /// Creates a variable with no occurrences yet.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: VariableKind) -> Self {
        Self {
            name: name.into(),
            kind,
            declarations: Vec::new(),
            references: Vec::new(),
        }
    }

    /// Iterates over every identifier occurrence of this variable,
    /// declarations first.
    pub fn occurrences(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.declarations
            .iter()
            .chain(self.references.iter())
            .copied()
    }

    /// Returns true if this is the implicit `arguments` object.
    #[must_use]
    pub const fn is_arguments(&self) -> bool {
        matches!(self.kind, VariableKind::ArgumentsObject)
    }
}
