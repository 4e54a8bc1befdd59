//! Error types for the Respell system.
//!
//! Uses `thiserror` for ergonomic error definition. Every failure mode of
//! the pipeline (parsing, the pre-mutation safety check, and the two ways
//! the renaming loop itself can run aground) is one [`ErrorKind`] variant.

use thiserror::Error;

/// Convenience result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Respell operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates a parse error at the given source position.
    #[must_use]
    pub fn parse(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self::new(ErrorKind::ParseError {
            message: message.into(),
            line,
            column,
        })
    }

    /// Creates an unsafe global collision error.
    #[must_use]
    pub fn unsafe_global_collision(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsafeGlobalCollision { name: name.into() })
    }

    /// Creates an insufficient locals error.
    #[must_use]
    pub fn insufficient_locals(available: usize, requested: usize) -> Self {
        Self::new(ErrorKind::InsufficientLocals {
            available,
            requested,
        })
    }

    /// Creates a no-free-name-available error.
    #[must_use]
    pub fn no_free_name() -> Self {
        Self::new(ErrorKind::NoFreeNameAvailable)
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Input text is not valid source.
    #[error("parse error at {line}:{column}: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
    },

    /// A single-character global would be shadowed by the target word.
    #[error("cannot replace global variable \"{name}\"")]
    UnsafeGlobalCollision {
        /// The implicit global name that collides with the target word.
        name: String,
    },

    /// The target word is longer than the number of renameable locals.
    #[error("not enough variables to replace: {available} available, {requested} requested")]
    InsufficientLocals {
        /// Number of renameable local variables in the program.
        available: usize,
        /// Number of letters in the requested target word.
        requested: usize,
    },

    /// The free-letter alphabet is exhausted.
    #[error("no free letter available: the canonical alphabet is fully taken")]
    NoFreeNameAvailable,

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}
