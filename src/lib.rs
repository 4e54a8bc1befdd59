//! Respell - Collision-free variable respelling for JavaScript-like source
//!
//! This crate re-exports all layers of the Respell pipeline for convenient
//! access. For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: respell_rename     - Letter allocation, collision guard, renamer
//! Layer 2: respell_scope      - Scope analysis, variable resolution
//! Layer 1: respell_syntax     - Lexer, parser, AST, code generation
//! Layer 0: respell_foundation - Core types (Error, Result)
//! ```

pub use respell_foundation as foundation;
pub use respell_rename as rename;
pub use respell_scope as scope;
pub use respell_syntax as syntax;
