//! Lexical scope analysis for Respell.
//!
//! This crate provides:
//! - [`Variable`] / [`VariableId`] - Logical bindings with every
//!   declaration and reference occurrence in the program arena
//! - [`Scope`] / [`ScopeId`] - Lexical regions and their variables
//! - [`analyze`] - The walker that builds a [`ScopeAnalysis`] from a
//!   parsed [`respell_syntax::Program`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod analyzer;
pub mod scope;
pub mod variable;

pub use analyzer::analyze;
pub use scope::{Scope, ScopeAnalysis, ScopeId, ScopeKind};
pub use variable::{Variable, VariableId, VariableKind};
