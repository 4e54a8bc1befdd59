//! Collision-free sequential renaming of local variables.
//!
//! This crate is the heart of Respell: it maps a program's local
//! variables, in scope-analysis order, onto the letters of a target word,
//! displacing any variable whose current name would collide onto a
//! freshly computed free letter.
//!
//! - [`collect_locals`] - Gathers renameable variables in stable order
//! - [`check_global_collisions`] - Rejects unsafe single-letter globals
//!   before anything is mutated
//! - [`free_letter`] - Deterministic allocator for unused letters
//! - [`rename`] / [`rename_program`] - The full pipeline

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod allocator;
pub mod collector;
pub mod guard;
pub mod renamer;

pub use allocator::free_letter;
pub use collector::collect_locals;
pub use guard::check_global_collisions;
pub use renamer::{rename, rename_program, respell_locals};
