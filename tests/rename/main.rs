//! Integration tests for Layer 3: Rename
//!
//! Tests the full rename pipeline and its invariants.

mod properties;
mod renamer;
