//! Integration tests for Layer 2: Scope
//!
//! Tests scope construction and variable resolution.

mod analyzer;
