//! Cross-layer integration tests for Respell
//!
//! Tests that verify correct interaction between multiple crates.

mod pipeline;
