//! Integration tests for Layer 1: Syntax
//!
//! Tests for lexer, parser, and code generation.

mod codegen;
mod lexer;
