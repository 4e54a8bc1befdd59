//! Lexer, parser, arena AST, and compact code generator for Respell.
//!
//! This crate provides:
//! - `Lexer` - Tokenization of JavaScript-like source
//! - `Parser` - Parsing tokens into an arena-based [`Program`]
//! - `codegen` - Regenerating compact source text from a [`Program`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod codegen;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod token;


pub use ast::{AssignOp, BinaryOp, LogicalOp, Node, NodeId, NodeKind, Program, UnaryOp, UpdateOp};
pub use codegen::generate;
pub use lexer::Lexer;
pub use parser::{Parser, parse};
pub use span::Span;
pub use token::{Token, TokenKind};
