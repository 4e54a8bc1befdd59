//! Core error types for Respell.
//!
//! This crate provides:
//! - [`Error`] - The error type shared by every Respell layer
//! - [`ErrorKind`] - Categorized error kinds for pattern matching
//! - [`Result`] - Convenience alias used throughout the workspace

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;

pub use error::{Error, ErrorKind, Result};
