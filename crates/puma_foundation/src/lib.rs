//! Core values, tables, and errors for PUMA.
//!
//! This crate provides:
//! - [`Value`] - A single cell of tabular data
//! - [`ColumnType`] - The logical type of a column
//! - [`Column`] and [`Table`] - The rectangular dataset every command works on
//! - [`Error`] - Rich error types with a machine-distinguishable kind

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod table;
pub mod types;
pub mod value;

pub use error::{Error, ErrorCategory, ErrorContext, ErrorKind, LexicalHint};
pub use table::{Column, Table};
pub use types::ColumnType;
pub use value::Value;

/// Result type alias using the PUMA [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
