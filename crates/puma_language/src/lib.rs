//! Lexer, grammar, and parser for the PUMA command language.
//!
//! This crate provides:
//! - [`tokenize`] - Tokenization of one statement
//! - [`grammar`] - The productions every command follows, as data
//! - [`parse`] / [`parse_statement`] - Parsing tokens into a [`Command`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod token;

pub use ast::{Action, Command};
pub use lexer::{tokenize, Lexer};
pub use parser::{parse, parse_statement, Parser};
pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
