//! Integration tests for Layer 1: Language
//!
//! Tests for the lexer and the grammar-driven parser.

mod lexer;
mod parser;
