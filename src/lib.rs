//! PUMA - a tiny command language for poking at tables
//!
//! This crate re-exports all layers of the PUMA interpreter for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: puma_runtime    - REPL, CLI, CSV/JSON files, terminal display
//! Layer 2: puma_engine     - Session, evaluator, handler groups
//! Layer 1: puma_language   - Lexer, grammar, parser, command AST
//! Layer 0: puma_foundation - Core types (Value, Table, Error)
//! ```

pub use puma_engine as engine;
pub use puma_foundation as foundation;
pub use puma_language as language;
pub use puma_runtime as runtime;
