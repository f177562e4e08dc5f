//! End-to-end tests
//!
//! Statements run through the evaluator with the runtime's file store, the
//! way the REPL drives them.

mod files;
mod scenarios;
