//! Integration tests for Layer 2: Engine
//!
//! Tests for transforms, composites, chaos and the load gate, driven
//! through the evaluator.

mod chaos;
mod control_flow;
mod transform;

use puma_engine::{Evaluator, Session};
use puma_foundation::{Column, Table, Value};

/// Builds a numeric table from `(name, values)` pairs.
pub fn numeric_table(columns: &[(&str, &[f64])]) -> Table {
    Table::from_columns(
        columns
            .iter()
            .map(|(name, values)| Column::new(*name, values.iter().copied().map(Value::Number)))
            .collect(),
    )
    .unwrap()
}

/// A session that already holds `table`.
pub fn session_with(table: Table) -> Session {
    Session::with_table(table, 42)
}

/// Values of a column, for comparisons.
pub fn values(session: &Session, column: &str) -> Vec<Value> {
    session
        .table()
        .column(column)
        .unwrap_or_else(|| panic!("no column {column}"))
        .values()
        .iter()
        .cloned()
        .collect()
}

/// Numbers as values.
pub fn numbers(values: &[f64]) -> Vec<Value> {
    values.iter().copied().map(Value::Number).collect()
}

/// An evaluator with inert collaborators.
pub fn evaluator() -> Evaluator {
    Evaluator::default()
}
