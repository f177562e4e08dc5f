//! Uniform results of evaluating a statement.
//!
//! Every statement yields `Result<Success>`: the failure side is the
//! foundation [`Error`](puma_foundation::Error), the success side a message
//! plus an optional structured payload the boundary may render.

use std::fmt;

use im::Vector;
use puma_foundation::{ColumnType, Result, Table, Value};

use crate::handlers::chaos::ChaosReport;

/// The result of one statement or one inner step of a composite.
pub type Outcome = Result<Success>;

/// A successful statement.
#[derive(Clone, Debug)]
pub struct Success {
    /// Human-readable summary.
    pub message: String,
    /// Structured data for the boundary.
    pub payload: Payload,
}

impl Success {
    /// Creates a success with no payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            payload: Payload::None,
        }
    }

    /// Creates a success with a payload.
    pub fn with_payload(message: impl Into<String>, payload: Payload) -> Self {
        Self {
            message: message.into(),
            payload,
        }
    }
}

impl fmt::Display for Success {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Structured data attached to a [`Success`].
#[derive(Clone, Debug)]
pub enum Payload {
    /// Nothing beyond the message.
    None,
    /// Shape of the table after a load, or on describe.
    Summary(TableSummary),
    /// Copies of captured columns, in operand order.
    Snapshot(Vec<(String, Vector<Value>)>),
    /// Both results of a paired composition, left first.
    Pair(Box<Outcome>, Box<Outcome>),
    /// Every result of a fixed-count repetition.
    Repeated(Vec<Outcome>),
    /// How often a timed repetition ran, and its final result.
    Timed {
        /// Iterations completed before the budget ran out.
        iterations: usize,
        /// Result of the final iteration.
        last: Box<Outcome>,
    },
    /// Per-round record of a chaos batch.
    Chaos(ChaosReport),
    /// The session has ended.
    Terminated,
}

/// Shape of a table: where it came from, its size and column types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableSummary {
    /// Load source, if any.
    pub source: Option<String>,
    /// Number of rows.
    pub rows: usize,
    /// Column names and logical types, in order.
    pub columns: Vec<(String, ColumnType)>,
}

impl TableSummary {
    /// Summarizes a table.
    #[must_use]
    pub fn of(table: &Table, source: Option<String>) -> Self {
        Self {
            source,
            rows: table.row_count(),
            columns: table
                .columns()
                .iter()
                .map(|c| (c.name().to_string(), c.column_type()))
                .collect(),
        }
    }
}

/// A handler's success together with the table it wants installed.
#[derive(Clone, Debug)]
pub struct Applied {
    /// What to report.
    pub success: Success,
    /// The new working table, if the command changed it.
    pub replacement: Option<Table>,
}

impl Applied {
    /// A success that replaces the table.
    #[must_use]
    pub fn replacing(success: Success, table: Table) -> Self {
        Self {
            success,
            replacement: Some(table),
        }
    }

    /// A success that leaves the table as it is.
    #[must_use]
    pub fn unchanged(success: Success) -> Self {
        Self {
            success,
            replacement: None,
        }
    }
}
