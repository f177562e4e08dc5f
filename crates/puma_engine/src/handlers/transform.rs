//! Transform operations: column sum, sampled square, top-N and drop.
//!
//! Handlers read the current table and hand back a replacement; they never
//! touch the session. Every check runs before any new value is built, so a
//! failing command leaves the working table exactly as it was.

use std::cmp::Ordering;

use im::Vector;
use puma_foundation::{Column, ColumnType, Error, ErrorKind, Result, Table, Value};
use puma_language::Action;
use rand::seq::index;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::config::EngineConfig;
use crate::outcome::{Applied, Success};

/// Separator between the operand names of a sum column.
pub const SUM_SEPARATOR: &str = "_mas_";

/// Suffix of a square column.
pub const SQUARE_SUFFIX: &str = "_cuadrado";

/// Name of the column `Maceta left right` writes into.
#[must_use]
pub fn sum_column_name(left: &str, right: &str) -> String {
    format!("{left}{SUM_SEPARATOR}{right}")
}

/// Name of the column `Hipnoseta column` writes into.
#[must_use]
pub fn square_column_name(column: &str) -> String {
    format!("{column}{SQUARE_SUFFIX}")
}

/// Applies one transform action to a table.
///
/// # Errors
///
/// `ColumnNotFound`, `NonNumericColumn`, `EmptyTable` or
/// `SingleColumnDeletionRejected`, depending on the action.
pub fn apply(
    action: &Action,
    table: &Table,
    rng: &mut ChaCha8Rng,
    config: &EngineConfig,
) -> Result<Applied> {
    match action {
        Action::Sum { left, right } => column_sum(table, left, right),
        Action::Square { column } => column_square(table, column, rng, config.sample_size),
        Action::TopN { column } => top_n(table, column, config.top_n),
        Action::Drop { column } => drop_column(table, column),
    }
}

/// Adds two numeric columns into `<left>_mas_<right>`, accumulating onto
/// that column if it already exists.
///
/// # Errors
///
/// `ColumnNotFound` or `NonNumericColumn` for either operand or for an
/// existing derived column holding text.
pub fn column_sum(table: &Table, left: &str, right: &str) -> Result<Applied> {
    let a = table.require_numeric(left)?;
    let b = table.require_numeric(right)?;

    let sums: Vector<Value> = a
        .values()
        .iter()
        .zip(b.values().iter())
        .map(|pair| match pair {
            (Value::Number(x), Value::Number(y)) => Value::Number(x + y),
            _ => Value::Null,
        })
        .collect();

    let name = sum_column_name(left, right);
    let (values, accumulated) = merge_derived(table, &name, sums)?;
    debug!(column = %name, accumulated, "column sum");

    let mut next = table.clone();
    next.upsert_column(Column::new(&name, values))?;
    let verb = if accumulated { "accumulated into" } else { "created" };
    Ok(Applied::replacing(
        Success::message(format!("{left} + {right}: {verb} column {name}")),
        next,
    ))
}

/// Squares a random sample of up to `sample_size` rows into
/// `<column>_cuadrado`, accumulating onto that column if it already exists.
///
/// Rows outside the sample are null in a fresh column and keep their value
/// in an existing one.
///
/// # Errors
///
/// `ColumnNotFound` or `NonNumericColumn`.
pub fn column_square(
    table: &Table,
    column: &str,
    rng: &mut ChaCha8Rng,
    sample_size: usize,
) -> Result<Applied> {
    let source = table.require_numeric(column)?;
    let rows = table.row_count();
    let amount = sample_size.min(rows);
    let sampled = index::sample(rng, rows, amount);

    let mut squares: Vector<Value> = std::iter::repeat_n(Value::Null, rows).collect();
    for row in sampled.iter() {
        if let Some(Value::Number(x)) = source.get(row) {
            squares.set(row, Value::Number(x * x));
        }
    }

    let name = square_column_name(column);
    let (values, accumulated) = merge_derived(table, &name, squares)?;
    debug!(column = %name, sampled = amount, accumulated, "column square");

    let mut next = table.clone();
    next.upsert_column(Column::new(&name, values))?;
    Ok(Applied::replacing(
        Success::message(format!(
            "squared {amount} sampled rows of {column} into {name}"
        )),
        next,
    ))
}

/// Combines fresh derived values with an existing derived column.
///
/// Returns the values to store and whether an existing column was found.
fn merge_derived(table: &Table, name: &str, fresh: Vector<Value>) -> Result<(Vector<Value>, bool)> {
    let Some(existing) = table.column(name) else {
        return Ok((fresh, false));
    };
    let actual = existing.column_type();
    if actual == ColumnType::Text {
        return Err(Error::non_numeric(name, actual));
    }
    let merged = existing
        .values()
        .iter()
        .zip(fresh.iter())
        .map(|(prior, new)| {
            prior
                .accumulate(new)
                .ok_or_else(|| Error::non_numeric(name, actual))
        })
        .collect::<Result<Vector<Value>>>()?;
    Ok((merged, true))
}

/// Keeps the `n` rows with the largest values in `column`, largest first.
///
/// Ties keep their current order; null values sort last.
///
/// # Errors
///
/// `ColumnNotFound`, `NonNumericColumn` or `EmptyTable`.
pub fn top_n(table: &Table, column: &str, n: usize) -> Result<Applied> {
    table.require_column(column)?;
    if table.is_empty() {
        return Err(Error::new(ErrorKind::EmptyTable));
    }
    let source = table.require_numeric(column)?;

    let mut order: Vec<usize> = (0..table.row_count()).collect();
    order.sort_by(|&i, &j| descending(source.get(i), source.get(j)));
    order.truncate(n);

    let next = table.select_rows(&order)?;
    Ok(Applied::replacing(
        Success::message(format!(
            "kept the top {} rows by {column}",
            next.row_count()
        )),
        next,
    ))
}

fn descending(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a.and_then(Value::as_number), b.and_then(Value::as_number)) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Removes a column.
///
/// # Errors
///
/// `ColumnNotFound`, or `SingleColumnDeletionRejected` if it is the only one.
pub fn drop_column(table: &Table, column: &str) -> Result<Applied> {
    let mut next = table.clone();
    next.remove_column(column)?;
    Ok(Applied::replacing(
        Success::message(format!(
            "dropped {column}; {} columns remain",
            next.column_count()
        )),
        next,
    ))
}
