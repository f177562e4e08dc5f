//! Integration tests for the transform operations

use puma_engine::{EngineConfig, Evaluator};
use puma_foundation::{ColumnType, ErrorKind, Table, Value};

use crate::{evaluator, numbers, numeric_table, session_with, values};

// =============================================================================
// Column sum
// =============================================================================

#[test]
fn sum_creates_derived_column() {
    let mut session = session_with(numeric_table(&[
        ("x", &[1.0, 2.0, 3.0]),
        ("y", &[4.0, 5.0, 6.0]),
    ]));
    evaluator().execute("Maceta x y", &mut session).unwrap();
    assert_eq!(session.table().column_names(), vec!["x", "y", "x_mas_y"]);
    assert_eq!(values(&session, "x_mas_y"), numbers(&[5.0, 7.0, 9.0]));
}

#[test]
fn repeated_sum_accumulates() {
    let mut session = session_with(numeric_table(&[("a", &[1.0, 2.0]), ("b", &[3.0, 4.0])]));
    let evaluator = evaluator();
    evaluator.execute("Maceta a b", &mut session).unwrap();
    assert_eq!(values(&session, "a_mas_b"), numbers(&[4.0, 6.0]));
    evaluator.execute("Maceta a b", &mut session).unwrap();
    assert_eq!(values(&session, "a_mas_b"), numbers(&[8.0, 12.0]));
}

#[test]
fn sum_with_itself_is_allowed() {
    let mut session = session_with(numeric_table(&[("a", &[1.0, 2.0])]));
    evaluator().execute("Maceta a a", &mut session).unwrap();
    assert_eq!(values(&session, "a_mas_a"), numbers(&[2.0, 4.0]));
}

#[test]
fn sum_of_text_column_is_rejected() {
    let table = Table::from_columns(vec![
        puma_foundation::Column::new("n", vec![Value::Number(1.0)]),
        puma_foundation::Column::new("t", vec![Value::from("hola")]),
    ])
    .unwrap();
    let mut session = session_with(table.clone());
    let err = evaluator().execute("Maceta n t", &mut session).unwrap_err();
    match err.kind {
        ErrorKind::NonNumericColumn { column, actual } => {
            assert_eq!(column, "t");
            assert_eq!(actual, ColumnType::Text);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(session.table(), &table);
}

#[test]
fn sum_of_missing_column_lists_alternatives() {
    let mut session = session_with(numeric_table(&[("x", &[1.0]), ("y", &[2.0])]));
    let err = evaluator().execute("Maceta x z", &mut session).unwrap_err();
    match err.kind {
        ErrorKind::ColumnNotFound { column, available } => {
            assert_eq!(column, "z");
            assert_eq!(available, vec!["x", "y"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// =============================================================================
// Column square
// =============================================================================

#[test]
fn square_samples_at_most_five_rows() {
    let rows: Vec<f64> = (1..=8).map(f64::from).collect();
    let mut session = session_with(numeric_table(&[("v", rows.as_slice())]));
    evaluator().execute("Hipnoseta v", &mut session).unwrap();
    let squared = values(&session, "v_cuadrado");
    assert_eq!(squared.len(), 8);
    let filled: Vec<(usize, f64)> = squared
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.as_number().map(|n| (i, n)))
        .collect();
    assert_eq!(filled.len(), 5);
    for (i, n) in filled {
        assert!((n - rows[i] * rows[i]).abs() < f64::EPSILON);
    }
}

#[test]
fn square_sample_size_is_configurable() {
    let rows: Vec<f64> = (1..=8).map(f64::from).collect();
    let mut session = session_with(numeric_table(&[("v", rows.as_slice())]));
    let evaluator = Evaluator::new(EngineConfig::default().with_sample_size(2));
    evaluator.execute("Hipnoseta v", &mut session).unwrap();
    let filled = values(&session, "v_cuadrado")
        .iter()
        .filter(|v| v.as_number().is_some())
        .count();
    assert_eq!(filled, 2);
}

#[test]
fn square_of_small_table_covers_every_row() {
    let mut session = session_with(numeric_table(&[("v", &[2.0, 3.0])]));
    evaluator().execute("Hipnoseta v", &mut session).unwrap();
    assert_eq!(values(&session, "v_cuadrado"), numbers(&[4.0, 9.0]));
}

#[test]
fn square_is_reproducible_for_a_seed() {
    let rows: Vec<f64> = (1..=20).map(f64::from).collect();
    let run = || {
        let mut session = session_with(numeric_table(&[("v", rows.as_slice())]));
        evaluator().execute("Hipnoseta v", &mut session).unwrap();
        values(&session, "v_cuadrado")
    };
    assert_eq!(run(), run());
}

// =============================================================================
// Top-N
// =============================================================================

#[test]
fn top_n_keeps_ten_largest_in_descending_order() {
    let rows: Vec<f64> = (1..=15).map(f64::from).collect();
    let mut session = session_with(numeric_table(&[("v", rows.as_slice()), ("w", rows.as_slice())]));
    evaluator().execute("Petacereza v", &mut session).unwrap();
    let expected: Vec<f64> = (6..=15).rev().map(f64::from).collect();
    assert_eq!(values(&session, "v"), numbers(&expected));
    assert_eq!(values(&session, "w"), numbers(&expected));
}

#[test]
fn top_n_is_idempotent_below_threshold() {
    let mut session = session_with(numeric_table(&[("v", &[3.0, 9.0, 1.0])]));
    let evaluator = evaluator();
    evaluator.execute("Petacereza v", &mut session).unwrap();
    let once = session.table().clone();
    evaluator.execute("Petacereza v", &mut session).unwrap();
    assert_eq!(session.table(), &once);
    assert_eq!(values(&session, "v"), numbers(&[9.0, 3.0, 1.0]));
}

#[test]
fn top_n_puts_nulls_last() {
    let table = Table::from_columns(vec![puma_foundation::Column::new(
        "v",
        vec![Value::Null, Value::Number(1.0), Value::Number(5.0)],
    )])
    .unwrap();
    let mut session = session_with(table);
    evaluator().execute("Petacereza v", &mut session).unwrap();
    assert_eq!(
        values(&session, "v"),
        vec![Value::Number(5.0), Value::Number(1.0), Value::Null]
    );
}

#[test]
fn top_n_on_empty_table_is_rejected() {
    let mut session = session_with(numeric_table(&[("v", &[])]));
    let err = evaluator().execute("Petacereza v", &mut session).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::EmptyTable));
}

// =============================================================================
// Column drop
// =============================================================================

#[test]
fn drop_removes_column() {
    let mut session = session_with(numeric_table(&[("x", &[1.0]), ("y", &[2.0])]));
    evaluator().execute("Jalapeño x", &mut session).unwrap();
    assert_eq!(session.table().column_names(), vec!["y"]);
}

#[test]
fn drop_of_only_column_is_rejected() {
    let table = numeric_table(&[("x", &[1.0, 2.0, 3.0])]);
    let mut session = session_with(table.clone());
    let err = evaluator().execute("Jalapeño x", &mut session).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::SingleColumnDeletionRejected { .. }
    ));
    assert_eq!(err.identifier(), Some("x"));
    assert_eq!(session.table(), &table);
}
