//! Whole-statement scenarios against an in-memory table

use puma::engine::{Evaluator, Session};
use puma::foundation::{Column, ErrorCategory, ErrorKind, Table, Value};

fn table(columns: &[(&str, &[f64])]) -> Table {
    Table::from_columns(
        columns
            .iter()
            .map(|(name, values)| Column::new(*name, values.iter().copied().map(Value::Number)))
            .collect(),
    )
    .unwrap()
}

#[test]
fn sum_scenario() {
    let mut session = Session::with_table(table(&[("x", &[1.0, 2.0, 3.0]), ("y", &[4.0, 5.0, 6.0])]), 0);
    let success = Evaluator::default()
        .execute("Maceta x y", &mut session)
        .unwrap();
    assert!(!success.message.is_empty());
    assert_eq!(
        session.table(),
        &table(&[
            ("x", &[1.0, 2.0, 3.0]),
            ("y", &[4.0, 5.0, 6.0]),
            ("x_mas_y", &[5.0, 7.0, 9.0]),
        ])
    );
}

#[test]
fn drop_only_column_scenario() {
    let original = table(&[("x", &[1.0, 2.0, 3.0])]);
    let mut session = Session::with_table(original.clone(), 0);
    let err = Evaluator::default()
        .execute("Jalapeño x", &mut session)
        .unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::SingleColumnDeletionRejected { .. }
    ));
    assert_eq!(session.table(), &original);
}

#[test]
fn missing_operand_scenario() {
    let original = table(&[("x", &[1.0]), ("y", &[2.0])]);
    let mut session = Session::with_table(original.clone(), 0);
    let err = Evaluator::default()
        .execute("Maceta x", &mut session)
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Syntax);
    match &err.kind {
        ErrorKind::UnexpectedEnd { expected } => assert_eq!(expected, &vec!["COLUMN"]),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(session.table(), &original);
}

#[test]
fn errors_leave_session_usable() {
    let evaluator = Evaluator::default();
    let mut session = Session::with_table(table(&[("x", &[1.0]), ("y", &[2.0])]), 0);
    for bad in ["Maceta x [y]", "Maceta", "Jalapeño z", "Rosa 0", "Petacereza"] {
        assert!(evaluator.execute(bad, &mut session).is_err(), "{bad}");
    }
    evaluator.execute("Maceta x y", &mut session).unwrap();
    assert_eq!(session.table().column_count(), 3);
}

#[test]
fn terminate_discards_the_table() {
    let evaluator = Evaluator::default();
    let mut session = Session::with_table(table(&[("x", &[1.0])]), 0);
    evaluator.execute("Zerebros", &mut session).unwrap();
    assert!(session.is_terminated());
    assert!(!session.has_loaded());
}
