//! Integration tests for composites, capture and the load gate

use std::time::Duration;

use puma_engine::{EngineConfig, Evaluator, Payload, Session};
use puma_foundation::{ErrorKind, Value};

use crate::{evaluator, numbers, numeric_table, session_with, values};

fn quick_evaluator() -> Evaluator {
    Evaluator::new(
        EngineConfig::default()
            .with_timed_budget(Duration::from_millis(20))
            .with_timed_pause(Duration::from_millis(5)),
    )
}

// =============================================================================
// Composites
// =============================================================================

#[test]
fn fixed_repeat_runs_three_times() {
    let mut session = session_with(numeric_table(&[("a", &[1.0]), ("b", &[2.0])]));
    let success = evaluator()
        .execute("Zombistein (Maceta a b)", &mut session)
        .unwrap();
    assert_eq!(values(&session, "a_mas_b"), numbers(&[9.0]));
    let Payload::Repeated(steps) = success.payload else {
        panic!("expected repeated payload");
    };
    assert_eq!(steps.len(), 3);
    assert!(steps.iter().all(Result::is_ok));
}

#[test]
fn fixed_repeat_records_failures_and_carries_on() {
    let mut session = session_with(numeric_table(&[("a", &[1.0]), ("b", &[2.0])]));
    let success = evaluator()
        .execute("Zombistein (Jalapeño a)", &mut session)
        .unwrap();
    let Payload::Repeated(steps) = success.payload else {
        panic!("expected repeated payload");
    };
    assert!(steps[0].is_ok());
    for step in &steps[1..] {
        let err = step.as_ref().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ColumnNotFound { .. }));
    }
    assert_eq!(session.table().column_names(), vec!["b"]);
}

#[test]
fn pair_second_step_sees_first_result() {
    let mut session = session_with(numeric_table(&[("a", &[1.0, 2.0]), ("b", &[3.0, 4.0])]));
    let success = evaluator()
        .execute("Zombidito (Maceta a b Jalapeño a)", &mut session)
        .unwrap();
    assert_eq!(session.table().column_names(), vec!["b", "a_mas_b"]);
    let Payload::Pair(left, right) = success.payload else {
        panic!("expected pair payload");
    };
    assert!(left.is_ok() && right.is_ok());
}

#[test]
fn pair_runs_second_even_if_first_fails() {
    let mut session = session_with(numeric_table(&[("a", &[1.0]), ("b", &[2.0])]));
    let success = evaluator()
        .execute("Zombidito (Jalapeño nada Jalapeño a)", &mut session)
        .unwrap();
    let Payload::Pair(left, right) = success.payload else {
        panic!("expected pair payload");
    };
    assert!(left.is_err());
    assert!(right.is_ok());
    assert_eq!(session.table().column_names(), vec!["b"]);
}

#[test]
fn timed_repeat_runs_until_budget() {
    let mut session = session_with(numeric_table(&[("a", &[1.0]), ("b", &[1.0])]));
    let success = quick_evaluator()
        .execute("Football (Maceta a b)", &mut session)
        .unwrap();
    let Payload::Timed { iterations, last } = success.payload else {
        panic!("expected timed payload");
    };
    assert!(iterations >= 1);
    assert!(last.is_ok());
    #[allow(clippy::cast_precision_loss)]
    let expected = 2.0 * iterations as f64;
    assert_eq!(values(&session, "a_mas_b"), numbers(&[expected]));
}

// =============================================================================
// Capture
// =============================================================================

#[test]
fn capture_does_not_mutate() {
    let table = numeric_table(&[("a", &[1.0]), ("b", &[2.0]), ("c", &[3.0])]);
    let mut session = session_with(table.clone());
    let success = evaluator()
        .execute("Ingeniero c a b", &mut session)
        .unwrap();
    assert_eq!(session.table(), &table);
    let Payload::Snapshot(snapshot) = success.payload else {
        panic!("expected snapshot payload");
    };
    assert_eq!(snapshot[0].0, "c");
    assert_eq!(
        snapshot[0].1.iter().cloned().collect::<Vec<_>>(),
        vec![Value::Number(3.0)]
    );
}

#[test]
fn capture_names_first_missing_column_left_to_right() {
    let table = numeric_table(&[("a", &[1.0])]);
    let mut session = session_with(table.clone());
    let err = evaluator()
        .execute("Ingeniero a q r", &mut session)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ColumnNotFound { .. }));
    assert_eq!(err.identifier(), Some("q"));
    assert_eq!(session.table(), &table);
}

// =============================================================================
// Load gate
// =============================================================================

#[test]
fn every_data_command_is_gated_before_load() {
    let evaluator = evaluator();
    for statement in [
        "Carnivora",
        "Papapum \"x\"",
        "Magnetoseta",
        "melonpulta_gelida",
        "Maceta a b",
        "Hipnoseta a",
        "Petacereza a",
        "Jalapeño a",
        "Football (Jalapeño a)",
        "Ingeniero a b c",
        "Zombidito (Jalapeño a Jalapeño b)",
        "Zombistein (Jalapeño a)",
        "Rosa 1",
    ] {
        let mut session = Session::with_seed(0);
        let err = evaluator.execute(statement, &mut session).unwrap_err();
        assert!(
            matches!(err.kind, ErrorKind::NoTableLoaded { .. }),
            "{statement}: {err}"
        );
    }
}

#[test]
fn close_restores_the_gate() {
    let evaluator = evaluator();
    let mut session = session_with(numeric_table(&[("a", &[1.0])]));
    evaluator.execute("melonpulta_gelida", &mut session).unwrap();
    assert!(!session.has_loaded());
    let err = evaluator.execute("Magnetoseta", &mut session).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NoTableLoaded { .. }));
}

#[test]
fn describe_reports_column_types() {
    let mut session = session_with(numeric_table(&[("a", &[1.0]), ("b", &[2.0])]));
    let success = evaluator().execute("Magnetoseta", &mut session).unwrap();
    let Payload::Summary(summary) = success.payload else {
        panic!("expected summary payload");
    };
    assert_eq!(summary.rows, 1);
    assert_eq!(summary.columns.len(), 2);
    assert!(success.message.contains("a: numeric"));
}
