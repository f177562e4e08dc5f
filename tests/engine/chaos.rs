//! Integration tests for the chaos operation

use std::collections::HashSet;

use proptest::prelude::*;
use puma_engine::{
    AssumeNo, AssumeYes, EngineConfig, Evaluator, KEPT_ROUNDS, Mutation, Payload, Round,
};
use puma_foundation::{Column, ErrorKind, Table, Value};

use crate::{evaluator, numeric_table, session_with};

fn count<'a>(rounds: impl IntoIterator<Item = &'a Round>, mutation: Mutation) -> usize {
    rounds
        .into_iter()
        .filter(|r| **r == Round::Applied(mutation))
        .count()
}

fn table(rows: usize, columns: usize) -> Table {
    Table::from_columns(
        (0..columns)
            .map(|c| {
                Column::new(
                    format!("c{c}"),
                    (0..rows).map(|r| Value::from(i64::try_from(r * 10 + c).unwrap_or(0))),
                )
            })
            .collect(),
    )
    .unwrap()
}

#[test]
fn non_positive_counts_run_no_rounds() {
    let original = numeric_table(&[("a", &[1.0])]);
    let mut session = session_with(original.clone());
    let err = evaluator().execute("Rosa 0", &mut session).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidIterationCount(0)));
    assert_eq!(session.table(), &original);
}

#[test]
fn large_batch_is_declined_without_confirmation() {
    let original = numeric_table(&[("a", &[1.0, 2.0])]);
    let mut session = session_with(original.clone());
    let evaluator = Evaluator::default().with_confirm(AssumeNo);
    let success = evaluator.execute("Rosa 101", &mut session).unwrap();
    let Payload::Chaos(report) = success.payload else {
        panic!("expected chaos payload");
    };
    assert!(report.declined);
    assert!(report.rounds.is_empty());
    assert_eq!(session.table(), &original);
}

#[test]
fn large_batch_runs_when_confirmed() {
    let mut session = session_with(numeric_table(&[("a", &[1.0, 2.0])]));
    let evaluator = Evaluator::default().with_confirm(AssumeYes);
    let success = evaluator.execute("Rosa 150", &mut session).unwrap();
    let Payload::Chaos(report) = success.payload else {
        panic!("expected chaos payload");
    };
    assert_eq!(report.executed(), 150);
    assert_eq!(report.rounds.len(), KEPT_ROUNDS);
}

#[test]
fn threshold_is_configurable() {
    let mut session = session_with(numeric_table(&[("a", &[1.0])]));
    let evaluator = Evaluator::new(EngineConfig::default().with_chaos_confirm_threshold(2));
    let success = evaluator.execute("Rosa 3", &mut session).unwrap();
    let Payload::Chaos(report) = success.payload else {
        panic!("expected chaos payload");
    };
    assert!(report.declined);
}

#[test]
fn empty_table_rounds_are_skipped_not_fatal() {
    let mut session = session_with(Table::new());
    let success = evaluator().execute("Rosa 30", &mut session).unwrap();
    let Payload::Chaos(report) = success.payload else {
        panic!("expected chaos payload");
    };
    assert_eq!(report.rounds.len(), 30);
    assert_eq!(report.failed(), 0);
    assert!(report.skipped() > 0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn chaos_keeps_names_unique_and_rows_accounted(
        n in 1i64..=100,
        seed in any::<u64>(),
        rows in 0usize..6,
        columns in 0usize..5,
    ) {
        let original = table(rows, columns);
        let mut session = puma_engine::Session::with_table(original, seed);
        let success = evaluator().execute(&format!("Rosa {n}"), &mut session).unwrap();
        let Payload::Chaos(report) = success.payload else {
            panic!("expected chaos payload");
        };
        prop_assert_eq!(report.rounds.len(), usize::try_from(n).unwrap());
        prop_assert_eq!(report.failed(), 0);

        let names = session.table().column_names();
        let unique: HashSet<&String> = names.iter().collect();
        prop_assert_eq!(unique.len(), names.len());
        prop_assert_eq!(names.len(), columns);

        let added = count(&report.rounds, Mutation::DuplicateRow);
        let removed = count(&report.rounds, Mutation::DeleteRow);
        let expected_rows = if columns == 0 { 0 } else { rows + added - removed };
        prop_assert_eq!(session.table().row_count(), expected_rows);
    }
}
